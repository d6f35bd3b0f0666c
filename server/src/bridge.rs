//! Tool bridge between MCP tool calls and the VectorForge engine
//!
//! Each call runs validate -> embed -> dispatch -> format and ends in a
//! [`ToolCallResult`]. Nothing is kept between calls.

use crate::error::{BridgeError, BridgeResult};
use crate::mcp::protocol::ToolCallResult;
use crate::mcp::tools::{RECALL_MEMORY, STORE_MEMORY};
use serde_json::Value;
use std::sync::Arc;
use vectorforge_memory::{Embedder, EngineClient, LcgEmbedder, SearchResult, VectorEngine};

/// Routes tool calls to the engine and formats what comes back
pub struct ToolBridge {
    engine: EngineClient,
    embedder: Arc<dyn Embedder>,
}

impl ToolBridge {
    /// Bridge using the deterministic LCG embedder
    pub fn new(engine: Arc<dyn VectorEngine>) -> Self {
        Self::with_embedder(engine, Arc::new(LcgEmbedder::new()))
    }

    pub fn with_embedder(engine: Arc<dyn VectorEngine>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            engine: EngineClient::new(engine),
            embedder,
        }
    }

    /// Execute a tool by name.
    ///
    /// Never fails: errors come back as an `isError` result whose text is
    /// `Error: <message>`.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        match self.dispatch(name, arguments).await {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => {
                tracing::warn!(tool = name, "Tool call failed: {}", e);
                ToolCallResult::error(format!("Error: {}", e))
            }
        }
    }

    async fn dispatch(&self, name: &str, arguments: Option<Value>) -> BridgeResult<String> {
        match name {
            STORE_MEMORY => {
                let text = required_string(arguments.as_ref(), "text")?;
                self.store_memory(text).await
            }
            RECALL_MEMORY => {
                let query = required_string(arguments.as_ref(), "query")?;
                self.recall_memory(query).await
            }
            _ => Err(BridgeError::UnknownTool(name.to_string())),
        }
    }

    /// Embed and store `text`, returning the confirmation message
    pub async fn store_memory(&self, text: &str) -> BridgeResult<String> {
        let embedding = self.embedder.embed(text)?;
        let stored = self.engine.add(text, &embedding).await?;

        tracing::info!(id = stored.id, "Stored memory");
        Ok(format_stored(stored.id, text))
    }

    /// Embed `query` and list the engine's closest memories
    pub async fn recall_memory(&self, query: &str) -> BridgeResult<String> {
        let embedding = self.embedder.embed(query)?;
        let response = self.engine.search(&embedding).await?;

        tracing::debug!(hits = response.results.len(), "Recalled memories");
        Ok(format_recall(&response.results))
    }
}

impl std::fmt::Debug for ToolBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolBridge")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

/// Pull a required string argument out of the call arguments
fn required_string<'a>(arguments: Option<&'a Value>, key: &str) -> BridgeResult<&'a str> {
    let value = arguments
        .and_then(|args| args.get(key))
        .ok_or_else(|| BridgeError::validation(format!("Missing '{}' parameter", key)))?;

    value.as_str().ok_or_else(|| {
        BridgeError::validation(format!(
            "'{}' must be a string, got {}",
            key,
            json_type_name(value)
        ))
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Confirmation text for a stored memory
pub fn format_stored(id: i64, text: &str) -> String {
    format!(
        "✓ Memory stored successfully!\n\nID: {}\nContent: \"{}\"\n\nThe memory has been embedded and stored in the local vector database.",
        id, text
    )
}

/// Ranked listing of search hits, in engine order
pub fn format_recall(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No memories found in the database.".to_string();
    }

    let mut text = format!("Found {} similar memories:\n\n", results.len());
    for (index, memory) in results.iter().enumerate() {
        text.push_str(&format!(
            "{}. [ID: {}] (Similarity: {}%)\n   \"{}\"\n\n",
            index + 1,
            memory.id,
            format_percent(memory.score),
            memory.content
        ));
    }
    text
}

/// `score * 100` to one decimal place, exact halves rounded away from zero.
///
/// `{:.1}` rounds on the exact binary value, which already agrees with
/// half-up except at exact ties. A tie at one decimal is `odd / 20`, and the
/// only such values an `f64` holds exactly are odd multiples of `0.25`.
pub fn format_percent(score: f64) -> String {
    let percent = score * 100.0;
    let quarters = percent * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", (percent * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use vectorforge_memory::{EngineCommand, EngineError, EngineInvocation, EMBEDDING_DIM};

    /// In-process engine: canned replies per command, records every call
    #[derive(Default)]
    struct FakeEngine {
        add_reply: Option<Value>,
        search_reply: Option<Value>,
        calls: Mutex<Vec<EngineInvocation>>,
    }

    impl FakeEngine {
        fn with_add(reply: Value) -> Arc<Self> {
            Arc::new(Self {
                add_reply: Some(reply),
                ..Default::default()
            })
        }

        fn with_search(reply: Value) -> Arc<Self> {
            Arc::new(Self {
                search_reply: Some(reply),
                ..Default::default()
            })
        }

        fn calls(&self) -> Vec<EngineInvocation> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VectorEngine for FakeEngine {
        async fn invoke(&self, invocation: &EngineInvocation) -> Result<Value, EngineError> {
            self.calls.lock().unwrap().push(invocation.clone());
            let reply = match invocation.command {
                EngineCommand::Add => self.add_reply.clone(),
                EngineCommand::Search => self.search_reply.clone(),
            };
            reply.ok_or_else(|| EngineError::protocol("no reply scripted"))
        }
    }

    /// Engine whose process always exits non-zero
    struct CrashingEngine;

    #[async_trait]
    impl VectorEngine for CrashingEngine {
        async fn invoke(&self, _invocation: &EngineInvocation) -> Result<Value, EngineError> {
            Err(EngineError::Execution {
                status: "exit status: 1".to_string(),
                stderr: "Error: Unknown command".to_string(),
            })
        }
    }

    /// Engine that never answers in time
    struct StalledEngine;

    #[async_trait]
    impl VectorEngine for StalledEngine {
        async fn invoke(&self, _invocation: &EngineInvocation) -> Result<Value, EngineError> {
            Err(EngineError::Timeout(std::time::Duration::from_secs(30)))
        }
    }

    #[tokio::test]
    async fn test_store_memory_confirms_id_and_text() {
        let engine = FakeEngine::with_add(json!({"success": true, "id": 42}));
        let bridge = ToolBridge::new(engine.clone());

        let result = bridge
            .call(STORE_MEMORY, Some(json!({"text": "Rust uses ownership"})))
            .await;

        assert!(!result.is_error());
        let text = result.text_content();
        assert!(text.contains("ID: 42"));
        assert!(text.contains("Content: \"Rust uses ownership\""));

        let calls = engine.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].command, EngineCommand::Add);
        assert_eq!(calls[0].args[0], "Rust uses ownership");
        let embedding: Vec<f64> = serde_json::from_str(&calls[0].args[1]).unwrap();
        assert_eq!(embedding.len(), EMBEDDING_DIM);
    }

    #[tokio::test]
    async fn test_recall_sends_same_embedding_as_store() {
        let engine = Arc::new(FakeEngine {
            add_reply: Some(json!({"id": 1})),
            search_reply: Some(json!({"results": []})),
            ..Default::default()
        });
        let bridge = ToolBridge::new(engine.clone());

        bridge
            .call(STORE_MEMORY, Some(json!({"text": "same text"})))
            .await;
        bridge
            .call(RECALL_MEMORY, Some(json!({"query": "same text"})))
            .await;

        let calls = engine.calls();
        assert_eq!(calls[1].command, EngineCommand::Search);
        assert_eq!(calls[0].args[1], calls[1].args[0]);
    }

    #[tokio::test]
    async fn test_recall_with_no_results() {
        let engine = FakeEngine::with_search(json!({"results": []}));
        let bridge = ToolBridge::new(engine);

        let result = bridge
            .call(RECALL_MEMORY, Some(json!({"query": "anything"})))
            .await;

        assert!(!result.is_error());
        assert_eq!(result.text_content(), "No memories found in the database.");
    }

    #[tokio::test]
    async fn test_recall_ranks_in_engine_order() {
        let engine = FakeEngine::with_search(json!({"success": true, "results": [
            {"id": 1, "content": "a", "score": 0.873},
            {"id": 2, "content": "b", "score": 0.5}
        ]}));
        let bridge = ToolBridge::new(engine);

        let result = bridge
            .call(RECALL_MEMORY, Some(json!({"query": "letters"})))
            .await;

        assert!(!result.is_error());
        assert_eq!(
            result.text_content(),
            "Found 2 similar memories:\n\n\
             1. [ID: 1] (Similarity: 87.3%)\n   \"a\"\n\n\
             2. [ID: 2] (Similarity: 50.0%)\n   \"b\"\n\n"
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_result() {
        let bridge = ToolBridge::new(FakeEngine::with_add(json!({"id": 1})));

        let result = bridge.call("forget_memory", Some(json!({}))).await;

        assert!(result.is_error());
        assert_eq!(result.text_content(), "Error: Unknown tool: forget_memory");
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let engine = FakeEngine::with_add(json!({"id": 1}));
        let bridge = ToolBridge::new(engine.clone());

        let missing = bridge.call(STORE_MEMORY, None).await;
        assert!(missing.is_error());
        assert!(missing.text_content().contains("Missing 'text' parameter"));

        let wrong_type = bridge.call(STORE_MEMORY, Some(json!({"text": 12}))).await;
        assert!(wrong_type.is_error());
        assert!(wrong_type
            .text_content()
            .contains("'text' must be a string, got number"));

        let wrong_key = bridge.call(RECALL_MEMORY, Some(json!({"text": "q"}))).await;
        assert!(wrong_key.is_error());
        assert!(wrong_key.text_content().contains("Missing 'query' parameter"));

        // Nothing reached the engine
        assert!(engine.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_is_valid() {
        let engine = FakeEngine::with_add(json!({"id": 0}));
        let bridge = ToolBridge::new(engine);

        let result = bridge.call(STORE_MEMORY, Some(json!({"text": ""}))).await;
        assert!(!result.is_error());
        assert!(result.text_content().contains("ID: 0"));
    }

    #[tokio::test]
    async fn test_engine_failure_is_isolated() {
        let bridge = ToolBridge::new(Arc::new(CrashingEngine));

        let stored = bridge.call(STORE_MEMORY, Some(json!({"text": "x"}))).await;
        assert!(stored.is_error());
        assert!(stored.text_content().starts_with("Error: VectorForge exited with"));

        let recalled = bridge.call(RECALL_MEMORY, Some(json!({"query": "x"}))).await;
        assert!(recalled.is_error());
        assert!(recalled.text_content().contains("Unknown command"));
    }

    #[tokio::test]
    async fn test_engine_timeout_is_error_result() {
        let bridge = ToolBridge::new(Arc::new(StalledEngine));

        for (tool, args) in [
            (STORE_MEMORY, json!({"text": "slow"})),
            (RECALL_MEMORY, json!({"query": "slow"})),
        ] {
            let result = bridge.call(tool, Some(args)).await;
            assert!(result.is_error());
            assert!(result
                .text_content()
                .starts_with("Error: VectorForge did not respond within 30s"));
        }
    }

    #[tokio::test]
    async fn test_protocol_violation_is_error_result() {
        let bridge = ToolBridge::new(FakeEngine::with_search(json!({"matches": []})));

        let result = bridge.call(RECALL_MEMORY, Some(json!({"query": "x"}))).await;
        assert!(result.is_error());
        assert!(result
            .text_content()
            .starts_with("Error: Invalid response from VectorForge"));
    }

    #[test]
    fn test_format_stored() {
        assert_eq!(
            format_stored(3, "hello"),
            "✓ Memory stored successfully!\n\nID: 3\nContent: \"hello\"\n\nThe memory has been embedded and stored in the local vector database."
        );
    }

    #[test]
    fn test_format_recall_rounds_to_one_decimal() {
        let results = vec![SearchResult {
            id: 9,
            content: "close".to_string(),
            score: 0.99999,
        }];
        assert!(format_recall(&results).contains("(Similarity: 100.0%)"));
    }

    #[test]
    fn test_format_recall_rounds_ties_up() {
        let results: Vec<SearchResult> = [0.8725, 0.1225, 0.0025]
            .iter()
            .enumerate()
            .map(|(i, score)| SearchResult {
                id: i as i64,
                content: "tie".to_string(),
                score: *score,
            })
            .collect();

        let text = format_recall(&results);
        assert!(text.contains("1. [ID: 0] (Similarity: 87.3%)"));
        assert!(text.contains("2. [ID: 1] (Similarity: 12.3%)"));
        assert!(text.contains("3. [ID: 2] (Similarity: 0.3%)"));
    }

    #[test]
    fn test_format_percent_non_ties() {
        assert_eq!(format_percent(0.873), "87.3");
        assert_eq!(format_percent(0.5), "50.0");
        assert_eq!(format_percent(0.0), "0.0");
        assert_eq!(format_percent(1.0), "100.0");
        assert_eq!(format_percent(0.87249), "87.2");
        assert_eq!(format_percent(0.87251), "87.3");
    }
}
