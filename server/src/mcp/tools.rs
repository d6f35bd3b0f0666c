//! MCP Tool Definitions
//!
//! The two memory tools exposed by VectorForge.

use super::protocol::{PropertySchema, Tool, ToolInputSchema};
use std::collections::HashMap;

pub const STORE_MEMORY: &str = "store_memory";
pub const RECALL_MEMORY: &str = "recall_memory";

/// Get all available VectorForge tools
pub fn get_all_tools() -> Vec<Tool> {
    vec![store_memory_tool(), recall_memory_tool()]
}

// Helper to create property schema
fn string_prop(description: &str) -> PropertySchema {
    PropertySchema {
        property_type: "string".to_string(),
        description: Some(description.to_string()),
    }
}

/// Object schema with a single required string property
fn single_string_schema(property: &str, description: &str) -> ToolInputSchema {
    let mut properties = HashMap::new();
    properties.insert(property.to_string(), string_prop(description));

    ToolInputSchema {
        schema_type: "object".to_string(),
        properties: Some(properties),
        required: Some(vec![property.to_string()]),
    }
}

fn store_memory_tool() -> Tool {
    Tool {
        name: STORE_MEMORY.to_string(),
        description: Some("Store a text memory in the local vector database. The text will be embedded and stored for later retrieval.".to_string()),
        input_schema: single_string_schema("text", "The text content to store as a memory"),
    }
}

fn recall_memory_tool() -> Tool {
    Tool {
        name: RECALL_MEMORY.to_string(),
        description: Some("Search for similar memories in the vector database based on a query text. Returns the top 3 most similar memories.".to_string()),
        input_schema: single_string_schema(
            "query",
            "The query text to search for similar memories",
        ),
    }
}
