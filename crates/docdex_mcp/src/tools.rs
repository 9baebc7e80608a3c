//! Tool definitions and handlers
//!
//! One tool is exposed: `get_docs`, which searches a library's documentation
//! domain and returns the concatenated text of the result pages.

use docdex_common::{DocdexError, Result};
use docdex_core::{DocsService, LibraryRegistry};
use serde::Deserialize;
use serde_json::{json, Value};

/// Name of the documentation lookup tool
pub const GET_DOCS: &str = "get_docs";

/// Build the `tools/list` result
pub fn list_tools(registry: &LibraryRegistry) -> Value {
    json!({
        "tools": [get_docs_descriptor(registry)]
    })
}

/// Tool descriptor with input schema for `get_docs`
fn get_docs_descriptor(registry: &LibraryRegistry) -> Value {
    let supported = registry.names().join(", ");
    json!({
        "name": GET_DOCS,
        "description": "Search the latest documentation for a given query and library. \
            Returns the text of the top documentation pages.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The query to search for (e.g., \"Chroma DB\")"
                },
                "library": {
                    "type": "string",
                    "description": format!("The library to search in. Supported: {}", supported)
                }
            },
            "required": ["query", "library"]
        }
    })
}

/// Handle a `get_docs` tool call
pub async fn handle_get_docs(service: &DocsService, arguments: Option<Value>) -> Result<Value> {
    #[derive(Deserialize)]
    struct GetDocsParams {
        query: String,
        library: String,
    }

    let params: GetDocsParams = arguments
        .ok_or_else(|| DocdexError::ValidationError("Missing arguments".to_string()))
        .and_then(|v| {
            serde_json::from_value(v)
                .map_err(|e| DocdexError::ValidationError(format!("Invalid arguments: {}", e)))
        })?;

    let text = service.lookup(&params.query, &params.library).await?;

    Ok(json!({
        "content": [{
            "type": "text",
            "text": text
        }],
        "isError": false
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_lists_supported_libraries() {
        let registry = LibraryRegistry::builtin();
        let descriptor = get_docs_descriptor(&registry);

        assert_eq!(descriptor["name"], GET_DOCS);
        let library_desc = descriptor["inputSchema"]["properties"]["library"]["description"]
            .as_str()
            .unwrap();
        assert!(library_desc.contains("langchain"));
        assert!(library_desc.contains("llama-index"));
        assert!(library_desc.contains("openai"));

        let required: Vec<&str> = descriptor["inputSchema"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["query", "library"]);
    }
}
