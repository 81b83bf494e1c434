use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One completed agent/LLM interaction, as handed over by an adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Framework-specific input (prompts, messages, tool arguments).
    pub input: Value,
    /// Framework-specific output (response text, tool result).
    pub output: Value,
    /// Caller metadata merged into the payload metadata.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl InteractionRecord {
    /// Creates a record with empty metadata.
    pub fn new(input: Value, output: Value) -> Self {
        Self {
            input,
            output,
            metadata: Map::new(),
        }
    }

    /// Replaces the caller metadata.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}
