//! Node-level execution detail within a workflow run.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node type marker for knowledge-base retrieval steps.
pub const NODE_TYPE_KNOWLEDGE_RETRIEVAL: &str = "knowledge-retrieval";

/// Node type marker for LLM invocation steps.
pub const NODE_TYPE_LLM: &str = "llm";

/// One step within a workflow run.
///
/// `inputs`, `outputs` and `process_data` share the string-or-structure
/// ambiguity of [`crate::WorkflowRunDetail`]: apply [`crate::decode_nested`]
/// before reading fields.
///
/// For `knowledge-retrieval` nodes, `outputs.result` holds the retrieved
/// passages; for `llm` nodes, `process_data.usage.total_price` contributes
/// to the accumulated cost total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NodeExecution {
    /// Execution record identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Graph node identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Node type (e.g. `knowledge-retrieval`, `llm`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    /// Human-readable node title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Node status as reported by the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Error text for failed nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Node execution duration in seconds
    #[serde(default)]
    pub elapsed_time: f64,
    /// Ordinal position within the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    /// Preceding node in the graph, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predecessor_node_id: Option<String>,
    /// Creation timestamp in epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<f64>,
    /// Completion timestamp in epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<f64>,
    /// Node inputs, structured or JSON-encoded string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Value>,
    /// Node outputs, structured or JSON-encoded string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Value>,
    /// Intermediate processing data, structured or JSON-encoded string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_data: Option<Value>,
}

impl NodeExecution {
    /// Whether this node is a knowledge-base retrieval step.
    pub fn is_knowledge_retrieval(&self) -> bool {
        self.node_type.as_deref() == Some(NODE_TYPE_KNOWLEDGE_RETRIEVAL)
    }

    /// Whether this node is an LLM invocation step.
    pub fn is_llm(&self) -> bool {
        self.node_type.as_deref() == Some(NODE_TYPE_LLM)
    }
}
