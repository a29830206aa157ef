//! Response shapes of the discovery endpoints.
//!
//! Only the fields the collector acts on are required, everything else falls
//! back to a default so that minor differences between server versions do not
//! fail the run.

use serde::{
    Deserialize,
    Serialize,
};

/// Response of `system/cluster/nodes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterNodeList {
    pub nodes: Vec<NodeDescriptor>,
}

/// One graylog-server node as reported by the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub node_id: String,
    #[serde(default, rename = "type")]
    pub node_type: String,
    /// REST address of the node itself, used for all per-node requests.
    pub transport_address: String,
    #[serde(default)]
    pub last_seen: String,
    #[serde(default)]
    pub short_node_id: String,
    #[serde(default)]
    pub is_master: bool,
}

/// Response of `system/indices/ranges`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexRangeList {
    pub ranges: Vec<IndexRangeDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRangeDescriptor {
    pub index_name: String,
    #[serde(default)]
    pub begin: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub calculated_at: String,
    #[serde(default)]
    pub took_ms: i64,
}
