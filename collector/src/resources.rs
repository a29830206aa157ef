//! REST resources that end up in a bundle, and the entry names they are stored under.

use strum::{
    Display,
    EnumIter,
};

pub const CLUSTER_NODES_PATH: &str = "system/cluster/nodes";
pub const CLUSTER_NODES_ENTRY: &str = "cluster_nodes.json";
pub const INDEX_RANGES_PATH: &str = "system/indices/ranges";
pub const TIMESTAMP_ENTRY: &str = "timestamp";

/// Only present on servers that support stream throughput reporting.
pub const STREAMS_THROUGHPUT_PATH: &str = "streams/throughput";
pub const STREAMS_THROUGHPUT_ENTRY: &str = "streams_throughput.json";

/// Recent log messages of a node. Requires Graylog 1.3 or newer.
pub const RECENT_LOG_CHECK_PATH: &str = "system/loggers/messages/recent";
pub const RECENT_LOG_PATH: &str = "system/loggers/messages/recent?limit=500";
pub const RECENT_LOG_LABEL: &str = "log";

/// Cluster-wide resources read from the node the run was started against.
///
/// The display name is the entry name without the `.json` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClusterResource {
    #[strum(to_string = "reporting_system")]
    ReportingSystem,
    #[strum(to_string = "cluster_stats")]
    ClusterStats,
    #[strum(to_string = "notifications")]
    Notifications,
    #[strum(to_string = "streams")]
    Streams,
    #[strum(to_string = "indexer_health")]
    IndexerHealth,
    #[strum(to_string = "indexer_failures")]
    IndexerFailures,
}

impl ClusterResource {
    /// Resources whose content does not depend on the node they are requested from.
    pub const SHARED: [ClusterResource; 5] = [
        ClusterResource::ClusterStats,
        ClusterResource::Notifications,
        ClusterResource::Streams,
        ClusterResource::IndexerHealth,
        ClusterResource::IndexerFailures,
    ];

    pub fn path(self) -> &'static str {
        match self {
            ClusterResource::ReportingSystem => "system",
            ClusterResource::ClusterStats => "system/cluster/stats",
            ClusterResource::Notifications => "system/notifications",
            ClusterResource::Streams => "streams",
            ClusterResource::IndexerHealth => "system/indexer/cluster/health",
            ClusterResource::IndexerFailures => "system/indexer/failures?limit=100&offset=0",
        }
    }

    pub fn entry_name(self) -> String {
        format!("{self}.json")
    }
}

/// Resources read from every node individually, in collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum NodeResource {
    #[strum(to_string = "system")]
    System,
    #[strum(to_string = "metrics")]
    Metrics,
    #[strum(to_string = "system_jvm")]
    Jvm,
    #[strum(to_string = "system_stats")]
    Stats,
    #[strum(to_string = "services")]
    ServiceManager,
    #[strum(to_string = "journal")]
    Journal,
    #[strum(to_string = "buffers")]
    Buffers,
    #[strum(to_string = "throughput")]
    Throughput,
    #[strum(to_string = "system_messages")]
    Messages,
}

impl NodeResource {
    pub fn path(self) -> &'static str {
        match self {
            NodeResource::System => "system",
            NodeResource::Metrics => "system/metrics",
            NodeResource::Jvm => "system/jvm",
            NodeResource::Stats => "system/stats",
            NodeResource::ServiceManager => "system/serviceManager",
            NodeResource::Journal => "system/journal",
            NodeResource::Buffers => "system/buffers",
            NodeResource::Throughput => "system/throughput",
            NodeResource::Messages => "system/messages",
        }
    }
}

pub fn node_entry_name(node_id: &str, label: impl std::fmt::Display) -> String {
    format!("{node_id}-{label}.json")
}

pub fn index_routing_path(index_name: &str) -> String {
    format!("system/indexer/indices/{index_name}")
}

pub fn index_routing_entry_name(index_name: &str) -> String {
    format!("indexrouting-{index_name}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn node_entries_are_namespaced_by_node_id() {
        let names: Vec<_> = NodeResource::iter()
            .map(|resource| node_entry_name("A", resource))
            .collect();
        assert_eq!(
            names,
            [
                "A-system.json",
                "A-metrics.json",
                "A-system_jvm.json",
                "A-system_stats.json",
                "A-services.json",
                "A-journal.json",
                "A-buffers.json",
                "A-throughput.json",
                "A-system_messages.json",
            ]
        );
        assert_eq!(node_entry_name("A", RECENT_LOG_LABEL), "A-log.json");
    }

    #[test]
    fn cluster_entry_names() {
        assert_eq!(ClusterResource::ReportingSystem.entry_name(), "reporting_system.json");
        assert_eq!(ClusterResource::IndexerFailures.entry_name(), "indexer_failures.json");
        assert_eq!(index_routing_entry_name("graylog_3"), "indexrouting-graylog_3.json");
        assert_eq!(index_routing_path("graylog_3"), "system/indexer/indices/graylog_3");
    }
}
