use crate::{
    archive::{
        self,
        Archive,
    },
    discovery,
    error::{
        ArchiveError,
        CollectError,
    },
    fetcher::{
        Fetched,
        Fetcher,
        Requirement,
    },
    model::{
        IndexRangeDescriptor,
        NodeDescriptor,
    },
    payload::{
        NamedPayload,
        PayloadSet,
    },
    resources::{
        self,
        ClusterResource,
        NodeResource,
        CLUSTER_NODES_ENTRY,
        RECENT_LOG_LABEL,
        RECENT_LOG_PATH,
        RECENT_LOG_CHECK_PATH,
        STREAMS_THROUGHPUT_ENTRY,
        STREAMS_THROUGHPUT_PATH,
        TIMESTAMP_ENTRY,
    },
};
use apollo_config::{
    CollectOptions,
    Credentials,
};
use chrono::{
    DateTime,
    Local,
    SecondsFormat,
    Utc,
};
use futures::{
    stream,
    StreamExt,
};
use std::{
    collections::HashSet,
    path::{
        Path,
        PathBuf,
    },
};
use strum::IntoEnumIterator;

/// Everything collected during one run, in collection order.
#[derive(Debug, Clone)]
pub struct Bundle {
    started_at: DateTime<Utc>,
    payloads: PayloadSet,
}

impl Bundle {
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn payloads(&self) -> &[NamedPayload] {
        self.payloads.as_slice()
    }

    pub fn entry_names(&self) -> Vec<&str> {
        self.payloads.names().collect()
    }

    pub fn into_archive(self) -> Result<Archive, ArchiveError> {
        archive::assemble(self.payloads.as_slice(), &self.started_at.with_timezone(&Local))
    }
}

/// Drives one collection run: cluster-wide resources, every discovered node,
/// every index range, then the archive.
pub struct Orchestrator {
    fetcher: Fetcher,
    base_address: String,
    options: CollectOptions,
}

impl Orchestrator {
    pub fn new(credentials: Credentials, options: CollectOptions) -> Result<Self, CollectError> {
        let base_address = credentials.base_url().to_string();
        let fetcher = Fetcher::new(credentials, options.timeout)?;
        Ok(Self {
            fetcher,
            base_address,
            options,
        })
    }

    /// Collects and writes a bundle into `output_dir`, returning the path of the written file.
    pub async fn run(&self, output_dir: &Path) -> Result<PathBuf, CollectError> {
        let bundle = self.collect().await?;
        let entries = bundle.payloads().len();
        let path = bundle.into_archive()?.persist(output_dir).await?;
        info!(entries, "Wrote bundle to file: {}", path.display());
        Ok(path)
    }

    pub async fn collect(&self) -> Result<Bundle, CollectError> {
        self.collect_at(Utc::now()).await
    }

    /// Collects everything, recording `started_at` as the time the run began.
    pub async fn collect_at(&self, started_at: DateTime<Utc>) -> Result<Bundle, CollectError> {
        info!(url = %self.base_address, "Starting collection.");
        let mut payloads = PayloadSet::new();

        payloads.push(NamedPayload::new(
            TIMESTAMP_ENTRY,
            started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ))?;

        let nodes = self.collect_cluster(&mut payloads).await?;

        let per_node: Vec<_> = stream::iter(&nodes)
            .map(|node| self.collect_node(node))
            .buffered(self.options.concurrency)
            .collect()
            .await;
        for node_payloads in per_node {
            payloads.extend(node_payloads?)?;
        }

        let ranges = discovery::discover_index_ranges(&self.fetcher, &self.base_address).await?;
        let ranges = unique_by(ranges.items, |range| &range.index_name, "index range");

        let routings: Vec<_> = stream::iter(&ranges)
            .map(|range| self.collect_index_routing(range))
            .buffered(self.options.concurrency)
            .collect()
            .await;
        for routing in routings {
            if let Some(payload) = routing? {
                payloads.push(payload)?;
            }
        }

        info!(entries = payloads.len(), nodes = nodes.len(), ranges = ranges.len(), "Finished collection.");
        Ok(Bundle { started_at, payloads })
    }

    /// Reads the cluster-wide resources and returns the discovered nodes.
    async fn collect_cluster(&self, payloads: &mut PayloadSet) -> Result<Vec<NodeDescriptor>, CollectError> {
        let base = self.base_address.as_str();

        let reporting_system = ClusterResource::ReportingSystem;
        if let Some(payload) = self
            .collect_entry(base, reporting_system.path(), reporting_system.entry_name(), Requirement::Mandatory)
            .await?
        {
            payloads.push(payload)?;
        }

        let nodes = discovery::discover_nodes(&self.fetcher, base).await?;
        payloads.push(NamedPayload::new(CLUSTER_NODES_ENTRY, nodes.raw))?;

        for resource in ClusterResource::SHARED {
            if let Some(payload) = self
                .collect_entry(base, resource.path(), resource.entry_name(), Requirement::Mandatory)
                .await?
            {
                payloads.push(payload)?;
            }
        }

        if self.fetcher.has_resource(base, STREAMS_THROUGHPUT_PATH).await {
            if let Some(payload) = self
                .collect_entry(base, STREAMS_THROUGHPUT_PATH, STREAMS_THROUGHPUT_ENTRY, Requirement::BestEffort)
                .await?
            {
                payloads.push(payload)?;
            }
        }

        Ok(unique_by(nodes.items, |node| &node.node_id, "node"))
    }

    /// Reads the per-node resources. A failure skips that single resource, only a
    /// node that refuses connections contributes nothing further.
    async fn collect_node(&self, node: &NodeDescriptor) -> Result<Vec<NamedPayload>, CollectError> {
        info!(
            node_id = %node.node_id,
            is_master = node.is_master,
            "Discovered Graylog node: [{}] at [{}].",
            node.node_id,
            node.transport_address
        );
        let base = node.transport_address.as_str();
        let mut payloads = Vec::new();

        for resource in NodeResource::iter() {
            let name = resources::node_entry_name(&node.node_id, resource);
            match self.fetcher.fetch(base, resource.path(), Requirement::BestEffort).await? {
                Fetched::Collected(body) => payloads.push(NamedPayload::new(name, body)),
                Fetched::Skipped(e) if e.is_unreachable() => {
                    warn!(node_id = %node.node_id, "node is unreachable, skipping its remaining resources");
                    return Ok(payloads);
                }
                Fetched::Skipped(_) => {}
            }
        }

        if self.fetcher.has_resource(base, RECENT_LOG_CHECK_PATH).await {
            let name = resources::node_entry_name(&node.node_id, RECENT_LOG_LABEL);
            payloads.extend(
                self.collect_entry(base, RECENT_LOG_PATH, name, Requirement::BestEffort)
                    .await?,
            );
        } else {
            debug!(node_id = %node.node_id, "node does not provide recent log messages");
        }

        Ok(payloads)
    }

    /// Reads the shard routing of an index range, unless its index has been deleted in the meantime.
    async fn collect_index_routing(&self, range: &IndexRangeDescriptor) -> Result<Option<NamedPayload>, CollectError> {
        let path = resources::index_routing_path(&range.index_name);
        if !self.fetcher.has_resource(&self.base_address, &path).await {
            info!(index = %range.index_name, "index of index range no longer exists, skipping");
            return Ok(None);
        }
        self.collect_entry(
            &self.base_address,
            &path,
            resources::index_routing_entry_name(&range.index_name),
            Requirement::BestEffort,
        )
        .await
    }

    async fn collect_entry(
        &self,
        base: &str,
        path: &str,
        name: impl Into<String>,
        requirement: Requirement,
    ) -> Result<Option<NamedPayload>, CollectError> {
        let fetched = self.fetcher.fetch(base, path, requirement).await?;
        Ok(fetched.into_body().map(|body| NamedPayload::new(name, body)))
    }
}

/// Drops later items whose key was already seen, keeping the original order.
fn unique_by<T>(items: Vec<T>, key: impl Fn(&T) -> &String, what: &str) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(key(item).clone());
            if !fresh {
                warn!("{what} [{}] was reported twice, ignoring the duplicate", key(item));
            }
            fresh
        })
        .collect()
}
