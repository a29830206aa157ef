use crate::{
    error::CollectError,
    fetcher::Fetcher,
    model::{
        ClusterNodeList,
        IndexRangeDescriptor,
        IndexRangeList,
        NodeDescriptor,
    },
    resources::{
        CLUSTER_NODES_PATH,
        INDEX_RANGES_PATH,
    },
};
use serde::de::DeserializeOwned;

/// Decoded discovery result together with the bytes it was decoded from.
#[derive(Debug, Clone)]
pub struct Discovered<T> {
    pub raw: Vec<u8>,
    pub items: Vec<T>,
}

/// Lists all nodes of the cluster in the order the server reports them.
pub async fn discover_nodes(fetcher: &Fetcher, base_address: &str) -> Result<Discovered<NodeDescriptor>, CollectError> {
    let (raw, list) = fetch_and_decode::<ClusterNodeList>(fetcher, base_address, CLUSTER_NODES_PATH).await?;
    debug!(nodes = list.nodes.len(), "discovered cluster nodes");
    Ok(Discovered { raw, items: list.nodes })
}

/// Lists all index ranges the server tracks, whether or not the index behind them still exists.
pub async fn discover_index_ranges(
    fetcher: &Fetcher,
    base_address: &str,
) -> Result<Discovered<IndexRangeDescriptor>, CollectError> {
    let (raw, list) = fetch_and_decode::<IndexRangeList>(fetcher, base_address, INDEX_RANGES_PATH).await?;
    debug!(ranges = list.ranges.len(), "discovered index ranges");
    Ok(Discovered {
        raw,
        items: list.ranges,
    })
}

async fn fetch_and_decode<T: DeserializeOwned>(
    fetcher: &Fetcher,
    base_address: &str,
    path: &str,
) -> Result<(Vec<u8>, T), CollectError> {
    let raw = fetcher.require(base_address, path).await?;
    let decoded = serde_json::from_slice(&raw).map_err(|source| CollectError::Decode {
        resource: path.to_string(),
        source,
    })?;
    Ok((raw, decoded))
}
