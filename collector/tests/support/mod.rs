//! In-process stand-in for the Graylog REST API.

use apollo_collector::Orchestrator;
use apollo_config::{
    CollectOptions,
    Credentials,
};
use axum::{
    extract::State,
    http::{
        header,
        HeaderMap,
        StatusCode,
        Uri,
    },
    Router,
};
use serde_json::json;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
    },
    time::Duration,
};
use tokio::net::TcpListener;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
/// `Basic base64("admin:secret")`
const AUTHORIZATION: &str = "Basic YWRtaW46c2VjcmV0";

pub const NODE_RESOURCES: [&str; 9] = [
    "system",
    "system/metrics",
    "system/jvm",
    "system/stats",
    "system/serviceManager",
    "system/journal",
    "system/buffers",
    "system/throughput",
    "system/messages",
];

#[derive(Clone, Default)]
struct Shared {
    routes: Arc<Mutex<HashMap<String, (StatusCode, String)>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

pub struct MockGraylog {
    pub base_url: String,
    shared: Shared,
}

impl MockGraylog {
    pub async fn start() -> Self {
        let shared = Shared::default();
        let app = Router::new().fallback(respond).with_state(shared.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}"),
            shared,
        }
    }

    /// Serves `body` with `status` at `path`. Query strings are ignored when matching.
    pub fn route(&self, path: &str, status: StatusCode, body: impl Into<String>) {
        self.shared
            .routes
            .lock()
            .unwrap()
            .insert(format!("/{}", path.trim_start_matches('/')), (status, body.into()));
    }

    /// Answers `path` only after `delay` has passed.
    pub fn stall(&self, path: &str, delay: Duration) {
        self.shared
            .delays
            .lock()
            .unwrap()
            .insert(format!("/{}", path.trim_start_matches('/')), delay);
    }

    pub fn json(&self, path: &str, body: serde_json::Value) {
        self.route(path, StatusCode::OK, body.to_string());
    }

    pub fn fail(&self, path: &str, status: StatusCode) {
        self.route(path, status, json!({ "type": "ApiError", "message": "failed" }).to_string());
    }

    /// Requested paths including their query, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// Address under which a node named `prefix` is served by this mock.
    pub fn node_address(&self, prefix: &str) -> String {
        format!("{}/{prefix}/", self.base_url)
    }

    /// Registers all mandatory cluster-wide resources and the given node and index range lists.
    pub fn serve_cluster(&self, nodes: serde_json::Value, index_names: &[&str]) {
        self.json("system", json!({ "version": "1.3.0", "hostname": "graylog-1" }));
        self.json("system/cluster/nodes", nodes);
        self.json("system/cluster/stats", json!({ "stream_count": 3 }));
        self.json("system/notifications", json!({ "notifications": [], "total": 0 }));
        self.json("streams", json!({ "streams": [], "total": 0 }));
        self.json("system/indexer/cluster/health", json!({ "status": "green" }));
        self.json("system/indexer/failures", json!({ "failures": [], "total": 0 }));
        let ranges: Vec<_> = index_names
            .iter()
            .map(|name| json!({ "index_name": name, "begin": "2016-01-01T00:00:00.000Z", "took_ms": 5 }))
            .collect();
        self.json("system/indices/ranges", json!({ "ranges": ranges, "total": ranges.len() }));
    }

    /// Registers every per-node resource of a node served under `prefix`.
    pub fn serve_node(&self, prefix: &str) {
        for resource in NODE_RESOURCES {
            self.json(&format!("{prefix}/{resource}"), json!({ "node": prefix, "resource": resource }));
        }
    }

    pub fn serve_index(&self, index_name: &str) {
        self.json(
            &format!("system/indexer/indices/{index_name}"),
            json!({ "primary_shards": { "store_size_bytes": 1024 }, "routing": [] }),
        );
    }

    pub fn orchestrator(&self) -> Orchestrator {
        self.orchestrator_as(USERNAME, PASSWORD)
    }

    pub fn orchestrator_as(&self, username: &str, password: &str) -> Orchestrator {
        self.orchestrator_with(
            username,
            password,
            CollectOptions {
                timeout: Duration::from_secs(5),
                concurrency: 2,
            },
        )
    }

    pub fn orchestrator_with(&self, username: &str, password: &str, options: CollectOptions) -> Orchestrator {
        let credentials = Credentials::new(username, password, self.base_url.parse().unwrap());
        Orchestrator::new(credentials, options).unwrap()
    }
}

async fn respond(State(shared): State<Shared>, headers: HeaderMap, uri: Uri) -> (StatusCode, HeaderMap, String) {
    let recorded = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    shared.requests.lock().unwrap().push(recorded);

    let delay = shared.delays.lock().unwrap().get(uri.path()).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut response_headers = HeaderMap::new();
    response_headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());

    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(AUTHORIZATION);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, response_headers, String::new());
    }

    match shared.routes.lock().unwrap().get(uri.path()) {
        Some((status, body)) => (*status, response_headers, body.clone()),
        None => (StatusCode::NOT_FOUND, response_headers, String::new()),
    }
}

pub fn node(node_id: &str, transport_address: &str, is_master: bool) -> serde_json::Value {
    json!({
        "cluster_id": "f1a2b3c4",
        "node_id": node_id,
        "type": "server",
        "transport_address": transport_address,
        "last_seen": "2016-01-13T10:55:21.000Z",
        "short_node_id": &node_id[..1],
        "hostname": format!("host-{node_id}"),
        "is_master": is_master,
    })
}

pub fn node_list(nodes: Vec<serde_json::Value>) -> serde_json::Value {
    json!({ "total": nodes.len(), "nodes": nodes })
}

/// An address nothing is listening on.
pub async fn unreachable_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}
