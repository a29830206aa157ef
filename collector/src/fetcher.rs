use crate::error::{
    CollectError,
    FetchError,
};
use apollo_config::Credentials;
use reqwest::{
    Client,
    Response,
    StatusCode,
};
use std::time::Duration;

/// How a failed request affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The bundle is useless without this resource; failure aborts the run.
    Mandatory,
    /// Failure is logged and the resource is left out of the bundle.
    BestEffort,
}

/// Outcome of a request that did not abort the run.
#[derive(Debug)]
pub enum Fetched {
    Collected(Vec<u8>),
    Skipped(FetchError),
}

impl Fetched {
    pub fn into_body(self) -> Option<Vec<u8>> {
        match self {
            Fetched::Collected(body) => Some(body),
            Fetched::Skipped(_) => None,
        }
    }
}

/// Issues authenticated `GET` requests against the REST API of any cluster node.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http_client: Client,
    credentials: Credentials,
}

impl Fetcher {
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self, CollectError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CollectError::Client)?;
        Ok(Self {
            http_client,
            credentials,
        })
    }

    /// Reads `path` relative to `base_address` and sorts failures by `requirement`.
    ///
    /// Only a failed [`Requirement::Mandatory`] request returns `Err`.
    pub async fn fetch(
        &self,
        base_address: &str,
        path: &str,
        requirement: Requirement,
    ) -> Result<Fetched, CollectError> {
        match requirement {
            Requirement::Mandatory => self.require(base_address, path).await.map(Fetched::Collected),
            Requirement::BestEffort => match self.get(base_address, path).await {
                Ok(body) => Ok(Fetched::Collected(body)),
                Err(source) => {
                    warn!(url = source.url(), status = ?source.status(), "skipping resource: {source}");
                    Ok(Fetched::Skipped(source))
                }
            },
        }
    }

    /// Reads a resource the run cannot do without.
    pub async fn require(&self, base_address: &str, path: &str) -> Result<Vec<u8>, CollectError> {
        self.get(base_address, path).await.map_err(|source| {
            error!(url = source.url(), "{source}");
            CollectError::Mandatory {
                resource: path.to_string(),
                source,
            }
        })
    }

    /// Reads the full body of `path` relative to `base_address`.
    pub async fn get(&self, base_address: &str, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = join_url(base_address, path);
        let response = self.request(&url).await.map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => return Err(FetchError::Unauthorized { url }),
            status => return Err(FetchError::Status { url, status }),
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Body {
                url: url.clone(),
                source,
            })?
            .to_vec();

        info!("Successfully read {} bytes [{}].", body.len(), path);
        Ok(body)
    }

    /// Whether `path` answers with HTTP 200. Any failure, including an unreachable node, counts as absent.
    pub async fn has_resource(&self, base_address: &str, path: &str) -> bool {
        let url = join_url(base_address, path);
        match self.request(&url).await {
            Ok(response) => {
                let status = response.status();
                debug!(url, status = status.as_u16(), "checked resource");
                status == StatusCode::OK
            }
            Err(e) => {
                debug!(url, "resource check failed: {e}");
                false
            }
        }
    }

    async fn request(&self, url: &str) -> Result<Response, reqwest::Error> {
        self.http_client
            .get(url)
            .basic_auth(self.credentials.username(), Some(self.credentials.password()))
            .send()
            .await
    }
}

/// Joins a node address and a relative resource path with exactly one `/` between them.
pub fn join_url(base_address: &str, path: &str) -> String {
    format!("{}/{}", base_address.trim_end_matches('/'), path.trim_start_matches('/'))
}
