use reqwest::StatusCode;
use std::path::PathBuf;

/// Why a single request against the REST API did not yield a body.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("could not reach [{url}]: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read the response body of [{url}]: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("expected HTTP <200> but got HTTP <401> at [{url}]")]
    Unauthorized { url: String },
    #[error("expected HTTP <200> but got HTTP <{}> at [{url}]", .status.as_u16())]
    Status { url: String, status: StatusCode },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Body { url, .. }
            | FetchError::Unauthorized { url }
            | FetchError::Status { url, .. } => url,
        }
    }

    /// No connection to the node could be established. Timeouts and broken
    /// responses do not count, the node may still answer other requests.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, FetchError::Transport { source, .. } if source.is_connect())
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    #[error("archive entry {0:?} was added twice")]
    DuplicateEntry(String),
    #[error("failed to build the zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("failed to write an archive entry: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write bundle to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that end a collection run.
#[derive(thiserror::Error, Debug)]
pub enum CollectError {
    #[error("failed to set up the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("mandatory resource [{resource}] could not be collected: {source}")]
    Mandatory {
        resource: String,
        #[source]
        source: FetchError,
    },
    #[error("failed to decode [{resource}]: {source}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("bundle entry {0:?} was collected twice")]
    DuplicateEntry(String),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

impl CollectError {
    /// The server rejected the credentials or the user lacks administrator permissions.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            CollectError::Mandatory {
                source: FetchError::Unauthorized { .. },
                ..
            }
        )
    }
}
