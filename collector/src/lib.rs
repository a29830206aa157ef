//! # Graylog Apollo Collector
//!
//! Collects a diagnostic support bundle from a Graylog cluster through its REST API.
//!
//! ## Architecture
//!
//! - **`fetcher`**: authenticated reads of single resources and capability checks
//! - **`discovery`**: cluster nodes and index ranges
//! - **`orchestrator`**: cluster-wide, per-node and per-index collection in a fixed order
//! - **`archive`**: zips the collected entries into `graylog_apollo_bundle-<timestamp>.zip`
//!
//! Cluster-wide resources and both discovery steps are mandatory, any failure
//! ends the run. Per-node resources, optional endpoints and index routings are
//! best-effort: a failure is logged and the entry is left out.

#[macro_use]
extern crate tracing;

pub mod archive;
pub mod discovery;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod orchestrator;
pub mod payload;
pub mod resources;

pub use archive::{
    assemble,
    bundle_file_name,
    Archive,
};
pub use error::{
    ArchiveError,
    CollectError,
    FetchError,
};
pub use fetcher::{
    Fetched,
    Fetcher,
    Requirement,
};
pub use model::{
    IndexRangeDescriptor,
    NodeDescriptor,
};
pub use orchestrator::{
    Bundle,
    Orchestrator,
};
pub use payload::{
    NamedPayload,
    PayloadSet,
};
