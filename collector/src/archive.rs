use crate::{
    error::ArchiveError,
    payload::NamedPayload,
};
use chrono::{
    DateTime,
    Local,
};
use std::{
    collections::HashSet,
    io::{
        Cursor,
        Write,
    },
    path::{
        Path,
        PathBuf,
    },
};
use zip::{
    write::SimpleFileOptions,
    CompressionMethod,
    ZipWriter,
};

/// A finished, not yet persisted bundle.
#[derive(Debug, Clone)]
pub struct Archive {
    file_name: String,
    bytes: Vec<u8>,
}

impl Archive {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes the bundle into `directory` and returns the path of the written file.
    ///
    /// The bytes go to a `.partial` file first, so an interrupted write never leaves
    /// a file that looks like a complete bundle.
    pub async fn persist(&self, directory: &Path) -> Result<PathBuf, ArchiveError> {
        let path = directory.join(&self.file_name);
        let partial = directory.join(format!("{}.partial", self.file_name));
        let persist_error = |source| ArchiveError::Persist {
            path: path.clone(),
            source,
        };

        tokio::fs::write(&partial, &self.bytes).await.map_err(persist_error)?;
        tokio::fs::rename(&partial, &path).await.map_err(persist_error)?;
        Ok(path)
    }
}

/// `graylog_apollo_bundle-YYYY-MM-DDTHH-mm-ss.zip`, in local time.
pub fn bundle_file_name(at: &DateTime<Local>) -> String {
    at.format("graylog_apollo_bundle-%Y-%m-%dT%H-%M-%S.zip").to_string()
}

/// Zips `payloads` in order, one entry per payload, and names the result after `started_at`.
///
/// Refuses to write two entries with the same name.
pub fn assemble(payloads: &[NamedPayload], started_at: &DateTime<Local>) -> Result<Archive, ArchiveError> {
    let mut seen = HashSet::new();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for payload in payloads {
        if !seen.insert(payload.name()) {
            return Err(ArchiveError::DuplicateEntry(payload.name().to_string()));
        }
        writer.start_file(payload.name(), options)?;
        writer.write_all(payload.body())?;
    }

    let bytes = writer.finish()?.into_inner();
    debug!(entries = payloads.len(), bytes = bytes.len(), "assembled bundle");

    Ok(Archive {
        file_name: bundle_file_name(started_at),
        bytes,
    })
}
