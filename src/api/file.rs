//! File handles and the files endpoint types

use std::path::PathBuf;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::schema::{require, FieldSpec, Schema};
use crate::error::ValidationError;

/// Where a file payload comes from.
///
/// The model layer only carries the handle; the transport reads it when the
/// request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePayload {
    /// Read from the filesystem at send time
    Path(PathBuf),
    /// Already in memory
    Bytes(Bytes),
}

/// Abstract handle to a binary payload (e.g. an audio file)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    /// Filename reported to the API
    pub name: String,
    /// Backing payload
    pub payload: FilePayload,
}

impl FileSource {
    /// Handle backed by a filesystem path; the reported name is the final
    /// path component
    pub fn path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            payload: FilePayload::Path(path),
        }
    }

    /// Handle backed by in-memory bytes
    pub fn bytes(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            payload: FilePayload::Bytes(bytes.into()),
        }
    }
}

/// Intended use of an uploaded file (e.g. "fine-tune")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Purpose(pub String);

impl From<&str> for Purpose {
    fn from(purpose: &str) -> Self {
        Self(purpose.to_string())
    }
}

impl From<String> for Purpose {
    fn from(purpose: String) -> Self {
        Self(purpose)
    }
}

/// Identifier of an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub String);

impl From<&str> for FileId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Request for the upload file operation. Sent as a multipart form, not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    /// File to upload
    pub file: FileSource,
    /// Intended use of the file
    pub purpose: Purpose,
}

impl Schema for FileUpload {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("file"),
        FieldSpec::required("purpose"),
    ];
}

impl FileUpload {
    /// Builder for incremental construction
    pub fn builder() -> FileUploadBuilder {
        FileUploadBuilder::default()
    }
}

/// Builder of [`FileUpload`] instances
#[derive(Debug, Clone, Default)]
pub struct FileUploadBuilder {
    file: Option<FileSource>,
    purpose: Option<Purpose>,
}

impl FileUploadBuilder {
    /// File to upload
    pub fn file(mut self, file: FileSource) -> Self {
        self.file = Some(file);
        self
    }

    /// Intended use of the file
    pub fn purpose(mut self, purpose: impl Into<Purpose>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    /// Finalize into an immutable [`FileUpload`]
    pub fn build(&self) -> Result<FileUpload, ValidationError> {
        Ok(FileUpload {
            file: require::<FileUpload, _>("file", &self.file)?,
            purpose: require::<FileUpload, _>("purpose", &self.purpose)?,
        })
    }
}

/// An uploaded file, as reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// File identifier
    pub id: FileId,
    /// Size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    /// Creation time, seconds since the epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
    /// Filename as uploaded
    pub filename: String,
    /// Intended use of the file
    pub purpose: Purpose,
}
