//! File-to-preview adapter.
//!
//! Turns a picked file into a `FileHandle` for the form record and a
//! `data:` URI for display. Nothing here inspects file type or size.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine;

/// A file picked by the user, with its bytes already read.
#[derive(Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl FileHandle {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("path", &self.path)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The outcome of a file picker interaction.
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    pub files: Vec<PathBuf>,
}

impl FileSelection {
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self {
            files: vec![path.into()],
        }
    }

    /// The file the adapter acts on, if any was picked.
    pub fn first(&self) -> Option<&Path> {
        self.files.first().map(PathBuf::as_path)
    }
}

/// A finished read: the handle plus its preview.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub handle: FileHandle,
    pub data_uri: String,
}

/// Previews keyed by `<field>Preview`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    previews: HashMap<String, String>,
}

impl PreviewState {
    /// Derive the preview key for a file field.
    pub fn key_for(field: &str) -> String {
        format!("{field}Preview")
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.previews.get(&Self::key_for(field)).map(String::as_str)
    }

    /// Set the preview for a file field (data URI or remote asset URL).
    pub fn set(&mut self, field: &str, source: impl Into<String>) {
        self.previews.insert(Self::key_for(field), source.into());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.previews.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.previews.is_empty()
    }
}

/// Guess a MIME type from the file extension.
pub fn infer_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

/// Split a base64 data URI back into its MIME type and bytes.
pub fn decode_data_uri(uri: &str) -> Option<(&str, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()?;
    Some((mime, bytes))
}

/// Read a file fully and build its handle and preview.
pub async fn load_file(path: PathBuf) -> std::io::Result<LoadedFile> {
    let bytes = tokio::fs::read(&path).await?;
    let mime = infer_mime(&path).to_string();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let data_uri = encode_data_uri(&mime, &bytes);

    tracing::debug!("Read {} ({} bytes, {})", file_name, bytes.len(), mime);

    Ok(LoadedFile {
        handle: FileHandle {
            path,
            file_name,
            mime,
            bytes: bytes.into(),
        },
        data_uri,
    })
}
