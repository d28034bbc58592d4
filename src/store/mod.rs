//! # Image Collaborators
//!
//! The engine never touches files itself. It reads source bitmaps through an
//! [`ImageSource`] and hands results to an [`ImageStore`], both addressed by
//! opaque [`ImageHandle`]s.
//!
//! | Type | Source | Store | Handles |
//! |------|--------|-------|---------|
//! | [`FileSource`] | yes | no | filesystem paths |
//! | [`FsImageStore`] | yes | yes | `<uuid>.png` inside a directory |
//! | [`MemoryStore`] | yes | yes | `<uuid>` |
//!
//! [`ImageMetadata`] travels with every stored image untouched; the engine
//! does not interpret it.

pub mod fs;
#[cfg(feature = "heif")]
pub mod heif;
pub mod memory;

pub use fs::{FileSource, FsImageStore, StoredRecord};
pub use memory::MemoryStore;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Opaque identifier of an image held by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageHandle {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// What kind of image a stored result is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageCategory {
    #[default]
    General,
    Mask,
    Control,
    User,
    Other,
}

/// Where a stored image came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceOrigin {
    /// Produced by a processing node.
    #[default]
    Internal,
    /// Supplied from outside, e.g. an upload.
    External,
}

/// Lineage tags stored alongside an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    #[serde(default)]
    pub category: ImageCategory,
    #[serde(default)]
    pub origin: ResourceOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub is_intermediate: bool,
    /// Free-form workflow description, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<serde_json::Value>,
}

/// Result of persisting an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub handle: ImageHandle,
    pub width: u32,
    pub height: u32,
}

/// Resolves handles to decoded bitmaps.
pub trait ImageSource {
    /// Decode the image behind `handle`.
    ///
    /// Fails with [`crate::HalftoneError::InvalidInput`] if the handle is
    /// unknown or the data cannot be decoded.
    fn decode(&self, handle: &ImageHandle) -> Result<DynamicImage>;
}

/// Persists produced bitmaps.
pub trait ImageStore {
    /// Store `image` with its metadata and return the new handle.
    fn store(&mut self, image: &DynamicImage, metadata: &ImageMetadata) -> Result<StoredImage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_serializes_as_string() {
        let handle = ImageHandle::new("abc.png");
        assert_eq!(serde_json::to_string(&handle).unwrap(), "\"abc.png\"");
        assert_eq!(handle.to_string(), "abc.png");
    }

    #[test]
    fn test_metadata_defaults() {
        let meta: ImageMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(meta, ImageMetadata::default());
        assert_eq!(meta.category, ImageCategory::General);
        assert_eq!(meta.origin, ResourceOrigin::Internal);
    }

    #[test]
    fn test_metadata_wire_names() {
        let meta = ImageMetadata {
            category: ImageCategory::Control,
            origin: ResourceOrigin::External,
            node_id: Some("halftone-1".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["category"], "control");
        assert_eq!(json["origin"], "external");
        assert_eq!(json["node_id"], "halftone-1");
        assert!(json.get("session_id").is_none());
    }
}
