//! In-memory collaborator, for hosts that keep results in process and for
//! tests.

use image::DynamicImage;
use std::collections::HashMap;
use uuid::Uuid;

use super::{ImageHandle, ImageMetadata, ImageSource, ImageStore, StoredImage};
use crate::error::{HalftoneError, Result};

/// Images and their metadata held in a map.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    images: HashMap<ImageHandle, (DynamicImage, ImageMetadata)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image under a caller-chosen handle, replacing any previous one.
    pub fn insert(&mut self, handle: impl Into<ImageHandle>, image: DynamicImage) -> ImageHandle {
        let handle = handle.into();
        let metadata = ImageMetadata {
            origin: super::ResourceOrigin::External,
            ..Default::default()
        };
        self.images.insert(handle.clone(), (image, metadata));
        handle
    }

    pub fn metadata(&self, handle: &ImageHandle) -> Option<&ImageMetadata> {
        self.images.get(handle).map(|(_, meta)| meta)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageSource for MemoryStore {
    fn decode(&self, handle: &ImageHandle) -> Result<DynamicImage> {
        self.images
            .get(handle)
            .map(|(image, _)| image.clone())
            .ok_or_else(|| HalftoneError::InvalidInput(format!("Image '{}' not found", handle)))
    }
}

impl ImageStore for MemoryStore {
    fn store(&mut self, image: &DynamicImage, metadata: &ImageMetadata) -> Result<StoredImage> {
        let handle = ImageHandle::new(Uuid::new_v4().to_string());
        self.images
            .insert(handle.clone(), (image.clone(), metadata.clone()));
        Ok(StoredImage {
            handle,
            width: image.width(),
            height: image.height(),
        })
    }
}
