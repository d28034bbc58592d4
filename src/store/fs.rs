//! Filesystem-backed collaborators.
//!
//! [`FsImageStore`] keeps every stored image as `<uuid>.png` in one
//! directory, next to a `<uuid>.json` sidecar:
//!
//! ```text
//! halftone-out/
//!   6f1c...e2.png
//!   6f1c...e2.json   { handle, width, height, created_at, metadata }
//! ```
//!
//! Handles are bare file names. Anything that could leave the directory
//! (path separators, `..`, hidden names) is rejected.

use chrono::Utc;
use image::{DynamicImage, ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{ImageHandle, ImageMetadata, ImageSource, ImageStore, StoredImage};
use crate::error::{HalftoneError, Result};

/// Leading bytes needed to recognise a HEIF container.
const SNIFF_LEN: u64 = 12;

/// `ftyp` major brands of HEIC/HEIF files.
const HEIF_BRANDS: &[&[u8]] = &[
    b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"hevm", b"hevs", b"mif1", b"msf1",
];

/// Whether `header` opens an ISO-BMFF container with a HEIF brand: a 4-byte
/// box size, `ftyp`, then the major brand.
pub fn is_heif_header(header: &[u8]) -> bool {
    if header.len() < SNIFF_LEN as usize || &header[4..8] != b"ftyp" {
        return false;
    }
    let brand = &header[8..12];
    HEIF_BRANDS.iter().any(|b| *b == brand)
}

fn has_heif_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "heic" | "heif"))
}

fn sniff_heif(path: &Path) -> Result<bool> {
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut header)?;
    Ok(is_heif_header(&header))
}

#[cfg(feature = "heif")]
fn decode_heif(path: &Path) -> Result<DynamicImage> {
    super::heif::decode_file(path)
}

#[cfg(not(feature = "heif"))]
fn decode_heif(path: &Path) -> Result<DynamicImage> {
    Err(HalftoneError::InvalidInput(format!(
        "{} is a HEIC/HEIF image; build with the `heif` feature to decode it",
        path.display()
    )))
}

/// Decode an image file. The format is taken from the file's content,
/// falling back to its extension.
pub(crate) fn decode_path(path: &Path) -> Result<DynamicImage> {
    if has_heif_extension(path) || sniff_heif(path)? {
        debug!(path = %path.display(), "Decoding as HEIF");
        return decode_heif(path);
    }

    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| {
            HalftoneError::InvalidInput(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Reads images straight from the filesystem; handles are paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl ImageSource for FileSource {
    fn decode(&self, handle: &ImageHandle) -> Result<DynamicImage> {
        let path = Path::new(handle.as_str());
        if !path.is_file() {
            return Err(HalftoneError::InvalidInput(format!(
                "Image file not found: {}",
                path.display()
            )));
        }
        debug!(path = %path.display(), "Decoding image file");
        decode_path(path)
    }
}

/// Sidecar written next to every stored image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub handle: ImageHandle,
    pub width: u32,
    pub height: u32,
    /// RFC 3339 timestamp.
    pub created_at: String,
    pub metadata: ImageMetadata,
}

/// Directory of PNG images with JSON metadata sidecars.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Path of the image file behind `handle`.
    pub fn path(&self, handle: &ImageHandle) -> Result<PathBuf> {
        let name = handle.as_str();
        let escapes = name.is_empty()
            || name.starts_with('.')
            || name.contains(['/', '\\'])
            || name.contains("..");
        if escapes {
            return Err(HalftoneError::InvalidInput(format!(
                "Invalid image handle '{}'",
                name
            )));
        }
        Ok(self.root.join(name))
    }

    fn sidecar_path(&self, handle: &ImageHandle) -> Result<PathBuf> {
        Ok(self.path(handle)?.with_extension("json"))
    }

    /// Read the sidecar record for a stored image.
    pub fn record(&self, handle: &ImageHandle) -> Result<StoredRecord> {
        let path = self.sidecar_path(handle)?;
        let file = File::open(&path).map_err(|e| {
            HalftoneError::InvalidInput(format!("No record for '{}': {}", handle, e))
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// All handles currently in the store, sorted.
    pub fn handles(&self) -> Result<Vec<ImageHandle>> {
        let mut handles = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "png")
                && let Some(name) = path.file_name().and_then(|n| n.to_str())
            {
                handles.push(ImageHandle::new(name));
            }
        }
        handles.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(handles)
    }

    fn write_record(&self, path: &Path, record: &StoredRecord) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, record)?;
        writer.flush()?;
        Ok(())
    }
}

impl ImageSource for FsImageStore {
    fn decode(&self, handle: &ImageHandle) -> Result<DynamicImage> {
        let path = self.path(handle)?;
        if !path.is_file() {
            return Err(HalftoneError::InvalidInput(format!(
                "Image '{}' not found in {}",
                handle,
                self.root.display()
            )));
        }
        decode_path(&path)
    }
}

impl ImageStore for FsImageStore {
    fn store(&mut self, image: &DynamicImage, metadata: &ImageMetadata) -> Result<StoredImage> {
        let handle = ImageHandle::new(format!("{}.png", Uuid::new_v4()));
        let path = self.path(&handle)?;
        let (width, height) = (image.width(), image.height());

        if let Err(e) = image.save_with_format(&path, ImageFormat::Png) {
            if path.exists() {
                warn!(path = %path.display(), "Removing partially written image");
                let _ = fs::remove_file(&path);
            }
            return Err(e.into());
        }

        let record = StoredRecord {
            handle: handle.clone(),
            width,
            height,
            created_at: Utc::now().to_rfc3339(),
            metadata: metadata.clone(),
        };
        if let Err(e) = self.write_record(&path.with_extension("json"), &record) {
            // An image without its record is not a stored image.
            let _ = fs::remove_file(&path);
            return Err(e);
        }

        info!(%handle, width, height, "Stored image");
        Ok(StoredImage {
            handle,
            width,
            height,
        })
    }
}
