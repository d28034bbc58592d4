//! # Halftone Engine
//!
//! The single-pass pipeline:
//!
//! ```text
//! DynamicImage ──normalize──▶ intensity ─┐
//!                                         ├─ intensity > screen ─▶ mask ──reconstruct──▶ DynamicImage
//! (w, h, spacing, angle) ──EuclideanDot──▶ screen ┘
//! ```
//!
//! [`HalftoneEngine`] runs the pipeline on a bitmap. [`HalftoneInvocation`]
//! is the host-facing node: it resolves its input through an
//! [`ImageSource`], runs the engine and hands the result to an
//! [`ImageStore`]. Any failure aborts before the store is called.
//!
//! ## Example
//!
//! ```
//! use halftone::{HalftoneParams, engine::halftone};
//! use image::{DynamicImage, RgbImage};
//!
//! let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, image::Rgb([90, 120, 200])));
//! let out = halftone(&source, &HalftoneParams::default())?;
//!
//! assert_eq!((out.width, out.height), (40, 30));
//! assert_eq!(out.image.color(), image::ColorType::Rgb8);
//! # Ok::<(), halftone::HalftoneError>(())
//! ```

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::error::{HalftoneError, Result};
use crate::field::Field;
use crate::params::HalftoneParams;
use crate::render::normalize::{self, ColorMode};
use crate::render::reconstruct::{self, AlphaPolicy};
use crate::render::threshold;
use crate::screen::{EuclideanDot, ScreenAxes};
use crate::store::{ImageHandle, ImageMetadata, ImageSource, ImageStore};

/// A halftoned bitmap and what the engine learned producing it.
#[derive(Debug, Clone)]
pub struct HalftoneOutput {
    pub image: DynamicImage,
    pub width: u32,
    pub height: u32,
    /// Channel layout of the source image.
    pub source_mode: ColorMode,
    /// Number of inked pixels in the mask.
    pub ink_count: usize,
}

/// The configured pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalftoneEngine {
    params: HalftoneParams,
    alpha: AlphaPolicy,
    axes: ScreenAxes,
}

impl HalftoneEngine {
    pub fn new(params: HalftoneParams) -> Self {
        Self {
            params,
            alpha: AlphaPolicy::default(),
            axes: ScreenAxes::default(),
        }
    }

    /// Choose how RGBA output gets its alpha channel.
    pub fn alpha(mut self, policy: AlphaPolicy) -> Self {
        self.alpha = policy;
        self
    }

    /// Choose the screen's axis order.
    pub fn axes(mut self, axes: ScreenAxes) -> Self {
        self.axes = axes;
        self
    }

    pub fn params(&self) -> &HalftoneParams {
        &self.params
    }

    pub fn screen(&self) -> EuclideanDot {
        EuclideanDot::from_params(&self.params).with_axes(self.axes)
    }

    /// Normalize, generate the screen and threshold, without reconstructing.
    pub fn mask(&self, image: &DynamicImage) -> Result<(Field<bool>, ColorMode)> {
        let (intensity, mode) = normalize::normalize(image)?;
        let (width, height) = intensity.shape();
        let screen = self.screen().generate(width, height);
        let mask = threshold::build_mask(&intensity, &screen)?;
        Ok((mask, mode))
    }

    /// Run the full pipeline on a decoded bitmap.
    pub fn run(&self, image: &DynamicImage) -> Result<HalftoneOutput> {
        let _span = info_span!("halftone", params = %self.params).entered();

        let (mask, source_mode) = self.mask(image)?;
        self.render(image, &mask, source_mode)
    }

    /// Reconstruct the output for a mask previously built by
    /// [`mask`](Self::mask) from the same `image`.
    pub fn render(
        &self,
        image: &DynamicImage,
        mask: &Field<bool>,
        source_mode: ColorMode,
    ) -> Result<HalftoneOutput> {
        let alpha = match self.alpha {
            AlphaPolicy::Preserve => normalize::extract_alpha(image),
            AlphaPolicy::Opaque => None,
        };
        let output = reconstruct::reconstruct(mask, source_mode, self.alpha, alpha.as_ref())?;
        let ink_count = threshold::ink_count(mask);

        debug!(
            width = output.width(),
            height = output.height(),
            ink_count,
            "Halftone complete"
        );
        Ok(HalftoneOutput {
            width: output.width(),
            height: output.height(),
            image: output,
            source_mode,
            ink_count,
        })
    }
}

/// Halftone a bitmap with opaque alpha.
pub fn halftone(image: &DynamicImage, params: &HalftoneParams) -> Result<HalftoneOutput> {
    HalftoneEngine::new(*params).run(image)
}

/// What an invocation reports back to its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalftoneResult {
    pub image: ImageHandle,
    pub width: u32,
    pub height: u32,
}

/// A halftone request as a host hands it over.
///
/// Deserializes from `{"image": "...", "spacing": 8, "angle": 45}`; missing
/// parameters take their defaults and out-of-range ones fail to parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HalftoneInvocation {
    /// Source image; required at invoke time.
    #[serde(default)]
    pub image: Option<ImageHandle>,
    #[serde(flatten)]
    pub params: HalftoneParams,
    #[serde(default)]
    pub metadata: ImageMetadata,
    #[serde(skip)]
    pub alpha: AlphaPolicy,
}

impl HalftoneInvocation {
    pub fn new(image: ImageHandle, params: HalftoneParams) -> Self {
        Self {
            image: Some(image),
            params,
            metadata: ImageMetadata::default(),
            alpha: AlphaPolicy::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ImageMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_alpha(mut self, policy: AlphaPolicy) -> Self {
        self.alpha = policy;
        self
    }

    /// Decode, halftone and store.
    pub fn invoke<S, T>(&self, source: &S, store: &mut T) -> Result<HalftoneResult>
    where
        S: ImageSource + ?Sized,
        T: ImageStore + ?Sized,
    {
        let handle = self
            .image
            .as_ref()
            .ok_or_else(|| HalftoneError::InvalidInput("No source image given".to_string()))?;
        info!(image = %handle, params = %self.params, "Halftone invocation");

        let image = source.decode(handle)?;
        let output = HalftoneEngine::new(self.params)
            .alpha(self.alpha)
            .run(&image)?;
        let stored = store.store(&output.image, &self.metadata)?;

        Ok(HalftoneResult {
            image: stored.handle,
            width: output.width,
            height: output.height,
        })
    }
}
