// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to extract the dominant colors of an image against a fixed reference palette.
//!
//! The image is scaled down to a small fixed width with nearest-neighbor sampling, every pixel is matched to the
//! closest palette color by squared RGB distance, and the palette colors are ranked by how many pixels matched them.
//!
//! ```no_run
//! let file = std::fs::File::open("cover.jpg")?;
//! let colors = dominance::extract_colors(file, 10, &["#d50000", "#9e9d24", "#ff71d4", "#ffffff"])?;
//!
//! for color in colors {
//!     println!("{} {}%", color.hex(), color.percentage());
//! }
//! # Ok::<(), dominance::Error>(())
//! ```

mod color_match;
mod default_palette;
mod error;
mod nearest_color_quantizer;
mod reference_palette;

pub const DEFAULT_LIMIT: usize = 5;
pub const DEFAULT_RESIZE_WIDTH: u32 = 100;

pub use crate::{
    color_match::ColorMatch,
    default_palette::{color_name, CSS21, HTML4},
    error::{Error, Result},
    nearest_color_quantizer::{HitCounter, NearestColorQuantizer, ScanBounds},
    reference_palette::{PaletteEntry, ReferencePalette},
};
pub use image;
pub use palette;

use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageBuffer, Rgba};
use std::io::{Cursor, Read};

/// Extract the `limit` most common palette colors of an encoded image.
///
/// A `limit` of zero means [`DEFAULT_LIMIT`], and an empty `palette` means the HTML 4 named colors. The palette is
/// validated before the image is decoded.
pub fn extract_colors<R, S>(reader: R, limit: usize, palette: &[S]) -> Result<Vec<ColorMatch>>
where
    R: Read,
    S: AsRef<str>,
{
    let palette = ReferencePalette::from_hex(palette)?;

    ColorExtractor::from_reader(reader)?
        .limit(limit)
        .palette(palette)
        .extract()
}

pub struct ColorExtractor {
    image: DynamicImage,
    palette: ReferencePalette,
    limit: usize,
    resize_width: u32,
    bounds: ScanBounds,
}

impl ColorExtractor {
    pub fn from_image<I>(image: I) -> Self
    where
        I: Into<DynamicImage>,
    {
        Self {
            image: image.into(),
            palette: ReferencePalette::default(),
            limit: DEFAULT_LIMIT,
            resize_width: DEFAULT_RESIZE_WIDTH,
            bounds: ScanBounds::default(),
        }
    }

    /// Decode an image in any format the `image` crate is built with, guessing the format from its contents.
    pub fn from_reader<R>(mut reader: R) -> Result<Self>
    where
        R: Read,
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let image = image::io::Reader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .decode()?;

        log::debug!("decoded {}x{} image", image.width(), image.height());
        Ok(Self::from_image(image))
    }

    /// The maximum number of colors to return. Zero means [`DEFAULT_LIMIT`].
    pub fn limit(self, limit: usize) -> Self {
        Self { limit, ..self }
    }

    pub fn palette(self, palette: ReferencePalette) -> Self {
        Self { palette, ..self }
    }

    /// The width to scale the image to before matching. The height follows the aspect ratio. Zero disables scaling.
    pub fn resize_width(self, resize_width: u32) -> Self {
        Self { resize_width, ..self }
    }

    pub fn scan_bounds(self, bounds: ScanBounds) -> Self {
        Self { bounds, ..self }
    }

    /// The dimensions of the raster the palette is matched against.
    pub fn target_dimensions(&self) -> (u32, u32) {
        let (width, height) = self.image.dimensions();

        if self.resize_width == 0 || width == 0 {
            return (width, height);
        }

        // the height rounds up from .3 on
        let scale = width as f64 / self.resize_width as f64;
        (self.resize_width, (0.7 + height as f64 / scale) as u32)
    }

    /// Count the pixels matching each palette color, without ranking them.
    pub fn hit_counts(&self) -> HitCounter<'_> {
        let raster = self.downscale();

        NearestColorQuantizer::new(&self.palette, self.bounds).quantize(&raster)
    }

    pub fn extract(&self) -> Result<Vec<ColorMatch>> {
        let hits = self.hit_counts();
        let total_pixels = hits.total();
        log::debug!(
            "matched {} of {} palette colors over {} pixels",
            hits.hits().count(),
            self.palette.len(),
            total_pixels
        );

        let limit = if self.limit == 0 { DEFAULT_LIMIT } else { self.limit };
        color_match::rank(&hits, total_pixels, limit)
    }

    fn downscale(&self) -> ImageBuffer<Rgba<u16>, Vec<u16>> {
        let (width, height) = self.target_dimensions();

        if width == 0 || height == 0 {
            return ImageBuffer::new(width, height);
        }

        if (width, height) == self.image.dimensions() {
            return self.image.to_rgba16();
        }

        log::debug!(
            "scaling {}x{} image to {}x{}",
            self.image.width(),
            self.image.height(),
            width,
            height
        );
        self.image
            .resize_exact(width, height, FilterType::Nearest)
            .to_rgba16()
    }
}
