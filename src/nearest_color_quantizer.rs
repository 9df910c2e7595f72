use crate::reference_palette::{PaletteEntry, ReferencePalette};
use image::{GenericImageView, Rgba};

/// Which pixel coordinates the quantizer visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScanBounds {
    /// Visit every pixel exactly once.
    #[default]
    Exclusive,
    /// Visit one column and one row past the raster on each axis, reading the out-of-range coordinates from the last
    /// valid column and row. The last column and row are therefore counted twice.
    Inclusive,
}

/// Per palette entry tally of the pixels that matched it most closely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitCounter<'p> {
    palette: &'p ReferencePalette,
    counts: Vec<u32>,
}

pub struct NearestColorQuantizer<'p> {
    palette: &'p ReferencePalette,
    components: Vec<[i32; 3]>,
    bounds: ScanBounds,
}

impl<'p> HitCounter<'p> {
    fn new(palette: &'p ReferencePalette) -> Self {
        Self {
            palette,
            counts: vec![0; palette.len()],
        }
    }

    /// The matched palette entries and their counts in palette order. Entries nothing matched are left out.
    pub fn hits(&self) -> impl Iterator<Item = (&'p PaletteEntry, u32)> + '_ {
        self.palette
            .entries()
            .iter()
            .zip(self.counts.iter().copied())
            .filter(|(_, count)| *count > 0)
    }

    /// The count for a hex string, zero if it never matched or isn't in the palette.
    pub fn count(&self, hex: &str) -> u32 {
        self.palette
            .entries()
            .iter()
            .position(|entry| entry.hex() == hex)
            .map_or(0, |index| self.counts[index])
    }

    /// The number of pixels counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&count| count as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }
}

impl<'p> NearestColorQuantizer<'p> {
    pub fn new(palette: &'p ReferencePalette, bounds: ScanBounds) -> Self {
        Self {
            palette,
            components: palette.entries().iter().map(PaletteEntry::components).collect(),
            bounds,
        }
    }

    pub fn quantize<I>(&self, image: &I) -> HitCounter<'p>
    where
        I: GenericImageView<Pixel = Rgba<u16>>,
    {
        let mut hits = HitCounter::new(self.palette);
        let (width, height) = image.dimensions();

        if width == 0 || height == 0 {
            return hits;
        }

        let (x_end, y_end) = match self.bounds {
            ScanBounds::Exclusive => (width, height),
            ScanBounds::Inclusive => (width + 1, height + 1),
        };

        for x in 0..x_end {
            for y in 0..y_end {
                let pixel = image.get_pixel(x.min(width - 1), y.min(height - 1));

                if let Some(index) = self.nearest(sample(pixel)) {
                    hits.counts[index] += 1;
                }
            }
        }

        hits
    }

    /// The index of the palette entry closest to the given color. Of equally close entries, the first wins.
    fn nearest(&self, color: [i32; 3]) -> Option<usize> {
        let mut min: Option<(usize, i32)> = None;

        for (index, entry) in self.components.iter().enumerate() {
            let dist = distance(color, *entry);

            match min {
                Some((_, min_dist)) if min_dist <= dist => {}
                _ => min = Some((index, dist)),
            }
        }

        min.map(|(index, _)| index)
    }
}

/// Reduce a 16-bit pixel to the 8-bit range by dividing by 255, dropping alpha. Channels at or above 128 come out one
/// higher than their 8-bit source (`v * 257 / 255`), 255 maps to 257.
fn sample(pixel: Rgba<u16>) -> [i32; 3] {
    let [r, g, b, _] = pixel.0;
    [r as i32 / 255, g as i32 / 255, b as i32 / 255]
}

fn distance(lhs: [i32; 3], rhs: [i32; 3]) -> i32 {
    let dr = rhs[0] - lhs[0];
    let dg = rhs[1] - lhs[1];
    let db = rhs[2] - lhs[2];

    dr * dr + dg * dg + db * db
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    fn rgba16((r, g, b): (u8, u8, u8)) -> Rgba<u16> {
        Rgba([r as u16 * 257, g as u16 * 257, b as u16 * 257, u16::MAX])
    }

    #[test]
    fn samples_sixteen_bit_channels_down() {
        assert_eq!(sample(rgba16((0, 127, 128))), [0, 127, 129]);
        assert_eq!(sample(rgba16((255, 255, 255))), [257, 257, 257]);
    }

    #[test]
    fn exact_match_on_first_entry_is_kept() {
        let palette = ReferencePalette::from_hex(&["#000000", "#010101"]).unwrap();
        let quantizer = NearestColorQuantizer::new(&palette, ScanBounds::Exclusive);

        assert_eq!(quantizer.nearest([0, 0, 0]), Some(0));
    }

    #[test]
    fn equal_distance_goes_to_first_entry() {
        let palette = ReferencePalette::from_hex(&["#000000", "#0a0000"]).unwrap();
        let quantizer = NearestColorQuantizer::new(&palette, ScanBounds::Exclusive);
        assert_eq!(quantizer.nearest([5, 0, 0]), Some(0));

        let palette = ReferencePalette::from_hex(&["#0a0000", "#000000"]).unwrap();
        let quantizer = NearestColorQuantizer::new(&palette, ScanBounds::Exclusive);
        assert_eq!(quantizer.nearest([5, 0, 0]), Some(0));
        assert_eq!(quantizer.nearest([4, 0, 0]), Some(1));
    }

    #[test]
    fn empty_palette_matches_nothing() {
        let palette = ReferencePalette::from_hex(&["#000000"]).unwrap();
        let mut quantizer = NearestColorQuantizer::new(&palette, ScanBounds::Exclusive);
        quantizer.components.clear();

        assert_eq!(quantizer.nearest([0, 0, 0]), None);
    }

    #[test]
    fn exclusive_scan_counts_every_pixel_once() {
        let palette = ReferencePalette::from_hex(&["#ff0000", "#0000ff"]).unwrap();
        let image = ImageBuffer::from_fn(4, 3, |x, _| {
            if x == 0 {
                rgba16((250, 10, 10))
            } else {
                rgba16((0, 0, 200))
            }
        });

        let hits = NearestColorQuantizer::new(&palette, ScanBounds::Exclusive).quantize(&image);

        assert_eq!(hits.count("#ff0000"), 3);
        assert_eq!(hits.count("#0000ff"), 9);
        assert_eq!(hits.total(), 12);
    }

    #[test]
    fn inclusive_scan_repeats_last_column_and_row() {
        let palette = ReferencePalette::from_hex(&["#ff0000", "#0000ff"]).unwrap();
        let image = ImageBuffer::from_fn(4, 3, |x, _| {
            if x == 3 {
                rgba16((255, 0, 0))
            } else {
                rgba16((0, 0, 255))
            }
        });

        let hits = NearestColorQuantizer::new(&palette, ScanBounds::Inclusive).quantize(&image);

        // the last column is read for x = 3 and x = 4, each over 4 rows
        assert_eq!(hits.count("#ff0000"), 8);
        assert_eq!(hits.count("#0000ff"), 12);
        assert_eq!(hits.total(), 5 * 4);
    }

    #[test]
    fn hits_skip_unmatched_entries() {
        let palette = ReferencePalette::from_hex(&["#ffffff", "#000000", "#ff0000"]).unwrap();
        let image = ImageBuffer::from_pixel(2, 2, rgba16((240, 5, 5)));

        let hits = NearestColorQuantizer::new(&palette, ScanBounds::Exclusive).quantize(&image);
        let matched: Vec<_> = hits.hits().map(|(entry, count)| (entry.hex(), count)).collect();

        assert_eq!(matched, [("#ff0000", 4)]);
        assert_eq!(hits.count("#ffffff"), 0);
        assert_eq!(hits.count("#abcdef"), 0);
    }

    #[test]
    fn empty_image_counts_nothing() {
        let palette = ReferencePalette::html4();
        let image: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::new(0, 5);

        let hits = NearestColorQuantizer::new(&palette, ScanBounds::Inclusive).quantize(&image);

        assert!(hits.is_empty());
        assert_eq!(hits.hits().count(), 0);
    }
}
