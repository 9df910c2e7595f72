use crate::{nearest_color_quantizer::HitCounter, Error, Result};

/// A palette color and the share of the image that matched it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorMatch {
    hex: String,
    #[cfg_attr(feature = "serde", serde(rename = "match"))]
    percentage: u32,
}

impl ColorMatch {
    pub fn new(hex: impl Into<String>, percentage: u32) -> ColorMatch {
        Self {
            hex: hex.into(),
            percentage,
        }
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// The whole-number percentage of pixels, truncated, that matched this color.
    pub fn percentage(&self) -> u32 {
        self.percentage
    }
}

/// Rank the matched colors by count, at most `limit` of them, dropping any whose share truncates to zero percent.
///
/// Equal counts keep palette order. Fails only if nothing was counted at all; an empty result after dropping
/// zero-percent colors is not an error.
pub(crate) fn rank(hits: &HitCounter<'_>, total_pixels: u64, limit: usize) -> Result<Vec<ColorMatch>> {
    let mut weights = hits.hits().collect::<Vec<_>>();

    if weights.is_empty() {
        return Err(Error::NoMatches);
    }

    // stable, so ties stay in palette order
    weights.sort_by(|(_, lhs), (_, rhs)| rhs.cmp(lhs));

    let matches = weights
        .into_iter()
        .take(limit)
        .map(|(entry, count)| ColorMatch::new(entry.hex(), percentage(count, total_pixels)))
        .filter(|color| color.percentage > 0)
        .collect::<Vec<_>>();

    for color in &matches {
        log::trace!("{} matched {}%", color.hex, color.percentage);
    }

    Ok(matches)
}

fn percentage(count: u32, total_pixels: u64) -> u32 {
    (count as u64 * 100)
        .checked_div(total_pixels)
        .map_or(0, |percent| percent as u32)
}
