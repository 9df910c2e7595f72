use crate::{default_palette, Error, Result};
use palette::Srgb;
use std::collections::HashSet;

/// A single reference color, identified by the hex string it was given as.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaletteEntry {
    hex: String,
    red: u8,
    green: u8,
    blue: u8,
}

/// An ordered set of reference colors pixels are matched against.
///
/// Entries are keyed by their hex string: a string seen a second time is dropped and the first occurrence keeps its
/// position. Palette order is significant, since it breaks ties both when matching pixels and when ranking results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePalette {
    entries: Vec<PaletteEntry>,
}

impl PaletteEntry {
    /// Parse a `#rgb` or `#rrggbb` hex color.
    pub fn parse(hex: &str) -> Result<PaletteEntry> {
        let invalid = || Error::InvalidPalette { hex: hex.to_owned() };

        // palette's parser also accepts a missing '#' and slices by byte, so validate the shape first
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(digits.len(), 3 | 6) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let rgb: Srgb<u8> = hex.parse().map_err(|_| invalid())?;
        let (red, green, blue) = rgb.into_components();

        Ok(Self {
            hex: hex.to_owned(),
            red,
            green,
            blue,
        })
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// The components widened for distance arithmetic.
    pub(crate) fn components(&self) -> [i32; 3] {
        [self.red as i32, self.green as i32, self.blue as i32]
    }
}

impl ReferencePalette {
    /// Build a palette from hex strings, falling back to [`ReferencePalette::html4`] when none are given.
    pub fn from_hex<S>(colors: &[S]) -> Result<ReferencePalette>
    where
        S: AsRef<str>,
    {
        if colors.is_empty() {
            return Ok(Self::html4());
        }

        let mut seen = HashSet::with_capacity(colors.len());
        let mut entries = Vec::with_capacity(colors.len());

        for hex in colors.iter().map(AsRef::as_ref) {
            let entry = PaletteEntry::parse(hex)?;

            if seen.insert(hex) {
                entries.push(entry);
            }
        }

        Ok(Self { entries })
    }

    pub fn html4() -> ReferencePalette {
        Self::from_table(default_palette::HTML4)
    }

    pub fn css21() -> ReferencePalette {
        Self::from_table(default_palette::CSS21)
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn from_table(table: &[(&str, &str)]) -> ReferencePalette {
        // the built-in tables are well formed
        let entries = table
            .iter()
            .filter_map(|(_, hex)| PaletteEntry::parse(hex).ok())
            .collect();

        Self { entries }
    }
}

impl Default for ReferencePalette {
    fn default() -> Self {
        Self::html4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(PaletteEntry::parse("#d50000").unwrap().rgb(), (0xd5, 0, 0));
        assert_eq!(PaletteEntry::parse("#9E9D24").unwrap().rgb(), (0x9e, 0x9d, 0x24));
        assert_eq!(PaletteEntry::parse("#f0a").unwrap().rgb(), (0xff, 0x00, 0xaa));
    }

    #[test]
    fn keeps_hex_as_given() {
        assert_eq!(PaletteEntry::parse("#FFF").unwrap().hex(), "#FFF");
    }

    #[test]
    fn rejects_malformed_hex() {
        for hex in ["", "#", "d50000", "#d5000", "#d500000", "#gg0000", "#+f0000", "#éé"] {
            assert!(
                matches!(PaletteEntry::parse(hex), Err(Error::InvalidPalette { hex: ref h }) if h == hex),
                "{hex:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_input_falls_back_to_html4() {
        let palette = ReferencePalette::from_hex::<&str>(&[]).unwrap();

        assert_eq!(palette, ReferencePalette::html4());
        assert_eq!(palette.len(), default_palette::HTML4.len());
    }

    #[test]
    fn duplicates_keep_first_position() {
        let palette = ReferencePalette::from_hex(&["#ffffff", "#000000", "#ffffff"]).unwrap();
        let hexes: Vec<_> = palette.entries().iter().map(PaletteEntry::hex).collect();

        assert_eq!(hexes, ["#ffffff", "#000000"]);
    }

    #[test]
    fn one_bad_color_rejects_the_palette() {
        let result = ReferencePalette::from_hex(&["#ffffff", "white"]);

        assert!(matches!(result, Err(Error::InvalidPalette { hex }) if hex == "white"));
    }

    #[test]
    fn built_in_tables_parse_completely() {
        assert_eq!(ReferencePalette::html4().len(), default_palette::HTML4.len());
        assert_eq!(ReferencePalette::css21().len(), default_palette::CSS21.len());
    }
}
