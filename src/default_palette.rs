/// The sixteen color names defined by HTML 4.01. This is the palette used when no reference palette is given.
pub static HTML4: &[(&str, &str)] = &[
    ("aqua", "#00ffff"),
    ("black", "#000000"),
    ("blue", "#0000ff"),
    ("fuchsia", "#ff00ff"),
    ("green", "#008000"),
    ("gray", "#808080"),
    ("lime", "#00ff00"),
    ("maroon", "#800000"),
    ("navy", "#000080"),
    ("olive", "#808000"),
    ("purple", "#800080"),
    ("red", "#ff0000"),
    ("silver", "#c0c0c0"),
    ("teal", "#008080"),
    ("white", "#ffffff"),
    ("yellow", "#ffff00"),
];

/// The CSS 2.1 color names: the HTML 4 set plus orange.
pub static CSS21: &[(&str, &str)] = &[
    ("aqua", "#00ffff"),
    ("black", "#000000"),
    ("blue", "#0000ff"),
    ("fuchsia", "#ff00ff"),
    ("green", "#008000"),
    ("gray", "#808080"),
    ("lime", "#00ff00"),
    ("maroon", "#800000"),
    ("navy", "#000080"),
    ("olive", "#808000"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("red", "#ff0000"),
    ("silver", "#c0c0c0"),
    ("teal", "#008080"),
    ("white", "#ffffff"),
    ("yellow", "#ffff00"),
];

/// Look up the web color name of a hex code in the built-in tables. The comparison ignores case; shorthand codes
/// (`#rgb`) are not expanded.
pub fn color_name(hex: &str) -> Option<&'static str> {
    CSS21
        .iter()
        .find(|(_, code)| code.eq_ignore_ascii_case(hex))
        .map(|(name, _)| *name)
}
