use anyhow::{Context, Result};
use clap::Parser;
use dominance::{ColorExtractor, ReferencePalette, ScanBounds};
use std::{fs::File, io::BufReader, path::PathBuf};

/// Print the dominant colors of images, matched against a reference palette.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Maximum number of colors to print per image
    #[arg(short, long, default_value_t = dominance::DEFAULT_LIMIT)]
    limit: usize,

    /// Comma-separated list of hex colors to match against. Defaults to the HTML 4 named colors
    #[arg(short = 'c', long, value_delimiter = ',')]
    palette: Vec<String>,

    /// Width to scale images to before matching, 0 to match at full size
    #[arg(short = 'w', long, default_value_t = dominance::DEFAULT_RESIZE_WIDTH)]
    resize_width: u32,

    /// Also scan one column and row past the image edge, repeating the last ones
    #[arg(long)]
    inclusive_bounds: bool,

    /// Print the results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let palette_hex = args
        .palette
        .iter()
        .map(|hex| hex.trim())
        .filter(|hex| !hex.is_empty())
        .collect::<Vec<_>>();
    let palette = ReferencePalette::from_hex(palette_hex.as_slice()).context("invalid --palette")?;

    let bounds = if args.inclusive_bounds {
        ScanBounds::Inclusive
    } else {
        ScanBounds::Exclusive
    };

    for input in &args.inputs {
        let file = File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
        let colors = ColorExtractor::from_reader(BufReader::new(file))
            .and_then(|extractor| {
                extractor
                    .limit(args.limit)
                    .palette(palette.clone())
                    .resize_width(args.resize_width)
                    .scan_bounds(bounds)
                    .extract()
            })
            .with_context(|| format!("failed to extract colors from {}", input.display()))?;

        if args.json {
            println!("{}", serde_json::to_string(&colors)?);
            continue;
        }

        println!("{}", input.display());
        for color in &colors {
            match dominance::color_name(color.hex()) {
                Some(name) => println!("  {:<8} {:>3}%  {}", color.hex(), color.percentage(), name),
                None => println!("  {:<8} {:>3}%", color.hex(), color.percentage()),
            }
        }
    }

    Ok(())
}
