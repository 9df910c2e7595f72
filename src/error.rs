use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be read or is not an image in a supported format.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// A palette color is not of the form `#rgb` or `#rrggbb`.
    #[error("invalid palette color {hex:?}, expected `#rgb` or `#rrggbb`")]
    InvalidPalette { hex: String },

    /// The scanned raster contained no pixels, so no color could be matched.
    #[error("no pixels matched any palette color")]
    NoMatches,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Decode(image::ImageError::IoError(err))
    }
}
