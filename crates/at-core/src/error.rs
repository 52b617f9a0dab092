use thiserror::Error;

/// Errors originating from the core engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A brightness lookup was attempted on a character set with no entries.
    #[error("Charset vide : aucun caractère disponible pour le matching")]
    EmptyCharset,

    /// The glyph provider has no bitmap for this character.
    #[error("Aucun glyphe pour le caractère {ch:?}")]
    MissingGlyph {
        /// Character that could not be rasterized.
        ch: char,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),
}
