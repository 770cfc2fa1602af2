use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetouchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No image loaded")]
    NoImage,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid annotation list: {0}")]
    InvalidAnnotations(String),

    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(String),

    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    #[error("Script error: {0}")]
    Script(String),
}

pub type Result<T> = std::result::Result<T, RetouchError>;
