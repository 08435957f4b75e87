use thiserror::Error;

pub type Result<T> = std::result::Result<T, SelectorError>;

#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pixel data: {0}")]
    InvalidPixelData(String),

    #[error("Pixel {index} is not an 8-char hex value: {value:?}")]
    MalformedPixel { index: usize, value: String },

    #[error("Duplicate pixel selector 0x{selector} at positions {first} and {second}")]
    DuplicatePixel {
        selector: String,
        first: usize,
        second: usize,
    },
}
