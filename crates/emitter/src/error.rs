use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmitError>;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Invalid selector layout: {0}")]
    InvalidLayout(String),

    #[error("Selector error: {0}")]
    Selector(#[from] push4_selectors::SelectorError),
}
