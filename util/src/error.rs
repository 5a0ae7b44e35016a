use thiserror::Error;

#[derive(Debug, Error)]
pub enum XWordError {
  #[error("Parse error: {0}")]
  Parse(String),
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

pub type XWordResult<T = ()> = Result<T, XWordError>;
