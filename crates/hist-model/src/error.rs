use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistError {
    #[error("invalid {domain} code '{code}'")]
    InvalidCode { domain: String, code: String },
}

pub type Result<T> = std::result::Result<T, HistError>;
