use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Codes(#[from] kaers_codes::CodesError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
