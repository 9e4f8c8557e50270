use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error("Duplicate recipe id: {0}")]
    DuplicateId(String),

    #[error("Invalid dataset header: {0}")]
    InvalidHeader(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type RecipeResult<T> = Result<T, RecipeError>;
