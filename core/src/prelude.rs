/// Common error type for catalog and widget operations.
#[derive(thiserror::Error, Debug)]
pub enum WidgetError {
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type WidgetResult<T> = Result<T, WidgetError>;
