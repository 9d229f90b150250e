use thiserror::Error;

// Custom Application Error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Graph parse error: {0}")]
    Parse(#[from] crate::graph::ParseError),
    #[error("Search error: {0}")]
    Search(#[from] crate::search::SearchError),
    #[error("Invalid file path: {0}")]
    InvalidPath(String),
}

impl From<crate::generator::GenerateError> for AppError {
    fn from(err: crate::generator::GenerateError) -> Self {
        match err {
            crate::generator::GenerateError::Parse(e) => AppError::Parse(e),
            crate::generator::GenerateError::Search(e) => AppError::Search(e),
        }
    }
}
