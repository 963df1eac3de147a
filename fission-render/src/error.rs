use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
}
