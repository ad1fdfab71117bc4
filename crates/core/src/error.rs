/// Domain-level errors shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input failed a field rule. The message is safe to show to a visitor.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// The visitor-facing part of the error, without the variant prefix.
    pub fn public_message(&self) -> &str {
        match self {
            CoreError::Validation(msg) => msg,
        }
    }
}
