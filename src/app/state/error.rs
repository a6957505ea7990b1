#[derive(Debug, Clone, PartialEq)]
pub struct ErrorState {
    pub message: String,
}

impl ErrorState {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
