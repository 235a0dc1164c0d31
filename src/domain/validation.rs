use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidEndpoint { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidEndpoint { input } => write!(f, "invalid endpoint url: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty {
            field: "access_token",
        };
        assert_eq!(err.to_string(), "access_token must not be empty");

        let err = ValidationError::InvalidEndpoint {
            input: "not a url".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid endpoint url: not a url");
    }
}
