/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// No response was received (connection refused, reset, DNS).
    Transport(String),
    /// The server answered with a non-success status.
    Status { status: u16, body: String },
    /// The body was not the expected JSON.
    Decode(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "request failed: {msg}"),
            ClientError::Status { status, body } if body.trim().is_empty() => {
                write!(f, "HTTP {status}")
            }
            ClientError::Status { status, body } => write!(f, "HTTP {status}: {}", body.trim()),
            ClientError::Decode(msg) => write!(f, "invalid response body: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::ClientError;

    #[test]
    fn status_message_includes_trimmed_body() {
        let err = ClientError::Status {
            status: 502,
            body: " upstream down \n".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: upstream down");

        let err = ClientError::Status {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn decode_errors_convert() {
        let err: ClientError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
