#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("deadline exceeded before the request was sent")]
    DeadlineExceeded,
    #[error("unexpected status {status}")]
    Status { status: u16, body: String },
    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::DeadlineExceeded => true,
            Self::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}
