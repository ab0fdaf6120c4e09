use std::{fmt, io, path::PathBuf};

/// Why a notification could not be delivered.
///
/// Never surfaced to logging callers: [`Notify::send`](super::Notify::send)
/// reports it on stderr and swallows it.
#[derive(Debug)]
pub enum NotifyError {
    /// Bot token or chat id not configured.
    MissingCredentials,
    Url(String),
    /// The HTTP client failed to build at startup.
    ClientUnavailable,
    CaFile { path: PathBuf, source: io::Error },
    /// Connect, TLS, timeout or protocol failure. The URL is stripped so the
    /// bot token never reaches a diagnostic line.
    Http(reqwest::Error),
    Body(io::Error),
    Status { code: u16, body: String },
    TooManyRedirects(usize),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => write!(f, "notifier credentials are missing"),
            Self::Url(s) => write!(f, "invalid notification URL: {s}"),
            Self::ClientUnavailable => write!(f, "HTTP client is unavailable"),
            Self::CaFile { path, source } => {
                write!(f, "cannot read CA file {}: {source}", path.display())
            }
            Self::Http(e) => write!(f, "HTTP request failed: {e}"),
            Self::Body(e) => write!(f, "cannot read response body: {e}"),
            Self::Status { code, body } if body.is_empty() => write!(f, "HTTP status {code}"),
            Self::Status { code, body } => write!(f, "HTTP status {code}: {body}"),
            Self::TooManyRedirects(n) => write!(f, "gave up after {n} redirects"),
        }
    }
}

impl std::error::Error for NotifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CaFile { source, .. } => Some(source),
            Self::Http(e) => Some(e),
            Self::Body(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NotifyError {
    fn from(e: reqwest::Error) -> Self {
        NotifyError::Http(e.without_url())
    }
}

impl From<url::ParseError> for NotifyError {
    fn from(e: url::ParseError) -> Self {
        NotifyError::Url(format!("{e}"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn status_display_includes_body_only_when_present() {
        let bare = NotifyError::Status {
            code: 502,
            body: String::new(),
        };
        assert_eq!(bare.to_string(), "HTTP status 502");
        let with_body = NotifyError::Status {
            code: 400,
            body: "chat not found".into(),
        };
        assert_eq!(with_body.to_string(), "HTTP status 400: chat not found");
    }
}
