use std::fmt;

/// The four request kinds a unit can issue against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Prefix used in user-facing error messages.
    fn message_prefix(self) -> &'static str {
        match self {
            Operation::Fetch => "Error fetching data",
            Operation::Create => "Error adding new item",
            Operation::Update => "Error updating item",
            Operation::Delete => "Error deleting item",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Errors produced by the CRUD units
///
/// Request failures come in exactly two kinds: the backend answered with a
/// non-success status, or the request never produced a response at all. A
/// success body that fails to parse as JSON is its own variant so callers can
/// tell a broken backend from an unreachable one.
#[derive(Debug)]
pub enum Error {
    /// Backend answered with a non-success HTTP status
    Http {
        op: Operation,
        url: String,
        status: reqwest::StatusCode,
    },
    /// Request failed below HTTP: connect, timeout, or body read
    Transport {
        op: Operation,
        url: String,
        source: reqwest::Error,
    },
    /// Success response body was not the JSON shape we expected
    Json {
        op: Operation,
        url: String,
        source: serde_json::Error,
    },
    /// A call was issued while the unit already had a request pending
    RequestInFlight(Operation),
}

impl Error {
    pub(crate) fn transport(op: Operation, url: &str, source: reqwest::Error) -> Self {
        Error::Transport {
            op,
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn json(op: Operation, url: &str, source: serde_json::Error) -> Self {
        Error::Json {
            op,
            url: url.to_string(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http { op, url, status } => {
                write!(f, "{} from {} (status {})", op.message_prefix(), url, status)
            }
            Error::Transport { op, url, source } => {
                write!(f, "{} from {}: {}", op.message_prefix(), url, source)
            }
            Error::Json { op, url, source } => {
                write!(
                    f,
                    "{} from {}: invalid response body: {}",
                    op.message_prefix(),
                    url,
                    source
                )
            }
            Error::RequestInFlight(op) => write!(f, "{} request already in flight", op),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport { source, .. } => Some(source),
            Error::Json { source, .. } => Some(source),
            Error::Http { .. } | Error::RequestInFlight(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
