use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use static_assertions::assert_impl_all;

/// ErrorKind categorizes possible errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    UnknownAlgorithm,
    AlgorithmDisabled,
    InvalidCategory,

    InvalidEncoding,
    ConflictingOptions,
    LengthMismatch,
    KeyLengthRejected,

    PrimitiveError,
    IoError,
}

impl ErrorKind {
    fn as_str(&self) -> &'static str {
        use ErrorKind::*;
        match *self {
            UnknownAlgorithm => "unknown algorithm",
            AlgorithmDisabled => "algorithm not enabled in this build",
            InvalidCategory => "operation not valid for algorithm category",

            InvalidEncoding => "malformed hex input",
            ConflictingOptions => "conflicting options",
            LengthMismatch => "digest length mismatch",
            KeyLengthRejected => "key length rejected",

            PrimitiveError => "digest primitive error",
            IoError => "io error",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for ErrorKind {}

assert_impl_all!(ErrorKind: Display, std::error::Error, Send, Sync);

#[derive(Clone, Debug)]
enum Message {
    None,
    Static(&'static &'static str),
    Dynamic(Box<str>),
}

/// Error wraps error kind with concrete message and cause.
#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Message,
    cause: Option<Arc<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error { kind, message: Message::None, cause: None }
    }

    pub(crate) fn with_description(kind: ErrorKind, description: &'static &'static str) -> Error {
        Error { kind, message: Message::Static(description), cause: None }
    }

    pub(crate) fn with_message<S: Into<Box<str>>>(kind: ErrorKind, message: S) -> Error {
        Error { kind, message: Message::Dynamic(message.into()), cause: None }
    }

    pub(crate) fn cause_by<E: std::error::Error + Send + Sync + 'static>(self, e: E) -> Self {
        let cause = Arc::new(e);
        Error { cause: Some(cause), ..self }
    }

    /// Returns error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        match &self.message {
            Message::None => write!(f, "{}", self.kind),
            Message::Static(message) => write!(f, "{}: {}", self.kind, message),
            Message::Dynamic(message) => write!(f, "{}: {}", self.kind, &message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.cause {
            None => None,
            Some(arced) => Some(arced.as_ref()),
        }
    }
}

assert_impl_all!(Error: Display, std::error::Error, Send, Sync);

pub type Result<T> = std::result::Result<T, Error>;
