use thiserror::Error;

/// Error returned by every fallible operation in the crate.
///
/// The payload is boxed to keep `Result<T>` small; match on [`Error::kind`]
/// to distinguish failure classes.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_date(message: impl Into<String>) -> Error {
        ErrorKind::InvalidDate {
            message: message.into(),
        }
        .into()
    }

    pub fn invalid_time(message: impl Into<String>) -> Error {
        ErrorKind::InvalidTime {
            message: message.into(),
        }
        .into()
    }

    pub fn out_of_range(what: impl Into<String>) -> Error {
        ErrorKind::OutOfRange { what: what.into() }.into()
    }

    pub fn duration_overflow(operation: impl Into<String>) -> Error {
        ErrorKind::DurationOverflow {
            operation: operation.into(),
        }
        .into()
    }

    pub fn invalid_offset(seconds: i64) -> Error {
        ErrorKind::InvalidOffset { seconds }.into()
    }

    pub fn malformed(position: usize, reason: impl Into<String>) -> Error {
        ErrorKind::MalformedInput {
            position,
            reason: reason.into(),
        }
        .into()
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidFormat {
            element: element.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn offset_resolution(message: impl Into<String>) -> Error {
        ErrorKind::OffsetResolution {
            message: message.into(),
        }
        .into()
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        ErrorKind::Io {
            context: context.into(),
            source,
        }
        .into()
    }

    /// True for [`ErrorKind::MalformedInput`].
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind(), ErrorKind::MalformedInput { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid date: {message}")]
    InvalidDate { message: String },

    #[error("invalid time: {message}")]
    InvalidTime { message: String },

    #[error("{what} is out of the representable range")]
    OutOfRange { what: String },

    #[error("duration overflow in {operation}")]
    DurationOverflow { operation: String },

    #[error("invalid offset of {seconds} seconds, magnitude must be below 24 hours")]
    InvalidOffset { seconds: i64 },

    #[error("malformed input at byte {position}: {reason}")]
    MalformedInput { position: usize, reason: String },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid format element '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("failed to resolve local offset: {message}")]
    OffsetResolution { message: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}
