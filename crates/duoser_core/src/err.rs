//! Error implementations

/// Result type returned by every encode and decode call.
pub type SerDeResult<T> = Result<T, Error>;

/// Custom error object for this library.
///
/// Every variant is fatal to the call that raised it. Nothing is retried and
/// no partial value is ever returned.
#[derive(Debug)]
pub enum Error {
    /// The binary input ended before the requested type was fully read.
    UnexpectedEof { needed: usize, remaining: usize },

    /// String bytes are not valid UTF-8.
    InvalidUtf8(std::str::Utf8Error),

    /// A boolean byte other than `0` or `1`.
    InvalidBool(u8),

    /// A nullable presence byte other than `0` or `1`.
    InvalidPresenceFlag(u8),

    /// A collection or string is too long for the 4-byte length prefix.
    LengthOverflow(usize),

    /// A fixed-size array was decoded with a different element count.
    LengthMismatch { expected: usize, found: usize },

    /// Set elements or map keys were not in strictly ascending order.
    NonCanonical(&'static str),

    /// Bytes were left over after the top-level value was decoded.
    TrailingBytes(usize),

    /// A text-format number does not fit the requested integer type.
    IntegerOutOfRange { ty: &'static str, value: String },

    /// JSON has no representation for NaN or the infinities.
    NonFiniteFloat,

    /// The text input is not valid JSON.
    Json(serde_json::Error),

    /// The JSON value does not have the shape the requested type needs.
    UnexpectedToken { expected: &'static str, found: String },

    /// A quoted decimal could not be parsed back into its integer type.
    InvalidNumber(String),

    /// A byte payload string is not valid base64.
    InvalidBase64(base64::DecodeError),

    /// A record field is absent from the JSON object.
    MissingField(&'static str),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidUtf8(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::InvalidBase64(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnexpectedEof { needed, remaining } => write!(
                f,
                "unexpected end of input: needed {} bytes, {} remaining",
                needed, remaining
            ),
            Error::InvalidUtf8(e) => write!(f, "invalid utf-8 in string: {}", e),
            Error::InvalidBool(b) => write!(f, "invalid boolean byte: {}", b),
            Error::InvalidPresenceFlag(b) => write!(f, "invalid presence flag: {}", b),
            Error::LengthOverflow(len) => {
                write!(f, "length {} does not fit a u32 length prefix", len)
            }
            Error::LengthMismatch { expected, found } => write!(
                f,
                "fixed array expects {} elements, found {}",
                expected, found
            ),
            Error::NonCanonical(what) => {
                write!(f, "{} not in strictly ascending order", what)
            }
            Error::TrailingBytes(n) => write!(f, "{} trailing bytes after value", n),
            Error::IntegerOutOfRange { ty, value } => {
                write!(f, "{} is out of range for {}", value, ty)
            }
            Error::NonFiniteFloat => write!(f, "non-finite floats cannot be written as json"),
            Error::Json(e) => write!(f, "malformed json: {}", e),
            Error::UnexpectedToken { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            Error::InvalidNumber(s) => write!(f, "invalid quoted integer: {:?}", s),
            Error::InvalidBase64(e) => write!(f, "invalid base64 payload: {}", e),
            Error::MissingField(name) => write!(f, "missing field `{}`", name),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::InvalidBase64(e)
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8(e)
    }
}
