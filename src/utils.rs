use std::{fmt, io, num};

#[derive(Debug)]
pub(crate) enum CrayonError {
    IOError(String),
    ConfigError(String),
    SerializationError(String),
    HeaderValueParseError(String),
    MalformedRecord(String),
    RegexError(String),
    RecordNotFound(String),
    UndefinedError(String)
}

impl From<io::Error> for CrayonError {
    fn from(e: io::Error) -> Self { Self::IOError(e.to_string()) }
}

impl From<serde_json::Error> for CrayonError {
    fn from(e: serde_json::Error) -> Self { Self::SerializationError(e.to_string()) }
}

impl From<serde_yaml::Error> for CrayonError {
    fn from(e: serde_yaml::Error) -> Self { Self::ConfigError(e.to_string()) }
}

impl From<regex::Error> for CrayonError {
    fn from(e: regex::Error) -> Self { Self::RegexError(e.to_string()) }
}

impl From<base64::DecodeError> for CrayonError {
    fn from(e: base64::DecodeError) -> Self { Self::SerializationError(e.to_string()) }
}

impl From<http::header::InvalidHeaderName> for CrayonError {
    fn from(e: http::header::InvalidHeaderName) -> Self { Self::HeaderValueParseError(e.to_string()) }
}

impl From<http::header::InvalidHeaderValue> for CrayonError {
    fn from(e: http::header::InvalidHeaderValue) -> Self { Self::HeaderValueParseError(e.to_string()) }
}

impl From<num::ParseIntError> for CrayonError {
    fn from(e: num::ParseIntError) -> Self { Self::UndefinedError(e.to_string()) }
}

impl From<String> for CrayonError {
    fn from(s: String) -> Self { Self::UndefinedError(s) }
}

impl fmt::Display for CrayonError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (kind, description) = match self {
            CrayonError::IOError(s) => ("IO error", s),
            CrayonError::ConfigError(s) => ("configuration error", s),
            CrayonError::SerializationError(s) => ("serialization error", s),
            CrayonError::HeaderValueParseError(s) => ("header parse error", s),
            CrayonError::MalformedRecord(s) => ("malformed record", s),
            CrayonError::RegexError(s) => ("regex error", s),
            CrayonError::RecordNotFound(s) => ("record not found", s),
            CrayonError::UndefinedError(s) => ("error", s)
        };

        write!(f, "{}: {}", kind, description)
    }
}

// ---------------------------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_description() {
        let err = CrayonError::MalformedRecord("status 42 is out of range".to_string());
        assert_eq!(err.to_string(), "malformed record: status 42 is out of range");
    }

    #[test]
    fn parse_errors_convert() {
        let err: CrayonError = "abc".parse::<usize>().unwrap_err().into();
        assert!(matches!(err, CrayonError::UndefinedError(_)));
    }
}
