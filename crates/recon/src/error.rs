use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum XrefError {
    /// `id`, `type` or `name` absent (or null) in a raw record.
    MissingRequiredField { field: &'static str },
    /// A field is present but cannot be coerced to the expected shape.
    TypeCoercion {
        field: String,
        expected: &'static str,
        found: String,
    },
    /// Line is not decodable into a raw record map.
    Decode(String),
    /// A record id already seen earlier in the same source.
    DuplicateId { id: i64 },
    /// Per-line failure surfaced when the batch aborts on invalid records.
    Line {
        source: String,
        line: usize,
        error: Box<XrefError>,
    },
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty path, zero shard size, etc.).
    ConfigValidation(String),
    /// Worker pool could not be built.
    Execution(String),
    /// Output sink failure.
    Io(String),
}

impl fmt::Display for XrefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredField { field } => {
                write!(f, "missing required field '{field}'")
            }
            Self::TypeCoercion { field, expected, found } => {
                write!(f, "field '{field}': expected {expected}, found {found}")
            }
            Self::Decode(msg) => write!(f, "cannot decode record: {msg}"),
            Self::DuplicateId { id } => write!(f, "duplicate record id {id}"),
            Self::Line { source, line, error } => {
                write!(f, "source '{source}', line {line}: {error}")
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Execution(msg) => write!(f, "execution error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for XrefError {}
