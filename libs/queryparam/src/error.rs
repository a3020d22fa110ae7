/// Boxed cause carried inside the contextual error variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Decode error — returned by [`parse`](crate::parse) and
/// [`Parser::parse`](crate::Parser::parse).
///
/// The contextual variants keep their cause behind `source()`, so callers
/// can walk the chain to test for a specific root cause.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source-key tag is present but its value is empty.
    #[error("invalid tag: missing tag value for field {field}")]
    InvalidTag { field: &'static str },

    /// The field is tagged but its type has no registered value parser.
    #[error("unhandled field type: {field}: {type_name}")]
    UnhandledFieldType {
        field: &'static str,
        type_name: &'static str,
    },

    /// A value parser rejected the raw parameter value.
    #[error(
        "invalid parameter value for field {field} ({type_name}) \
         from parameter {parameter} ({value}): {source}"
    )]
    InvalidParameterValue {
        field: &'static str,
        type_name: &'static str,
        parameter: String,
        value: String,
        #[source]
        source: BoxError,
    },

    /// A value setter could not assign the converted value to the field.
    #[error(
        "cannot set value for field {field} ({type_name}) \
         from parameter {parameter} ({value}): {source}"
    )]
    CannotSetValue {
        field: &'static str,
        type_name: &'static str,
        parameter: String,
        value: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Name of the field the error relates to.
    pub fn field(&self) -> &'static str {
        match self {
            Error::InvalidTag { field }
            | Error::UnhandledFieldType { field, .. }
            | Error::InvalidParameterValue { field, .. }
            | Error::CannotSetValue { field, .. } => field,
        }
    }
}
