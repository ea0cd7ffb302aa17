use std::{error, fmt};

/**
A recognized field carried a JSON value of the wrong type.

Mutations fail with this error wrapped in a `crate::Error`, so callers can
`downcast_ref` it to find out which field was rejected.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    field: String,
}

impl InvalidField {
    pub(crate) fn new(field: impl Into<String>) -> Self {
        InvalidField {
            field: field.into(),
        }
    }

    /**
    The name of the offending field, as it appeared in the payload.
    */
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for InvalidField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid type for field {}", self.field)
    }
}

impl error::Error for InvalidField {}

/**
A pre-serialized raw extra fragment isn't a JSON object.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRawExtra;

impl fmt::Display for InvalidRawExtra {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("raw extra fields must be a serialized JSON object")
    }
}

impl error::Error for InvalidRawExtra {}
