use std::borrow::Cow;

use serde_json::Value;

use crate::error::Error;

/// Raw input accepted by the entry points: JSON text, or an
/// already-parsed value (borrowed or owned).
#[derive(Debug, Clone)]
pub enum Source<'a> {
    Text(&'a str),
    Parsed(&'a Value),
    Owned(Value),
}

impl<'a> Source<'a> {
    /// Parse text input and check the shape of pre-parsed input. Already
    /// parsed scalars are rejected; text is only required to be valid
    /// JSON, a non-container result simply materializes nothing.
    pub(crate) fn into_value(self) -> Result<Cow<'a, Value>, Error> {
        match self {
            Source::Text(text) => match serde_json::from_str::<Value>(text) {
                Ok(value) => Ok(Cow::Owned(value)),
                Err(reason) => Err(Error::Parse(format!("{text:?} ({reason})"))),
            },
            Source::Parsed(value) => {
                check_shape(value)?;
                Ok(Cow::Borrowed(value))
            }
            Source::Owned(value) => {
                check_shape(&value)?;
                Ok(Cow::Owned(value))
            }
        }
    }
}

fn check_shape(value: &Value) -> Result<(), Error> {
    if value.is_object() || value.is_array() {
        Ok(())
    } else {
        Err(Error::Parse(value.to_string()))
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Text(text)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self {
        Source::Text(text)
    }
}

impl<'a> From<&'a Value> for Source<'a> {
    fn from(value: &'a Value) -> Self {
        Source::Parsed(value)
    }
}

impl From<Value> for Source<'static> {
    fn from(value: Value) -> Self {
        Source::Owned(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_parses() {
        let value = Source::from(r#"{"a": 1}"#).into_value().unwrap();
        assert_eq!(*value, json!({"a": 1}));
    }

    #[test]
    fn test_malformed_text_is_a_parse_error() {
        let err = Source::from("{nope").into_value().unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_parsed_scalar_is_a_parse_error() {
        let scalar = json!(42);
        let err = Source::from(&scalar).into_value().unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_parsed_containers_pass_through() {
        let object = json!({"a": 1});
        assert!(Source::from(&object).into_value().is_ok());
        assert!(Source::from(json!([1, 2])).into_value().is_ok());
    }
}
