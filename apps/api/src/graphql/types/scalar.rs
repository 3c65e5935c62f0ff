//! UUID scalar restricted to the canonical hyphenated form

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use uuid::Uuid;

/// Length of `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
const HYPHENATED_LEN: usize = 36;

/// Record identifier exchanged as an RFC 4122 string
///
/// Only the 8-4-4-4-12 hyphenated form is accepted. The simple, braced and
/// `urn:uuid:` spellings that `Uuid::parse_str` also understands are
/// rejected during input coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UuidScalar(pub Uuid);

impl UuidScalar {
    fn parse_hyphenated(s: &str) -> Option<Uuid> {
        if s.len() != HYPHENATED_LEN {
            return None;
        }
        Uuid::parse_str(s).ok()
    }
}

#[Scalar(name = "UUID", specified_by_url = "https://www.rfc-editor.org/rfc/rfc4122")]
impl ScalarType for UuidScalar {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::String(s) = &value {
            return Self::parse_hyphenated(s).map(Self).ok_or_else(|| {
                InputValueError::custom(format!("\"{}\" is not a hyphenated UUID", s))
            });
        }
        Err(InputValueError::expected_type(value))
    }

    fn is_valid(value: &Value) -> bool {
        matches!(value, Value::String(s) if Self::parse_hyphenated(s).is_some())
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.hyphenated().to_string())
    }
}

impl From<Uuid> for UuidScalar {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<UuidScalar> for Uuid {
    fn from(id: UuidScalar) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ID: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    #[test]
    fn test_parses_hyphenated_form() {
        let parsed = UuidScalar::parse(Value::String(ID.to_string())).unwrap();
        assert_eq!(parsed.0.to_string(), ID);
        assert_eq!(parsed.to_value(), Value::String(ID.to_string()));
    }

    #[rstest]
    #[case::simple("67e5504410b1426f9247bb680e5fe0c8")]
    #[case::urn("urn:uuid:67e55044-10b1-426f-9247-bb680e5fe0c8")]
    #[case::braced("{67e55044-10b1-426f-9247-bb680e5fe0c8}")]
    #[case::garbage("not-a-uuid")]
    fn test_rejects_other_spellings(#[case] input: &str) {
        let value = Value::String(input.to_string());
        assert!(!UuidScalar::is_valid(&value));
        assert!(UuidScalar::parse(value).is_err());
    }

    #[test]
    fn test_rejects_non_strings() {
        assert!(UuidScalar::parse(Value::Boolean(true)).is_err());
    }
}
