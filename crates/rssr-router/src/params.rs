use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameters extracted from a matched path, keyed by segment name
///
/// Ordered so the serialized form is stable across requests.
pub type Params = BTreeMap<String, ParamValue>;

/// Value bound to a dynamic segment
///
/// `[name]` segments bind a single decoded string, `[...name]` segments bind
/// the ordered list of remaining decoded segments. Serializes untagged, as a
/// JSON string or array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ParamValue {
    /// Returns the scalar value of a `[name]` parameter
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::Multiple(_) => None,
        }
    }

    /// Returns the segments bound by a `[...name]` parameter
    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            ParamValue::Single(_) => None,
            ParamValue::Multiple(values) => Some(values),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Single(value) => f.write_str(value),
            ParamValue::Multiple(values) => f.write_str(&values.join("/")),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Multiple(values)
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(values: [&str; N]) -> Self {
        ParamValue::Multiple(values.iter().map(|v| v.to_string()).collect())
    }
}

impl PartialEq<&str> for ParamValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let single = ParamValue::from("hello");
        assert_eq!(single.as_str(), Some("hello"));
        assert_eq!(single.as_slice(), None);

        let multiple = ParamValue::from(["a", "b"]);
        assert_eq!(multiple.as_str(), None);
        assert_eq!(multiple.as_slice().map(<[String]>::len), Some(2));
        assert_eq!(multiple.to_string(), "a/b");
    }

    #[test]
    fn test_compare_with_str() {
        assert!(ParamValue::from("x") == "x");
        assert!(ParamValue::from(["x"]) != "x");
    }
}
