//! Claims carried inside a credential.
//!
//! A [`Claims`] set maps string keys to primitive [`ClaimValue`]s. Keys are
//! chosen by the caller except [`EXPIRY_CLAIM`], which the issuer always
//! overwrites. Objects, arrays and `null` are rejected when a credential is
//! decoded.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved key holding the expiry as Unix seconds.
pub const EXPIRY_CLAIM: &str = "exp";

/// Conventional key for the subject identifier.
pub const SUBJECT_CLAIM: &str = "sub";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl ClaimValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ClaimValue::Integer(n) => Some(*n as f64),
            ClaimValue::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for ClaimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimValue::Bool(b) => write!(f, "{}", b),
            ClaimValue::Integer(n) => write!(f, "{}", n),
            ClaimValue::Float(n) => write!(f, "{}", n),
            ClaimValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Bool(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Integer(value)
    }
}

impl From<i32> for ClaimValue {
    fn from(value: i32) -> Self {
        ClaimValue::Integer(i64::from(value))
    }
}

impl From<u32> for ClaimValue {
    fn from(value: u32) -> Self {
        ClaimValue::Integer(i64::from(value))
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        ClaimValue::Float(value)
    }
}

/// Ordered mapping of claim names to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(BTreeMap<String, ClaimValue>);

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// A claims set holding only `sub`.
    pub fn with_subject(subject: impl Into<String>) -> Self {
        Self::new().with(SUBJECT_CLAIM, subject.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Option<ClaimValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ClaimValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn subject(&self) -> Option<&str> {
        self.get(SUBJECT_CLAIM).and_then(ClaimValue::as_str)
    }

    /// Expiry in Unix seconds. Fractional values from foreign issuers are
    /// rounded down; any non-numeric value counts as absent.
    pub fn expires_at(&self) -> Option<i64> {
        match self.get(EXPIRY_CLAIM)? {
            ClaimValue::Integer(n) => Some(*n),
            ClaimValue::Float(n) if n.is_finite() => Some(n.floor() as i64),
            _ => None,
        }
    }

    /// Name of the first claim holding NaN or an infinity. Such values have
    /// no JSON representation.
    pub fn non_finite_claim(&self) -> Option<&str> {
        self.iter()
            .find(|(_, value)| value.as_f64().is_some_and(|n| !n.is_finite()))
            .map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ClaimValue> {
        self.0.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Claims
where
    K: Into<String>,
    V: Into<ClaimValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Claims {
    type Item = (&'a String, &'a ClaimValue);
    type IntoIter = btree_map::Iter<'a, String, ClaimValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_as_flat_object() {
        let claims = Claims::with_subject("a@example.com")
            .with("admin", false)
            .with("tier", 3);

        let serialized = serde_json::to_string(&claims).unwrap();
        assert_eq!(
            serialized,
            r#"{"admin":false,"sub":"a@example.com","tier":3}"#
        );
    }

    #[test]
    fn test_claims_deserialize_primitive_values() {
        let json = r#"{"sub":"user@test.com","exp":9999999999,"score":1.5,"active":true}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();

        assert_eq!(claims.subject(), Some("user@test.com"));
        assert_eq!(claims.expires_at(), Some(9999999999));
        assert_eq!(claims.get("score"), Some(&ClaimValue::Float(1.5)));
        assert_eq!(claims.get("active"), Some(&ClaimValue::Bool(true)));
    }

    #[test]
    fn test_claims_reject_nested_values() {
        assert!(serde_json::from_str::<Claims>(r#"{"sub":{"id":1}}"#).is_err());
        assert!(serde_json::from_str::<Claims>(r#"{"roles":["a"]}"#).is_err());
        assert!(serde_json::from_str::<Claims>(r#"{"sub":null}"#).is_err());
    }

    #[test]
    fn test_claims_reject_non_object_payload() {
        assert!(serde_json::from_str::<Claims>(r#"["sub"]"#).is_err());
        assert!(serde_json::from_str::<Claims>("42").is_err());
    }

    #[test]
    fn test_expires_at() {
        assert_eq!(Claims::new().expires_at(), None);
        assert_eq!(Claims::new().with(EXPIRY_CLAIM, 100).expires_at(), Some(100));
        assert_eq!(
            Claims::new().with(EXPIRY_CLAIM, 100.9).expires_at(),
            Some(100)
        );
        assert_eq!(Claims::new().with(EXPIRY_CLAIM, "100").expires_at(), None);
        assert_eq!(Claims::new().with(EXPIRY_CLAIM, true).expires_at(), None);
        assert_eq!(
            Claims::new().with(EXPIRY_CLAIM, f64::NAN).expires_at(),
            None
        );
    }

    #[test]
    fn test_subject_requires_string() {
        assert_eq!(Claims::new().with(SUBJECT_CLAIM, 7).subject(), None);
        assert_eq!(Claims::with_subject("x").subject(), Some("x"));
    }

    #[test]
    fn test_insert_overwrites() {
        let mut claims = Claims::with_subject("first");
        let previous = claims.insert(SUBJECT_CLAIM, "second");

        assert_eq!(previous, Some(ClaimValue::from("first")));
        assert_eq!(claims.subject(), Some("second"));
        assert_eq!(claims.len(), 1);
    }

    #[test]
    fn test_from_iterator() {
        let claims: Claims = [("sub", "a"), ("role", "admin")].into_iter().collect();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims.get("role").and_then(ClaimValue::as_str), Some("admin"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ClaimValue::from("x").to_string(), "x");
        assert_eq!(ClaimValue::from(12).to_string(), "12");
        assert_eq!(ClaimValue::from(true).to_string(), "true");
    }

    #[test]
    fn test_non_finite_claim() {
        let finite = Claims::with_subject("a").with("score", 0.5).with("level", 3);
        assert_eq!(finite.non_finite_claim(), None);

        let nan = Claims::with_subject("a").with("score", f64::NAN);
        assert_eq!(nan.non_finite_claim(), Some("score"));

        let inf = Claims::with_subject("a").with("ratio", f64::NEG_INFINITY);
        assert_eq!(inf.non_finite_claim(), Some("ratio"));
    }
}
