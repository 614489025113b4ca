//! Rule definitions — a named field check plus its failure message.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Reported when a string-shaped check receives a non-string value.
pub const INVALID_VALUE: &str = "Invalid value";

/// Permissive email shape: something@something.tld, no whitespace.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// A single validation rule for one field.
#[derive(Debug, Clone)]
pub struct Rule {
    field: String,
    check: Check,
    message: String,
}

/// What a rule checks.
#[derive(Debug, Clone)]
pub enum Check {
    /// Field must be present and non-empty.
    Required,
    /// Field must be one of the allowed string values.
    OneOf(Vec<String>),
    /// Field must be a string of at least this many characters.
    MinLen(usize),
    /// Field must match the pattern.
    Matches(Regex),
    /// Field must look like an email address.
    Email,
}

impl Rule {
    /// Field must be present and non-empty.
    pub fn required(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            check: Check::Required,
            message: message.to_string(),
        }
    }

    /// Field must be one of the allowed values.
    pub fn one_of(field: &str, allowed: &[&str], message: &str) -> Self {
        Self {
            field: field.to_string(),
            check: Check::OneOf(allowed.iter().map(|s| s.to_string()).collect()),
            message: message.to_string(),
        }
    }

    /// Field must be at least `min` characters long.
    pub fn min_len(field: &str, min: usize, message: &str) -> Self {
        Self {
            field: field.to_string(),
            check: Check::MinLen(min),
            message: message.to_string(),
        }
    }

    /// Field must match `pattern`. Patterns are compile-time literals;
    /// an invalid one is a programmer error, caught at rule construction.
    pub fn matches(field: &str, pattern: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            check: Check::Matches(Regex::new(pattern).expect("valid rule pattern")),
            message: message.to_string(),
        }
    }

    /// Field must look like an email address.
    pub fn email(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            check: Check::Email,
            message: message.to_string(),
        }
    }

    /// The field this rule applies to.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Evaluate this rule against a decoded JSON object.
    /// Returns the failure message, or None if the rule passes.
    pub fn evaluate(&self, input: &Value) -> Option<String> {
        let value = input.get(&self.field);

        match &self.check {
            Check::Required => match value {
                Some(Value::String(s)) if !s.trim().is_empty() => None,
                // Scalars count as present (clients send numbers for ids).
                Some(Value::Number(_)) | Some(Value::Bool(_)) => None,
                _ => Some(self.message.clone()),
            },
            Check::OneOf(allowed) => self.check_str(value, |s| allowed.iter().any(|a| a == s)),
            Check::MinLen(min) => self.check_str(value, |s| s.chars().count() >= *min),
            Check::Matches(re) => self.check_str(value, |s| re.is_match(s)),
            Check::Email => self.check_str(value, |s| EMAIL_RE.is_match(s)),
        }
    }

    /// String-shaped checks: an absent or null field simply fails the rule;
    /// a present non-string value (number, object...) is a generic
    /// invalid-value failure, not a crash.
    fn check_str(&self, value: Option<&Value>, pred: impl Fn(&str) -> bool) -> Option<String> {
        match value {
            Some(Value::String(s)) if pred(s) => None,
            Some(Value::String(_)) | Some(Value::Null) | None => Some(self.message.clone()),
            Some(_) => Some(INVALID_VALUE.to_string()),
        }
    }
}
