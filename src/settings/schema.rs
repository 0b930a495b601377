//! Schema machinery shared by all settings groups.
//!
//! Every settings group is a plain serde struct with production default
//! values. What makes it a *schema* is the extra metadata carried here:
//! a static field-descriptor table used by the control panel to render
//! forms, and a `validate` hook accumulating constraint violations into
//! a [`ValidationResult`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ConstraintError;

/// Value shape of a settings field, for form generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    TextLine,
    Text,
    SourceText,
    Password,
    Bytes,
    List,
    Choice,
    Json,
}

/// Form-generation metadata for one settings field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Allowed values for `Choice` fields (and list items constrained
    /// to a vocabulary). Empty means unconstrained.
    pub vocabulary: &'static [&'static str],
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, title: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            title,
            description: "",
            kind,
            required: false,
            vocabulary: &[],
        }
    }

    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn vocabulary(mut self, vocabulary: &'static [&'static str]) -> Self {
        self.vocabulary = vocabulary;
        self
    }
}

/// A named, defaulted, validated settings group.
///
/// Implementors are flat serde structs; `RECORD` names the registry
/// record the group is stored under.
pub trait SettingsSchema: Serialize + DeserializeOwned + Default {
    /// Registry record name, e.g. `quill.navigation`.
    const RECORD: &'static str;

    /// Field metadata for settings-form generation.
    fn fields() -> &'static [FieldDescriptor];

    /// Check the whole group. The default accepts everything.
    fn validate(&self) -> ValidationResult {
        ValidationResult::success()
    }
}

/// Validation outcome with accumulated error and warning messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to this validation result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Add a warning to this validation result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Record a constraint check against a named field.
    pub fn check(&mut self, field: &str, outcome: Result<(), ConstraintError>) {
        if let Err(err) = outcome {
            self.add_error(format!("{field}: {err}"));
        }
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        if !other.is_valid {
            self.is_valid = false;
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Constraint: value must be empty or parse as JSON.
pub fn validate_json(value: &str) -> Result<(), ConstraintError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    match serde_json::from_str::<serde_json::Value>(value) {
        Ok(_) => Ok(()),
        Err(err) => Err(ConstraintError::InvalidJson {
            message: err.to_string(),
        }),
    }
}

/// Constraint: a social-media handle must not carry the given prefix
/// character (users paste `@handle` all the time).
pub fn validate_handle_prefix(value: &str, prefix: char) -> Result<(), ConstraintError> {
    if value.starts_with(prefix) {
        Err(ConstraintError::DisallowedPrefix { prefix })
    } else {
        Ok(())
    }
}

/// Expression type prefixes understood by the template engine.
const EXPRESSION_TYPES: &[&str] = &[
    "string", "path", "exists", "nocall", "not", "python", "provider",
];

/// Constraint: value must parse as a template expression.
///
/// An expression is either `type:body` with a known type prefix, or a
/// bare path expression. `string:` bodies may interpolate `${path}`
/// variables; a lone `$` must be escaped as `$$`.
pub fn validate_expression(value: &str) -> Result<(), ConstraintError> {
    let invalid = || ConstraintError::InvalidExpression {
        expression: value.to_string(),
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let (expr_type, body) = match trimmed.split_once(':') {
        Some((prefix, rest))
            if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            if !EXPRESSION_TYPES.contains(&prefix) {
                return Err(invalid());
            }
            (prefix, rest)
        }
        _ => ("path", trimmed),
    };

    match expr_type {
        "python" => {
            if body.trim().is_empty() {
                return Err(invalid());
            }
        }
        "string" => {
            if !interpolations_balanced(body) {
                return Err(invalid());
            }
        }
        // not:/nocall:/exists: wrap another expression; recurse.
        "not" | "nocall" | "exists" => return validate_expression(body).map_err(|_| invalid()),
        _ => {
            if body.trim().is_empty() || !is_path_body(body) {
                return Err(invalid());
            }
        }
    }
    Ok(())
}

fn is_path_body(body: &str) -> bool {
    // Alternate paths separated by `|`, segments separated by `/`,
    // `?name` for indirection.
    body.split('|').all(|alternative| {
        let alternative = alternative.trim();
        !alternative.is_empty()
            && alternative.chars().all(|c| {
                c.is_ascii_alphanumeric() || matches!(c, '_' | '/' | '?' | '.' | '-' | '@' | '+')
            })
    })
}

fn interpolations_balanced(body: &str) -> bool {
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            continue;
        }
        match chars.next() {
            // Escaped dollar sign.
            Some('$') => {}
            Some('{') => {
                let mut inner = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => inner.push(c),
                        None => return false,
                    }
                }
                if inner.trim().is_empty() || !is_path_body(&inner) {
                    return false;
                }
            }
            // `$name` shorthand interpolation; names never start with
            // a digit.
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                while matches!(chars.peek(), Some(c) if c.is_ascii_alphanumeric() || *c == '_') {
                    chars.next();
                }
            }
            _ => return false,
        }
    }
    true
}
