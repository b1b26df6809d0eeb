//! Structural shapes for port arguments and results
//!
//! A [`Shape`] describes what a JSON value must look like. Shapes are checked
//! against actual call data on every invocation of a bound operation, and
//! against each other when an adapter declares the shapes it expects.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Structural type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "of", rename_all = "lowercase")]
pub enum Shape {
    /// Anything, including an absent object field
    Any,
    String,
    Boolean,
    /// May be absent from its parent object; when present must match the inner shape
    Optional(Box<Shape>),
    Array(Box<Shape>),
    Object(Vec<Field>),
}

/// A named field of an object shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
}

/// Where and how a value failed to match a shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    /// JSON path of the offending value, rooted at `$`
    pub path: String,
    /// Rendered expected shape
    pub expected: String,
    /// JSON kind that was found (`missing` for an absent field)
    pub found: &'static str,
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "at {}: expected {}, found {}",
            self.path, self.expected, self.found
        )
    }
}

impl std::error::Error for ShapeMismatch {}

impl Shape {
    pub fn optional(inner: Shape) -> Self {
        Shape::Optional(Box::new(inner))
    }

    pub fn array(item: Shape) -> Self {
        Shape::Array(Box::new(item))
    }

    /// Build an object shape from `(name, shape)` pairs
    pub fn object<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Shape)>,
    {
        Shape::Object(
            fields
                .into_iter()
                .map(|(name, shape)| Field { name, shape })
                .collect(),
        )
    }

    /// Check a value against this shape
    ///
    /// Undeclared object keys are tolerated. The value is never modified.
    pub fn validate(&self, value: &Value) -> Result<(), ShapeMismatch> {
        self.validate_at(value, &mut String::from("$"))
    }

    fn validate_at(&self, value: &Value, path: &mut String) -> Result<(), ShapeMismatch> {
        match (self, value) {
            (Shape::Any, _) => Ok(()),
            (Shape::String, Value::String(_)) => Ok(()),
            (Shape::Boolean, Value::Bool(_)) => Ok(()),
            // Present optional values must satisfy the inner shape; null is not absence
            (Shape::Optional(inner), _) => inner.validate_at(value, path),
            (Shape::Array(item), Value::Array(items)) => {
                for (i, element) in items.iter().enumerate() {
                    let len = path.len();
                    path.push_str(&format!("[{}]", i));
                    item.validate_at(element, path)?;
                    path.truncate(len);
                }
                Ok(())
            }
            (Shape::Object(fields), Value::Object(map)) => {
                for field in fields {
                    let len = path.len();
                    path.push('.');
                    path.push_str(field.name);
                    match map.get(field.name) {
                        Some(v) => field.shape.validate_at(v, path)?,
                        None if field.shape.allows_absence() => {}
                        None => return Err(mismatch(path, &field.shape, "missing")),
                    }
                    path.truncate(len);
                }
                Ok(())
            }
            _ => Err(mismatch(path, self, kind_of(value))),
        }
    }

    /// Whether an object field with this shape may be left out
    pub fn allows_absence(&self) -> bool {
        matches!(self, Shape::Any | Shape::Optional(_))
    }

    /// Whether every value matching this shape also matches `wider`
    ///
    /// `Any` on either side stands for an unchecked shape and always fits.
    /// A required shape fits an optional one, never the reverse. Object
    /// fields may come in any order, and fields `wider` does not name are
    /// ignored. A field that `wider` names but this shape leaves out only
    /// fits when `wider` allows anything there.
    pub fn fits_within(&self, wider: &Shape) -> bool {
        match (self, wider) {
            (Shape::Any, _) | (_, Shape::Any) => true,
            (Shape::String, Shape::String) | (Shape::Boolean, Shape::Boolean) => true,
            (Shape::Optional(a), Shape::Optional(b)) | (Shape::Array(a), Shape::Array(b)) => {
                a.fits_within(b)
            }
            (Shape::Optional(_), _) => false,
            (narrow, Shape::Optional(b)) => narrow.fits_within(b),
            (Shape::Object(narrow), Shape::Object(wide)) => wide.iter().all(|w| {
                match narrow.iter().find(|n| n.name == w.name) {
                    Some(n) => n.shape.fits_within(&w.shape),
                    None => w.shape == Shape::Any,
                }
            }),
            _ => false,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Any => write!(f, "any"),
            Shape::String => write!(f, "string"),
            Shape::Boolean => write!(f, "boolean"),
            Shape::Optional(inner) => write!(f, "optional<{}>", inner),
            Shape::Array(item) => write!(f, "array<{}>", item),
            Shape::Object(fields) => {
                write!(f, "{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match &field.shape {
                        Shape::Optional(inner) => write!(f, "{}?: {}", field.name, inner)?,
                        shape => write!(f, "{}: {}", field.name, shape)?,
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

fn mismatch(path: &str, expected: &Shape, found: &'static str) -> ShapeMismatch {
    ShapeMismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        found,
    }
}

/// Name of a JSON value's kind, as used in mismatch reports
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
