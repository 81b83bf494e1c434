use serde_json::Value;

use std::fmt;

/// Default bound on object/array nesting accepted by the canonicalizer.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Largest magnitude below which every integral `f64` is exactly representable as `i64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Error returned when a value has no canonical JSON representation.
#[derive(thiserror::Error, Debug)]
pub enum EncodingError {
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// Nesting exceeds the configured depth bound.
    #[error("nesting deeper than {max} levels at {path}")]
    TooDeep {
        /// JSON path where the bound was crossed.
        path: String,
        /// Configured bound.
        max: usize,
    },
    /// A scalar could not be rendered in canonical form.
    #[error("canonical serialization failed: {0}")]
    Serialization(String),
}

/// Unique deterministic serialization of a JSON value.
///
/// The bytes are always valid UTF-8 and contain no insignificant whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Borrows the bytes as text.
    pub fn as_str(&self) -> &str {
        // Constructed only from a `String` in `Canonicalizer::canonicalize`.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the byte sequence is empty (never true for canonical output).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the wrapper and returns the owned bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for CanonicalBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Helper for building JSON paths during validation.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }

    fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Canonicalizer that emits deterministic bytes (RFC 8785 / JCS).
///
/// Object members are ordered by the UTF-16 code units of their keys, numbers
/// use the ECMAScript shortest round-trip form (`0.1`, `1e+21`), strings are
/// raw UTF-8 with only the mandatory escapes, and no whitespace is emitted.
/// Two structurally equal values always produce identical bytes.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    max_depth: usize,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Canonicalizer {
    /// Creates a canonicalizer with the default nesting bound.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates a canonicalizer with a custom nesting bound.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Produces the canonical bytes for `value`.
    pub fn canonicalize(&self, value: &Value) -> Result<CanonicalBytes, EncodingError> {
        self.validate(value, Path::root())?;

        // Floats that carry an integral value serialize as integers
        let mut normalized = value.clone();
        normalize_numbers(&mut normalized);

        let mut out = String::new();
        write_value(&normalized, &mut out)?;
        Ok(CanonicalBytes(out.into_bytes()))
    }

    fn validate(&self, value: &Value, path: Path) -> Result<(), EncodingError> {
        if path.depth() > self.max_depth {
            return Err(EncodingError::TooDeep {
                path: path.to_string(),
                max: self.max_depth,
            });
        }
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    self.validate(child, path.push_field(key))?;
                }
                Ok(())
            }
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    self.validate(item, path.push_index(idx))?;
                }
                Ok(())
            }
            Value::Number(num) => match num.as_f64() {
                Some(f) if num.is_f64() && !f.is_finite() => {
                    Err(EncodingError::NonFiniteNumber(path.to_string()))
                }
                _ => Ok(()),
            },
            Value::String(_) | Value::Bool(_) | Value::Null => Ok(()),
        }
    }
}

/// Canonicalizes `value` with the default [`Canonicalizer`].
pub fn canonicalize(value: &Value) -> Result<CanonicalBytes, EncodingError> {
    Canonicalizer::new().canonicalize(value)
}

/// Appends the canonical form of `value` to `out`.
///
/// Scalars are rendered by `serde_jcs`; containers are walked here so member
/// order is fixed by UTF-16 code units regardless of the map's own ordering.
fn write_value(value: &Value, out: &mut String) -> Result<(), EncodingError> {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_value(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut members: Vec<(&String, &Value)> = map.iter().collect();
            members.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));
            out.push('{');
            for (idx, (key, child)) in members.into_iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_scalar(key, out)?;
                out.push(':');
                write_value(child, out)?;
            }
            out.push('}');
        }
        scalar => write_scalar(scalar, out)?,
    }
    Ok(())
}

fn write_scalar<T: serde::Serialize + ?Sized>(
    scalar: &T,
    out: &mut String,
) -> Result<(), EncodingError> {
    let text =
        serde_jcs::to_string(scalar).map_err(|err| EncodingError::Serialization(err.to_string()))?;
    out.push_str(&text);
    Ok(())
}

/// Rewrites integral floats (including `-0.0`) as integers.
fn normalize_numbers(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER {
                    *value = Value::from(f as i64);
                }
            }
        }
        Value::Array(arr) => {
            for v in arr {
                normalize_numbers(v);
            }
        }
        Value::Object(map) => {
            for v in map.values_mut() {
                normalize_numbers(v);
            }
        }
        _ => {}
    }
}
