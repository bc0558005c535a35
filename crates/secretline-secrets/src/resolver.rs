//! Property resolution inside JSON structured secrets.
//!
//! A property path is dot separated: `db.credentials.password` descends three
//! object levels. Secrets frequently use flat keys that contain dots
//! themselves (`"db.password": "..."`), so a dotted path is first tried as one
//! literal key and only falls back to nested descent when that key is absent.
//!
//! Path syntax for nested descent:
//!
//! - `key` selects an object member, `\` escapes the next character so
//!   `a\.b` is the literal key `a.b`
//! - `*` and `?` in a key match any run of characters / any one character,
//!   the first matching member in document order wins
//! - a number selects an array element
//! - `#` on an array yields its length, `#.rest` applies `rest` to every
//!   element and collects the values that exist
//!
//! Values are read from a parsed document, so objects and arrays come back as
//! compact JSON rather than their source text (`{"a": 1}` becomes `{"a":1}`),
//! and when an object repeats a key the last occurrence is the one resolved.

use serde_json::Value;
use std::fmt;

/// A value found at a property path.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue(Value);

impl PropertyValue {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// String form of the value: raw text for strings, literal text for
    /// scalars, empty for null and compact JSON for objects and arrays.
    pub fn to_secret_string(&self) -> String {
        match &self.0 {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self.0 {
            Value::String(s) => s.into_bytes(),
            _ => self.to_secret_string().into_bytes(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_secret_string())
    }
}

/// Resolve `path` against a JSON payload.
///
/// Returns `None` when the payload is not JSON or nothing exists at the path.
pub fn resolve(payload: &[u8], path: &str) -> Option<PropertyValue> {
    let document: Value = serde_json::from_slice(payload).ok()?;
    resolve_value(&document, path)
}

/// Resolve `path` against an already parsed document.
pub fn resolve_value(document: &Value, path: &str) -> Option<PropertyValue> {
    if path.contains('.') {
        let literal = parse_path(&path.replace('.', "\\."));
        if let Some(value) = lookup(document, &literal) {
            return Some(PropertyValue(value));
        }
    }
    lookup(document, &parse_path(path)).map(PropertyValue)
}

#[derive(Debug, Clone, PartialEq)]
struct Segment {
    key: String,
    /// Key contains unescaped `*` or `?`.
    wildcard: bool,
}

fn parse_path(path: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut key = String::new();
    let mut wildcard = false;
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    // Escaped wildcards are matched literally.
                    if matches!(escaped, '*' | '?') {
                        key.push('\\');
                    }
                    key.push(escaped);
                }
            }
            '.' => {
                segments.push(Segment {
                    key: std::mem::take(&mut key),
                    wildcard,
                });
                wildcard = false;
            }
            '*' | '?' => {
                wildcard = true;
                key.push(c);
            }
            _ => key.push(c),
        }
    }
    segments.push(Segment { key, wildcard });
    segments
}

fn lookup(value: &Value, segments: &[Segment]) -> Option<Value> {
    let Some((segment, rest)) = segments.split_first() else {
        return Some(value.clone());
    };

    match value {
        Value::Object(map) => {
            let child = if segment.wildcard {
                map.iter()
                    .find(|(name, _)| wildcard_match(&segment.key, name))
                    .map(|(_, child)| child)
            } else {
                map.get(&*unescape_wildcards(&segment.key))
            }?;
            lookup(child, rest)
        }
        Value::Array(items) if segment.key == "#" && !segment.wildcard => {
            if rest.is_empty() {
                return Some(Value::from(items.len()));
            }
            let collected = items.iter().filter_map(|item| lookup(item, rest)).collect();
            Some(Value::Array(collected))
        }
        Value::Array(items) => {
            let index: usize = segment.key.parse().ok()?;
            lookup(items.get(index)?, rest)
        }
        _ => None,
    }
}

fn unescape_wildcards(key: &str) -> std::borrow::Cow<'_, str> {
    if key.contains('\\') {
        std::borrow::Cow::Owned(key.replace("\\*", "*").replace("\\?", "?"))
    } else {
        std::borrow::Cow::Borrowed(key)
    }
}

/// Glob match supporting `*` (any run) and `?` (any one char); `\*` and `\?`
/// match literally.
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    tokens.push(Token::Literal(escaped));
                }
            }
            '*' => tokens.push(Token::Any),
            '?' => tokens.push(Token::One),
            c => tokens.push(Token::Literal(c)),
        }
    }
    let name: Vec<char> = name.chars().collect();
    glob(&tokens, &name)
}

#[derive(Debug, Clone, Copy)]
enum Token {
    Literal(char),
    One,
    Any,
}

/// Single pass match; on a mismatch, retry from the most recent `*` with one
/// more character consumed by it.
fn glob(tokens: &[Token], name: &[char]) -> bool {
    let (mut t, mut n) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while n < name.len() {
        match tokens.get(t) {
            Some(Token::Any) => {
                star = Some((t, n));
                t += 1;
            }
            Some(Token::One) => {
                t += 1;
                n += 1;
            }
            Some(Token::Literal(c)) if *c == name[n] => {
                t += 1;
                n += 1;
            }
            _ => match star {
                Some((star_t, star_n)) => {
                    star = Some((star_t, star_n + 1));
                    t = star_t + 1;
                    n = star_n + 1;
                }
                None => return false,
            },
        }
    }

    tokens[t..].iter().all(|token| matches!(token, Token::Any))
}
