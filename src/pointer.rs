//! Thin adapter over [`jsonptr`], exposing the subset of RFC 6901 pointer
//! operations the applier and diff synthesizer need.

use jsonptr::{Pointer, Token};
use serde_json::Value;

pub use jsonptr::Error as ResolveError;
pub use jsonptr::MalformedPointerError as ParseError;

/// Parses a `&str` into a [`Pointer`], per RFC 6901 (`~0`/`~1` escaping,
/// leading `/`, empty string means root).
pub fn parse(s: &str) -> Result<Pointer, ParseError> {
    Pointer::parse(s)
}

/// Returns the decoded tokens of a pointer, in order.
pub fn parts(ptr: &Pointer) -> Vec<String> {
    ptr.tokens().map(|t| t.decoded().to_owned()).collect()
}

/// Builds a pointer from a sequence of raw (unescaped) tokens.
pub fn from_parts<I, S>(parts: I) -> Pointer
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<Token> = parts.into_iter().map(|s| Token::new(s.as_ref())).collect();
    Pointer::new(tokens)
}

/// Renders a pointer back to its RFC 6901 string form (`~0`/`~1` escaping,
/// leading `/`).
pub fn to_string(ptr: &Pointer) -> String {
    ptr.to_string()
}

/// Resolves a pointer against a document, returning a reference to the
/// addressed value.
pub fn resolve<'v>(ptr: &Pointer, value: &'v Value) -> Result<&'v Value, ResolveError> {
    ptr.resolve(value)
}

/// Splits a pointer into its parent (resolved, mutable) and its final raw
/// token, which the caller uses to index into the parent. Returns `None` if
/// the pointer is root (it has no parent).
pub fn to_last<'v>(
    ptr: &Pointer,
    value: &'v mut Value,
) -> Result<Option<(&'v mut Value, Token)>, ResolveError> {
    let Some(last) = ptr.last() else {
        return Ok(None);
    };
    let mut parent = ptr.clone();
    parent.pop_back();
    let parent_value = parent.resolve_mut(value)?;
    Ok(Some((parent_value, last)))
}

/// Returns true if `ancestor` is a prefix of (or equal to) `descendant`.
pub fn contains(ancestor: &Pointer, descendant: &Pointer) -> bool {
    let a = ancestor.tokens().collect::<Vec<_>>();
    let d = descendant.tokens().collect::<Vec<_>>();
    if a.len() > d.len() {
        return false;
    }
    a.iter().zip(d.iter()).all(|(x, y)| x.decoded() == y.decoded())
}
