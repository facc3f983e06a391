//! A [JSON Patch (RFC 6902)](https://tools.ietf.org/html/rfc6902) and
//! [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901) implementation
//! for Rust, including a diff synthesizer that produces a compact patch
//! between two documents.
//!
//! # Usage
//!
//! Add this to your *Cargo.toml*:
//! ```toml
//! [dependencies]
//! json-patch = "*"
//! ```
//!
//! # Examples
//! Create and apply a JSON Patch:
//!
//! ```rust
//! use json_patch::patch;
//! use serde_json::{from_str, json};
//!
//! let mut doc = json!([
//!     { "name": "Andrew" },
//!     { "name": "Maxim" }
//! ]);
//!
//! let p = from_str(r#"[
//!   { "op": "test", "path": "/0/name", "value": "Andrew" },
//!   { "op": "add", "path": "/0/happy", "value": true }
//! ]"#).unwrap();
//!
//! patch(&mut doc, &p).unwrap();
//! assert_eq!(doc, json!([
//!   { "name": "Andrew", "happy": true },
//!   { "name": "Maxim" }
//! ]));
//! ```
//!
//! Synthesize a patch between two documents:
//!
//! ```rust
//! use json_patch::diff;
//! use serde_json::json;
//!
//! let src = json!({ "title": "Goodbye!" });
//! let dst = json!({ "title": "Hello!" });
//!
//! let p = diff(&src, &dst);
//! assert_eq!(p.to_string(), r#"[{"op":"replace","path":"/title","value":"Hello!"}]"#);
//! ```
#![deny(warnings)]
#![warn(missing_docs)]

use jsonptr::Pointer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};

mod apply;
mod diff;
pub mod pointer;

pub use apply::{apply, patch, PatchError, PatchErrorKind};
pub use diff::diff;

/// Representation of a JSON Patch: an ordered list of patch operations.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Hash, Default)]
pub struct Patch(pub Vec<PatchOperation>);

impl Patch {
    /// Returns an iterator over the operations in this patch.
    pub fn iter(&self) -> std::slice::Iter<'_, PatchOperation> {
        self.0.iter()
    }

    /// Returns the number of operations in this patch.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if this patch has no operations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Patch {
    type Item = PatchOperation;
    type IntoIter = std::vec::IntoIter<PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a PatchOperation;
    type IntoIter = std::slice::Iter<'a, PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// JSON Patch 'add' operation representation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddOperation {
    /// JSON Pointer ([RFC 6901](https://tools.ietf.org/html/rfc6901)) that references a location
    /// within the target document where the operation is performed.
    pub path: Pointer,
    /// Value to add to the target location.
    pub value: Value,
}

/// JSON Patch 'remove' operation representation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RemoveOperation {
    /// JSON Pointer ([RFC 6901](https://tools.ietf.org/html/rfc6901)) that references a location
    /// within the target document where the operation is performed.
    pub path: Pointer,
}

/// JSON Patch 'replace' operation representation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReplaceOperation {
    /// JSON Pointer ([RFC 6901](https://tools.ietf.org/html/rfc6901)) that references a location
    /// within the target document where the operation is performed.
    pub path: Pointer,
    /// Value to replace with.
    pub value: Value,
}

/// JSON Patch 'move' operation representation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MoveOperation {
    /// JSON Pointer ([RFC 6901](https://tools.ietf.org/html/rfc6901)) that references the
    /// location to move the value from.
    pub from: Pointer,
    /// JSON Pointer ([RFC 6901](https://tools.ietf.org/html/rfc6901)) that references a location
    /// within the target document where the operation is performed.
    pub path: Pointer,
}

/// JSON Patch 'copy' operation representation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CopyOperation {
    /// JSON Pointer ([RFC 6901](https://tools.ietf.org/html/rfc6901)) that references the
    /// location to copy the value from.
    pub from: Pointer,
    /// JSON Pointer ([RFC 6901](https://tools.ietf.org/html/rfc6901)) that references a location
    /// within the target document where the operation is performed.
    pub path: Pointer,
}

/// JSON Patch 'test' operation representation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TestOperation {
    /// JSON Pointer ([RFC 6901](https://tools.ietf.org/html/rfc6901)) that references a location
    /// within the target document where the operation is performed.
    pub path: Pointer,
    /// Value to test against.
    pub value: Value,
}

/// A single JSON Patch operation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "op")]
#[serde(rename_all = "lowercase")]
pub enum PatchOperation {
    /// 'add' operation
    Add(AddOperation),
    /// 'remove' operation
    Remove(RemoveOperation),
    /// 'replace' operation
    Replace(ReplaceOperation),
    /// 'move' operation
    Move(MoveOperation),
    /// 'copy' operation
    Copy(CopyOperation),
    /// 'test' operation
    Test(TestOperation),
}

/// Hashes a `Value` payload by its canonical (compact, key-order-preserving)
/// string encoding, since `serde_json::Value` has no `Hash` impl of its own.
fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    serde_json::to_string(value)
        .expect("Value always serializes")
        .hash(state);
}

impl Hash for PatchOperation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            PatchOperation::Add(op) => {
                0u8.hash(state);
                op.path.hash(state);
                hash_value(&op.value, state);
            }
            PatchOperation::Remove(op) => {
                1u8.hash(state);
                op.path.hash(state);
            }
            PatchOperation::Replace(op) => {
                2u8.hash(state);
                op.path.hash(state);
                hash_value(&op.value, state);
            }
            PatchOperation::Move(op) => {
                3u8.hash(state);
                op.from.hash(state);
                op.path.hash(state);
            }
            PatchOperation::Copy(op) => {
                4u8.hash(state);
                op.from.hash(state);
                op.path.hash(state);
            }
            PatchOperation::Test(op) => {
                5u8.hash(state);
                op.path.hash(state);
                hash_value(&op.value, state);
            }
        }
    }
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_as_json(self, f)
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_as_json(self, f)
    }
}

fn display_as_json(value: &impl Serialize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if f.alternate() {
        f.write_str(&serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?)
    } else {
        f.write_str(&serde_json::to_string(value).map_err(|_| fmt::Error)?)
    }
}

/// Parses a JSON Patch from a `serde_json::Value`.
///
/// # Examples
///
/// ```rust
/// use json_patch::{from_value, Patch};
/// use serde_json::json;
///
/// let patch_value = json!([
///   { "op": "test", "path": "/0/name", "value": "Andrew" },
///   { "op": "add", "path": "/0/happy", "value": true }
/// ]);
/// let patch: Patch = from_value(patch_value).unwrap();
/// ```
pub fn from_value(value: Value) -> Result<Patch, serde_json::Error> {
    serde_json::from_value(value)
}
