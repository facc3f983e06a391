//! The Patch Applier: executes a [`Patch`](crate::Patch) against a document.

use crate::pointer;
use crate::{Patch, PatchOperation};
use jsonptr::{IndexError, Pointer, Token};
use serde_json::Value;
use std::mem;
use thiserror::Error;

/// Category of failure raised while applying a patch.
#[derive(Debug, Error)]
pub enum PatchErrorKind {
    /// Structural problem with an operation record (missing/unknown `op`,
    /// missing required field). Most such problems are caught earlier, when
    /// parsing a patch into the strongly typed [`PatchOperation`] model, and
    /// surface as a [`serde_json::Error`] rather than this variant; it exists
    /// for the rare case where validity can only be checked once the
    /// document is known.
    #[error("invalid patch: {0}")]
    InvalidPatch(String),
    /// The operation cannot apply to the current state of the document
    /// (missing key, out-of-range index, move into own descendant, or a
    /// type mismatch between the operation and the document node it
    /// addresses).
    #[error("conflict: {0}")]
    Conflict(String),
    /// A `test` operation's resolved value did not match the expected
    /// value, or its pointer failed to resolve.
    #[error("test failed")]
    TestFailed,
    /// Propagated from the JSON Pointer collaborator: malformed pointer
    /// syntax, or a non-integer token used to index an array.
    #[error("pointer error: {0}")]
    Pointer(#[from] pointer::ResolveError),
}

/// Error produced while applying a [`Patch`], naming the offending
/// operation's position within the patch.
#[derive(Debug, Error)]
#[error("operation {index}: {kind}")]
pub struct PatchError {
    /// Index of the operation, within the patch, that failed.
    pub index: usize,
    /// Category of the failure.
    pub kind: PatchErrorKind,
}

/// Applies `ops` to `doc` in place. If any operation fails, earlier
/// operations are not reverted; callers who need atomicity should apply to a
/// clone (see [`apply`]).
pub fn patch(doc: &mut Value, ops: &Patch) -> Result<(), PatchError> {
    apply_ops(doc, &ops.0)
}

/// Applies `ops` to a deep clone of `doc`, returning the resulting document.
/// `doc` itself is never observably mutated.
pub fn apply(doc: &Value, ops: &Patch) -> Result<Value, PatchError> {
    let mut working = doc.clone();
    apply_ops(&mut working, &ops.0)?;
    Ok(working)
}

fn apply_ops(doc: &mut Value, ops: &[PatchOperation]) -> Result<(), PatchError> {
    for (index, op) in ops.iter().enumerate() {
        apply_one(doc, op).map_err(|kind| PatchError { index, kind })?;
    }
    Ok(())
}

fn apply_one(doc: &mut Value, op: &PatchOperation) -> Result<(), PatchErrorKind> {
    match op {
        PatchOperation::Add(op) => add(doc, &op.path, op.value.clone()),
        PatchOperation::Remove(op) => remove(doc, &op.path).map(drop),
        PatchOperation::Replace(op) => replace(doc, &op.path, op.value.clone()).map(drop),
        PatchOperation::Move(op) => mov(doc, &op.from, &op.path),
        PatchOperation::Copy(op) => copy(doc, &op.from, &op.path),
        PatchOperation::Test(op) => test(doc, &op.path, &op.value),
    }
}

fn resolve_parent<'v>(
    path: &Pointer,
    doc: &'v mut Value,
) -> Result<Option<(&'v mut Value, Token)>, PatchErrorKind> {
    pointer::to_last(path, doc).map_err(|e| PatchErrorKind::Conflict(format!("unresolvable path: {e}")))
}

/// Array index for `add`/`replace`-into-array-tail contexts: `-` and
/// `0..=len` are valid, negative numbers are a conflict, anything else
/// non-integer is a pointer-level error.
fn add_index(token: &Token, len: usize) -> Result<usize, PatchErrorKind> {
    let raw = token.decoded();
    if raw != "-" && raw.starts_with('-') {
        return Err(PatchErrorKind::Conflict(format!(
            "negative array index: {raw}"
        )));
    }
    token.as_index(len).map_err(|e| match e {
        IndexError::OutOfBounds(_) => {
            PatchErrorKind::Conflict(format!("index out of bounds: {raw}"))
        }
        other => PatchErrorKind::Pointer(other.into()),
    })
}

/// Array index for `remove`/`replace`-element contexts: `0..len`, `-` is not
/// a valid target (it addresses no existing element).
fn bounded_index(token: &Token, len: usize) -> Result<usize, PatchErrorKind> {
    let raw = token.decoded();
    if raw == "-" {
        return Err(PatchErrorKind::Conflict(
            "'-' does not address an existing element".into(),
        ));
    }
    if raw.starts_with('-') {
        return Err(PatchErrorKind::Conflict(format!(
            "negative array index: {raw}"
        )));
    }
    let idx = token.as_index(len).map_err(|e| match e {
        IndexError::OutOfBounds(_) => {
            PatchErrorKind::Conflict(format!("index out of bounds: {raw}"))
        }
        other => PatchErrorKind::Pointer(other.into()),
    })?;
    if idx >= len {
        return Err(PatchErrorKind::Conflict(format!(
            "index out of bounds: {idx}"
        )));
    }
    Ok(idx)
}

fn add(doc: &mut Value, path: &Pointer, value: Value) -> Result<(), PatchErrorKind> {
    if path.is_root() {
        *doc = value;
        return Ok(());
    }
    let Some((parent, last)) = resolve_parent(path, doc)? else {
        unreachable!("non-root path always has a parent")
    };
    match parent {
        Value::Object(map) => {
            map.insert(last.as_key().clone(), value);
        }
        Value::Array(arr) => {
            let idx = add_index(&last, arr.len())?;
            arr.insert(idx, value);
        }
        _ => return Err(PatchErrorKind::Conflict("parent is not a container".into())),
    }
    Ok(())
}

fn remove(doc: &mut Value, path: &Pointer) -> Result<Value, PatchErrorKind> {
    let Some((parent, last)) = resolve_parent(path, doc)? else {
        return Err(PatchErrorKind::Conflict(
            "cannot remove the document root".into(),
        ));
    };
    match parent {
        Value::Object(map) => map.remove(last.as_key()).ok_or_else(|| {
            PatchErrorKind::Conflict(format!("no such key: {}", last.decoded()))
        }),
        Value::Array(arr) => {
            let idx = bounded_index(&last, arr.len())?;
            Ok(arr.remove(idx))
        }
        _ => Err(PatchErrorKind::Conflict("parent is not a container".into())),
    }
}

fn replace(doc: &mut Value, path: &Pointer, value: Value) -> Result<Value, PatchErrorKind> {
    if path.is_root() {
        return Ok(mem::replace(doc, value));
    }
    let Some((parent, last)) = resolve_parent(path, doc)? else {
        unreachable!("non-root path always has a parent")
    };
    match parent {
        Value::Object(map) => {
            let entry = map.get_mut(last.as_key()).ok_or_else(|| {
                PatchErrorKind::Conflict(format!("no such key: {}", last.decoded()))
            })?;
            Ok(mem::replace(entry, value))
        }
        Value::Array(arr) => {
            let idx = bounded_index(&last, arr.len())?;
            Ok(mem::replace(&mut arr[idx], value))
        }
        _ => Err(PatchErrorKind::Conflict("parent is not a container".into())),
    }
}

fn mov(doc: &mut Value, from: &Pointer, path: &Pointer) -> Result<(), PatchErrorKind> {
    if from == path {
        return Ok(());
    }
    if pointer::contains(from, path) {
        return Err(PatchErrorKind::Conflict(
            "cannot move a value into its own descendant".into(),
        ));
    }
    let value = remove(doc, from)?;
    add(doc, path, value)
}

fn copy(doc: &mut Value, from: &Pointer, path: &Pointer) -> Result<(), PatchErrorKind> {
    let value = pointer::resolve(from, doc)
        .map_err(|_| PatchErrorKind::Conflict(format!("no such path: {from}")))?
        .clone();
    add(doc, path, value)
}

fn test(doc: &Value, path: &Pointer, expected: &Value) -> Result<(), PatchErrorKind> {
    match pointer::resolve(path, doc) {
        Ok(actual) if actual == expected => Ok(()),
        _ => Err(PatchErrorKind::TestFailed),
    }
}
