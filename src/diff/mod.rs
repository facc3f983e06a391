//! The Diff Synthesizer: compares two JSON values and produces a compact
//! JSON Patch transforming one into the other.

mod array;
mod coalesce;

use crate::{AddOperation, Patch, PatchOperation, RemoveOperation, ReplaceOperation};
use jsonptr::Pointer;
use serde_json::{Map, Value};

/// An emitted operation, still carrying bookkeeping the public
/// [`PatchOperation`] model has no field for (the value a `remove` deleted,
/// kept around only so the coalescer can detect `move`s).
pub(crate) enum RawOp {
    Add { path: Pointer, value: Value },
    Remove { path: Pointer, value: Value },
    Replace { path: Pointer, value: Value },
}

impl RawOp {
    fn to_operation(&self) -> PatchOperation {
        match self {
            RawOp::Add { path, value } => PatchOperation::Add(AddOperation {
                path: path.clone(),
                value: value.clone(),
            }),
            RawOp::Remove { path, .. } => PatchOperation::Remove(RemoveOperation {
                path: path.clone(),
            }),
            RawOp::Replace { path, value } => PatchOperation::Replace(ReplaceOperation {
                path: path.clone(),
                value: value.clone(),
            }),
        }
    }
}

/// Synthesizes a JSON Patch transforming `src` into `dst`, such that
/// `apply(src, diff(src, dst)) == dst`.
///
/// The patch favors compactness (coalescing adjacent `remove`/`add` pairs
/// into `replace` or `move`) but never at the cost of correctness: if
/// coalescing would produce a patch that does not round-trip to `dst`, the
/// uncoalesced (always-correct) patch is returned instead.
pub fn diff(src: &Value, dst: &Value) -> Patch {
    let mut raw = Vec::new();
    diff_values(src, dst, &mut Pointer::root(), &mut raw);

    let coalesced = Patch(coalesce::coalesce(&raw));
    match crate::apply::apply(src, &coalesced) {
        Ok(result) if &result == dst => coalesced,
        _ => Patch(raw.iter().map(RawOp::to_operation).collect()),
    }
}

pub(crate) fn diff_values(src: &Value, dst: &Value, path: &mut Pointer, ops: &mut Vec<RawOp>) {
    if src == dst {
        return;
    }
    match (src, dst) {
        (Value::Object(a), Value::Object(b)) => diff_object(a, b, path, ops),
        (Value::Array(a), Value::Array(b)) => array::diff_array(a, b, path, ops),
        _ => ops.push(RawOp::Replace {
            path: path.clone(),
            value: dst.clone(),
        }),
    }
}

fn diff_object(
    src: &Map<String, Value>,
    dst: &Map<String, Value>,
    path: &mut Pointer,
    ops: &mut Vec<RawOp>,
) {
    for (key, value) in src.iter() {
        if !dst.contains_key(key) {
            path.push_back(key.into());
            ops.push(RawOp::Remove {
                path: path.clone(),
                value: value.clone(),
            });
            path.pop_back();
        }
    }
    for (key, value) in dst.iter() {
        if !src.contains_key(key) {
            path.push_back(key.into());
            ops.push(RawOp::Add {
                path: path.clone(),
                value: value.clone(),
            });
            path.pop_back();
        }
    }
    for (key, src_value) in src.iter() {
        if let Some(dst_value) = dst.get(key) {
            path.push_back(key.into());
            diff_values(src_value, dst_value, path, ops);
            path.pop_back();
        }
    }
}
