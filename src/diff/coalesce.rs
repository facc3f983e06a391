//! The Coalescer: rewrites adjacent `remove`/`add` pairs raised by the array
//! and object diffing passes into a single `replace` or `move`, when that is
//! provably equivalent.

use super::RawOp;
use crate::{AddOperation, MoveOperation, PatchOperation, RemoveOperation, ReplaceOperation};
use jsonptr::Pointer;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Add,
    Remove,
    Replace,
    Move,
}

struct Entry {
    kind: Kind,
    path: Pointer,
    value: Value,
    from: Option<Pointer>,
}

/// Scalar values participate in move-detection; containers do not (equality
/// by identity isn't available, and structural equality of large containers
/// is expensive and ambiguous).
fn value_key(value: &Value) -> Option<String> {
    if value.is_object() || value.is_array() {
        None
    } else {
        Some(serde_json::to_string(value).expect("Value always serializes"))
    }
}

/// Decrements the trailing array index of `path` by one, to account for an
/// earlier `add` at the same array having shifted it. Paths whose trailing
/// token isn't a plain array index (e.g. an object key) are left unchanged;
/// the diff's fallback-verify guard catches the (rare) case where that
/// leaves a wrong guess in place.
fn decrement_trailing_index(path: &Pointer) -> Pointer {
    let mut path = path.clone();
    let Some(last) = path.pop_back() else {
        return path;
    };
    match last.decoded().parse::<usize>() {
        Ok(n) if n > 0 => {
            path.push_back((n - 1).into());
            path
        }
        _ => {
            path.push_back(last);
            path
        }
    }
}

pub(crate) fn coalesce(raw: &[RawOp]) -> Vec<PatchOperation> {
    let mut out: Vec<Entry> = Vec::new();
    let mut by_path: HashMap<String, usize> = HashMap::new();
    let mut by_value: HashMap<String, usize> = HashMap::new();

    for op in raw {
        let (kind, path, value) = match op {
            RawOp::Add { path, value } => (Kind::Add, path.clone(), value.clone()),
            RawOp::Remove { path, value } => (Kind::Remove, path.clone(), value.clone()),
            RawOp::Replace { path, value } => {
                out.push(Entry {
                    kind: Kind::Replace,
                    path: path.clone(),
                    value: value.clone(),
                    from: None,
                });
                continue;
            }
        };

        if let Some(&idx) = by_path.get(path.as_str()) {
            if out[idx].kind == Kind::Remove && kind == Kind::Add {
                forget(&mut by_path, &mut by_value, &out[idx]);
                out[idx] = Entry {
                    kind: Kind::Replace,
                    path: path.clone(),
                    value: value.clone(),
                    from: None,
                };
                continue;
            }
        }

        if let Some(key) = value_key(&value) {
            if let Some(&idx) = by_value.get(&key) {
                let prev_kind = out[idx].kind;
                if prev_kind == Kind::Remove && kind == Kind::Add {
                    let from = out[idx].path.clone();
                    forget(&mut by_path, &mut by_value, &out[idx]);
                    out[idx] = Entry {
                        kind: Kind::Move,
                        path: path.clone(),
                        value: Value::Null,
                        from: Some(from),
                    };
                    continue;
                }
                if prev_kind == Kind::Add && kind == Kind::Remove {
                    let from = decrement_trailing_index(&path);
                    let move_path = out[idx].path.clone();
                    forget(&mut by_path, &mut by_value, &out[idx]);
                    out[idx] = Entry {
                        kind: Kind::Move,
                        path: move_path,
                        value: Value::Null,
                        from: Some(from),
                    };
                    continue;
                }
            }
        }

        let idx = out.len();
        by_path.insert(path.to_string(), idx);
        if let Some(key) = value_key(&value) {
            by_value.insert(key, idx);
        }
        out.push(Entry {
            kind,
            path,
            value,
            from: None,
        });
    }

    out.into_iter().map(to_operation).collect()
}

fn forget(by_path: &mut HashMap<String, usize>, by_value: &mut HashMap<String, usize>, entry: &Entry) {
    by_path.remove(entry.path.as_str());
    if let Some(key) = value_key(&entry.value) {
        by_value.remove(&key);
    }
}

fn to_operation(entry: Entry) -> PatchOperation {
    match entry.kind {
        Kind::Add => PatchOperation::Add(AddOperation {
            path: entry.path,
            value: entry.value,
        }),
        Kind::Remove => PatchOperation::Remove(RemoveOperation { path: entry.path }),
        Kind::Replace => PatchOperation::Replace(ReplaceOperation {
            path: entry.path,
            value: entry.value,
        }),
        Kind::Move => PatchOperation::Move(MoveOperation {
            from: entry.from.expect("move entries always carry a from"),
            path: entry.path,
        }),
    }
}
