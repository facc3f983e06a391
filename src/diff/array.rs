//! Array diffing with the Index-Shift Ledger.
//!
//! Arrays are aligned by their longest common subsequence (strict value
//! equality). The runs of unmatched elements between consecutive matches
//! ("gaps") are diffed positionally; any length difference within a gap
//! becomes real `remove`/`add` operations, translated from original to
//! effective indices by a running shift.

use super::{diff_values, RawOp};
use jsonptr::Pointer;
use serde_json::Value;

/// Longest common subsequence alignment, by strict equality, returned as
/// matched `(src_index, dst_index)` pairs in increasing order.
fn lcs_pairs(src: &[Value], dst: &[Value]) -> Vec<(usize, usize)> {
    let n = src.len();
    let m = dst.len();
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i][j] = if src[i] == dst[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut pairs = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if src[i] == dst[j] {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}

pub(crate) fn diff_array(src: &[Value], dst: &[Value], path: &mut Pointer, ops: &mut Vec<RawOp>) {
    let pairs = lcs_pairs(src, dst);
    let mut shift: i64 = 0;
    let (mut si, mut di) = (0usize, 0usize);

    for (mi, mj) in pairs.into_iter().chain(std::iter::once((src.len(), dst.len())))
    {
        process_gap(&src[si..mi], &dst[di..mj], si, &mut shift, path, ops);
        si = mi + 1;
        di = mj + 1;
    }
}

fn process_gap(
    src_gap: &[Value],
    dst_gap: &[Value],
    src_start: usize,
    shift: &mut i64,
    path: &mut Pointer,
    ops: &mut Vec<RawOp>,
) {
    let overlap = src_gap.len().min(dst_gap.len());
    for k in 0..overlap {
        let a = &src_gap[k];
        let b = &dst_gap[k];
        if a == b {
            continue;
        }
        let eff = (src_start as i64 + k as i64 + *shift) as usize;
        if is_same_container_kind(a, b) {
            path.push_back(eff.into());
            diff_values(a, b, path, ops);
            path.pop_back();
        } else {
            path.push_back(eff.into());
            ops.push(RawOp::Remove {
                path: path.clone(),
                value: a.clone(),
            });
            ops.push(RawOp::Add {
                path: path.clone(),
                value: b.clone(),
            });
            path.pop_back();
        }
    }

    if src_gap.len() > overlap {
        // Excess source elements: remove the "current end" repeatedly, since
        // each removal shifts the remaining tail down into the same slot.
        let base = src_start + overlap;
        let eff = (base as i64 + *shift) as usize;
        for value in &src_gap[overlap..] {
            path.push_back(eff.into());
            ops.push(RawOp::Remove {
                path: path.clone(),
                value: value.clone(),
            });
            path.pop_back();
            *shift -= 1;
        }
    } else if dst_gap.len() > overlap {
        let base = src_start + overlap;
        for value in &dst_gap[overlap..] {
            let eff = (base as i64 + *shift) as usize;
            path.push_back(eff.into());
            ops.push(RawOp::Add {
                path: path.clone(),
                value: value.clone(),
            });
            path.pop_back();
            *shift += 1;
        }
    }
}

fn is_same_container_kind(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::Object(_), Value::Object(_)) | (Value::Array(_), Value::Array(_))
    )
}
