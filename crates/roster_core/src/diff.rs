use std::collections::HashSet;

use crate::User;

/// One structural edit against a list rendered from the previous snapshot.
///
/// A full script is ordered so it stays valid against a live structure:
/// removals first (highest index first), then insertions (lowest index
/// first), then in-place updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Remove { index: usize },
    Insert { index: usize, user: User },
    Update { index: usize, user: User },
}

/// Computes the edit script turning `old` into `new`.
///
/// Records are matched by identity (`id`); a longest common subsequence over
/// the identity keys picks the anchors that stay in place. Anchors that are
/// not content-equal become `Update` ops at their new index. A record whose
/// identity persists but falls outside the common subsequence (a move) is
/// expressed as a remove/insert pair. Ids must be unique within each
/// sequence; duplicates trip a debug assertion and otherwise resolve through
/// the deterministic greedy alignment below.
pub fn diff(old: &[User], new: &[User]) -> Vec<EditOp> {
    debug_assert!(ids_unique(old), "duplicate ids in old sequence");
    debug_assert!(ids_unique(new), "duplicate ids in new sequence");

    let kept = lcs_by_id(old, new);
    let kept_old: HashSet<usize> = kept.iter().map(|&(o, _)| o).collect();
    let kept_new: HashSet<usize> = kept.iter().map(|&(_, n)| n).collect();

    let mut script = Vec::new();
    for index in (0..old.len()).rev() {
        if !kept_old.contains(&index) {
            script.push(EditOp::Remove { index });
        }
    }
    for (index, user) in new.iter().enumerate() {
        if !kept_new.contains(&index) {
            script.push(EditOp::Insert {
                index,
                user: user.clone(),
            });
        }
    }
    for &(o, n) in &kept {
        if !old[o].content_eq(&new[n]) {
            script.push(EditOp::Update {
                index: n,
                user: new[n].clone(),
            });
        }
    }
    script
}

/// Applies a script produced by [`diff`] to a copy of `old`, mirroring the
/// incremental application a view performs. The result equals the `new`
/// sequence the script was computed against.
pub fn apply_edits(old: &[User], script: &[EditOp]) -> Vec<User> {
    let mut result = old.to_vec();
    for op in script {
        match op {
            EditOp::Remove { index } => {
                result.remove(*index);
            }
            EditOp::Insert { index, user } => result.insert(*index, user.clone()),
            EditOp::Update { index, user } => result[*index] = user.clone(),
        }
    }
    result
}

fn ids_unique(seq: &[User]) -> bool {
    let mut seen = HashSet::new();
    seq.iter().all(|user| seen.insert(user.id))
}

/// Longest common subsequence over identity keys, returned as matched
/// (old index, new index) pairs in ascending order.
fn lcs_by_id(old: &[User], new: &[User]) -> Vec<(usize, usize)> {
    let rows = old.len();
    let cols = new.len();
    // table[o][n] = LCS length of old[o..] and new[n..], flattened.
    let mut table = vec![0usize; (rows + 1) * (cols + 1)];
    let at = |o: usize, n: usize| o * (cols + 1) + n;

    for o in (0..rows).rev() {
        for n in (0..cols).rev() {
            table[at(o, n)] = if old[o].same_identity(&new[n]) {
                table[at(o + 1, n + 1)] + 1
            } else {
                table[at(o + 1, n)].max(table[at(o, n + 1)])
            };
        }
    }

    let mut pairs = Vec::with_capacity(table[at(0, 0)]);
    let (mut o, mut n) = (0, 0);
    while o < rows && n < cols {
        if old[o].same_identity(&new[n]) {
            pairs.push((o, n));
            o += 1;
            n += 1;
        } else if table[at(o + 1, n)] >= table[at(o, n + 1)] {
            o += 1;
        } else {
            n += 1;
        }
    }
    pairs
}
