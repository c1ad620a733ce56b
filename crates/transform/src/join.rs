//! Reusable equi-join over in-memory collections.
//!
//! The fact assembly joins on free-text fields, which is inherently fragile
//! (case, punctuation, shared names). Keeping the join generic over key
//! extractors isolates that fragility: a keyed lookup or fuzzy strategy can
//! replace the extractors without touching fact assembly.

use std::collections::HashMap;
use std::hash::Hash;

/// Left-outer equi-join of `left` against `right` on hashable optional keys.
///
/// - Left cardinality is preserved: a left row with no match yields one
///   `(left, None)` pair.
/// - A left row matching N right rows yields N pairs; duplicate right keys
///   duplicate output rows rather than being collapsed.
/// - A `None` key never matches anything, on either side (SQL null
///   semantics).
///
/// Output order follows the left side, with matches per left row in right
/// insertion order.
pub fn left_join_by<'a, L, R, K, LK, RK>(
    left: &'a [L],
    right: &'a [R],
    left_key: LK,
    right_key: RK,
) -> Vec<(&'a L, Option<&'a R>)>
where
    K: Hash + Eq,
    LK: Fn(&'a L) -> Option<K>,
    RK: Fn(&'a R) -> Option<K>,
{
    let mut index: HashMap<K, Vec<&R>> = HashMap::new();
    for row in right {
        if let Some(key) = right_key(row) {
            index.entry(key).or_default().push(row);
        }
    }

    let mut joined = Vec::with_capacity(left.len());
    for row in left {
        let matches = left_key(row).and_then(|key| index.get(&key));
        match matches {
            Some(rows) => joined.extend(rows.iter().map(|m| (row, Some(*m)))),
            None => joined.push((row, None)),
        }
    }
    joined
}
