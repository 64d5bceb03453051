//! Dense-ordinal helpers shared by the group and label modules.
//!
//! Active siblings always hold ordinals 1..N with no gaps or duplicates. The
//! helpers here are pure; the callers apply the results inside a single store
//! transaction so delete-then-renumber and swap-then-save never interleave
//! with a competing writer.

/// Ordinal for a row appended after the given active siblings.
///
/// Returns 1 for an empty sibling set.
#[must_use]
pub fn next_position(existing: &[i32]) -> i32 {
    existing.iter().copied().max().unwrap_or(0) + 1
}

/// Re-packs sibling ordinals to 1..N, preserving their current order.
///
/// Input is `(id, sort_order)` pairs sorted by `sort_order`; output lists only
/// the rows whose ordinal actually changes.
#[must_use]
pub fn compact(siblings: &[(i64, i32)]) -> Vec<(i64, i32)> {
    siblings
        .iter()
        .zip(1..)
        .filter(|((_, current), wanted)| current != wanted)
        .map(|((id, _), wanted)| (*id, wanted))
        .collect()
}

/// The active sibling immediately above the given ordinal, if any.
#[must_use]
pub fn neighbor_above(siblings: &[(i64, i32)], position: i32) -> Option<(i64, i32)> {
    siblings
        .iter()
        .filter(|(_, p)| *p < position)
        .max_by_key(|(_, p)| *p)
        .copied()
}

/// The active sibling immediately below the given ordinal, if any.
#[must_use]
pub fn neighbor_below(siblings: &[(i64, i32)], position: i32) -> Option<(i64, i32)> {
    siblings
        .iter()
        .filter(|(_, p)| *p > position)
        .min_by_key(|(_, p)| *p)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_position_empty_set() {
        assert_eq!(next_position(&[]), 1);
    }

    #[test]
    fn test_next_position_appends_after_max() {
        assert_eq!(next_position(&[1, 2, 3]), 4);
        // Gaps do not matter, only the max does
        assert_eq!(next_position(&[2, 5]), 6);
    }

    #[test]
    fn test_compact_closes_gaps() {
        let siblings = [(10, 1), (11, 3), (12, 7)];
        assert_eq!(compact(&siblings), vec![(11, 2), (12, 3)]);
    }

    #[test]
    fn test_compact_already_dense_is_noop() {
        let siblings = [(10, 1), (11, 2), (12, 3)];
        assert!(compact(&siblings).is_empty());
    }

    #[test]
    fn test_neighbors_at_edges() {
        let siblings = [(10, 1), (11, 2), (12, 3)];
        assert_eq!(neighbor_above(&siblings, 1), None);
        assert_eq!(neighbor_below(&siblings, 3), None);
        assert_eq!(neighbor_above(&siblings, 3), Some((11, 2)));
        assert_eq!(neighbor_below(&siblings, 1), Some((11, 2)));
    }
}
