//! Drag-style rearrangement of the current page.

use std::collections::HashMap;

use crate::types::Recipe;

/// How a move gesture rearranges the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MovePolicy {
    /// Remove the moved record and insert it at the destination, shifting
    /// everything in between by one.
    #[default]
    Shift,
    /// Exchange exactly the two records.
    Swap,
}

impl MovePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovePolicy::Shift => "shift",
            MovePolicy::Swap => "swap",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shift" => Some(MovePolicy::Shift),
            "swap" => Some(MovePolicy::Swap),
            _ => None,
        }
    }
}

/// Rearrange the page in place. Returns false when the gesture is a no-op:
/// same source and destination, or an index out of bounds.
pub fn apply_move(page: &mut Vec<Recipe>, from: usize, to: usize, policy: MovePolicy) -> bool {
    if from == to || from >= page.len() || to >= page.len() {
        return false;
    }
    match policy {
        MovePolicy::Shift => {
            let moved = page.remove(from);
            page.insert(to, moved);
        }
        MovePolicy::Swap => page.swap(from, to),
    }
    true
}

/// Renumber every record on the page: dense, 1-based, offset by the pages
/// before it.
pub fn renumber(page: &mut [Recipe], page_offset: u64) {
    for (position, recipe) in page.iter_mut().enumerate() {
        recipe.order = page_offset as i64 + position as i64 + 1;
    }
}

/// Ids whose order changed between the two snapshots, in `after` order.
pub fn changed_orders(before: &[Recipe], after: &[Recipe]) -> Vec<(String, i64)> {
    let previous: HashMap<&str, i64> = before.iter().map(|r| (r.id.as_str(), r.order)).collect();
    after
        .iter()
        .filter(|r| previous.get(r.id.as_str()) != Some(&r.order))
        .map(|r| (r.id.clone(), r.order))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn recipe(id: &str, order: i64) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            tags: Vec::new(),
            difficulty: Difficulty::Easy,
            last_updated: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            order,
        }
    }

    fn page() -> Vec<Recipe> {
        vec![
            recipe("a", 1),
            recipe("b", 2),
            recipe("c", 3),
            recipe("d", 4),
        ]
    }

    fn ids(page: &[Recipe]) -> Vec<&str> {
        page.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_shift_moves_and_shifts_between() {
        let mut p = page();
        assert!(apply_move(&mut p, 0, 2, MovePolicy::Shift));
        assert_eq!(ids(&p), vec!["b", "c", "a", "d"]);

        let mut p = page();
        assert!(apply_move(&mut p, 3, 1, MovePolicy::Shift));
        assert_eq!(ids(&p), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_swap_exchanges_exactly_two() {
        let mut p = page();
        assert!(apply_move(&mut p, 0, 2, MovePolicy::Swap));
        assert_eq!(ids(&p), vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn test_move_preserves_the_id_multiset() {
        for from in 0..4 {
            for to in 0..4 {
                for policy in [MovePolicy::Shift, MovePolicy::Swap] {
                    let mut p = page();
                    apply_move(&mut p, from, to, policy);
                    let set: BTreeSet<&str> = ids(&p).into_iter().collect();
                    assert_eq!(set.len(), 4);
                    if from != to {
                        assert_eq!(p[to].id, page()[from].id);
                    }
                }
            }
        }
    }

    #[test]
    fn test_noop_gestures_return_false() {
        let mut p = page();
        assert!(!apply_move(&mut p, 1, 1, MovePolicy::Shift));
        assert!(!apply_move(&mut p, 9, 0, MovePolicy::Shift));
        assert!(!apply_move(&mut p, 0, 9, MovePolicy::Swap));
        assert_eq!(ids(&p), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_renumber_is_dense_and_page_offset() {
        let mut p = page();
        renumber(&mut p, 5);
        let orders: Vec<i64> = p.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_changed_orders_reports_only_diffs() {
        let before = page();
        let mut after = page();
        apply_move(&mut after, 0, 2, MovePolicy::Shift);
        renumber(&mut after, 0);
        // b and c shift up, a lands at position 3; d never moves.
        assert_eq!(
            changed_orders(&before, &after),
            vec![
                ("b".to_string(), 1),
                ("c".to_string(), 2),
                ("a".to_string(), 3),
            ]
        );
    }
}
