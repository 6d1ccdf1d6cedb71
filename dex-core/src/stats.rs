//! Headline encounter statistics.

use std::collections::HashMap;

/// Snapshot of the statistics line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    /// Total encounters ever recorded.
    pub total: usize,

    /// Most frequently encountered name and its count.
    pub most_encountered: Option<(String, usize)>,

    /// Most frequent shiny name and its count.
    pub top_shiny: Option<(String, usize)>,
}

/// Most common item and its count; the earliest-seen item wins ties.
pub(crate) fn most_common<'a>(items: impl Iterator<Item = &'a str>) -> Option<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for item in items {
        let count = counts.entry(item).or_insert(0);
        if *count == 0 {
            order.push(item);
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for name in order {
        let count = counts[name];
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((name, count));
        }
    }
    best.map(|(name, count)| (name.to_string(), count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_winner() {
        assert_eq!(most_common(std::iter::empty()), None);
    }

    #[test]
    fn counts_and_picks_the_max() {
        let items = ["a", "b", "b", "c", "b"];
        assert_eq!(
            most_common(items.iter().copied()),
            Some(("b".to_string(), 3))
        );
    }

    #[test]
    fn earliest_seen_wins_ties() {
        let items = ["x", "y", "x", "y"];
        assert_eq!(
            most_common(items.iter().copied()),
            Some(("x".to_string(), 2))
        );
    }
}
