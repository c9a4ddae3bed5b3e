//! Deterministic, reproducible exclusion of a fraction of a group
//!
//! Replaces random sampling so runs can be compared exactly. The behavior of
//! `exclude_entities` is frozen: existing outputs depend on it.

/// Sort score of the entity at `index` for a given year, always in `0..100`
pub fn exclusion_score(index: usize, year: i64) -> i64 {
    (index as i64 + year).rem_euclid(100)
}

/// Remove `trunc(n * fraction)` entities from `entities`.
///
/// Entities are stable-sorted by `(index + year) mod 100` and the first ones
/// in that order are dropped.
///
/// Intentional quirks:
/// - survivors come back in score order, *not* in input order;
/// - `fraction` and `year` are not validated. A negative product keeps only
///   the last `|k|` entities in score order, and a product above `n` keeps none.
pub fn exclude_entities<T>(entities: Vec<T>, fraction: f64, year: i64) -> Vec<T> {
    let n = entities.len();
    // `as` truncates towards zero and saturates, which also maps NaN to 0
    let to_exclude = (n as f64 * fraction) as i64;

    let mut scored: Vec<(i64, T)> = entities
        .into_iter()
        .enumerate()
        .map(|(i, entity)| (exclusion_score(i, year), entity))
        .collect();
    // `sort_by_key` is stable, equal scores keep their input order
    scored.sort_by_key(|(score, _)| *score);

    let skip = if to_exclude >= 0 {
        (to_exclude as usize).min(n)
    } else {
        n.saturating_sub(to_exclude.unsigned_abs() as usize)
    };

    scored.into_iter().skip(skip).map(|(_, entity)| entity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_excludes_exact_count() {
        for n in [0usize, 1, 2, 7, 10, 99, 100, 101, 250] {
            for p in [0.0, 0.01, 0.1, 0.25, 0.333, 0.5, 0.9, 1.0] {
                let k = (n as f64 * p).floor() as usize;
                let survivors = exclude_entities(ids(n), p, 2024);
                assert_eq!(survivors.len(), n - k, "n={} p={}", n, p);
            }
        }
    }

    #[test]
    fn test_is_deterministic() {
        let a = exclude_entities(ids(137), 0.3, 1987);
        let b = exclude_entities(ids(137), 0.3, 1987);
        assert_eq!(a, b);
    }

    #[test]
    fn test_survivor_order_follows_score() {
        let n = 150;
        let year = 2030;
        let survivors = exclude_entities(ids(n), 0.2, year);

        let mut expected = ids(n);
        expected.sort_by_key(|&i| (exclusion_score(i, year), i));
        let expected: Vec<usize> = expected.into_iter().skip(30).collect();

        assert_eq!(survivors, expected);
    }

    #[test]
    fn test_small_example() {
        // year 98: scores are 98, 99, 0, 1, 2
        let survivors = exclude_entities(vec!['a', 'b', 'c', 'd', 'e'], 0.4, 98);
        assert_eq!(survivors, vec!['e', 'a', 'b']);
    }

    #[test]
    fn test_order_not_restored_even_without_exclusion() {
        let survivors = exclude_entities(vec!['a', 'b', 'c'], 0.0, 99);
        assert_eq!(survivors, vec!['b', 'c', 'a']);
    }

    #[test]
    fn test_ties_keep_input_order() {
        // indices 0 and 100 share score 0, 1 and 101 share score 1
        let survivors = exclude_entities(ids(102), 0.0, 0);
        assert_eq!(&survivors[..4], &[0, 100, 1, 101]);
    }

    #[test]
    fn test_negative_year_uses_positive_scores() {
        assert_eq!(exclusion_score(0, -1), 99);
        assert_eq!(exclusion_score(3, -205), 98);

        let survivors = exclude_entities(vec!['a', 'b', 'c'], 0.34, -1);
        // scores 99, 0, 1 -> sorted b, c, a; one excluded
        assert_eq!(survivors, vec!['c', 'a']);
    }

    #[test]
    fn test_out_of_range_fractions() {
        assert!(exclude_entities(ids(10), 1.5, 0).is_empty());
        // negative count keeps the last two in score order
        assert_eq!(exclude_entities(ids(10), -0.2, 0), vec![8, 9]);
    }
}
