use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherBetter,
    LowerBetter,
}

/// A single comparable value pulled out of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValue<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
}

impl KeyValue<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyValue::Int(a), KeyValue::Int(b)) => a.cmp(b),
            (KeyValue::Float(a), KeyValue::Float(b)) => a.total_cmp(b),
            (KeyValue::Int(a), KeyValue::Float(b)) => (*a as f64).total_cmp(b),
            (KeyValue::Float(a), KeyValue::Int(b)) => a.total_cmp(&(*b as f64)),
            (KeyValue::Text(a), KeyValue::Text(b)) => a.cmp(b),
            // Mixed text/number keys never happen with a well-formed key list.
            (KeyValue::Text(_), _) => Ordering::Greater,
            (_, KeyValue::Text(_)) => Ordering::Less,
        }
    }
}

/// One level of a ranking comparator.
pub struct RankKey<T> {
    pub extract: fn(&T) -> KeyValue<'_>,
    pub direction: Direction,
}

impl<T> RankKey<T> {
    pub const fn desc(extract: fn(&T) -> KeyValue<'_>) -> Self {
        Self {
            extract,
            direction: Direction::HigherBetter,
        }
    }

    pub const fn asc(extract: fn(&T) -> KeyValue<'_>) -> Self {
        Self {
            extract,
            direction: Direction::LowerBetter,
        }
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        let ord = (self.extract)(a).compare(&(self.extract)(b));
        match self.direction {
            Direction::HigherBetter => ord.reverse(),
            Direction::LowerBetter => ord,
        }
    }
}

/// Ordering of two rows under a prioritised key list; earlier keys win.
pub fn compare_by_keys<T>(keys: &[RankKey<T>], a: &T, b: &T) -> Ordering {
    keys.iter()
        .map(|key| key.compare(a, b))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Row-number style positions (1-based, no gaps, no shared ranks) for every row,
/// restarted inside each partition. Result is indexed like `rows`.
pub fn rank_positions<T>(
    rows: &[T],
    partition: impl Fn(&T) -> &str,
    keys: &[RankKey<T>],
) -> Vec<u32> {
    rank_positions_where(rows, partition, keys, |_| true)
        .into_iter()
        .map(|pos| pos.unwrap_or(0))
        .collect()
}

/// Like [`rank_positions`] but only rows passing `eligible` are ranked; the rest get `None`.
pub fn rank_positions_where<T>(
    rows: &[T],
    partition: impl Fn(&T) -> &str,
    keys: &[RankKey<T>],
    eligible: impl Fn(&T) -> bool,
) -> Vec<Option<u32>> {
    let mut order: Vec<usize> = (0..rows.len()).filter(|&i| eligible(&rows[i])).collect();
    // Stable: rows tied on every key keep their input order.
    order.sort_by(|&a, &b| {
        partition(&rows[a])
            .cmp(partition(&rows[b]))
            .then_with(|| compare_by_keys(keys, &rows[a], &rows[b]))
    });

    let mut out = vec![None; rows.len()];
    let mut current: Option<&str> = None;
    let mut position = 0u32;
    for idx in order {
        let part = partition(&rows[idx]);
        if current != Some(part) {
            current = Some(part);
            position = 0;
        }
        position += 1;
        out[idx] = Some(position);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        league: &'static str,
        name: &'static str,
        points: i64,
        ratio: f64,
    }

    fn row(league: &'static str, name: &'static str, points: i64, ratio: f64) -> Row {
        Row {
            league,
            name,
            points,
            ratio,
        }
    }

    fn by_points(r: &Row) -> KeyValue<'_> {
        KeyValue::Int(r.points)
    }

    fn by_ratio(r: &Row) -> KeyValue<'_> {
        KeyValue::Float(r.ratio)
    }

    fn by_name(r: &Row) -> KeyValue<'_> {
        KeyValue::Text(r.name)
    }

    const KEYS: [RankKey<Row>; 3] = [
        RankKey::desc(by_points),
        RankKey::desc(by_ratio),
        RankKey::asc(by_name),
    ];

    #[test]
    fn earlier_keys_dominate_later_ones() {
        let rows = vec![
            row("L", "a", 3, 0.1),
            row("L", "b", 5, 0.0),
            row("L", "c", 3, 0.9),
        ];
        assert_eq!(rank_positions(&rows, |r| r.league, &KEYS), vec![3, 1, 2]);
    }

    #[test]
    fn positions_restart_per_partition() {
        let rows = vec![
            row("X", "a", 1, 0.0),
            row("Y", "b", 9, 0.0),
            row("X", "c", 4, 0.0),
            row("Y", "d", 2, 0.0),
        ];
        assert_eq!(rank_positions(&rows, |r| r.league, &KEYS), vec![2, 1, 1, 2]);
    }

    #[test]
    fn full_ties_still_get_distinct_positions() {
        let rows = vec![row("L", "same", 1, 1.0), row("L", "same", 1, 1.0)];
        let ranks = rank_positions(&rows, |r| r.league, &KEYS);
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn final_text_key_breaks_ties_independent_of_input_order() {
        let forward = vec![row("L", "alpha", 1, 1.0), row("L", "beta", 1, 1.0)];
        let reversed = vec![row("L", "beta", 1, 1.0), row("L", "alpha", 1, 1.0)];
        assert_eq!(rank_positions(&forward, |r| r.league, &KEYS), vec![1, 2]);
        assert_eq!(rank_positions(&reversed, |r| r.league, &KEYS), vec![2, 1]);
    }

    #[test]
    fn ineligible_rows_are_skipped_without_gaps() {
        let rows = vec![
            row("L", "a", 1, 3.0),
            row("L", "b", 0, 9.0),
            row("L", "c", 1, 1.0),
        ];
        let ranks = rank_positions_where(&rows, |r| r.league, &KEYS[1..], |r| r.points > 0);
        assert_eq!(ranks, vec![Some(1), None, Some(2)]);
    }
}
