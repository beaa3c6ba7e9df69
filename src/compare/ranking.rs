//! Ordering helpers for ranking tables.

use std::cmp::Ordering;

use crate::domain::DifferenceResultRow;

/// Row indices ordered best-first by `algorithm_id`.
///
/// Rows without that score, or with a NaN score, sort last (in input order).
/// Sentinel scores are not filtered; callers decide how to present them.
pub fn rank_rows(rows: &[DifferenceResultRow], algorithm_id: &str, higher_is_better: bool) -> Vec<usize> {
    let key = |i: usize| rows[i].score(algorithm_id).filter(|v| !v.is_nan());

    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| match (key(a), key(b)) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if higher_is_better { ord.reverse() } else { ord }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn row(id: i64, score: Option<f64>) -> DifferenceResultRow {
        let mut scores = BTreeMap::new();
        if let Some(s) = score {
            scores.insert("m".to_string(), s);
        }
        DifferenceResultRow {
            sample_id: id,
            sample_name: format!("r{id}"),
            scores,
        }
    }

    #[test]
    fn lower_is_better_ordering() {
        let rows = vec![row(1, Some(0.5)), row(2, Some(0.1)), row(3, None), row(4, Some(0.3))];
        assert_eq!(rank_rows(&rows, "m", false), vec![1, 3, 0, 2]);
    }

    #[test]
    fn higher_is_better_ordering_puts_nan_last() {
        let rows = vec![row(1, Some(f64::NAN)), row(2, Some(-0.2)), row(3, Some(0.9))];
        assert_eq!(rank_rows(&rows, "m", true), vec![2, 1, 0]);
    }
}
