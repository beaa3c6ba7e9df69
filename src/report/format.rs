//! Terminal formatting for algorithm lists, ranking tables and pick-best results.
//!
//! We keep formatting code in one place so:
//! - the comparison/math code stays clean and testable
//! - output changes are localized

use std::collections::BTreeMap;

use crate::domain::{Decision, DifferenceResultRow, PickBestResult};
use crate::metrics::{INVALID_SCORE, Strategy};

/// Format the `algorithm id -> display name` listing.
pub fn format_algorithms(algorithms: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<12} {}\n", "id", "name"));
    out.push_str(&format!("{:-<12} {:-<24}\n", "", ""));
    for (id, name) in algorithms {
        out.push_str(&format!("{id:<12} {name}\n"));
    }
    out
}

/// Format a ranking table in the given row order.
pub fn format_ranking(
    reference_name: &str,
    rows: &[DifferenceResultRow],
    order: &[usize],
    strategies: &[Strategy],
    sort_by: Strategy,
) -> String {
    let mut out = String::new();
    let direction = if sort_by.higher_is_better() { "higher" } else { "lower" };
    out.push_str(&format!(
        "Reference: {reference_name} | sorted by {} ({direction} is better)\n",
        sort_by.algorithm_id()
    ));

    let mut header = format!("{:>4} {:>6} {:<20}", "rank", "id", "sample");
    let mut rule = format!("{:->4} {:->6} {:-<20}", "", "", "");
    for s in strategies {
        header.push_str(&format!(" {:>12}", s.algorithm_id()));
        rule.push_str(&format!(" {:->12}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for (rank, &idx) in order.iter().enumerate() {
        let Some(row) = rows.get(idx) else {
            continue;
        };
        let mut line = format!("{:>4} {:>6} {:<20}", rank + 1, row.sample_id, truncate(&row.sample_name, 20));
        for s in strategies {
            line.push_str(&format!(" {:>12}", fmt_score(row.score(s.algorithm_id()), *s)));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Format a pick-best decision.
pub fn format_pick_best(names: [&str; 2], result: &PickBestResult) -> String {
    let mut out = String::new();

    if !result.is_decisive() {
        out.push_str("No decision possible: at least one replicate is empty.\n");
        return out;
    }

    let how = match result.decision {
        Decision::Quality => "lower quality score",
        Decision::LocalCorrelation => "tie broken by local correlation",
        Decision::Undecided => "undecided",
    };
    out.push_str(&format!(
        "Best replicate: {} (index {}, {how})\n",
        names[result.best_index], result.best_index
    ));
    out.push_str(&format!("Compared points: {}\n\n", result.n));

    out.push_str(&format!("{:<20} {:>14} {:>14} {:>14}\n", "replicate", "residual_rms", "stability", "quality"));
    out.push_str(&format!("{:-<20} {:->14} {:->14} {:->14}\n", "", "", "", ""));
    for i in 0..2 {
        let marker = if i == result.best_index { "*" } else { " " };
        out.push_str(&format!(
            "{marker}{:<19} {:>14.6} {:>14.6} {:>14.6}\n",
            truncate(names[i], 19),
            result.residual_rms[i],
            result.stability[i],
            result.quality[i]
        ));
    }

    out.push_str("\nConsistency (A as reference):\n");
    out.push_str(&format!("- nrmse    : {:.6}\n", result.nrmse));
    out.push_str(&format!("- pearson  : {:.6}\n", result.pearson));
    out.push_str(&format!("- euclidean: {:.6}\n", result.euclidean));

    out
}

fn fmt_score(score: Option<f64>, strategy: Strategy) -> String {
    match score {
        None => "-".to_string(),
        // -1 is a valid Pearson score, so only distance metrics get the marker.
        Some(v) if v == INVALID_SCORE && !strategy.higher_is_better() => "invalid".to_string(),
        Some(v) if v.is_finite() => format!("{v:.6}"),
        Some(_) => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str, nrmse: f64, pearson: f64) -> DifferenceResultRow {
        let mut scores = BTreeMap::new();
        scores.insert("nrmse".to_string(), nrmse);
        scores.insert("pearson".to_string(), pearson);
        DifferenceResultRow {
            sample_id: id,
            sample_name: name.to_string(),
            scores,
        }
    }

    #[test]
    fn ranking_table_follows_order_and_marks_invalid() {
        let rows = vec![row(1, "first", 0.5, 0.9), row(2, "second", -1.0, -1.0)];
        let table = format_ranking(
            "ref",
            &rows,
            &[1, 0],
            &[Strategy::Nrmse, Strategy::Pearson],
            Strategy::Nrmse,
        );
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].contains("sorted by nrmse (lower is better)"));
        assert!(lines[3].contains("second"));
        assert!(lines[3].contains("invalid"));
        assert!(lines[3].contains("-1.000000"));
        assert!(lines[4].contains("first"));
    }

    #[test]
    fn undecided_pick_is_reported() {
        let text = format_pick_best(["a", "b"], &PickBestResult::undecided());
        assert!(text.starts_with("No decision possible"));
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
