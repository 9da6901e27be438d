// src/scoring/stats.rs

use crate::{
    models::{
        color::{AnswerKey, ColorChoice, PaletteColor},
        note::NoteKey,
        row::{PersistedRow, StoredRow},
        stats::{AggregateStats, ColorCount, Comparison, HistoryEntry, NoteStats},
    },
    scoring::grader::percentage,
};

/// Points a row may deviate from the overall accuracy and still be "average".
pub const AVERAGE_BAND: i64 = 5;

/// Computes every statistic shown on the stats page.
pub fn aggregate(rows: &[StoredRow], key: &AnswerKey, palette: &[PaletteColor]) -> AggregateStats {
    let notes: Vec<NoteStats> = NoteKey::ALL
        .into_iter()
        .map(|note| note_stats(rows, note, key, palette))
        .collect();

    let answered: usize = notes.iter().map(|n| n.answered).sum();
    let correct: usize = rows
        .iter()
        .map(|stored| row_correct_count(&stored.row, key))
        .sum();
    let overall_accuracy = percentage(correct, answered);

    let history = rows
        .iter()
        .map(|stored| {
            let score = row_score(&stored.row, key);
            HistoryEntry {
                row_index: stored.row_index,
                timestamp: stored.row.timestamp.clone(),
                colors: stored.row.colors.to_vec(),
                score,
                comparison: compare(score, overall_accuracy),
            }
        })
        .collect();

    AggregateStats {
        total_tests: rows.len(),
        overall_accuracy,
        notes,
        history,
    }
}

/// Labels a score against the overall accuracy.
/// Exactly `AVERAGE_BAND` points away still counts as average.
pub fn compare(score: u32, overall_accuracy: u32) -> Comparison {
    let diff = i64::from(score) - i64::from(overall_accuracy);
    if diff > AVERAGE_BAND {
        Comparison::AboveAverage
    } else if diff < -AVERAGE_BAND {
        Comparison::BelowAverage
    } else {
        Comparison::Average
    }
}

/// Score of one stored row over the notes it answered.
pub fn row_score(row: &PersistedRow, key: &AnswerKey) -> u32 {
    let answered = NoteKey::ALL
        .into_iter()
        .filter(|note| row.color(*note).is_some())
        .count();
    percentage(row_correct_count(row, key), answered)
}

fn row_correct_count(row: &PersistedRow, key: &AnswerKey) -> usize {
    NoteKey::ALL
        .into_iter()
        .filter(|note| row.color(*note) == Some(key.correct(*note)))
        .count()
}

fn note_stats(
    rows: &[StoredRow],
    note: NoteKey,
    key: &AnswerKey,
    palette: &[PaletteColor],
) -> NoteStats {
    let correct_color = key.correct(note);
    let chosen: Vec<&ColorChoice> = rows.iter().filter_map(|r| r.row.color(note)).collect();
    let correct = chosen.iter().filter(|c| **c == correct_color).count();

    NoteStats {
        note,
        solfege: note.solfege(),
        correct_color: correct_color.clone(),
        answered: chosen.len(),
        accuracy: percentage(correct, chosen.len()),
        most_common: most_common(&chosen),
        distribution: distribution(&chosen, palette),
    }
}

/// Counts colors in the order they are first seen.
fn tally(chosen: &[&ColorChoice]) -> Vec<ColorCount> {
    let mut counts: Vec<ColorCount> = Vec::new();
    for color in chosen {
        match counts.iter_mut().find(|c| c.color == **color) {
            Some(entry) => entry.count += 1,
            None => counts.push(ColorCount {
                color: (*color).clone(),
                count: 1,
            }),
        }
    }
    counts
}

/// Highest count wins; on a tie the color seen first wins.
fn most_common(chosen: &[&ColorChoice]) -> Option<ColorChoice> {
    let mut best: Option<ColorCount> = None;
    for entry in tally(chosen) {
        if best.as_ref().is_none_or(|b| entry.count > b.count) {
            best = Some(entry);
        }
    }
    best.map(|b| b.color)
}

/// Palette colors first (zero-filled), then anything else users picked.
fn distribution(chosen: &[&ColorChoice], palette: &[PaletteColor]) -> Vec<ColorCount> {
    let observed = tally(chosen);
    let count_of = |name: &str| {
        observed
            .iter()
            .find(|c| c.color.as_str() == name)
            .map_or(0, |c| c.count)
    };

    let mut counts: Vec<ColorCount> = palette
        .iter()
        .map(|p| ColorCount {
            color: ColorChoice::from(p.name),
            count: count_of(p.name),
        })
        .collect();

    counts.extend(
        observed
            .into_iter()
            .filter(|c| !palette.iter().any(|p| p.name == c.color.as_str())),
    );
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::color::PALETTE;

    const RAINBOW: [&str; 7] = ["red", "orange", "yellow", "green", "blue", "indigo", "violet"];
    const WRONG: [&str; 7] = ["violet", "red", "orange", "yellow", "green", "blue", "indigo"];

    fn stored(row_index: usize, colors: [&str; 7]) -> StoredRow {
        let mut cells: Vec<String> = colors.iter().map(|c| c.to_string()).collect();
        cells.push(format!("2025-01-0{}T10:00:00.000Z", row_index));
        StoredRow {
            row_index,
            row: PersistedRow::from_cells(&cells).unwrap(),
        }
    }

    fn note(stats: &AggregateStats, note: NoteKey) -> &NoteStats {
        &stats.notes[note.index()]
    }

    #[test]
    fn test_empty_history() {
        let stats = aggregate(&[], &AnswerKey::standard(), &PALETTE);

        assert_eq!(stats.total_tests, 0);
        assert_eq!(stats.overall_accuracy, 0);
        assert!(stats.history.is_empty());
        for n in &stats.notes {
            assert_eq!(n.most_common, None);
            assert_eq!(n.accuracy, 0);
            assert!(n.distribution.iter().all(|c| c.count == 0));
            assert_eq!(n.distribution.len(), PALETTE.len());
        }
    }

    #[test]
    fn test_perfect_and_zero_rows_split_the_average() {
        let rows = vec![stored(1, RAINBOW), stored(2, WRONG)];
        let stats = aggregate(&rows, &AnswerKey::standard(), &PALETTE);

        assert_eq!(stats.total_tests, 2);
        assert_eq!(stats.overall_accuracy, 50);
        assert_eq!(stats.history[0].score, 100);
        assert_eq!(stats.history[0].comparison, Comparison::AboveAverage);
        assert_eq!(stats.history[1].score, 0);
        assert_eq!(stats.history[1].comparison, Comparison::BelowAverage);
        assert_eq!(stats.history[1].row_index, 2);
    }

    #[test]
    fn test_empty_cells_are_not_counted_as_wrong() {
        let rows = vec![stored(1, ["red", "", "", "", "", "", ""])];
        let stats = aggregate(&rows, &AnswerKey::standard(), &PALETTE);

        assert_eq!(stats.overall_accuracy, 100);
        assert_eq!(stats.history[0].score, 100);
        assert_eq!(note(&stats, NoteKey::C).answered, 1);
        assert_eq!(note(&stats, NoteKey::D).answered, 0);
        assert_eq!(note(&stats, NoteKey::D).most_common, None);
    }

    #[test]
    fn test_row_with_no_answers_scores_zero() {
        let rows = vec![stored(1, [""; 7])];
        let stats = aggregate(&rows, &AnswerKey::standard(), &PALETTE);

        assert_eq!(stats.total_tests, 1);
        assert_eq!(stats.overall_accuracy, 0);
        assert_eq!(stats.history[0].score, 0);
        assert_eq!(stats.history[0].comparison, Comparison::Average);
    }

    #[test]
    fn test_per_note_accuracy() {
        let mut second = RAINBOW;
        second[0] = "blue";
        let rows = vec![stored(1, RAINBOW), stored(2, second), stored(3, second)];
        let stats = aggregate(&rows, &AnswerKey::standard(), &PALETTE);

        assert_eq!(note(&stats, NoteKey::C).accuracy, 33);
        assert_eq!(note(&stats, NoteKey::D).accuracy, 100);
        // 19 of 21 cells correct
        assert_eq!(stats.overall_accuracy, 90);
    }

    #[test]
    fn test_most_common_prefers_highest_count() {
        let mut a = RAINBOW;
        a[0] = "blue";
        let rows = vec![stored(1, RAINBOW), stored(2, a), stored(3, a)];
        let stats = aggregate(&rows, &AnswerKey::standard(), &PALETTE);

        assert_eq!(
            note(&stats, NoteKey::C).most_common,
            Some(ColorChoice::from("blue"))
        );
    }

    // Ties keep the color that was counted first, not the alphabetical one.
    #[test]
    fn test_most_common_tie_keeps_first_encountered() {
        let mut a = RAINBOW;
        a[0] = "yellow";
        let mut b = RAINBOW;
        b[0] = "blue";
        let rows = vec![stored(1, a), stored(2, b), stored(3, b), stored(4, a)];
        let stats = aggregate(&rows, &AnswerKey::standard(), &PALETTE);

        assert_eq!(
            note(&stats, NoteKey::C).most_common,
            Some(ColorChoice::from("yellow"))
        );
    }

    #[test]
    fn test_distribution_zero_fills_and_keeps_unknown_colors() {
        let mut a = RAINBOW;
        a[2] = "teal";
        let mut b = RAINBOW;
        b[2] = "";
        let rows = vec![stored(1, a), stored(2, RAINBOW), stored(3, b)];
        let stats = aggregate(&rows, &AnswerKey::standard(), &PALETTE);

        let e = note(&stats, NoteKey::E);
        assert_eq!(e.distribution.len(), PALETTE.len() + 1);
        assert_eq!(e.distribution[2].color.as_str(), "yellow");
        assert_eq!(e.distribution[2].count, 1);
        assert_eq!(e.distribution[0].count, 0);
        let last = e.distribution.last().unwrap();
        assert_eq!(last.color.as_str(), "teal");
        assert_eq!(last.count, 1);

        let total: usize = e.distribution.iter().map(|c| c.count).sum();
        assert_eq!(total, e.answered);
        assert_eq!(total, 2);
    }

    #[test]
    fn test_compare_band_boundaries() {
        assert_eq!(compare(56, 50), Comparison::AboveAverage);
        assert_eq!(compare(55, 50), Comparison::Average);
        assert_eq!(compare(50, 50), Comparison::Average);
        assert_eq!(compare(45, 50), Comparison::Average);
        assert_eq!(compare(44, 50), Comparison::BelowAverage);
        assert_eq!(compare(0, 3), Comparison::Average);
        assert_eq!(compare(100, 100), Comparison::Average);
    }

    #[test]
    fn test_compare_is_monotonic() {
        for overall in 0..=100u32 {
            let mut last = Comparison::BelowAverage;
            for score in 0..=100u32 {
                let label = compare(score, overall);
                let rank = |c: Comparison| match c {
                    Comparison::BelowAverage => 0,
                    Comparison::Average => 1,
                    Comparison::AboveAverage => 2,
                };
                assert!(rank(label) >= rank(last));
                last = label;
            }
        }
    }
}
