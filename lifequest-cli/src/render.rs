//! Terminal rendering for quest boards, level progress and probability charts.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use lifequest_core::{QuestProbability, QuestStatus, XP_PER_LEVEL, compute_reward};

const PROGRESS_CELLS: u64 = 10;

/// Width of the probability bars in characters
pub const CHART_WIDTH: usize = 30;

/// Bar showing progress through the current level, e.g. `[██████░░░░] 62/100`
pub fn level_progress(xp: u64) -> String {
    let into_level = xp % XP_PER_LEVEL;
    let filled = (into_level * PROGRESS_CELLS / XP_PER_LEVEL) as usize;
    let empty = PROGRESS_CELLS as usize - filled;
    format!(
        "[{}{}] {}/{}",
        "█".repeat(filled),
        "░".repeat(empty),
        into_level,
        XP_PER_LEVEL
    )
}

/// One quest board line with a done marker or the XP on offer
pub fn quest_line(status: &QuestStatus) -> String {
    if status.completed {
        format!("✅ {} (done)", status.quest.name)
    } else {
        let reward = compute_reward(&status.quest, &status.stats);
        format!("⬜ {} (+{} XP)", status.quest.name, reward)
    }
}

/// Horizontal bar chart on a fixed 0..1 axis
pub fn probability_chart(probs: &[QuestProbability], width: usize) -> String {
    let label_width = probs.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);

    probs
        .iter()
        .map(|p| {
            let filled = (p.probability.clamp(0.0, 1.0) * width as f64).round() as usize;
            format!(
                "{:<label_width$} │{}{} {:.2}",
                p.name,
                "█".repeat(filled),
                " ".repeat(width - filled),
                p.probability,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Catalog table with today's status and estimated success probability
pub fn quest_table(board: &[QuestStatus]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Quest", "Base XP", "Next reward", "Today", "Success"]);

    for status in board {
        let today = if status.completed {
            Cell::new("done").fg(Color::Green)
        } else {
            Cell::new("open")
        };
        table.add_row(vec![
            Cell::new(&status.quest.name),
            Cell::new(status.quest.base_xp),
            Cell::new(format!("+{}", compute_reward(&status.quest, &status.stats))),
            today,
            Cell::new(format!("{:.2}", status.stats.mean_success_probability())),
        ]);
    }

    table
}
