use chrono::{DateTime, Utc};

use crate::statistics::StatisticsSnapshot;

pub const ROUND_RESULT_TITLE: &str = "This round is over!";
pub const PLAY_AGAIN: &str = "Play again";

pub fn date_time_string(date: &DateTime<Utc>) -> String {
    date.format("%d.%m.%y %H:%M").to_string()
}

/// Summary shown at the end of a round. `None` if `statistics` has no best
/// game, which cannot happen once the round itself has been stored.
pub fn make_result_message(
    correct: usize,
    total: usize,
    statistics: &StatisticsSnapshot,
) -> Option<String> {
    let best_game = statistics.best_game.as_ref()?;

    let lines = [
        format!("Your result: {}/{}", correct, total),
        format!("Quizzes played: {}", statistics.games_count),
        format!(
            "Record: {}/{} ({})",
            best_game.correct,
            best_game.total,
            date_time_string(&best_game.date)
        ),
        format!("Average accuracy: {:.2}%", statistics.total_accuracy),
    ];
    Some(lines.join("\n"))
}

pub fn make_statistics_message(statistics: &StatisticsSnapshot) -> String {
    match &statistics.best_game {
        Some(best_game) => format!(
            "Quizzes played: {}\nRecord: {}/{} ({})\nAverage accuracy: {:.2}%",
            statistics.games_count,
            best_game.correct,
            best_game.total,
            date_time_string(&best_game.date),
            statistics.total_accuracy
        ),
        None => "No quizzes played yet. Enter /start to play one!".to_owned(),
    }
}
