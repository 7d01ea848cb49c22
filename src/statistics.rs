use std::{future::Future, sync::Arc, sync::Mutex};

use chrono::{DateTime, Utc};

use crate::error::QuizError;

/// Outcome of one finished round.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub correct: u32,
    pub total: u32,
    pub date: DateTime<Utc>,
}

impl GameRecord {
    pub fn new(correct: u32, total: u32) -> Self {
        Self {
            correct,
            total,
            date: Utc::now(),
        }
    }

    pub fn is_better_than(&self, other: &GameRecord) -> bool {
        self.correct > other.correct
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSnapshot {
    pub games_count: u64,
    pub best_game: Option<GameRecord>,
    pub total_accuracy: f64,
}

/// Accuracy in percent, `0` when nothing was played yet.
pub fn accuracy(correct: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    }
}

/// First record with the highest `correct`, in storage order.
pub fn best_of<'a>(records: impl IntoIterator<Item = &'a GameRecord>) -> Option<&'a GameRecord> {
    records.into_iter().fold(None, |best, record| match best {
        Some(best) if !record.is_better_than(best) => Some(best),
        _ => Some(record),
    })
}

pub trait StatisticService: Send + Sync {
    fn store(&self, correct: u32, total: u32) -> impl Future<Output = Result<(), QuizError>> + Send;

    fn best_game(&self) -> impl Future<Output = Result<Option<GameRecord>, QuizError>> + Send;

    fn games_count(&self) -> impl Future<Output = Result<u64, QuizError>> + Send;

    fn total_accuracy(&self) -> impl Future<Output = Result<f64, QuizError>> + Send;

    fn snapshot(&self) -> impl Future<Output = Result<StatisticsSnapshot, QuizError>> + Send {
        async move {
            Ok(StatisticsSnapshot {
                games_count: self.games_count().await?,
                best_game: self.best_game().await?,
                total_accuracy: self.total_accuracy().await?,
            })
        }
    }
}

impl<T: StatisticService> StatisticService for Arc<T> {
    fn store(&self, correct: u32, total: u32) -> impl Future<Output = Result<(), QuizError>> + Send {
        self.as_ref().store(correct, total)
    }

    fn best_game(&self) -> impl Future<Output = Result<Option<GameRecord>, QuizError>> + Send {
        self.as_ref().best_game()
    }

    fn games_count(&self) -> impl Future<Output = Result<u64, QuizError>> + Send {
        self.as_ref().games_count()
    }

    fn total_accuracy(&self) -> impl Future<Output = Result<f64, QuizError>> + Send {
        self.as_ref().total_accuracy()
    }
}

/// Keeps game records for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryStatistics {
    records: Mutex<Vec<GameRecord>>,
}

impl InMemoryStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<GameRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn records(&self) -> Vec<GameRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn with_lock<R>(&self, f: impl FnOnce(&mut Vec<GameRecord>) -> R) -> Result<R, QuizError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| QuizError::DataLoad("statistics store is poisoned".into()))?;
        Ok(f(&mut records))
    }
}

impl StatisticService for InMemoryStatistics {
    async fn store(&self, correct: u32, total: u32) -> Result<(), QuizError> {
        log::debug!("Storing game result {}/{}", correct, total);
        self.with_lock(|records| records.push(GameRecord::new(correct, total)))
    }

    async fn best_game(&self) -> Result<Option<GameRecord>, QuizError> {
        self.with_lock(|records| best_of(records.iter()).cloned())
    }

    async fn games_count(&self) -> Result<u64, QuizError> {
        self.with_lock(|records| records.len() as u64)
    }

    async fn total_accuracy(&self) -> Result<f64, QuizError> {
        self.with_lock(|records| {
            let (correct, total) = records.iter().fold((0u64, 0u64), |(c, t), record| {
                (c + u64::from(record.correct), t + u64::from(record.total))
            });
            accuracy(correct, total)
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record(correct: u32, total: u32, day: u32) -> GameRecord {
        GameRecord {
            correct,
            total,
            date: Utc.with_ymd_and_hms(2023, 10, day, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn empty_store_has_zero_accuracy_and_no_best_game() {
        let statistics = InMemoryStatistics::new();

        assert_eq!(statistics.total_accuracy().await.unwrap(), 0.0);
        assert_eq!(statistics.games_count().await.unwrap(), 0);
        assert!(statistics.best_game().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn best_game_has_most_correct_answers() {
        let statistics = InMemoryStatistics::with_records(vec![record(7, 10, 1), record(9, 10, 2)]);

        let best = statistics.best_game().await.unwrap().unwrap();
        assert_eq!(best.correct, 9);
        assert_eq!(best.total, 10);
    }

    #[tokio::test]
    async fn ties_keep_the_first_stored_record() {
        let statistics = InMemoryStatistics::with_records(vec![
            record(4, 10, 1),
            record(8, 10, 2),
            record(8, 10, 3),
        ]);

        let best = statistics.best_game().await.unwrap().unwrap();
        assert_eq!(best, record(8, 10, 2));
    }

    #[tokio::test]
    async fn accuracy_is_taken_over_all_answers() {
        let statistics = InMemoryStatistics::new();
        statistics.store(6, 10).await.unwrap();
        statistics.store(9, 10).await.unwrap();
        statistics.store(7, 10).await.unwrap();

        let snapshot = statistics.snapshot().await.unwrap();
        assert_eq!(snapshot.games_count, 3);
        assert!((snapshot.total_accuracy - 73.333).abs() < 0.01);
        assert_eq!(snapshot.best_game.unwrap().correct, 9);
    }

    #[test]
    fn accuracy_guards_against_empty_totals() {
        assert_eq!(accuracy(0, 0), 0.0);
        assert_eq!(accuracy(5, 10), 50.0);
    }
}
