use std::{borrow::Cow, sync::Arc};

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;

use super::movie::Movie;
use crate::{
    error::QuizError,
    quiz::source::MoviesLoader,
    statistics::{accuracy, GameRecord, StatisticService},
};

pub struct Connection {
    pool: PgPool,
}

/// Game records of a single chat.
#[derive(Clone)]
pub struct ChatStatistics {
    connection: Arc<Connection>,
    chat_id: i64,
}

#[derive(sqlx::FromRow)]
struct GameRecordRow {
    correct: i32,
    total: i32,
    played_at: DateTime<Utc>,
}

impl From<GameRecordRow> for GameRecord {
    fn from(row: GameRecordRow) -> Self {
        GameRecord {
            correct: row.correct.max(0) as u32,
            total: row.total.max(0) as u32,
            date: row.played_at,
        }
    }
}

impl Connection {
    pub async fn connect<'a>(connection_string: Cow<'a, str>) -> Result<Self, QuizError> {
        let pool = PgPool::connect(&connection_string).await?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), QuizError> {
        log::debug!("Running migrations");
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| QuizError::Storage(e.into()))
    }

    pub fn statistics_for(self: &Arc<Self>, chat_id: i64) -> ChatStatistics {
        ChatStatistics {
            connection: Arc::clone(self),
            chat_id,
        }
    }
}

impl MoviesLoader for Connection {
    async fn load_movies(&self) -> Result<Vec<Movie>, QuizError> {
        let movies = sqlx::query_as::<_, Movie>("SELECT id, title, image_url, rating FROM movies")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Database error: {:?}", e);
                QuizError::DataLoad(format!("Failed to load movies: {}", e))
            })?;

        Ok(movies)
    }
}

impl StatisticService for ChatStatistics {
    async fn store(&self, correct: u32, total: u32) -> Result<(), QuizError> {
        log::debug!("Storing game result {}/{}", correct, total);
        let record = GameRecord::new(correct, total);
        sqlx::query(
            "INSERT INTO game_records (chat_id, correct, total, played_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(self.chat_id)
        .bind(record.correct as i32)
        .bind(record.total as i32)
        .bind(record.date)
        .execute(&self.connection.pool)
        .await?;

        Ok(())
    }

    async fn best_game(&self) -> Result<Option<GameRecord>, QuizError> {
        let best = sqlx::query_as::<_, GameRecordRow>(
            "SELECT correct, total, played_at FROM game_records WHERE chat_id = $1 ORDER BY correct DESC, id ASC LIMIT 1",
        )
        .bind(self.chat_id)
        .fetch_optional(&self.connection.pool)
        .await?;

        Ok(best.map(GameRecord::from))
    }

    async fn games_count(&self) -> Result<u64, QuizError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM game_records WHERE chat_id = $1")
                .bind(self.chat_id)
                .fetch_one(&self.connection.pool)
                .await?;

        Ok(count.max(0) as u64)
    }

    async fn total_accuracy(&self) -> Result<f64, QuizError> {
        let (correct, total): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(correct), 0)::BIGINT, COALESCE(SUM(total), 0)::BIGINT FROM game_records WHERE chat_id = $1",
        )
        .bind(self.chat_id)
        .fetch_one(&self.connection.pool)
        .await?;

        Ok(accuracy(correct.max(0) as u64, total.max(0) as u64))
    }
}
