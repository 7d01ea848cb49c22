use std::{future::Future, ops::RangeInclusive, sync::Arc, sync::RwLock};

use rand::{seq::SliceRandom, Rng};
use url::Url;

use super::question::Question;
use crate::{database::movie::Movie, error::QuizError};

const RATING_THRESHOLDS: RangeInclusive<u8> = 5..=8;

pub trait QuestionSource: Send + Sync {
    fn load_data(&self) -> impl Future<Output = Result<(), QuizError>> + Send;

    /// `Ok(None)` when there is nothing to ask yet.
    fn request_next_question(
        &self,
    ) -> impl Future<Output = Result<Option<Question>, QuizError>> + Send;
}

pub trait MoviesLoader: Send + Sync {
    fn load_movies(&self) -> impl Future<Output = Result<Vec<Movie>, QuizError>> + Send;
}

impl<T: MoviesLoader> MoviesLoader for Arc<T> {
    fn load_movies(&self) -> impl Future<Output = Result<Vec<Movie>, QuizError>> + Send {
        self.as_ref().load_movies()
    }
}

/// Builds rating questions from a movie catalogue.
pub struct QuestionFactory<Loader: MoviesLoader> {
    loader: Loader,
    movies: RwLock<Vec<Movie>>,
}

impl<Loader: MoviesLoader> QuestionFactory<Loader> {
    pub fn new(loader: Loader) -> Self {
        Self {
            loader,
            movies: RwLock::new(Vec::new()),
        }
    }

    fn random_question(&self) -> Result<Option<Question>, QuizError> {
        let movies = self
            .movies
            .read()
            .map_err(|_| QuizError::DataLoad("movie catalogue is unavailable".into()))?;
        let mut rng = rand::thread_rng();

        match movies.choose(&mut rng) {
            Some(movie) => {
                log::debug!("Asking about {} [{}]", movie, movie.id());
                make_question(movie, rng.gen_range(RATING_THRESHOLDS)).map(Some)
            }
            None => Ok(None),
        }
    }
}

pub(crate) fn make_question(movie: &Movie, threshold: u8) -> Result<Question, QuizError> {
    let image = Url::parse(movie.image_url()).map_err(|e| {
        QuizError::DataLoad(format!("Failed to load the poster of '{}': {}", movie.title(), e))
    })?;

    Ok(Question::new(
        image,
        format!("Is the rating of this movie greater than {}?", threshold),
        movie.rating() > f32::from(threshold),
    ))
}

impl<Loader: MoviesLoader> QuestionSource for QuestionFactory<Loader> {
    async fn load_data(&self) -> Result<(), QuizError> {
        let movies = self.loader.load_movies().await?;
        if movies.is_empty() {
            return Err(QuizError::DataLoad("No movies available for the quiz.".into()));
        }
        log::debug!("Loaded {} movies", movies.len());

        let mut catalogue = self
            .movies
            .write()
            .map_err(|_| QuizError::DataLoad("movie catalogue is unavailable".into()))?;
        *catalogue = movies;
        Ok(())
    }

    async fn request_next_question(&self) -> Result<Option<Question>, QuizError> {
        self.random_question()
    }
}
