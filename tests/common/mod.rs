#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

use moviequizbot::{
    error::QuizError,
    quiz::{Question, QuestionSource, QuizPresenter, QuizStep, QuizView, RoundAlert},
    statistics::InMemoryStatistics,
};
use url::Url;

pub const QUESTIONS_PER_ROUND: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Step(QuizStep),
    Highlight(bool),
    Loading,
    LoadingHidden,
    Error { message: String, round: u64 },
    RoundResult(RoundAlert),
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    fn record(&self, event: ViewEvent) -> Result<(), QuizError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn steps(&self) -> Vec<QuizStep> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Step(step) => Some(step),
                _ => None,
            })
            .collect()
    }

    pub fn highlights(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Highlight(is_correct) => Some(is_correct),
                _ => None,
            })
            .collect()
    }

    pub fn round_results(&self) -> Vec<RoundAlert> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::RoundResult(alert) => Some(alert),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Error { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Round named by the retry button of the latest error.
    pub fn last_error_round(&self) -> Option<u64> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::Error { round, .. } => Some(round),
            _ => None,
        })
    }
}

impl QuizView for RecordingView {
    async fn render_step(&self, step: QuizStep) -> Result<(), QuizError> {
        self.record(ViewEvent::Step(step))
    }

    async fn highlight(&self, is_correct: bool) -> Result<(), QuizError> {
        self.record(ViewEvent::Highlight(is_correct))
    }

    async fn show_loading(&self) -> Result<(), QuizError> {
        self.record(ViewEvent::Loading)
    }

    async fn hide_loading(&self) -> Result<(), QuizError> {
        self.record(ViewEvent::LoadingHidden)
    }

    async fn show_error(&self, message: String, round: u64) -> Result<(), QuizError> {
        self.record(ViewEvent::Error { message, round })
    }

    async fn show_round_result(&self, alert: RoundAlert) -> Result<(), QuizError> {
        self.record(ViewEvent::RoundResult(alert))
    }
}

/// Hands out questions whose correct answer is always `correct_answer`.
pub struct ScriptedQuestions {
    correct_answer: bool,
    failing: AtomicBool,
    loads: AtomicUsize,
    requests: AtomicUsize,
}

impl ScriptedQuestions {
    pub fn answering(correct_answer: bool) -> Self {
        Self {
            correct_answer,
            failing: AtomicBool::new(false),
            loads: AtomicUsize::new(0),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        let questions = Self::answering(true);
        questions.set_failing(true);
        questions
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl QuestionSource for ScriptedQuestions {
    async fn load_data(&self) -> Result<(), QuizError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(QuizError::DataLoad("The Internet connection appears to be offline.".into()));
        }
        Ok(())
    }

    async fn request_next_question(&self) -> Result<Option<Question>, QuizError> {
        let number = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Some(Question::new(
            Url::parse(&format!("https://example.com/poster/{number}.jpg")).unwrap(),
            "Is the rating of this movie greater than 7?",
            self.correct_answer,
        )))
    }
}

pub type TestPresenter = QuizPresenter<RecordingView, ScriptedQuestions, InMemoryStatistics>;

pub fn presenter(questions: ScriptedQuestions) -> TestPresenter {
    QuizPresenter::new(
        RecordingView::default(),
        questions,
        InMemoryStatistics::new(),
        QUESTIONS_PER_ROUND,
    )
}
