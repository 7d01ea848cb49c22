use std::{sync::Arc, time::Duration};

use tokio::{sync::Mutex, task::JoinHandle};

use super::{
    question::Question,
    session::{Advance, QuizSession},
    source::QuestionSource,
    view::{AlertAction, ButtonPress, QuizView, RoundAlert},
};
use crate::{
    error::QuizError,
    results::{make_result_message, PLAY_AGAIN, ROUND_RESULT_TITLE},
    statistics::StatisticService,
};

/// Time the answer feedback stays on screen before the quiz moves on.
pub const PACING_DELAY: Duration = Duration::from_secs(1);

/// Drives a [`QuizSession`] between a view, a question source and the statistics.
///
/// Cloning is cheap and every clone talks to the same session.
pub struct QuizPresenter<View, Source, Statistics> {
    inner: Arc<Inner<View, Source, Statistics>>,
}

struct Inner<View, Source, Statistics> {
    session: Mutex<QuizSession>,
    view: View,
    questions: Source,
    statistics: Statistics,
    pacing: Duration,
    pending: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl<View, Source, Statistics> Clone for QuizPresenter<View, Source, Statistics> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<View, Source, Statistics> QuizPresenter<View, Source, Statistics>
where
    View: QuizView + 'static,
    Source: QuestionSource + 'static,
    Statistics: StatisticService + 'static,
{
    pub fn new(view: View, questions: Source, statistics: Statistics, questions_per_round: usize) -> Self {
        Self::with_pacing(view, questions, statistics, questions_per_round, PACING_DELAY)
    }

    pub fn with_pacing(
        view: View,
        questions: Source,
        statistics: Statistics,
        questions_per_round: usize,
        pacing: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                session: Mutex::new(QuizSession::new(questions_per_round)),
                view,
                questions,
                statistics,
                pacing,
                pending: std::sync::Mutex::new(None),
            }),
        }
    }

    pub fn view(&self) -> &View {
        &self.inner.view
    }

    pub fn questions(&self) -> &Source {
        &self.inner.questions
    }

    pub fn statistics(&self) -> &Statistics {
        &self.inner.statistics
    }

    /// Copy of the session as it is right now.
    pub async fn session(&self) -> QuizSession {
        self.inner.session.lock().await.clone()
    }

    pub async fn start(&self) -> Result<(), QuizError> {
        self.inner.view.show_loading().await?;
        match self.inner.questions.load_data().await {
            Ok(()) => self.did_load_data().await,
            Err(e) => self.did_fail_to_load_data(e).await,
        }
    }

    async fn did_load_data(&self) -> Result<(), QuizError> {
        self.inner.view.hide_loading().await?;
        self.request_next_question().await
    }

    async fn did_fail_to_load_data(&self, error: QuizError) -> Result<(), QuizError> {
        log::error!("Failed to load quiz data: {}", error);
        let round = self.inner.session.lock().await.round();
        self.inner.view.hide_loading().await?;
        self.inner.view.show_error(error.to_string(), round).await
    }

    async fn request_next_question(&self) -> Result<(), QuizError> {
        match self.inner.questions.request_next_question().await {
            Ok(question) => self.did_receive_next_question(question).await,
            Err(e) => self.did_fail_to_load_data(e).await,
        }
    }

    pub async fn did_receive_next_question(&self, question: Option<Question>) -> Result<(), QuizError> {
        let Some(question) = question else {
            log::debug!("Question source had nothing to ask");
            return Ok(());
        };
        log::debug!("Received question {}", question);

        let step = self.inner.session.lock().await.receive_question(question);
        match step {
            Some(step) => {
                log::info!("Asking question {}: '{}'", step.question_number, step.question);
                self.inner.view.render_step(step).await
            }
            None => {
                log::debug!("Dropping a question that arrived while no question was expected");
                Ok(())
            }
        }
    }

    pub async fn yes_clicked(&self) -> Result<(), QuizError> {
        self.did_answer(true, None).await
    }

    pub async fn no_clicked(&self) -> Result<(), QuizError> {
        self.did_answer(false, None).await
    }

    /// Handles a button pressed under a quiz message. Presses that belong to
    /// another round, or to a question no longer on screen, are ignored.
    pub async fn press(&self, press: ButtonPress) -> Result<(), QuizError> {
        match press {
            ButtonPress::Answer {
                given,
                round,
                question_index,
            } => self.did_answer(given, Some((round, question_index))).await,
            ButtonPress::Alert { action, round } => {
                log::info!("{:?} pressed for round {}", action, round);
                self.restart(Some(round)).await
            }
        }
    }

    async fn did_answer(&self, given: bool, shown: Option<(u64, usize)>) -> Result<(), QuizError> {
        let (is_correct, round) = {
            let mut session = self.inner.session.lock().await;
            if let Some((round, question_index)) = shown {
                if !session.is_current(round, question_index) {
                    log::info!(
                        "Ignoring answer to question {} of round {}",
                        question_index + 1,
                        round
                    );
                    return Ok(());
                }
            }
            match session.submit_answer(given) {
                Some(is_correct) => (is_correct, session.round()),
                None => {
                    log::debug!("Ignoring answer {} in state {:?}", given, session.state());
                    return Ok(());
                }
            }
        };
        log::info!("Answered {}. Correctness: {}", given, is_correct);

        self.schedule_advance(round);
        self.inner.view.highlight(is_correct).await?;
        self.inner.view.show_loading().await
    }

    fn schedule_advance(&self, round: u64) {
        let presenter = self.clone();
        let pacing = self.inner.pacing;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(pacing).await;
            presenter.take_pending();
            if let Err(e) = presenter.show_next_question_or_results(round).await {
                log::error!("Failed to move on after an answer: {}", e);
            }
        });

        if let Ok(mut pending) = self.inner.pending.lock() {
            if let Some(previous) = pending.replace(handle) {
                previous.abort();
            }
        }
    }

    fn take_pending(&self) -> Option<JoinHandle<()>> {
        self.inner.pending.lock().ok().and_then(|mut pending| pending.take())
    }

    async fn show_next_question_or_results(&self, round: u64) -> Result<(), QuizError> {
        let advance = self.inner.session.lock().await.advance(round);
        match advance {
            Advance::NextQuestion => {
                self.inner.view.hide_loading().await?;
                self.request_next_question().await
            }
            Advance::RoundComplete { correct, total } => {
                self.inner.view.hide_loading().await?;
                self.show_final_results(correct, total, round).await
            }
            Advance::Stale => {
                log::debug!("Skipping an advance scheduled in round {}", round);
                Ok(())
            }
        }
    }

    async fn show_final_results(&self, correct: usize, total: usize, round: u64) -> Result<(), QuizError> {
        log::info!("Round finished with result {}/{}", correct, total);
        let statistics = &self.inner.statistics;
        statistics.store(correct as u32, total as u32).await?;

        let snapshot = statistics.snapshot().await?;
        let message = make_result_message(correct, total, &snapshot)
            .expect("the round just stored must be visible as a best game candidate");

        self.inner
            .view
            .show_round_result(RoundAlert {
                title: ROUND_RESULT_TITLE.to_owned(),
                message,
                button_text: PLAY_AGAIN.to_owned(),
                action: AlertAction::Restart,
                round,
            })
            .await
    }

    /// Cancels a pending advance, resets the session and loads questions again.
    pub async fn restart_game(&self) -> Result<(), QuizError> {
        self.restart(None).await
    }

    async fn restart(&self, shown_round: Option<u64>) -> Result<(), QuizError> {
        {
            let mut session = self.inner.session.lock().await;
            if let Some(round) = shown_round.filter(|round| *round != session.round()) {
                log::info!("Ignoring a restart from round {} during round {}", round, session.round());
                return Ok(());
            }
            if let Some(pending) = self.take_pending() {
                log::debug!("Cancelling a pending advance");
                pending.abort();
            }
            session.restart();
        }
        self.start().await
    }

    /// Stops the pacing task without touching the session.
    pub fn cancel(&self) {
        if let Some(pending) = self.take_pending() {
            pending.abort();
        }
    }
}
