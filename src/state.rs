use std::collections::HashMap;

use teloxide::types::ChatId;
use tokio::sync::Mutex;

use crate::{
    quiz::{QuestionSource, QuizPresenter, QuizView, SessionState},
    statistics::StatisticService,
};

/// Quiz sessions of all chats, one presenter per chat.
///
/// Sessions whose round is over are dropped whenever another one is inserted.
pub struct SessionRegistry<View, Source, Statistics> {
    presenters: Mutex<HashMap<ChatId, QuizPresenter<View, Source, Statistics>>>,
}

impl<View, Source, Statistics> Default for SessionRegistry<View, Source, Statistics> {
    fn default() -> Self {
        Self {
            presenters: Mutex::new(HashMap::new()),
        }
    }
}

impl<View, Source, Statistics> SessionRegistry<View, Source, Statistics>
where
    View: QuizView + 'static,
    Source: QuestionSource + 'static,
    Statistics: StatisticService + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, chat_id: ChatId) -> Option<QuizPresenter<View, Source, Statistics>> {
        self.presenters.lock().await.get(&chat_id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.presenters.lock().await.len()
    }

    /// Replaces the chat's presenter; a pending advance of the old one is cancelled.
    pub async fn insert(&self, chat_id: ChatId, presenter: QuizPresenter<View, Source, Statistics>) {
        let mut presenters = self.presenters.lock().await;

        let mut finished = Vec::new();
        for (id, running) in presenters.iter() {
            if *id != chat_id && running.session().await.state() == SessionState::RoundComplete {
                finished.push(*id);
            }
        }
        for id in finished {
            log::debug!("Dropping the finished session of {}", id);
            presenters.remove(&id);
        }

        if let Some(previous) = presenters.insert(chat_id, presenter) {
            log::debug!("Replacing the session of {}", chat_id);
            previous.cancel();
        }
    }

    pub async fn remove(&self, chat_id: ChatId) -> Option<QuizPresenter<View, Source, Statistics>> {
        let removed = self.presenters.lock().await.remove(&chat_id);
        if let Some(presenter) = &removed {
            presenter.cancel();
        }
        removed
    }
}
