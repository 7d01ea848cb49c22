use std::future::Future;

use super::question::QuizStep;
use crate::error::QuizError;

/// Button attached to an alert and what pressing it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    /// Start a new round after the results.
    Restart,
    /// Reload the questions after a failed load.
    Retry,
}

impl AlertAction {
    fn name(&self) -> &'static str {
        match self {
            AlertAction::Restart => "restart",
            AlertAction::Retry => "retry",
        }
    }
}

/// A button pressed under one of the quiz messages.
///
/// Every press names the round (and, for answers, the question) it was shown
/// for, so presses on older messages can be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPress {
    Answer {
        given: bool,
        round: u64,
        question_index: usize,
    },
    Alert {
        action: AlertAction,
        round: u64,
    },
}

impl ButtonPress {
    pub fn answer(given: bool, step: &QuizStep) -> Self {
        ButtonPress::Answer {
            given,
            round: step.round,
            question_index: step.question_index,
        }
    }

    pub fn callback_data(&self) -> String {
        match self {
            ButtonPress::Answer {
                given,
                round,
                question_index,
            } => format!("{}:{}:{}", if *given { "yes" } else { "no" }, round, question_index),
            ButtonPress::Alert { action, round } => format!("{}:{}", action.name(), round),
        }
    }

    pub fn from_callback_data(data: &str) -> Option<Self> {
        let mut parts = data.split(':');
        let press = match (parts.next()?, parts.next()?.parse().ok()?) {
            ("yes", round) => ButtonPress::Answer {
                given: true,
                round,
                question_index: parts.next()?.parse().ok()?,
            },
            ("no", round) => ButtonPress::Answer {
                given: false,
                round,
                question_index: parts.next()?.parse().ok()?,
            },
            ("restart", round) => ButtonPress::Alert {
                action: AlertAction::Restart,
                round,
            },
            ("retry", round) => ButtonPress::Alert {
                action: AlertAction::Retry,
                round,
            },
            _ => return None,
        };

        match parts.next() {
            Some(_) => None,
            None => Some(press),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundAlert {
    pub title: String,
    pub message: String,
    pub button_text: String,
    pub action: AlertAction,
    pub round: u64,
}

impl RoundAlert {
    pub fn press(&self) -> ButtonPress {
        ButtonPress::Alert {
            action: self.action,
            round: self.round,
        }
    }
}

pub trait QuizView: Send + Sync {
    fn render_step(&self, step: QuizStep) -> impl Future<Output = Result<(), QuizError>> + Send;

    fn highlight(&self, is_correct: bool) -> impl Future<Output = Result<(), QuizError>> + Send;

    fn show_loading(&self) -> impl Future<Output = Result<(), QuizError>> + Send;

    fn hide_loading(&self) -> impl Future<Output = Result<(), QuizError>> + Send;

    /// Shows a failed load; its retry button belongs to `round`.
    fn show_error(&self, message: String, round: u64) -> impl Future<Output = Result<(), QuizError>> + Send;

    fn show_round_result(&self, alert: RoundAlert) -> impl Future<Output = Result<(), QuizError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_survive_callback_data() {
        let presses = [
            ButtonPress::Answer { given: true, round: 3, question_index: 7 },
            ButtonPress::Answer { given: false, round: 0, question_index: 0 },
            ButtonPress::Alert { action: AlertAction::Restart, round: 12 },
            ButtonPress::Alert { action: AlertAction::Retry, round: 1 },
        ];
        for press in presses {
            assert_eq!(ButtonPress::from_callback_data(&press.callback_data()), Some(press));
        }
        assert_eq!(
            ButtonPress::Answer { given: true, round: 3, question_index: 7 }.callback_data(),
            "yes:3:7"
        );
    }

    #[test]
    fn malformed_callback_data_is_rejected() {
        for data in ["yes", "restart", "no:1", "yes:1:x", "retry:1:2", "maybe:1", "restart:-1", ""] {
            assert_eq!(ButtonPress::from_callback_data(data), None, "{data}");
        }
    }
}
