use std::fmt;

use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    image: Url,
    text: String,
    correct_answer: bool,
}

/// What the view shows for one question.
///
/// `round` and `question_index` identify the question so that a press on an
/// older message can be told apart from an answer to this one.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizStep {
    pub image: Url,
    pub question: String,
    pub question_number: String,
    pub round: u64,
    pub question_index: usize,
}

impl Question {
    pub fn new(image: Url, text: impl Into<String>, correct_answer: bool) -> Self {
        Self {
            image,
            text: text.into(),
            correct_answer,
        }
    }

    pub fn image(&self) -> &Url {
        &self.image
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn correct_answer(&self) -> bool {
        self.correct_answer
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, if self.correct_answer { "Yes" } else { "No" })
    }
}
