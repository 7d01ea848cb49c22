use super::question::{Question, QuizStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    AwaitingQuestion,
    Presenting,
    Locked,
    RoundComplete,
}

/// Result of the delayed transition that follows an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextQuestion,
    RoundComplete { correct: usize, total: usize },
    /// The session was restarted or never locked; nothing changed.
    Stale,
}

/// Progress through one round of questions.
///
/// `round` is bumped on every restart so that a delayed advance scheduled in an
/// earlier round can be told apart from the current one.
#[derive(Debug, Clone)]
pub struct QuizSession {
    question_index: usize,
    correct_count: usize,
    questions_per_round: usize,
    current_question: Option<Question>,
    state: SessionState,
    round: u64,
}

impl QuizSession {
    /// # Panics
    ///
    /// Panics if `questions_per_round` is zero.
    pub fn new(questions_per_round: usize) -> Self {
        assert!(questions_per_round > 0, "a round needs at least one question");
        Self {
            question_index: 0,
            correct_count: 0,
            questions_per_round,
            current_question: None,
            state: SessionState::AwaitingQuestion,
            round: 0,
        }
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn questions_per_round(&self) -> usize {
        self.questions_per_round
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn answers_locked(&self) -> bool {
        self.state == SessionState::Locked
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn is_last_question(&self) -> bool {
        self.question_index == self.questions_per_round - 1
    }

    pub fn convert(&self, question: &Question) -> QuizStep {
        QuizStep {
            image: question.image().clone(),
            question: question.text().to_owned(),
            question_number: format!("{}/{}", self.question_index + 1, self.questions_per_round),
            round: self.round,
            question_index: self.question_index,
        }
    }

    /// Whether `round` and `question_index` name the question on screen right now.
    pub fn is_current(&self, round: u64, question_index: usize) -> bool {
        self.round == round
            && self.question_index == question_index
            && self.state == SessionState::Presenting
    }

    /// Makes `question` the current one. Questions arriving while an answer is
    /// pending or after the round ended are dropped.
    pub fn receive_question(&mut self, question: Question) -> Option<QuizStep> {
        match self.state {
            SessionState::AwaitingQuestion | SessionState::Presenting => {
                let step = self.convert(&question);
                self.current_question = Some(question);
                self.state = SessionState::Presenting;
                Some(step)
            }
            SessionState::Locked | SessionState::RoundComplete => None,
        }
    }

    /// Scores `given` against the current question and locks further answers.
    /// Returns whether the answer was correct, or `None` if it was ignored.
    pub fn submit_answer(&mut self, given: bool) -> Option<bool> {
        if self.state != SessionState::Presenting {
            return None;
        }
        let question = self.current_question.as_ref()?;

        let is_correct = given == question.correct_answer();
        if is_correct {
            self.correct_count += 1;
        }
        self.state = SessionState::Locked;
        Some(is_correct)
    }

    pub fn advance(&mut self, round: u64) -> Advance {
        if round != self.round || self.state != SessionState::Locked {
            return Advance::Stale;
        }

        self.current_question = None;
        if self.is_last_question() {
            self.state = SessionState::RoundComplete;
            Advance::RoundComplete {
                correct: self.correct_count,
                total: self.questions_per_round,
            }
        } else {
            self.question_index += 1;
            self.state = SessionState::AwaitingQuestion;
            Advance::NextQuestion
        }
    }

    pub fn restart(&mut self) {
        self.question_index = 0;
        self.correct_count = 0;
        self.current_question = None;
        self.state = SessionState::AwaitingQuestion;
        self.round += 1;
    }
}
