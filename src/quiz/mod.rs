pub mod presenter;
pub mod question;
pub mod session;
pub mod source;
pub mod view;

pub use presenter::{QuizPresenter, PACING_DELAY};
pub use question::{Question, QuizStep};
pub use session::{Advance, QuizSession, SessionState};
pub use source::{MoviesLoader, QuestionFactory, QuestionSource};
pub use view::{AlertAction, ButtonPress, QuizView, RoundAlert};
