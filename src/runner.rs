use std::sync::Arc;

use teloxide::{
    dispatching::dialogue::GetChatId,
    payloads::{SendMessageSetters, SendPhotoSetters},
    prelude::Requester,
    types::{CallbackQuery, ChatAction, ChatId, InputFile, Message, ParseMode},
    Bot,
};
use tracing::instrument;

use crate::{
    config::Config,
    database::connection::{ChatStatistics, Connection},
    error::QuizError,
    keyboard::{alert_keyboard, answers_keyboard},
    quiz::{AlertAction, ButtonPress, QuestionFactory, QuizPresenter, QuizStep, QuizView, RoundAlert},
    state::SessionRegistry,
    HandlerResult,
};

pub type TelegramPresenter = QuizPresenter<TelegramView, QuestionFactory<Arc<Connection>>, ChatStatistics>;

pub type TelegramSessions = SessionRegistry<TelegramView, QuestionFactory<Arc<Connection>>, ChatStatistics>;

pub(crate) fn new_presenter(
    bot: Bot,
    chat_id: ChatId,
    connection: Arc<Connection>,
    questions_per_round: usize,
) -> TelegramPresenter {
    let statistics = connection.statistics_for(chat_id.0);
    QuizPresenter::new(
        TelegramView { bot, chat_id },
        QuestionFactory::new(connection),
        statistics,
        questions_per_round,
    )
}

/// Renders a quiz into one Telegram chat.
pub struct TelegramView {
    bot: Bot,
    chat_id: ChatId,
}

impl QuizView for TelegramView {
    async fn render_step(&self, step: QuizStep) -> Result<(), QuizError> {
        let caption = format!("Question {}\n<b>{}</b>", step.question_number, step.question);
        self.bot
            .send_photo(self.chat_id, InputFile::url(step.image.clone()))
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .reply_markup(answers_keyboard(&step))
            .await?;
        Ok(())
    }

    async fn highlight(&self, is_correct: bool) -> Result<(), QuizError> {
        let text = if is_correct {
            "Answer is correct.✅"
        } else {
            "Answer is incorrect.❌"
        };
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }

    async fn show_loading(&self) -> Result<(), QuizError> {
        self.bot
            .send_chat_action(self.chat_id, ChatAction::UploadPhoto)
            .await?;
        Ok(())
    }

    async fn hide_loading(&self) -> Result<(), QuizError> {
        // Chat actions expire by themselves once the next message arrives.
        Ok(())
    }

    async fn show_error(&self, message: String, round: u64) -> Result<(), QuizError> {
        let retry = ButtonPress::Alert {
            action: AlertAction::Retry,
            round,
        };
        self.bot
            .send_message(self.chat_id, format!("<b>Error</b>\n{}", message))
            .parse_mode(ParseMode::Html)
            .reply_markup(alert_keyboard("Try again", retry))
            .await?;
        Ok(())
    }

    async fn show_round_result(&self, alert: RoundAlert) -> Result<(), QuizError> {
        self.bot
            .send_message(self.chat_id, format!("<b>{}</b>\n{}", alert.title, alert.message))
            .parse_mode(ParseMode::Html)
            .reply_markup(alert_keyboard(alert.button_text.clone(), alert.press()))
            .await?;
        Ok(())
    }
}

#[instrument(level = "info", skip(bot, sessions, connection, config))]
pub(crate) async fn take_answer(
    bot: Bot,
    q: CallbackQuery,
    sessions: Arc<TelegramSessions>,
    connection: Arc<Connection>,
    config: Arc<Config>,
) -> HandlerResult {
    bot.answer_callback_query(&q.id).await?;

    let (Some(chat_id), Some(data)) = (q.chat_id(), q.data.as_deref()) else {
        return Ok(());
    };
    let Some(press) = ButtonPress::from_callback_data(data) else {
        log::error!("Unknown callback data {:?} from {}", data, chat_id);
        return Ok(());
    };

    match (sessions.get(chat_id).await, press) {
        (Some(presenter), press) => presenter.press(press).await?,
        (None, ButtonPress::Alert { action, .. }) => {
            log::info!("{} chose {:?} after the session was dropped", chat_id, action);
            let presenter = new_presenter(bot, chat_id, connection, config.questions_per_round);
            sessions.insert(chat_id, presenter.clone()).await;
            presenter.start().await?
        }
        (None, ButtonPress::Answer { .. }) => {
            log::info!("{} pressed '{}' without a running quiz", chat_id, data);
            bot.send_message(chat_id, "There is no quiz running. Enter /start to play.")
                .await?;
        }
    }

    Ok(())
}

#[instrument(level = "info")]
pub(crate) async fn invalid_state(bot: Bot, msg: Message) -> HandlerResult {
    log::info!("{}: invalid input '{:?}'", msg.chat.id, msg.text());
    bot.send_message(
        msg.chat.id,
        "Please answer with the buttons. Enter /help to see usages.",
    )
    .await?;
    Ok(())
}
