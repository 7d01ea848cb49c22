use std::sync::Arc;

use teloxide::{prelude::Requester, types::Message, utils::command::BotCommands, Bot};
use tracing::instrument;

use crate::{
    config::Config,
    database::connection::Connection,
    results::make_statistics_message,
    runner::{self, TelegramSessions},
    statistics::StatisticService,
    HandlerResult,
};

#[derive(Debug, Clone, BotCommands)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "display help.")]
    Help,
    #[command(description = "start a new round of the movie quiz.")]
    Start,
    #[command(description = "show your quiz statistics.")]
    Stats,
    #[command(description = "stop the current round.")]
    Cancel,
}

pub(crate) async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, sessions, connection, config))]
pub(crate) async fn start(
    bot: Bot,
    msg: Message,
    sessions: Arc<TelegramSessions>,
    connection: Arc<Connection>,
    config: Arc<Config>,
) -> HandlerResult {
    log::info!("{} starts a new round", msg.chat.id);
    bot.send_message(
        msg.chat.id,
        format!(
            "Let's begin! Answer {} questions about movie ratings.",
            config.questions_per_round
        ),
    )
    .await?;

    let presenter = runner::new_presenter(bot, msg.chat.id, connection, config.questions_per_round);
    sessions.insert(msg.chat.id, presenter.clone()).await;
    presenter.start().await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, connection))]
pub(crate) async fn stats(bot: Bot, msg: Message, connection: Arc<Connection>) -> HandlerResult {
    let snapshot = connection.statistics_for(msg.chat.id.0).snapshot().await?;
    bot.send_message(msg.chat.id, make_statistics_message(&snapshot))
        .await?;
    Ok(())
}

pub(crate) async fn cancel(bot: Bot, msg: Message, sessions: Arc<TelegramSessions>) -> HandlerResult {
    match sessions.remove(msg.chat.id).await {
        Some(_) => {
            log::info!("{} cancels the round", msg.chat.id);
            bot.send_message(msg.chat.id, "Round cancelled. Enter /start to play again.")
                .await?;
        }
        None => {
            bot.send_message(msg.chat.id, "There is no round to cancel.")
                .await?;
        }
    }
    Ok(())
}
