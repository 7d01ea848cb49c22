use std::sync::Arc;

use moviequizbot::{config::Config, database::connection::Connection, runner::TelegramSessions, schema::schema};
use teloxide::error_handlers::IgnoringErrorHandlerSafe;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks::{self, Options};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("Invalid configuration.");

    let level = config.log_level.parse().unwrap_or(tracing::Level::ERROR);
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from_level(level))
        .json()
        .with_span_events(FmtSpan::ENTER)
        .log_internal_errors(true)
        .with_line_number(true)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to install the subscriber.");
    tracing_log::LogTracer::init().expect("Failed to bridge log records.");

    let connection = Arc::new(
        Connection::connect(std::borrow::Cow::Owned(config.database_url.clone()))
            .await
            .expect("Failed to connect to database"),
    );
    connection
        .run_migrations()
        .await
        .expect("Failed to run migrations");

    let bot = Bot::new(config.teloxide_token.clone());
    log::info!("Starting bot...");

    let webhook = config.webhook.clone();
    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![
            connection,
            Arc::new(TelegramSessions::new()),
            Arc::new(config)
        ])
        .enable_ctrlc_handler()
        .build();

    if let Some((url, addr)) = webhook {
        log::info!("Listening for webhooks on {}", addr);
        let listener = webhooks::axum(bot, Options::new(addr, url))
            .await
            .expect("Failed to build a listener.");
        dispatcher
            .dispatch_with_listener(listener, Arc::new(IgnoringErrorHandlerSafe))
            .await
    } else {
        dispatcher.dispatch().await
    }
}
