use teloxide::{
    dispatching::{UpdateFilterExt, UpdateHandler},
    dptree,
    types::Update,
};

use crate::{
    commands::{cancel, help, start, stats, Command},
    runner::{invalid_state, take_answer},
};

/// Dispatch tree of the bot: commands and free text go to message handlers,
/// button presses drive the running quiz.
pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    log::debug!("Building the dispatch tree");
    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Help].endpoint(help))
        .branch(case![Command::Start].endpoint(start))
        .branch(case![Command::Stats].endpoint(stats))
        .branch(case![Command::Cancel].endpoint(cancel));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .endpoint(invalid_state);

    let callback_query_handler = Update::filter_callback_query().endpoint(take_answer);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_query_handler)
}
