pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod keyboard;
pub mod quiz;
pub mod results;
pub mod runner;
pub mod schema;
pub mod state;
pub mod statistics;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;
