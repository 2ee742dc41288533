#[macro_use]
extern crate tracing;

mod api;
mod auth;
mod catalog;
mod command;
mod config;
mod database;
mod error;
mod notifier;
mod session;
mod sync;
mod task;
mod utils;

use anyhow::Result;
use once_cell::sync::Lazy;

use crate::config::{ARGS, CONFIG, Command};
use crate::utils::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    Lazy::force(&ARGS);
    init_logger(&ARGS.log_level);
    Lazy::force(&CONFIG);
    match &ARGS.command {
        Command::Serve => command::serve().await,
        Command::List => command::list().await,
        Command::Add(draft) => command::add(draft).await,
        Command::Edit { id, draft } => command::edit(*id, draft).await,
        Command::Delete { id, yes } => command::delete(*id, *yes).await,
    }
}
