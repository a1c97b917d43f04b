//! Terminal client for the For the Love of Minnesota map
//!
//! Usage: `mnlove-tui [URL]`. A map URL such as
//! `https://fortheloveofminnesota.com/map?pin=abc` opens on that pin or
//! location.

mod app;
mod backend;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use std::time::Instant;

use anyhow::Result;
use mnlove_core::EventBus;

use util::{init_terminal, restore_terminal};

fn main() -> Result<()> {
    // Logging is best effort; the UI works without a log file.
    let log_path = backend::init_logging().ok();

    let config_path = backend::config_path();
    let config = backend::load_config(config_path.as_deref());
    let initial_url = std::env::args().nth(1).unwrap_or_else(|| config.base_url.clone());
    log::info!(
        "config {:?}, log {:?}, url {initial_url}",
        config_path,
        log_path
    );

    let bus = EventBus::new(config.event_bus_capacity);
    let backend = match backend::Backend::new(&config, bus.clone()) {
        Ok(backend) => Some(backend),
        Err(e) => {
            log::error!("running without data: {e:#}");
            None
        }
    };

    let mut terminal = init_terminal()?;
    let size = terminal.size()?;
    let mut app = model::App::new(config, initial_url, (size.width, size.height), bus, backend);
    app.url_sync.initialize(Instant::now());

    let result = app::run(&mut terminal, &mut app);

    // Restore even when the loop failed.
    restore_terminal(&mut terminal)?;
    result
}
