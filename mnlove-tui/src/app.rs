//! Main loop
//!
//! Every iteration draws a frame, waits up to 100ms for input, applies the
//! resulting message, then runs `tick` so timers, camera animation and
//! backend results advance even when the user is idle.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::event;
use crate::message::AppMessage;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Status messages clear after this long.
const STATUS_TTL: Duration = Duration::from_secs(6);

pub fn run(terminal: &mut Term, app: &mut App) -> Result<()> {
    let mut shown_status: Option<(String, Instant)> = None;

    loop {
        terminal.draw(|frame| view::render(app, frame))?;

        if app.should_quit {
            break;
        }

        if let Some(event) = event::poll_event(POLL_INTERVAL)? {
            let msg = event::handle_event(event, app);
            update::update(app, msg, Instant::now());
        }
        update::tick(app, Instant::now());

        let now = Instant::now();
        shown_status = match (app.status_message.clone(), shown_status) {
            (Some(msg), Some((prev, since))) if msg == prev => {
                if now.duration_since(since) >= STATUS_TTL {
                    update::update(app, AppMessage::ClearStatus, now);
                    None
                } else {
                    Some((prev, since))
                }
            }
            (Some(msg), _) => Some((msg, now)),
            (None, _) => None,
        };
    }

    Ok(())
}
