//! Terminal event abstraction.
//!
//! A background task turns crossterm input into `AppEvent`s on a channel,
//! interleaved with `Tick`s at a fixed cadence. `Tick` is the animation
//! frame — the chrome slide, carousel glide and spinner all advance on it —
//! so it must keep firing even while input events stream in continuously
//! (wheel scrolling, mouse drags).

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

fn map_event(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(key) => Some(AppEvent::Key(key)),
        CtEvent::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        // Focus and paste events are not used.
        _ => None,
    }
}

/// Spawn the input-reader task. Dropping the receiver stops it.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut next_tick = Instant::now() + tick_rate;
        loop {
            let now = Instant::now();
            if now >= next_tick {
                if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
                next_tick = now + tick_rate;
            }

            // Wait for input at most until the next frame is due.
            let budget = next_tick.saturating_duration_since(now);
            if event::poll(budget).unwrap_or(false) {
                let Ok(ev) = event::read() else { return };
                if let Some(app_event) = map_event(ev) {
                    if tx.send(app_event).is_err() {
                        return;
                    }
                }
            }
        }
    });

    rx
}
