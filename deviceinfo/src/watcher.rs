//! Rental expiry watcher.
//!
//! Polls a rental source on an interval and broadcasts an event for
//! every rental whose window has passed. Repeat alerts for the same
//! rental id are muted for one hour; mute entries expire on their own,
//! so a rental that stays out alerts again the next hour.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use crate::backend::{Rental, RentalSource};

/// How long a rental id stays muted after an alert.
const ALERT_MUTE_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Events emitted by the watcher.
#[derive(Debug, Clone)]
pub enum RentalEvent {
    Expired(Rental),
}

/// Per-id alert suppression with self-expiring entries.
struct AlertDeduper {
    window: Duration,
    seen: HashMap<Uuid, Instant>,
}

impl AlertDeduper {
    fn new(window: Duration) -> Self {
        Self {
            window,
            seen: HashMap::new(),
        }
    }

    /// True when this id has not alerted inside the mute window. Marks
    /// the id as alerted when it returns true.
    fn should_alert(&mut self, id: Uuid) -> bool {
        let now = Instant::now();
        let window = self.window;
        self.seen
            .retain(|_, alerted_at| now.duration_since(*alerted_at) < window);
        if self.seen.contains_key(&id) {
            return false;
        }
        self.seen.insert(id, now);
        true
    }
}

/// Watcher for time-boxed tool-license rentals.
pub struct RentalWatcher {
    event_tx: broadcast::Sender<RentalEvent>,
    poll_interval: Duration,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl RentalWatcher {
    pub fn new(poll_interval: Duration) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            event_tx,
            poll_interval,
            handle: None,
        }
    }

    /// Subscribe to expiry events. Valid before or after `start`.
    pub fn subscribe(&self) -> broadcast::Receiver<RentalEvent> {
        self.event_tx.subscribe()
    }

    /// Start polling the source. Calling this while already running
    /// restarts the loop cleanly.
    pub fn start(&mut self, source: Arc<dyn RentalSource>) -> Result<()> {
        if self.poll_interval.is_zero() {
            bail!("poll interval must be non-zero");
        }
        self.stop();

        let event_tx = self.event_tx.clone();
        let poll_interval = self.poll_interval;
        let handle = tokio::spawn(async move {
            let mut deduper = AlertDeduper::new(ALERT_MUTE_WINDOW);
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                ticker.tick().await;
                let rentals = match source.active_rentals().await {
                    Ok(rentals) => rentals,
                    Err(e) => {
                        warn!("rental poll failed: {e}");
                        continue;
                    }
                };
                let now = Utc::now();
                for rental in rentals {
                    if rental.is_expired(now) && deduper.should_alert(rental.id) {
                        info!(rental = %rental.id, tool = %rental.tool, "rental expired");
                        let _ = event_tx.send(RentalEvent::Expired(rental));
                    }
                }
            }
        });
        self.handle = Some(handle);
        Ok(())
    }

    /// Stop polling. Safe to call when not running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }
}

impl Drop for RentalWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
