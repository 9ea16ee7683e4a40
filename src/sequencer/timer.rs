use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Identifies the acknowledgment a settle callback belongs to.
///
/// A token is only honoured while its generation is current and its stop point and area are still
/// the active ones; anything else is stale.
pub struct SettleToken {
    pub generation: u64,
    pub stop_index: usize,
    pub area_index: usize,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    scheduled_at: Duration,
    due_at: Duration,
    token: SettleToken,
}

/// Single-slot, host-clock-driven timer for the settle delay.
///
/// The host advances the clock; nothing here blocks or spawns.
#[derive(Clone, Debug)]
pub struct SettleTimer {
    delay: Duration,
    pending: Option<Pending>,
}

impl SettleTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer, replacing any pending token.
    pub fn schedule(&mut self, now: Duration, token: SettleToken) {
        if let Some(prev) = self.pending {
            tracing::debug!(?prev.token, "replacing pending settle callback");
        }
        self.pending = Some(Pending {
            scheduled_at: now,
            due_at: now.saturating_add(self.delay),
            token,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending token if it is due at `now`.
    pub fn poll(&mut self, now: Duration) -> Option<SettleToken> {
        let pending = self.pending?;
        if now < pending.due_at {
            return None;
        }
        self.pending = None;
        Some(pending.token)
    }

    /// Time elapsed since the pending callback was armed.
    pub fn elapsed(&self, now: Duration) -> Option<Duration> {
        self.pending.map(|p| now.saturating_sub(p.scheduled_at))
    }
}
