use std::time::Duration;

use crate::animation::ease::Ease;
use crate::placement::bubble::{DEFAULT_GAP_PX, Edges};

/// Options controlling a [`crate::TourPlayer`] session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOpts {
    /// Delay between an acknowledgment and the state advancing, in milliseconds. Lets the bubble's
    /// exit transition finish.
    pub settle_delay_ms: u64,
    /// Clearance between the bubble and its target, in pixels.
    pub bubble_gap_px: f64,
    /// Container margins the bubble must keep clear of when measuring clearance.
    pub reserved: Edges,
    /// Easing of the bubble's exit transition.
    pub exit_ease: Ease,
}

impl SessionOpts {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            settle_delay_ms: 300,
            bubble_gap_px: DEFAULT_GAP_PX,
            reserved: Edges::default(),
            exit_ease: Ease::default(),
        }
    }
}
