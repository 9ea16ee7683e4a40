use std::time::Duration;

/// Easing curve applied to the bubble's exit transition during the settle delay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    InQuad,
    #[default]
    OutQuad,
    InOutQuad,
    OutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }

    /// Bubble opacity `elapsed` into an exit transition lasting `total`.
    ///
    /// Fully opaque at the start, fully transparent once `total` has elapsed.
    pub fn exit_opacity(self, elapsed: Duration, total: Duration) -> f64 {
        if total.is_zero() {
            return 0.0;
        }
        let t = elapsed.as_secs_f64() / total.as_secs_f64();
        1.0 - self.apply(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
