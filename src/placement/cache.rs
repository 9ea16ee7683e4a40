use crate::foundation::core::{Rect, Size};
use crate::placement::bubble::{BubblePlacement, Clearance, Edges, place_bubble};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
/// Layout state of the annotation bubble.
pub enum BubbleState {
    /// The bubble must be laid out (invisibly) so the host can measure it.
    Measuring,
    /// The bubble has a final position.
    Placed(BubblePlacement),
}

#[derive(Clone, Debug, PartialEq)]
struct PlacementKey {
    target: Rect,
    text: String,
    container: Size,
}

/// Two-pass bubble layout: the host renders the bubble once, reports its measured size, and the
/// cache places it. Any change to the target, the text or the container invalidates the
/// measurement.
#[derive(Clone, Debug)]
pub struct PlacementCache {
    gap: f64,
    reserved: Edges,
    key: Option<PlacementKey>,
    placement: Option<BubblePlacement>,
}

impl PlacementCache {
    pub fn new(gap: f64, reserved: Edges) -> Self {
        Self {
            gap,
            reserved,
            key: None,
            placement: None,
        }
    }

    /// Bring the cache up to date with what is about to be rendered.
    pub fn sync(&mut self, target: Rect, text: &str, container: Size) -> BubbleState {
        let unchanged = self.key.as_ref().is_some_and(|k| {
            k.target == target && k.container == container && k.text == text
        });
        if !unchanged {
            tracing::trace!(?target, ?container, "bubble target changed; re-measuring");
            self.key = Some(PlacementKey {
                target,
                text: text.to_owned(),
                container,
            });
            self.placement = None;
        }
        self.state()
    }

    /// Record the bubble's measured size after layout and compute its placement.
    ///
    /// Returns `None` when nothing has been synced yet.
    pub fn report_measured(&mut self, size: Size) -> Option<BubblePlacement> {
        let key = self.key.as_ref()?;
        let clearance =
            Clearance::measure(key.target, size, key.container, self.gap, self.reserved);
        let placement = place_bubble(key.target, size, key.container, self.gap, clearance);
        tracing::debug!(side = ?placement.side, origin = ?placement.origin, "bubble placed");
        self.placement = Some(placement);
        Some(placement)
    }

    pub fn state(&self) -> BubbleState {
        match self.placement {
            Some(p) => BubbleState::Placed(p),
            None => BubbleState::Measuring,
        }
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.placement = None;
    }
}
