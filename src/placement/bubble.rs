use crate::foundation::core::{Point, Rect, Size, clamp_span};

/// Default clearance between a bubble and its target, in pixels.
pub const DEFAULT_GAP_PX: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
/// Side of the target the bubble is placed on.
pub enum Side {
    Left,
    Right,
    Above,
    Below,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
/// Direction the bubble's pointer aims (towards the target).
pub enum Pointer {
    Left,
    Right,
    Up,
    Down,
}

impl Side {
    /// The pointer direction that aims back at the target from this side.
    pub fn pointer(self) -> Pointer {
        match self {
            Self::Left => Pointer::Right,
            Self::Right => Pointer::Left,
            Self::Above => Pointer::Down,
            Self::Below => Pointer::Up,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Container margins reserved for host chrome (control bars, side panels), in pixels.
pub struct Edges {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Which sides of the target have room for the bubble.
pub struct Clearance {
    pub left: bool,
    pub right: bool,
    pub above: bool,
    pub below: bool,
}

impl Clearance {
    /// Measure clearance around `target` for a bubble of `bubble` size.
    pub fn measure(target: Rect, bubble: Size, container: Size, gap: f64, reserved: Edges) -> Self {
        Self {
            left: target.x0 - gap - reserved.left >= bubble.width,
            right: container.width - reserved.right - target.x1 - gap >= bubble.width,
            above: target.y0 - gap - reserved.top >= bubble.height,
            below: container.height - reserved.bottom - target.y1 - gap >= bubble.height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Where a bubble goes and how its pointer is drawn.
pub struct BubblePlacement {
    /// Chosen side of the target.
    pub side: Side,
    /// Pointer direction.
    pub pointer: Pointer,
    /// Top-left corner in container pixels.
    pub origin: Point,
    /// Measured bubble size.
    pub size: Size,
    /// Distance along the pointer edge (from its start) where the pointer aims at the target
    /// centre, clamped into the edge.
    pub pointer_offset: f64,
}

impl BubblePlacement {
    /// Placed bubble rect in container pixels.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

/// Choose a side for the bubble and position it without overlapping the target.
///
/// Horizontal placement is preferred, towards the roomier half of the frame; vertical placement is
/// the fallback, with "below" always accepted. The bubble is centred on the target's cross-axis
/// midpoint and clamped into `[0, container - bubble]` on both axes.
pub fn place_bubble(
    target: Rect,
    bubble: Size,
    container: Size,
    gap: f64,
    clearance: Clearance,
) -> BubblePlacement {
    let side = choose_side(target, container, clearance);
    let center = target.center();

    let (x, y) = match side {
        Side::Left => (target.x0 - gap - bubble.width, center.y - bubble.height * 0.5),
        Side::Right => (target.x1 + gap, center.y - bubble.height * 0.5),
        Side::Above => (center.x - bubble.width * 0.5, target.y0 - gap - bubble.height),
        Side::Below => (center.x - bubble.width * 0.5, target.y1 + gap),
    };
    let origin = Point::new(
        clamp_span(x, bubble.width, container.width),
        clamp_span(y, bubble.height, container.height),
    );

    let pointer_offset = match side {
        Side::Left | Side::Right => (center.y - origin.y).clamp(0.0, bubble.height),
        Side::Above | Side::Below => (center.x - origin.x).clamp(0.0, bubble.width),
    };

    BubblePlacement {
        side,
        pointer: side.pointer(),
        origin,
        size: bubble,
        pointer_offset,
    }
}

fn choose_side(target: Rect, container: Size, clearance: Clearance) -> Side {
    let in_right_half = target.center().x > container.width * 0.5;
    if in_right_half && clearance.left {
        Side::Left
    } else if !in_right_half && clearance.right {
        Side::Right
    } else if clearance.right {
        Side::Right
    } else if clearance.left {
        Side::Left
    } else if clearance.above {
        Side::Above
    } else {
        Side::Below
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/bubble.rs"]
mod tests;
