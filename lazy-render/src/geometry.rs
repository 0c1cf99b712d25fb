/// An element's bounding box relative to the viewport's top-left corner.
///
/// This mirrors what a DOM `getBoundingClientRect()` reports: negative `top`/`left` means the
/// element starts above/left of the visible area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Builds a rect from its top-left corner and size.
    pub fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            bottom: top + height,
            right: left + width,
        }
    }
}

/// The visible viewport size (e.g. `window.innerWidth` x `window.innerHeight`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `(margin_w, margin_h)`: how far past each edge the "near" region extends.
    pub fn margins(&self, threshold_percent: f64) -> (f64, f64) {
        let factor = threshold_percent / 100.0;
        (self.width * factor, self.height * factor)
    }
}

/// Returns `true` when `rect` lies entirely inside the viewport expanded by
/// `threshold_percent` of its own size on every side.
///
/// This is a containment test, not an intersection test. An element taller (or wider) than the
/// expanded viewport is never reported near, whatever its position.
pub fn is_near(rect: Rect, threshold_percent: f64, viewport: Viewport) -> bool {
    let (margin_w, margin_h) = viewport.margins(threshold_percent);
    rect.top >= -margin_h
        && rect.left >= -margin_w
        && rect.bottom <= viewport.height + margin_h
        && rect.right <= viewport.width + margin_w
}
