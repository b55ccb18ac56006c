//! Progress sources
//!
//! Turn raw layout geometry into a progress fraction in [0, 1]:
//! [`ScrollTracker`] for scroll position (whole page or a tracked region),
//! [`PointerTracker`] for pointer coordinates inside a container.
//!
//! Missing or degenerate geometry never produces an error or NaN; the
//! trackers report a boundary value instead.

use serde::{Deserialize, Serialize};

use super::timing::inverse_lerp;

/// An edge of the tracked region or of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Start,
    Center,
    End,
    /// Arbitrary fraction of the size, 0.0 = start, 1.0 = end
    Fraction(f64),
}

impl Edge {
    #[inline]
    pub fn fraction(&self) -> f64 {
        match self {
            Edge::Start => 0.0,
            Edge::Center => 0.5,
            Edge::End => 1.0,
            Edge::Fraction(f) => *f,
        }
    }
}

/// "Region edge meets viewport edge"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub target: Edge,
    pub viewport: Edge,
}

impl Intersection {
    pub const fn new(target: Edge, viewport: Edge) -> Self {
        Self { target, viewport }
    }
}

/// The two boundary crossings that define progress 0 and progress 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub start: Intersection,
    pub end: Intersection,
}

impl ScrollOffset {
    /// Region top enters at the viewport bottom, region bottom leaves at the top
    pub const ENTER_EXIT: ScrollOffset = ScrollOffset {
        start: Intersection::new(Edge::Start, Edge::End),
        end: Intersection::new(Edge::End, Edge::Start),
    };

    /// Region passes through the middle of the viewport
    pub const THROUGH_CENTER: ScrollOffset = ScrollOffset {
        start: Intersection::new(Edge::Start, Edge::Center),
        end: Intersection::new(Edge::End, Edge::Center),
    };

    /// Region top reaches viewport top until region bottom reaches viewport bottom
    pub const CONTAIN: ScrollOffset = ScrollOffset {
        start: Intersection::new(Edge::Start, Edge::Start),
        end: Intersection::new(Edge::End, Edge::End),
    };

    /// Region enters from below until it is fully revealed
    pub const REVEAL: ScrollOffset = ScrollOffset {
        start: Intersection::new(Edge::Start, Edge::End),
        end: Intersection::new(Edge::End, Edge::End),
    };
}

impl Default for ScrollOffset {
    fn default() -> Self {
        Self::CONTAIN
    }
}

/// A tracked region in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub top: f64,
    pub height: f64,
}

impl Region {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// The visible window onto the document
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
    /// Total document height
    pub document_height: f64,
}

impl Viewport {
    pub const fn new(scroll_y: f64, height: f64, document_height: f64) -> Self {
        Self {
            scroll_y,
            height,
            document_height,
        }
    }

    /// Largest meaningful scroll offset
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.height).max(0.0)
    }
}

/// Scroll progress of the page or of a tracked region
#[derive(Debug, Clone, Default)]
pub struct ScrollTracker {
    region: Option<Region>,
    /// Built for a region; stays set while the region is detached
    tracks_region: bool,
    offset: ScrollOffset,
    last: f64,
}

impl ScrollTracker {
    /// Progress through the whole document
    pub fn page() -> Self {
        Self::default()
    }

    /// Progress of `region` between the two crossings in `offset`
    pub fn region(region: Region, offset: ScrollOffset) -> Self {
        Self {
            region: Some(region),
            tracks_region: true,
            offset,
            last: 0.0,
        }
    }

    /// Re-measure the region (layout changed) or detach it (`None` = unmounted)
    pub fn set_region(&mut self, region: Option<Region>) {
        self.region = region;
    }

    pub fn is_page(&self) -> bool {
        !self.tracks_region
    }

    /// Most recent progress reported by [`update`](Self::update)
    pub fn progress(&self) -> f64 {
        self.last
    }

    /// Recompute progress for the current viewport and remember it
    pub fn update(&mut self, viewport: &Viewport) -> f64 {
        self.last = self.measure(viewport);
        self.last
    }

    /// Progress for `viewport` without touching the remembered value.
    ///
    /// A detached region reports the boundary nearest its last progress.
    pub fn measure(&self, viewport: &Viewport) -> f64 {
        match (self.region, self.tracks_region) {
            (Some(region), _) => region_progress(&region, &self.offset, viewport),
            (None, true) => {
                if self.last >= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            (None, false) => page_progress(viewport),
        }
    }
}

/// Whole-page progress over `[0, document_height - viewport_height]`
pub fn page_progress(viewport: &Viewport) -> f64 {
    if !viewport.scroll_y.is_finite() {
        return 0.0;
    }
    let max = viewport.max_scroll();
    if !max.is_finite() || max <= 0.0 {
        return if viewport.scroll_y > 0.0 { 1.0 } else { 0.0 };
    }
    (viewport.scroll_y / max).clamp(0.0, 1.0)
}

/// Progress of a region between two edge crossings
pub fn region_progress(region: &Region, offset: &ScrollOffset, viewport: &Viewport) -> f64 {
    let values = [
        region.top,
        region.height,
        viewport.scroll_y,
        viewport.height,
    ];
    if values.iter().any(|v| !v.is_finite()) || region.height < 0.0 || viewport.height < 0.0 {
        return 0.0;
    }

    let crossing = |i: &Intersection| {
        region.top + region.height * i.target.fraction() - viewport.height * i.viewport.fraction()
    };
    let from = crossing(&offset.start);
    let to = crossing(&offset.end);

    if to <= from {
        // Zero-length span: a step at the crossing point
        return if viewport.scroll_y >= to { 1.0 } else { 0.0 };
    }
    inverse_lerp(from, to, viewport.scroll_y).clamp(0.0, 1.0)
}

/// Container rectangle in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    fn is_usable(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Pointer coordinate normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// 0.0 at the left/top edge, 1.0 at the right/bottom edge
    #[default]
    Unit,
    /// -0.5 at the left/top edge, 0.5 at the right/bottom edge
    Centered,
}

impl Normalization {
    /// Value reported while the pointer is outside the container
    pub fn rest(&self) -> f64 {
        match self {
            Normalization::Unit => 0.5,
            Normalization::Centered => 0.0,
        }
    }

    fn apply(&self, unit: f64) -> f64 {
        match self {
            Normalization::Unit => unit,
            Normalization::Centered => unit - 0.5,
        }
    }
}

/// Pointer position relative to a container
#[derive(Debug, Clone)]
pub struct PointerTracker {
    bounds: Bounds,
    normalization: Normalization,
    /// Fraction of the distance from center used for magnetic offsets
    magnet_strength: f64,
    position: (f64, f64),
    magnet: (f64, f64),
    inside: bool,
}

impl PointerTracker {
    pub const DEFAULT_MAGNET_STRENGTH: f64 = 0.3;

    pub fn new(bounds: Bounds, normalization: Normalization) -> Self {
        let rest = normalization.rest();
        Self {
            bounds,
            normalization,
            magnet_strength: Self::DEFAULT_MAGNET_STRENGTH,
            position: (rest, rest),
            magnet: (0.0, 0.0),
            inside: false,
        }
    }

    pub fn with_magnet_strength(mut self, strength: f64) -> Self {
        self.magnet_strength = strength;
        self
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether the last pointer event landed inside the container
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Feed a pointer move; returns the normalized (x, y)
    pub fn pointer_move(&mut self, px: f64, py: f64) -> (f64, f64) {
        if !self.bounds.is_usable() || !px.is_finite() || !py.is_finite() {
            self.pointer_leave();
            return self.position;
        }

        let unit_x = inverse_lerp(self.bounds.x, self.bounds.x + self.bounds.width, px).clamp(0.0, 1.0);
        let unit_y = inverse_lerp(self.bounds.y, self.bounds.y + self.bounds.height, py).clamp(0.0, 1.0);
        self.position = (self.normalization.apply(unit_x), self.normalization.apply(unit_y));

        let (cx, cy) = self.bounds.center();
        self.magnet = ((px - cx) * self.magnet_strength, (py - cy) * self.magnet_strength);
        self.inside = self.bounds.contains(px, py);
        self.position
    }

    /// Pointer left the container: back to rest
    pub fn pointer_leave(&mut self) {
        let rest = self.normalization.rest();
        self.position = (rest, rest);
        self.magnet = (0.0, 0.0);
        self.inside = false;
    }

    /// Normalized (x, y)
    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    /// Offset toward the pointer, for magnetic buttons
    pub fn magnetic_offset(&self) -> (f64, f64) {
        self.magnet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_page_progress() {
        assert!(close(page_progress(&Viewport::new(0.0, 100.0, 500.0)), 0.0));
        assert!(close(page_progress(&Viewport::new(200.0, 100.0, 500.0)), 0.5));
        assert!(close(page_progress(&Viewport::new(900.0, 100.0, 500.0)), 1.0));
        assert!(close(page_progress(&Viewport::new(-20.0, 100.0, 500.0)), 0.0));
    }

    #[test]
    fn test_page_shorter_than_viewport() {
        assert_eq!(page_progress(&Viewport::new(0.0, 800.0, 300.0)), 0.0);
        assert_eq!(page_progress(&Viewport::new(f64::NAN, 800.0, 300.0)), 0.0);
    }

    #[test]
    fn test_enter_exit_region() {
        // Region 1000..1200, viewport 400 tall: starts at scroll 600, ends at 1200
        let tracker = ScrollTracker::region(Region::new(1000.0, 200.0), ScrollOffset::ENTER_EXIT);
        assert_eq!(tracker.measure(&Viewport::new(0.0, 400.0, 3000.0)), 0.0);
        assert!(close(tracker.measure(&Viewport::new(600.0, 400.0, 3000.0)), 0.0));
        assert!(close(tracker.measure(&Viewport::new(900.0, 400.0, 3000.0)), 0.5));
        assert!(close(tracker.measure(&Viewport::new(1200.0, 400.0, 3000.0)), 1.0));
        assert_eq!(tracker.measure(&Viewport::new(2000.0, 400.0, 3000.0)), 1.0);
    }

    #[test]
    fn test_through_center_region() {
        // Region 1000..1400, viewport 400: center crosses top at 800, bottom at 1200
        let tracker = ScrollTracker::region(Region::new(1000.0, 400.0), ScrollOffset::THROUGH_CENTER);
        assert!(close(tracker.measure(&Viewport::new(1000.0, 400.0, 3000.0)), 0.5));
    }

    #[test]
    fn test_reveal_region() {
        // Region 1000..1100, viewport 400: from 600 until 700
        let tracker = ScrollTracker::region(Region::new(1000.0, 100.0), ScrollOffset::REVEAL);
        assert!(close(tracker.measure(&Viewport::new(650.0, 400.0, 3000.0)), 0.5));
    }

    #[test]
    fn test_zero_span_is_a_step() {
        // Contain with region exactly viewport-sized
        let tracker = ScrollTracker::region(Region::new(500.0, 400.0), ScrollOffset::CONTAIN);
        assert_eq!(tracker.measure(&Viewport::new(499.0, 400.0, 3000.0)), 0.0);
        assert_eq!(tracker.measure(&Viewport::new(500.0, 400.0, 3000.0)), 1.0);
    }

    #[test]
    fn test_unmounted_region_falls_back_to_boundary() {
        let mut tracker = ScrollTracker::region(Region::new(0.0, f64::NAN), ScrollOffset::ENTER_EXIT);
        assert_eq!(tracker.update(&Viewport::new(100.0, 400.0, 3000.0)), 0.0);
        tracker.set_region(Some(Region::new(0.0, 0.0)));
        let p = tracker.update(&Viewport::new(100.0, 400.0, 3000.0));
        assert!(p.is_finite() && (0.0..=1.0).contains(&p));
        assert_eq!(tracker.progress(), p);
    }

    #[test]
    fn test_detached_region_reports_boundary() {
        let viewport = Viewport::new(1000.0, 400.0, 3000.0);

        let mut tracker = ScrollTracker::region(Region::new(1000.0, 200.0), ScrollOffset::ENTER_EXIT);
        tracker.set_region(None);
        assert!(!tracker.is_page());
        assert_eq!(tracker.update(&viewport), 0.0);

        // 5/6 of the way through before it went away
        let mut tracker = ScrollTracker::region(Region::new(1000.0, 200.0), ScrollOffset::ENTER_EXIT);
        tracker.update(&Viewport::new(1100.0, 400.0, 3000.0));
        tracker.set_region(None);
        assert_eq!(tracker.update(&viewport), 1.0);
        assert_eq!(tracker.update(&Viewport::new(0.0, 400.0, 3000.0)), 1.0);

        // remounted: geometry again
        tracker.set_region(Some(Region::new(1000.0, 200.0)));
        assert!(close(tracker.update(&Viewport::new(900.0, 400.0, 3000.0)), 0.5));
    }

    #[test]
    fn test_page_tracker_ignores_regions() {
        let mut tracker = ScrollTracker::page();
        assert!(tracker.is_page());
        assert!(close(tracker.update(&Viewport::new(200.0, 100.0, 500.0)), 0.5));
    }

    #[test]
    fn test_pointer_unit() {
        let mut tracker = PointerTracker::new(Bounds::new(10.0, 20.0, 100.0, 50.0), Normalization::Unit);
        let (x, y) = tracker.pointer_move(60.0, 45.0);
        assert!(close(x, 0.5) && close(y, 0.5));
        assert!(tracker.is_inside());
        let (x, _) = tracker.pointer_move(500.0, 45.0);
        assert_eq!(x, 1.0);
        assert!(!tracker.is_inside());
    }

    #[test]
    fn test_pointer_centered_and_rest() {
        let mut tracker = PointerTracker::new(Bounds::new(0.0, 0.0, 200.0, 100.0), Normalization::Centered);
        let (x, y) = tracker.pointer_move(0.0, 100.0);
        assert!(close(x, -0.5) && close(y, 0.5));
        tracker.pointer_leave();
        assert_eq!(tracker.position(), (0.0, 0.0));
    }

    #[test]
    fn test_magnetic_offset() {
        let mut tracker = PointerTracker::new(Bounds::new(0.0, 0.0, 100.0, 40.0), Normalization::Unit);
        tracker.pointer_move(80.0, 20.0);
        let (dx, dy) = tracker.magnetic_offset();
        assert!(close(dx, 9.0) && close(dy, 0.0));
        tracker.pointer_leave();
        assert_eq!(tracker.magnetic_offset(), (0.0, 0.0));
    }

    #[test]
    fn test_zero_size_container() {
        let mut tracker = PointerTracker::new(Bounds::new(0.0, 0.0, 0.0, 0.0), Normalization::Centered);
        assert_eq!(tracker.pointer_move(5.0, 5.0), (0.0, 0.0));
    }
}
