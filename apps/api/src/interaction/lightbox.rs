use serde::Serialize;

use super::wrap_index;

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 4.0;
/// Zoom change per 100 units of wheel delta.
pub const ZOOM_STEP: f32 = 0.25;

/// Modal image viewer over a list of `len` images.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lightbox {
    len: usize,
    selected: Option<usize>,
    zoom: f32,
    pan: (f32, f32),
    #[serde(skip)]
    drag_from: Option<(f32, f32)>,
}

impl Lightbox {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            selected: None,
            zoom: MIN_ZOOM,
            pan: (0.0, 0.0),
            drag_from: None,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> (f32, f32) {
        self.pan
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    /// Opens at `index`; out-of-range indices and empty lists leave it closed.
    pub fn open_at(&mut self, index: usize) {
        if index < self.len {
            self.selected = Some(index);
            self.reset_view();
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
        self.reset_view();
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn prev(&mut self) {
        self.step(-1);
    }

    /// The list changed underneath the viewer (e.g. a realtime delete).
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        match self.selected {
            Some(_) if len == 0 => self.close(),
            Some(i) if i >= len => self.selected = Some(len - 1),
            _ => {}
        }
    }

    /// `"3 / 7"` style counter.
    pub fn position_label(&self) -> Option<String> {
        self.selected.map(|i| format!("{} / {}", i + 1, self.len))
    }

    /// Negative `delta_y` (wheel up) zooms in.
    pub fn wheel(&mut self, delta_y: f32) {
        if !self.is_open() {
            return;
        }
        let zoom = (self.zoom - delta_y / 100.0 * ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
        self.zoom = zoom;
        if zoom <= MIN_ZOOM {
            self.pan = (0.0, 0.0);
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.is_open() && self.zoom > MIN_ZOOM {
            self.drag_from = Some((x, y));
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some((fx, fy)) = self.drag_from {
            self.pan.0 += x - fx;
            self.pan.1 += y - fy;
            self.drag_from = Some((x, y));
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag_from = None;
    }

    fn step(&mut self, delta: isize) {
        if let Some(i) = self.selected {
            if self.len > 0 {
                self.selected = Some(wrap_index(i, delta, self.len));
                self.reset_view();
            }
        }
    }

    fn reset_view(&mut self) {
        self.zoom = MIN_ZOOM;
        self.pan = (0.0, 0.0);
        self.drag_from = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_to_first() {
        let mut lb = Lightbox::new(3);
        lb.open_at(2);
        lb.next();
        assert_eq!(lb.selected(), Some(0));
    }

    #[test]
    fn test_prev_wraps_to_last() {
        let mut lb = Lightbox::new(3);
        lb.open_at(0);
        lb.prev();
        assert_eq!(lb.selected(), Some(2));
        assert_eq!(lb.position_label().as_deref(), Some("3 / 3"));
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut lb = Lightbox::new(5);
        lb.open_at(1);
        for _ in 0..5 {
            lb.next();
        }
        assert_eq!(lb.selected(), Some(1));
        for _ in 0..5 {
            lb.prev();
        }
        assert_eq!(lb.selected(), Some(1));
    }

    #[test]
    fn test_empty_list_stays_closed() {
        let mut lb = Lightbox::new(0);
        lb.open_at(0);
        lb.next();
        assert!(!lb.is_open());
        assert_eq!(lb.position_label(), None);
    }

    #[test]
    fn test_navigation_ignored_when_closed() {
        let mut lb = Lightbox::new(3);
        lb.next();
        assert_eq!(lb.selected(), None);
    }

    #[test]
    fn test_wheel_zoom_is_clamped() {
        let mut lb = Lightbox::new(1);
        lb.open_at(0);
        lb.wheel(-100.0);
        assert_eq!(lb.zoom(), 1.25);
        lb.wheel(-10_000.0);
        assert_eq!(lb.zoom(), MAX_ZOOM);
        lb.wheel(10_000.0);
        assert_eq!(lb.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_drag_pans_only_when_zoomed() {
        let mut lb = Lightbox::new(2);
        lb.open_at(0);
        lb.pointer_down(10.0, 10.0);
        lb.pointer_move(30.0, 20.0);
        assert_eq!(lb.pan(), (0.0, 0.0));

        lb.wheel(-200.0);
        lb.pointer_down(10.0, 10.0);
        lb.pointer_move(30.0, 20.0);
        lb.pointer_move(35.0, 25.0);
        lb.pointer_up();
        lb.pointer_move(100.0, 100.0);
        assert_eq!(lb.pan(), (25.0, 15.0));
    }

    #[test]
    fn test_navigation_resets_zoom_and_pan() {
        let mut lb = Lightbox::new(2);
        lb.open_at(0);
        lb.wheel(-300.0);
        lb.pointer_down(0.0, 0.0);
        lb.pointer_move(5.0, 5.0);
        lb.next();
        assert_eq!(lb.zoom(), MIN_ZOOM);
        assert_eq!(lb.pan(), (0.0, 0.0));
    }

    #[test]
    fn test_shrinking_list_clamps_selection() {
        let mut lb = Lightbox::new(4);
        lb.open_at(3);
        lb.set_len(2);
        assert_eq!(lb.selected(), Some(1));
        lb.set_len(0);
        assert!(!lb.is_open());
    }
}
