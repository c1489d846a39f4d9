/// Pixels advanced per animation frame.
pub const SCROLL_SPEED: f64 = 1.2;
/// The item list is rendered this many times back to back.
pub const COPIES: usize = 3;

/// Auto-scrolling tools strip that loops seamlessly over tripled content.
#[derive(Debug, Clone)]
pub struct Marquee {
    offset: f64,
    hovered: Option<usize>,
}

impl Marquee {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            hovered: None,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Advances one frame. `scroll_width` is the full width of all copies.
    pub fn frame(&mut self, scroll_width: f64) -> f64 {
        if self.hovered.is_none() {
            self.offset += SCROLL_SPEED;
            if self.offset >= scroll_width / COPIES as f64 {
                self.offset = 0.0;
            }
        }
        self.offset
    }

    pub fn hover(&mut self, card: usize) {
        self.hovered = Some(card);
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }
}

impl Default for Marquee {
    fn default() -> Self {
        Self::new()
    }
}

/// Repeats the items so the strip never shows a gap while looping.
pub fn loop_items<T: Clone>(items: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() * COPIES);
    for _ in 0..COPIES {
        out.extend_from_slice(items);
    }
    out
}
