//! Client-side behaviors of the single-page site, kept as pure state machines so
//! the page script only has to feed them events and render the result.

pub mod form_status;
pub mod lightbox;
pub mod marquee;
pub mod navigation;
pub mod orbit;
pub mod parallax;
pub mod typewriter;

use serde::Serialize;

/// Timings and limits the page script drives the behaviors with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Behavior {
    pub type_interval_ms: u64,
    pub delete_interval_ms: u64,
    pub full_text_pause_ms: u64,
    pub phrase_interval_ms: u64,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,
    pub marquee_speed: f64,
    pub marquee_copies: usize,
    pub sections: Vec<&'static str>,
    pub scrolled_threshold: f64,
    pub active_offset: f64,
    pub jump_margin: f64,
    pub status_reset_ms: u64,
}

impl Behavior {
    pub fn current() -> Self {
        Self {
            type_interval_ms: millis(typewriter::TYPE_INTERVAL),
            delete_interval_ms: millis(typewriter::DELETE_INTERVAL),
            full_text_pause_ms: millis(typewriter::FULL_TEXT_PAUSE),
            phrase_interval_ms: millis(typewriter::PHRASE_INTERVAL),
            min_zoom: lightbox::MIN_ZOOM,
            max_zoom: lightbox::MAX_ZOOM,
            zoom_step: lightbox::ZOOM_STEP,
            marquee_speed: marquee::SCROLL_SPEED,
            marquee_copies: marquee::COPIES,
            sections: navigation::SECTIONS.to_vec(),
            scrolled_threshold: navigation::SCROLLED_THRESHOLD,
            active_offset: navigation::ACTIVE_OFFSET,
            jump_margin: navigation::JUMP_MARGIN,
            status_reset_ms: millis(form_status::STATUS_RESET_AFTER),
        }
    }
}

pub(crate) fn millis(d: std::time::Duration) -> u64 {
    d.as_millis() as u64
}

/// Steps `current` by `delta` positions, wrapping around `len` in both directions.
pub fn wrap_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    let current = (current as isize).rem_euclid(len);
    (current + delta).rem_euclid(len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_forward_and_back() {
        assert_eq!(wrap_index(2, 1, 3), 0);
        assert_eq!(wrap_index(0, -1, 3), 2);
        assert_eq!(wrap_index(1, 7, 3), 2);
        assert_eq!(wrap_index(1, -7, 3), 0);
    }

    #[test]
    fn test_behavior_exposes_timings() {
        let behavior = Behavior::current();
        assert_eq!(behavior.type_interval_ms, 120);
        assert_eq!(behavior.phrase_interval_ms, 4000);
        assert_eq!(behavior.status_reset_ms, 5000);
        assert_eq!((behavior.min_zoom, behavior.max_zoom), (1.0, 4.0));
        assert_eq!(behavior.sections.first(), Some(&"home"));
    }

    #[test]
    fn test_wrap_empty_list() {
        assert_eq!(wrap_index(0, 1, 0), 0);
        assert_eq!(wrap_index(0, -1, 0), 0);
    }
}
