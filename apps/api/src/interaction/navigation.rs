/// Scroll depth past which the header switches to its compact style.
pub const SCROLLED_THRESHOLD: f64 = 50.0;
/// Look-ahead so a section becomes active slightly before its top reaches the header.
pub const ACTIVE_OFFSET: f64 = 150.0;
/// Gap left between the header and a section after jumping to it.
pub const JUMP_MARGIN: f64 = 8.0;

pub const SECTIONS: &[&str] = &[
    "home",
    "about",
    "skills",
    "certificates",
    "experience",
    "education",
    "projects",
    "contact",
];

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

/// The last section (in page order) whose top has passed `scroll_y + ACTIVE_OFFSET`.
/// `offsets` pairs section ids with their document offsets.
pub fn active_section<'a>(offsets: &[(&'a str, f64)], scroll_y: f64) -> Option<&'a str> {
    let position = scroll_y + ACTIVE_OFFSET;
    offsets
        .iter()
        .filter(|(_, top)| position >= *top)
        .map(|(id, _)| *id)
        .last()
        .or_else(|| offsets.first().map(|(id, _)| *id))
}

/// Scroll position that puts a section just below a fixed header.
pub fn scroll_target(section_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    (section_top + scroll_y - header_height - JUMP_MARGIN).max(0.0)
}
