use serde::Serialize;

/// Linear map from `input` to `output`, clamped to the output range at both ends.
pub fn interpolate(value: f32, input: (f32, f32), output: (f32, f32)) -> f32 {
    let (i0, i1) = input;
    let (o0, o1) = output;
    if (i1 - i0).abs() < f32::EPSILON {
        return o1;
    }
    let t = ((value - i0) / (i1 - i0)).clamp(0.0, 1.0);
    o0 + (o1 - o0) * t
}

/// How far a section has scrolled past the top of the viewport, in [0, 1].
pub fn scroll_progress(scroll_y: f32, section_top: f32, section_height: f32) -> f32 {
    if section_height <= 0.0 {
        return 0.0;
    }
    ((scroll_y - section_top) / section_height).clamp(0.0, 1.0)
}

/// Hero section transforms. Percentages are of the element's own size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeroParallax {
    pub background_y_pct: f32,
    pub avatar_scale: f32,
    pub avatar_y_pct: f32,
    pub content_y_pct: f32,
    pub floating_y_pct: f32,
    pub hero_opacity: f32,
    pub name_x_pct: f32,
    pub buttons_y_pct: f32,
    pub buttons_opacity: f32,
}

impl HeroParallax {
    pub fn at(progress: f32) -> Self {
        let p = progress.clamp(0.0, 1.0);
        Self {
            background_y_pct: interpolate(p, (0.0, 1.0), (0.0, 30.0)),
            avatar_scale: interpolate(p, (0.0, 0.5), (1.0, 0.85)),
            avatar_y_pct: interpolate(p, (0.0, 1.0), (0.0, 40.0)),
            content_y_pct: interpolate(p, (0.0, 1.0), (0.0, 20.0)),
            floating_y_pct: interpolate(p, (0.0, 1.0), (0.0, 60.0)),
            hero_opacity: interpolate(p, (0.0, 0.7), (1.0, 0.0)),
            name_x_pct: interpolate(p, (0.0, 0.5), (0.0, -5.0)),
            buttons_y_pct: interpolate(p, (0.0, 0.6), (0.0, 30.0)),
            buttons_opacity: interpolate(p, (0.0, 0.5), (1.0, 0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_interpolate_clamps() {
        assert_eq!(interpolate(-1.0, (0.0, 1.0), (0.0, 30.0)), 0.0);
        assert_eq!(interpolate(2.0, (0.0, 1.0), (0.0, 30.0)), 30.0);
        assert!(close(interpolate(0.25, (0.0, 0.5), (1.0, 0.85)), 0.925));
    }

    #[test]
    fn test_scroll_progress() {
        assert_eq!(scroll_progress(0.0, 0.0, 800.0), 0.0);
        assert_eq!(scroll_progress(400.0, 0.0, 800.0), 0.5);
        assert_eq!(scroll_progress(5000.0, 0.0, 800.0), 1.0);
        assert_eq!(scroll_progress(100.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_hero_at_top_is_identity() {
        let h = HeroParallax::at(0.0);
        assert_eq!(h.avatar_scale, 1.0);
        assert_eq!(h.hero_opacity, 1.0);
        assert_eq!(h.background_y_pct, 0.0);
    }

    #[test]
    fn test_hero_fades_out_before_fully_scrolled() {
        let h = HeroParallax::at(0.7);
        assert!(close(h.hero_opacity, 0.0));
        assert_eq!(h.buttons_opacity, 0.0);
        assert!(close(h.avatar_scale, 0.85));
        assert!(close(h.background_y_pct, 21.0));
    }
}
