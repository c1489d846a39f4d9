use std::f64::consts::{PI, TAU};
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub radius: f64,
    /// Radians per second.
    pub angular_speed: f64,
    /// Starting angle of the ring's first node, in radians.
    pub phase: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitLayout {
    pub rings: Vec<Ring>,
    /// Radians of extra rotation per pixel scrolled.
    pub scroll_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitNode {
    pub index: usize,
    pub ring: usize,
    /// Radians, normalized to [0, 2π).
    pub angle: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for OrbitLayout {
    fn default() -> Self {
        Self {
            rings: vec![
                Ring {
                    radius: 120.0,
                    angular_speed: TAU / 40.0,
                    phase: 0.0,
                },
                Ring {
                    radius: 180.0,
                    angular_speed: TAU / 60.0,
                    phase: PI / 6.0,
                },
                Ring {
                    radius: 240.0,
                    angular_speed: TAU / 80.0,
                    phase: PI / 3.0,
                },
            ],
            scroll_factor: 0.002,
        }
    }
}

impl OrbitLayout {
    /// Places `count` icons round-robin across the rings, evenly spaced on each.
    /// Odd rings turn the other way.
    pub fn place(&self, count: usize, elapsed: Duration, scroll_y: f64) -> Vec<OrbitNode> {
        let ring_count = self.rings.len();
        if ring_count == 0 {
            return Vec::new();
        }
        let t = elapsed.as_secs_f64();

        (0..count)
            .map(|index| {
                let ring_idx = index % ring_count;
                let slot = index / ring_count;
                let on_ring = nodes_on_ring(count, ring_count, ring_idx);
                let ring = &self.rings[ring_idx];
                let direction = if ring_idx % 2 == 0 { 1.0 } else { -1.0 };

                let angle = ring.phase
                    + TAU * slot as f64 / on_ring as f64
                    + direction * (ring.angular_speed * t + scroll_y * self.scroll_factor);
                let angle = angle.rem_euclid(TAU);

                OrbitNode {
                    index,
                    ring: ring_idx,
                    angle,
                    x: ring.radius * angle.cos(),
                    y: ring.radius * angle.sin(),
                }
            })
            .collect()
    }
}

fn nodes_on_ring(count: usize, ring_count: usize, ring_idx: usize) -> usize {
    count / ring_count + usize::from(ring_idx < count % ring_count)
}
