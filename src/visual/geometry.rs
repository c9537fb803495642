//! Sacred geometry point sets
//!
//! All coordinates are in an abstract plane; the renderer maps them to pixels.

use crate::resonator::GOLDEN_PHI;
use std::f32::consts::{PI, TAU};

pub type Point = (f32, f32);

const SPIRAL_POINTS: usize = 100;
const SPIRAL_STEP: f32 = 0.1;
const CIRCLE_POINTS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct SacredGeometry {
    pub name: String,
    pub vertices: Vec<Point>,
    pub frequency: f32,
    pub consciousness_correlation: &'static str,
}

/// Consciousness register of a frequency
pub fn frequency_to_consciousness(frequency: f32) -> &'static str {
    if frequency < 50.0 {
        "grounding_stability"
    } else if frequency < 200.0 {
        "emotional_flow"
    } else if frequency < 800.0 {
        "mental_clarity"
    } else if frequency < 2000.0 {
        "intuitive_awareness"
    } else {
        "transcendent_consciousness"
    }
}

/// Polygon vertex count grows with frequency
pub fn vertex_count(frequency: f32) -> usize {
    if frequency < 100.0 {
        3
    } else if frequency < 500.0 {
        5
    } else if frequency < 1000.0 {
        6
    } else if frequency < 2000.0 {
        8
    } else {
        12
    }
}

/// Points evenly spaced on a circle, starting at angle zero
pub fn circle(center: Point, radius: f32, points: usize) -> Vec<Point> {
    (0..points)
        .map(|i| {
            let a = TAU * i as f32 / points as f32;
            (center.0 + radius * a.cos(), center.1 + radius * a.sin())
        })
        .collect()
}

/// One polygon per frequency, radius growing with log frequency
pub fn frequency_mandala(center: Point, frequencies: &[f32], radius: f32) -> Vec<SacredGeometry> {
    frequencies
        .iter()
        .enumerate()
        .map(|(i, &freq)| {
            let scale = 0.2 + 0.8 * freq.max(1.0).log10() / 4.0;
            SacredGeometry {
                name: format!("frequency_mandala_{}", i),
                vertices: circle(center, radius * scale, vertex_count(freq)),
                frequency: freq,
                consciousness_correlation: frequency_to_consciousness(freq),
            }
        })
        .collect()
}

/// Logarithmic spiral growing by phi every full turn
pub fn golden_spiral(center: Point, scale: f32) -> Vec<Point> {
    let growth = GOLDEN_PHI.ln() / TAU;
    (0..SPIRAL_POINTS)
        .map(|i| {
            let theta = i as f32 * SPIRAL_STEP;
            let r = scale * (growth * theta).exp();
            (center.0 + r * theta.cos(), center.1 + r * theta.sin())
        })
        .collect()
}

/// Centre circle followed by six petals on its rim
pub fn flower_of_life(center: Point, radius: f32) -> Vec<Vec<Point>> {
    let mut circles = vec![circle(center, radius, CIRCLE_POINTS)];
    for i in 0..6 {
        let a = i as f32 * PI / 3.0;
        let c = (center.0 + radius * a.cos(), center.1 + radius * a.sin());
        circles.push(circle(c, radius, CIRCLE_POINTS));
    }
    circles
}
