use crate::models::{Bubble, TallyEntry};
use crate::tally::max_count;
use rand::Rng;
use std::ops::Range;

pub const PALETTE: &[&str] = &[
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9", "#F8C471", "#82E0AA", "#F1948A", "#85C1E9", "#D7BDE2",
];

/// Bubble sizing and placement parameters. Diameters and the margin are in
/// pixels; positions are percentages of the canvas.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub min_diameter: f64,
    pub max_diameter: f64,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub margin: f64,
    pub max_attempts: usize,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub palette: &'static [&'static str],
    pub max_delay: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_diameter: 60.0,
            max_diameter: 200.0,
            x_range: 5.0..85.0,
            y_range: 10.0..70.0,
            margin: 20.0,
            max_attempts: 10,
            canvas_width: 1000.0,
            canvas_height: 600.0,
            palette: PALETTE,
            max_delay: 5.0,
        }
    }
}

/// Centre of a bubble, in canvas percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl LayoutConfig {
    /// Maps `count` linearly from `[1, max_count]` onto the diameter range.
    pub fn size(&self, count: usize, max_count: usize) -> f64 {
        if max_count <= 1 {
            return self.min_diameter;
        }
        let count = count.clamp(1, max_count);
        let ratio = (count - 1) as f64 / (max_count - 1) as f64;
        self.min_diameter + (self.max_diameter - self.min_diameter) * ratio
    }

    /// Scatters one position per diameter, re-sampling crowded items.
    ///
    /// Each item gets at most `max_attempts` re-samples; after that its
    /// overlapping position is kept. This declutters, it does not pack.
    pub fn place<R: Rng + ?Sized>(&self, diameters: &[f64], rng: &mut R) -> Vec<Position> {
        let mut positions: Vec<Position> = diameters.iter().map(|_| self.sample(rng)).collect();

        for index in 0..positions.len() {
            let mut attempts = 0;
            while attempts < self.max_attempts && self.crowded(index, &positions, diameters) {
                positions[index] = self.sample(rng);
                attempts += 1;
            }
        }

        positions
    }

    /// Sizes, places and colours one bubble per tally entry, in rank order.
    pub fn layout<R: Rng + ?Sized>(&self, entries: &[TallyEntry], rng: &mut R) -> Vec<Bubble> {
        let max = max_count(entries);
        let diameters: Vec<f64> = entries
            .iter()
            .map(|entry| self.size(entry.count, max))
            .collect();
        let positions = self.place(&diameters, rng);

        entries
            .iter()
            .zip(diameters)
            .zip(positions)
            .enumerate()
            .map(|(rank, ((entry, diameter), position))| Bubble {
                text: entry.text.clone(),
                count: entry.count,
                diameter,
                x: position.x,
                y: position.y,
                color: self.color(rank),
                delay: if self.max_delay > 0.0 {
                    rng.gen_range(0.0..self.max_delay)
                } else {
                    0.0
                },
            })
            .collect()
    }

    pub fn color(&self, rank: usize) -> &'static str {
        if self.palette.is_empty() {
            return "#cccccc";
        }
        self.palette[rank % self.palette.len()]
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position {
            x: rng.gen_range(self.x_range.clone()),
            y: rng.gen_range(self.y_range.clone()),
        }
    }

    /// Pixel distance between two centres.
    fn distance(&self, a: Position, b: Position) -> f64 {
        let dx = (a.x - b.x) / 100.0 * self.canvas_width;
        let dy = (a.y - b.y) / 100.0 * self.canvas_height;
        dx.hypot(dy)
    }

    fn crowded(&self, index: usize, positions: &[Position], diameters: &[f64]) -> bool {
        positions.iter().enumerate().any(|(other, &position)| {
            other != index
                && self.distance(positions[index], position)
                    < (diameters[index] + diameters[other]) / 2.0 + self.margin
        })
    }
}
