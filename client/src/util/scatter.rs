//! 2-D projection of chunk embeddings for the vector view.
//!
//! The backend already reduces embeddings to three components; the view
//! plots the first two on an SVG canvas and maps the third to point radius.

#[cfg(test)]
#[path = "scatter_test.rs"]
mod scatter_test;

use frames::api::VectorGroups;

const PALETTE: [&str; 8] = ["#f59e0b", "#3b82f6", "#10b981", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#84cc16"];
const MIN_RADIUS: f64 = 3.0;
const MAX_RADIUS: f64 = 7.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub group: usize,
    pub color: &'static str,
    pub uuid: String,
    pub chunk_id: u64,
}

/// Color for a document group, cycling through a fixed palette.
pub fn group_color(group: usize) -> &'static str {
    PALETTE[group % PALETTE.len()]
}

/// Fit every chunk into a `size` x `size` canvas with `padding` on each side.
/// A degenerate axis (all points equal) is centred.
pub fn project(groups: &VectorGroups, size: f64, padding: f64) -> Vec<ScatterPoint> {
    let all = groups.groups.iter().flat_map(|g| g.chunks.iter().map(|c| c.vector));
    let Some(bounds) = Bounds::of(all) else {
        return Vec::new();
    };
    let span = (size - 2.0 * padding).max(0.0);

    groups
        .groups
        .iter()
        .enumerate()
        .flat_map(|(group, g)| {
            g.chunks.iter().map(move |chunk| ScatterPoint {
                x: padding + bounds.x.scale(chunk.vector.x) * span,
                // SVG y grows downwards.
                y: padding + (1.0 - bounds.y.scale(chunk.vector.y)) * span,
                radius: MIN_RADIUS + bounds.z.scale(chunk.vector.z) * (MAX_RADIUS - MIN_RADIUS),
                group,
                color: group_color(group),
                uuid: chunk.uuid.clone(),
                chunk_id: chunk.chunk_id,
            })
        })
        .collect()
}

#[derive(Clone, Copy)]
struct Range {
    min: f64,
    max: f64,
}

impl Range {
    fn new(v: f64) -> Self {
        Self { min: v, max: v }
    }

    fn include(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    /// Position of `v` in `[0, 1]`; 0.5 when the range is empty.
    fn scale(self, v: f64) -> f64 {
        let width = self.max - self.min;
        if width <= f64::EPSILON { 0.5 } else { (v - self.min) / width }
    }
}

#[derive(Clone, Copy)]
struct Bounds {
    x: Range,
    y: Range,
    z: Range,
}

impl Bounds {
    fn of(mut vectors: impl Iterator<Item = frames::api::Vector3>) -> Option<Self> {
        let first = vectors.next()?;
        let mut bounds = Self { x: Range::new(first.x), y: Range::new(first.y), z: Range::new(first.z) };
        for v in vectors {
            bounds.x.include(v.x);
            bounds.y.include(v.y);
            bounds.z.include(v.z);
        }
        Some(bounds)
    }
}
