//! Time-driven collapse of the polyhedron.
//!
//! Everything here is a pure function of `(total, remaining, vertex_count)`.
//! The render loop calls it once per frame and owns the actual vertex buffer.

mod geometry;

pub use geometry::{collapse_vertex, icosahedron_vertices, Vec3};

use serde::Serialize;

/// How far past its threshold a vertex has to be before it is fully collapsed,
/// as the reciprocal: a vertex needs `1 / COLLAPSE_RATE` of session progress.
const COLLAPSE_RATE: f32 = 5.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    Void,
    Singularity,
}

impl Theme {
    pub fn color_hex(&self) -> &'static str {
        match self {
            Theme::Void => "#00ffff",
            Theme::Singularity => "#ffffff",
        }
    }
}

/// Per-vertex blend factors plus the terminal flag.
/// Blend `0.0` leaves a vertex in place, `1.0` puts it on the origin.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisualFrame {
    pub progress: f32,
    pub blend: Vec<f32>,
    pub singularity: bool,
}

impl VisualFrame {
    /// The frame shown when no session is configured.
    pub fn at_rest(vertex_count: usize) -> Self {
        Self {
            progress: 0.0,
            blend: vec![0.0; vertex_count],
            singularity: false,
        }
    }

    pub fn theme(&self) -> Theme {
        if self.singularity {
            Theme::Singularity
        } else {
            Theme::Void
        }
    }

    pub fn is_fully_collapsed(&self) -> bool {
        self.blend.iter().all(|b| *b >= 1.0)
    }
}

pub fn session_progress(total_seconds: u32, remaining_seconds: u32) -> f32 {
    if total_seconds == 0 {
        return 0.0;
    }
    let elapsed = total_seconds as f32 - remaining_seconds as f32;
    (elapsed / total_seconds as f32).clamp(0.0, 1.0)
}

/// Blend factor of vertex `index` out of `vertex_count` at `progress`.
///
/// Vertex `i` starts moving once progress passes `i / vertex_count`. At
/// `progress == 1` every vertex is collapsed, including the tail vertices
/// whose ramp would otherwise not have completed.
pub fn vertex_blend(progress: f32, index: usize, vertex_count: usize) -> f32 {
    if vertex_count == 0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }
    let threshold = index as f32 / vertex_count as f32;
    if progress < threshold {
        return 0.0;
    }
    ((progress - threshold) * COLLAPSE_RATE).clamp(0.0, 1.0)
}

pub fn map_progress(total_seconds: u32, remaining_seconds: u32, vertex_count: usize) -> VisualFrame {
    if total_seconds == 0 {
        return VisualFrame::at_rest(vertex_count);
    }
    let progress = session_progress(total_seconds, remaining_seconds);
    VisualFrame {
        progress,
        blend: (0..vertex_count)
            .map(|index| vertex_blend(progress, index, vertex_count))
            .collect(),
        singularity: remaining_seconds == 0,
    }
}
