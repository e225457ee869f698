// sweep-cdt: sweep-line constrained triangulation of 2D polygons
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod error;
pub mod front;
pub mod geom;
pub mod mesh;
pub mod preprocess;
mod sweep;
pub mod triangulator;

pub use error::{Result, TriangulationError};
pub use geom::{Point, Real};
pub use mesh::{Edge, VertIdx};
pub use sweep::{DEFAULT_MARGIN, SYNTHETIC_POINTS};
pub use triangulator::{normalize, triangulate, TriOption, Triangulation, Triangulator};
