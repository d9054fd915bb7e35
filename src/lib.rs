//! Spherule renders procedural visual patterns onto spherical pixel
//! displays: latitude/longitude grids of LEDs or voxels addressed as a
//! wrapped 2D buffer.
//!
//! The core is a signed-distance rasterization engine defined directly in
//! angular coordinates. Shapes (rings, polygons, stars, flowers, arbitrary
//! spherical-polygon meshes) report a signed angular distance plus
//! conservative pixel bounds; a scanline rasterizer walks the culled pixels,
//! derives sub-pixel anti-aliased coverage from the distance, and hands
//! shaded fragments to a pluggable pixel sink.
//!
//! # Pipeline overview
//!
//! 1. **Map**: [`SphereMap`] precomputes a unit direction per pixel
//! 2. **Shape**: effects build [`Shape`] values once per draw call
//! 3. **Rasterize**: [`rasterize`] culls, samples, covers and shades
//! 4. **Composite**: a [`PixelSink`] blends fragments into the shared
//!    [`FrameBuffer`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Allocation-free hot loop**: one reused [`Sample`] per draw call; no
//!   supersampling, coverage comes from the distance field.
//! - **Sphere topology first**: longitude wraparound, pole singularities and
//!   antipodal folding are handled in the bounds math, not patched up per
//!   effect.
//! - **Single writer**: one logical buffer, mutated synchronously once per
//!   tick; presentation only reads completed ticks.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod grid;
mod pixel;
mod pool;
mod raster;
mod runtime;
mod shape;

pub use foundation::error::{SphereError, SphereResult};
pub use grid::basis::Basis;
pub use grid::config::DisplayConfig;
pub use grid::map::SphereMap;
pub use pixel::blend::{BlendMode, blend};
pub use pixel::buffer::FrameBuffer;
pub use pixel::color::LinearRgb;
pub use pixel::export::to_srgb_image;
pub use pixel::pipeline::{Pipeline, PixelSink, TrailFragment, TrailPipeline};
pub use pool::arena::{Arena, Handle};
pub use raster::scan::{RasterOptions, rasterize};
pub use runtime::clock::TickClock;
pub use runtime::stage::{Effect, FrameArenas, FrameCtx, Stage};
pub use shape::bounds::{RowBounds, Span, SpanSet};
pub use shape::distort::{AzimuthShift, DistortedRing};
pub use shape::face::{Face, MAX_VERTEX_SPREAD};
pub use shape::mesh::Mesh;
pub use shape::polygon::{Flower, SphericalPolygon, Star};
pub use shape::ring::Ring;
pub use shape::sample::{Bary, Sample};
pub use shape::{RenderStyle, Shape};
