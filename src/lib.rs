/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! A Finite Difference-based transient conduction module for walls
//! that may contain a Phase Change Material (PCM) layer.
//!
//! It uses an explicit finite difference scheme for marching forward in time,
//! and the apparent-heat-capacity method (i.e., the latent heat is spread
//! over a temperature band around the melting point) for modelling the
//! phase change.
//!
//! A run goes through the following stages:
//!
//! ```text
//! SimulationOptions ──► Discretization::new() ──► WallModel ──► march() ... ──► HistoryLog
//!                        (grid + materials)              │
//!                          phase_change::refresh() → TemperatureField::march()
//!                                                  → TemperatureField::set_boundaries()
//! ```

#![warn(missing_docs)]

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// The number π
#[cfg(feature = "float")]
pub const PI: Float = std::f32::consts::PI;

/// The number π
#[cfg(not(feature = "float"))]
pub const PI: Float = std::f64::consts::PI;

/// Seconds in one hour
pub const SECONDS_PER_HOUR: Float = 3600.;

pub mod discretization;
pub mod error;
pub mod history;
pub mod marching;
pub mod material;
pub mod model;
pub mod options;
pub mod outdoor;
pub mod phase_change;

pub use discretization::{Discretization, MaterialField, PcmPlacement, PcmSpan, SpatialGrid};
pub use error::{Error, Result};
pub use history::{HistoryLog, Snapshot};
pub use material::{Material, PhaseChangeMaterial};
pub use model::{simulate, simulate_many, SimulationResults, WallModel};
pub use options::{SimulationOptions, SinusoidalProfile, StabilityCheck};
pub use outdoor::OutdoorSeries;
