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

//! Spatial discretization of a wall and of its (optional) PCM layer.

use crate::error::{Error, Result};
use crate::material::{check_positive, Material, PhaseChangeMaterial};
use crate::options::SimulationOptions;
use crate::Float;
use serde::{Deserialize, Serialize};

/// Where the PCM layer sits within the wall.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PcmPlacement {
    /// The PCM is an extra layer attached to the exterior face of
    /// the wall. The total thickness of the domain is the wall's plus
    /// the PCM's.
    #[default]
    AtExteriorPrefix,

    /// The PCM replaces part of the wall, starting at the given fraction
    /// (between 0 and 1) of the wall thickness, measured from
    /// the exterior. The total thickness of the domain is the wall's.
    AtRelativePosition(Float),
}

/// A uniform, one-dimensional grid. Node `0` is the exterior face
/// and the last node faces the interior.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    dx: Float,
    positions: Vec<Float>,
}

impl SpatialGrid {
    /// Creates a grid of `floor(total_thickness / dx)` nodes.
    ///
    /// Fails if `dx` is not positive or if there would be
    /// fewer than 3 nodes (i.e., no interior node).
    pub fn new(total_thickness: Float, dx: Float) -> Result<Self> {
        check_positive(dx, "dx")?;
        check_positive(total_thickness, "Total thickness")?;
        let n_nodes = (total_thickness / dx) as usize;
        if n_nodes < 3 {
            return Err(Error::config(format!(
                "A thickness of {} m discretized with dx = {} m results in {} nodes... at least 3 are needed",
                total_thickness, dx, n_nodes
            )));
        }
        let positions = (0..n_nodes).map(|i| i as Float * dx).collect();
        Ok(Self { dx, positions })
    }

    /// The distance between nodes, in $`m`$
    pub fn dx(&self) -> Float {
        self.dx
    }

    /// The number of nodes
    pub fn n_nodes(&self) -> usize {
        self.positions.len()
    }

    /// The depth of each node, in $`m`$, measured from the exterior
    pub fn positions(&self) -> &[Float] {
        &self.positions
    }
}

/// The range of nodes `[start, end)` occupied by the PCM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PcmSpan {
    /// First PCM node
    pub start: usize,
    /// One past the last PCM node
    pub end: usize,
}

impl PcmSpan {
    /// The number of PCM nodes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Checks whether there is any PCM at all
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Checks whether node `i` is made of PCM
    pub fn contains(&self, i: usize) -> bool {
        i >= self.start && i < self.end
    }

    /// The PCM nodes, as a range
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Per-node material properties.
///
/// Only the specific heat (and therefore the diffusivity) of the PCM
/// nodes changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialField {
    conductivity: Vec<Float>,
    density: Vec<Float>,
    specific_heat: Vec<Float>,
    diffusivity: Vec<Float>,
}

impl MaterialField {
    /// Creates a field where all `n_nodes` nodes are made of `material`
    pub fn homogeneous(material: &Material, n_nodes: usize) -> Self {
        Self {
            conductivity: vec![material.conductivity; n_nodes],
            density: vec![material.density; n_nodes],
            specific_heat: vec![material.specific_heat; n_nodes],
            diffusivity: vec![material.diffusivity(); n_nodes],
        }
    }

    /// Overwrites the nodes in `span` with `material`
    pub fn assign(&mut self, span: PcmSpan, material: &Material) {
        let alpha = material.diffusivity();
        for i in span.range() {
            self.conductivity[i] = material.conductivity;
            self.density[i] = material.density;
            self.specific_heat[i] = material.specific_heat;
            self.diffusivity[i] = alpha;
        }
    }

    /// Sets the specific heat of node `i` and recalculates its diffusivity
    pub fn set_specific_heat(&mut self, i: usize, cp: Float) {
        self.specific_heat[i] = cp;
        self.diffusivity[i] = self.conductivity[i] / (self.density[i] * cp);
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.conductivity.len()
    }

    /// Checks whether the field has no nodes
    pub fn is_empty(&self) -> bool {
        self.conductivity.is_empty()
    }

    /// Thermal conductivity of each node
    pub fn conductivity(&self) -> &[Float] {
        &self.conductivity
    }

    /// Density of each node
    pub fn density(&self) -> &[Float] {
        &self.density
    }

    /// Current specific heat of each node
    pub fn specific_heat(&self) -> &[Float] {
        &self.specific_heat
    }

    /// Current diffusivity of each node
    pub fn diffusivity(&self) -> &[Float] {
        &self.diffusivity
    }
}

/// The discretization of a wall: its grid, the materials of each
/// node, and where the PCM is.
#[derive(Debug, Clone, PartialEq)]
pub struct Discretization {
    /// The nodes
    pub grid: SpatialGrid,

    /// Material properties of each node
    pub field: MaterialField,

    /// The nodes occupied by PCM
    pub pcm_span: PcmSpan,

    /// The thickness of PCM actually represented in the grid, in $`m`$.
    /// It is smaller than the requested one when the PCM layer had
    /// to be clipped.
    pub pcm_thickness: Float,

    /// Non-fatal issues found while discretizing
    pub warnings: Vec<String>,
}

impl Discretization {
    /// Discretizes a wall of thickness `wall_thickness` that contains a
    /// `pcm_thickness` layer of PCM (zero means no PCM) placed according
    /// to `placement`.
    ///
    /// A PCM layer that would extend past the interior face is clipped,
    /// producing a warning rather than an error.
    pub fn new(
        wall_thickness: Float,
        wall: &Material,
        pcm_thickness: Float,
        pcm: &PhaseChangeMaterial,
        placement: PcmPlacement,
        dx: Float,
    ) -> Result<Self> {
        check_positive(dx, "dx")?;
        check_positive(wall_thickness, "Wall thickness")?;
        wall.validate("Wall")?;
        if !pcm_thickness.is_finite() || pcm_thickness < 0.0 {
            return Err(Error::config(format!(
                "PCM thickness must be zero or positive... found {}",
                pcm_thickness
            )));
        }
        if let PcmPlacement::AtRelativePosition(fraction) = placement {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(Error::config(format!(
                    "The relative position of the PCM must be between 0 and 1... found {}",
                    fraction
                )));
            }
        }

        let total_thickness = match placement {
            PcmPlacement::AtExteriorPrefix => wall_thickness + pcm_thickness,
            PcmPlacement::AtRelativePosition(_) => wall_thickness,
        };
        let grid = SpatialGrid::new(total_thickness, dx)?;
        let n_nodes = grid.n_nodes();
        let mut warnings = Vec::new();

        let pcm_nodes = (pcm_thickness / dx) as usize;
        if pcm_thickness > 0.0 && pcm_nodes == 0 {
            warnings.push(format!(
                "PCM layer of {} m is thinner than dx = {} m, so it is ignored",
                pcm_thickness, dx
            ));
        }

        let pcm_span = match placement {
            PcmPlacement::AtExteriorPrefix => PcmSpan {
                start: 0,
                end: pcm_nodes.min(n_nodes),
            },
            PcmPlacement::AtRelativePosition(fraction) => {
                let start = ((fraction * wall_thickness / dx) as usize).min(n_nodes);
                let requested_end = start.saturating_add(pcm_nodes);
                if requested_end > n_nodes {
                    let clipped = (n_nodes - start) as Float * dx;
                    warnings.push(format!(
                        "PCM layer at relative position {} extends past the interior face of the wall... its thickness was truncated from {} m to {} m",
                        fraction, pcm_thickness, clipped
                    ));
                }
                PcmSpan {
                    start,
                    end: requested_end.min(n_nodes),
                }
            }
        };
        debug_assert!(pcm_span.start <= pcm_span.end && pcm_span.end <= n_nodes);

        let mut field = MaterialField::homogeneous(wall, n_nodes);
        if !pcm_span.is_empty() {
            field.assign(pcm_span, &pcm.sensible());
        }

        for w in &warnings {
            tracing::warn!("{}", w);
        }

        Ok(Self {
            grid,
            field,
            pcm_span,
            pcm_thickness: pcm_span.len() as Float * dx,
            warnings,
        })
    }

    /// Discretizes the wall described in a [`SimulationOptions`]
    pub fn from_options(options: &SimulationOptions) -> Result<Self> {
        Self::new(
            options.wall_thickness,
            &options.wall,
            options.pcm_thickness,
            &options.pcm,
            options.placement,
            options.dx,
        )
    }

    /// Number of nodes
    pub fn n_nodes(&self) -> usize {
        self.grid.n_nodes()
    }

    /// Checks whether there is any PCM in the wall
    pub fn has_pcm(&self) -> bool {
        !self.pcm_span.is_empty()
    }

    /// The largest diffusivity any node can reach during a run, considering
    /// both phase states of the PCM nodes.
    pub fn max_diffusivity(&self, pcm: &PhaseChangeMaterial) -> Float {
        let mut max: Float = 0.0;
        for (i, alpha) in self.field.diffusivity().iter().enumerate() {
            if !self.pcm_span.contains(i) {
                max = max.max(*alpha);
            }
        }
        if self.has_pcm() {
            max = max
                .max(pcm.sensible_diffusivity())
                .max(pcm.latent_diffusivity());
        }
        max
    }

    /// The worst-case Fourier number (i.e., $`\alpha_{max} \Delta t / \Delta x^2`$)
    /// for a timestep `dt`. The explicit scheme is stable only if this is
    /// not greater than $`0.5`$.
    pub fn max_fourier_number(&self, pcm: &PhaseChangeMaterial, dt: Float) -> Float {
        let dx = self.grid.dx();
        self.max_diffusivity(pcm) * dt / (dx * dx)
    }
}
