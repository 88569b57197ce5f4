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

//! Marches the temperatures of a wall forward in time.
//!
//! The heat equation
//!
//! ```math
//! \frac{\partial T}{\partial t} = \alpha \frac{\partial^2 T}{\partial x^2}
//! ```
//!
//! is solved with an explicit (i.e., forward Euler) finite difference scheme:
//!
//! ```math
//! T_i^{n+1} = T_i^n + \frac{\alpha_i \Delta t}{\Delta x^2} \left( T_{i+1}^n - 2 T_i^n + T_{i-1}^n \right)
//! ```
//!
//! All the new values are calculated from the old ones (i.e., it is a Jacobi
//! sweep, so there is no directional bias). The first and last nodes are
//! not part of the stencil: they are set by Dirichlet boundary conditions.
//!
//! This scheme is stable only if the Fourier number $`\alpha \Delta t / \Delta x^2`$
//! does not exceed [`MAX_STABLE_FOURIER_NUMBER`] in any node. Nothing in here
//! checks that; unstable combinations just produce oscillating, unbounded
//! temperatures.

use crate::Float;

/// The largest Fourier number for which the explicit scheme is stable
pub const MAX_STABLE_FOURIER_NUMBER: Float = 0.5;

/// Calculates the Fourier number $`\alpha \Delta t / \Delta x^2`$
pub fn fourier_number(diffusivity: Float, dt: Float, dx: Float) -> Float {
    diffusivity * dt / (dx * dx)
}

/// The temperature of each node of a wall, in $`C`$.
///
/// It keeps a second buffer so that marching does not allocate.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureField {
    temperatures: Vec<Float>,
    previous: Vec<Float>,
}

impl TemperatureField {
    /// Creates a field of `n_nodes` nodes, all at `temperature`
    pub fn uniform(n_nodes: usize, temperature: Float) -> Self {
        Self {
            temperatures: vec![temperature; n_nodes],
            previous: vec![temperature; n_nodes],
        }
    }

    /// Creates a field from given temperatures
    pub fn from_temperatures(temperatures: Vec<Float>) -> Self {
        let previous = temperatures.clone();
        Self {
            temperatures,
            previous,
        }
    }

    /// The current temperatures
    pub fn temperatures(&self) -> &[Float] {
        &self.temperatures
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    /// Checks whether the field has no nodes
    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// Advances the interior nodes by one timestep `dt` using the
    /// given per-node `diffusivity`. The boundary nodes keep their values.
    pub fn march(&mut self, diffusivity: &[Float], dt: Float, dx: Float) {
        let n = self.temperatures.len();
        assert_eq!(
            diffusivity.len(),
            n,
            "Expecting {} diffusivities... found {}",
            n,
            diffusivity.len()
        );
        std::mem::swap(&mut self.temperatures, &mut self.previous);
        let t = &self.previous;
        let dx2 = dx * dx;

        self.temperatures[0] = t[0];
        self.temperatures[n - 1] = t[n - 1];
        for i in 1..n - 1 {
            self.temperatures[i] =
                t[i] + diffusivity[i] * dt / dx2 * (t[i + 1] - 2. * t[i] + t[i - 1]);
        }
    }

    /// Forces the exterior (first) and interior (last) nodes
    pub fn set_boundaries(&mut self, exterior: Float, interior: Float) {
        let n = self.temperatures.len();
        self.temperatures[0] = exterior;
        self.temperatures[n - 1] = interior;
    }
}
