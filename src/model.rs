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

//! Runs complete simulations

use crate::discretization::Discretization;
use crate::error::{Error, Result};
use crate::history::{HistoryLog, HistoryRecorder, Snapshot};
use crate::marching::{TemperatureField, MAX_STABLE_FOURIER_NUMBER};
use crate::material::PhaseChangeMaterial;
use crate::options::{SimulationOptions, StabilityCheck};
use crate::outdoor::OutdoorSeries;
use crate::phase_change;
use crate::Float;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The state of one run: the discretized wall, its temperatures, and
/// the boundary conditions.
///
/// Nothing in here is shared between runs.
#[derive(Debug, Clone)]
pub struct WallModel {
    discretization: Discretization,
    pcm: PhaseChangeMaterial,
    temperatures: TemperatureField,
    outdoor: OutdoorSeries,
    indoor_temperature: Float,
    dt: Float,
    steps_per_hour: usize,
    step: usize,
    warnings: Vec<String>,
}

impl WallModel {
    /// Validates the `options`, discretizes the wall and sets all
    /// the nodes at the indoor temperature.
    pub fn new(options: &SimulationOptions) -> Result<Self> {
        options.validate()?;
        let outdoor = options.outdoor_series()?;
        let discretization = Discretization::from_options(options)?;
        let mut warnings = discretization.warnings.clone();

        let fourier = discretization.max_fourier_number(&options.pcm, options.dt);
        if fourier > MAX_STABLE_FOURIER_NUMBER {
            let msg = format!(
                "Fourier number {:.4} exceeds {} (dx = {} m, dt = {} s)... the explicit scheme will be unstable",
                fourier, MAX_STABLE_FOURIER_NUMBER, options.dx, options.dt
            );
            match options.stability_check {
                StabilityCheck::Ignore => {}
                StabilityCheck::Warn => {
                    tracing::warn!("{}", msg);
                    warnings.push(msg);
                }
                StabilityCheck::Enforce => return Err(Error::Configuration(msg)),
            }
        }

        let n_nodes = discretization.n_nodes();
        tracing::debug!(
            n_nodes,
            pcm_nodes = discretization.pcm_span.len(),
            fourier,
            "Wall discretized"
        );

        Ok(Self {
            temperatures: TemperatureField::uniform(n_nodes, options.indoor_temperature),
            discretization,
            pcm: options.pcm,
            outdoor,
            indoor_temperature: options.indoor_temperature,
            dt: options.dt,
            steps_per_hour: options.steps_per_hour(),
            step: 0,
            warnings,
        })
    }

    /// Advances one timestep: updates the PCM properties, marches the
    /// temperatures and then forces the boundary temperatures.
    pub fn march(&mut self) {
        let t_out = self.outdoor.temperature_at(self.current_hour());
        let d = &mut self.discretization;
        phase_change::refresh(
            &mut d.field,
            d.pcm_span,
            self.temperatures.temperatures(),
            &self.pcm,
        );
        self.temperatures
            .march(d.field.diffusivity(), self.dt, d.grid.dx());
        self.temperatures.set_boundaries(t_out, self.indoor_temperature);
        self.step += 1;
    }

    /// The hour the next timestep belongs to
    pub fn current_hour(&self) -> usize {
        self.step / self.steps_per_hour
    }

    /// Number of timesteps performed so far
    pub fn steps_done(&self) -> usize {
        self.step
    }

    /// Number of timesteps in one hour
    pub fn steps_per_hour(&self) -> usize {
        self.steps_per_hour
    }

    /// The current temperatures
    pub fn temperatures(&self) -> &[Float] {
        self.temperatures.temperatures()
    }

    /// The discretized wall, including the current PCM properties
    pub fn discretization(&self) -> &Discretization {
        &self.discretization
    }

    /// The exterior temperatures driving the run
    pub fn outdoor(&self) -> &OutdoorSeries {
        &self.outdoor
    }

    /// Non-fatal issues found while setting up the model
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// The outcome of [`simulate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    /// Depth of each node, in $`m`$
    pub positions: Vec<Float>,

    /// One snapshot per simulated hour
    pub history: HistoryLog,

    /// Non-fatal issues (e.g., a clipped PCM layer)
    pub warnings: Vec<String>,
}

impl SimulationResults {
    /// Roughly `n` evenly spaced snapshots, for plotting
    pub fn sample_for_plot(&self, n: usize) -> Vec<&Snapshot> {
        self.history.sample_evenly(n)
    }

    /// Writes roughly `n` evenly spaced snapshots as CSV
    pub fn write_csv<W: Write>(&self, writer: &mut W, n: usize) -> Result<()> {
        HistoryLog::write_csv(writer, &self.positions, &self.sample_for_plot(n))
    }
}

/// Simulates `options.duration_hours` hours, recording the temperatures
/// of the wall at the beginning of each of them.
pub fn simulate(options: &SimulationOptions) -> Result<SimulationResults> {
    let mut model = WallModel::new(options)?;
    let total_steps = options.total_steps();
    let mut recorder = HistoryRecorder::new(model.steps_per_hour(), options.duration_hours);

    tracing::info!(
        hours = options.duration_hours,
        total_steps,
        n_nodes = model.discretization().n_nodes(),
        "Starting simulation"
    );
    for step in 0..total_steps {
        model.march();
        recorder.observe(step, model.temperatures());
    }
    tracing::info!(snapshots = recorder.log().len(), "Simulation finished");

    Ok(SimulationResults {
        positions: model.discretization().grid.positions().to_vec(),
        history: recorder.into_log(),
        warnings: model.warnings().to_vec(),
    })
}

/// Simulates several independent configurations. With the `parallel`
/// feature they run in parallel; the results are the same either way
/// and come in the order of `options`.
pub fn simulate_many(options: &[SimulationOptions]) -> Vec<Result<SimulationResults>> {
    #[cfg(feature = "parallel")]
    let iter = options.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = options.iter();

    iter.map(simulate).collect()
}
