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

//! The inputs of a simulation, with defaults and validation

use crate::discretization::PcmPlacement;
use crate::error::{Error, Result};
use crate::material::{check_positive, Material, PhaseChangeMaterial};
use crate::outdoor::OutdoorSeries;
use crate::{Float, SECONDS_PER_HOUR};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when the explicit scheme might be unstable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityCheck {
    /// Do not check at all
    Ignore,

    /// Report a warning and carry on
    #[default]
    Warn,

    /// Refuse to run
    Enforce,
}

/// The daily cycle used when no outdoor temperatures are given
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SinusoidalProfile {
    /// Mean temperature, in $`C`$
    pub base: Float,

    /// Amplitude of the daily swing, in $`K`$
    pub amplitude: Float,
}

impl std::default::Default for SinusoidalProfile {
    fn default() -> Self {
        Self {
            base: 18.,
            amplitude: 6.,
        }
    }
}

/// Everything needed for simulating a wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    /// Thickness of the wall, in $`m`$
    pub wall_thickness: Float,

    /// The wall's material
    pub wall: Material,

    /// Thickness of the PCM layer, in $`m`$. Zero means no PCM.
    pub pcm_thickness: Float,

    /// The PCM
    pub pcm: PhaseChangeMaterial,

    /// Where the PCM goes
    pub placement: PcmPlacement,

    /// Fixed indoor temperature (i.e., interior boundary), in $`C`$
    pub indoor_temperature: Float,

    /// Hourly outdoor temperatures (i.e., exterior boundary), in $`C`$.
    /// If `None`, they are generated from `sinusoid`.
    pub outdoor_temperatures: Option<Vec<Float>>,

    /// Daily cycle for generating outdoor temperatures
    pub sinusoid: SinusoidalProfile,

    /// Number of hours to simulate
    pub duration_hours: usize,

    /// Distance between nodes, in $`m`$
    pub dx: Float,

    /// Timestep, in seconds
    pub dt: Float,

    /// What to do with potentially unstable combinations of `dx` and `dt`
    pub stability_check: StabilityCheck,
}

impl std::default::Default for SimulationOptions {
    fn default() -> Self {
        Self {
            wall_thickness: 0.2,
            wall: Material::new(1.5, 2500., 800.),
            pcm_thickness: 0.0,
            pcm: PhaseChangeMaterial::default(),
            placement: PcmPlacement::AtExteriorPrefix,
            indoor_temperature: 22.,
            outdoor_temperatures: None,
            sinusoid: SinusoidalProfile::default(),
            duration_hours: 48,
            dx: 0.002,
            dt: 1.,
            stability_check: StabilityCheck::Warn,
        }
    }
}

impl SimulationOptions {
    /// Reads options from a JSON string. Missing fields take
    /// their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        Ok(options)
    }

    /// Reads options from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Number of timesteps in an hour
    pub fn steps_per_hour(&self) -> usize {
        (SECONDS_PER_HOUR / self.dt) as usize
    }

    /// Total number of timesteps in the run
    pub fn total_steps(&self) -> usize {
        self.duration_hours * self.steps_per_hour()
    }

    /// Mass of PCM per unit of wall area, in $`kg/m^2`$
    pub fn pcm_mass_per_area(&self) -> Float {
        self.pcm_thickness * self.pcm.density
    }

    /// The outdoor temperatures to use: the given ones, or the
    /// sinusoidal cycle over `duration_hours`.
    pub fn outdoor_series(&self) -> Result<OutdoorSeries> {
        match &self.outdoor_temperatures {
            Some(values) => OutdoorSeries::explicit(values.clone()),
            None => OutdoorSeries::sinusoidal(
                self.sinusoid.base,
                self.sinusoid.amplitude,
                self.duration_hours,
            ),
        }
    }

    /// Checks the inputs that do not depend on the discretization.
    /// Geometry is checked when building the
    /// [`Discretization`](crate::discretization::Discretization).
    pub fn validate(&self) -> Result<()> {
        check_positive(self.dt, "dt")?;
        if self.steps_per_hour() == 0 {
            return Err(Error::config(format!(
                "dt must not be larger than one hour... found {} s",
                self.dt
            )));
        }
        if self.duration_hours == 0 {
            return Err(Error::config("The simulation must last at least one hour"));
        }
        if !self.indoor_temperature.is_finite() {
            return Err(Error::config("Indoor temperature must be finite"));
        }
        if !self.sinusoid.base.is_finite() || !self.sinusoid.amplitude.is_finite() {
            return Err(Error::config(
                "Base and amplitude of the outdoor temperature cycle must be finite",
            ));
        }
        self.wall.validate("Wall")?;
        self.pcm.validate()?;
        Ok(())
    }
}
