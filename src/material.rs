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

//! Thermal properties of the materials in a wall

use crate::error::{Error, Result};
use crate::Float;
use serde::{Deserialize, Serialize};

/// Checks that a property is finite and strictly positive
pub(crate) fn check_positive(value: Float, what: &str) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::config(format!(
            "{} must be a positive number... found {}",
            what, value
        )));
    }
    Ok(())
}

/// A homogeneous, non-changing solid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Thermal conductivity, in $`W/m.K`$
    pub conductivity: Float,

    /// Density, in $`kg/m^3`$
    pub density: Float,

    /// Specific heat capacity, in $`J/kg.K`$
    pub specific_heat: Float,
}

impl Material {
    /// Creates a new `Material`
    pub fn new(conductivity: Float, density: Float, specific_heat: Float) -> Self {
        Self {
            conductivity,
            density,
            specific_heat,
        }
    }

    /// Thermal diffusivity $`\alpha = \lambda / (\rho c_p)`$, in $`m^2/s`$
    pub fn diffusivity(&self) -> Float {
        self.conductivity / (self.density * self.specific_heat)
    }

    /// Fails if any property is not a positive number. `name`
    /// is used for building the error message.
    pub fn validate(&self, name: &str) -> Result<()> {
        check_positive(self.conductivity, &format!("{} conductivity", name))?;
        check_positive(self.density, &format!("{} density", name))?;
        check_positive(self.specific_heat, &format!("{} specific heat", name))?;
        Ok(())
    }
}

/// A Phase Change Material.
///
/// Its solid and liquid phases share the same sensible properties;
/// the latent heat is absorbed (or released) while the temperature
/// crosses the band $`[T_{melt} - \Delta T, T_{melt} + \Delta T]`$.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseChangeMaterial {
    /// Thermal conductivity, in $`W/m.K`$
    pub conductivity: Float,

    /// Density, in $`kg/m^3`$
    pub density: Float,

    /// Sensible (i.e., outside of the phase change band)
    /// specific heat capacity, in $`J/kg.K`$
    pub specific_heat: Float,

    /// Latent heat of fusion, in $`J/kg`$
    pub latent_heat: Float,

    /// Melting temperature, in $`C`$
    pub melting_temperature: Float,

    /// Half the width of the phase change band, in $`K`$
    pub half_band: Float,
}

impl std::default::Default for PhaseChangeMaterial {
    fn default() -> Self {
        Self {
            conductivity: 0.25,
            density: 900.,
            specific_heat: 2000.,
            latent_heat: 200_000.,
            melting_temperature: 25.,
            half_band: 2.,
        }
    }
}

impl PhaseChangeMaterial {
    /// The sensible properties of the PCM, as a plain [`Material`]
    pub fn sensible(&self) -> Material {
        Material::new(self.conductivity, self.density, self.specific_heat)
    }

    /// The specific heat within the phase change band, in $`J/kg.K`$
    ///
    /// ```math
    /// c_{p,eff} = c_p + \frac{L}{2 \Delta T}
    /// ```
    pub fn latent_specific_heat(&self) -> Float {
        self.specific_heat + self.latent_heat / (2. * self.half_band)
    }

    /// Diffusivity while outside of the phase change band
    pub fn sensible_diffusivity(&self) -> Float {
        self.sensible().diffusivity()
    }

    /// Diffusivity while inside of the phase change band. This is
    /// always lower than the sensible one.
    pub fn latent_diffusivity(&self) -> Float {
        self.conductivity / (self.density * self.latent_specific_heat())
    }

    /// Fails if the sensible properties are not positive, if the latent
    /// heat is negative, or if the half band is not positive (which
    /// would lead to a division by zero).
    pub fn validate(&self) -> Result<()> {
        self.sensible().validate("PCM")?;
        if !self.latent_heat.is_finite() || self.latent_heat < 0.0 {
            return Err(Error::config(format!(
                "PCM latent heat must be zero or positive... found {}",
                self.latent_heat
            )));
        }
        if !self.melting_temperature.is_finite() {
            return Err(Error::config("PCM melting temperature must be finite"));
        }
        check_positive(self.half_band, "PCM phase change half band (dT)")?;
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_diffusivity() {
        let concrete = Material::new(1.5, 2500., 800.);
        let exp = 1.5 / (2500. * 800.);
        assert!((concrete.diffusivity() - exp).abs() < 1e-20);
    }

    #[test]
    fn test_latent_specific_heat() {
        let pcm = PhaseChangeMaterial::default();
        // 2000 + 200000/4
        assert_eq!(pcm.latent_specific_heat(), 52000.);
        assert!(pcm.latent_diffusivity() < pcm.sensible_diffusivity());
    }

    #[test]
    fn test_validate() {
        assert!(Material::new(1.5, 2500., 800.).validate("wall").is_ok());
        assert!(Material::new(0.0, 2500., 800.).validate("wall").is_err());
        assert!(Material::new(1.5, -1., 800.).validate("wall").is_err());
        assert!(Material::new(1.5, 2500., Float::NAN)
            .validate("wall")
            .is_err());

        let mut pcm = PhaseChangeMaterial::default();
        assert!(pcm.validate().is_ok());
        pcm.half_band = 0.0;
        match pcm.validate() {
            Err(Error::Configuration(msg)) => assert!(msg.contains("half band"), "{}", msg),
            other => panic!("expecting a configuration error, found {:?}", other),
        }
        pcm.half_band = -1.0;
        assert!(pcm.validate().is_err());
    }
}
