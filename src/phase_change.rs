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

//! Apparent heat capacity model of the phase change.
//!
//! The latent heat $`L`$ is spread uniformly over the band
//! $`[T_{melt} - \Delta T, T_{melt} + \Delta T]`$, so a node in that
//! band behaves as if its specific heat was
//!
//! ```math
//! c_{p,eff} = c_p + \frac{L}{2 \Delta T}
//! ```
//!
//! The model has no memory: the phase state of a node is decided
//! only by its current temperature.

use crate::discretization::{MaterialField, PcmSpan};
use crate::material::PhaseChangeMaterial;
use crate::Float;

/// Checks whether `temperature` is within the phase change band
pub fn in_phase_change_band(temperature: Float, pcm: &PhaseChangeMaterial) -> bool {
    (temperature - pcm.melting_temperature).abs() <= pcm.half_band
}

/// The effective specific heat of a PCM node at `temperature`
pub fn effective_specific_heat(temperature: Float, pcm: &PhaseChangeMaterial) -> Float {
    if in_phase_change_band(temperature, pcm) {
        pcm.latent_specific_heat()
    } else {
        pcm.specific_heat
    }
}

/// Updates the specific heat and diffusivity of the PCM nodes
/// according to their current temperatures. Nodes outside of `span`
/// are left untouched.
pub fn refresh(
    field: &mut MaterialField,
    span: PcmSpan,
    temperatures: &[Float],
    pcm: &PhaseChangeMaterial,
) {
    debug_assert_eq!(field.len(), temperatures.len());
    for i in span.range() {
        field.set_specific_heat(i, effective_specific_heat(temperatures[i], pcm));
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::material::Material;

    #[test]
    fn test_effective_specific_heat() {
        let pcm = PhaseChangeMaterial::default();
        let bumped = pcm.specific_heat + pcm.latent_heat / (2. * pcm.half_band);

        // Band is [23, 27]
        assert_eq!(effective_specific_heat(25., &pcm), bumped);
        assert_eq!(effective_specific_heat(23., &pcm), bumped);
        assert_eq!(effective_specific_heat(27., &pcm), bumped);
        assert_eq!(effective_specific_heat(24.5, &pcm), bumped);
        assert_eq!(effective_specific_heat(22.99, &pcm), pcm.specific_heat);
        assert_eq!(effective_specific_heat(27.01, &pcm), pcm.specific_heat);
        assert_eq!(effective_specific_heat(-10., &pcm), pcm.specific_heat);
    }

    #[test]
    fn test_refresh_is_local() {
        let pcm = PhaseChangeMaterial::default();
        let wall = Material::new(1.5, 2500., 800.);
        let mut field = MaterialField::homogeneous(&wall, 6);
        let span = PcmSpan { start: 1, end: 4 };
        field.assign(span, &pcm.sensible());

        // Every node at the melting point
        let temperatures = vec![25.; 6];
        refresh(&mut field, span, &temperatures, &pcm);

        for i in 0..6 {
            if span.contains(i) {
                assert_eq!(field.specific_heat()[i], pcm.latent_specific_heat());
                assert_eq!(field.diffusivity()[i], pcm.latent_diffusivity());
            } else {
                assert_eq!(field.specific_heat()[i], wall.specific_heat);
                assert_eq!(field.diffusivity()[i], wall.diffusivity());
            }
        }

        // And back to solid
        let temperatures = vec![10.; 6];
        refresh(&mut field, span, &temperatures, &pcm);
        for i in span.range() {
            assert_eq!(field.specific_heat()[i], pcm.specific_heat);
            assert_eq!(field.diffusivity()[i], pcm.sensible_diffusivity());
        }
    }
}
