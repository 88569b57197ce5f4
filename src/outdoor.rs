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

//! Hourly exterior temperatures

use crate::error::{Error, Result};
use crate::{Float, PI};
use serde::{Deserialize, Serialize};

/// An ordered sequence of exterior temperatures, one per hour.
///
/// It always holds at least one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Float>", into = "Vec<Float>")]
pub struct OutdoorSeries {
    temperatures: Vec<Float>,
}

impl OutdoorSeries {
    /// Wraps a user-given series. Fails if it is empty or if any
    /// value is not finite.
    pub fn explicit(temperatures: Vec<Float>) -> Result<Self> {
        if temperatures.is_empty() {
            return Err(Error::config("The outdoor temperature series is empty"));
        }
        if let Some(t) = temperatures.iter().find(|t| !t.is_finite()) {
            return Err(Error::config(format!(
                "Found a non-finite outdoor temperature ({})",
                t
            )));
        }
        Ok(Self { temperatures })
    }

    /// Generates a daily cycle of `hours` values:
    ///
    /// ```math
    /// T(h) = T_{base} + A \sin\left(\frac{2 \pi h}{24}\right)
    /// ```
    ///
    /// Fails if `hours` is zero or if `base` or `amplitude` are not finite.
    pub fn sinusoidal(base: Float, amplitude: Float, hours: usize) -> Result<Self> {
        if hours == 0 {
            return Err(Error::config(
                "The outdoor temperature cycle must cover at least one hour",
            ));
        }
        let temperatures = (0..hours)
            .map(|h| base + amplitude * (2. * PI * h as Float / 24.).sin())
            .collect();
        Self::explicit(temperatures)
    }

    /// The temperature at `hour`. Hours past the end of the series
    /// get the last available value.
    pub fn temperature_at(&self, hour: usize) -> Float {
        let i = hour.min(self.temperatures.len() - 1);
        self.temperatures[i]
    }

    /// Number of hours in the series
    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    /// Always `false`: a series cannot be built without values
    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// The raw values
    pub fn temperatures(&self) -> &[Float] {
        &self.temperatures
    }
}

impl TryFrom<Vec<Float>> for OutdoorSeries {
    type Error = Error;

    fn try_from(temperatures: Vec<Float>) -> Result<Self> {
        Self::explicit(temperatures)
    }
}

impl From<OutdoorSeries> for Vec<Float> {
    fn from(series: OutdoorSeries) -> Self {
        series.temperatures
    }
}
