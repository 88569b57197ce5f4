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

//! Hourly snapshots of the temperatures within the wall

use crate::error::{Error, Result};
use crate::Float;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// The temperatures of all the nodes at a certain hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Elapsed simulated hours when the snapshot was taken
    pub hour: usize,

    /// Node temperatures, in $`C`$, from exterior to interior
    pub temperatures: Vec<Float>,
}

/// Append-only record of [`Snapshot`]s, one per simulated hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    snapshots: Vec<Snapshot>,
}

impl HistoryLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log with room for `hours` snapshots
    pub fn with_capacity(hours: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(hours),
        }
    }

    /// Appends a copy of `temperatures`
    pub fn record(&mut self, hour: usize, temperatures: &[Float]) {
        self.snapshots.push(Snapshot {
            hour,
            temperatures: temperatures.to_vec(),
        });
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Checks whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All the snapshots, in chronological order
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Iterates over the snapshots
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// Gets the `i`-th snapshot
    pub fn get(&self, i: usize) -> Option<&Snapshot> {
        self.snapshots.get(i)
    }

    /// Selects roughly `n` evenly spaced snapshots (i.e., every
    /// `max(1, len/n)`-th one), starting from the first.
    pub fn sample_evenly(&self, n: usize) -> Vec<&Snapshot> {
        let stride = (self.snapshots.len() / n.max(1)).max(1);
        self.snapshots.iter().step_by(stride).collect()
    }

    /// Writes `snapshots` as CSV: a `depth_m` column with the `positions`
    /// of the nodes, followed by one column per snapshot (labelled as
    /// `"{hour}h"`).
    pub fn write_csv<W: Write>(
        writer: &mut W,
        positions: &[Float],
        snapshots: &[&Snapshot],
    ) -> Result<()> {
        if let Some(s) = snapshots.iter().find(|s| s.temperatures.len() != positions.len()) {
            return Err(Error::Serialization(format!(
                "Snapshot of hour {} has {} temperatures but there are {} positions",
                s.hour,
                s.temperatures.len(),
                positions.len()
            )));
        }

        write!(writer, "depth_m")?;
        for s in snapshots {
            write!(writer, ",{}h", s.hour)?;
        }
        writeln!(writer)?;

        for (i, x) in positions.iter().enumerate() {
            write!(writer, "{}", x)?;
            for s in snapshots {
                write!(writer, ",{}", s.temperatures[i])?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

/// Decides when the [`HistoryLog`] has to be fed.
///
/// A snapshot is taken at the end of the first timestep of every
/// simulated hour (including hour zero).
#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    steps_per_hour: usize,
    log: HistoryLog,
}

impl HistoryRecorder {
    /// Creates a recorder for a run of `hours` hours with
    /// `steps_per_hour` timesteps per hour.
    pub fn new(steps_per_hour: usize, hours: usize) -> Self {
        assert!(steps_per_hour > 0, "Expecting at least one step per hour");
        Self {
            steps_per_hour,
            log: HistoryLog::with_capacity(hours),
        }
    }

    /// Records `temperatures` if `step` is the first one of an hour
    pub fn observe(&mut self, step: usize, temperatures: &[Float]) {
        if step % self.steps_per_hour == 0 {
            self.log.record(step / self.steps_per_hour, temperatures);
        }
    }

    /// The log collected so far
    pub fn log(&self) -> &HistoryLog {
        &self.log
    }

    /// Returns the collected log
    pub fn into_log(self) -> HistoryLog {
        self.log
    }
}
