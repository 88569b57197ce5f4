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

use anyhow::Context;
use clap::Parser;
use pcm_wall::{simulate, Float, PcmPlacement, SimulationOptions};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Simulates the temperature profile through a wall with an optional PCM layer.
///
/// Options are taken from `--config` (or the defaults), and then
/// overridden by any other flag given.
#[derive(Parser, Debug)]
#[command(name = "pcm_wall", about, long_about = None)]
struct Cli {
    /// JSON file with the simulation options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wall thickness (m)
    #[arg(long)]
    wall_thickness: Option<Float>,

    /// Wall thermal conductivity (W/m.K)
    #[arg(long)]
    wall_k: Option<Float>,

    /// Wall density (kg/m3)
    #[arg(long)]
    wall_rho: Option<Float>,

    /// Wall specific heat capacity (J/kg.K)
    #[arg(long)]
    wall_cp: Option<Float>,

    /// PCM layer thickness (m); 0 means no PCM
    #[arg(long)]
    pcm_thickness: Option<Float>,

    /// Position of the PCM as a fraction of the wall thickness, from the
    /// exterior. Without it, the PCM is attached to the exterior face.
    #[arg(long)]
    pcm_position: Option<Float>,

    /// PCM thermal conductivity (W/m.K)
    #[arg(long)]
    pcm_k: Option<Float>,

    /// PCM density (kg/m3)
    #[arg(long)]
    pcm_rho: Option<Float>,

    /// PCM specific heat (J/kg.K)
    #[arg(long)]
    pcm_cp: Option<Float>,

    /// PCM latent heat (J/kg)
    #[arg(long)]
    pcm_latent_heat: Option<Float>,

    /// PCM melting temperature (C)
    #[arg(long)]
    pcm_tmelt: Option<Float>,

    /// Half width of the phase change range (+/- C)
    #[arg(long)]
    pcm_dt: Option<Float>,

    /// Indoor temperature (C)
    #[arg(long)]
    indoor_temp: Option<Float>,

    /// Simulation duration (hours)
    #[arg(long)]
    duration: Option<usize>,

    /// Spatial step (m)
    #[arg(long)]
    dx: Option<Float>,

    /// Time step (s)
    #[arg(long)]
    dt: Option<Float>,

    /// Daily outdoor temperature swing amplitude (C)
    #[arg(long)]
    amplitude: Option<Float>,

    /// Mean outdoor temperature (C)
    #[arg(long)]
    base_outdoor_temp: Option<Float>,

    /// Number of (evenly spaced) hourly profiles to write
    #[arg(long, default_value_t = 10)]
    snapshots: usize,

    /// CSV output file; stdout if not given
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn options(&self) -> anyhow::Result<SimulationOptions> {
        let mut o = match &self.config {
            Some(path) => SimulationOptions::from_json_file(path)
                .with_context(|| format!("Could not read options from {:?}", path))?,
            None => SimulationOptions::default(),
        };

        macro_rules! set {
            ($field:expr, $value:expr) => {
                if let Some(v) = $value {
                    $field = v;
                }
            };
        }
        set!(o.wall_thickness, self.wall_thickness);
        set!(o.wall.conductivity, self.wall_k);
        set!(o.wall.density, self.wall_rho);
        set!(o.wall.specific_heat, self.wall_cp);
        set!(o.pcm_thickness, self.pcm_thickness);
        set!(o.pcm.conductivity, self.pcm_k);
        set!(o.pcm.density, self.pcm_rho);
        set!(o.pcm.specific_heat, self.pcm_cp);
        set!(o.pcm.latent_heat, self.pcm_latent_heat);
        set!(o.pcm.melting_temperature, self.pcm_tmelt);
        set!(o.pcm.half_band, self.pcm_dt);
        set!(o.indoor_temperature, self.indoor_temp);
        set!(o.duration_hours, self.duration);
        set!(o.dx, self.dx);
        set!(o.dt, self.dt);
        set!(o.sinusoid.amplitude, self.amplitude);
        set!(o.sinusoid.base, self.base_outdoor_temp);
        if let Some(fraction) = self.pcm_position {
            o.placement = PcmPlacement::AtRelativePosition(fraction);
        }
        Ok(o)
    }
}

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    let cli = Cli::parse();
    let options = cli.options()?;

    if options.pcm_thickness > 0.0 {
        tracing::info!(
            "PCM mass per unit of wall area: {:.3} kg/m2",
            options.pcm_mass_per_area()
        );
    }

    let results = simulate(&options)?;

    match &cli.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Could not create {:?}", path))?;
            results.write_csv(&mut file, cli.snapshots)?;
            tracing::info!("Temperature profiles saved to {:?}", path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            results.write_csv(&mut lock, cli.snapshots)?;
        }
    }

    Ok(())
}
