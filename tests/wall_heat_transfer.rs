use pcm_wall::{
    simulate, Discretization, Error, Float, Material, PcmPlacement, PhaseChangeMaterial,
    SimulationOptions, StabilityCheck,
};

/// The concrete wall of the reference scenario
fn concrete_options() -> SimulationOptions {
    SimulationOptions {
        wall_thickness: 0.2,
        wall: Material::new(1.5, 2500., 800.),
        pcm_thickness: 0.0,
        indoor_temperature: 22.,
        outdoor_temperatures: Some(vec![10.]),
        duration_hours: 5,
        dx: 0.01,
        dt: 1.0,
        ..SimulationOptions::default()
    }
}

/// Straightforward explicit march of a homogeneous wall, for comparison
fn homogeneous_march(options: &SimulationOptions) -> Vec<Vec<Float>> {
    let n = (options.wall_thickness / options.dx) as usize;
    let alpha = options.wall.diffusivity();
    let dt = options.dt;
    let dx2 = options.dx * options.dx;
    let steps_per_hour = (3600. / dt) as usize;
    let outdoor = options.outdoor_temperatures.clone().unwrap();

    let mut t = vec![options.indoor_temperature; n];
    let mut history = Vec::new();
    for step in 0..options.duration_hours * steps_per_hour {
        let hour = step / steps_per_hour;
        let mut t_new = t.clone();
        for i in 1..n - 1 {
            t_new[i] = t[i] + alpha * dt / dx2 * (t[i + 1] - 2. * t[i] + t[i - 1]);
        }
        t_new[0] = outdoor[hour.min(outdoor.len() - 1)];
        t_new[n - 1] = options.indoor_temperature;
        t = t_new;
        if step % steps_per_hour == 0 {
            history.push(t.clone());
        }
    }
    history
}

#[test]
fn test_cooling_wall() {
    let options = concrete_options();
    let results = simulate(&options).unwrap();
    assert!(results.warnings.is_empty(), "{:?}", results.warnings);
    assert_eq!(results.history.len(), 5);
    assert_eq!(results.positions.len(), 20);

    const SMOL: Float = 1e-9;
    let mut previous: Option<&Vec<Float>> = None;
    for snapshot in results.history.iter() {
        let t = &snapshot.temperatures;
        assert_eq!(t[0], 10.);
        assert_eq!(t[t.len() - 1], 22.);
        for (i, v) in t.iter().enumerate() {
            assert!(
                *v >= 10. - SMOL && *v <= 22. + SMOL,
                "hour {} node {}: T = {}",
                snapshot.hour,
                i,
                v
            );
        }
        // Colder towards the exterior
        for i in 1..t.len() {
            assert!(
                t[i] >= t[i - 1] - SMOL,
                "hour {}: T[{}] = {} < T[{}] = {}",
                snapshot.hour,
                i,
                t[i],
                i - 1,
                t[i - 1]
            );
        }
        // And colder as time goes by
        if let Some(prev) = previous {
            for i in 0..t.len() {
                assert!(
                    t[i] <= prev[i] + SMOL,
                    "hour {} node {}: T = {} > {}",
                    snapshot.hour,
                    i,
                    t[i],
                    prev[i]
                );
            }
        }
        previous = Some(t);
    }

    // After five hours, the cold has clearly reached the first few centimeters
    let last = &results.history.snapshots()[4].temperatures;
    assert!(last[1] < 21., "T[1] = {}", last[1]);
    assert!(last[1] < last[5]);
}

#[test]
fn test_no_pcm_matches_homogeneous_wall() {
    let options = SimulationOptions {
        duration_hours: 3,
        outdoor_temperatures: Some(vec![10., 5., 30.]),
        ..concrete_options()
    };
    let exp = homogeneous_march(&options);
    let results = simulate(&options).unwrap();
    assert_eq!(results.history.len(), exp.len());
    for (found, exp) in results.history.iter().zip(exp.iter()) {
        assert_eq!(&found.temperatures, exp, "hour {}", found.hour);
    }

    // PCM properties are irrelevant when there is no PCM
    let other_pcm = SimulationOptions {
        pcm: PhaseChangeMaterial {
            conductivity: 5.,
            melting_temperature: 15.,
            ..PhaseChangeMaterial::default()
        },
        ..options.clone()
    };
    assert_eq!(simulate(&other_pcm).unwrap().history, results.history);

    // Neither is a PCM that got clipped away
    let clipped_away = SimulationOptions {
        pcm_thickness: 0.05,
        placement: PcmPlacement::AtRelativePosition(1.0),
        ..options
    };
    let clipped = simulate(&clipped_away).unwrap();
    assert_eq!(clipped.history, results.history);
    assert_eq!(clipped.warnings.len(), 1);
}

#[test]
fn test_no_pcm_fields() {
    let options = concrete_options();
    let d = Discretization::from_options(&options).unwrap();
    assert!(!d.has_pcm());
    for i in 0..d.n_nodes() {
        assert_eq!(d.field.conductivity()[i], options.wall.conductivity);
        assert_eq!(d.field.density()[i], options.wall.density);
        assert_eq!(d.field.specific_heat()[i], options.wall.specific_heat);
    }
}

#[test]
fn test_determinism() {
    let options = SimulationOptions {
        wall_thickness: 0.1,
        pcm_thickness: 0.02,
        placement: PcmPlacement::AtRelativePosition(0.2),
        outdoor_temperatures: Some(vec![30., 32., 28., 26., 20., 18.]),
        indoor_temperature: 22.,
        duration_hours: 6,
        dx: 0.005,
        dt: 10.,
        ..SimulationOptions::default()
    };
    let a = simulate(&options).unwrap();
    let b = simulate(&options).unwrap();
    assert_eq!(a, b);
    for (x, y) in a.history.iter().zip(b.history.iter()) {
        for (tx, ty) in x.temperatures.iter().zip(y.temperatures.iter()) {
            assert_eq!(tx.to_bits(), ty.to_bits());
        }
    }
}

#[test]
fn test_boundaries_in_history() {
    let outdoor = vec![12., 14., 16., 18.];
    let options = SimulationOptions {
        wall_thickness: 0.1,
        pcm_thickness: 0.02,
        outdoor_temperatures: Some(outdoor.clone()),
        indoor_temperature: 21.,
        duration_hours: 6,
        dx: 0.01,
        dt: 30.,
        ..SimulationOptions::default()
    };
    let results = simulate(&options).unwrap();
    assert_eq!(results.history.len(), 6);
    for s in results.history.iter() {
        // Hours past the end of the series use the last value
        let exp_out = outdoor[s.hour.min(outdoor.len() - 1)];
        assert_eq!(s.temperatures[0], exp_out, "hour {}", s.hour);
        assert_eq!(*s.temperatures.last().unwrap(), 21.);
    }
}

#[test]
fn test_history_cadence() {
    let options = SimulationOptions {
        wall_thickness: 0.05,
        dx: 0.01,
        dt: 1.0,
        duration_hours: 10,
        outdoor_temperatures: None,
        ..SimulationOptions::default()
    };
    let results = simulate(&options).unwrap();
    assert_eq!(results.history.len(), 10);
    let n_nodes = results.positions.len();
    for (i, s) in results.history.iter().enumerate() {
        assert_eq!(s.hour, i);
        assert_eq!(s.temperatures.len(), n_nodes);
    }
    // Default generator: 18 + 6 sin(2 pi h / 24)
    let t6 = results.history.snapshots()[6].temperatures[0];
    assert!((t6 - 24.).abs() < 1e-9, "T_out(6) = {}", t6);
}

#[test]
fn test_clipped_placement() {
    let options = SimulationOptions {
        wall_thickness: 1.0,
        dx: 0.01,
        pcm_thickness: 0.2,
        placement: PcmPlacement::AtRelativePosition(0.95),
        duration_hours: 1,
        dt: 60.,
        ..SimulationOptions::default()
    };
    let d = Discretization::from_options(&options).unwrap();
    assert_eq!(d.pcm_span.end, d.n_nodes());
    assert!(d.pcm_thickness < 0.2);

    let results = simulate(&options).unwrap();
    assert_eq!(results.warnings.len(), 1);
    assert!(results.warnings[0].contains("truncated"));
    assert_eq!(results.history.len(), 1);
}

#[test]
fn test_configuration_errors() {
    let base = concrete_options();
    let bad = vec![
        SimulationOptions {
            dx: 0.0,
            ..base.clone()
        },
        SimulationOptions {
            dt: -1.0,
            ..base.clone()
        },
        SimulationOptions {
            dx: 0.1,
            ..base.clone()
        },
        SimulationOptions {
            pcm_thickness: 0.02,
            pcm: PhaseChangeMaterial {
                half_band: 0.0,
                ..PhaseChangeMaterial::default()
            },
            ..base.clone()
        },
        SimulationOptions {
            pcm_thickness: 0.02,
            placement: PcmPlacement::AtRelativePosition(1.5),
            ..base.clone()
        },
        SimulationOptions {
            outdoor_temperatures: Some(vec![]),
            ..base.clone()
        },
        SimulationOptions {
            dt: 100.,
            stability_check: StabilityCheck::Enforce,
            ..base
        },
    ];
    for o in bad {
        match simulate(&o) {
            Err(Error::Configuration(_)) => {}
            other => panic!("expecting a configuration error for {:?}... found {:?}", o, other),
        }
    }
}

#[test]
fn test_latent_heat_slows_heating() {
    // A PCM layer melting at 25C, between 22C inside and 35C outside
    let with_latent = SimulationOptions {
        wall_thickness: 0.1,
        pcm_thickness: 0.03,
        placement: PcmPlacement::AtExteriorPrefix,
        outdoor_temperatures: Some(vec![35.]),
        indoor_temperature: 22.,
        duration_hours: 6,
        dx: 0.005,
        dt: 10.,
        ..SimulationOptions::default()
    };
    let without_latent = SimulationOptions {
        pcm: PhaseChangeMaterial {
            latent_heat: 0.0,
            ..with_latent.pcm
        },
        ..with_latent.clone()
    };
    let a = simulate(&with_latent).unwrap();
    let b = simulate(&without_latent).unwrap();
    assert!(a.warnings.is_empty(), "{:?}", a.warnings);

    let last_a = &a.history.snapshots()[5].temperatures;
    let last_b = &b.history.snapshots()[5].temperatures;
    // Inside the PCM, where heat is being stored as latent heat
    let i = 3;
    assert!(
        last_a[i] < last_b[i],
        "with latent heat {} | without {}",
        last_a[i],
        last_b[i]
    );
}
