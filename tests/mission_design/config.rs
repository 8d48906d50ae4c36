use crate::{test_data, test_epoch};
use nyx::cosmic::{Spacecraft, EARTH_J2000, MOON_J2000};
use nyx::io::{ConfigError, ConfigRepr, OrbitSerde};
use nyx::linalg::Vector3;
use nyx::md::{ManeuverError, ManeuverKind, ManeuverTarget, DEFAULT_ANGULAR_TOLERANCE_RAD};
use nyx::time::Unit;
use nyx::{KeplerianElements, Maneuver, ManeuverConfig, NyxError, OrbitalParameters, TimeTagged};
use std::convert::TryFrom;
use std::sync::Arc;

#[test]
fn spacecraft_from_yaml() {
    let sc = Spacecraft::load(test_data("spacecraft.yaml")).unwrap();
    assert_eq!(sc.name, "mothership");
    assert_eq!(sc.engines.len(), 2);
    assert_eq!(sc.engine("rcs").unwrap().tank, "hydrazine");
    assert_eq!(sc.front_axis, Vector3::x());
    assert!(sc.has_child("probe"));
    assert_eq!(sc.total_mass_kg(), 1_200.0 + 80.0 + 250.0 + 45.0 + 2.0);

    // Only the tank of the hall thruster feeds it
    let hall = sc.engine("hall").unwrap();
    assert_eq!(sc.fuel_available_kg(&[hall]), 80.0);

    // The child has no engine and the default front axis
    let probe = sc.child("probe").unwrap();
    assert!(probe.engines.is_empty());
    assert_eq!(probe.front_axis, Vector3::y());
}

#[test]
fn spacecraft_defaults() {
    let sc = Spacecraft::loads("name: cubesat\ndry_mass_kg: 4.0").unwrap();
    assert_eq!(sc, Spacecraft::new("cubesat", 4.0));
}

#[test]
fn maneuver_configs_from_yaml() {
    let configs = ManeuverConfig::load_named(test_data("maneuvers.yaml")).unwrap();
    assert_eq!(configs.len(), 3);

    let apogee = &configs["apogee_raise"];
    assert_eq!(apogee.minimum_epoch, test_epoch());
    assert_eq!(apogee.hold_duration, 1 * Unit::Hour);
    assert_eq!(apogee.engines, vec!["hall".to_string()]);
    assert_eq!(apogee.angular_tolerance_rad, DEFAULT_ANGULAR_TOLERANCE_RAD);

    let plane = &configs["plane_change"];
    assert_eq!(plane.minimum_epoch, test_epoch() + 12 * Unit::Hour);
    assert_eq!(plane.hold_duration, 10 * Unit::Minute);
    assert_eq!(plane.engines.len(), 2);
    assert_eq!(plane.angular_tolerance_rad, 1e-3);

    // Defaults match those of the builder
    let release = &configs["release"];
    assert_eq!(
        release,
        &ManeuverConfig::builder()
            .minimum_epoch(test_epoch() + 1 * Unit::Day)
            .build()
    );
}

#[test]
fn maneuver_from_configuration_files() {
    let sc = Arc::new(Spacecraft::load(test_data("spacecraft.yaml")).unwrap());
    let configs = ManeuverConfig::load_named(test_data("maneuvers.yaml")).unwrap();

    let raise = Maneuver::new(
        sc.clone(),
        configs["apogee_raise"].clone(),
        ManeuverKind::ApogeeHeight {
            target: ManeuverTarget::Radius(42_164.0),
        },
    );
    assert!(raise.is_ok());

    // The release configuration fires no engine, which a height change requires
    assert!(Maneuver::new(
        sc,
        configs["release"].clone(),
        ManeuverKind::PerigeeHeight {
            target: ManeuverTarget::Radius(42_164.0),
        },
    )
    .is_err());
}

#[test]
fn orbits_from_yaml() {
    let orbits: Vec<OrbitalParameters> = OrbitSerde::load_many(test_data("orbits.yaml"))
        .unwrap()
        .into_iter()
        .map(|orbit| OrbitalParameters::try_from(orbit).unwrap())
        .collect();
    assert_eq!(orbits.len(), 3);

    match orbits[0] {
        OrbitalParameters::StateVector(sv) => {
            f64_eq!(sv.position_km[2], 6_891.037, 1e-12, "z");
        }
        other => panic!("expected a state vector, got {other}"),
    }
    assert_eq!(orbits[0].epoch(), test_epoch());
    assert_eq!(orbits[0].frame(), EARTH_J2000);

    assert!(matches!(orbits[1], OrbitalParameters::Keplerian(_)));
    f64_eq!(orbits[1].semi_major_axis(), 42_164.0, "sma");
    f64_eq!(orbits[1].mean_anomaly().unwrap().to_degrees(), 75.0, 1e-9, "ma");

    assert!(matches!(orbits[2], OrbitalParameters::Equinoctial(_)));
    assert_eq!(orbits[2].frame(), MOON_J2000);
    f64_eq!(orbits[2].eccentricity(), 0.01, 1e-12, "ecc");
}

#[test]
fn orbit_serde_round_trip() {
    let orbits = OrbitSerde::load_many(test_data("orbits.yaml")).unwrap();
    for orbit in orbits {
        let params = OrbitalParameters::try_from(orbit).unwrap();
        let yaml = serde_yaml::to_string(&OrbitSerde::from(params)).unwrap();
        let reloaded = OrbitalParameters::try_from(OrbitSerde::loads(&yaml).unwrap()).unwrap();
        let before = params.to_state_vector().unwrap();
        let after = reloaded.to_state_vector().unwrap();
        assert!(before.eq_within(&after, 1e-8, 1e-11), "{yaml}");
    }
}

#[test]
fn invalid_configurations() {
    assert!(matches!(
        Spacecraft::load(test_data("missing.yaml")),
        Err(ConfigError::ReadError { .. })
    ));
    assert!(matches!(
        ManeuverConfig::loads("hold_duration: 1 h"),
        Err(ConfigError::ParseError { .. })
    ));

    // Parses, but is not a valid orbit
    let hyperbolic = OrbitSerde::loads(
        r#"
        sma_km: -7000.0
        ecc: 1.5
        inc_deg: 0.0
        raan_deg: 0.0
        aop_deg: 0.0
        ma_deg: 0.0
        epoch: 2021-03-04T00:00:00 UTC
        frame: Earth J2000
        "#,
    )
    .unwrap();
    assert!(matches!(
        OrbitalParameters::try_from(hyperbolic),
        Err(ConfigError::InvalidConfig { .. })
    ));
}

/// Loads a spacecraft and raises its apogee from its parking orbit, with errors of every module
fn raise_from_files(parking_sma_km: f64, spacecraft: &str, config: &str) -> Result<f64, NyxError> {
    let sc = Arc::new(Spacecraft::load(test_data(spacecraft))?);
    let configs = ManeuverConfig::load_named(test_data("maneuvers.yaml"))?;
    let parking: OrbitalParameters = KeplerianElements::from_degrees(
        parking_sma_km,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        test_epoch(),
        EARTH_J2000,
    )?
    .into();
    let mnvr = Maneuver::new(
        sc,
        configs[config].clone(),
        ManeuverKind::ApogeeHeight {
            target: ManeuverTarget::Radius(7_500.0),
        },
    )?;
    Ok(mnvr.execute(&parking)?.delta_v_norm_km_s())
}

#[test]
fn errors_of_every_module() {
    assert!(raise_from_files(7_000.0, "spacecraft.yaml", "apogee_raise").unwrap() > 0.0);
    assert!(matches!(
        raise_from_files(7_000.0, "missing.yaml", "apogee_raise"),
        Err(NyxError::Config { .. })
    ));
    assert!(matches!(
        raise_from_files(-7_000.0, "spacecraft.yaml", "apogee_raise"),
        Err(NyxError::Astro { .. })
    ));
    // The release configuration fires no engine
    assert_eq!(
        raise_from_files(7_000.0, "spacecraft.yaml", "release").unwrap_err(),
        NyxError::Maneuver {
            source: ManeuverError::NoEngines
        }
    );
}
