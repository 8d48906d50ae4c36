extern crate pretty_env_logger as pel;

use super::{circular_equatorial, config_at, keplerian_ta, spacecraft};
use crate::test_epoch;
use nyx::cosmic::{Spacecraft, TimeTagged};
use nyx::md::propulsion::delta_m;
use nyx::md::{ManeuverError, ManeuverTarget};
use nyx::time::Unit;
use nyx::{Maneuver, ManeuverKind, OrbitalParameters};
use rstest::*;
use std::sync::Arc;

#[rstest]
fn raise_apogee_to_geo(spacecraft: Arc<Spacecraft>) {
    let _ = pel::try_init();
    let state: OrbitalParameters = circular_equatorial(6_678.0, 0.0, test_epoch()).into();
    let mnvr = Maneuver::new(
        spacecraft.clone(),
        config_at(test_epoch()),
        ManeuverKind::ApogeeHeight {
            target: ManeuverTarget::Radius(42_164.0),
        },
    )
    .unwrap();

    // Any point of a circular orbit is a perigee
    assert!(mnvr.can_execute(&state));
    let result = mnvr.execute(&state).unwrap();
    f64_eq!(result.delta_v_norm_km_s(), 2.425_769_028_306_86, 1e-9, "Δv");

    // Tangential burn along +Y here
    let dv_hat = result.delta_v_km_s.normalize();
    f64_eq!(dv_hat[1], 1.0, 1e-12, "Δv direction");

    let after = result.apply(&state).unwrap();
    f64_eq!(after.periapsis_km(), 6_678.0, 1e-6, "perigee");
    f64_eq!(after.apoapsis_km(), 42_164.0, 1e-6, "apogee");

    // Resource accounting
    let fuel_kg = delta_m(320.0, spacecraft.total_mass_kg(), result.delta_v_norm_km_s());
    f64_eq!(result.fuel_burned_kg, fuel_kg, 1e-9, "fuel");
    f64_eq!(
        result.thrust_window.duration().to_seconds(),
        fuel_kg / 0.5,
        1e-6,
        "burn duration"
    );
    assert!(result.thrust_window.contains(state.epoch()));
    assert_eq!(result.epoch, state.epoch());
    // No hold: the maneuver lasts as long as the burn
    assert_eq!(result.maneuver_window.start, result.thrust_window.start);
    f64_eq!(
        result.maneuver_window.duration().to_seconds(),
        fuel_kg / 0.5,
        1e-6,
        "maneuver duration"
    );
    assert!(result.released.is_none());

    // The front axis (+Y) already points along the impulse
    let front = result.orientation * spacecraft.front_axis;
    assert!((front - dv_hat).norm() < 1e-12);
}

#[rstest]
fn lower_perigee_at_apogee(spacecraft: Arc<Spacecraft>) {
    let sma_km = (7_000.0 + 20_000.0) / 2.0;
    let ecc = (20_000.0 - 7_000.0) / (20_000.0 + 7_000.0);
    let at_apogee = keplerian_ta(sma_km, ecc, 28.5, 10.0, 30.0, 180.0, test_epoch());
    let at_perigee = keplerian_ta(sma_km, ecc, 28.5, 10.0, 30.0, 0.0, test_epoch());

    let mnvr = Maneuver::new(
        spacecraft,
        config_at(test_epoch()),
        ManeuverKind::PerigeeHeight {
            target: ManeuverTarget::Radius(6_600.0),
        },
    )
    .unwrap();

    assert!(!mnvr.can_execute(&at_perigee));
    assert!(mnvr.can_execute(&at_apogee));

    let result = mnvr.execute(&at_apogee).unwrap();
    let sv = at_apogee.to_state_vector().unwrap();
    // Retrograde burn
    assert!(result.delta_v_km_s.dot(&sv.velocity_km_s) < 0.0);
    let after = result.apply(&at_apogee).unwrap();
    f64_eq!(after.apoapsis_km(), 20_000.0, 1e-6, "apogee");
    f64_eq!(after.periapsis_km(), 6_600.0, 1e-6, "perigee");
}

#[rstest]
#[case::before_wrap(359.95, true)]
#[case::after_wrap(0.05, true)]
#[case::outside(0.2, false)]
#[case::opposite(180.0, false)]
fn apogee_change_feasibility(
    spacecraft: Arc<Spacecraft>,
    #[case] ta_deg: f64,
    #[case] feasible: bool,
) {
    let state = keplerian_ta(9_000.0, 0.1, 10.0, 20.0, 30.0, ta_deg, test_epoch());
    let mnvr = Maneuver::new(
        spacecraft,
        config_at(test_epoch()),
        ManeuverKind::ApogeeHeight {
            target: ManeuverTarget::Radius(12_000.0),
        },
    )
    .unwrap();
    assert_eq!(mnvr.can_execute(&state), feasible, "ta = {ta_deg} deg");
}

#[rstest]
fn not_before_minimum_epoch(spacecraft: Arc<Spacecraft>) {
    let mnvr = Maneuver::new(
        spacecraft,
        config_at(test_epoch() + 1 * Unit::Hour),
        ManeuverKind::ApogeeHeight {
            target: ManeuverTarget::Radius(42_164.0),
        },
    )
    .unwrap();

    // Circular orbit: geometry is never the limiting factor
    let early: OrbitalParameters = circular_equatorial(6_678.0, 0.0, test_epoch()).into();
    assert!(mnvr.is_feasible(&early).unwrap());
    assert!(!mnvr.can_execute(&early));

    let mut on_time = early;
    on_time.set_epoch(test_epoch() + 1 * Unit::Hour);
    assert!(mnvr.can_execute(&on_time));
}

#[rstest]
fn perigee_change_from_target_orbit(spacecraft: Arc<Spacecraft>) {
    let sma_km = (7_000.0 + 20_000.0) / 2.0;
    let ecc = (20_000.0 - 7_000.0) / (20_000.0 + 7_000.0);
    let at_apogee = keplerian_ta(sma_km, ecc, 0.0, 0.0, 0.0, 180.0, test_epoch());
    // Target orbit with its perigee at 8000 km and its apogee at 9000 km
    let target = keplerian_ta(8_500.0, 500.0 / 8_500.0, 0.0, 0.0, 0.0, 0.0, test_epoch());

    let mnvr = Maneuver::new(
        spacecraft,
        config_at(test_epoch()),
        ManeuverKind::PerigeeHeight {
            target: target.into(),
        },
    )
    .unwrap();
    let after = mnvr
        .execute(&at_apogee)
        .unwrap()
        .apply(&at_apogee)
        .unwrap();
    // Without an explicit radius, the apogee radius of the target orbit is used
    f64_eq!(after.periapsis_km(), 9_000.0, 1e-6, "new perigee");
    f64_eq!(after.apoapsis_km(), 20_000.0, 1e-6, "apogee");
}

#[test]
fn fuel_exhausted() {
    let tiny = Arc::new(
        Spacecraft::new("cubesat", 10.0)
            .with_tank("cold gas", 0.1)
            .with_engine("thruster", 60.0, 0.001, "cold gas"),
    );
    let config = nyx::ManeuverConfig::builder()
        .minimum_epoch(test_epoch())
        .engines(vec!["thruster".to_string()])
        .build();
    let mnvr = Maneuver::new(
        tiny,
        config,
        ManeuverKind::ApogeeHeight {
            target: ManeuverTarget::Radius(42_164.0),
        },
    )
    .unwrap();
    let state: OrbitalParameters = circular_equatorial(6_678.0, 0.0, test_epoch()).into();
    match mnvr.execute(&state) {
        Err(ManeuverError::FuelExhausted {
            needed_kg,
            available_kg,
        }) => {
            assert!(needed_kg > available_kg);
            assert_eq!(available_kg, 0.1);
        }
        other => panic!("expected fuel exhaustion, got {other:?}"),
    }
}

#[rstest]
fn construction_errors(spacecraft: Arc<Spacecraft>) {
    let no_engine = nyx::ManeuverConfig::builder()
        .minimum_epoch(test_epoch())
        .build();
    assert_eq!(
        Maneuver::new(
            spacecraft.clone(),
            no_engine,
            ManeuverKind::ApogeeHeight {
                target: ManeuverTarget::Radius(42_164.0),
            },
        )
        .unwrap_err(),
        ManeuverError::NoEngines
    );

    let unknown = nyx::ManeuverConfig::builder()
        .minimum_epoch(test_epoch())
        .engines(vec!["aux".to_string()])
        .build();
    assert_eq!(
        Maneuver::new(
            spacecraft.clone(),
            unknown,
            ManeuverKind::ApogeeHeight {
                target: ManeuverTarget::Radius(42_164.0),
            },
        )
        .unwrap_err(),
        ManeuverError::UnknownEngine {
            name: "aux".to_string()
        }
    );

    assert!(matches!(
        Maneuver::new(
            spacecraft,
            config_at(test_epoch()),
            ManeuverKind::PerigeeHeight {
                target: ManeuverTarget::Radius(-1.0),
            },
        ),
        Err(ManeuverError::InvalidTarget { .. })
    ));
}

#[rstest]
#[case::no_fuel_flow(320.0, 0.0)]
#[case::negative_isp(-320.0, 0.5)]
#[case::undefined_isp(f64::NAN, 0.5)]
#[case::infinite_flow(320.0, f64::INFINITY)]
fn engine_must_be_able_to_fire(#[case] isp_s: f64, #[case] fuel_flow_kg_s: f64) {
    let sc = Arc::new(
        Spacecraft::new("lander", 500.0)
            .with_tank("hydrazine", 1_500.0)
            .with_engine("main", isp_s, fuel_flow_kg_s, "hydrazine"),
    );
    let err = Maneuver::new(
        sc,
        config_at(test_epoch()),
        ManeuverKind::ApogeeHeight {
            target: ManeuverTarget::Radius(42_164.0),
        },
    )
    .unwrap_err();
    assert!(
        matches!(&err, ManeuverError::InvalidEngine { name, .. } if name == "main"),
        "{err}"
    );
}
