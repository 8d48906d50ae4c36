extern crate pretty_env_logger as pel;

use super::{circular_equatorial, spacecraft};
use crate::test_epoch;
use nyx::cosmic::{Spacecraft, TimeTagged};
use nyx::md::{ManeuverError, ManeuverStatus, ManeuverTarget};
use nyx::time::Unit;
use nyx::{Maneuver, ManeuverConfig, ManeuverKind, ManeuverPlan, OrbitalParameters};
use rstest::*;
use std::sync::Arc;

/// Hohmann transfer from a 6678 km circular orbit to GEO, holding one hour after each burn
fn hohmann(spacecraft: Arc<Spacecraft>) -> ManeuverPlan {
    let config = ManeuverConfig::builder()
        .minimum_epoch(test_epoch())
        .hold_duration(1 * Unit::Hour)
        .engines(vec!["main".to_string()])
        .build();
    let mut plan = ManeuverPlan::default();
    plan.push(
        Maneuver::new(
            spacecraft.clone(),
            config.clone(),
            ManeuverKind::ApogeeHeight {
                target: ManeuverTarget::Radius(42_164.0),
            },
        )
        .unwrap(),
    )
    .push(
        Maneuver::new(
            spacecraft,
            config,
            ManeuverKind::PerigeeHeight {
                target: ManeuverTarget::Radius(42_164.0),
            },
        )
        .unwrap(),
    );
    plan
}

#[rstest]
fn hohmann_transfer(spacecraft: Arc<Spacecraft>) {
    let _ = pel::try_init();
    let mut plan = hohmann(spacecraft);
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.cursor(), 0);
    assert!(plan.hold_until().is_none());

    let leo: OrbitalParameters = circular_equatorial(6_678.0, 0.0, test_epoch()).into();
    assert!(plan.can_execute(&leo));
    let first = plan.execute(&leo).unwrap().clone();
    assert_eq!(plan.cursor(), 1);
    assert_eq!(plan.status(0), Some(ManeuverStatus::Executed));
    assert_eq!(plan.status(1), Some(ManeuverStatus::Pending));

    // The plan holds until the end of the first maneuver window
    let hold_until = plan.hold_until().unwrap();
    assert_eq!(hold_until, first.maneuver_window.end);
    assert_eq!(first.hold_duration, 1 * Unit::Hour);
    f64_eq!(
        (hold_until - test_epoch()).to_seconds(),
        3_600.0 - first.thrust_window.duration().to_seconds() / 2.0,
        1e-6,
        "hold end"
    );

    // Coast on the transfer orbit
    let transfer = first.apply(&leo).unwrap().to_keplerian_elements().unwrap();
    let mut early: OrbitalParameters = transfer.at_epoch(test_epoch() + 30 * Unit::Minute).into();
    assert!(!plan.can_execute(&early));
    assert_eq!(
        plan.execute(&early).unwrap_err(),
        ManeuverError::HoldNotElapsed { until: hold_until }
    );
    // A failed execution does not move the plan
    assert_eq!(plan.cursor(), 1);

    // Not at apogee yet
    early.set_epoch(hold_until);
    assert!(!plan.can_execute(&early));

    let apogee: OrbitalParameters = transfer
        .at_epoch(test_epoch() + transfer.period() * 0.5)
        .into();
    assert!(plan.can_execute(&apogee));
    let second = plan.execute(&apogee).unwrap().clone();

    let geo = second.apply(&apogee).unwrap();
    f64_eq!(geo.eccentricity(), 0.0, 1e-9, "ecc");
    f64_eq!(geo.semi_major_axis_km(), 42_164.0, 1e-5, "sma");

    // Total Hohmann transfer cost
    f64_eq!(
        first.delta_v_norm_km_s() + second.delta_v_norm_km_s(),
        3.892_607_743_591_312_5,
        1e-6,
        "total Δv"
    );

    assert!(plan.is_complete());
    assert_eq!(plan.results().len(), 2);
    assert!(!plan.can_execute(&apogee));
    assert_eq!(
        plan.execute(&apogee).unwrap_err(),
        ManeuverError::PlanComplete
    );
}

#[rstest]
fn skip_maneuver(spacecraft: Arc<Spacecraft>) {
    let mut plan = hohmann(spacecraft);
    plan.skip().unwrap();
    assert_eq!(plan.status(0), Some(ManeuverStatus::Skipped));
    assert_eq!(plan.cursor(), 1);
    assert!(plan.results().is_empty());
    // Nothing was executed, hence nothing to hold for
    assert!(plan.hold_until().is_none());

    let display = format!("{plan}");
    assert!(display.contains("> #1 [Pending]"), "{display}");

    plan.skip().unwrap();
    assert!(plan.is_complete());
    assert_eq!(plan.skip().unwrap_err(), ManeuverError::PlanComplete);
}

#[test]
fn empty_plan() {
    let mut plan = ManeuverPlan::new(Vec::new());
    assert!(plan.is_empty());
    assert!(plan.is_complete());
    let state: OrbitalParameters = circular_equatorial(7_000.0, 0.0, test_epoch()).into();
    assert!(!plan.can_execute(&state));
    assert_eq!(plan.execute(&state).unwrap_err(), ManeuverError::PlanComplete);
}
