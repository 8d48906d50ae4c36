use super::{circular_equatorial, config_at, keplerian_ta, spacecraft};
use crate::test_epoch;
use nyx::cosmic::{Spacecraft, TimeTagged, EARTH_J2000};
use nyx::md::impulse::phasing::PHASING_HOLD_FRACTION;
use nyx::md::{ManeuverError, ManeuverTarget, TwoBodyEphemeris};
use nyx::time::Unit;
use nyx::utils::between_pm_pi;
use nyx::{KeplerianElements, Maneuver, ManeuverKind, OrbitalParameters};
use rstest::*;
use std::sync::Arc;

fn phasing(
    spacecraft: Arc<Spacecraft>,
    target: ManeuverTarget,
    revolutions: u32,
) -> Result<Maneuver, ManeuverError> {
    Maneuver::new(
        spacecraft,
        config_at(test_epoch()),
        ManeuverKind::Phasing {
            target,
            revolutions,
        },
    )
}

#[rstest]
#[case::catch_up_leo(7_000.0, 20.0, 1)]
#[case::fall_back_leo(7_000.0, -15.0, 1)]
#[case::fall_back_geo(42_164.0, -30.0, 2)]
#[case::catch_up_geo(42_164.0, 5.0, 2)]
fn phasing_closes_the_gap(
    spacecraft: Arc<Spacecraft>,
    #[case] radius_km: f64,
    #[case] gap_deg: f64,
    #[case] revolutions: u32,
) {
    let state: OrbitalParameters = circular_equatorial(radius_km, 0.0, test_epoch()).into();
    let target: OrbitalParameters = circular_equatorial(radius_km, gap_deg, test_epoch()).into();

    let mnvr = phasing(spacecraft, target.into(), revolutions).unwrap();
    assert!(mnvr.can_execute(&state));
    let result = mnvr.execute(&state).unwrap();

    let after = result.apply(&state).unwrap().to_keplerian_elements().unwrap();
    let coast = after.period() * f64::from(revolutions);

    // The plan holds for most of the phasing orbit
    f64_eq!(
        result.hold_duration.to_seconds(),
        PHASING_HOLD_FRACTION * coast.to_seconds(),
        1e-3,
        "hold"
    );
    assert_eq!(result.maneuver_window.start, result.thrust_window.start);
    assert!(result.maneuver_window.duration() > result.thrust_window.duration());

    // After the phasing revolutions, the spacecraft leads its unmaneuvered self by the gap
    let phased = after.at_epoch(test_epoch() + coast);
    let unmaneuvered = state.at_epoch(test_epoch() + coast).unwrap();
    let lead_rad = between_pm_pi(phased.tlong_rad().unwrap() - unmaneuvered.tlong_rad().unwrap());
    f64_eq!(lead_rad, gap_deg.to_radians(), 1e-6, "longitude gap");

    // And is back at its burn point
    f64_eq!(
        between_pm_pi(phased.tlong_rad().unwrap()),
        0.0,
        1e-6,
        "return to burn point"
    );
}

#[rstest]
fn phasing_on_a_tracked_body(spacecraft: Arc<Spacecraft>) {
    let state: OrbitalParameters = circular_equatorial(7_000.0, 0.0, test_epoch()).into();

    // A spacecraft on the same orbit, which was at the burn point ten minutes ago
    let chief = KeplerianElements::new(
        7_000.0,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        test_epoch() - 10 * Unit::Minute,
        EARTH_J2000,
    )
    .unwrap();
    let lead_rad = chief.mean_motion_rad_s() * 600.0;
    let ephem = Arc::new(TwoBodyEphemeris::new("chief", chief));

    let tracked = phasing(spacecraft.clone(), ManeuverTarget::Body(ephem), 1)
        .unwrap()
        .execute(&state)
        .unwrap();

    let pinned: OrbitalParameters =
        circular_equatorial(7_000.0, lead_rad.to_degrees(), test_epoch()).into();
    let fixed = phasing(spacecraft, pinned.into(), 1)
        .unwrap()
        .execute(&state)
        .unwrap();

    assert!((tracked.delta_v_km_s - fixed.delta_v_km_s).norm() < 1e-9);
    assert!(tracked.delta_v_km_s.dot(&state.to_state_vector().unwrap().velocity_km_s) < 0.0);
}

#[rstest]
fn phasing_from_eccentric_orbit(spacecraft: Arc<Spacecraft>) {
    let target = keplerian_ta(9_000.0, 0.1, 0.0, 0.0, 0.0, 30.0, test_epoch());
    let mnvr = phasing(spacecraft, target.into(), 1).unwrap();

    let at_perigee = keplerian_ta(9_000.0, 0.1, 0.0, 0.0, 0.0, 0.0, test_epoch());
    let elsewhere = keplerian_ta(9_000.0, 0.1, 0.0, 0.0, 0.0, 90.0, test_epoch());
    assert!(mnvr.can_execute(&at_perigee));
    assert!(!mnvr.can_execute(&elsewhere));

    // The perigee radius is kept
    let after = mnvr
        .execute(&at_perigee)
        .unwrap()
        .apply(&at_perigee)
        .unwrap();
    f64_eq!(
        after.apoapsis_km().min(after.periapsis_km()),
        9_000.0 * 0.9,
        1e-6,
        "perigee radius"
    );
}

#[rstest]
fn degenerate_phasing_orbit(spacecraft: Arc<Spacecraft>) {
    let state: OrbitalParameters = circular_equatorial(7_000.0, 0.0, test_epoch()).into();
    let target: OrbitalParameters = circular_equatorial(7_000.0, 10.0, test_epoch()).into();
    let mnvr = phasing(spacecraft.clone(), target.into(), 3).unwrap();
    assert!(matches!(
        mnvr.execute(&state),
        Err(ManeuverError::DegeneratePhasingOrbit { .. })
    ));

    assert_eq!(
        phasing(spacecraft, target.into(), 0).unwrap_err(),
        ManeuverError::InvalidRevolutions { revolutions: 0 }
    );
}

#[test]
fn target_epoch_is_respected() {
    let target: OrbitalParameters = circular_equatorial(7_000.0, 10.0, test_epoch()).into();
    let later = test_epoch() + 1 * Unit::Hour;
    let orbit = ManeuverTarget::from(target).orbit_at(later).unwrap().unwrap();
    assert_eq!(orbit.epoch(), later);
    // Moved along its orbit by one hour of mean motion
    let n = target.mean_motion().unwrap();
    f64_eq!(
        between_pm_pi(orbit.true_longitude().unwrap() - target.true_longitude().unwrap()),
        between_pm_pi(n * 3_600.0),
        1e-9,
        "propagated longitude"
    );
}
