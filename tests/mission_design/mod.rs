mod apsis;
mod config;
mod phasing;
mod plan;

use nyx::cosmic::{Spacecraft, EARTH_J2000};
use nyx::md::ManeuverConfig;
use nyx::time::Epoch;
use nyx::{KeplerianElements, OrbitalParameters, StateVector};
use rstest::*;
use std::sync::Arc;

/// Spacecraft with a single engine on a single tank
#[fixture]
pub fn spacecraft() -> Arc<Spacecraft> {
    Arc::new(
        Spacecraft::new("lander", 500.0)
            .with_tank("hydrazine", 1_500.0)
            .with_engine("main", 320.0, 0.5, "hydrazine"),
    )
}

/// Maneuver configuration firing the main engine, without hold
pub fn config_at(minimum_epoch: Epoch) -> ManeuverConfig {
    ManeuverConfig::builder()
        .minimum_epoch(minimum_epoch)
        .engines(vec!["main".to_string()])
        .build()
}

/// Circular Earth orbit of the provided radius in the XY plane, at the provided true longitude
pub fn circular_equatorial(radius_km: f64, tlong_deg: f64, epoch: Epoch) -> StateVector {
    let speed_km_s = (EARTH_J2000.mu_km3_s2() / radius_km).sqrt();
    let (sin_l, cos_l) = tlong_deg.to_radians().sin_cos();
    StateVector::cartesian(
        radius_km * cos_l,
        radius_km * sin_l,
        0.0,
        -speed_km_s * sin_l,
        speed_km_s * cos_l,
        0.0,
        epoch,
        EARTH_J2000,
    )
}

/// Earth orbit from Keplerian elements in degrees, with a true anomaly
#[allow(clippy::too_many_arguments)]
pub fn keplerian_ta(
    sma_km: f64,
    ecc: f64,
    inc_deg: f64,
    raan_deg: f64,
    aop_deg: f64,
    ta_deg: f64,
    epoch: Epoch,
) -> OrbitalParameters {
    KeplerianElements::from_true_anomaly(
        sma_km,
        ecc,
        inc_deg.to_radians(),
        raan_deg.to_radians(),
        aop_deg.to_radians(),
        ta_deg.to_radians(),
        epoch,
        EARTH_J2000,
    )
    .unwrap()
    .into()
}
