/*
    Nyx, blazing fast astrodynamics
    Copyright (C) 2023 Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::cosmic::{AstroError, OrbitalParameters, StateVector};
use crate::linalg::Vector3;
use crate::md::ManeuverError;
use crate::time::{Duration, Unit};
use crate::utils::{angle_within, between_pm_pi};
use std::f64::consts::TAU;

/// Fraction of the phasing orbit duration held before the next maneuver may be evaluated
pub const PHASING_HOLD_FRACTION: f64 = 0.9;

/// A phasing burn changes the period of the orbit for a whole number of revolutions, so that the
/// spacecraft comes back to the burn point shifted along track by the commanded longitude gap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhasingSolution {
    /// Longitude gap to close, in radians, between -π and π
    pub gap_rad: f64,
    /// Time by which the spacecraft must lead (or lag if negative) its unmaneuvered self
    pub delay: Duration,
    /// Period of the phasing orbit
    pub phasing_period: Duration,
    pub revolutions: u32,
    /// Radius of the phasing orbit apsis opposite to the burn point, in km
    pub opposite_radius_km: f64,
    pub delta_v_km_s: Vector3<f64>,
}

impl PhasingSolution {
    /// Solves the phasing burn from the current state towards the target true longitude.
    ///
    /// The burn point becomes an apsis of the phasing orbit, the current perigee radius is kept.
    pub fn new(
        current: &StateVector,
        target_longitude_rad: f64,
        revolutions: u32,
    ) -> Result<Self, ManeuverError> {
        if revolutions == 0 {
            return Err(ManeuverError::InvalidRevolutions { revolutions });
        }
        let mu = current.frame.mu_km3_s2();
        let ecc = current.eccentricity();
        let period_s = current.period()?.to_seconds();

        let gap_rad = between_pm_pi(target_longitude_rad - current.true_longitude_rad());
        let ea_rad = 2.0 * (((1.0 - ecc) / (1.0 + ecc)).sqrt() * (gap_rad / 2.0).tan()).atan();
        let delay_s = period_s / TAU * (ea_rad - ecc * ea_rad.sin());
        let phasing_period_s = (period_s - delay_s) / f64::from(revolutions);

        let sma_km = (mu.sqrt() * phasing_period_s / TAU).powf(2.0 / 3.0);
        let rp_km = current.perigee_vector().norm();
        let opposite_radius_km = 2.0 * sma_km - rp_km;
        if opposite_radius_km <= 0.0 {
            return Err(ManeuverError::DegeneratePhasingOrbit {
                radius_km: opposite_radius_km,
            });
        }

        let h2 = (2.0 * mu).sqrt()
            * (opposite_radius_km * rp_km / (opposite_radius_km + rp_km)).sqrt();
        let v_hat = current.velocity_km_s / current.vmag_km_s();
        let delta_v_km_s = (h2 - current.hmag_km2_s()) / rp_km * v_hat;

        debug!(
            "phasing gap {:.6} deg over {revolutions} revolution(s): phasing period {}",
            gap_rad.to_degrees(),
            phasing_period_s * Unit::Second
        );

        Ok(Self {
            gap_rad,
            delay: delay_s * Unit::Second,
            phasing_period: phasing_period_s * Unit::Second,
            revolutions,
            opposite_radius_km,
            delta_v_km_s,
        })
    }

    /// Duration to hold after the burn: a fraction of the time spent on the phasing orbit
    pub fn hold_duration(&self) -> Duration {
        self.phasing_period * (PHASING_HOLD_FRACTION * f64::from(self.revolutions))
    }
}

/// The phasing burn keeps the perigee radius, hence it must occur at perigee unless the orbit is circular.
pub fn is_feasible(state: &OrbitalParameters, tolerance_rad: f64) -> Result<bool, AstroError> {
    if state.is_circular() {
        return Ok(true);
    }
    Ok(angle_within(state.true_anomaly()?, 0.0, tolerance_rad))
}
