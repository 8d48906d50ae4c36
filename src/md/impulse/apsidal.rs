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

use crate::cosmic::{KeplerianElements, StateVector};
use crate::linalg::Vector3;
use crate::md::ManeuverError;
use crate::utils::{angle_within, between_0_tau, between_pm_pi, signed_angle};
use std::f64::consts::FRAC_PI_2;

/// The two points where the current orbit and a target orbit sharing its focus intersect.
///
/// Both orbits are described by their own true anomaly: the point at true anomaly ν on the current
/// orbit is at true anomaly ν - θ on the target orbit, where θ is the rotation from the current
/// line of apsides to the target one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ApsidalIntersections {
    /// Angle from the current to the target perigee vectors, about the current angular momentum
    pub theta_rad: f64,
    /// True anomaly of the first intersection on the current orbit
    pub nu_p_rad: f64,
    /// True anomaly of the second intersection on the current orbit
    pub nu_q_rad: f64,
}

impl ApsidalIntersections {
    /// Computes the intersections from the orbit equations `h²/μ / (1 + e cos ν)` of both orbits, i.e.
    /// `A cos ν + B sin ν = C`.
    pub fn new(current: &StateVector, target: &KeplerianElements) -> Result<Self, ManeuverError> {
        let theta_rad = signed_angle(
            &current.perigee_vector(),
            &target.perigee_vector(),
            &current.specific_angular_momentum(),
        );

        let h1_sq = current.hmag_km2_s().powi(2);
        let h2_sq = target.hmag_km2_s().powi(2);
        let e1 = current.eccentricity();
        let e2 = target.ecc();

        let a = h2_sq * e1 - h1_sq * e2 * theta_rad.cos();
        let b = -h1_sq * e2 * theta_rad.sin();
        let c = h1_sq - h2_sq;

        let (alpha, cos_arg) = if a.abs() > f64::EPSILON * h1_sq.max(h2_sq) {
            let alpha = (b / a).atan();
            (alpha, c / a * alpha.cos())
        } else {
            // Degenerates into B sin ν = C
            (FRAC_PI_2, c / b)
        };

        if !(-1.0..=1.0).contains(&cos_arg) {
            return Err(ManeuverError::OrbitsMustIntersect { cos_arg });
        }

        let half_chord = cos_arg.acos();
        Ok(Self {
            theta_rad,
            nu_p_rad: between_0_tau(alpha + half_chord),
            nu_q_rad: between_0_tau(alpha - half_chord),
        })
    }

    /// Returns the intersection closest to the provided true anomaly, modulo 2π.
    pub fn closest(&self, ta_rad: f64) -> f64 {
        let dist_p = between_pm_pi(ta_rad - self.nu_p_rad).abs();
        let dist_q = between_pm_pi(ta_rad - self.nu_q_rad).abs();
        if dist_p <= dist_q {
            self.nu_p_rad
        } else {
            self.nu_q_rad
        }
    }

    /// Returns the intersection within tolerance of the provided true anomaly, the closest one if both are.
    pub fn nearest(&self, ta_rad: f64, tolerance_rad: f64) -> Option<f64> {
        let nu_rad = self.closest(ta_rad);
        if angle_within(ta_rad, nu_rad, tolerance_rad) {
            Some(nu_rad)
        } else {
            None
        }
    }

    /// Returns the state on the target orbit at the intersection at true anomaly `nu_rad` of the current orbit.
    pub fn target_state(
        &self,
        target: &KeplerianElements,
        nu_rad: f64,
        current: &StateVector,
    ) -> Result<StateVector, ManeuverError> {
        let rephased = KeplerianElements::from_true_anomaly(
            target.sma_km(),
            target.ecc(),
            target.inc_rad(),
            target.raan_rad(),
            target.aop_rad(),
            between_0_tau(nu_rad - self.theta_rad),
            current.epoch,
            target.frame,
        )?;
        Ok(rephased.to_state_vector()?)
    }
}

/// Delta-v in km/s from the current velocity onto the target orbit at the chosen intersection
pub fn delta_v(
    current: &StateVector,
    target: &KeplerianElements,
    intersections: &ApsidalIntersections,
    nu_rad: f64,
) -> Result<Vector3<f64>, ManeuverError> {
    let target_state = intersections.target_state(target, nu_rad, current)?;
    let mismatch_km = (target_state.position_km - current.position_km).norm();
    if mismatch_km > 1e-6 * current.rmag_km() {
        debug!("target orbit passes {mismatch_km:.3} km away from the burn point");
    }
    Ok(target_state.velocity_km_s - current.velocity_km_s)
}
