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
use crate::utils::angle_within;
use serde_derive::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// The apsis changed by a height maneuver
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Apsis {
    Apogee,
    Perigee,
}

impl Apsis {
    /// Returns the true anomaly at which this apsis is changed, i.e. that of the opposite apsis.
    pub fn burn_true_anomaly_rad(self) -> f64 {
        match self {
            Self::Apogee => 0.0,
            Self::Perigee => PI,
        }
    }
}

impl fmt::Display for Apsis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Apogee => write!(f, "apogee"),
            Self::Perigee => write!(f, "perigee"),
        }
    }
}

/// A height change is feasible anywhere on a circular orbit, and otherwise only at the opposite apsis.
pub fn is_feasible(
    apsis: Apsis,
    state: &OrbitalParameters,
    tolerance_rad: f64,
) -> Result<bool, AstroError> {
    if state.is_circular() {
        return Ok(true);
    }
    Ok(angle_within(
        state.true_anomaly()?,
        apsis.burn_true_anomaly_rad(),
        tolerance_rad,
    ))
}

/// Tangential delta-v, in km/s, placing the opposite apsis at `target_radius_km` while the current radius becomes an apsis.
pub fn delta_v(state: &StateVector, target_radius_km: f64) -> Vector3<f64> {
    let r_km = state.rmag_km();
    let sma_km = (r_km + target_radius_km) / 2.0;
    let speed_km_s = (state.frame.mu_km3_s2() * (2.0 / r_km - 1.0 / sma_km)).sqrt();
    let v_hat = state.velocity_km_s / state.vmag_km_s();
    (speed_km_s - state.vmag_km_s()) * v_hat
}
