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
use crate::linalg::{Unit, UnitQuaternion, Vector3};
use crate::time::{Duration, Epoch};
use std::f64::consts::PI;
use std::fmt;

/// A closed time interval
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Window {
    pub start: Epoch,
    pub end: Epoch,
}

impl Window {
    /// Window of the provided duration centered on the provided epoch
    pub fn centered(epoch: Epoch, duration: Duration) -> Self {
        let half = duration * 0.5;
        Self {
            start: epoch - half,
            end: epoch + half,
        }
    }

    /// Window starting at the provided epoch
    pub fn starting(start: Epoch, duration: Duration) -> Self {
        Self {
            start,
            end: start + duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, epoch: Epoch) -> bool {
        self.start <= epoch && epoch <= self.end
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{} ; {}]", self.start, self.end)
    }
}

/// Returns the attitude rotating the `front` axis of the spacecraft onto the direction of the delta-v.
///
/// A zero delta-v requires no rotation. If both are anti-parallel, the rotation is a half turn about an
/// axis orthogonal to the front axis.
pub fn orientation(front: &Vector3<f64>, delta_v_km_s: &Vector3<f64>) -> UnitQuaternion<f64> {
    if delta_v_km_s.norm() == 0.0 {
        return UnitQuaternion::identity();
    }
    UnitQuaternion::rotation_between(front, delta_v_km_s).unwrap_or_else(|| {
        let mut axis = front.cross(&Vector3::x());
        if axis.norm() < 1e-6 * front.norm() {
            axis = front.cross(&Vector3::y());
        }
        UnitQuaternion::from_axis_angle(&Unit::new_normalize(axis), PI)
    })
}

/// The outcome of an executed maneuver. It never changes after being produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ManeuverResult {
    /// Epoch of the impulse, at the center of the thrust window
    pub epoch: Epoch,
    /// Impulse in the inertial frame of the state, in km/s
    pub delta_v_km_s: Vector3<f64>,
    /// Rotation of the spacecraft front axis onto the impulse direction
    pub orientation: UnitQuaternion<f64>,
    pub fuel_burned_kg: f64,
    pub thrust_window: Window,
    /// Thrust window extended by the hold duration
    pub maneuver_window: Window,
    /// Effective hold duration, which differs from the configured one for phasing maneuvers
    pub hold_duration: Duration,
    /// Name of the spacecraft released by this maneuver, if any
    pub released: Option<String>,
}

impl ManeuverResult {
    pub fn delta_v_norm_km_s(&self) -> f64 {
        self.delta_v_km_s.norm()
    }

    /// Returns the provided state right after the impulse
    pub fn apply(&self, state: &OrbitalParameters) -> Result<StateVector, AstroError> {
        Ok(state.to_state_vector()?.with_dv(self.delta_v_km_s))
    }
}

impl fmt::Display for ManeuverResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Impulse @ {}: Δv = [{:.6}, {:.6}, {:.6}] km/s (|Δv| = {:.6} km/s), fuel = {:.3} kg, thrust {}, hold {}",
            self.epoch,
            self.delta_v_km_s[0],
            self.delta_v_km_s[1],
            self.delta_v_km_s[2],
            self.delta_v_norm_km_s(),
            self.fuel_burned_kg,
            self.thrust_window,
            self.hold_duration
        )?;
        if let Some(child) = &self.released {
            write!(f, ", released {child}")?;
        }
        Ok(())
    }
}
