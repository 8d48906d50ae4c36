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

use super::{AstroError, Frame, TimeTagged};
use crate::linalg::Vector3;
use crate::time::{Duration, Epoch};
use std::fmt;

mod cartesian;
mod equinoctial;
mod keplerian;

pub use cartesian::StateVector;
pub use equinoctial::EquinoctialElements;
pub use keplerian::KeplerianElements;

/// An orbital state in one of its supported representations.
///
/// Every derived quantity is computed from the representation at hand: Keplerian elements return their
/// own angles and are not round-tripped through a state vector. Converting between representations
/// never changes the epoch nor the frame; only `at_epoch` does.
///
/// All angles are in radians.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OrbitalParameters {
    StateVector(StateVector),
    Keplerian(KeplerianElements),
    Equinoctial(EquinoctialElements),
}

impl From<StateVector> for OrbitalParameters {
    fn from(sv: StateVector) -> Self {
        Self::StateVector(sv)
    }
}

impl From<KeplerianElements> for OrbitalParameters {
    fn from(kep: KeplerianElements) -> Self {
        Self::Keplerian(kep)
    }
}

impl From<EquinoctialElements> for OrbitalParameters {
    fn from(eq: EquinoctialElements) -> Self {
        Self::Equinoctial(eq)
    }
}

impl OrbitalParameters {
    pub fn frame(&self) -> Frame {
        match self {
            Self::StateVector(sv) => sv.frame,
            Self::Keplerian(kep) => kep.frame,
            Self::Equinoctial(eq) => eq.frame,
        }
    }

    pub fn eccentricity(&self) -> f64 {
        match self {
            Self::StateVector(sv) => sv.eccentricity(),
            Self::Keplerian(kep) => kep.ecc(),
            Self::Equinoctial(eq) => eq.ecc(),
        }
    }

    pub fn is_circular(&self) -> bool {
        match self {
            Self::StateVector(sv) => sv.is_circular(),
            Self::Keplerian(kep) => kep.is_circular(),
            Self::Equinoctial(eq) => eq.ecc() < super::ECC_EPSILON,
        }
    }

    pub fn inclination(&self) -> f64 {
        match self {
            Self::StateVector(sv) => sv.inclination_rad(),
            Self::Keplerian(kep) => kep.inc_rad(),
            Self::Equinoctial(eq) => eq.inc_rad(),
        }
    }

    /// Semi-major axis in km
    pub fn semi_major_axis(&self) -> f64 {
        match self {
            Self::StateVector(sv) => sv.semi_major_axis_km(),
            Self::Keplerian(kep) => kep.sma_km(),
            Self::Equinoctial(eq) => eq.sma_km(),
        }
    }

    /// Semi parameter in km
    pub fn semi_latus_rectum(&self) -> f64 {
        match self {
            Self::StateVector(sv) => sv.semi_parameter_km(),
            Self::Keplerian(kep) => kep.semi_parameter_km(),
            Self::Equinoctial(eq) => eq.p_km(),
        }
    }

    pub fn ascending_node(&self) -> f64 {
        match self {
            Self::StateVector(sv) => sv.ascending_node_rad(),
            Self::Keplerian(kep) => kep.raan_rad(),
            Self::Equinoctial(eq) => eq.raan_rad(),
        }
    }

    pub fn argument_of_periapsis(&self) -> f64 {
        match self {
            Self::StateVector(sv) => sv.argument_of_periapsis_rad(),
            Self::Keplerian(kep) => kep.aop_rad(),
            Self::Equinoctial(eq) => eq.aop_rad(),
        }
    }

    pub fn true_anomaly(&self) -> Result<f64, AstroError> {
        match self {
            Self::StateVector(sv) => Ok(sv.true_anomaly_rad()),
            Self::Keplerian(kep) => kep.ta_rad(),
            Self::Equinoctial(eq) => Ok(eq.ta_rad()),
        }
    }

    pub fn eccentric_anomaly(&self) -> Result<f64, AstroError> {
        match self {
            Self::StateVector(sv) => sv.eccentric_anomaly_rad(),
            Self::Keplerian(kep) => kep.ea_rad(),
            Self::Equinoctial(eq) => eq.to_keplerian_elements()?.ea_rad(),
        }
    }

    pub fn mean_anomaly(&self) -> Result<f64, AstroError> {
        match self {
            Self::StateVector(sv) => sv.mean_anomaly_rad(),
            Self::Keplerian(kep) => Ok(kep.ma_rad()),
            Self::Equinoctial(eq) => Ok(eq.to_keplerian_elements()?.ma_rad()),
        }
    }

    pub fn argument_of_latitude(&self) -> Result<f64, AstroError> {
        match self {
            Self::StateVector(sv) => Ok(sv.argument_of_latitude_rad()),
            Self::Keplerian(kep) => kep.aol_rad(),
            Self::Equinoctial(eq) => eq.to_keplerian_elements()?.aol_rad(),
        }
    }

    pub fn true_longitude(&self) -> Result<f64, AstroError> {
        match self {
            Self::StateVector(sv) => Ok(sv.true_longitude_rad()),
            Self::Keplerian(kep) => kep.tlong_rad(),
            Self::Equinoctial(eq) => Ok(eq.l_rad()),
        }
    }

    /// Specific angular momentum vector in km^2/s
    pub fn specific_angular_momentum(&self) -> Vector3<f64> {
        match self {
            Self::StateVector(sv) => sv.specific_angular_momentum(),
            Self::Keplerian(kep) => kep.specific_angular_momentum(),
            Self::Equinoctial(eq) => eq.to_state_vector().specific_angular_momentum(),
        }
    }

    pub fn eccentricity_vector(&self) -> Vector3<f64> {
        match self {
            Self::StateVector(sv) => sv.eccentricity_vector(),
            Self::Keplerian(kep) => kep.eccentricity_vector(),
            Self::Equinoctial(eq) => eq.to_state_vector().eccentricity_vector(),
        }
    }

    pub fn ascending_node_vector(&self) -> Vector3<f64> {
        match self {
            Self::StateVector(sv) => sv.ascending_node_vector(),
            Self::Keplerian(kep) => kep.ascending_node_vector(),
            Self::Equinoctial(eq) => eq.to_state_vector().ascending_node_vector(),
        }
    }

    /// Specific mechanical energy in km^2/s^2
    pub fn specific_energy(&self) -> f64 {
        match self {
            Self::StateVector(sv) => sv.specific_energy_km2_s2(),
            _ => -self.frame().mu_km3_s2() / (2.0 * self.semi_major_axis()),
        }
    }

    /// Perigee vector in km, from the center of motion
    pub fn perigee_vector(&self) -> Result<Vector3<f64>, AstroError> {
        match self {
            Self::StateVector(sv) => Ok(sv.perigee_vector()),
            Self::Keplerian(kep) => Ok(kep.perigee_vector()),
            Self::Equinoctial(eq) => Ok(eq.to_keplerian_elements()?.perigee_vector()),
        }
    }

    /// Apogee vector in km, from the center of motion
    pub fn apogee_vector(&self) -> Result<Vector3<f64>, AstroError> {
        match self {
            Self::StateVector(sv) => Ok(sv.apogee_vector()),
            Self::Keplerian(kep) => Ok(kep.apogee_vector()),
            Self::Equinoctial(eq) => Ok(eq.to_keplerian_elements()?.apogee_vector()),
        }
    }

    /// Mean motion in radians per second
    pub fn mean_motion(&self) -> Result<f64, AstroError> {
        match self {
            Self::StateVector(sv) => sv.mean_motion_rad_s(),
            Self::Keplerian(kep) => Ok(kep.mean_motion_rad_s()),
            Self::Equinoctial(eq) => Ok(eq.to_keplerian_elements()?.mean_motion_rad_s()),
        }
    }

    pub fn period(&self) -> Result<Duration, AstroError> {
        match self {
            Self::StateVector(sv) => sv.period(),
            Self::Keplerian(kep) => Ok(kep.period()),
            Self::Equinoctial(eq) => Ok(eq.to_keplerian_elements()?.period()),
        }
    }

    pub fn to_state_vector(&self) -> Result<StateVector, AstroError> {
        match self {
            Self::StateVector(sv) => Ok(*sv),
            Self::Keplerian(kep) => kep.to_state_vector(),
            Self::Equinoctial(eq) => Ok(eq.to_state_vector()),
        }
    }

    pub fn to_keplerian_elements(&self) -> Result<KeplerianElements, AstroError> {
        match self {
            Self::StateVector(sv) => sv.to_keplerian_elements(),
            Self::Keplerian(kep) => Ok(*kep),
            Self::Equinoctial(eq) => eq.to_keplerian_elements(),
        }
    }

    pub fn to_equinoctial(&self) -> Result<EquinoctialElements, AstroError> {
        match self {
            Self::StateVector(sv) => sv.to_equinoctial(),
            Self::Keplerian(kep) => kep.to_equinoctial(),
            Self::Equinoctial(eq) => Ok(*eq),
        }
    }

    /// Returns the Keplerian elements of this orbit re-epoched by two-body propagation, cf. [KeplerianElements::at_epoch].
    pub fn at_epoch(&self, epoch: Epoch) -> Result<KeplerianElements, AstroError> {
        Ok(self.to_keplerian_elements()?.at_epoch(epoch))
    }
}

impl TimeTagged for OrbitalParameters {
    fn epoch(&self) -> Epoch {
        match self {
            Self::StateVector(sv) => sv.epoch,
            Self::Keplerian(kep) => kep.epoch,
            Self::Equinoctial(eq) => eq.epoch,
        }
    }

    /// Sets the epoch without changing the orbit itself, unlike `at_epoch`.
    fn set_epoch(&mut self, epoch: Epoch) {
        match self {
            Self::StateVector(sv) => sv.set_epoch(epoch),
            Self::Keplerian(kep) => kep.set_epoch(epoch),
            Self::Equinoctial(eq) => eq.set_epoch(epoch),
        }
    }
}

impl fmt::Display for OrbitalParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::StateVector(sv) => fmt::Display::fmt(sv, f),
            Self::Keplerian(kep) => fmt::Display::fmt(kep, f),
            Self::Equinoctial(eq) => fmt::Display::fmt(eq, f),
        }
    }
}
