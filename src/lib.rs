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

/*! # nyx-maneuvers

Impulsive maneuver planning on two-body orbits, in the manner of [Nyx](https://nyxspace.com).

Given the current orbital state of a spacecraft, each maneuver answers two questions: can it fire now,
and if so, which impulse (and attitude) does it require to reach its target condition. The supported
maneuvers are apogee and perigee height changes, apsidal alignment, phasing, plane alignment, a combined
height and plane change, and the release of an attached spacecraft.
*/

/// Orbital states (state vectors, Keplerian and equinoctial elements), frames and the spacecraft resource model.
pub mod cosmic;

/// Utility functions shared by different modules, and which may be useful to engineers.
pub mod utils;

mod errors;
/// Functions which may fail return an error, the crate never panics on invalid input.
pub use self::errors::NyxError;

/// Loading of spacecraft and orbits from YAML configuration files.
pub mod io;

/// All of the mission design tools: maneuvers, maneuver plans and propulsion helpers.
pub mod md;

#[macro_use]
extern crate log;
extern crate hifitime;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
    pub use na::{Unit, UnitQuaternion};
}

/// Re-export some useful things
pub use self::cosmic::{
    EquinoctialElements, Frame, KeplerianElements, OrbitalParameters, Spacecraft, StateVector,
    TimeTagged,
};
pub use self::md::{Maneuver, ManeuverConfig, ManeuverKind, ManeuverPlan, ManeuverResult};
