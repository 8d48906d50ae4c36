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

use crate::time::Epoch;
use snafu::Snafu;

mod frame;
pub use self::frame::*;

/// Kepler's equation and the conversions between the true, eccentric and mean anomalies.
pub mod anomaly;

mod orbit;
pub use self::orbit::*;

mod spacecraft;
pub use self::spacecraft::*;

/// A trait allowing for something to have an epoch
pub trait TimeTagged {
    /// Retrieve the Epoch
    fn epoch(&self) -> Epoch;
    /// Set the Epoch
    fn set_epoch(&mut self, epoch: Epoch);
}

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AstroError {
    #[snafu(display("invalid {element} = {value}: {reason}"))]
    InvalidElement {
        element: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[snafu(display("orbit is not elliptical (ecc = {ecc})"))]
    NotElliptical { ecc: f64 },
    #[snafu(display("Kepler's equation did not converge after {iter} iterations"))]
    MaxIterReached { iter: usize },
    #[snafu(display("math domain error: {msg}"))]
    MathDomain { msg: String },
    #[snafu(display("frames differ: {this} and {other}"))]
    FrameMismatch { this: Frame, other: Frame },
    #[snafu(display("unknown frame `{name}`"))]
    UnknownFrame { name: String },
    #[snafu(display("no ephemeris for {name} at {epoch}"))]
    EphemerisUnavailable { name: String, epoch: Epoch },
}

/// From NIST special publication 330, 2008 edition, in meters per second squared
pub const STD_GRAVITY: f64 = 9.80665;

/// If an orbit has an eccentricity below the following value, it is considered circular
pub const ECC_EPSILON: f64 = 1e-11;
