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

use super::AstroError;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// A celestial body around which orbits are defined. Only its gravitational parameter matters to the
/// two-body computations, the radius is informational.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CelestialBody {
    /// NAIF identifier of the body
    pub id: i32,
    pub name: &'static str,
    /// Gravitational parameter in km^3/s^2
    pub mu_km3_s2: f64,
    pub mean_radius_km: f64,
}

pub const SUN: CelestialBody = CelestialBody {
    id: 10,
    name: "Sun",
    mu_km3_s2: 132_712_440_041.939_38,
    mean_radius_km: 695_700.0,
};

pub const EARTH: CelestialBody = CelestialBody {
    id: 399,
    name: "Earth",
    mu_km3_s2: 398_600.441_8,
    mean_radius_km: 6_371.008_4,
};

pub const MOON: CelestialBody = CelestialBody {
    id: 301,
    name: "Moon",
    mu_km3_s2: 4_902.800_066,
    mean_radius_km: 1_737.4,
};

/// Orientation tag of a frame. No rotation between orientations is performed in this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Inertial,
    BodyFixed,
}

/// A reference frame: a center of motion and an orientation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    pub center: CelestialBody,
    pub orientation: Orientation,
}

pub const SUN_J2000: Frame = Frame::new(SUN, Orientation::Inertial);
pub const EARTH_J2000: Frame = Frame::new(EARTH, Orientation::Inertial);
pub const MOON_J2000: Frame = Frame::new(MOON, Orientation::Inertial);

impl Frame {
    pub const fn new(center: CelestialBody, orientation: Orientation) -> Self {
        Self {
            center,
            orientation,
        }
    }

    /// Returns the gravitational parameter of the center of motion, in km^3/s^2
    pub fn mu_km3_s2(&self) -> f64 {
        self.center.mu_km3_s2
    }

    /// Returns a copy of this frame with a different gravitational parameter, e.g. to match a reference GM.
    pub fn with_mu_km3_s2(mut self, mu_km3_s2: f64) -> Self {
        self.center.mu_km3_s2 = mu_km3_s2;
        self
    }

    pub fn is_inertial(&self) -> bool {
        self.orientation == Orientation::Inertial
    }

    /// Returns true if both frames are centered on the same body, regardless of orientation
    pub fn same_center(&self, other: &Self) -> bool {
        self.center.id == other.center.id
    }

    /// Returns true if both frames share both their center and orientation
    pub fn same_as(&self, other: &Self) -> bool {
        self.same_center(other) && self.orientation == other.orientation
    }

    /// Initializes one of the known frames from its name, e.g. `Earth J2000` (case insensitive).
    pub fn from_name(name: &str) -> Result<Self, AstroError> {
        let normalized = name.trim().to_lowercase().replace(['_', '-'], " ");
        let mut parts = normalized.split_whitespace();
        let center = match parts.next() {
            Some("sun") => SUN,
            Some("earth") => EARTH,
            Some("moon") | Some("luna") => MOON,
            _ => {
                return Err(AstroError::UnknownFrame {
                    name: name.to_string(),
                })
            }
        };
        let orientation = match parts.collect::<Vec<_>>().join(" ").as_str() {
            "" | "j2000" | "eme2000" | "inertial" => Orientation::Inertial,
            "iau" | "body fixed" | "fixed" => Orientation::BodyFixed,
            _ => {
                return Err(AstroError::UnknownFrame {
                    name: name.to_string(),
                })
            }
        };
        Ok(Self::new(center, orientation))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.orientation {
            Orientation::Inertial => write!(f, "{} J2000", self.center.name),
            Orientation::BodyFixed => write!(f, "{} body fixed", self.center.name),
        }
    }
}

#[test]
fn frame_names() {
    assert_eq!(Frame::from_name("Earth J2000").unwrap(), EARTH_J2000);
    assert_eq!(Frame::from_name("EARTH_J2000").unwrap(), EARTH_J2000);
    assert_eq!(Frame::from_name("sun").unwrap(), SUN_J2000);
    assert_eq!(
        Frame::from_name("Moon body fixed").unwrap().orientation,
        Orientation::BodyFixed
    );
    assert!(Frame::from_name("Pluto J2000").is_err());
    // Display is parsable
    assert_eq!(Frame::from_name(&format!("{MOON_J2000}")).unwrap(), MOON_J2000);
    assert!(EARTH_J2000.same_center(&Frame::new(EARTH, Orientation::BodyFixed)));
    assert!(!EARTH_J2000.same_as(&Frame::new(EARTH, Orientation::BodyFixed)));
}
