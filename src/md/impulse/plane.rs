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

use crate::cosmic::{OrbitalParameters, StateVector};
use crate::linalg::{Unit, UnitQuaternion, Vector3};
use crate::utils::perpv;
use std::f64::consts::FRAC_PI_2;
use std::fmt;

/// Relative norm of the node vector below which both planes are considered identical
const COPLANAR_EPSILON: f64 = 1e-12;

/// Node of the current orbit on the target orbital plane, along `h_target × h_current`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Ascending,
    Descending,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "ascending node"),
            Self::Descending => write!(f, "descending node"),
        }
    }
}

/// Returns the node line `h_target × h_current`, or None if both planes are the same.
pub fn node_vector(current: &StateVector, target: &OrbitalParameters) -> Option<Vector3<f64>> {
    let h_current = current.specific_angular_momentum();
    let h_target = target.specific_angular_momentum();
    let node = h_target.cross(&h_current);
    if node.norm() <= COPLANAR_EPSILON * h_current.norm() * h_target.norm() {
        warn!("target orbit is coplanar with the current orbit, no plane change needed");
        None
    } else {
        Some(node)
    }
}

/// Returns the node at which the spacecraft is, within the provided tolerance, if any.
pub fn node_at(
    current: &StateVector,
    target: &OrbitalParameters,
    tolerance_rad: f64,
) -> Option<Node> {
    let node = node_vector(current, target)?;
    if current.position_km.angle(&node) <= tolerance_rad {
        Some(Node::Ascending)
    } else if current.position_km.angle(&-node) <= tolerance_rad {
        Some(Node::Descending)
    } else {
        None
    }
}

/// Relative inclination between two planes, from the spherical law of cosines.
pub fn relative_inclination_rad(inc1_rad: f64, raan1_rad: f64, inc2_rad: f64, raan2_rad: f64) -> f64 {
    (inc1_rad.cos() * inc2_rad.cos()
        + inc1_rad.sin() * inc2_rad.sin() * (raan2_rad - raan1_rad).cos())
    .clamp(-1.0, 1.0)
    .acos()
}

/// Delta-v, in km/s, rotating the velocity component perpendicular to the radius onto the target plane.
pub fn delta_v(current: &StateVector, target: &OrbitalParameters, node: Node) -> Vector3<f64> {
    let delta_inc_rad = relative_inclination_rad(
        current.inclination_rad(),
        current.ascending_node_rad(),
        target.inclination(),
        target.ascending_node(),
    );

    let v_perp = perpv(&current.velocity_km_s, &current.position_km);
    let v_perp_norm = v_perp.norm();
    let magnitude = 2.0 * v_perp_norm * (delta_inc_rad / 2.0).sin();
    if magnitude == 0.0 {
        return Vector3::zeros();
    }

    let angle_rad = match node {
        Node::Ascending => -(FRAC_PI_2 + delta_inc_rad / 2.0),
        Node::Descending => FRAC_PI_2 + delta_inc_rad / 2.0,
    };
    let rotation = UnitQuaternion::from_axis_angle(&Unit::new_normalize(current.position_km), angle_rad);

    magnitude * (rotation * (v_perp / v_perp_norm))
}
