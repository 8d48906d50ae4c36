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

use crate::linalg::{Matrix3, Vector3};
use std::f64::consts::{PI, TAU};

/// Returns the provided angle bounded between 0.0 (inclusive) and 2π (exclusive), in radians.
pub fn between_0_tau(angle_rad: f64) -> f64 {
    let bounded = angle_rad.rem_euclid(TAU);
    // rem_euclid may round up to exactly TAU for tiny negative inputs
    if bounded >= TAU {
        0.0
    } else {
        bounded
    }
}

/// Returns the provided angle bounded between -π (exclusive) and +π (inclusive), in radians.
pub fn between_pm_pi(angle_rad: f64) -> f64 {
    let bounded = between_0_tau(angle_rad);
    if bounded > PI {
        bounded - TAU
    } else {
        bounded
    }
}

/// Returns whether `angle_rad` lies within `tolerance_rad` of `target_rad`, modulo 2π.
///
/// The difference is wrapped into (-π, π] before comparison, so an angle just below 2π
/// and a target of zero are considered close, and vice versa.
pub fn angle_within(angle_rad: f64, target_rad: f64, tolerance_rad: f64) -> bool {
    between_pm_pi(angle_rad - target_rad).abs() <= tolerance_rad
}

/// Returns the angle in radians from `from` to `to`, measured positively about `axis`, between 0 and 2π.
pub fn signed_angle(from: &Vector3<f64>, to: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    let axis_hat = axis / axis.norm();
    between_0_tau(from.cross(to).dot(&axis_hat).atan2(from.dot(to)))
}

/// Returns the projection of a onto b
pub fn projv(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    b * a.dot(b) / b.dot(b)
}

/// Returns the components of vector a orthogonal to b
pub fn perpv(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    let big_a = a[0].abs().max(a[1].abs().max(a[2].abs()));
    let big_b = b[0].abs().max(b[1].abs().max(b[2].abs()));
    if big_a < f64::EPSILON {
        Vector3::zeros()
    } else if big_b < f64::EPSILON {
        *a
    } else {
        let a_scl = a / big_a;
        let b_scl = b / big_b;
        let v = projv(&a_scl, &b_scl);
        big_a * (a_scl - v)
    }
}

/// Rotation matrix about the X axis (passive rotation)
pub fn r1(angle_rad: f64) -> Matrix3<f64> {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Rotation matrix about the Z axis (passive rotation)
pub fn r3(angle_rad: f64) -> Matrix3<f64> {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}
