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

use super::{EquinoctialElements, KeplerianElements};
use crate::cosmic::anomaly::{true_to_eccentric, true_to_mean};
use crate::cosmic::{AstroError, Frame, TimeTagged, ECC_EPSILON};
use crate::linalg::Vector3;
use crate::time::{Duration, Epoch, Unit};
use crate::utils::{between_0_tau, signed_angle};
use approx::abs_diff_eq;
use std::f64::consts::TAU;
use std::fmt;

/// StateVector is the canonical orbital state: a position and a velocity relative to the center of
/// motion of its frame, at an epoch.
///
/// Unless noted otherwise, angles are returned in radians between 0 and 2π.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StateVector {
    /// in km
    pub position_km: Vector3<f64>,
    /// in km/s
    pub velocity_km_s: Vector3<f64>,
    pub epoch: Epoch,
    pub frame: Frame,
}

impl StateVector {
    pub fn new(
        position_km: Vector3<f64>,
        velocity_km_s: Vector3<f64>,
        epoch: Epoch,
        frame: Frame,
    ) -> Self {
        Self {
            position_km,
            velocity_km_s,
            epoch,
            frame,
        }
    }

    /// Creates a new state vector in the provided frame at the provided Epoch.
    ///
    /// **Units:** km, km, km, km/s, km/s, km/s
    #[allow(clippy::too_many_arguments)]
    pub fn cartesian(
        x_km: f64,
        y_km: f64,
        z_km: f64,
        vx_km_s: f64,
        vy_km_s: f64,
        vz_km_s: f64,
        epoch: Epoch,
        frame: Frame,
    ) -> Self {
        Self::new(
            Vector3::new(x_km, y_km, z_km),
            Vector3::new(vx_km_s, vy_km_s, vz_km_s),
            epoch,
            frame,
        )
    }

    /// Returns the magnitude of the radius vector in km
    pub fn rmag_km(&self) -> f64 {
        self.position_km.norm()
    }

    /// Returns the magnitude of the velocity vector in km/s
    pub fn vmag_km_s(&self) -> f64 {
        self.velocity_km_s.norm()
    }

    /// Returns the unit vector in the direction of the state radius
    pub fn r_hat(&self) -> Vector3<f64> {
        self.position_km / self.rmag_km()
    }

    /// Returns the specific angular momentum vector `h = r × v`, in km^2/s
    pub fn specific_angular_momentum(&self) -> Vector3<f64> {
        self.position_km.cross(&self.velocity_km_s)
    }

    /// Returns the norm of the specific angular momentum, in km^2/s
    pub fn hmag_km2_s(&self) -> f64 {
        self.specific_angular_momentum().norm()
    }

    /// Returns the specific mechanical energy in km^2/s^2
    pub fn specific_energy_km2_s2(&self) -> f64 {
        self.vmag_km_s().powi(2) / 2.0 - self.frame.mu_km3_s2() / self.rmag_km()
    }

    /// Returns the eccentricity vector `e = (v × h)/μ - r̂` (no unit)
    pub fn eccentricity_vector(&self) -> Vector3<f64> {
        self.velocity_km_s.cross(&self.specific_angular_momentum()) / self.frame.mu_km3_s2()
            - self.r_hat()
    }

    /// Returns the eccentricity (no unit)
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_vector().norm()
    }

    /// Returns whether this orbit is considered circular
    pub fn is_circular(&self) -> bool {
        self.eccentricity() < ECC_EPSILON
    }

    /// Returns the semi-major axis in km
    pub fn semi_major_axis_km(&self) -> f64 {
        -self.frame.mu_km3_s2() / (2.0 * self.specific_energy_km2_s2())
    }

    /// Returns the semi parameter (or semilatus rectum) in km
    pub fn semi_parameter_km(&self) -> f64 {
        self.hmag_km2_s().powi(2) / self.frame.mu_km3_s2()
    }

    /// Returns the inclination in radians, between 0 and π
    pub fn inclination_rad(&self) -> f64 {
        let h = self.specific_angular_momentum();
        (h[2] / h.norm()).clamp(-1.0, 1.0).acos()
    }

    /// Returns the ascending node vector `(-h_y, h_x, 0)`.
    ///
    /// For an inclination of exactly zero (or whenever that vector vanishes), the node line is
    /// undefined and the reference X axis is returned instead.
    pub fn ascending_node_vector(&self) -> Vector3<f64> {
        let h = self.specific_angular_momentum();
        let n = Vector3::new(-h[1], h[0], 0.0);
        if self.inclination_rad() == 0.0 || n.norm() == 0.0 {
            debug!("node line undefined for equatorial orbit, using the X axis");
            Vector3::x()
        } else {
            n
        }
    }

    /// Returns the right ascension of the ascending node in radians
    pub fn ascending_node_rad(&self) -> f64 {
        let n = self.ascending_node_vector();
        let raan = n.angle(&Vector3::x());
        if n[1] < 0.0 {
            between_0_tau(TAU - raan)
        } else {
            raan
        }
    }

    /// Returns the argument of periapsis in radians.
    ///
    /// The angle between the node vector and the eccentricity vector, mirrored when the eccentricity
    /// vector points below the reference plane. A circular orbit has its periapsis on the node line.
    pub fn argument_of_periapsis_rad(&self) -> f64 {
        if self.is_circular() {
            return 0.0;
        }
        let n = self.ascending_node_vector();
        let e = self.eccentricity_vector();
        let aop = n.angle(&e);
        if e[2] < 0.0 {
            between_0_tau(TAU - aop)
        } else {
            aop
        }
    }

    /// Returns the argument of latitude in radians, i.e. the angle from the node line to the position,
    /// measured in the direction of motion.
    pub fn argument_of_latitude_rad(&self) -> f64 {
        signed_angle(
            &self.ascending_node_vector(),
            &self.position_km,
            &self.specific_angular_momentum(),
        )
    }

    /// Returns the true anomaly in radians.
    ///
    /// The angle between the eccentricity vector and the position, mirrored when the spacecraft is
    /// inbound (`r·v < 0`). For a circular orbit, this is the argument of latitude.
    pub fn true_anomaly_rad(&self) -> f64 {
        if self.is_circular() {
            debug!(
                "true anomaly ill-defined for circular orbit (e = {:e}), using the argument of latitude",
                self.eccentricity()
            );
            return self.argument_of_latitude_rad();
        }
        let ta = self.eccentricity_vector().angle(&self.position_km);
        if self.position_km.dot(&self.velocity_km_s) < 0.0 {
            between_0_tau(TAU - ta)
        } else {
            ta
        }
    }

    /// Returns the true longitude in radians, i.e. the sum of the RAAN and the argument of latitude.
    pub fn true_longitude_rad(&self) -> f64 {
        between_0_tau(self.ascending_node_rad() + self.argument_of_latitude_rad())
    }

    /// Returns the eccentric anomaly in radians
    pub fn eccentric_anomaly_rad(&self) -> Result<f64, AstroError> {
        true_to_eccentric(self.true_anomaly_rad(), self.eccentricity())
    }

    /// Returns the mean anomaly in radians
    pub fn mean_anomaly_rad(&self) -> Result<f64, AstroError> {
        true_to_mean(self.true_anomaly_rad(), self.eccentricity())
    }

    /// Returns the mean motion in radians per second
    pub fn mean_motion_rad_s(&self) -> Result<f64, AstroError> {
        self.check_elliptical()?;
        Ok((self.frame.mu_km3_s2() / self.semi_major_axis_km().powi(3)).sqrt())
    }

    /// Returns the orbital period
    pub fn period(&self) -> Result<Duration, AstroError> {
        Ok(TAU / self.mean_motion_rad_s()? * Unit::Second)
    }

    /// Returns the radius of periapsis in km
    pub fn periapsis_km(&self) -> f64 {
        self.semi_major_axis_km() * (1.0 - self.eccentricity())
    }

    /// Returns the radius of apoapsis in km
    pub fn apoapsis_km(&self) -> f64 {
        self.semi_major_axis_km() * (1.0 + self.eccentricity())
    }

    /// Returns the direction of the periapsis, which is the node line for a circular orbit.
    fn periapsis_hat(&self) -> Vector3<f64> {
        if self.is_circular() {
            let n = self.ascending_node_vector();
            n / n.norm()
        } else {
            let e = self.eccentricity_vector();
            e / e.norm()
        }
    }

    /// Returns the perigee vector, from the center of motion to the periapsis, in km
    pub fn perigee_vector(&self) -> Vector3<f64> {
        self.periapsis_hat() * self.periapsis_km()
    }

    /// Returns the apogee vector, from the center of motion to the apoapsis, in km
    pub fn apogee_vector(&self) -> Vector3<f64> {
        -self.periapsis_hat() * self.apoapsis_km()
    }

    /// Apply the provided delta-v (in km/s)
    pub fn apply_dv(&mut self, dv_km_s: Vector3<f64>) {
        self.velocity_km_s += dv_km_s;
    }

    /// Copies this state after applying the provided delta-v (in km/s)
    pub fn with_dv(self, dv_km_s: Vector3<f64>) -> Self {
        let mut me = self;
        me.apply_dv(dv_km_s);
        me
    }

    /// Returns whether this state and another are equal within the specified radial and velocity absolute tolerances
    pub fn eq_within(&self, other: &Self, radial_tol_km: f64, velocity_tol_km_s: f64) -> bool {
        self.epoch == other.epoch
            && self.frame.same_as(&other.frame)
            && abs_diff_eq!(self.position_km, other.position_km, epsilon = radial_tol_km)
            && abs_diff_eq!(
                self.velocity_km_s,
                other.velocity_km_s,
                epsilon = velocity_tol_km_s
            )
    }

    fn check_elliptical(&self) -> Result<(), AstroError> {
        let ecc = self.eccentricity();
        if ecc >= 1.0 || self.specific_energy_km2_s2() >= 0.0 {
            Err(AstroError::NotElliptical { ecc })
        } else {
            Ok(())
        }
    }

    /// Converts this state into its Keplerian elements, only defined for elliptical orbits.
    pub fn to_keplerian_elements(&self) -> Result<KeplerianElements, AstroError> {
        self.check_elliptical()?;
        KeplerianElements::new(
            self.semi_major_axis_km(),
            self.eccentricity(),
            self.inclination_rad(),
            self.ascending_node_rad(),
            self.argument_of_periapsis_rad(),
            self.mean_anomaly_rad()?,
            self.epoch,
            self.frame,
        )
    }

    /// Converts this state into its equinoctial elements, only defined for elliptical orbits.
    ///
    /// This conversion does not go through the Keplerian angles and is therefore well defined for
    /// circular and equatorial orbits.
    pub fn to_equinoctial(&self) -> Result<EquinoctialElements, AstroError> {
        self.check_elliptical()?;
        let h = self.specific_angular_momentum();
        let h_hat = h / h.norm();
        let denom = 1.0 + h_hat[2];
        if denom < f64::EPSILON {
            return Err(AstroError::MathDomain {
                msg: "equinoctial elements are singular for retrograde equatorial orbits".into(),
            });
        }
        let h_eq = -h_hat[1] / denom;
        let k_eq = h_hat[0] / denom;
        let (f_hat, g_hat) = EquinoctialElements::basis(h_eq, k_eq);
        let e = self.eccentricity_vector();
        let true_longitude = between_0_tau(
            self.position_km
                .dot(&g_hat)
                .atan2(self.position_km.dot(&f_hat)),
        );
        EquinoctialElements::new(
            self.semi_parameter_km(),
            e.dot(&f_hat),
            e.dot(&g_hat),
            h_eq,
            k_eq,
            true_longitude,
            self.epoch,
            self.frame,
        )
    }
}

impl TimeTagged for StateVector {
    fn epoch(&self) -> Epoch {
        self.epoch
    }

    fn set_epoch(&mut self, epoch: Epoch) {
        self.epoch = epoch
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let decimals = f.precision().unwrap_or(6);
        write!(
            f,
            "[{}] {}\tposition = [{}, {}, {}] km\tvelocity = [{}, {}, {}] km/s",
            self.frame,
            self.epoch,
            format!("{:.*}", decimals, self.position_km[0]),
            format!("{:.*}", decimals, self.position_km[1]),
            format!("{:.*}", decimals, self.position_km[2]),
            format!("{:.*}", decimals, self.velocity_km_s[0]),
            format!("{:.*}", decimals, self.velocity_km_s[1]),
            format!("{:.*}", decimals, self.velocity_km_s[2]),
        )
    }
}
