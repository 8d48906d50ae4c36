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

use super::{EquinoctialElements, StateVector};
use crate::cosmic::anomaly::{mean_to_eccentric, mean_to_true, true_to_mean};
use crate::cosmic::{AstroError, Frame, TimeTagged, ECC_EPSILON};
use crate::linalg::{Matrix3, Vector3};
use crate::time::{Duration, Epoch, Unit};
use crate::utils::{between_0_tau, r1, r3};
use std::f64::consts::{PI, TAU};
use std::fmt;

/// Classical orbital elements of an elliptical orbit.
///
/// The anomaly is stored as the mean anomaly since it is the one advanced linearly in time.
/// Elements are validated at construction and never clamped.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KeplerianElements {
    sma_km: f64,
    ecc: f64,
    inc_rad: f64,
    raan_rad: f64,
    aop_rad: f64,
    ma_rad: f64,
    pub epoch: Epoch,
    pub frame: Frame,
}

fn check_angle(element: &'static str, value: f64) -> Result<(), AstroError> {
    if (0.0..TAU).contains(&value) {
        Ok(())
    } else {
        Err(AstroError::InvalidElement {
            element,
            value,
            reason: "must be within [0, 2π)",
        })
    }
}

impl KeplerianElements {
    /// Creates new Keplerian elements, all angles in radians.
    ///
    /// Fails if a ≤ 0, e is not within [0, 1), i is not within [-π, π], or if any of RAAN, AOP
    /// and mean anomaly is outside of [0, 2π).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sma_km: f64,
        ecc: f64,
        inc_rad: f64,
        raan_rad: f64,
        aop_rad: f64,
        ma_rad: f64,
        epoch: Epoch,
        frame: Frame,
    ) -> Result<Self, AstroError> {
        if sma_km.is_nan() || sma_km <= 0.0 {
            return Err(AstroError::InvalidElement {
                element: "semi-major axis",
                value: sma_km,
                reason: "must be strictly positive",
            });
        }
        if !(0.0..1.0).contains(&ecc) {
            return Err(AstroError::InvalidElement {
                element: "eccentricity",
                value: ecc,
                reason: "must be within [0, 1)",
            });
        }
        if !(-PI..=PI).contains(&inc_rad) {
            return Err(AstroError::InvalidElement {
                element: "inclination",
                value: inc_rad,
                reason: "must be within [-π, π]",
            });
        }
        check_angle("right ascension of the ascending node", raan_rad)?;
        check_angle("argument of periapsis", aop_rad)?;
        check_angle("mean anomaly", ma_rad)?;

        Ok(Self {
            sma_km,
            ecc,
            inc_rad,
            raan_rad,
            aop_rad,
            ma_rad,
            epoch,
            frame,
        })
    }

    /// Creates new Keplerian elements from the true anomaly instead of the mean anomaly, all angles in radians.
    #[allow(clippy::too_many_arguments)]
    pub fn from_true_anomaly(
        sma_km: f64,
        ecc: f64,
        inc_rad: f64,
        raan_rad: f64,
        aop_rad: f64,
        ta_rad: f64,
        epoch: Epoch,
        frame: Frame,
    ) -> Result<Self, AstroError> {
        check_angle("true anomaly", ta_rad)?;
        // Eccentricity is validated by the anomaly conversion, but report it as an invalid element.
        if !(0.0..1.0).contains(&ecc) {
            return Err(AstroError::InvalidElement {
                element: "eccentricity",
                value: ecc,
                reason: "must be within [0, 1)",
            });
        }
        let ma_rad = true_to_mean(ta_rad, ecc)?;
        Self::new(
            sma_km, ecc, inc_rad, raan_rad, aop_rad, ma_rad, epoch, frame,
        )
    }

    /// Same as `new` but all angles are in degrees, and bounded to [0, 360) before validation.
    #[allow(clippy::too_many_arguments)]
    pub fn from_degrees(
        sma_km: f64,
        ecc: f64,
        inc_deg: f64,
        raan_deg: f64,
        aop_deg: f64,
        ma_deg: f64,
        epoch: Epoch,
        frame: Frame,
    ) -> Result<Self, AstroError> {
        Self::new(
            sma_km,
            ecc,
            inc_deg.to_radians(),
            between_0_tau(raan_deg.to_radians()),
            between_0_tau(aop_deg.to_radians()),
            between_0_tau(ma_deg.to_radians()),
            epoch,
            frame,
        )
    }

    pub fn sma_km(&self) -> f64 {
        self.sma_km
    }

    pub fn ecc(&self) -> f64 {
        self.ecc
    }

    pub fn inc_rad(&self) -> f64 {
        self.inc_rad
    }

    pub fn raan_rad(&self) -> f64 {
        self.raan_rad
    }

    pub fn aop_rad(&self) -> f64 {
        self.aop_rad
    }

    pub fn ma_rad(&self) -> f64 {
        self.ma_rad
    }

    pub fn is_circular(&self) -> bool {
        self.ecc < ECC_EPSILON
    }

    /// Returns the true anomaly in radians
    pub fn ta_rad(&self) -> Result<f64, AstroError> {
        mean_to_true(self.ma_rad, self.ecc)
    }

    /// Returns the eccentric anomaly in radians
    pub fn ea_rad(&self) -> Result<f64, AstroError> {
        mean_to_eccentric(self.ma_rad, self.ecc)
    }

    /// Returns the argument of latitude in radians
    pub fn aol_rad(&self) -> Result<f64, AstroError> {
        Ok(between_0_tau(self.aop_rad + self.ta_rad()?))
    }

    /// Returns the true longitude in radians
    pub fn tlong_rad(&self) -> Result<f64, AstroError> {
        Ok(between_0_tau(self.raan_rad + self.aop_rad + self.ta_rad()?))
    }

    /// Returns the semi parameter (or semilatus rectum) in km
    pub fn semi_parameter_km(&self) -> f64 {
        self.sma_km * (1.0 - self.ecc.powi(2))
    }

    /// Returns the norm of the specific angular momentum in km^2/s
    pub fn hmag_km2_s(&self) -> f64 {
        (self.frame.mu_km3_s2() * self.semi_parameter_km()).sqrt()
    }

    /// Returns the specific mechanical energy in km^2/s^2
    pub fn specific_energy_km2_s2(&self) -> f64 {
        -self.frame.mu_km3_s2() / (2.0 * self.sma_km)
    }

    /// Returns the mean motion in radians per second
    pub fn mean_motion_rad_s(&self) -> f64 {
        (self.frame.mu_km3_s2() / self.sma_km.powi(3)).sqrt()
    }

    /// Returns the orbital period
    pub fn period(&self) -> Duration {
        TAU / self.mean_motion_rad_s() * Unit::Second
    }

    /// Returns the rotation from the perifocal frame (periapsis, in-plane normal, angular momentum)
    /// to the inertial frame.
    pub fn perifocal_dcm(&self) -> Matrix3<f64> {
        r3(-self.raan_rad) * r1(-self.inc_rad) * r3(-self.aop_rad)
    }

    /// Returns the perigee vector in km
    pub fn perigee_vector(&self) -> Vector3<f64> {
        self.perifocal_dcm() * Vector3::new(self.sma_km * (1.0 - self.ecc), 0.0, 0.0)
    }

    /// Returns the apogee vector in km
    pub fn apogee_vector(&self) -> Vector3<f64> {
        self.perifocal_dcm() * Vector3::new(-self.sma_km * (1.0 + self.ecc), 0.0, 0.0)
    }

    /// Returns the specific angular momentum vector in km^2/s
    pub fn specific_angular_momentum(&self) -> Vector3<f64> {
        self.perifocal_dcm() * Vector3::new(0.0, 0.0, self.hmag_km2_s())
    }

    /// Returns the eccentricity vector (no unit)
    pub fn eccentricity_vector(&self) -> Vector3<f64> {
        self.perifocal_dcm() * Vector3::new(self.ecc, 0.0, 0.0)
    }

    /// Returns the ascending node vector, the X axis for an equatorial orbit
    pub fn ascending_node_vector(&self) -> Vector3<f64> {
        if self.inc_rad == 0.0 {
            Vector3::x()
        } else {
            let h = self.specific_angular_momentum();
            Vector3::new(-h[1], h[0], 0.0)
        }
    }

    /// Converts these elements into a state vector.
    ///
    /// Source: GMAT source code (`compute_kepl_to_cart`)
    pub fn to_state_vector(&self) -> Result<StateVector, AstroError> {
        let ta_rad = self.ta_rad()?;
        let p = self.semi_parameter_km();
        let mu = self.frame.mu_km3_s2();
        let radius = p / (1.0 + self.ecc * ta_rad.cos());
        let (sin_aop_ta, cos_aop_ta) = (self.aop_rad + ta_rad).sin_cos();
        let (sin_inc, cos_inc) = self.inc_rad.sin_cos();
        let (sin_raan, cos_raan) = self.raan_rad.sin_cos();
        let (sin_aop, cos_aop) = self.aop_rad.sin_cos();
        let sqrt_gm_p = (mu / p).sqrt();
        let cos_ta_ecc = ta_rad.cos() + self.ecc;
        let sin_ta = ta_rad.sin();

        let x = radius * (cos_aop_ta * cos_raan - cos_inc * sin_aop_ta * sin_raan);
        let y = radius * (cos_aop_ta * sin_raan + cos_inc * sin_aop_ta * cos_raan);
        let z = radius * sin_aop_ta * sin_inc;
        let vx = sqrt_gm_p * cos_ta_ecc * (-sin_aop * cos_raan - cos_inc * sin_raan * cos_aop)
            - sqrt_gm_p * sin_ta * (cos_aop * cos_raan - cos_inc * sin_raan * sin_aop);
        let vy = sqrt_gm_p * cos_ta_ecc * (-sin_aop * sin_raan + cos_inc * cos_raan * cos_aop)
            - sqrt_gm_p * sin_ta * (cos_aop * sin_raan + cos_inc * cos_raan * sin_aop);
        let vz = sqrt_gm_p * (cos_ta_ecc * sin_inc * cos_aop - sin_ta * sin_inc * sin_aop);

        Ok(StateVector::cartesian(
            x, y, z, vx, vy, vz, self.epoch, self.frame,
        ))
    }

    /// Converts these elements into equinoctial elements (no state vector involved)
    pub fn to_equinoctial(&self) -> Result<EquinoctialElements, AstroError> {
        let lon_peri = self.raan_rad + self.aop_rad;
        let tan_half_inc = (self.inc_rad / 2.0).tan();
        EquinoctialElements::new(
            self.semi_parameter_km(),
            self.ecc * lon_peri.cos(),
            self.ecc * lon_peri.sin(),
            tan_half_inc * self.raan_rad.cos(),
            tan_half_inc * self.raan_rad.sin(),
            self.tlong_rad()?,
            self.epoch,
            self.frame,
        )
    }

    /// Returns these elements re-epoched via Kepler's law: only the mean anomaly changes, by the mean motion
    /// times the elapsed time (which may be negative).
    ///
    /// This is a two-body model: perturbations are not accounted for.
    pub fn at_epoch(&self, epoch: Epoch) -> Self {
        let dt_s = (epoch - self.epoch).to_seconds();
        let mut me = *self;
        me.ma_rad = between_0_tau(self.ma_rad + self.mean_motion_rad_s() * dt_s);
        me.epoch = epoch;
        me
    }
}

impl TimeTagged for KeplerianElements {
    fn epoch(&self) -> Epoch {
        self.epoch
    }

    fn set_epoch(&mut self, epoch: Epoch) {
        self.epoch = epoch
    }
}

impl fmt::Display for KeplerianElements {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let decimals = f.precision().unwrap_or(6);
        write!(
            f,
            "[{}] {}\tsma = {} km\tecc = {}\tinc = {} deg\traan = {} deg\taop = {} deg\tma = {} deg",
            self.frame,
            self.epoch,
            format!("{:.*}", decimals, self.sma_km),
            format!("{:.*}", decimals, self.ecc),
            format!("{:.*}", decimals, self.inc_rad.to_degrees()),
            format!("{:.*}", decimals, self.raan_rad.to_degrees()),
            format!("{:.*}", decimals, self.aop_rad.to_degrees()),
            format!("{:.*}", decimals, self.ma_rad.to_degrees()),
        )
    }
}
