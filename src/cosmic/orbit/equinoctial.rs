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

use super::{KeplerianElements, StateVector};
use crate::cosmic::anomaly::true_to_mean;
use crate::cosmic::{AstroError, Frame, TimeTagged};
use crate::linalg::Vector3;
use crate::time::Epoch;
use crate::utils::between_0_tau;
use std::fmt;

/// Modified equinoctial elements (p, f, g, h, k, L).
///
/// `p` is the semi parameter, `(f, g)` is the eccentricity vector expressed in the equinoctial frame,
/// `(h, k) = tan(i/2)·(cos Ω, sin Ω)` and `L` is the true longitude. These are well defined for
/// circular and equatorial orbits, but singular for retrograde equatorial ones (i = π).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EquinoctialElements {
    p_km: f64,
    f: f64,
    g: f64,
    h: f64,
    k: f64,
    l_rad: f64,
    pub epoch: Epoch,
    pub frame: Frame,
}

impl EquinoctialElements {
    /// Creates new equinoctial elements, fails if p ≤ 0 or if the orbit is not elliptical.
    /// The true longitude is bounded to [0, 2π).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        p_km: f64,
        f: f64,
        g: f64,
        h: f64,
        k: f64,
        l_rad: f64,
        epoch: Epoch,
        frame: Frame,
    ) -> Result<Self, AstroError> {
        if p_km.is_nan() || p_km <= 0.0 {
            return Err(AstroError::InvalidElement {
                element: "semi parameter",
                value: p_km,
                reason: "must be strictly positive",
            });
        }
        let ecc = (f.powi(2) + g.powi(2)).sqrt();
        if ecc.is_nan() || ecc >= 1.0 {
            return Err(AstroError::InvalidElement {
                element: "eccentricity",
                value: ecc,
                reason: "must be within [0, 1)",
            });
        }
        if !(h.is_finite() && k.is_finite() && l_rad.is_finite()) {
            return Err(AstroError::MathDomain {
                msg: format!("non finite equinoctial elements h = {h}, k = {k}, L = {l_rad}"),
            });
        }
        Ok(Self {
            p_km,
            f,
            g,
            h,
            k,
            l_rad: between_0_tau(l_rad),
            epoch,
            frame,
        })
    }

    pub fn p_km(&self) -> f64 {
        self.p_km
    }

    pub fn f(&self) -> f64 {
        self.f
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    /// True longitude in radians
    pub fn l_rad(&self) -> f64 {
        self.l_rad
    }

    /// Returns the unit vectors `(f̂, ĝ)` of the equinoctial frame for the provided `h` and `k`.
    pub(crate) fn basis(h: f64, k: f64) -> (Vector3<f64>, Vector3<f64>) {
        let s2 = 1.0 + h.powi(2) + k.powi(2);
        let f_hat = Vector3::new(1.0 - k.powi(2) + h.powi(2), 2.0 * h * k, -2.0 * k) / s2;
        let g_hat = Vector3::new(2.0 * h * k, 1.0 + k.powi(2) - h.powi(2), 2.0 * h) / s2;
        (f_hat, g_hat)
    }

    pub fn ecc(&self) -> f64 {
        (self.f.powi(2) + self.g.powi(2)).sqrt()
    }

    pub fn sma_km(&self) -> f64 {
        self.p_km / (1.0 - self.ecc().powi(2))
    }

    pub fn inc_rad(&self) -> f64 {
        2.0 * (self.h.powi(2) + self.k.powi(2)).sqrt().atan()
    }

    pub fn raan_rad(&self) -> f64 {
        between_0_tau(self.k.atan2(self.h))
    }

    /// Longitude of periapsis, i.e. RAAN + AOP, in radians
    pub fn lon_peri_rad(&self) -> f64 {
        between_0_tau(self.g.atan2(self.f))
    }

    pub fn aop_rad(&self) -> f64 {
        between_0_tau(self.lon_peri_rad() - self.raan_rad())
    }

    pub fn ta_rad(&self) -> f64 {
        between_0_tau(self.l_rad - self.lon_peri_rad())
    }

    /// Converts these elements into Keplerian elements.
    pub fn to_keplerian_elements(&self) -> Result<KeplerianElements, AstroError> {
        let ecc = self.ecc();
        KeplerianElements::new(
            self.sma_km(),
            ecc,
            self.inc_rad(),
            self.raan_rad(),
            self.aop_rad(),
            true_to_mean(self.ta_rad(), ecc)?,
            self.epoch,
            self.frame,
        )
    }

    /// Converts these elements into a state vector.
    pub fn to_state_vector(&self) -> StateVector {
        let (sin_l, cos_l) = self.l_rad.sin_cos();
        let (f, g, h, k) = (self.f, self.g, self.h, self.k);
        let w = 1.0 + f * cos_l + g * sin_l;
        let r = self.p_km / w;
        let s2 = 1.0 + h.powi(2) + k.powi(2);
        let alpha2 = h.powi(2) - k.powi(2);
        let sqrt_gm_p = (self.frame.mu_km3_s2() / self.p_km).sqrt();

        let position = Vector3::new(
            r / s2 * (cos_l + alpha2 * cos_l + 2.0 * h * k * sin_l),
            r / s2 * (sin_l - alpha2 * sin_l + 2.0 * h * k * cos_l),
            2.0 * r / s2 * (h * sin_l - k * cos_l),
        );
        let velocity = Vector3::new(
            -sqrt_gm_p / s2
                * (sin_l + alpha2 * sin_l - 2.0 * h * k * cos_l + g - 2.0 * f * h * k + alpha2 * g),
            -sqrt_gm_p / s2
                * (-cos_l + alpha2 * cos_l + 2.0 * h * k * sin_l - f + 2.0 * g * h * k + alpha2 * f),
            2.0 * sqrt_gm_p / s2 * (h * cos_l + k * sin_l + f * h + g * k),
        );

        StateVector::new(position, velocity, self.epoch, self.frame)
    }
}

impl TimeTagged for EquinoctialElements {
    fn epoch(&self) -> Epoch {
        self.epoch
    }

    fn set_epoch(&mut self, epoch: Epoch) {
        self.epoch = epoch
    }
}

impl fmt::Display for EquinoctialElements {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let decimals = f.precision().unwrap_or(6);
        write!(
            f,
            "[{}] {}\tp = {} km\tf = {}\tg = {}\th = {}\tk = {}\tL = {} deg",
            self.frame,
            self.epoch,
            format!("{:.*}", decimals, self.p_km),
            format!("{:.*}", decimals, self.f),
            format!("{:.*}", decimals, self.g),
            format!("{:.*}", decimals, self.h),
            format!("{:.*}", decimals, self.k),
            format!("{:.*}", decimals, self.l_rad.to_degrees()),
        )
    }
}

#[test]
fn equinoctial_basis_is_orthonormal() {
    for (h, k) in [(0.0, 0.0), (0.3, -0.2), (-1.2, 0.7)] {
        let (f_hat, g_hat) = EquinoctialElements::basis(h, k);
        assert!((f_hat.norm() - 1.0).abs() < 1e-14);
        assert!((g_hat.norm() - 1.0).abs() < 1e-14);
        assert!(f_hat.dot(&g_hat).abs() < 1e-14);
    }
}
