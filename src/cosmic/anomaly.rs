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

//! All functions in this module operate on elliptical orbits only and work in radians.

use super::AstroError;
use crate::utils::between_0_tau;

/// Convergence tolerance on the eccentric anomaly when solving Kepler's equation
pub const MA_EPSILON: f64 = 1e-14;
/// Maximum number of Newton iterations when solving Kepler's equation
pub const MAX_KEPLER_ITER: usize = 1000;

fn check_elliptical(ecc: f64) -> Result<(), AstroError> {
    if !(0.0..1.0).contains(&ecc) {
        Err(AstroError::NotElliptical { ecc })
    } else {
        Ok(())
    }
}

/// Returns the eccentric anomaly in [0, 2π) from the true anomaly.
pub fn true_to_eccentric(ta_rad: f64, ecc: f64) -> Result<f64, AstroError> {
    check_elliptical(ecc)?;
    let (sin_ta, cos_ta) = ta_rad.sin_cos();
    let ecc_cos_ta = ecc * cos_ta;
    let sin_ea = ((1.0 - ecc.powi(2)).sqrt() * sin_ta) / (1.0 + ecc_cos_ta);
    let cos_ea = (ecc + cos_ta) / (1.0 + ecc_cos_ta);
    Ok(between_0_tau(sin_ea.atan2(cos_ea)))
}

/// Returns the true anomaly in [0, 2π) from the eccentric anomaly.
pub fn eccentric_to_true(ea_rad: f64, ecc: f64) -> Result<f64, AstroError> {
    check_elliptical(ecc)?;
    let (sin_ea, cos_ea) = ea_rad.sin_cos();
    let ta = ((1.0 - ecc.powi(2)).sqrt() * sin_ea).atan2(cos_ea - ecc);
    Ok(between_0_tau(ta))
}

/// Returns the mean anomaly in [0, 2π) from the eccentric anomaly (Kepler's equation).
pub fn eccentric_to_mean(ea_rad: f64, ecc: f64) -> Result<f64, AstroError> {
    check_elliptical(ecc)?;
    Ok(between_0_tau(ea_rad - ecc * ea_rad.sin()))
}

/// Solves Kepler's equation `M = E - e sin E` for the eccentric anomaly, returned in [0, 2π).
///
/// Newton-Raphson iteration seeded with `M + e sin M` (GTDS MathSpec Equations 3-180 to 3-182).
pub fn mean_to_eccentric(ma_rad: f64, ecc: f64) -> Result<f64, AstroError> {
    check_elliptical(ecc)?;
    let ma = between_0_tau(ma_rad);
    if ecc < f64::EPSILON {
        return Ok(ma);
    }

    let mut ea = ma + ecc * ma.sin();
    let mut iter = 0;
    loop {
        iter += 1;
        if iter > MAX_KEPLER_ITER {
            error!("Kepler's equation failed to converge for M = {ma} rad, e = {ecc}");
            return Err(AstroError::MaxIterReached { iter: iter - 1 });
        }

        let normalizer = 1.0 - ecc * ea.cos();
        if normalizer.abs() < MA_EPSILON {
            return Err(AstroError::MathDomain {
                msg: format!("normalizer too small {normalizer}"),
            });
        }

        let next = ea - (ea - ecc * ea.sin() - ma) / normalizer;
        if (next - ea).abs() < MA_EPSILON {
            ea = next;
            break;
        }
        ea = next;
    }

    Ok(between_0_tau(ea))
}

/// Returns the true anomaly in [0, 2π) from the mean anomaly.
pub fn mean_to_true(ma_rad: f64, ecc: f64) -> Result<f64, AstroError> {
    eccentric_to_true(mean_to_eccentric(ma_rad, ecc)?, ecc)
}

/// Returns the mean anomaly in [0, 2π) from the true anomaly.
pub fn true_to_mean(ta_rad: f64, ecc: f64) -> Result<f64, AstroError> {
    eccentric_to_mean(true_to_eccentric(ta_rad, ecc)?, ecc)
}
