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

use super::{epoch_from_str, epoch_to_str, frame_from_str, frame_to_str, ConfigError, ConfigRepr};
use crate::cosmic::{
    EquinoctialElements, Frame, KeplerianElements, OrbitalParameters, StateVector,
};
use crate::time::Epoch;
use crate::utils::between_0_tau;
use serde_derive::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Serializable orbit, in Cartesian, Keplerian or equinoctial form. Angles are in degrees.
///
/// The representation is inferred from the fields present, e.g.
/// ```yaml
/// sma_km: 7000.0
/// ecc: 0.01
/// inc_deg: 28.5
/// raan_deg: 10.0
/// aop_deg: 20.0
/// ta_deg: 0.0
/// epoch: 2021-03-04T00:00:00 UTC
/// frame: Earth J2000
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrbitSerde {
    Cartesian {
        x_km: f64,
        y_km: f64,
        z_km: f64,
        vx_km_s: f64,
        vy_km_s: f64,
        vz_km_s: f64,
        #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
        epoch: Epoch,
        #[serde(serialize_with = "frame_to_str", deserialize_with = "frame_from_str")]
        frame: Frame,
    },
    Keplerian {
        sma_km: f64,
        ecc: f64,
        inc_deg: f64,
        raan_deg: f64,
        aop_deg: f64,
        /// Exactly one of the mean or true anomaly must be provided
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ma_deg: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ta_deg: Option<f64>,
        #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
        epoch: Epoch,
        #[serde(serialize_with = "frame_to_str", deserialize_with = "frame_from_str")]
        frame: Frame,
    },
    Equinoctial {
        p_km: f64,
        f: f64,
        g: f64,
        h: f64,
        k: f64,
        l_deg: f64,
        #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
        epoch: Epoch,
        #[serde(serialize_with = "frame_to_str", deserialize_with = "frame_from_str")]
        frame: Frame,
    },
}

impl ConfigRepr for OrbitSerde {}

impl TryFrom<OrbitSerde> for OrbitalParameters {
    type Error = ConfigError;

    fn try_from(value: OrbitSerde) -> Result<Self, Self::Error> {
        let invalid = |e: crate::cosmic::AstroError| ConfigError::InvalidConfig {
            msg: e.to_string(),
        };
        match value {
            OrbitSerde::Cartesian {
                x_km,
                y_km,
                z_km,
                vx_km_s,
                vy_km_s,
                vz_km_s,
                epoch,
                frame,
            } => Ok(StateVector::cartesian(x_km, y_km, z_km, vx_km_s, vy_km_s, vz_km_s, epoch, frame).into()),
            OrbitSerde::Keplerian {
                sma_km,
                ecc,
                inc_deg,
                raan_deg,
                aop_deg,
                ma_deg,
                ta_deg,
                epoch,
                frame,
            } => {
                let kep = match (ma_deg, ta_deg) {
                    (Some(ma_deg), None) => KeplerianElements::from_degrees(
                        sma_km, ecc, inc_deg, raan_deg, aop_deg, ma_deg, epoch, frame,
                    ),
                    (None, Some(ta_deg)) => KeplerianElements::from_true_anomaly(
                        sma_km,
                        ecc,
                        inc_deg.to_radians(),
                        between_0_tau(raan_deg.to_radians()),
                        between_0_tau(aop_deg.to_radians()),
                        between_0_tau(ta_deg.to_radians()),
                        epoch,
                        frame,
                    ),
                    _ => {
                        return Err(ConfigError::InvalidConfig {
                            msg: "exactly one of `ma_deg` and `ta_deg` must be set".to_string(),
                        })
                    }
                };
                Ok(kep.map_err(invalid)?.into())
            }
            OrbitSerde::Equinoctial {
                p_km,
                f,
                g,
                h,
                k,
                l_deg,
                epoch,
                frame,
            } => Ok(
                EquinoctialElements::new(p_km, f, g, h, k, l_deg.to_radians(), epoch, frame)
                    .map_err(invalid)?
                    .into(),
            ),
        }
    }
}

impl From<OrbitalParameters> for OrbitSerde {
    fn from(orbit: OrbitalParameters) -> Self {
        match orbit {
            OrbitalParameters::StateVector(sv) => Self::Cartesian {
                x_km: sv.position_km[0],
                y_km: sv.position_km[1],
                z_km: sv.position_km[2],
                vx_km_s: sv.velocity_km_s[0],
                vy_km_s: sv.velocity_km_s[1],
                vz_km_s: sv.velocity_km_s[2],
                epoch: sv.epoch,
                frame: sv.frame,
            },
            OrbitalParameters::Keplerian(kep) => Self::Keplerian {
                sma_km: kep.sma_km(),
                ecc: kep.ecc(),
                inc_deg: kep.inc_rad().to_degrees(),
                raan_deg: kep.raan_rad().to_degrees(),
                aop_deg: kep.aop_rad().to_degrees(),
                ma_deg: Some(kep.ma_rad().to_degrees()),
                ta_deg: None,
                epoch: kep.epoch,
                frame: kep.frame,
            },
            OrbitalParameters::Equinoctial(eq) => Self::Equinoctial {
                p_km: eq.p_km(),
                f: eq.f(),
                g: eq.g(),
                h: eq.h(),
                k: eq.k(),
                l_deg: eq.l_rad().to_degrees(),
                epoch: eq.epoch,
                frame: eq.frame,
            },
        }
    }
}
