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

use super::ManeuverError;
use crate::cosmic::{AstroError, KeplerianElements, OrbitalParameters, TimeTagged};
use crate::time::Epoch;
use std::fmt;
use std::sync::Arc;

/// A provider of the orbital state of a tracked body.
///
/// Implementations must be self-consistent: querying the same epoch twice returns the same state.
pub trait Ephemeris: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Returns the state of this body at the provided epoch
    fn state_at(&self, epoch: Epoch) -> Result<OrbitalParameters, AstroError>;
}

/// An ephemeris of a body following an unperturbed two-body orbit, e.g. another spacecraft.
#[derive(Clone, Debug, PartialEq)]
pub struct TwoBodyEphemeris {
    pub name: String,
    pub orbit: KeplerianElements,
}

impl TwoBodyEphemeris {
    pub fn new(name: &str, orbit: KeplerianElements) -> Self {
        Self {
            name: name.to_string(),
            orbit,
        }
    }
}

impl Ephemeris for TwoBodyEphemeris {
    fn name(&self) -> &str {
        &self.name
    }

    fn state_at(&self, epoch: Epoch) -> Result<OrbitalParameters, AstroError> {
        Ok(self.orbit.at_epoch(epoch).into())
    }
}

/// The target of a maneuver
#[derive(Clone, Debug)]
pub enum ManeuverTarget {
    /// A fixed orbit, pinned at its own epoch and re-epoched by two-body propagation
    Orbit(OrbitalParameters),
    /// A tracked body whose ephemeris is queried when needed
    Body(Arc<dyn Ephemeris>),
    /// A bare apsis radius in km, only valid for height changes
    Radius(f64),
}

impl ManeuverTarget {
    /// Returns the target orbit at the provided epoch, or `None` for a bare radius.
    pub fn orbit_at(&self, epoch: Epoch) -> Result<Option<OrbitalParameters>, AstroError> {
        match self {
            Self::Orbit(orbit) => {
                if orbit.epoch() == epoch {
                    Ok(Some(*orbit))
                } else {
                    Ok(Some(orbit.at_epoch(epoch)?.into()))
                }
            }
            Self::Body(ephem) => {
                let state = ephem.state_at(epoch)?;
                if state.epoch() != epoch {
                    return Err(AstroError::EphemerisUnavailable {
                        name: ephem.name().to_string(),
                        epoch,
                    });
                }
                Ok(Some(state))
            }
            Self::Radius(_) => Ok(None),
        }
    }
}

impl From<OrbitalParameters> for ManeuverTarget {
    fn from(orbit: OrbitalParameters) -> Self {
        Self::Orbit(orbit)
    }
}

impl fmt::Display for ManeuverTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Orbit(orbit) => write!(f, "orbit {orbit}"),
            Self::Body(ephem) => write!(f, "body {}", ephem.name()),
            Self::Radius(radius_km) => write!(f, "radius {radius_km} km"),
        }
    }
}

/// Resolves the target orbit of a maneuver at the epoch of the provided state, checking that both are
/// expressed in the same frame. No frame transformation is performed.
pub(crate) fn resolve_orbit(
    target: &ManeuverTarget,
    kind: &'static str,
    state: &OrbitalParameters,
) -> Result<OrbitalParameters, ManeuverError> {
    let orbit = target
        .orbit_at(state.epoch())?
        .ok_or(ManeuverError::MissingTarget {
            kind,
            what: "orbit",
        })?;
    if !orbit.frame().same_as(&state.frame()) {
        return Err(AstroError::FrameMismatch {
            this: state.frame(),
            other: orbit.frame(),
        }
        .into());
    }
    Ok(orbit)
}
