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

use super::impulse::{apsidal, apsis, phasing, plane, ApsidalIntersections, Apsis, PhasingSolution};
use super::propulsion::{combined_isp_s, delta_m, delta_t, total_fuel_flow_kg_s};
use super::result::{orientation, ManeuverResult, Window};
use super::target::{resolve_orbit, ManeuverTarget};
use super::ManeuverError;
use crate::cosmic::{Engine, OrbitalParameters, Spacecraft, StateVector, TimeTagged};
use crate::io::{duration_from_str, duration_to_str, epoch_from_str, epoch_to_str, ConfigRepr};
use crate::linalg::Vector3;
use crate::time::{Duration, Epoch, Unit};
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use typed_builder::TypedBuilder;

/// Default angular tolerance of the feasibility predicates: 0.1 degree
pub const DEFAULT_ANGULAR_TOLERANCE_RAD: f64 = 0.1 * std::f64::consts::PI / 180.0;

fn default_tolerance() -> f64 {
    DEFAULT_ANGULAR_TOLERANCE_RAD
}

fn default_hold() -> Duration {
    Duration::ZERO
}

/// Configuration shared by all maneuvers
#[derive(Clone, Debug, PartialEq, TypedBuilder, Serialize, Deserialize)]
#[builder(doc)]
pub struct ManeuverConfig {
    /// The maneuver cannot be executed before this epoch
    #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
    pub minimum_epoch: Epoch,
    /// Attitude dwell after the burn, before the next maneuver may be evaluated
    #[builder(default = Duration::ZERO)]
    #[serde(
        default = "default_hold",
        serialize_with = "duration_to_str",
        deserialize_with = "duration_from_str"
    )]
    pub hold_duration: Duration,
    /// Names of the engines firing together
    #[builder(default)]
    #[serde(default)]
    pub engines: Vec<String>,
    /// Tolerance of the angular feasibility checks, in radians
    #[builder(default = DEFAULT_ANGULAR_TOLERANCE_RAD)]
    #[serde(default = "default_tolerance")]
    pub angular_tolerance_rad: f64,
}

impl ConfigRepr for ManeuverConfig {}

/// The kinds of maneuver, each with its target.
#[derive(Clone, Debug)]
pub enum ManeuverKind {
    /// Raises or lowers the apogee, fired at perigee
    ApogeeHeight { target: ManeuverTarget },
    /// Raises or lowers the perigee, fired at apogee
    PerigeeHeight { target: ManeuverTarget },
    /// Rotates the line of apsides onto that of the target orbit, fired where both orbits intersect
    ApsidalAlignment { target: ManeuverTarget },
    /// Shifts the spacecraft along track to the true longitude of the target after a number of revolutions
    Phasing {
        target: ManeuverTarget,
        revolutions: u32,
    },
    /// Rotates the orbital plane onto that of the target, fired at a node
    PlaneAlignment { target: ManeuverTarget },
    /// Apsis height change and plane alignment in a single impulse, fired at a node
    Combined {
        apsis: Apsis,
        height: ManeuverTarget,
        plane: ManeuverTarget,
    },
    /// Separation of an attached spacecraft, without any impulse
    Release { child: String },
}

impl ManeuverKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ApogeeHeight { .. } => "apogee height change",
            Self::PerigeeHeight { .. } => "perigee height change",
            Self::ApsidalAlignment { .. } => "apsidal alignment",
            Self::Phasing { .. } => "phasing",
            Self::PlaneAlignment { .. } => "plane alignment",
            Self::Combined { .. } => "combined maneuver",
            Self::Release { .. } => "release",
        }
    }

    fn is_impulsive(&self) -> bool {
        !matches!(self, Self::Release { .. })
    }

    /// Checks the targets of this kind of maneuver
    fn validate(&self) -> Result<(), ManeuverError> {
        let kind = self.name();
        let check_radius = |target: &ManeuverTarget| match target {
            ManeuverTarget::Radius(radius_km) if !(radius_km.is_finite() && *radius_km > 0.0) => {
                Err(ManeuverError::InvalidTarget {
                    kind,
                    reason: format!("target radius must be strictly positive, got {radius_km} km"),
                })
            }
            _ => Ok(()),
        };
        let needs_orbit = |target: &ManeuverTarget| match target {
            ManeuverTarget::Radius(_) => Err(ManeuverError::InvalidTarget {
                kind,
                reason: "a target orbit or body is required, not a radius".to_string(),
            }),
            _ => Ok(()),
        };

        match self {
            Self::ApogeeHeight { target } | Self::PerigeeHeight { target } => check_radius(target),
            Self::ApsidalAlignment { target } | Self::PlaneAlignment { target } => {
                needs_orbit(target)
            }
            Self::Phasing {
                target,
                revolutions,
            } => {
                if *revolutions == 0 {
                    return Err(ManeuverError::InvalidRevolutions {
                        revolutions: *revolutions,
                    });
                }
                needs_orbit(target)
            }
            Self::Combined { height, plane, .. } => {
                check_radius(height)?;
                needs_orbit(plane)
            }
            Self::Release { child } => {
                if child.trim().is_empty() {
                    Err(ManeuverError::MissingTarget {
                        kind,
                        what: "child spacecraft",
                    })
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl fmt::Display for ManeuverKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ApogeeHeight { target }
            | Self::PerigeeHeight { target }
            | Self::ApsidalAlignment { target }
            | Self::PlaneAlignment { target } => write!(f, "{} to {target}", self.name()),
            Self::Phasing {
                target,
                revolutions,
            } => write!(f, "phasing to {target} in {revolutions} revolution(s)"),
            Self::Combined {
                apsis,
                height,
                plane,
            } => write!(f, "{apsis} height change to {height} and plane alignment to {plane}"),
            Self::Release { child } => write!(f, "release of {child}"),
        }
    }
}

/// Checks that the specific impulse and fuel flow of an engine are finite and strictly positive
fn check_engine(engine: &Engine) -> Result<(), ManeuverError> {
    for (what, value) in [
        ("specific impulse", engine.isp_s),
        ("fuel flow", engine.fuel_flow_kg_s),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(ManeuverError::InvalidEngine {
                name: engine.name.clone(),
                reason: format!("{what} must be strictly positive, got {value}"),
            });
        }
    }
    Ok(())
}

/// Impulse solved for a given state, before the resource accounting
struct Impulse {
    delta_v_km_s: Vector3<f64>,
    hold_duration: Option<Duration>,
    released: Option<String>,
}

/// A maneuver: a spacecraft, its configuration, and what the maneuver should achieve.
///
/// A maneuver never changes once built. Use [Maneuver::can_execute] to check whether it can be fired
/// from a given state, and [Maneuver::execute] to compute the impulse.
#[derive(Clone, Debug)]
pub struct Maneuver {
    spacecraft: Arc<Spacecraft>,
    config: ManeuverConfig,
    kind: ManeuverKind,
}

impl Maneuver {
    /// Builds a new maneuver, checking that its engines exist on the spacecraft and that its target is consistent.
    pub fn new(
        spacecraft: Arc<Spacecraft>,
        config: ManeuverConfig,
        kind: ManeuverKind,
    ) -> Result<Self, ManeuverError> {
        kind.validate()?;
        if kind.is_impulsive() {
            if config.engines.is_empty() {
                return Err(ManeuverError::NoEngines);
            }
            for name in &config.engines {
                let engine = spacecraft
                    .engine(name)
                    .ok_or_else(|| ManeuverError::UnknownEngine { name: name.clone() })?;
                check_engine(engine)?;
            }
        }
        if !(config.angular_tolerance_rad.is_finite() && config.angular_tolerance_rad >= 0.0) {
            return Err(ManeuverError::InvalidTarget {
                kind: kind.name(),
                reason: format!(
                    "angular tolerance must be positive, got {} rad",
                    config.angular_tolerance_rad
                ),
            });
        }
        Ok(Self {
            spacecraft,
            config,
            kind,
        })
    }

    pub fn spacecraft(&self) -> &Spacecraft {
        &self.spacecraft
    }

    pub fn config(&self) -> &ManeuverConfig {
        &self.config
    }

    pub fn kind(&self) -> &ManeuverKind {
        &self.kind
    }

    pub fn minimum_epoch(&self) -> Epoch {
        self.config.minimum_epoch
    }

    fn engines(&self) -> Result<Vec<&Engine>, ManeuverError> {
        self.config
            .engines
            .iter()
            .map(|name| {
                self.spacecraft
                    .engine(name)
                    .ok_or_else(|| ManeuverError::UnknownEngine { name: name.clone() })
            })
            .collect()
    }

    /// Returns the target orbit of this maneuver at the provided epoch: either its fixed target orbit
    /// re-epoched by two-body propagation, or the state of its target body.
    ///
    /// For a combined maneuver, this is the target of the plane alignment.
    pub fn target_orbit(&self, epoch: Epoch) -> Result<OrbitalParameters, ManeuverError> {
        let kind = self.kind.name();
        let target = match &self.kind {
            ManeuverKind::ApogeeHeight { target }
            | ManeuverKind::PerigeeHeight { target }
            | ManeuverKind::ApsidalAlignment { target }
            | ManeuverKind::Phasing { target, .. }
            | ManeuverKind::PlaneAlignment { target } => target,
            ManeuverKind::Combined { plane, .. } => plane,
            ManeuverKind::Release { .. } => {
                return Err(ManeuverError::MissingTarget {
                    kind,
                    what: "orbit",
                })
            }
        };
        target.orbit_at(epoch)?.ok_or(ManeuverError::MissingTarget {
            kind,
            what: "orbit",
        })
    }

    /// Returns the target apsis radius in km. Without an explicit radius, the magnitude of the apogee
    /// vector of the target orbit is used, for both the apogee and the perigee height changes.
    fn target_radius_km(
        &self,
        target: &ManeuverTarget,
        state: &OrbitalParameters,
    ) -> Result<f64, ManeuverError> {
        match target {
            ManeuverTarget::Radius(radius_km) => Ok(*radius_km),
            _ => {
                // TODO: confirm whether a perigee height change should use the perigee of the target orbit instead
                let orbit = resolve_orbit(target, self.kind.name(), state)?;
                Ok(orbit.apogee_vector()?.norm())
            }
        }
    }

    /// Returns whether this maneuver can be executed from the provided state.
    ///
    /// It never can before the minimum epoch. Any error while resolving the target or evaluating the
    /// geometry is logged and makes the maneuver not executable.
    pub fn can_execute(&self, state: &OrbitalParameters) -> bool {
        if state.epoch() < self.config.minimum_epoch {
            debug!(
                "{} not executable before {} (state at {})",
                self.kind.name(),
                self.config.minimum_epoch,
                state.epoch()
            );
            return false;
        }
        match self.is_feasible(state) {
            Ok(feasible) => {
                debug!(
                    "{} {} at {}",
                    self.kind.name(),
                    if feasible { "feasible" } else { "not feasible" },
                    state.epoch()
                );
                feasible
            }
            Err(e) => {
                warn!("{} not executable at {}: {e}", self.kind.name(), state.epoch());
                false
            }
        }
    }

    /// Geometric feasibility of this maneuver from the provided state, regardless of the minimum epoch.
    pub fn is_feasible(&self, state: &OrbitalParameters) -> Result<bool, ManeuverError> {
        let tol = self.config.angular_tolerance_rad;
        let kind = self.kind.name();
        match &self.kind {
            ManeuverKind::ApogeeHeight { .. } => Ok(apsis::is_feasible(Apsis::Apogee, state, tol)?),
            ManeuverKind::PerigeeHeight { .. } => {
                Ok(apsis::is_feasible(Apsis::Perigee, state, tol)?)
            }
            ManeuverKind::ApsidalAlignment { target } => {
                let sv = state.to_state_vector()?;
                let target = resolve_orbit(target, kind, state)?.to_keplerian_elements()?;
                let intersections = ApsidalIntersections::new(&sv, &target)?;
                Ok(intersections
                    .nearest(sv.true_anomaly_rad(), tol)
                    .is_some())
            }
            ManeuverKind::Phasing { target, .. } => {
                resolve_orbit(target, kind, state)?;
                Ok(phasing::is_feasible(state, tol)?)
            }
            ManeuverKind::PlaneAlignment { target } => {
                let sv = state.to_state_vector()?;
                let target = resolve_orbit(target, kind, state)?;
                Ok(plane::node_at(&sv, &target, tol).is_some())
            }
            ManeuverKind::Combined {
                apsis: burn_apsis,
                plane: plane_target,
                ..
            } => {
                if !apsis::is_feasible(*burn_apsis, state, tol)? {
                    return Ok(false);
                }
                let sv = state.to_state_vector()?;
                let target = resolve_orbit(plane_target, kind, state)?;
                Ok(plane::node_at(&sv, &target, tol).is_some())
            }
            ManeuverKind::Release { child } => Ok(self.spacecraft.has_child(child)),
        }
    }

    /// Solves the impulse of this maneuver from the provided state
    fn impulse(&self, state: &OrbitalParameters) -> Result<Impulse, ManeuverError> {
        let tol = self.config.angular_tolerance_rad;
        let kind = self.kind.name();
        let sv: StateVector = state.to_state_vector()?;
        let impulse_only = |delta_v_km_s| Impulse {
            delta_v_km_s,
            hold_duration: None,
            released: None,
        };

        match &self.kind {
            ManeuverKind::ApogeeHeight { target } | ManeuverKind::PerigeeHeight { target } => {
                let radius_km = self.target_radius_km(target, state)?;
                Ok(impulse_only(apsis::delta_v(&sv, radius_km)))
            }
            ManeuverKind::ApsidalAlignment { target } => {
                let target = resolve_orbit(target, kind, state)?.to_keplerian_elements()?;
                let intersections = ApsidalIntersections::new(&sv, &target)?;
                let ta_rad = sv.true_anomaly_rad();
                let nu_rad = intersections.closest(ta_rad);
                debug!(
                    "apsidal alignment: theta = {:.6} deg, burning at {:.6} deg (P = {:.6} deg, Q = {:.6} deg)",
                    intersections.theta_rad.to_degrees(),
                    nu_rad.to_degrees(),
                    intersections.nu_p_rad.to_degrees(),
                    intersections.nu_q_rad.to_degrees()
                );
                Ok(impulse_only(apsidal::delta_v(&sv, &target, &intersections, nu_rad)?))
            }
            ManeuverKind::Phasing {
                target,
                revolutions,
            } => {
                let target = resolve_orbit(target, kind, state)?;
                let solution = PhasingSolution::new(&sv, target.true_longitude()?, *revolutions)?;
                Ok(Impulse {
                    delta_v_km_s: solution.delta_v_km_s,
                    hold_duration: Some(solution.hold_duration()),
                    released: None,
                })
            }
            ManeuverKind::PlaneAlignment { target } => {
                let target = resolve_orbit(target, kind, state)?;
                let node = plane::node_at(&sv, &target, tol).ok_or(ManeuverError::NotAtNode)?;
                Ok(impulse_only(plane::delta_v(&sv, &target, node)))
            }
            ManeuverKind::Combined {
                height,
                plane: plane_target,
                ..
            } => {
                let radius_km = self.target_radius_km(height, state)?;
                let target = resolve_orbit(plane_target, kind, state)?;
                let node = plane::node_at(&sv, &target, tol).ok_or(ManeuverError::NotAtNode)?;
                Ok(impulse_only(
                    apsis::delta_v(&sv, radius_km) + plane::delta_v(&sv, &target, node),
                ))
            }
            ManeuverKind::Release { child } => {
                if !self.spacecraft.has_child(child) {
                    return Err(ManeuverError::NoChild {
                        name: child.clone(),
                    });
                }
                Ok(Impulse {
                    delta_v_km_s: Vector3::zeros(),
                    hold_duration: None,
                    released: Some(child.clone()),
                })
            }
        }
    }

    /// Executes this maneuver from the provided state, which must satisfy [Maneuver::can_execute].
    ///
    /// Returns the impulse, the attitude, the fuel burned and the timing windows. The spacecraft is not
    /// modified: accounting for the burned fuel is up to the caller.
    pub fn execute(&self, state: &OrbitalParameters) -> Result<ManeuverResult, ManeuverError> {
        let epoch = state.epoch();
        let impulse = self.impulse(state)?;
        let dv_km_s = impulse.delta_v_km_s.norm();

        let (fuel_burned_kg, burn_duration) = if dv_km_s > 0.0 {
            let engines = self.engines()?;
            let isp_s = combined_isp_s(&engines);
            let flow_kg_s = total_fuel_flow_kg_s(&engines);
            let m0_kg = self.spacecraft.total_mass_kg();
            let fuel_kg = delta_m(isp_s, m0_kg, dv_km_s);
            let available_kg = self.spacecraft.fuel_available_kg(&engines);
            if fuel_kg > available_kg {
                return Err(ManeuverError::FuelExhausted {
                    needed_kg: fuel_kg,
                    available_kg,
                });
            }
            (
                fuel_kg,
                delta_t(isp_s, m0_kg, flow_kg_s, dv_km_s) * Unit::Second,
            )
        } else {
            (0.0, Duration::ZERO)
        };

        let hold_duration = impulse.hold_duration.unwrap_or(self.config.hold_duration);
        let thrust_window = Window::centered(epoch, burn_duration);
        let maneuver_window = Window::starting(
            thrust_window.start,
            if hold_duration > burn_duration {
                hold_duration
            } else {
                burn_duration
            },
        );

        let result = ManeuverResult {
            epoch,
            delta_v_km_s: impulse.delta_v_km_s,
            orientation: orientation(&self.spacecraft.front_axis, &impulse.delta_v_km_s),
            fuel_burned_kg,
            thrust_window,
            maneuver_window,
            hold_duration,
            released: impulse.released,
        };
        info!("{} of {}: {result}", self.kind.name(), self.spacecraft.name);
        Ok(result)
    }
}

impl fmt::Display for Maneuver {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} of {} (not before {})",
            self.kind, self.spacecraft.name, self.config.minimum_epoch
        )
    }
}
