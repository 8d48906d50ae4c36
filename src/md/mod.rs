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

use crate::cosmic::AstroError;
use crate::time::Epoch;
use snafu::Snafu;

/// Tsiolkovsky relations between delta-v, mass and burn duration.
pub mod propulsion;

/// The targeting algorithms of each impulsive maneuver.
pub mod impulse;

mod maneuver;
pub use maneuver::{Maneuver, ManeuverConfig, ManeuverKind, DEFAULT_ANGULAR_TOLERANCE_RAD};

mod plan;
pub use plan::{ManeuverPlan, ManeuverStatus};

mod result;
pub use result::{ManeuverResult, Window};

mod target;
pub use target::{Ephemeris, ManeuverTarget, TwoBodyEphemeris};

pub use impulse::Apsis;

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ManeuverError {
    #[snafu(display("maneuver requires at least one engine"))]
    NoEngines,
    #[snafu(display("engine `{name}` not found on the spacecraft"))]
    UnknownEngine { name: String },
    #[snafu(display("engine `{name}` cannot fire: {reason}"))]
    InvalidEngine { name: String, reason: String },
    #[snafu(display("{kind} requires a target {what}"))]
    MissingTarget {
        kind: &'static str,
        what: &'static str,
    },
    #[snafu(display("invalid target for {kind}: {reason}"))]
    InvalidTarget { kind: &'static str, reason: String },
    #[snafu(display("phasing requires at least one revolution, got {revolutions}"))]
    InvalidRevolutions { revolutions: u32 },
    #[snafu(display("no spacecraft named `{name}` is attached"))]
    NoChild { name: String },
    #[snafu(display("orbits must intersect for an apsidal alignment (cos argument = {cos_arg})"))]
    OrbitsMustIntersect { cos_arg: f64 },
    #[snafu(display("phasing orbit is degenerate (opposite apsis radius = {radius_km} km)"))]
    DegeneratePhasingOrbit { radius_km: f64 },
    #[snafu(display("spacecraft is not at a node of the current and target orbital planes"))]
    NotAtNode,
    #[snafu(display("insufficient fuel: {needed_kg} kg needed but {available_kg} kg available"))]
    FuelExhausted { needed_kg: f64, available_kg: f64 },
    #[snafu(display("all maneuvers of the plan have been processed"))]
    PlanComplete,
    #[snafu(display("previous maneuver holds until {until}"))]
    HoldNotElapsed { until: Epoch },
    #[snafu(display("maneuver encountered an astro error: {source}"), context(false))]
    ManeuverAstro { source: AstroError },
}
