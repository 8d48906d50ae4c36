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
use crate::io::ConfigError;
use crate::md::ManeuverError;
use snafu::Snafu;

/// Aggregates the errors of every module, for callers which want a single error type.
#[derive(Debug, PartialEq, Snafu)]
pub enum NyxError {
    #[snafu(display("astro error: {source}"), context(false))]
    Astro { source: AstroError },
    #[snafu(display("maneuver error: {source}"), context(false))]
    Maneuver { source: ManeuverError },
    #[snafu(display("configuration error: {source}"), context(false))]
    Config { source: ConfigError },
}
