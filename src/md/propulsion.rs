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

use crate::cosmic::{Engine, STD_GRAVITY};

/// Returns the delta-v in km/s achieved by burning from `m0_kg` down to `m1_kg` with the provided specific impulse
pub fn delta_v(isp_s: f64, m0_kg: f64, m1_kg: f64) -> f64 {
    isp_s * STD_GRAVITY * (m0_kg / m1_kg).ln() * 1e-3
}

/// Returns the mass in kg expelled to achieve `dv_km_s` from an initial mass of `m0_kg`
pub fn delta_m(isp_s: f64, m0_kg: f64, dv_km_s: f64) -> f64 {
    m0_kg * (1.0 - (-dv_km_s * 1000.0 / (isp_s * STD_GRAVITY)).exp())
}

/// Returns the burn duration in seconds to achieve `dv_km_s` from an initial mass of `m0_kg`, at a constant fuel flow
pub fn delta_t(isp_s: f64, m0_kg: f64, fuel_flow_kg_s: f64, dv_km_s: f64) -> f64 {
    delta_m(isp_s, m0_kg, dv_km_s) / fuel_flow_kg_s
}

/// Returns the specific impulse of engines firing together, i.e. weighted by their fuel flow
pub fn combined_isp_s(engines: &[&Engine]) -> f64 {
    let flow = total_fuel_flow_kg_s(engines);
    engines
        .iter()
        .map(|engine| engine.isp_s * engine.fuel_flow_kg_s)
        .sum::<f64>()
        / flow
}

/// Returns the fuel flow of engines firing together, in kg/s
pub fn total_fuel_flow_kg_s(engines: &[&Engine]) -> f64 {
    engines.iter().map(|engine| engine.fuel_flow_kg_s).sum()
}
