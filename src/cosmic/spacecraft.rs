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

use super::STD_GRAVITY;
use crate::io::ConfigRepr;
use crate::linalg::Vector3;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// A fuel tank and its current quantity of propellant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelTank {
    pub name: String,
    pub quantity_kg: f64,
}

/// An engine, drawing its propellant from a single tank.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    pub name: String,
    /// Specific impulse, in seconds
    pub isp_s: f64,
    /// Mass flow rate, in kg/s
    pub fuel_flow_kg_s: f64,
    /// Name of the tank this engine draws from
    pub tank: String,
}

impl Engine {
    /// Returns the exhaust velocity in m/s
    pub fn exhaust_velocity_m_s(&self) -> f64 {
        self.isp_s * STD_GRAVITY
    }

    /// Returns the thrust in Newtons
    pub fn thrust_n(&self) -> f64 {
        self.exhaust_velocity_m_s() * self.fuel_flow_kg_s
    }
}

fn default_front_axis() -> Vector3<f64> {
    Vector3::y()
}

/// The resources of a spacecraft as seen by maneuver planning: masses, tanks, engines, the direction of
/// its front axis in the body frame, and the spacecraft attached to it.
///
/// Maneuvers only read from this structure: fuel bookkeeping after a burn is up to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spacecraft {
    pub name: String,
    pub dry_mass_kg: f64,
    #[serde(default)]
    pub tanks: Vec<FuelTank>,
    #[serde(default)]
    pub engines: Vec<Engine>,
    /// Front axis in the body frame, aligned with the delta-v of a maneuver
    #[serde(default = "default_front_axis")]
    pub front_axis: Vector3<f64>,
    #[serde(default)]
    pub children: Vec<Spacecraft>,
}

impl Spacecraft {
    pub fn new(name: &str, dry_mass_kg: f64) -> Self {
        Self {
            name: name.to_string(),
            dry_mass_kg,
            tanks: Vec::new(),
            engines: Vec::new(),
            front_axis: default_front_axis(),
            children: Vec::new(),
        }
    }

    pub fn with_tank(mut self, name: &str, quantity_kg: f64) -> Self {
        self.tanks.push(FuelTank {
            name: name.to_string(),
            quantity_kg,
        });
        self
    }

    pub fn with_engine(mut self, name: &str, isp_s: f64, fuel_flow_kg_s: f64, tank: &str) -> Self {
        self.engines.push(Engine {
            name: name.to_string(),
            isp_s,
            fuel_flow_kg_s,
            tank: tank.to_string(),
        });
        self
    }

    pub fn with_front_axis(mut self, front_axis: Vector3<f64>) -> Self {
        self.front_axis = front_axis;
        self
    }

    pub fn with_child(mut self, child: Spacecraft) -> Self {
        self.children.push(child);
        self
    }

    pub fn engine(&self, name: &str) -> Option<&Engine> {
        self.engines.iter().find(|engine| engine.name == name)
    }

    pub fn tank(&self, name: &str) -> Option<&FuelTank> {
        self.tanks.iter().find(|tank| tank.name == name)
    }

    pub fn child(&self, name: &str) -> Option<&Spacecraft> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Fuel mass onboard this spacecraft only, in kg
    pub fn fuel_mass_kg(&self) -> f64 {
        self.tanks.iter().map(|tank| tank.quantity_kg).sum()
    }

    /// Fuel available to the provided engines, each tank counted once, in kg
    pub fn fuel_available_kg(&self, engines: &[&Engine]) -> f64 {
        self.tanks
            .iter()
            .filter(|tank| engines.iter().any(|engine| engine.tank == tank.name))
            .map(|tank| tank.quantity_kg)
            .sum()
    }

    /// Total mass including the fuel and every attached spacecraft, in kg
    pub fn total_mass_kg(&self) -> f64 {
        self.dry_mass_kg
            + self.fuel_mass_kg()
            + self
                .children
                .iter()
                .map(|child| child.total_mass_kg())
                .sum::<f64>()
    }
}

impl ConfigRepr for Spacecraft {}

impl fmt::Display for Spacecraft {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: total mass = {:.3} kg (dry = {:.3} kg, fuel = {:.3} kg), {} engine(s), {} attached",
            self.name,
            self.total_mass_kg(),
            self.dry_mass_kg,
            self.fuel_mass_kg(),
            self.engines.len(),
            self.children.len()
        )
    }
}

#[test]
fn spacecraft_masses() {
    let probe = Spacecraft::new("probe", 50.0).with_tank("main", 10.0);
    let sc = Spacecraft::new("bus", 1000.0)
        .with_tank("main", 400.0)
        .with_tank("rcs", 25.0)
        .with_engine("apogee motor", 320.0, 0.15, "main")
        .with_engine("thruster", 220.0, 0.01, "rcs")
        .with_child(probe);

    assert!((sc.fuel_mass_kg() - 425.0).abs() < f64::EPSILON);
    assert!((sc.total_mass_kg() - 1485.0).abs() < f64::EPSILON);
    assert!(sc.has_child("probe"));
    assert!(!sc.has_child("lander"));
    assert_eq!(sc.front_axis, Vector3::y());

    let apogee = sc.engine("apogee motor").unwrap();
    assert!((apogee.thrust_n() - 320.0 * STD_GRAVITY * 0.15).abs() < 1e-12);
    assert!((sc.fuel_available_kg(&[apogee]) - 400.0).abs() < f64::EPSILON);
    assert!((sc.fuel_available_kg(&[apogee, apogee]) - 400.0).abs() < f64::EPSILON);
}
