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

use super::{Maneuver, ManeuverError, ManeuverResult};
use crate::cosmic::{OrbitalParameters, TimeTagged};
use crate::time::Epoch;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ManeuverStatus {
    Pending,
    Executed,
    /// Skipped by the caller, never executed
    Skipped,
}

/// An ordered sequence of maneuvers, executed one after the other.
///
/// The plan keeps a cursor on the next maneuver to execute: only that one may be executed, and each
/// maneuver is executed at most once. The next maneuver becomes executable once the maneuver window
/// of the previous one has elapsed.
#[derive(Clone, Debug, Default)]
pub struct ManeuverPlan {
    maneuvers: Vec<Maneuver>,
    statuses: Vec<ManeuverStatus>,
    results: Vec<ManeuverResult>,
    mnvr_no: usize,
    hold_until: Option<Epoch>,
}

impl ManeuverPlan {
    pub fn new(maneuvers: Vec<Maneuver>) -> Self {
        let statuses = vec![ManeuverStatus::Pending; maneuvers.len()];
        Self {
            maneuvers,
            statuses,
            results: Vec::new(),
            mnvr_no: 0,
            hold_until: None,
        }
    }

    /// Appends a maneuver at the end of the plan
    pub fn push(&mut self, maneuver: Maneuver) -> &mut Self {
        self.maneuvers.push(maneuver);
        self.statuses.push(ManeuverStatus::Pending);
        self
    }

    pub fn len(&self) -> usize {
        self.maneuvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maneuvers.is_empty()
    }

    /// Returns the index of the next maneuver to execute
    pub fn cursor(&self) -> usize {
        self.mnvr_no
    }

    /// Returns the next maneuver to execute, if any
    pub fn current(&self) -> Option<&Maneuver> {
        self.maneuvers.get(self.mnvr_no)
    }

    pub fn maneuvers(&self) -> &[Maneuver] {
        &self.maneuvers
    }

    pub fn status(&self, index: usize) -> Option<ManeuverStatus> {
        self.statuses.get(index).copied()
    }

    /// Results of the executed maneuvers, in execution order
    pub fn results(&self) -> &[ManeuverResult] {
        &self.results
    }

    pub fn is_complete(&self) -> bool {
        self.mnvr_no >= self.maneuvers.len()
    }

    /// Returns the epoch until which the previous maneuver holds, if any
    pub fn hold_until(&self) -> Option<Epoch> {
        self.hold_until
    }

    /// Returns whether the current maneuver can be executed from this state
    pub fn can_execute(&self, state: &OrbitalParameters) -> bool {
        if let Some(until) = self.hold_until {
            if state.epoch() < until {
                return false;
            }
        }
        match self.current() {
            Some(maneuver) => maneuver.can_execute(state),
            None => false,
        }
    }

    /// Executes the current maneuver and moves on to the next one.
    ///
    /// If the execution fails, the cursor is not moved.
    pub fn execute(&mut self, state: &OrbitalParameters) -> Result<&ManeuverResult, ManeuverError> {
        let maneuver = self.current().ok_or(ManeuverError::PlanComplete)?;
        if let Some(until) = self.hold_until {
            if state.epoch() < until {
                return Err(ManeuverError::HoldNotElapsed { until });
            }
        }
        let result = maneuver.execute(state)?;
        self.hold_until = Some(result.maneuver_window.end);
        self.statuses[self.mnvr_no] = ManeuverStatus::Executed;
        self.mnvr_no += 1;
        self.results.push(result);
        Ok(&self.results[self.results.len() - 1])
    }

    /// Skips the current maneuver, which will never be executed
    pub fn skip(&mut self) -> Result<(), ManeuverError> {
        if self.is_complete() {
            return Err(ManeuverError::PlanComplete);
        }
        info!("skipping {}", self.maneuvers[self.mnvr_no]);
        self.statuses[self.mnvr_no] = ManeuverStatus::Skipped;
        self.mnvr_no += 1;
        Ok(())
    }
}

impl fmt::Display for ManeuverPlan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Maneuver plan:")?;
        for (no, (maneuver, status)) in self.maneuvers.iter().zip(&self.statuses).enumerate() {
            let marker = if no == self.mnvr_no { ">" } else { " " };
            write!(f, "\n{marker} #{no} [{status:?}] {maneuver}")?;
        }
        Ok(())
    }
}
