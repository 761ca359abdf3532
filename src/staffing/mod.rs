// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Staffing teams.
//!
//! Applicants are assigned to team requirements by a maximum flow in a
//! [`TeamNetwork`]. Given a staffing, [`roles_in_demand`] finds the team
//! requirements for which another team member is still wanted.
//!
//! # Example
//!
//! ```
//! use team_flow::staffing::{roles_in_demand, skills, Applicant, TeamNetwork, TeamRequirement};
//!
//! let applicants = vec![
//!     Applicant::new("applicant-1", vec!["skill-1", "skill-2"]),
//!     Applicant::new("applicant-2", vec!["skill-1", "skill-2", "skill-3"]),
//!     Applicant::new("applicant-3", vec!["skill-2", "skill-3"]),
//! ];
//! let requirements = vec![
//!     TeamRequirement::new(1, vec!["skill-1"]),
//!     TeamRequirement::new(2, vec!["skill-2"]),
//!     TeamRequirement::new(2, vec!["skill-3"]),
//! ];
//!
//! let mut team = TeamNetwork::new(Applicant::has_skills, &applicants, &requirements).unwrap();
//! team.preflow_push().unwrap();
//! assert_eq!(team.flow_amount(), Ok(3));
//!
//! let assignments = team.role_assignments();
//! assert_eq!(assignments.len(), 3);
//!
//! let in_demand = roles_in_demand(&requirements, &assignments, Applicant::has_skills).unwrap();
//! assert!(in_demand.contains(&skills(vec!["skill-2"])) || in_demand.contains(&skills(vec!["skill-3"])));
//! ```

mod analyser;
mod applicant;
mod requirement;
mod team;

pub use self::analyser::roles_in_demand;
pub use self::applicant::{skills, Applicant, Skills};
pub use self::requirement::TeamRequirement;
pub use self::team::{TeamNetwork, TeamRolesAssignment};
