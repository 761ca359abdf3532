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

//! Finding the roles that are still in demand.

use super::applicant::{Applicant, Skills};
use super::requirement::TeamRequirement;

use crate::error::{Error, Result};
use crate::matching::Matching;

use std::collections::{HashMap, HashSet};

use tracing::debug;

/// Return the roles that are in demand.
///
/// A role (the required skills of a team requirement) is in demand when an
/// applicant who has the required skills can join the team without
/// replacing anyone who is already on it.
///
/// If a team requirement has fewer team members than it requires it is
/// in demand. If it is satisfied, we check whether at least one of its
/// team members could be doing something else: the capacity of the arc
/// from the source to each of these team members is raised by 1. If that
/// increases the flow, one of them found another role without pushing
/// anybody out, so the requirement is in demand. The flow and the
/// capacities are restored before the next requirement is examined.
///
/// `role_assignments` maps each team member to the required skills of its
/// team requirement. It fails if a team member's skills do not belong to
/// any of the `requirements` or if two requirements have the same skills.
pub fn roles_in_demand<P>(
    requirements: &[TeamRequirement],
    role_assignments: &HashMap<Applicant, Skills>,
    qualifies: P,
) -> Result<HashSet<Skills>>
where
    P: Fn(&Applicant, &Skills) -> bool,
{
    let mut signatures = HashSet::new();
    if let Some(tr) = requirements.iter().find(|tr| !signatures.insert(tr.required_skills())) {
        return Err(Error::DuplicateRequirement(format!("{:?}", tr.required_skills())));
    }

    let staffing = team_roles_assignment(requirements, role_assignments)?;

    let mut team = Matching::new(
        qualifies,
        role_assignments.keys().cloned(),
        requirements
            .iter()
            .map(|tr| (tr.required_skills().clone(), tr.team_members_required())),
    )?;
    for (tr, members) in requirements.iter().zip(&staffing) {
        for &applicant in members {
            team.set_match(applicant, tr.required_skills())?;
        }
    }

    let mut in_demand = HashSet::new();
    for (tr, members) in requirements.iter().zip(&staffing) {
        if members.len() < tr.team_members_required() {
            debug!(
                role = ?tr.required_skills(),
                assigned = members.len(),
                required = tr.team_members_required(),
                "role is understaffed"
            );
            in_demand.insert(tr.required_skills().clone());
            continue;
        }

        // team requirement is satisfied
        let flow_before = team.flow_amount()?;
        let state = team.get_state();
        for &applicant in members {
            team.increase_u_count(applicant, 1)?;
        }
        team.find_matching()?;
        let flow_after = team.flow_amount()?;

        team.restore(&state)?;
        for &applicant in members {
            team.decrease_u_count(applicant, 1)?;
        }

        debug!(
            role = ?tr.required_skills(),
            flow_before,
            flow_after,
            "probed satisfied role"
        );
        if flow_after > flow_before {
            in_demand.insert(tr.required_skills().clone());
        }
    }

    Ok(in_demand)
}

/// Group the team members by their team requirement.
///
/// The i-th entry of the result holds the members of `requirements[i]`.
fn team_roles_assignment<'a>(
    requirements: &[TeamRequirement],
    role_assignments: &'a HashMap<Applicant, Skills>,
) -> Result<Vec<Vec<&'a Applicant>>> {
    let mut staffing = vec![vec![]; requirements.len()];
    for (applicant, role) in role_assignments {
        let i = requirements
            .iter()
            .position(|tr| tr.required_skills() == role)
            .ok_or_else(|| Error::UnmatchedAssignment {
                applicant: applicant.to_string(),
            })?;
        staffing[i].push(applicant);
    }
    Ok(staffing)
}
