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

//! Team requirements.
//!
//! A team requirement asks for a number of team members that have a
//! certain set of skills. The skills identify the role.

use super::applicant::{skills, Skills};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A team requirement: a number of team members with a certain set of
/// skills.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TeamRequirement {
    team_members_required: usize,
    required_skills: Skills,
}

impl TeamRequirement {
    /// Create a new team requirement.
    pub fn new<I>(team_members_required: usize, required_skills: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        TeamRequirement {
            team_members_required,
            required_skills: skills(required_skills),
        }
    }

    /// Return the number of team members required.
    pub fn team_members_required(&self) -> usize {
        self.team_members_required
    }

    /// Return the skills every member of this role must have.
    pub fn required_skills(&self) -> &Skills {
        &self.required_skills
    }
}
