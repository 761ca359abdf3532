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

//! Applicants and their skills.

use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A set of skills.
///
/// The skills required by a team requirement also identify the role.
pub type Skills = BTreeSet<String>;

/// Build a set of skills.
pub fn skills<I>(items: I) -> Skills
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

/// An applicant with a name and a set of skills.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Applicant {
    name: String,
    skills: Skills,
}

impl Applicant {
    /// Create a new applicant.
    pub fn new<S, I>(name: S, skills: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Applicant {
            name: name.into(),
            skills: self::skills(skills),
        }
    }

    /// Return the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the skills.
    pub fn skills(&self) -> &Skills {
        &self.skills
    }

    /// Replace the skills.
    pub fn set_skills(&mut self, skills: Skills) {
        self.skills = skills;
    }

    /// Return `true` if the applicant has all of the given skills.
    ///
    /// This is the default qualification predicate.
    pub fn has_skills(&self, skills: &Skills) -> bool {
        skills.is_subset(&self.skills)
    }
}

impl fmt::Display for Applicant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
