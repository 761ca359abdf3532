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

//! The team network.
//!
//! The team network is created from a bipartite graph `UV`. The nodes of
//! `U` are the applicants and the nodes of `V` are the team requirements.
//! An applicant is adjacent to a team requirement only if it has the
//! required skills, the capacity of this arc is 1 -- one team member can
//! only fill one place of the requirement. The source is adjacent to all
//! applicants by arcs of capacity 1 -- an applicant can only be assigned
//! one role. All team requirements are adjacent to the sink by arcs whose
//! capacity is the number of team members required.

use super::applicant::{Applicant, Skills};
use super::requirement::TeamRequirement;

use crate::error::{Error, Result};
use crate::matching::{push_unit_path, Side};
use crate::maxflow::PushRelabel;
use crate::network::FlowNetwork;
use crate::node::{node, Node};

use std::collections::HashMap;

use tracing::debug;

/// Team members currently assigned to each team requirement.
pub type TeamRolesAssignment = HashMap<TeamRequirement, Vec<Applicant>>;

type TeamNode = Node<Side<Applicant, TeamRequirement>>;

/// A flow network of applicants and team requirements.
pub struct TeamNetwork {
    flow: PushRelabel<Side<Applicant, TeamRequirement>, usize>,
}

fn applicant_node(applicant: &Applicant) -> TeamNode {
    node(Side::U(applicant.clone()))
}

fn requirement_node(tr: &TeamRequirement) -> TeamNode {
    node(Side::V(tr.clone()))
}

impl TeamNetwork {
    /// Create the team network.
    ///
    /// An applicant is connected to a team requirement iff
    /// `qualifies(applicant, required_skills)` holds. The network starts
    /// without any flow.
    pub fn new<P>(qualifies: P, applicants: &[Applicant], requirements: &[TeamRequirement]) -> Result<Self>
    where
        P: Fn(&Applicant, &Skills) -> bool,
    {
        let mut network = FlowNetwork::new();
        for tr in requirements {
            network.set_arc_capacity(tr.team_members_required(), requirement_node(tr), Node::Sink)?;
        }
        for applicant in applicants {
            network.set_arc_capacity(1, Node::Source, applicant_node(applicant))?;
            for tr in requirements {
                if qualifies(applicant, tr.required_skills()) {
                    network.set_arc_capacity(1, applicant_node(applicant), requirement_node(tr))?;
                }
            }
        }
        debug!(
            applicants = applicants.len(),
            requirements = requirements.len(),
            arcs = network.num_arcs(),
            "team network created"
        );

        Ok(TeamNetwork {
            flow: PushRelabel::new(network),
        })
    }

    /// Return the underlying flow network.
    pub fn network(&self) -> &FlowNetwork<Side<Applicant, TeamRequirement>, usize> {
        self.flow.network()
    }

    /// Set a feasible flow that reflects the current roles assignment.
    ///
    /// For every team member one unit of flow is pushed from the source to
    /// the member, from there to the assigned team requirement and on to the
    /// sink. This may only be done once, before any other flow has been set.
    /// If one of the assignments is impossible the flow is left unset.
    pub fn set_flow(&mut self, assignments: &TeamRolesAssignment) -> Result<()> {
        if self.flow.is_flow_set() {
            return Err(Error::FlowAlreadySet);
        }

        let state = self.flow.get_state();
        for (tr, members) in assignments {
            for applicant in members {
                if let Err(e) = self.assign(applicant, tr) {
                    self.flow.restore(&state)?;
                    return Err(e);
                }
            }
        }
        if !self.flow.is_flow_set() {
            // no assignments at all, the zero flow is the current staffing
            self.flow.reset();
        }
        Ok(())
    }

    /// Assign a single applicant to a team requirement.
    ///
    /// Fails if the applicant is not connected to the requirement in the
    /// residual network, e.g. because it lacks the required skills.
    pub fn assign(&mut self, applicant: &Applicant, tr: &TeamRequirement) -> Result<()> {
        let an = applicant_node(applicant);
        let tn = requirement_node(tr);
        if !self.network().successors(&an).contains(&&tn) {
            return Err(Error::NoQualifyingArc {
                tail: applicant.to_string(),
                head: format!("{:?}", tr.required_skills()),
            });
        }
        push_unit_path(&mut self.flow, &[(&Node::Source, &an), (&an, &tn), (&tn, &Node::Sink)])
    }

    /// Push as much flow as possible from the source to the sink.
    pub fn preflow_push(&mut self) -> Result<()> {
        self.flow.preflow_push()
    }

    /// Return the number of assigned team members.
    pub fn flow_amount(&self) -> Result<usize> {
        self.flow.flow_amount()
    }

    /// Return the role assigned to each applicant.
    ///
    /// Applicants without a role do not appear in the result.
    pub fn role_assignments(&self) -> HashMap<Applicant, Skills> {
        let network = self.network();
        let team_members = network.predecessors(network.source());
        let mut assignments = HashMap::new();
        for trnode in network.successors(network.sink()) {
            let tr = match trnode.value() {
                Some(Side::V(tr)) => tr,
                _ => continue,
            };
            // flow from an applicant to `tr` is a residual edge from `tr` back to it
            let members = network.successors(trnode);
            for &member in &team_members {
                if let Some(Side::U(applicant)) = member.value() {
                    if members.contains(&member) {
                        assignments.insert(applicant.clone(), tr.required_skills().clone());
                    }
                }
            }
        }
        assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::staffing::skills;

    struct Fixture {
        applicants: Vec<Applicant>,
        requirements: Vec<TeamRequirement>,
    }

    fn fixture() -> Fixture {
        Fixture {
            applicants: vec![
                Applicant::new("applicant1", vec!["skill1", "skill2"]),
                Applicant::new("applicant2", vec!["skill1", "skill2", "skill3"]),
                Applicant::new("applicant3", vec!["skill2", "skill3"]),
            ],
            requirements: vec![
                TeamRequirement::new(1, vec!["skill1"]),
                TeamRequirement::new(2, vec!["skill2"]),
                TeamRequirement::new(2, vec!["skill3"]),
            ],
        }
    }

    fn team(f: &Fixture) -> TeamNetwork {
        TeamNetwork::new(Applicant::has_skills, &f.applicants, &f.requirements).unwrap()
    }

    fn has_edge(network: &FlowNetwork<Side<Applicant, TeamRequirement>, usize>, u: &TeamNode, v: &TeamNode) -> bool {
        network.successors(u).contains(&v)
    }

    #[test]
    fn test_build_team_network() {
        let f = fixture();
        let t = team(&f);
        let n = t.network();
        let (a1, a2, a3) = (
            applicant_node(&f.applicants[0]),
            applicant_node(&f.applicants[1]),
            applicant_node(&f.applicants[2]),
        );
        let (tr1, tr2, tr3) = (
            requirement_node(&f.requirements[0]),
            requirement_node(&f.requirements[1]),
            requirement_node(&f.requirements[2]),
        );

        for a in &[&a1, &a2, &a3] {
            assert_eq!(n.arc_capacity(&Node::Source, a), 1);
        }

        assert!(has_edge(n, &a1, &tr1));
        assert!(has_edge(n, &a1, &tr2));
        assert!(!has_edge(n, &a1, &tr3));
        assert!(has_edge(n, &a2, &tr1));
        assert!(has_edge(n, &a2, &tr2));
        assert!(has_edge(n, &a2, &tr3));
        assert!(!has_edge(n, &a3, &tr1));
        assert!(has_edge(n, &a3, &tr2));
        assert!(has_edge(n, &a3, &tr3));

        assert_eq!(n.arc_capacity(&tr1, &Node::Sink), 1);
        assert_eq!(n.arc_capacity(&tr2, &Node::Sink), 2);
        assert_eq!(n.arc_capacity(&tr3, &Node::Sink), 2);

        assert_eq!(t.flow_amount(), Err(Error::FlowNotSet));
    }

    #[test]
    fn test_set_flow() {
        let f = fixture();
        let mut t = team(&f);
        let mut assignments = TeamRolesAssignment::new();
        assignments.insert(
            f.requirements[1].clone(),
            vec![f.applicants[0].clone(), f.applicants[1].clone()],
        );
        assignments.insert(f.requirements[2].clone(), vec![f.applicants[2].clone()]);

        t.set_flow(&assignments).unwrap();

        let n = t.network();
        for a in &f.applicants {
            assert_eq!(n.residual_capacity(&applicant_node(a), &Node::Source), 1);
        }
        let (tr2, tr3) = (requirement_node(&f.requirements[1]), requirement_node(&f.requirements[2]));
        assert_eq!(n.residual_capacity(&Node::Sink, &tr2), 2);
        assert_eq!(n.residual_capacity(&Node::Sink, &tr3), 1);
        assert!(has_edge(n, &tr2, &applicant_node(&f.applicants[0])));
        assert!(has_edge(n, &tr2, &applicant_node(&f.applicants[1])));
        assert!(has_edge(n, &tr3, &applicant_node(&f.applicants[2])));
        assert_eq!(t.flow_amount(), Ok(3));

        assert_eq!(t.set_flow(&assignments), Err(Error::FlowAlreadySet));
    }

    #[test]
    fn test_set_invalid_flow() {
        let f = fixture();
        let mut t = team(&f);
        let mut assignments = TeamRolesAssignment::new();
        // applicant3 does not have skill1
        assignments.insert(f.requirements[0].clone(), vec![f.applicants[2].clone()]);

        let err = t.set_flow(&assignments).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert!(t.network().arcs().all(|a| a.flow == 0));
        assert_eq!(t.flow_amount(), Err(Error::FlowNotSet));
    }

    #[test]
    fn test_set_flow_is_atomic() {
        let f = fixture();
        let mut t = team(&f);
        let mut assignments = TeamRolesAssignment::new();
        // the second team member exceeds the single place of requirement 1
        assignments.insert(
            f.requirements[0].clone(),
            vec![f.applicants[0].clone(), f.applicants[1].clone()],
        );

        assert_eq!(t.set_flow(&assignments).unwrap_err().kind(), ErrorKind::InvalidState);
        assert!(t.network().arcs().all(|a| a.flow == 0));
    }

    #[test]
    fn test_assign() {
        let f = fixture();
        let mut t = team(&f);
        t.assign(&f.applicants[1], &f.requirements[1]).unwrap();
        t.assign(&f.applicants[2], &f.requirements[2]).unwrap();

        let n = t.network();
        assert_eq!(n.residual_capacity(&applicant_node(&f.applicants[0]), &Node::Source), 0);
        assert_eq!(n.residual_capacity(&applicant_node(&f.applicants[1]), &Node::Source), 1);
        assert_eq!(n.residual_capacity(&applicant_node(&f.applicants[2]), &Node::Source), 1);
        assert_eq!(n.residual_capacity(&Node::Sink, &requirement_node(&f.requirements[1])), 1);
        assert_eq!(n.residual_capacity(&Node::Sink, &requirement_node(&f.requirements[2])), 1);

        // assigning twice fails and changes nothing
        let err = t.assign(&f.applicants[1], &f.requirements[1]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(t.flow_amount(), Ok(2));

        // bulk setting is not possible anymore
        assert_eq!(t.set_flow(&TeamRolesAssignment::new()), Err(Error::FlowAlreadySet));
    }

    #[test]
    fn test_assign_in_addition_to_existing_flow() {
        let f = fixture();
        let mut t = team(&f);
        let mut assignments = TeamRolesAssignment::new();
        assignments.insert(f.requirements[1].clone(), vec![f.applicants[1].clone()]);
        assignments.insert(f.requirements[2].clone(), vec![f.applicants[2].clone()]);
        t.set_flow(&assignments).unwrap();
        t.assign(&f.applicants[0], &f.requirements[1]).unwrap();

        let n = t.network();
        assert_eq!(n.residual_capacity(&Node::Sink, &requirement_node(&f.requirements[1])), 2);
        assert_eq!(n.residual_capacity(&Node::Sink, &requirement_node(&f.requirements[2])), 1);
        assert_eq!(t.flow_amount(), Ok(3));
    }

    #[test]
    fn test_preflow_push() {
        let f = fixture();
        let mut t = team(&f);
        t.preflow_push().unwrap();
        assert_eq!(t.flow_amount(), Ok(3));

        let mut applicants = f.applicants.clone();
        applicants[0].set_skills(skills(vec!["skill2"]));
        applicants[2].set_skills(skills(vec!["skill2"]));
        let requirements = vec![
            TeamRequirement::new(1, vec!["skill1"]),
            TeamRequirement::new(1, vec!["skill2"]),
            TeamRequirement::new(1, vec!["skill3"]),
        ];
        let mut t = TeamNetwork::new(Applicant::has_skills, &applicants, &requirements).unwrap();
        t.preflow_push().unwrap();
        assert_eq!(t.flow_amount(), Ok(2));
    }

    #[test]
    fn test_role_assignments() {
        let f = fixture();
        let mut t = team(&f);
        t.assign(&f.applicants[0], &f.requirements[1]).unwrap();
        t.assign(&f.applicants[1], &f.requirements[1]).unwrap();
        t.assign(&f.applicants[2], &f.requirements[2]).unwrap();

        let result = t.role_assignments();
        assert_eq!(result.len(), 3);
        assert_eq!(result[&f.applicants[0]], skills(vec!["skill2"]));
        assert_eq!(result[&f.applicants[1]], skills(vec!["skill2"]));
        assert_eq!(result[&f.applicants[2]], skills(vec!["skill3"]));
    }
}
