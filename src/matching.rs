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

//! Bipartite matchings with demands.
//!
//! A [`Matching`] is a flow network of the form
//! `source -> U -> V -> sink`. Each item `u` of the U-side is connected to
//! the source by an arc of capacity 1 and to every item `v` of the V-side
//! with `qualifies(u, v)` by an arc of capacity 1. Each item of the V-side
//! is connected to the sink by an arc whose capacity is the number of
//! U-items it requires.
//!
//! Besides computing maximal matchings the facade supports what-if
//! queries: the flow can be saved by [`Matching::get_state`], capacities of
//! source arcs can be raised, and the saved flow can be restored.
//!
//! # Example
//!
//! ```
//! use team_flow::Matching;
//!
//! let mut m = Matching::new(
//!     |u: &u32, v: &char| *v == 'x' || *u == 2,
//!     vec![1, 2],
//!     vec![('x', 1), ('y', 1)],
//! )
//! .unwrap();
//!
//! m.set_match(&2, &'x').unwrap();
//! assert_eq!(m.flow_amount(), Ok(1));
//!
//! m.find_matching().unwrap();
//! assert_eq!(m.flow_amount(), Ok(2));
//!
//! let mut matches = m.matches();
//! matches.sort();
//! assert_eq!(matches, vec![(&1, &'x'), (&2, &'y')]);
//! ```

use crate::error::{Error, Result};
use crate::maxflow::{PushRelabel, State};
use crate::network::{name, FlowNetwork};
use crate::node::{node, Node};

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Payload of a node in a bipartite network.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Side<U, V> {
    /// An item of the U-side.
    U(U),
    /// An item of the V-side.
    V(V),
}

/// A bipartite matching solved as a maximum flow problem.
pub struct Matching<U, V> {
    flow: PushRelabel<Side<U, V>, usize>,
}

impl<U, V> Matching<U, V>
where
    U: Eq + Hash + Clone + Debug,
    V: Eq + Hash + Clone + Debug,
{
    /// Create a new matching.
    ///
    /// `us` are the items of the U-side, `vs` the items of the V-side
    /// together with the number of U-items each of them requires. The
    /// matching starts with the zero flow. Each V-item may occur only once.
    pub fn new<P, IU, IV>(qualifies: P, us: IU, vs: IV) -> Result<Self>
    where
        P: Fn(&U, &V) -> bool,
        IU: IntoIterator<Item = U>,
        IV: IntoIterator<Item = (V, usize)>,
    {
        let vs = vs.into_iter().collect::<Vec<_>>();
        let mut seen = HashSet::new();
        if let Some((v, _)) = vs.iter().find(|(v, _)| !seen.insert(v)) {
            return Err(Error::DuplicateRequirement(format!("{:?}", v)));
        }

        let mut network = FlowNetwork::new();
        for (v, count) in &vs {
            network.set_arc_capacity(*count, node(Side::V(v.clone())), Node::Sink)?;
        }
        for u in us {
            network.set_arc_capacity(1, Node::Source, node(Side::U(u.clone())))?;
            for (v, _) in vs.iter().filter(|(v, _)| qualifies(&u, v)) {
                network.set_arc_capacity(1, node(Side::U(u.clone())), node(Side::V(v.clone())))?;
            }
        }

        let mut flow = PushRelabel::new(network);
        flow.reset();
        Ok(Matching { flow })
    }

    /// Return the underlying network.
    pub fn network(&self) -> &FlowNetwork<Side<U, V>, usize> {
        self.flow.network()
    }

    /// Match `u` with `v`.
    ///
    /// One unit of flow is sent along `source -> u -> v -> sink`. The call
    /// fails without changing the flow if `u` does not qualify for `v` or
    /// if one of the three arcs has no capacity left.
    pub fn set_match(&mut self, u: &U, v: &V) -> Result<()> {
        let un = node(Side::U(u.clone()));
        let vn = node(Side::V(v.clone()));
        let network = self.flow.network();
        if network.arc_capacity(&un, &vn) == 0 {
            return Err(Error::NoQualifyingArc {
                tail: format!("{:?}", u),
                head: format!("{:?}", v),
            });
        }

        push_unit_path(&mut self.flow, &[(&Node::Source, &un), (&un, &vn), (&vn, &Node::Sink)])
    }

    /// Return the capacity of the arc from the source to `u`.
    pub fn u_count(&self, u: &U) -> usize {
        self.network().arc_capacity(&Node::Source, &node(Side::U(u.clone())))
    }

    /// Raise the capacity of the arc from the source to `u` by `delta`.
    ///
    /// Afterwards `u` may be matched to `delta` further V-items without
    /// giving up its current matches. Fails if the capacity would overflow.
    pub fn increase_u_count(&mut self, u: &U, delta: usize) -> Result<()> {
        let un = self.u_node(u)?;
        let count = self.network().arc_capacity(&Node::Source, &un);
        let count = count.checked_add(delta).ok_or_else(|| Error::CapacityOverflow {
            tail: "source".to_string(),
            head: format!("{:?}", u),
        })?;
        self.flow.network_mut().set_arc_capacity(count, Node::Source, un)
    }

    /// Lower the capacity of the arc from the source to `u` by `delta`.
    ///
    /// Fails if the capacity would drop below zero or below the current
    /// flow on the arc.
    pub fn decrease_u_count(&mut self, u: &U, delta: usize) -> Result<()> {
        let un = self.u_node(u)?;
        let count = self.network().arc_capacity(&Node::Source, &un);
        if delta > count {
            return Err(Error::NegativeCapacity {
                tail: "source".to_string(),
                head: format!("{:?}", u),
            });
        }
        self.flow.network_mut().set_arc_capacity(count - delta, Node::Source, un)
    }

    fn u_node(&self, u: &U) -> Result<Node<Side<U, V>>> {
        let un = node(Side::U(u.clone()));
        if self.network().contains_node(&un) {
            Ok(un)
        } else {
            Err(Error::UnknownNode(format!("{:?}", u)))
        }
    }

    /// Extend the current matching to a maximal one.
    pub fn find_matching(&mut self) -> Result<()> {
        self.flow.preflow_push()
    }

    /// Return a snapshot of the current flow.
    pub fn get_state(&self) -> State<usize> {
        self.flow.get_state()
    }

    /// Restore a snapshot taken by [`Self::get_state`].
    ///
    /// Only the flow is restored, capacities changed in between stay as
    /// they are.
    pub fn restore(&mut self, state: &State<usize>) -> Result<()> {
        self.flow.restore(state)
    }

    /// Return the number of matched units.
    pub fn flow_amount(&self) -> Result<usize> {
        self.flow.flow_amount()
    }

    /// Return all pairs `(u, v)` that are currently matched.
    pub fn matches(&self) -> Vec<(&U, &V)> {
        self.network()
            .arcs()
            .filter(|a| a.flow > 0)
            .filter_map(|a| match (a.tail.value(), a.head.value()) {
                (Some(Side::U(u)), Some(Side::V(v))) => Some((u, v)),
                _ => None,
            })
            .collect()
    }
}

/// Send one unit of flow along each pair of `path`.
///
/// All pairs are checked before anything is pushed, so the flow is left
/// unchanged if one of them has no residual capacity.
pub(crate) fn push_unit_path<T>(flow: &mut PushRelabel<T, usize>, path: &[(&Node<T>, &Node<T>)]) -> Result<()>
where
    T: Eq + Hash + Clone + Debug,
{
    let network = flow.network();
    if let Some(&(t, h)) = path.iter().find(|&&(t, h)| network.residual_capacity(t, h) == 0) {
        return Err(Error::InsufficientCapacity {
            tail: name(t),
            head: name(h),
        });
    }
    for &(t, h) in path {
        flow.push_flow(1, t, h)?;
    }
    Ok(())
}
