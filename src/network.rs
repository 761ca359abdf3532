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

//! A flow network.
//!
//! The network is a digraph whose arcs are identified by their pair of end
//! nodes. Each arc carries a capacity and a flow. Every arc is represented
//! by a pair of residual edges -- the forward edge with residual capacity
//! `capacity - flow` and the backward edge with residual capacity `flow`.
//! Internally the arc with id `i` is mapped to the residual edges `2*i`
//! (forward) and `2*i+1` (backward).
//!
//! Nodes and arcs are never removed, only capacities and flows change.
//!
//! # Example
//!
//! ```
//! use team_flow::network::FlowNetwork;
//! use team_flow::node::{node, Node};
//!
//! let mut n = FlowNetwork::<char, u32>::new();
//! n.set_arc_capacity(3, Node::Source, node('a')).unwrap();
//! n.set_arc_capacity(2, node('a'), Node::Sink).unwrap();
//!
//! assert_eq!(n.num_nodes(), 3);
//! assert_eq!(n.arc_capacity(&Node::Source, &node('a')), 3);
//! assert_eq!(n.arc_capacity(&node('a'), &Node::Source), 0);
//! assert_eq!(n.successors(&node('a')), vec![&Node::Sink]);
//! assert_eq!(n.predecessors(&node('a')), vec![&Node::Source]);
//! ```

use crate::error::{Error, Result};
use crate::node::Node;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::num::traits::NumAssign;

/// Internal id of the source node.
pub(crate) const SOURCE: usize = 0;
/// Internal id of the sink node.
pub(crate) const SINK: usize = 1;

/// Data associated with an arc.
#[derive(Clone, Debug)]
struct ArcData<F> {
    tail: usize,
    head: usize,
    capacity: F,
    flow: F,
}

/// A read-only view of an arc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArcView<'a, T, F> {
    /// The tail node.
    pub tail: &'a Node<T>,
    /// The head node.
    pub head: &'a Node<T>,
    /// The capacity of the arc.
    pub capacity: F,
    /// The current flow on the arc.
    pub flow: F,
}

/// A directed network with arc capacities and flows.
///
/// The source and the sink are created together with the network and
/// never change.
#[derive(Clone, Debug)]
pub struct FlowNetwork<T, F> {
    /// All nodes, the source and the sink come first.
    nodes: Vec<Node<T>>,
    /// Map from node to its id.
    ids: HashMap<Node<T>, usize>,
    /// All arcs in order of creation.
    arcs: Vec<ArcData<F>>,
    /// Map from `(tail, head)` to the arc id.
    arc_ids: HashMap<(usize, usize), usize>,
    /// The residual edges leaving each node, pairs of edge id and the node
    /// at the other end.
    neighs: Vec<Vec<(usize, usize)>>,
}

impl<T, F> Default for FlowNetwork<T, F>
where
    T: Eq + Hash + Clone + Debug,
    F: NumAssign + Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> FlowNetwork<T, F>
where
    T: Eq + Hash + Clone + Debug,
    F: NumAssign + Ord + Copy,
{
    /// Return a new network containing only the source and the sink.
    pub fn new() -> Self {
        let mut ids = HashMap::new();
        ids.insert(Node::Source, SOURCE);
        ids.insert(Node::Sink, SINK);
        FlowNetwork {
            nodes: vec![Node::Source, Node::Sink],
            ids,
            arcs: vec![],
            arc_ids: HashMap::new(),
            neighs: vec![vec![], vec![]],
        }
    }

    /// Return the source node.
    pub fn source(&self) -> &Node<T> {
        &self.nodes[SOURCE]
    }

    /// Return the sink node.
    pub fn sink(&self) -> &Node<T> {
        &self.nodes[SINK]
    }

    /// Return the number of nodes (including source and sink).
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of arcs.
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Return `true` if `u` is a node of the network.
    pub fn contains_node(&self, u: &Node<T>) -> bool {
        self.ids.contains_key(u)
    }

    /// Return an iterator over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<T>> + '_ {
        self.nodes.iter()
    }

    /// Return an iterator over all arcs in order of creation.
    pub fn arcs(&self) -> impl Iterator<Item = ArcView<'_, T, F>> + '_ {
        self.arcs.iter().map(move |a| ArcView {
            tail: &self.nodes[a.tail],
            head: &self.nodes[a.head],
            capacity: a.capacity,
            flow: a.flow,
        })
    }

    /// Set the capacity of the arc `(tail, head)`.
    ///
    /// The arc (and its end nodes) are created if they do not exist yet.
    /// New arcs start with zero flow. The call fails without changing the
    /// network if the capacity is negative, if `tail == head` or if the
    /// capacity is smaller than the current flow on the arc.
    pub fn set_arc_capacity(&mut self, capacity: F, tail: Node<T>, head: Node<T>) -> Result<()> {
        if capacity < F::zero() {
            return Err(Error::NegativeCapacity {
                tail: name(&tail),
                head: name(&head),
            });
        }
        if tail == head {
            return Err(Error::SelfLoop { node: name(&tail) });
        }

        if let Some(a) = self.arc_id(&tail, &head) {
            if capacity < self.arcs[a].flow {
                return Err(Error::CapacityBelowFlow {
                    tail: name(&tail),
                    head: name(&head),
                });
            }
            self.arcs[a].capacity = capacity;
            return Ok(());
        }

        let t = self.add_node(tail);
        let h = self.add_node(head);
        let a = self.arcs.len();
        self.arcs.push(ArcData {
            tail: t,
            head: h,
            capacity,
            flow: F::zero(),
        });
        self.arc_ids.insert((t, h), a);
        self.neighs[t].push((a << 1, h));
        self.neighs[h].push(((a << 1) | 1, t));
        Ok(())
    }

    /// Return the capacity of the arc `(tail, head)`.
    ///
    /// Returns 0 if there is no such arc.
    pub fn arc_capacity(&self, tail: &Node<T>, head: &Node<T>) -> F {
        self.arc_id(tail, head)
            .map(|a| self.arcs[a].capacity)
            .unwrap_or_else(F::zero)
    }

    /// Return the flow on the arc `(tail, head)`.
    ///
    /// Returns 0 if there is no such arc.
    pub fn arc_flow(&self, tail: &Node<T>, head: &Node<T>) -> F {
        self.arc_id(tail, head).map(|a| self.arcs[a].flow).unwrap_or_else(F::zero)
    }

    /// Return the residual capacity from `tail` to `head`.
    ///
    /// This is the free capacity on the arc `(tail, head)` plus the flow
    /// on the reverse arc `(head, tail)`, which may be cancelled.
    pub fn residual_capacity(&self, tail: &Node<T>, head: &Node<T>) -> F {
        match (self.node_id(tail), self.node_id(head)) {
            (Some(t), Some(h)) => self.residual_between(t, h),
            _ => F::zero(),
        }
    }

    /// Return the successors of `u` in the residual graph.
    ///
    /// These are the nodes `v` such that the arc `(u, v)` has capacity
    /// left or the arc `(v, u)` carries flow. Each node is returned once.
    pub fn successors(&self, u: &Node<T>) -> Vec<&Node<T>> {
        self.residual_neighbours(u, false)
    }

    /// Return the predecessors of `u` in the residual graph.
    ///
    /// These are the nodes `v` such that the arc `(v, u)` has capacity
    /// left or the arc `(u, v)` carries flow. Each node is returned once.
    pub fn predecessors(&self, u: &Node<T>) -> Vec<&Node<T>> {
        self.residual_neighbours(u, true)
    }

    fn residual_neighbours(&self, u: &Node<T>, incoming: bool) -> Vec<&Node<T>> {
        let u = match self.node_id(u) {
            Some(u) => u,
            None => return vec![],
        };
        let mut vs = self.neighs[u]
            .iter()
            .filter(|&&(e, _)| !self.residual(if incoming { e ^ 1 } else { e }).is_zero())
            .map(|&(_, v)| v)
            .collect::<Vec<_>>();
        vs.sort_unstable();
        vs.dedup();
        vs.into_iter().map(|v| &self.nodes[v]).collect()
    }

    /// Return the total flow on arcs entering `u`.
    pub fn inflow(&self, u: &Node<T>) -> F {
        self.node_id(u).map(|u| self.inflow_of(u)).unwrap_or_else(F::zero)
    }

    /// Return the total flow on arcs leaving `u`.
    pub fn outflow(&self, u: &Node<T>) -> F {
        self.node_id(u).map(|u| self.outflow_of(u)).unwrap_or_else(F::zero)
    }

    /// Return the excess of `u`, i.e. inflow minus outflow.
    ///
    /// Nodes with more outflow than inflow, like the source, have excess 0.
    pub fn excess(&self, u: &Node<T>) -> F {
        let (inc, out) = (self.inflow(u), self.outflow(u));
        if inc >= out {
            inc - out
        } else {
            F::zero()
        }
    }

    /// Return the net amount of flow leaving the source.
    pub fn flow_value(&self) -> F {
        let out = self.outflow_of(SOURCE);
        let inc = self.inflow_of(SOURCE);
        if out >= inc {
            out - inc
        } else {
            F::zero()
        }
    }

    fn add_node(&mut self, u: Node<T>) -> usize {
        if let Some(&id) = self.ids.get(&u) {
            return id;
        }
        let id = self.nodes.len();
        self.ids.insert(u.clone(), id);
        self.nodes.push(u);
        self.neighs.push(vec![]);
        id
    }

    fn arc_id(&self, tail: &Node<T>, head: &Node<T>) -> Option<usize> {
        let t = self.node_id(tail)?;
        let h = self.node_id(head)?;
        self.arc_ids.get(&(t, h)).copied()
    }

    /// Return the id of a node.
    pub(crate) fn node_id(&self, u: &Node<T>) -> Option<usize> {
        self.ids.get(u).copied()
    }

    /// Return the node with the given id.
    pub(crate) fn id2node(&self, u: usize) -> &Node<T> {
        &self.nodes[u]
    }

    /// Return the residual edges leaving node `u`.
    pub(crate) fn neighs(&self, u: usize) -> &[(usize, usize)] {
        &self.neighs[u]
    }

    /// Return the residual capacity of the residual edge `e`.
    pub(crate) fn residual(&self, e: usize) -> F {
        let a = &self.arcs[e >> 1];
        if e & 1 == 0 {
            a.capacity - a.flow
        } else {
            a.flow
        }
    }

    /// Send `df` units along the residual edge `e`.
    pub(crate) fn augment(&mut self, e: usize, df: F) {
        debug_assert!(df <= self.residual(e));
        let a = &mut self.arcs[e >> 1];
        if e & 1 == 0 {
            a.flow += df;
        } else {
            a.flow -= df;
        }
    }

    /// Return the residual capacity between two nodes given by id.
    pub(crate) fn residual_between(&self, t: usize, h: usize) -> F {
        let fwd = self
            .arc_ids
            .get(&(t, h))
            .map(|&a| self.residual(a << 1))
            .unwrap_or_else(F::zero);
        let bwd = self
            .arc_ids
            .get(&(h, t))
            .map(|&a| self.residual((a << 1) | 1))
            .unwrap_or_else(F::zero);
        fwd + bwd
    }

    /// Send `amount` units from `t` to `h`.
    ///
    /// Flow on the reverse arc is cancelled first, the remainder is added to
    /// the forward arc. The caller must ensure the residual capacity
    /// suffices.
    pub(crate) fn send_between(&mut self, amount: F, t: usize, h: usize) {
        debug_assert!(amount <= self.residual_between(t, h));
        let mut rest = amount;
        if let Some(&a) = self.arc_ids.get(&(h, t)) {
            let df = rest.min(self.arcs[a].flow);
            self.augment((a << 1) | 1, df);
            rest -= df;
        }
        if !rest.is_zero() {
            if let Some(&a) = self.arc_ids.get(&(t, h)) {
                self.augment(a << 1, rest);
            }
        }
    }

    /// Return the flow on the arc with id `a`.
    pub(crate) fn flow_of(&self, a: usize) -> F {
        self.arcs[a].flow
    }

    /// Return the capacity of the arc with id `a`.
    pub(crate) fn capacity_of(&self, a: usize) -> F {
        self.arcs[a].capacity
    }

    /// Set the flow on the arc with id `a`.
    pub(crate) fn set_flow_of(&mut self, a: usize, flow: F) {
        debug_assert!(flow >= F::zero() && flow <= self.arcs[a].capacity);
        self.arcs[a].flow = flow;
    }

    pub(crate) fn inflow_of(&self, u: usize) -> F {
        self.neighs[u]
            .iter()
            .filter(|&&(e, _)| e & 1 == 1)
            .fold(F::zero(), |acc, &(e, _)| acc + self.arcs[e >> 1].flow)
    }

    pub(crate) fn outflow_of(&self, u: usize) -> F {
        self.neighs[u]
            .iter()
            .filter(|&&(e, _)| e & 1 == 0)
            .fold(F::zero(), |acc, &(e, _)| acc + self.arcs[e >> 1].flow)
    }
}

/// Return a printable name of a node for error messages.
pub(crate) fn name<T: Debug>(u: &Node<T>) -> String {
    match u {
        Node::Source => "source".to_string(),
        Node::Sink => "sink".to_string(),
        Node::Value(v) => format!("{:?}", v),
    }
}
