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

//! This module implements a push relabel algorithm for solving max
//! flow problems.
//!
//! The solver works on the flow currently stored in the network, so it can
//! compute a maximum flow from scratch as well as extend a flow that has
//! been seeded manually by [`PushRelabel::push_flow`]. Active nodes are
//! processed in FIFO order. Excess that cannot reach the sink is sent back
//! to the source, hence the result is always a proper flow.
//!
//! This implementation uses the global relabelling heuristic.
//!
//! # Example
//!
//! ```
//! use team_flow::maxflow::pushrelabel;
//! use team_flow::network::FlowNetwork;
//! use team_flow::node::{node, Node};
//!
//! //      a---2-->b
//! //     @|\      ^\
//! //    / | \     | 4
//! //   5  |  \    |  \
//! //  /   |   |   |   @
//! // s    1   1   2    t
//! //  \   |   |   |   @
//! //   5  |    \  |  /
//! //    \ |     \ | 5
//! //     @v      @|/
//! //      c---2-->d
//! let mut g = FlowNetwork::<char, u32>::new();
//! for &(cap, u, v) in &[(2, 'a', 'b'), (1, 'a', 'c'), (1, 'a', 'd'), (2, 'c', 'd'), (2, 'd', 'b')] {
//!     g.set_arc_capacity(cap, node(u), node(v)).unwrap();
//! }
//! g.set_arc_capacity(5, Node::Source, node('a')).unwrap();
//! g.set_arc_capacity(5, Node::Source, node('c')).unwrap();
//! g.set_arc_capacity(4, node('b'), Node::Sink).unwrap();
//! g.set_arc_capacity(5, node('d'), Node::Sink).unwrap();
//!
//! let (value, flow, mut mincut) = pushrelabel(g).unwrap();
//!
//! assert_eq!(value, 5);
//! assert!(flow.iter().all(|(_, _, f)| *f <= 5));
//!
//! mincut.sort();
//! assert_eq!(mincut, vec![Node::Source, node('a'), node('c')]);
//! ```

use crate::error::{Error, Result};
use crate::network::{name, FlowNetwork, SINK, SOURCE};
use crate::node::Node;

use std::cmp::min;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use crate::num::traits::NumAssign;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A snapshot of the flow on every arc.
///
/// Heights and excesses are not part of the snapshot, they are recomputed
/// by the next call to [`PushRelabel::preflow_push`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct State<F> {
    flows: Vec<F>,
    flow_set: bool,
}

/// The push-relabel algorithm.
///
/// This struct owns the network and contains all algorithmic working data.
pub struct PushRelabel<T, F> {
    /// The network the flow problem is solved on.
    network: FlowNetwork<T, F>,
    /// Data associated with each node.
    nodes: Vec<NodeInfo<F>>,
    /// The queue of active nodes (also used for the BFS).
    queue: VecDeque<usize>,
    /// Whether a flow has been established.
    flow_set: bool,
    /// The number of push operations performed during the last run.
    pub cnt_push: usize,
    /// The number of relabel operations performed during the last run.
    pub cnt_relabel: usize,
    /// Whether to use the global relabelling heuristic.
    pub use_global_relabelling: bool,
}

/// Data associated with a node.
#[derive(Clone)]
struct NodeInfo<F> {
    /// The current height of the node.
    height: usize,
    /// The excess of flow of the node.
    excess: F,
    /// The next residual edge to be considered.
    iter: usize,
    /// Whether the node is in the queue.
    active: bool,
}

impl<T, F> PushRelabel<T, F>
where
    T: Eq + Hash + Clone + Debug,
    F: NumAssign + Ord + Copy,
{
    /// Return a new push-relabel algorithm data structure for `network`.
    ///
    /// The flow already stored in the network is kept, but it does not
    /// count as established until it is changed or [`Self::reset`] is called.
    pub fn new(network: FlowNetwork<T, F>) -> Self {
        PushRelabel {
            network,
            nodes: vec![],
            queue: VecDeque::new(),
            flow_set: false,
            cnt_push: 0,
            cnt_relabel: 0,
            use_global_relabelling: true,
        }
    }

    /// Return a reference to the underlying network.
    pub fn network(&self) -> &FlowNetwork<T, F> {
        &self.network
    }

    /// Return a mutable reference to the underlying network.
    ///
    /// Use this for changing capacities between two runs.
    pub fn network_mut(&mut self) -> &mut FlowNetwork<T, F> {
        &mut self.network
    }

    /// Return the underlying network.
    pub fn into_network(self) -> FlowNetwork<T, F> {
        self.network
    }

    /// Return `true` if a flow has been established.
    pub fn is_flow_set(&self) -> bool {
        self.flow_set
    }

    /// Set the flow on every arc to zero.
    ///
    /// The zero flow counts as established.
    pub fn reset(&mut self) {
        for a in 0..self.network.num_arcs() {
            self.network.set_flow_of(a, F::zero());
        }
        self.flow_set = true;
    }

    /// Return the flow value, i.e. the net flow leaving the source.
    pub fn flow_amount(&self) -> Result<F> {
        if !self.flow_set {
            return Err(Error::FlowNotSet);
        }
        Ok(self.network.flow_value())
    }

    /// Send `amount` units of flow from `tail` to `head`.
    ///
    /// This is a manual operation on a single pair of nodes, it does not
    /// look for a path. Flow on the reverse arc `(head, tail)` is cancelled
    /// first. The call fails without changing the flow if the residual
    /// capacity from `tail` to `head` is smaller than `amount`.
    pub fn push_flow(&mut self, amount: F, tail: &Node<T>, head: &Node<T>) -> Result<()> {
        if amount < F::zero() {
            return Err(Error::NegativeAmount);
        }
        let t = self
            .network
            .node_id(tail)
            .ok_or_else(|| Error::UnknownNode(name(tail)))?;
        let h = self
            .network
            .node_id(head)
            .ok_or_else(|| Error::UnknownNode(name(head)))?;
        if self.network.residual_between(t, h) < amount {
            return Err(Error::InsufficientCapacity {
                tail: name(tail),
                head: name(head),
            });
        }
        self.network.send_between(amount, t, h);
        self.flow_set = true;
        trace!(tail = ?tail, head = ?head, "manual push");
        Ok(())
    }

    /// Run the push-relabel algorithm.
    ///
    /// The algorithm starts from the current flow, which must be a preflow,
    /// and pushes as much flow as possible from the source to the sink. If
    /// the flow is already maximal nothing is done.
    pub fn preflow_push(&mut self) -> Result<()> {
        self.cnt_push = 0;
        self.cnt_relabel = 0;

        if !self.init_preflow()? {
            self.flow_set = true;
            debug!("flow is already maximal");
            return Ok(());
        }
        self.flow_set = true;

        let n = self.nodes.len();
        debug!(
            nodes = n,
            arcs = self.network.num_arcs(),
            global_relabelling = self.use_global_relabelling,
            "start push-relabel"
        );

        self.update_heights();

        let mut lvl_relabel = if self.use_global_relabelling {
            n
        } else {
            usize::max_value()
        };

        while let Some(u) = self.queue.pop_front() {
            self.nodes[u].active = false;
            self.discharge(u);
            if self.cnt_relabel >= lvl_relabel {
                self.update_heights();
                lvl_relabel = self.cnt_relabel + n;
            }
        }

        debug!(
            pushes = self.cnt_push,
            relabels = self.cnt_relabel,
            "push-relabel finished"
        );
        Ok(())
    }

    /// Return the source side of a minimal cut.
    ///
    /// These are the nodes reachable from the source in the residual
    /// graph. If the current flow is maximal the arcs leaving this set form
    /// a minimal cut.
    pub fn mincut(&self) -> Vec<&Node<T>> {
        self.reachable_from_source()
            .into_iter()
            .enumerate()
            .filter(|&(_, r)| r)
            .map(|(u, _)| self.network.id2node(u))
            .collect()
    }

    /// Return a snapshot of the current flow.
    pub fn get_state(&self) -> State<F> {
        State {
            flows: (0..self.network.num_arcs()).map(|a| self.network.flow_of(a)).collect(),
            flow_set: self.flow_set,
        }
    }

    /// Replace the current flow by a snapshot.
    ///
    /// Capacities are not touched. Arcs created after the snapshot was
    /// taken get zero flow. The call fails without changing anything if
    /// the snapshot does not fit the current capacities.
    pub fn restore(&mut self, state: &State<F>) -> Result<()> {
        let m = self.network.num_arcs();
        if state.flows.len() > m {
            return Err(Error::StateMismatch(format!(
                "state has {} arcs, network has {}",
                state.flows.len(),
                m
            )));
        }
        if let Some(a) = (0..state.flows.len()).find(|&a| state.flows[a] > self.network.capacity_of(a)) {
            return Err(Error::StateMismatch(format!("flow on arc {} exceeds its capacity", a)));
        }
        for a in 0..m {
            let f = state.flows.get(a).copied().unwrap_or_else(F::zero);
            self.network.set_flow_of(a, f);
        }
        self.flow_set = state.flow_set;
        Ok(())
    }

    /// Initialize the preflow.
    ///
    /// Computes the excess of every node from the current flow and saturates
    /// all residual edges leaving the source. Returns `false` if the flow is
    /// already maximal, in which case nothing has been changed.
    fn init_preflow(&mut self) -> Result<bool> {
        let n = self.network.num_nodes();
        self.nodes = vec![
            NodeInfo {
                height: 0,
                excess: F::zero(),
                iter: 0,
                active: false,
            };
            n
        ];
        self.queue.clear();

        for u in 0..n {
            if u == SOURCE || u == SINK {
                continue;
            }
            let inflow = self.network.inflow_of(u);
            let outflow = self.network.outflow_of(u);
            if inflow < outflow {
                return Err(Error::NotAPreflow(name(self.network.id2node(u))));
            }
            self.nodes[u].excess = inflow - outflow;
        }

        let has_active = self.nodes.iter().any(|node| node.excess > F::zero());
        if !has_active && !self.reachable_from_source()[SINK] {
            return Ok(false);
        }

        // send maximal flow out of source
        for i in 0..self.network.neighs(SOURCE).len() {
            let (e, v) = self.network.neighs(SOURCE)[i];
            let df = self.network.residual(e);
            if !df.is_zero() {
                self.network.augment(e, df);
                if v != SINK {
                    self.nodes[v].excess += df;
                }
            }
        }

        Ok(true)
    }

    /// Compute exact labels.
    ///
    /// Nodes that can reach the sink get their residual distance to the
    /// sink, all other nodes that can reach the source get `n` plus their
    /// distance to the source. The remaining nodes get the height `2n - 1`.
    /// Afterwards the queue contains exactly the active nodes.
    fn update_heights(&mut self) {
        let n = self.nodes.len();

        for node in &mut self.nodes {
            node.height = 2 * n - 1;
            // we need to reset the iterators for correctness
            node.iter = 0;
            node.active = false;
        }

        let mut labelled = vec![false; n];
        self.nodes[SINK].height = 0;
        labelled[SINK] = true;
        self.nodes[SOURCE].height = n;
        labelled[SOURCE] = true;

        // find correct labels by BFS from sink, then from source
        for &root in &[SINK, SOURCE] {
            self.queue.clear();
            self.queue.push_back(root);
            while let Some(v) = self.queue.pop_front() {
                let h = self.nodes[v].height + 1;
                for i in 0..self.network.neighs(v).len() {
                    let (e, u) = self.network.neighs(v)[i];
                    // the residual edge from u to v is the reverse of e
                    if !labelled[u] && !self.network.residual(e ^ 1).is_zero() {
                        labelled[u] = true;
                        self.nodes[u].height = h;
                        self.queue.push_back(u);
                    }
                }
            }
        }

        self.queue.clear();
        for u in 0..n {
            if u != SOURCE && u != SINK && self.nodes[u].excess > F::zero() {
                self.nodes[u].active = true;
                self.queue.push_back(u);
            }
        }
    }

    /// Discharges node `u`.
    ///
    /// This function does a sequence of push and relabel operations for an
    /// active node `u` until its excess reaches 0.
    fn discharge(&mut self, u: usize) {
        while self.nodes[u].excess > F::zero() {
            let cur = self.nodes[u].iter;
            if cur == self.network.neighs(u).len() {
                // we ran out of admissible edges but node still has positive excess, relabel node
                if !self.relabel(u) {
                    break;
                }
                continue;
            }

            let (e, v) = self.network.neighs(u)[cur];
            let residual = self.network.residual(e);
            if !residual.is_zero() && self.nodes[u].height == self.nodes[v].height + 1 {
                // Push along edge e
                let df = min(self.nodes[u].excess, residual);
                self.network.augment(e, df);
                self.nodes[u].excess -= df;
                self.cnt_push += 1;
                trace!(
                    tail = ?self.network.id2node(u),
                    head = ?self.network.id2node(v),
                    "push"
                );

                if v != SOURCE && v != SINK {
                    self.nodes[v].excess += df;
                    if !self.nodes[v].active {
                        self.nodes[v].active = true;
                        self.queue.push_back(v);
                    }
                }
            } else {
                // edge is not admissible, go to next
                self.nodes[u].iter += 1;
            }
        }
    }

    /// The relabel operation.
    ///
    /// Relabel `u` to one more than the smallest height of its residual
    /// neighbours. Returns `false` if `u` has no residual neighbour at all.
    fn relabel(&mut self, u: usize) -> bool {
        debug_assert!(self.nodes[u].excess > F::zero());

        let h_neighbor = self
            .network
            .neighs(u)
            .iter()
            .filter(|&&(e, _)| !self.network.residual(e).is_zero())
            .map(|&(_, v)| self.nodes[v].height)
            .min();

        match h_neighbor {
            Some(h) => {
                debug_assert!(h + 1 > self.nodes[u].height);
                debug_assert!(h + 1 < 2 * self.nodes.len());
                self.nodes[u].height = h + 1;
                self.nodes[u].iter = 0;
                self.cnt_relabel += 1;
                trace!(node = ?self.network.id2node(u), height = h + 1, "relabel");
                true
            }
            None => false,
        }
    }

    /// Return which nodes are reachable from the source in the residual
    /// graph.
    fn reachable_from_source(&self) -> Vec<bool> {
        let mut reached = vec![false; self.network.num_nodes()];
        let mut queue = VecDeque::new();
        reached[SOURCE] = true;
        queue.push_back(SOURCE);
        while let Some(u) = queue.pop_front() {
            for &(e, v) in self.network.neighs(u) {
                if !reached[v] && !self.network.residual(e).is_zero() {
                    reached[v] = true;
                    queue.push_back(v);
                }
            }
        }
        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::node::node;

    fn network() -> FlowNetwork<u32, i32> {
        let mut g = FlowNetwork::new();
        let arcs = [
            (1, 2, 6),
            (1, 3, 7),
            (2, 0, 5),
            (2, 4, 2),
            (3, 2, 11),
            (3, 4, 4),
            (4, 2, 4),
            (4, 0, 20),
        ];
        g.set_arc_capacity(15, Node::Source, node(1)).unwrap();
        g.set_arc_capacity(10, Node::Source, node(3)).unwrap();
        for &(u, v, cap) in &arcs {
            let head = if v == 0 { Node::Sink } else { node(v) };
            g.set_arc_capacity(cap, node(u), head).unwrap();
        }
        g
    }

    fn is_flow(g: &FlowNetwork<u32, i32>) -> bool {
        g.arcs().all(|a| a.flow >= 0 && a.flow <= a.capacity)
            && g
                .nodes()
                .filter(|u| !u.is_source() && !u.is_sink())
                .all(|u| g.inflow(u) == g.outflow(u))
    }

    #[test]
    fn test_pushrelabel() {
        for &use_relabelling in &[true, false] {
            let mut pr = PushRelabel::new(network());
            pr.use_global_relabelling = use_relabelling;
            pr.preflow_push().unwrap();

            assert_eq!(pr.flow_amount(), Ok(11));
            assert_eq!(pr.network().inflow(&Node::Sink), 11);
            assert!(is_flow(pr.network()));

            let cut = pr.mincut().into_iter().cloned().collect::<Vec<_>>();
            let g = pr.network();
            let cutval = g
                .arcs()
                .filter(|a| cut.contains(a.tail) && !cut.contains(a.head))
                .map(|a| a.capacity)
                .sum::<i32>();
            assert_eq!(cutval, 11);
        }
    }

    #[test]
    fn test_idempotent() {
        let mut pr = PushRelabel::new(network());
        pr.preflow_push().unwrap();
        let state = pr.get_state();

        pr.preflow_push().unwrap();
        assert_eq!(pr.cnt_push, 0);
        assert_eq!(pr.cnt_relabel, 0);
        assert_eq!(pr.get_state(), state);
    }

    #[test]
    fn test_flow_not_set() {
        let mut pr = PushRelabel::new(network());
        assert_eq!(pr.flow_amount(), Err(Error::FlowNotSet));
        pr.reset();
        assert_eq!(pr.flow_amount(), Ok(0));
    }

    #[test]
    fn test_push_flow() {
        let mut pr = PushRelabel::new(network());
        pr.push_flow(5, &Node::Source, &node(1)).unwrap();
        pr.push_flow(5, &node(1), &node(2)).unwrap();
        pr.push_flow(5, &node(2), &Node::Sink).unwrap();
        assert_eq!(pr.flow_amount(), Ok(5));

        // residual capacity of 1 -> 2 is 1 only
        let err = pr.push_flow(2, &node(1), &node(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(pr.network().arc_flow(&node(1), &node(2)), 5);

        // pushing backwards cancels flow
        pr.push_flow(3, &node(2), &node(1)).unwrap();
        assert_eq!(pr.network().arc_flow(&node(1), &node(2)), 2);

        assert_eq!(pr.push_flow(-1, &node(2), &node(1)), Err(Error::NegativeAmount));
        assert_eq!(
            pr.push_flow(1, &node(9), &node(1)),
            Err(Error::UnknownNode("9".to_string()))
        );
    }

    #[test]
    fn test_extend_partial_flow() {
        let mut pr = PushRelabel::new(network());
        // a preflow with excess at node 1
        pr.push_flow(4, &Node::Source, &node(1)).unwrap();
        pr.preflow_push().unwrap();
        assert_eq!(pr.flow_amount(), Ok(11));
        assert!(is_flow(pr.network()));
    }

    #[test]
    fn test_not_a_preflow() {
        let mut pr = PushRelabel::new(network());
        pr.push_flow(1, &node(1), &node(2)).unwrap();
        assert_eq!(pr.preflow_push(), Err(Error::NotAPreflow("1".to_string())));
    }

    #[test]
    fn test_restore() {
        let mut pr = PushRelabel::new(network());
        pr.reset();
        let empty = pr.get_state();

        pr.preflow_push().unwrap();
        let full = pr.get_state();
        let now = pr.get_state();
        pr.restore(&now).unwrap();
        assert_eq!(pr.get_state(), full);

        pr.restore(&empty).unwrap();
        assert_eq!(pr.flow_amount(), Ok(0));
        assert!(pr.network().arcs().all(|a| a.flow == 0));

        pr.restore(&full).unwrap();
        assert_eq!(pr.flow_amount(), Ok(11));

        // a snapshot that exceeds the current capacities is rejected
        pr.restore(&empty).unwrap();
        pr.network_mut().set_arc_capacity(0, node(4), Node::Sink).unwrap();
        assert_eq!(pr.restore(&full).unwrap_err().kind(), ErrorKind::InvalidState);
        assert_eq!(pr.flow_amount(), Ok(0));
    }

    #[test]
    fn test_restore_after_new_arcs() {
        let mut pr = PushRelabel::new(network());
        pr.reset();
        let empty = pr.get_state();

        pr.network_mut().set_arc_capacity(3, node(1), node(5)).unwrap();
        pr.network_mut().set_arc_capacity(3, node(5), Node::Sink).unwrap();
        pr.preflow_push().unwrap();
        assert!(pr.network().arc_flow(&node(5), &Node::Sink) > 0);

        pr.restore(&empty).unwrap();
        assert!(pr.network().arcs().all(|a| a.flow == 0));
        assert_eq!(pr.flow_amount(), Ok(0));
    }

    #[test]
    fn test_restore_from_larger_network() {
        let mut g = network();
        g.set_arc_capacity(2, node(3), Node::Sink).unwrap();
        let mut larger = PushRelabel::new(g);
        larger.preflow_push().unwrap();
        let state = larger.get_state();

        let mut pr = PushRelabel::new(network());
        pr.preflow_push().unwrap();
        let before = pr.get_state();
        assert!(matches!(pr.restore(&state), Err(Error::StateMismatch(_))));
        assert_eq!(pr.get_state(), before);
        assert_eq!(pr.flow_amount(), Ok(11));
    }

    #[test]
    fn test_excess_returns_to_source() {
        // node 1 receives more than it can pass on
        let mut g = FlowNetwork::<u32, i32>::new();
        g.set_arc_capacity(10, Node::Source, node(1)).unwrap();
        g.set_arc_capacity(3, node(1), node(2)).unwrap();
        g.set_arc_capacity(2, node(2), Node::Sink).unwrap();
        g.set_arc_capacity(4, node(1), node(3)).unwrap();

        let mut pr = PushRelabel::new(g);
        pr.preflow_push().unwrap();
        assert_eq!(pr.flow_amount(), Ok(2));
        assert!(is_flow(pr.network()));
        assert_eq!(pr.network().arc_flow(&Node::Source, &node(1)), 2);
    }

    #[test]
    fn test_grow_capacity() {
        let mut pr = PushRelabel::new(network());
        pr.preflow_push().unwrap();
        pr.network_mut().set_arc_capacity(10, node(2), Node::Sink).unwrap();
        pr.preflow_push().unwrap();
        assert!(pr.flow_amount().unwrap() > 11);
        assert!(is_flow(pr.network()));
    }
}

/// Solve the maxflow problem using the push-relabel algorithm.
///
/// The function computes a maximum flow from the source to the sink of
/// `network`, starting from the flow already stored in it.
///
/// The function returns the flow value, the flow on each arc and the
/// nodes on the source side of a minimal cut.
#[allow(clippy::type_complexity)]
pub fn pushrelabel<T, F>(network: FlowNetwork<T, F>) -> Result<(F, Vec<(Node<T>, Node<T>, F)>, Vec<Node<T>>)>
where
    T: Eq + Hash + Clone + Debug,
    F: NumAssign + Ord + Copy,
{
    let mut maxflow = PushRelabel::new(network);
    maxflow.preflow_push()?;
    let value = maxflow.flow_amount()?;
    let mincut = maxflow.mincut().into_iter().cloned().collect();
    let network = maxflow.into_network();
    let flow = network
        .arcs()
        .map(|a| (a.tail.clone(), a.head.clone(), a.flow))
        .collect();
    Ok((value, flow, mincut))
}
