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

#![forbid(unsafe_code)]

//! Assigning applicants to team roles with maximum flows.
//!
//! The crate consists of a small flow network engine (a network with arc
//! capacities and flows, and a push-relabel solver that can be combined
//! with manual flow edits), a generic bipartite [`Matching`] on top of it
//! and the [`staffing`] layer that staffs team requirements and finds the
//! roles that are still in demand.

mod num {
    pub use num_traits as traits;
}

// # Data structures

pub mod error;
pub use self::error::{Error, ErrorKind, Result};

pub mod node;
pub use self::node::{node, Node};

pub mod network;
pub use self::network::FlowNetwork;

// # Algorithms

pub mod maxflow;
pub use self::maxflow::{PushRelabel, State};

pub mod matching;
pub use self::matching::{Matching, Side};

// # Staffing

pub mod staffing;
