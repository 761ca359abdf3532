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

//! Node identities of a flow network.
//!
//! A node is either the unique source, the unique sink or a node carrying
//! some payload. Two value nodes are equal iff their payloads are equal.
//!
//! ```
//! use team_flow::node::{node, Node};
//!
//! assert_eq!(node("a"), Node::Value("a"));
//! assert_ne!(node("a"), node("b"));
//! assert_ne!(Node::<&str>::Source, Node::Sink);
//! assert_eq!(node(42).value(), Some(&42));
//! ```

use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A node of a flow network.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Node<T> {
    /// The source of the network.
    Source,
    /// The sink of the network.
    Sink,
    /// A node tagged with some value.
    Value(T),
}

impl<T> Node<T> {
    /// Return `true` if this is the source.
    pub fn is_source(&self) -> bool {
        matches!(self, Node::Source)
    }

    /// Return `true` if this is the sink.
    pub fn is_sink(&self) -> bool {
        matches!(self, Node::Sink)
    }

    /// Return the payload of a value node.
    pub fn value(&self) -> Option<&T> {
        match self {
            Node::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Return the payload of a value node, consuming the node.
    pub fn into_value(self) -> Option<T> {
        match self {
            Node::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<T> for Node<T> {
    fn from(value: T) -> Self {
        Node::Value(value)
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Source => write!(f, "source"),
            Node::Sink => write!(f, "sink"),
            Node::Value(v) => write!(f, "{}", v),
        }
    }
}

/// Wrap `value` in a value node.
pub fn node<T>(value: T) -> Node<T> {
    Node::Value(value)
}
