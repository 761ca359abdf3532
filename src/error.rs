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

//! Error type shared by the network, the solver and the staffing layer.
//!
//! Every error is raised by the call that violates a precondition and
//! leaves the network untouched. [`Error::kind`] tells whether the caller
//! passed a malformed argument or asked for something the current flow
//! does not allow.

/// The broad class of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input, e.g. a negative capacity.
    InvalidArgument,
    /// The operation is not possible in the current state of the flow.
    InvalidState,
}

/// Errors of flow network operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A capacity must be non-negative.
    #[error("capacity of arc {tail} -> {head} must not be negative")]
    NegativeCapacity { tail: String, head: String },

    /// Arcs from a node to itself are not allowed.
    #[error("arc {node} -> {node} is a loop")]
    SelfLoop { node: String },

    /// The new capacity is below the flow already on the arc.
    #[error("capacity of arc {tail} -> {head} must not drop below its flow")]
    CapacityBelowFlow { tail: String, head: String },

    /// The new capacity does not fit into the capacity type.
    #[error("capacity of arc {tail} -> {head} overflows")]
    CapacityOverflow { tail: String, head: String },

    /// A flow amount must be non-negative.
    #[error("flow amount must not be negative")]
    NegativeAmount,

    /// Not enough residual capacity for a manual push.
    #[error("residual capacity of {tail} -> {head} is too small")]
    InsufficientCapacity { tail: String, head: String },

    /// The node is not part of the network.
    #[error("unknown node {0}")]
    UnknownNode(String),

    /// Some inner node has more outflow than inflow.
    #[error("node {0} has negative excess, the flow is not a preflow")]
    NotAPreflow(String),

    /// No flow has been established on the network yet.
    #[error("flow is not set")]
    FlowNotSet,

    /// The bulk flow may only be set once.
    #[error("flow is already set")]
    FlowAlreadySet,

    /// The two items are not connected by a qualification arc.
    #[error("there is no path between {tail} and {head}")]
    NoQualifyingArc { tail: String, head: String },

    /// A saved state does not fit the current network.
    #[error("state does not fit the network: {0}")]
    StateMismatch(String),

    /// An assignment refers to a role signature that no requirement has.
    #[error("assignment of {applicant} can not be matched to any of the team requirements")]
    UnmatchedAssignment { applicant: String },

    /// Two requirements share the same signature.
    #[error("duplicate team requirement {0}")]
    DuplicateRequirement(String),
}

impl Error {
    /// Return the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NegativeCapacity { .. }
            | Error::SelfLoop { .. }
            | Error::CapacityBelowFlow { .. }
            | Error::CapacityOverflow { .. }
            | Error::NegativeAmount
            | Error::UnmatchedAssignment { .. }
            | Error::DuplicateRequirement(_) => ErrorKind::InvalidArgument,
            Error::InsufficientCapacity { .. }
            | Error::UnknownNode(_)
            | Error::NotAPreflow(_)
            | Error::FlowNotSet
            | Error::FlowAlreadySet
            | Error::NoQualifyingArc { .. }
            | Error::StateMismatch(_) => ErrorKind::InvalidState,
        }
    }
}

/// Result type of this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(Error::NegativeAmount.kind(), ErrorKind::InvalidArgument);
        assert_eq!(Error::FlowNotSet.kind(), ErrorKind::InvalidState);
        assert_eq!(
            Error::UnmatchedAssignment {
                applicant: "a".into()
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(Error::FlowAlreadySet.to_string(), "flow is already set");
    }
}
