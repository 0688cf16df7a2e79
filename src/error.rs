use thiserror::Error;

use crate::{LinkId, RouterId};

/// A datagram that does not decode into a known message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("message truncated: need at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("message length mismatch for type {msg_type}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        msg_type: u32,
        expected: usize,
        actual: usize,
    },

    #[error("unknown message type {0}")]
    UnknownType(u32),

    #[error("unexpected {0} message")]
    Unexpected(&'static str),

    #[error("datagram larger than the {capacity}-byte receive buffer")]
    Oversized { capacity: usize },
}

/// A well-formed announcement that contradicts what the registry already knows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("link {link_id} re-announced by router {router_id} after it was already matched")]
    LinkAlreadyMatched { link_id: LinkId, router_id: RouterId },

    #[error("router {router_id} announced both halves of link {link_id}")]
    SelfMatch { link_id: LinkId, router_id: RouterId },

    #[error("link {link_id} announced with cost {first} and {second}")]
    CostMismatch { link_id: LinkId, first: u32, second: u32 },
}

#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),

    #[error("router {0} is already bootstrapped")]
    AlreadyBootstrapped(RouterId),
}

pub type Result<T> = std::result::Result<T, RouterError>;
