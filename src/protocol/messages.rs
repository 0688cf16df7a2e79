//! Fabric wire format.
//!
//! Every field is a big-endian 32-bit integer:
//!
//! ```text
//! Register        [1][router_id]
//! Register-reply  [4][n][link_id, cost] x n
//! LSA             [3][sender_router][sender_link][origin_router][origin_link][cost]
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::network::DirectLink;
use crate::{Cost, LinkId, RouterId};

pub const MSG_REGISTER: u32 = 1;
pub const MSG_LSA: u32 = 3;
pub const MSG_REGISTER_REPLY: u32 = 4;

const FIELD_LEN: usize = 4;
pub const REGISTER_LEN: usize = 2 * FIELD_LEN;
pub const LSA_LEN: usize = 6 * FIELD_LEN;
const REPLY_HEADER_LEN: usize = 2 * FIELD_LEN;
const REPLY_ENTRY_LEN: usize = 2 * FIELD_LEN;

/// "Router `origin_router` reports that link `origin_link` costs `cost`."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LsaKey {
    pub origin_router: RouterId,
    pub origin_link: LinkId,
    pub cost: Cost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LsaMessage {
    /// Immediate relay hop.
    pub sender_router: RouterId,
    pub sender_link: LinkId,
    pub origin_router: RouterId,
    pub origin_link: LinkId,
    pub cost: Cost,
}

impl LsaMessage {
    pub fn new(
        sender_router: RouterId,
        sender_link: LinkId,
        origin_router: RouterId,
        origin_link: LinkId,
        cost: Cost,
    ) -> Self {
        Self {
            sender_router,
            sender_link,
            origin_router,
            origin_link,
            cost,
        }
    }

    /// An LSA originated by `router` about one of its own links.
    pub fn originate(router: RouterId, link: DirectLink) -> Self {
        Self::new(router, link.link_id, router, link.link_id, link.cost)
    }

    pub fn key(&self) -> LsaKey {
        LsaKey {
            origin_router: self.origin_router,
            origin_link: self.origin_link,
            cost: self.cost,
        }
    }

    /// The same advertisement, restamped for relay over `link_id`.
    pub fn relayed(&self, router: RouterId, link_id: LinkId) -> Self {
        Self {
            sender_router: router,
            sender_link: link_id,
            ..*self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolMessage {
    Register { router_id: RouterId },
    RegisterReply { links: Vec<DirectLink> },
    Lsa(LsaMessage),
}

impl ProtocolMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ProtocolMessage::Register { .. } => "register",
            ProtocolMessage::RegisterReply { .. } => "register-reply",
            ProtocolMessage::Lsa(_) => "lsa",
        }
    }

    pub fn encode(&self) -> Bytes {
        match self {
            ProtocolMessage::Register { router_id } => {
                let mut buf = BytesMut::with_capacity(REGISTER_LEN);
                buf.put_u32(MSG_REGISTER);
                buf.put_u32(*router_id);
                buf.freeze()
            }
            ProtocolMessage::RegisterReply { links } => {
                let mut buf =
                    BytesMut::with_capacity(REPLY_HEADER_LEN + links.len() * REPLY_ENTRY_LEN);
                buf.put_u32(MSG_REGISTER_REPLY);
                buf.put_u32(links.len() as u32);
                for link in links {
                    buf.put_u32(link.link_id);
                    buf.put_u32(link.cost);
                }
                buf.freeze()
            }
            ProtocolMessage::Lsa(lsa) => {
                let mut buf = BytesMut::with_capacity(LSA_LEN);
                buf.put_u32(MSG_LSA);
                buf.put_u32(lsa.sender_router);
                buf.put_u32(lsa.sender_link);
                buf.put_u32(lsa.origin_router);
                buf.put_u32(lsa.origin_link);
                buf.put_u32(lsa.cost);
                buf.freeze()
            }
        }
    }

    pub fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        if data.len() < FIELD_LEN {
            return Err(ProtocolError::Truncated {
                expected: FIELD_LEN,
                actual: data.len(),
            });
        }

        let mut buf = data;
        let msg_type = buf.get_u32();
        match msg_type {
            MSG_REGISTER => {
                expect_len(msg_type, REGISTER_LEN, data.len())?;
                Ok(ProtocolMessage::Register {
                    router_id: buf.get_u32(),
                })
            }
            MSG_REGISTER_REPLY => {
                if data.len() < REPLY_HEADER_LEN {
                    return Err(ProtocolError::Truncated {
                        expected: REPLY_HEADER_LEN,
                        actual: data.len(),
                    });
                }
                let count = buf.get_u32() as usize;
                let expected = count
                    .saturating_mul(REPLY_ENTRY_LEN)
                    .saturating_add(REPLY_HEADER_LEN);
                expect_len(msg_type, expected, data.len())?;

                let links = (0..count)
                    .map(|_| DirectLink::new(buf.get_u32(), buf.get_u32()))
                    .collect();
                Ok(ProtocolMessage::RegisterReply { links })
            }
            MSG_LSA => {
                expect_len(msg_type, LSA_LEN, data.len())?;
                Ok(ProtocolMessage::Lsa(LsaMessage {
                    sender_router: buf.get_u32(),
                    sender_link: buf.get_u32(),
                    origin_router: buf.get_u32(),
                    origin_link: buf.get_u32(),
                    cost: buf.get_u32(),
                }))
            }
            other => Err(ProtocolError::UnknownType(other)),
        }
    }
}

fn expect_len(msg_type: u32, expected: usize, actual: usize) -> Result<(), ProtocolError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ProtocolError::LengthMismatch {
            msg_type,
            expected,
            actual,
        })
    }
}
