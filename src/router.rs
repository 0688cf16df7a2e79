use tracing::{debug, info, warn};

use crate::error::{ProtocolError, Result, RouterError};
use crate::network::Transport;
use crate::protocol::{LsaMessage, ProtocolMessage, RouterObserver, Transition};
use crate::RouterState;

const DEFAULT_RECV_BUFFER: usize = 4096;

/// Drives a [`RouterState`] from datagrams exchanged with the fabric.
///
/// `register` performs the one-off INIT exchange; `run` then processes one
/// inbound LSA at a time until the transport fails.
pub struct Router<T, O> {
    state: RouterState,
    transport: T,
    observer: O,
    recv_buffer: usize,
}

impl<T: Transport, O: RouterObserver> Router<T, O> {
    pub fn new(state: RouterState, transport: T, observer: O) -> Self {
        Self {
            state,
            transport,
            observer,
            recv_buffer: DEFAULT_RECV_BUFFER,
        }
    }

    pub fn with_recv_buffer(mut self, recv_buffer: usize) -> Self {
        self.recv_buffer = recv_buffer;
        self
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Registers with the fabric and floods this router's own links.
    ///
    /// Anything other than a register-reply received meanwhile is dropped.
    /// A datagram that overflows the receive buffer is fatal here, since it
    /// may be the reply itself and would never decode.
    pub async fn register(&mut self) -> Result<()> {
        let router_id = self.state.id;
        self.transport
            .send(&ProtocolMessage::Register { router_id }.encode())
            .await?;
        info!(router_id, "Sent register to fabric");

        let links = loop {
            let datagram = self.receive().await?;
            match ProtocolMessage::decode(&datagram) {
                Ok(ProtocolMessage::RegisterReply { links }) => break links,
                Ok(other) => {
                    warn!(router_id, "Ignoring {} while waiting for register reply", other.kind());
                }
                Err(e) => warn!(router_id, "Dropping malformed datagram: {}", e),
            }
        };
        info!(router_id, links = links.len(), "Fabric assigned direct links");

        let transition = self.state.bootstrap(links)?;
        self.apply(transition).await
    }

    /// Registers if needed, then processes LSAs until the transport fails.
    pub async fn run(&mut self) -> Result<()> {
        if !self.state.is_bootstrapped() {
            self.register().await?;
        }
        loop {
            self.step().await?;
        }
    }

    /// Receives and fully processes one datagram.
    ///
    /// Malformed, unexpected or oversized datagrams and rejected
    /// announcements are logged and dropped; only transport failures are
    /// returned.
    pub async fn step(&mut self) -> Result<()> {
        match self.handle_datagram().await {
            Err(RouterError::Protocol(e)) => {
                warn!(router_id = self.state.id, "Dropping datagram: {}", e);
                Ok(())
            }
            Err(RouterError::Consistency(e)) => {
                debug!(router_id = self.state.id, "Flooded but not applied: {}", e);
                Ok(())
            }
            other => other,
        }
    }

    async fn handle_datagram(&mut self) -> Result<()> {
        let datagram = self.receive().await?;
        let lsa = Self::decode_lsa(&datagram)?;
        debug!(router_id = self.state.id, ?lsa, "Received LSA");

        let mut transition = self.state.process_lsa(&lsa);
        let rejected = transition.rejected.take();
        self.apply(transition).await?;
        match rejected {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn decode_lsa(datagram: &[u8]) -> std::result::Result<LsaMessage, ProtocolError> {
        match ProtocolMessage::decode(datagram)? {
            ProtocolMessage::Lsa(lsa) => Ok(lsa),
            other => Err(ProtocolError::Unexpected(other.kind())),
        }
    }

    async fn receive(&self) -> Result<Vec<u8>> {
        // One spare byte separates a datagram that exactly fills the buffer
        // from one the transport had to cut short.
        let mut buf = vec![0u8; self.recv_buffer + 1];
        let len = self.transport.recv(&mut buf).await?;
        if len > self.recv_buffer {
            return Err(ProtocolError::Oversized {
                capacity: self.recv_buffer,
            }
            .into());
        }
        buf.truncate(len);
        Ok(buf)
    }

    async fn apply(&mut self, transition: Transition) -> Result<()> {
        // State has already moved on, so the observer must hear about it
        // even if a send below fails.
        transition.dispatch(&mut self.observer);
        for lsa in &transition.outbound {
            self.transport
                .send(&ProtocolMessage::Lsa(*lsa).encode())
                .await?;
        }
        Ok(())
    }
}
