use log::debug;
use std::io;
use std::net::SocketAddr;
use tokio::net::UdpSocket;

/// Datagram exchange with the network fabric.
///
/// The protocol core never touches this; only [`crate::router::Router`] does.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, datagram: &[u8]) -> io::Result<()>;

    /// Receives one datagram into `buf`, returning its length.
    async fn recv(&self, buf: &mut [u8]) -> io::Result<usize>;
}

/// UDP socket talking to a single fabric endpoint.
pub struct UdpTransport {
    socket: UdpSocket,
    fabric_addr: SocketAddr,
}

impl UdpTransport {
    pub async fn bind(bind_addr: SocketAddr, fabric_addr: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind(bind_addr).await?;
        debug!("Bound {} for fabric {}", socket.local_addr()?, fabric_addr);
        Ok(Self { socket, fabric_addr })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl Transport for UdpTransport {
    async fn send(&self, datagram: &[u8]) -> io::Result<()> {
        self.socket.send_to(datagram, self.fabric_addr).await?;
        Ok(())
    }

    async fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        let (len, from) = self.socket.recv_from(buf).await?;
        if from != self.fabric_addr {
            debug!("Datagram from {} (fabric is {})", from, self.fabric_addr);
        }
        Ok(len)
    }
}
