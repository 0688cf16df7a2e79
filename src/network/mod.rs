pub mod interface;
pub mod topology;
pub mod transport;

pub use interface::DirectLink;
pub use topology::{Adjacency, Edge, TopologyGraph};
pub use transport::{Transport, UdpTransport};
