//! Text transforms applied at the relay's edges.

pub mod inbound;
pub mod reply;
