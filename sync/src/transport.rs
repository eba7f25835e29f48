use thiserror::Error;

/// Scheduling hint for the transport's outbound queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PacketPriority {
    High,
    Medium,
    Low,
}

/// Delivery guarantees requested from the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PacketReliability {
    Unreliable,
    Reliable,
    /// Must arrive, and must not be applied out of order relative to other
    /// ordered packets for the same entity.
    ReliableOrdered,
}

/// Identifies the payload layout to the receiving side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PacketKind {
    VehicleDamageSync,
}

/// A fully encoded packet handed to the transport, delivery attributes
/// attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingPacket {
    pub kind: PacketKind,
    pub payload: Vec<u8>,
    pub priority: PacketPriority,
    pub reliability: PacketReliability,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("packet send rejected by transport: {reason}")]
    SendRejected { reason: String },
}

/// Outbound seam to the low-level network layer. Implementations own packet
/// allocation, compression and socket I/O; the engine only hands them a
/// finished payload.
pub trait PacketSender {
    fn send(&mut self, packet: OutgoingPacket) -> Result<(), TransportError>;
}
