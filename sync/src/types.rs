/// Network-wide identifier for a synchronized vehicle, written compressed
/// on the wire.
pub type EntityId = u16;
