//! Change detection and delta encoding for the four discrete damage
//! channels of a vehicle.

pub mod channel;
pub mod codec;
pub mod diff;
