//! # Gearsync
//! Delta-state synchronization and smoothing for a drivable vehicle shared
//! across a client-server simulation.
//!
//! Three concerns, kept consistent per tick:
//! - change detection over four discrete damage channels (doors, wheels,
//!   panels, lights), encoded into a compact reliable delta message;
//! - smoothing of sparse authoritative updates for continuous properties
//!   (the adjustable property and the two turret axes);
//! - a per-tick authority decision (is this process the source of truth for
//!   this vehicle, or must the view interpolate?).

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use gearsync_serde::{
    BitReader, BitWrite, BitWriter, Serde, SerdeErr, UnsignedInteger, UnsignedVariableInteger,
};

mod authority;
mod controller;
mod damage;
mod smoothing;
mod transport;
mod types;

pub use authority::ViewAuthority;
pub use controller::{
    AuthoritativeUpdate, SyncCoordinator, VehicleState, VehicleSyncController,
};
pub use damage::{
    channel::{DamageChannel, DOOR_COUNT, LIGHT_COUNT, PANEL_COUNT, WHEEL_COUNT},
    codec::{ChannelDelta, DamageDelta, DamageDeltaCodec, DamageSnapshot, DamageStateSource},
    diff::{diff_states, ChannelDiff},
};
pub use smoothing::{
    interpolator::{InterpolationError, ValueDomain, ValueInterpolator, TICK_BUDGET_MS},
    interval::IntervalTracker,
};
pub use transport::{
    OutgoingPacket, PacketKind, PacketPriority, PacketReliability, PacketSender, TransportError,
};
pub use types::EntityId;
