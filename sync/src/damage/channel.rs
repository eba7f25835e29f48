// Channel arities are fixed by the simulated vehicle model and known at
// compile time. Element values are small status codes the engine forwards
// without interpreting.

pub const DOOR_COUNT: usize = 6;
pub const WHEEL_COUNT: usize = 4;
pub const PANEL_COUNT: usize = 7;
pub const LIGHT_COUNT: usize = 4;

/// One of the four discrete damage channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageChannel {
    Doors,
    Wheels,
    Panels,
    Lights,
}

impl DamageChannel {
    pub const ALL: [DamageChannel; 4] = [
        DamageChannel::Doors,
        DamageChannel::Wheels,
        DamageChannel::Panels,
        DamageChannel::Lights,
    ];

    /// Number of sub-elements in this channel.
    pub const fn arity(&self) -> usize {
        match self {
            DamageChannel::Doors => DOOR_COUNT,
            DamageChannel::Wheels => WHEEL_COUNT,
            DamageChannel::Panels => PANEL_COUNT,
            DamageChannel::Lights => LIGHT_COUNT,
        }
    }
}
