use log::debug;

use gearsync_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

use crate::{
    damage::{
        channel::{DamageChannel, DOOR_COUNT, LIGHT_COUNT, PANEL_COUNT, WHEEL_COUNT},
        diff::diff_states,
    },
    types::EntityId,
};

/// Read access to the live damage state owned by the renderer/physics layer.
pub trait DamageStateSource {
    fn door_status(&self, index: usize) -> u8;
    fn wheel_status(&self, index: usize) -> u8;
    fn panel_status(&self, index: usize) -> u8;
    fn light_status(&self, index: usize) -> u8;
}

/// Per-channel snapshot of the values last encoded into an outbound
/// message. Advances only when a message is produced, or wholesale on a
/// baseline resync; it never tracks values that were merely sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageSnapshot {
    pub doors: [u8; DOOR_COUNT],
    pub wheels: [u8; WHEEL_COUNT],
    pub panels: [u8; PANEL_COUNT],
    pub lights: [u8; LIGHT_COUNT],
}

impl DamageSnapshot {
    /// Capture the live state as one snapshot generation.
    pub fn sample(state: &impl DamageStateSource) -> Self {
        let mut doors = [0u8; DOOR_COUNT];
        let mut wheels = [0u8; WHEEL_COUNT];
        let mut panels = [0u8; PANEL_COUNT];
        let mut lights = [0u8; LIGHT_COUNT];

        for (i, door) in doors.iter_mut().enumerate() {
            *door = state.door_status(i);
        }
        for (i, wheel) in wheels.iter_mut().enumerate() {
            *wheel = state.wheel_status(i);
        }
        for (i, panel) in panels.iter_mut().enumerate() {
            *panel = state.panel_status(i);
        }
        for (i, light) in lights.iter_mut().enumerate() {
            *light = state.light_status(i);
        }

        Self {
            doors,
            wheels,
            panels,
            lights,
        }
    }
}

/// One channel's slice of a delta message: a changed-mask plus the sampled
/// values. Only changed elements hit the wire; on decode, unchanged slots
/// are left at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelDelta<const N: usize> {
    pub changed: [bool; N],
    pub values: [u8; N],
}

impl<const N: usize> ChannelDelta<N> {
    fn from_diff(changed: [bool; N], values: [u8; N]) -> Self {
        Self { changed, values }
    }

    pub fn any_changed(&self) -> bool {
        self.changed.iter().any(|c| *c)
    }
}

impl<const N: usize> Serde for ChannelDelta<N> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        for changed in &self.changed {
            changed.ser(writer);
        }
        for i in 0..N {
            if self.changed[i] {
                self.values[i].ser(writer);
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut changed = [false; N];
        let mut values = [0u8; N];

        for flag in changed.iter_mut() {
            *flag = bool::de(reader)?;
        }
        for i in 0..N {
            if changed[i] {
                values[i] = u8::de(reader)?;
            }
        }

        Ok(Self { changed, values })
    }

    fn bit_length(&self) -> u32 {
        let changed_count = self.changed.iter().filter(|c| **c).count();
        let n = u32::try_from(N).unwrap_or(u32::MAX);
        let count = u32::try_from(changed_count).unwrap_or(u32::MAX);
        n + count * 8
    }
}

/// Outbound delta message: entity id plus the four channel deltas. Built at
/// most once per tick, and only when at least one channel changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamageDelta {
    pub entity_id: EntityId,
    pub doors: ChannelDelta<DOOR_COUNT>,
    pub wheels: ChannelDelta<WHEEL_COUNT>,
    pub panels: ChannelDelta<PANEL_COUNT>,
    pub lights: ChannelDelta<LIGHT_COUNT>,
}

impl DamageDelta {
    /// Channels carrying at least one changed element.
    pub fn changed_channels(&self) -> Vec<DamageChannel> {
        let mut channels = Vec::new();
        if self.doors.any_changed() {
            channels.push(DamageChannel::Doors);
        }
        if self.wheels.any_changed() {
            channels.push(DamageChannel::Wheels);
        }
        if self.panels.any_changed() {
            channels.push(DamageChannel::Panels);
        }
        if self.lights.any_changed() {
            channels.push(DamageChannel::Lights);
        }
        channels
    }
}

impl Serde for DamageDelta {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<7>::new(self.entity_id).ser(writer);
        self.doors.ser(writer);
        self.wheels.ser(writer);
        self.panels.ser(writer);
        self.lights.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let id = UnsignedVariableInteger::<7>::de(reader)?.get();
        let entity_id = EntityId::try_from(id).map_err(|_| SerdeErr::InvalidValue)?;

        Ok(Self {
            entity_id,
            doors: ChannelDelta::de(reader)?,
            wheels: ChannelDelta::de(reader)?,
            panels: ChannelDelta::de(reader)?,
            lights: ChannelDelta::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        UnsignedVariableInteger::<7>::new(self.entity_id).bit_length()
            + self.doors.bit_length()
            + self.wheels.bit_length()
            + self.panels.bit_length()
            + self.lights.bit_length()
    }
}

/// Composes the four channel differs over one entity's baseline snapshot.
pub struct DamageDeltaCodec {
    entity_id: EntityId,
    last_known: DamageSnapshot,
}

impl DamageDeltaCodec {
    /// Baselines the snapshot from the live state it is handed, so a
    /// freshly created entity does not immediately diff everything.
    pub fn new(entity_id: EntityId, state: &impl DamageStateSource) -> Self {
        Self {
            entity_id,
            last_known: DamageSnapshot::sample(state),
        }
    }

    /// Diff all four channels against the baseline. Returns `None` and
    /// mutates nothing when no element changed. Otherwise commits the full
    /// current sample as the new baseline for every channel, including ones
    /// with no individual change, so the snapshot stays one atomic
    /// generation, and returns the delta carrying only changed elements.
    pub fn build_delta(&mut self, state: &impl DamageStateSource) -> Option<DamageDelta> {
        let current = DamageSnapshot::sample(state);

        let doors = diff_states(&current.doors, &self.last_known.doors);
        let wheels = diff_states(&current.wheels, &self.last_known.wheels);
        let panels = diff_states(&current.panels, &self.last_known.panels);
        let lights = diff_states(&current.lights, &self.last_known.lights);

        let any_changed =
            doors.any_changed || wheels.any_changed || panels.any_changed || lights.any_changed;
        if !any_changed {
            return None;
        }

        self.last_known = current;

        let delta = DamageDelta {
            entity_id: self.entity_id,
            doors: ChannelDelta::from_diff(doors.changed, current.doors),
            wheels: ChannelDelta::from_diff(wheels.changed, current.wheels),
            panels: ChannelDelta::from_diff(panels.changed, current.panels),
            lights: ChannelDelta::from_diff(lights.changed, current.lights),
        };

        debug!(
            "entity {}: damage delta built for {:?}",
            self.entity_id,
            delta.changed_channels()
        );

        Some(delta)
    }

    /// Force-overwrite the baseline with live values, producing no message.
    /// Run on both edges of sync ownership so the next diff is computed
    /// against reality rather than a stale cache.
    pub fn resync_baseline(&mut self, state: &impl DamageStateSource) {
        self.last_known = DamageSnapshot::sample(state);
    }

    pub fn last_known(&self) -> &DamageSnapshot {
        &self.last_known
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearsync_serde::BitWriter;

    struct FakeDamageState {
        doors: [u8; DOOR_COUNT],
        wheels: [u8; WHEEL_COUNT],
        panels: [u8; PANEL_COUNT],
        lights: [u8; LIGHT_COUNT],
    }

    impl FakeDamageState {
        fn pristine() -> Self {
            Self {
                doors: [0; DOOR_COUNT],
                wheels: [0; WHEEL_COUNT],
                panels: [0; PANEL_COUNT],
                lights: [0; LIGHT_COUNT],
            }
        }
    }

    impl DamageStateSource for FakeDamageState {
        fn door_status(&self, index: usize) -> u8 {
            self.doors[index]
        }
        fn wheel_status(&self, index: usize) -> u8 {
            self.wheels[index]
        }
        fn panel_status(&self, index: usize) -> u8 {
            self.panels[index]
        }
        fn light_status(&self, index: usize) -> u8 {
            self.lights[index]
        }
    }

    #[test]
    fn unchanged_state_builds_nothing_and_leaves_baseline_alone() {
        let state = FakeDamageState::pristine();
        let mut codec = DamageDeltaCodec::new(7, &state);
        let baseline_before = *codec.last_known();

        assert!(codec.build_delta(&state).is_none());
        assert_eq!(*codec.last_known(), baseline_before);
    }

    #[test]
    fn single_door_change_commits_all_channels_atomically() {
        let mut state = FakeDamageState::pristine();
        let mut codec = DamageDeltaCodec::new(7, &state);

        state.doors[2] = 2;
        // A wheel also drifts; both land in the same generation.
        state.wheels[0] = 1;

        let delta = codec.build_delta(&state).expect("changes present");

        assert_eq!(delta.doors.changed, [false, false, true, false, false, false]);
        assert_eq!(delta.doors.values[2], 2);
        assert_eq!(delta.wheels.changed, [true, false, false, false]);

        // Baseline now equals the full live state, untouched channels included.
        assert_eq!(*codec.last_known(), DamageSnapshot::sample(&state));

        // And the very next build is a no-op.
        assert!(codec.build_delta(&state).is_none());
    }

    #[test]
    fn resync_baseline_swallows_pending_changes() {
        let mut state = FakeDamageState::pristine();
        let mut codec = DamageDeltaCodec::new(7, &state);

        state.panels[5] = 3;
        state.lights[1] = 1;
        codec.resync_baseline(&state);

        assert!(codec.build_delta(&state).is_none());
    }

    #[test]
    fn delta_round_trips_through_the_bit_stream() {
        let mut state = FakeDamageState::pristine();
        let mut codec = DamageDeltaCodec::new(1023, &state);

        state.doors[0] = 4;
        state.lights[3] = 2;
        let delta = codec.build_delta(&state).expect("changes present");

        let mut writer = BitWriter::new();
        delta.ser(&mut writer);
        assert_eq!(writer.bits_written(), delta.bit_length());
        let buffer = writer.to_bytes();

        let mut reader = BitReader::new(&buffer);
        let decoded = DamageDelta::de(&mut reader).expect("well-formed stream");

        assert_eq!(decoded, delta);
    }

    #[test]
    fn unchanged_elements_never_hit_the_wire() {
        let mut state = FakeDamageState::pristine();
        let mut codec = DamageDeltaCodec::new(1, &state);

        state.doors[1] = 1;
        let delta = codec.build_delta(&state).expect("changes present");

        // id (8) + masks (6+4+7+4 = 21) + one changed value (8)
        assert_eq!(delta.bit_length(), 8 + 21 + 8);
    }
}
