use log::{debug, info, warn};

use gearsync_serde::{BitWriter, Serde};

use crate::{
    authority::ViewAuthority,
    damage::codec::{DamageDeltaCodec, DamageSnapshot, DamageStateSource},
    smoothing::{
        interpolator::{ValueDomain, ValueInterpolator},
        interval::IntervalTracker,
    },
    transport::{OutgoingPacket, PacketKind, PacketPriority, PacketReliability, PacketSender},
    types::EntityId,
};

/// The renderer/physics layer that owns the vehicle's real state: a value
/// source for diffing and occupancy, and a value sink for smoothed or raw
/// property application.
pub trait VehicleState: DamageStateSource {
    fn has_driver(&self) -> bool;
    fn driver_is_local(&self) -> bool;

    fn adjustable_property(&self) -> f32;
    fn turret_rotation(&self) -> (f32, f32);

    fn apply_adjustable_property(&mut self, value: f32);
    fn apply_turret_rotation(&mut self, horizontal_deg: f32, vertical_deg: f32);
}

/// The external arbitration service that decides which process broadcasts
/// an unoccupied vehicle's state. This engine only registers, releases, and
/// obeys the resulting flag.
pub trait SyncCoordinator {
    fn register_as_owner(&mut self, entity_id: EntityId);
    fn release_ownership(&mut self, entity_id: EntityId);
}

/// Continuous values carried by one authoritative update. Absent fields
/// were not part of the update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AuthoritativeUpdate {
    pub adjustable_property: Option<f32>,
    pub turret_rotation: Option<(f32, f32)>,
}

/// Per-entity, per-tick orchestrator. Exclusively owned by its entity and
/// driven from that entity's tick callback while the vehicle is streamed
/// in; nothing here blocks or retries.
pub struct VehicleSyncController {
    entity_id: EntityId,
    is_sync_owner: bool,
    interval: IntervalTracker,
    adjustable: ValueInterpolator,
    turret_horizontal: ValueInterpolator,
    turret_vertical: ValueInterpolator,
    damage: DamageDeltaCodec,
}

impl VehicleSyncController {
    /// `adjustable_domain` is per-model configuration: bounds plus, for
    /// properties with a special wire encoding, the pre-smoothing
    /// transform.
    pub fn new(
        entity_id: EntityId,
        state: &impl VehicleState,
        adjustable_domain: ValueDomain,
    ) -> Self {
        let (horizontal, vertical) = state.turret_rotation();
        Self {
            entity_id,
            is_sync_owner: false,
            interval: IntervalTracker::new(),
            adjustable: ValueInterpolator::new(adjustable_domain, state.adjustable_property()),
            turret_horizontal: ValueInterpolator::new(ValueDomain::Angular, horizontal),
            turret_vertical: ValueInterpolator::new(ValueDomain::Angular, vertical),
            damage: DamageDeltaCodec::new(entity_id, state),
        }
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn is_sync_owner(&self) -> bool {
        self.is_sync_owner
    }

    /// Last transmitted damage baseline, exposed for inspection.
    pub fn damage_baseline(&self) -> &DamageSnapshot {
        self.damage.last_known()
    }

    /// Authority for this tick. Re-evaluated on every call: occupancy and
    /// ownership can both change between ticks.
    pub fn view_authority(&self, state: &impl VehicleState) -> ViewAuthority {
        ViewAuthority::decide(
            state.has_driver(),
            state.driver_is_local(),
            self.is_sync_owner,
        )
    }

    /// Ingest one authoritative update received at `now_ms`.
    ///
    /// Smoothed view: measure the interval and retarget the interpolators;
    /// the values reach the vehicle gradually via `tick`. Authoritative
    /// view: apply raw values directly, no smoothing and no lag, and pin
    /// the interpolators so a later authority flip starts from reality.
    /// A target outside its declared bounds is rejected and logged, value
    /// unchanged.
    pub fn receive_authoritative_update(
        &mut self,
        update: &AuthoritativeUpdate,
        now_ms: u64,
        state: &mut impl VehicleState,
    ) {
        let interval_ms = self.interval.observe(now_ms);

        if self.view_authority(state).is_smoothed() {
            if let Some(value) = update.adjustable_property {
                if let Err(err) = self.adjustable.set_target(value, interval_ms) {
                    warn!("entity {}: adjustable property update rejected: {err}", self.entity_id);
                }
            }
            if let Some((horizontal, vertical)) = update.turret_rotation {
                if let Err(err) = self.turret_horizontal.set_target(horizontal, interval_ms) {
                    warn!("entity {}: turret update rejected: {err}", self.entity_id);
                }
                if let Err(err) = self.turret_vertical.set_target(vertical, interval_ms) {
                    warn!("entity {}: turret update rejected: {err}", self.entity_id);
                }
            }
        } else {
            if let Some(value) = update.adjustable_property {
                state.apply_adjustable_property(value);
                self.adjustable.snap_to(value);
            }
            if let Some((horizontal, vertical)) = update.turret_rotation {
                state.apply_turret_rotation(horizontal, vertical);
                self.turret_horizontal.snap_to(horizontal);
                self.turret_vertical.snap_to(vertical);
            }
        }
    }

    /// Per-tick pulse, invoked once per frame while the vehicle is
    /// streamed in. Smoothed view: advance every interpolator and apply
    /// the results. Sync owner: diff the damage channels and ship the
    /// delta, if any.
    pub fn tick(&mut self, state: &mut impl VehicleState, transport: &mut impl PacketSender) {
        if self.view_authority(state).is_smoothed() {
            let adjustable = self.adjustable.advance();
            state.apply_adjustable_property(adjustable);

            let horizontal = self.turret_horizontal.advance();
            let vertical = self.turret_vertical.advance();
            state.apply_turret_rotation(horizontal, vertical);
        }

        if self.is_sync_owner {
            self.sync_damage(state, transport);
        }
    }

    /// Diff all four damage channels and send a delta if anything changed.
    /// Calling this while not the sync owner is a contract violation: the
    /// orchestration in `tick` was bypassed. Fails fast in debug builds,
    /// no-ops in release.
    pub fn sync_damage(
        &mut self,
        state: &impl DamageStateSource,
        transport: &mut impl PacketSender,
    ) {
        debug_assert!(
            self.is_sync_owner,
            "sync_damage called while not the sync owner"
        );
        if !self.is_sync_owner {
            warn!(
                "entity {}: sync_damage called while not the sync owner, skipping",
                self.entity_id
            );
            return;
        }

        let Some(delta) = self.damage.build_delta(state) else {
            return;
        };

        // The writer exists only while a message is actually going out.
        let mut writer = BitWriter::new();
        delta.ser(&mut writer);

        let packet = OutgoingPacket {
            kind: PacketKind::VehicleDamageSync,
            payload: writer.to_bytes(),
            priority: PacketPriority::Low,
            reliability: PacketReliability::ReliableOrdered,
        };

        // Fire and forget: a dropped delta is healed by the next diff
        // against the committed baseline.
        if let Err(err) = transport.send(packet) {
            debug!("entity {}: damage delta dropped: {err}", self.entity_id);
        }
    }

    /// Flip sync ownership. The baseline is resynced to live values before
    /// the flag changes, on both edges, so no diff ever runs against a
    /// stale cache from a previous ownership period. Idempotent when the
    /// flag does not change.
    pub fn set_sync_owner(
        &mut self,
        owning: bool,
        state: &impl DamageStateSource,
        coordinator: &mut impl SyncCoordinator,
    ) {
        if owning == self.is_sync_owner {
            return;
        }

        self.damage.resync_baseline(state);
        self.is_sync_owner = owning;

        if owning {
            coordinator.register_as_owner(self.entity_id);
            info!("entity {}: acquired sync ownership", self.entity_id);
        } else {
            coordinator.release_ownership(self.entity_id);
            info!("entity {}: released sync ownership", self.entity_id);
        }
    }

    /// Must run when the entity leaves the simulation. A dangling
    /// ownership claim at the coordinator is an invariant violation.
    pub fn on_destroy(
        &mut self,
        state: &impl DamageStateSource,
        coordinator: &mut impl SyncCoordinator,
    ) {
        if self.is_sync_owner {
            self.damage.resync_baseline(state);
            self.is_sync_owner = false;
            coordinator.release_ownership(self.entity_id);
            info!(
                "entity {}: released sync ownership on destruction",
                self.entity_id
            );
        }
    }
}
