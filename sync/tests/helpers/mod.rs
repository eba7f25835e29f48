#![allow(dead_code)]

use gearsync::{
    DamageStateSource, EntityId, OutgoingPacket, PacketSender, SyncCoordinator, TransportError,
    VehicleState, DOOR_COUNT, LIGHT_COUNT, PANEL_COUNT, WHEEL_COUNT,
};

/// In-memory stand-in for the renderer/physics layer that owns the real
/// vehicle state.
pub struct MockVehicle {
    pub doors: [u8; DOOR_COUNT],
    pub wheels: [u8; WHEEL_COUNT],
    pub panels: [u8; PANEL_COUNT],
    pub lights: [u8; LIGHT_COUNT],
    pub has_driver: bool,
    pub driver_is_local: bool,
    pub adjustable: f32,
    pub turret: (f32, f32),
}

impl MockVehicle {
    pub fn pristine() -> Self {
        Self {
            doors: [0; DOOR_COUNT],
            wheels: [0; WHEEL_COUNT],
            panels: [0; PANEL_COUNT],
            lights: [0; LIGHT_COUNT],
            has_driver: false,
            driver_is_local: false,
            adjustable: 0.0,
            turret: (0.0, 0.0),
        }
    }
}

impl DamageStateSource for MockVehicle {
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

impl VehicleState for MockVehicle {
    fn has_driver(&self) -> bool {
        self.has_driver
    }
    fn driver_is_local(&self) -> bool {
        self.driver_is_local
    }
    fn adjustable_property(&self) -> f32 {
        self.adjustable
    }
    fn turret_rotation(&self) -> (f32, f32) {
        self.turret
    }
    fn apply_adjustable_property(&mut self, value: f32) {
        self.adjustable = value;
    }
    fn apply_turret_rotation(&mut self, horizontal_deg: f32, vertical_deg: f32) {
        self.turret = (horizontal_deg, vertical_deg);
    }
}

/// Records every packet handed to it; can be told to reject sends.
pub struct MockTransport {
    pub sent: Vec<OutgoingPacket>,
    pub reject_sends: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            reject_sends: false,
        }
    }
}

impl PacketSender for MockTransport {
    fn send(&mut self, packet: OutgoingPacket) -> Result<(), TransportError> {
        if self.reject_sends {
            return Err(TransportError::SendRejected {
                reason: "mock transport told to reject".to_string(),
            });
        }
        self.sent.push(packet);
        Ok(())
    }
}

/// Records ownership registrations and releases.
pub struct MockCoordinator {
    pub registered: Vec<EntityId>,
    pub released: Vec<EntityId>,
}

impl MockCoordinator {
    pub fn new() -> Self {
        Self {
            registered: Vec::new(),
            released: Vec::new(),
        }
    }
}

impl SyncCoordinator for MockCoordinator {
    fn register_as_owner(&mut self, entity_id: EntityId) {
        self.registered.push(entity_id);
    }
    fn release_ownership(&mut self, entity_id: EntityId) {
        self.released.push(entity_id);
    }
}
