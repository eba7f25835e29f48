/// Whether this process's view of a vehicle is the source of truth for a
/// given tick, or must be smoothed between sparse remote updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewAuthority {
    Authoritative,
    Smoothed,
}

impl ViewAuthority {
    pub fn is_smoothed(&self) -> bool {
        *self == ViewAuthority::Smoothed
    }

    /// Stateless per-tick decision. Smoothed exactly when this process is
    /// not responsible for the vehicle's truth: a remote driver we are not
    /// syncing for, or no driver at all and we are not the sync owner.
    pub fn decide(has_driver: bool, driver_is_local: bool, is_sync_owner: bool) -> Self {
        if (has_driver && !driver_is_local && !is_sync_owner) || (!has_driver && !is_sync_owner) {
            ViewAuthority::Smoothed
        } else {
            ViewAuthority::Authoritative
        }
    }
}
