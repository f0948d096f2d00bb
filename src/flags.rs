use std::sync::Arc;

use crate::store::KeyValueStore;

// Key strings are a frozen on-disk contract shared with earlier app versions.
const ASKED_FOR_NOTIFICATIONS_KEY: &str = "PermissionScopeAskedForNotificationsDefaultsKey";
const REQUESTED_ALWAYS_UPGRADE_KEY: &str = "requestedInUseToAlwaysUpgrade";
const ASKED_FOR_BLUETOOTH_KEY: &str = "asked_for_bluetooth";

/// Typed accessors over the handful of persisted booleans the resolver and
/// coordinator depend on. Passing this value explicitly keeps the state
/// machine free of hidden process-wide storage.
#[derive(Clone)]
pub struct PersistedFlags {
    store: Arc<dyn KeyValueStore>,
}

impl PersistedFlags {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Whether notification registration was ever triggered. The platform has
    /// no "not yet asked" signal for notifications, so this local history is
    /// the only way to tell `NotDetermined` from `Denied`.
    #[must_use]
    pub fn asked_for_notifications(&self) -> bool {
        self.store.get_bool(ASKED_FOR_NOTIFICATIONS_KEY)
    }

    pub fn set_asked_for_notifications(&self) {
        self.store.set_bool(ASKED_FOR_NOTIFICATIONS_KEY, true);
    }

    /// Whether the when-in-use → always upgrade prompt was already issued.
    /// Set before requesting, so a later resolve can tell "still deciding"
    /// from "declined the upgrade".
    #[must_use]
    pub fn requested_always_upgrade(&self) -> bool {
        self.store.get_bool(REQUESTED_ALWAYS_UPGRADE_KEY)
    }

    pub fn set_requested_always_upgrade(&self) {
        self.store.set_bool(REQUESTED_ALWAYS_UPGRADE_KEY, true);
    }

    /// Whether a bluetooth request has ever completed. Until it has, the
    /// bluetooth status is not considered decidable.
    #[must_use]
    pub fn asked_for_bluetooth(&self) -> bool {
        self.store.get_bool(ASKED_FOR_BLUETOOTH_KEY)
    }

    pub fn set_asked_for_bluetooth(&self) {
        self.store.set_bool(ASKED_FOR_BLUETOOTH_KEY, true);
    }
}
