use std::collections::HashMap;
use std::sync::Arc;

use crate::flags::PersistedFlags;
use crate::kind::PermissionKind;
use crate::platform::KindPort;
use crate::status::{CanonicalStatus, NativeState};

/// Fixed mapping from a port's reported state to the canonical status.
const fn map_native(native: NativeState) -> CanonicalStatus {
    match native {
        NativeState::Granted | NativeState::GrantedWhileInUse => CanonicalStatus::Authorized,
        NativeState::Denied | NativeState::ServicesDisabled => CanonicalStatus::Denied,
        NativeState::Restricted | NativeState::Unavailable => CanonicalStatus::Restricted,
        NativeState::Undetermined => CanonicalStatus::NotDetermined,
    }
}

/// Per-kind resolution quirks beyond the fixed table. Selected once at
/// registration from the kind, never branched at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    Direct,
    LocationAlways,
    Notifications,
    Bluetooth,
}

impl Policy {
    const fn for_kind(kind: PermissionKind) -> Self {
        match kind {
            PermissionKind::LocationAlways => Self::LocationAlways,
            PermissionKind::Notifications => Self::Notifications,
            PermissionKind::Bluetooth => Self::Bluetooth,
            _ => Self::Direct,
        }
    }
}

pub(crate) struct Entry {
    port: Arc<dyn KindPort>,
    policy: Policy,
}

impl Entry {
    pub(crate) fn port(&self) -> &dyn KindPort {
        self.port.as_ref()
    }

    pub(crate) fn resolve(&self, flags: &PersistedFlags) -> CanonicalStatus {
        let native = self.port.current_state();
        match self.policy {
            // Bluetooth status is not decidable until a request has completed
            // once; only local history can tell.
            Policy::Bluetooth if !flags.asked_for_bluetooth() => CanonicalStatus::NotDetermined,

            // When-in-use grant while "always" is the goal: still requestable
            // unless the upgrade prompt was already spent.
            Policy::LocationAlways if native == NativeState::GrantedWhileInUse => {
                if flags.requested_always_upgrade() {
                    CanonicalStatus::Denied
                } else {
                    CanonicalStatus::NotDetermined
                }
            }

            // No notification types enabled: the platform cannot say whether
            // it ever asked, so infer from the persisted flag.
            Policy::Notifications if native == NativeState::Undetermined => {
                if flags.asked_for_notifications() {
                    CanonicalStatus::Denied
                } else {
                    CanonicalStatus::NotDetermined
                }
            }

            _ => map_native(native),
        }
    }

    /// Flag writes that must land before the native prompt is triggered,
    /// because a future resolve depends on them.
    pub(crate) fn prepare_request(&self, flags: &PersistedFlags) {
        match self.policy {
            Policy::Notifications => flags.set_asked_for_notifications(),
            Policy::LocationAlways => {
                if self.port.current_state() == NativeState::GrantedWhileInUse {
                    flags.set_requested_always_upgrade();
                }
            }
            _ => {}
        }
    }

    /// Flag writes tied to the native callback having fired.
    pub(crate) fn finish_request(&self, flags: &PersistedFlags) {
        if self.policy == Policy::Bluetooth {
            flags.set_asked_for_bluetooth();
        }
    }
}

/// The kind → {port, policy} table. Built once at startup from the ports the
/// host supplies; the coordinator dispatches through it uniformly, so adding
/// a kind is a registration, not a new branch.
pub struct Registry {
    entries: HashMap<PermissionKind, Entry>,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            entries: HashMap::new(),
        }
    }

    pub(crate) fn entry(&self, kind: PermissionKind) -> Option<&Entry> {
        self.entries.get(&kind)
    }
}

pub struct RegistryBuilder {
    entries: HashMap<PermissionKind, Entry>,
}

impl RegistryBuilder {
    /// Binds `kind` to a platform port. The resolution policy is fixed by the
    /// kind. Registering the same kind twice keeps the last port.
    #[must_use]
    pub fn register(mut self, kind: PermissionKind, port: Arc<dyn KindPort>) -> Self {
        self.entries.insert(
            kind,
            Entry {
                port,
                policy: Policy::for_kind(kind),
            },
        );
        self
    }

    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::test_utils::FakePort;
    use crate::store::MemoryStore;

    fn flags() -> PersistedFlags {
        PersistedFlags::new(Arc::new(MemoryStore::new()))
    }

    fn entry_for(kind: PermissionKind, state: NativeState) -> Entry {
        Entry {
            port: Arc::new(FakePort::new(state, true)),
            policy: Policy::for_kind(kind),
        }
    }

    #[test]
    fn test_fixed_table() {
        assert_eq!(map_native(NativeState::Granted), CanonicalStatus::Authorized);
        assert_eq!(map_native(NativeState::Denied), CanonicalStatus::Denied);
        assert_eq!(map_native(NativeState::Restricted), CanonicalStatus::Restricted);
        assert_eq!(
            map_native(NativeState::Undetermined),
            CanonicalStatus::NotDetermined
        );
        assert_eq!(map_native(NativeState::ServicesDisabled), CanonicalStatus::Denied);
        assert_eq!(map_native(NativeState::Unavailable), CanonicalStatus::Restricted);
    }

    #[test]
    fn test_direct_resolve_ignores_flags() {
        let flags = flags();
        let entry = entry_for(PermissionKind::Camera, NativeState::Granted);
        assert_eq!(entry.resolve(&flags), CanonicalStatus::Authorized);
        assert_eq!(entry.resolve(&flags), CanonicalStatus::Authorized);
    }

    #[test]
    fn test_location_always_upgrade_flag() {
        let flags = flags();
        let entry = entry_for(PermissionKind::LocationAlways, NativeState::GrantedWhileInUse);
        assert_eq!(entry.resolve(&flags), CanonicalStatus::NotDetermined);

        entry.prepare_request(&flags);
        assert!(flags.requested_always_upgrade());
        assert_eq!(entry.resolve(&flags), CanonicalStatus::Denied);
    }

    #[test]
    fn test_location_always_prepare_noop_when_undetermined() {
        let flags = flags();
        let entry = entry_for(PermissionKind::LocationAlways, NativeState::Undetermined);
        entry.prepare_request(&flags);
        assert!(!flags.requested_always_upgrade());
    }

    #[test]
    fn test_notifications_inferred_from_flag() {
        let flags = flags();
        let entry = entry_for(PermissionKind::Notifications, NativeState::Undetermined);
        assert_eq!(entry.resolve(&flags), CanonicalStatus::NotDetermined);

        entry.prepare_request(&flags);
        assert_eq!(entry.resolve(&flags), CanonicalStatus::Denied);
    }

    #[test]
    fn test_bluetooth_undecidable_until_asked() {
        let flags = flags();
        let entry = entry_for(PermissionKind::Bluetooth, NativeState::Granted);
        assert_eq!(entry.resolve(&flags), CanonicalStatus::NotDetermined);

        entry.finish_request(&flags);
        assert_eq!(entry.resolve(&flags), CanonicalStatus::Authorized);
    }
}
