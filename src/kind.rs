use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::KeyValueStore;

/// A requestable OS capability.
///
/// Each kind carries exactly one stable on-disk key, shared by the display
/// catalog and every persistence path. The key strings are frozen: changing
/// one invalidates state persisted by earlier app versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PermissionKind {
    Camera,
    Microphone,
    Contacts,
    CalendarEvents,
    CalendarReminders,
    LocationWhenInUse,
    LocationAlways,
    Notifications,
    PhotoLibrary,
    LegacyAssetLibrary,
    Bluetooth,
}

impl PermissionKind {
    /// Every supported kind, in catalog order.
    pub const ALL: [Self; 11] = [
        Self::Camera,
        Self::Microphone,
        Self::Contacts,
        Self::CalendarEvents,
        Self::CalendarReminders,
        Self::LocationWhenInUse,
        Self::LocationAlways,
        Self::Notifications,
        Self::PhotoLibrary,
        Self::LegacyAssetLibrary,
        Self::Bluetooth,
    ];

    /// Stable persistence key for this kind.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Camera => "camera_key",
            Self::Microphone => "microphone_key",
            Self::Contacts => "contacts_key",
            Self::CalendarEvents => "calendars_key",
            Self::CalendarReminders => "reminders_key",
            Self::LocationWhenInUse => "location_inuse_key",
            Self::LocationAlways => "location_always_key",
            Self::Notifications => "notifications_key",
            Self::PhotoLibrary => "photos_key",
            Self::LegacyAssetLibrary => "asset_library_key",
            Self::Bluetooth => "bluetooth_key",
        }
    }

    /// Inverse of [`key`](Self::key). Unknown keys (from a newer or corrupted
    /// store) yield `None` and are skipped by callers.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Default human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Camera => "Camera",
            Self::Microphone => "Microphone",
            Self::Contacts => "Contacts",
            Self::CalendarEvents => "Calendars",
            Self::CalendarReminders => "Reminders",
            Self::LocationWhenInUse => "Location In Use",
            Self::LocationAlways => "Location Always",
            Self::Notifications => "Notifications",
            Self::PhotoLibrary => "Photos",
            Self::LegacyAssetLibrary => "Camera Roll",
            Self::Bluetooth => "Bluetooth",
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A kind paired with the title the presentation layer should show for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    pub kind: PermissionKind,
    pub title: String,
}

impl PermissionRecord {
    #[must_use]
    pub fn new(kind: PermissionKind) -> Self {
        Self {
            kind,
            title: kind.label().to_string(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Writes default titles for the given records unless titles were already
/// seeded. Lets a host override the display title once, keeping the override
/// across launches.
pub fn seed_titles_if_needed(store: &dyn KeyValueStore, records: &[PermissionRecord]) {
    if records
        .iter()
        .any(|r| store.get_string(r.kind.key()).is_some())
    {
        return;
    }
    for record in records {
        store.set_string(record.kind.key(), &record.title);
    }
}

/// Builds records for `kinds`, applying any persisted title overrides.
/// An empty `kinds` slice means "every kind in catalog order".
#[must_use]
pub fn records_for(store: &dyn KeyValueStore, kinds: &[PermissionKind]) -> Vec<PermissionRecord> {
    let all;
    let wanted: &[PermissionKind] = if kinds.is_empty() {
        all = PermissionKind::ALL;
        &all
    } else {
        kinds
    };

    wanted
        .iter()
        .map(|&kind| match store.get_string(kind.key()) {
            Some(title) => PermissionRecord::new(kind).with_title(title),
            None => PermissionRecord::new(kind),
        })
        .collect()
}
