use std::sync::Arc;

use crate::kind::PermissionKind;
use crate::store::KeyValueStore;

// Frozen on-disk contract; earlier app versions wrote these exact keys.
const PENDING_FLAG_KEY: &str = "needDrawPermissionController";
const PENDING_KINDS_KEY: &str = "RestoredKeys";

/// Remembers which permission kinds were mid-flow when the host app was
/// suspended, so the flow can be re-presented on the next foreground.
///
/// The flag and the kind list are written together and consumed together; a
/// broken store reads as "nothing pending".
pub struct RestorationStore {
    store: Arc<dyn KeyValueStore>,
}

impl RestorationStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Records `kinds` (order preserved, duplicates dropped) as pending and
    /// raises the redraw flag. An empty slice is valid and means "re-show
    /// with the default kinds".
    pub fn mark_pending(&self, kinds: &[PermissionKind]) {
        let mut keys: Vec<String> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let key = kind.key().to_string();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        // List first, flag last: the flag must never be observable without
        // the list alongside it.
        self.store.set_string_list(PENDING_KINDS_KEY, &keys);
        self.store.set_bool(PENDING_FLAG_KEY, true);
        tracing::debug!("Marked {} permission kind(s) pending", keys.len());
    }

    /// Returns the pending kinds and clears them, or `None` when nothing is
    /// pending. At most one call observes a given `mark_pending`.
    #[must_use]
    pub fn consume_pending_if_any(&self) -> Option<Vec<PermissionKind>> {
        if !self.store.get_bool(PENDING_FLAG_KEY) {
            return None;
        }

        let keys = self.store.get_string_list(PENDING_KINDS_KEY).unwrap_or_default();
        self.store.set_bool(PENDING_FLAG_KEY, false);
        self.store.remove(PENDING_KINDS_KEY);

        // Keys written by a newer version are skipped, not errors.
        let kinds = keys
            .iter()
            .filter_map(|key| PermissionKind::from_key(key))
            .collect();
        Some(kinds)
    }
}
