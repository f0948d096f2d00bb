use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, oneshot};

use crate::flags::PersistedFlags;
use crate::kind::{PermissionKind, PermissionRecord};
use crate::registry::Registry;
use crate::status::{CanonicalStatus, NativeState, RequestOutcome};
use crate::store::KeyValueStore;

/// Façade over the permission state machine: status queries, one-at-a-time
/// request coordination, and the aggregate check.
///
/// All failure modes are absorbed into the canonical statuses and outcomes;
/// no method errors or panics. Requests are serialized: a call issued while
/// another is in flight waits for it.
pub struct Authorizer {
    registry: Registry,
    flags: PersistedFlags,
    timeout: Option<Duration>,
    gate: Mutex<()>,
}

impl Authorizer {
    #[must_use]
    pub fn new(registry: Registry, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            registry,
            flags: PersistedFlags::new(store),
            timeout: None,
            gate: Mutex::new(()),
        }
    }

    /// Caps how long a native prompt may stay unanswered. Without a timeout a
    /// request waits for the platform callback indefinitely, matching the OS
    /// prompt itself.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Current canonical status for `kind`. Pure query, never prompts.
    /// An unregistered kind is not grantable and resolves `Denied`.
    #[must_use]
    pub fn resolve(&self, kind: PermissionKind) -> CanonicalStatus {
        self.registry.entry(kind).map_or_else(
            || {
                tracing::warn!("No port registered for {kind}, resolving as denied");
                CanonicalStatus::Denied
            },
            |entry| entry.resolve(&self.flags),
        )
    }

    /// True when every record resolves `Authorized`. Vacuously true for an
    /// empty slice; short-circuits on the first miss.
    #[must_use]
    pub fn is_fully_authorized(&self, records: &[PermissionRecord]) -> bool {
        records
            .iter()
            .all(|record| self.resolve(record.kind) == CanonicalStatus::Authorized)
    }

    /// Requests `kind`, prompting through the native port only when the
    /// status is `NotDetermined`. Resolves to exactly one outcome; the result
    /// is delivered on the calling task.
    pub async fn request(&self, kind: PermissionKind) -> RequestOutcome {
        let _in_flight = self.gate.lock().await;

        let Some(entry) = self.registry.entry(kind) else {
            tracing::warn!("No port registered for {kind}, denying request");
            return RequestOutcome::Denied;
        };

        // An absent API resolves Restricted, but a settings redirect would be
        // pointless: there is no switch to flip. Not grantable, period.
        if entry.port().current_state() == NativeState::Unavailable {
            tracing::debug!("{kind} API unavailable on this build");
            return RequestOutcome::Denied;
        }

        match entry.resolve(&self.flags) {
            CanonicalStatus::Authorized => {
                tracing::debug!("{kind} already authorized");
                return RequestOutcome::AlreadyAuthorized;
            }
            CanonicalStatus::Denied | CanonicalStatus::Restricted => {
                tracing::debug!("{kind} previously decided, settings redirect");
                return RequestOutcome::NeedsSettingsRedirect;
            }
            CanonicalStatus::NotDetermined => {}
        }

        entry.prepare_request(&self.flags);

        let (reply_tx, reply_rx) = oneshot::channel();
        tracing::debug!("Prompting for {kind}");
        entry.port().request_access(Box::new(move |granted| {
            let _ = reply_tx.send(granted);
        }));

        let granted = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, reply_rx).await {
                Ok(reply) => Self::settle(kind, reply),
                Err(_) => {
                    tracing::warn!("Prompt for {kind} unanswered after {limit:?}");
                    return RequestOutcome::TimedOut;
                }
            },
            None => Self::settle(kind, reply_rx.await),
        };

        entry.finish_request(&self.flags);

        if granted {
            RequestOutcome::JustAuthorized
        } else {
            RequestOutcome::Denied
        }
    }

    /// A port that drops its reply without answering counts as a denial.
    fn settle(kind: PermissionKind, reply: Result<bool, oneshot::error::RecvError>) -> bool {
        reply.unwrap_or_else(|_| {
            tracing::warn!("Port for {kind} dropped its reply, treating as denied");
            false
        })
    }
}
