use crate::status::NativeState;

/// Single-shot completion for a native prompt: call with `true` when the user
/// granted access. Dropping it without calling is allowed and is observed by
/// the coordinator as a denial.
pub type Reply = Box<dyn FnOnce(bool) + Send + 'static>;

/// Seam to one platform authorization API.
///
/// Hosts register one port per [`PermissionKind`](crate::PermissionKind),
/// wrapping whatever the OS exposes for that capability: a synchronous status
/// query plus an asynchronous request that may show the system prompt.
///
/// `request_access` must invoke `reply` at most once, from any thread; the
/// coordinator marshals the result back to the caller. Ports are never asked
/// to prompt unless the resolved status is `NotDetermined`.
pub trait KindPort: Send + Sync {
    fn current_state(&self) -> NativeState;
    fn request_access(&self, reply: Reply);
}

/// Port for a capability that is absent on the running OS build. Resolves as
/// restricted and denies any request without prompting.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailablePort;

impl KindPort for UnavailablePort {
    fn current_state(&self) -> NativeState {
        NativeState::Unavailable
    }

    fn request_access(&self, reply: Reply) {
        reply(false);
    }
}
