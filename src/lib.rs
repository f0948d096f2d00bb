//! UI-agnostic core for requesting and tracking operating-system permissions.
//!
//! The crate normalizes heterogeneous platform authorization APIs into one
//! four-state status model and a four-outcome request protocol. Hosts supply
//! one [`KindPort`] per capability they care about; the [`Authorizer`]
//! resolves statuses, coordinates one prompt at a time, and persists the
//! handful of flags some platforms need to tell "never asked" from "denied".
//! [`RestorationStore`] survives the host being suspended mid-flow.
//!
//! ```no_run
//! use std::sync::Arc;
//! use grantkit::{Authorizer, PermissionKind, Registry, store::MemoryStore};
//! # use grantkit::platform::UnavailablePort;
//!
//! # async fn demo() {
//! let registry = Registry::builder()
//!     .register(PermissionKind::Camera, Arc::new(UnavailablePort))
//!     .build();
//! let authorizer = Authorizer::new(registry, Arc::new(MemoryStore::new()));
//!
//! let status = authorizer.resolve(PermissionKind::Camera);
//! let outcome = authorizer.request(PermissionKind::Camera).await;
//! # let _ = (status, outcome);
//! # }
//! ```

pub mod authorizer;
pub mod error;
pub mod flags;
pub mod kind;
pub mod logging;
pub mod platform;
pub mod registry;
pub mod restore;
pub mod status;
pub mod store;

pub use authorizer::Authorizer;
pub use flags::PersistedFlags;
pub use kind::{PermissionKind, PermissionRecord, records_for, seed_titles_if_needed};
pub use platform::KindPort;
pub use registry::Registry;
pub use restore::RestorationStore;
pub use status::{CanonicalStatus, NativeState, RequestOutcome};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
