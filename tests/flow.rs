use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tempfile::TempDir;

use grantkit::platform::Reply;
use grantkit::{
    Authorizer, CanonicalStatus, JsonFileStore, KindPort, NativeState, PermissionKind,
    PermissionRecord, Registry, RequestOutcome, RestorationStore, records_for,
    seed_titles_if_needed,
};

/// Scripted stand-in for one platform authorization API.
struct ScriptedPort {
    state: Mutex<NativeState>,
    grant: bool,
    prompts: AtomicUsize,
}

impl ScriptedPort {
    fn new(state: NativeState, grant: bool) -> Self {
        Self {
            state: Mutex::new(state),
            grant,
            prompts: AtomicUsize::new(0),
        }
    }

    fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl KindPort for ScriptedPort {
    fn current_state(&self) -> NativeState {
        *self.state.lock()
    }

    fn request_access(&self, reply: Reply) {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        *self.state.lock() = if self.grant {
            NativeState::Granted
        } else {
            NativeState::Denied
        };
        reply(self.grant);
    }
}

#[tokio::test]
async fn camera_and_contacts_flow() {
    let camera = Arc::new(ScriptedPort::new(NativeState::Granted, true));
    let contacts = Arc::new(ScriptedPort::new(NativeState::Undetermined, true));

    let registry = Registry::builder()
        .register(PermissionKind::Camera, camera.clone())
        .register(PermissionKind::Contacts, contacts.clone())
        .build();
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileStore::new(temp_dir.path().join("permissions.json")));
    let authorizer = Authorizer::new(registry, store);

    let records = vec![
        PermissionRecord::new(PermissionKind::Camera),
        PermissionRecord::new(PermissionKind::Contacts),
    ];
    assert!(!authorizer.is_fully_authorized(&records));

    assert_eq!(
        authorizer.request(PermissionKind::Camera).await,
        RequestOutcome::AlreadyAuthorized
    );
    assert_eq!(camera.prompt_count(), 0);

    assert_eq!(
        authorizer.request(PermissionKind::Contacts).await,
        RequestOutcome::JustAuthorized
    );
    assert_eq!(contacts.prompt_count(), 1);

    assert!(authorizer.is_fully_authorized(&records));
}

#[tokio::test]
async fn notifications_denial_survives_relaunch() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("permissions.json");

    {
        let port = Arc::new(ScriptedPort::new(NativeState::Undetermined, false));
        let registry = Registry::builder()
            .register(PermissionKind::Notifications, port.clone())
            .build();
        let store = Arc::new(JsonFileStore::new(store_path.clone()));
        let authorizer = Authorizer::new(registry, store);

        assert_eq!(
            authorizer.request(PermissionKind::Notifications).await,
            RequestOutcome::Denied
        );
    }

    // New process, new authorizer, same store file. The platform still
    // reports no enabled notification types, but we remember having asked.
    let port = Arc::new(ScriptedPort::new(NativeState::Undetermined, false));
    let registry = Registry::builder()
        .register(PermissionKind::Notifications, port)
        .build();
    let store = Arc::new(JsonFileStore::new(store_path));
    let authorizer = Authorizer::new(registry, store);

    assert_eq!(
        authorizer.resolve(PermissionKind::Notifications),
        CanonicalStatus::Denied
    );
    assert_eq!(
        authorizer.request(PermissionKind::Notifications).await,
        RequestOutcome::NeedsSettingsRedirect
    );
}

#[tokio::test]
async fn suspended_flow_restores_once() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("permissions.json");

    {
        let store = Arc::new(JsonFileStore::new(store_path.clone()));
        let restore = RestorationStore::new(store);
        restore.mark_pending(&[PermissionKind::Microphone, PermissionKind::Notifications]);
    }

    let store = Arc::new(JsonFileStore::new(store_path));
    let restore = RestorationStore::new(store);

    assert_eq!(
        restore.consume_pending_if_any(),
        Some(vec![
            PermissionKind::Microphone,
            PermissionKind::Notifications
        ])
    );
    assert_eq!(restore.consume_pending_if_any(), None);
}

#[tokio::test]
async fn title_overrides_survive_relaunch() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("permissions.json");

    {
        let store = JsonFileStore::new(store_path.clone());
        let custom =
            vec![PermissionRecord::new(PermissionKind::Camera).with_title("Scan documents")];
        seed_titles_if_needed(&store, &custom);
    }

    let store = JsonFileStore::new(store_path);
    let records = records_for(&store, &[PermissionKind::Camera, PermissionKind::Contacts]);
    assert_eq!(records[0].title, "Scan documents");
    assert_eq!(records[1].title, "Contacts");
}

#[tokio::test]
async fn resolve_is_stable_between_state_changes() {
    let port = Arc::new(ScriptedPort::new(NativeState::Undetermined, true));
    let registry = Registry::builder()
        .register(PermissionKind::PhotoLibrary, port.clone())
        .build();
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileStore::new(temp_dir.path().join("permissions.json")));
    let authorizer = Authorizer::new(registry, store);

    let first = authorizer.resolve(PermissionKind::PhotoLibrary);
    let second = authorizer.resolve(PermissionKind::PhotoLibrary);
    assert_eq!(first, second);
    assert_eq!(first, CanonicalStatus::NotDetermined);
    assert_eq!(port.prompt_count(), 0);
}
