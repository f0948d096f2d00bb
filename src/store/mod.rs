pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Durable key-value storage for the small scalar and list values the
/// permission core persists: "already asked" flags, title overrides, and the
/// suspend/restore pending set.
///
/// Every method fails open. A missing or unreadable value reads as absent, a
/// failed write is dropped. Implementations must never panic and never block
/// app startup on broken storage.
pub trait KeyValueStore: Send + Sync {
    fn get_bool(&self, key: &str) -> bool;
    fn set_bool(&self, key: &str, value: bool);

    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&self, key: &str, value: &str);

    fn get_string_list(&self, key: &str) -> Option<Vec<String>>;
    fn set_string_list(&self, key: &str, value: &[String]);

    /// Removes a key from all namespaces.
    fn remove(&self, key: &str);
}
