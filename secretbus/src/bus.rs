//! The seam between the object model and the message bus.
//!
//! [`SecretBus`] lists exactly the daemon calls this crate makes. The
//! production implementation is [`crate::dbus::DbusConnection`]; tests drive
//! the same object model through a scripted in-memory daemon.

use std::collections::HashMap;

use async_trait::async_trait;
use secretbus_core::Attributes;
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::error::Result;
use crate::secret::Secret;

/// Property map passed to `CreateCollection` / `CreateItem` (`a{sv}`).
pub type Properties = HashMap<String, Value<'static>>;

/// Payload of a prompt's `Completed(dismissed, result)` signal.
#[derive(Debug)]
pub struct PromptCompletion {
    pub dismissed: bool,
    pub result: OwnedValue,
}

/// Invoked at most once with the first `Completed` signal, or with the
/// transport error that ended the subscription.
pub type CompletedCallback = Box<dyn FnOnce(Result<PromptCompletion>) + Send>;

/// Keeps a signal subscription alive. Dropping it releases the match and
/// guarantees the callback will not run afterwards.
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Typed access to the `org.freedesktop.secrets` peer.
///
/// Every method is one bus round-trip. Implementations must be safe to share
/// between handles; ordering of sequential calls is preserved.
#[async_trait]
pub trait SecretBus: Send + Sync {
    // org.freedesktop.Secret.Service

    async fn open_session(
        &self,
        algorithm: &str,
        input: Value<'static>,
    ) -> Result<(OwnedValue, OwnedObjectPath)>;

    async fn create_collection(
        &self,
        properties: Properties,
        alias: &str,
    ) -> Result<(OwnedObjectPath, OwnedObjectPath)>;

    async fn search_items(
        &self,
        attributes: &Attributes,
    ) -> Result<(Vec<OwnedObjectPath>, Vec<OwnedObjectPath>)>;

    async fn lock(
        &self,
        objects: &[OwnedObjectPath],
    ) -> Result<(Vec<OwnedObjectPath>, OwnedObjectPath)>;

    async fn unlock(
        &self,
        objects: &[OwnedObjectPath],
    ) -> Result<(Vec<OwnedObjectPath>, OwnedObjectPath)>;

    async fn read_alias(&self, name: &str) -> Result<OwnedObjectPath>;

    // org.freedesktop.Secret.Collection

    async fn create_item(
        &self,
        collection: &ObjectPath<'_>,
        properties: Properties,
        secret: Secret,
        replace: bool,
    ) -> Result<(OwnedObjectPath, OwnedObjectPath)>;

    async fn search_collection(
        &self,
        collection: &ObjectPath<'_>,
        attributes: &Attributes,
    ) -> Result<Vec<OwnedObjectPath>>;

    /// `Delete()` on a collection or item; `interface` selects which.
    async fn delete(
        &self,
        object: &ObjectPath<'_>,
        interface: &'static str,
    ) -> Result<OwnedObjectPath>;

    // org.freedesktop.Secret.Item

    async fn get_secret(&self, item: &ObjectPath<'_>, session: &ObjectPath<'_>) -> Result<Secret>;

    async fn set_secret(&self, item: &ObjectPath<'_>, secret: Secret) -> Result<()>;

    // org.freedesktop.DBus.Properties

    async fn get_property(
        &self,
        object: &ObjectPath<'_>,
        interface: &'static str,
        name: &'static str,
    ) -> Result<OwnedValue>;

    async fn set_property(
        &self,
        object: &ObjectPath<'_>,
        interface: &'static str,
        name: &'static str,
        value: Value<'static>,
    ) -> Result<()>;

    // org.freedesktop.Secret.Prompt

    /// Subscribe to the prompt's `Completed` signal.
    ///
    /// Must not return before the match is installed on the bus, so that a
    /// signal emitted in response to a later `Prompt()` call cannot be missed.
    async fn subscribe_completed(
        &self,
        prompt: &ObjectPath<'_>,
        on_completed: CompletedCallback,
    ) -> Result<Subscription>;

    async fn prompt(&self, prompt: &ObjectPath<'_>, window_id: &str) -> Result<()>;
}
