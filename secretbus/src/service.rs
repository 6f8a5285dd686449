//! Entry point: a connected `org.freedesktop.Secret.Service` client.

use std::sync::Arc;

use secretbus_core::config::Config;
use secretbus_core::constants::{
    DEFAULT_COLLECTION_ALIAS, SS_COLLECTION_LABEL, SS_DBUS_PATH, SS_SERVICE_INTERFACE,
};
use secretbus_core::{Attributes, EncryptionType};
use tracing::{debug, warn};
use zvariant::{ObjectPath, OwnedObjectPath, Value};

use crate::bus::{Properties, SecretBus};
use crate::collection::Collection;
use crate::convert;
use crate::dbus::DbusConnection;
use crate::error::Result;
use crate::item::Item;
use crate::lock::lock_or_unlock;
use crate::prompt::prompt;
use crate::session::Session;

/// State shared by a [`Service`] and every handle derived from it.
pub(crate) struct ServiceContext {
    pub(crate) bus: Arc<dyn SecretBus>,
    pub(crate) session: Session,
    pub(crate) window_id: String,
}

impl ServiceContext {
    /// Returns `true` if the lock state prompt was dismissed.
    pub(crate) async fn set_locked(&self, locked: bool, objects: &[OwnedObjectPath]) -> Result<bool> {
        lock_or_unlock(self.bus.as_ref(), locked, objects, &self.window_id).await
    }
}

/// Result of a service-wide search, partitioned by lock state.
#[derive(Debug)]
pub struct SearchItemsResult {
    pub unlocked: Vec<Item>,
    pub locked: Vec<Item>,
}

/// A connection to the Secret Service plus an open transfer session.
///
/// Cloning is cheap; clones share the session.
#[derive(Clone)]
pub struct Service {
    ctx: Arc<ServiceContext>,
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("session", &self.ctx.session.path().as_str())
            .field("encrypted", &self.ctx.session.is_encrypted())
            .finish()
    }
}

impl Service {
    /// Connect to the session bus and open a session of the given kind.
    pub async fn connect(encryption: EncryptionType) -> Result<Self> {
        let bus = DbusConnection::session().await?;
        Self::open(Arc::new(bus), encryption, String::new()).await
    }

    /// Connect using a loaded [`Config`]: bus address, session algorithm and
    /// prompt window id all come from it.
    pub async fn connect_with_config(config: &Config) -> Result<Self> {
        let encryption = config.session.encryption()?;
        let bus = match config.bus.address.as_deref() {
            Some(address) => DbusConnection::with_address(address).await?,
            None => DbusConnection::session().await?,
        };
        Self::open(Arc::new(bus), encryption, config.prompt.window_id.clone()).await
    }

    /// Open a session over an existing bus.
    pub async fn open(
        bus: Arc<dyn SecretBus>,
        encryption: EncryptionType,
        window_id: String,
    ) -> Result<Self> {
        let session = Session::open(bus.as_ref(), encryption).await?;
        Ok(Self {
            ctx: Arc::new(ServiceContext {
                bus,
                session,
                window_id,
            }),
        })
    }

    pub fn session(&self) -> &Session {
        &self.ctx.session
    }

    fn collection(&self, path: OwnedObjectPath) -> Collection {
        Collection::new(Arc::clone(&self.ctx), path)
    }

    fn item(&self, path: OwnedObjectPath) -> Item {
        Item::new(Arc::clone(&self.ctx), path)
    }

    /// All collections the daemon currently exposes.
    pub async fn collections(&self) -> Result<Vec<Collection>> {
        let root = ObjectPath::from_static_str_unchecked(SS_DBUS_PATH);
        let value = self
            .ctx
            .bus
            .get_property(&root, SS_SERVICE_INTERFACE, "Collections")
            .await?;
        Ok(convert::to_object_paths(&value, "Collections")?
            .into_iter()
            .map(|path| self.collection(path))
            .collect())
    }

    /// Create a collection, optionally registering `alias` for it.
    ///
    /// Returns `None` when the creation prompt is dismissed.
    pub async fn create_collection(&self, label: &str, alias: &str) -> Result<Option<Collection>> {
        let mut properties = Properties::new();
        properties.insert(
            SS_COLLECTION_LABEL.to_string(),
            Value::from(label.to_string()),
        );

        let (path, prompt_path) = self.ctx.bus.create_collection(properties, alias).await?;
        if !convert::is_root(&path) {
            return Ok(Some(self.collection(path)));
        }

        let completion = prompt(self.ctx.bus.as_ref(), &prompt_path, &self.ctx.window_id).await?;
        if completion.dismissed {
            debug!(label, "collection creation dismissed");
            return Ok(None);
        }
        match convert::to_object_path(&completion.result, "prompt result") {
            Ok(path) => Ok(Some(self.collection(path))),
            Err(_) => {
                warn!(label, "collection prompt completed without an object path");
                Ok(None)
            }
        }
    }

    /// Look up the collection registered under `alias`.
    pub async fn collection_by_alias(&self, alias: &str) -> Result<Option<Collection>> {
        let path = self.ctx.bus.read_alias(alias).await?;
        if convert::is_root(&path) {
            return Ok(None);
        }
        Ok(Some(self.collection(path)))
    }

    pub async fn default_collection(&self) -> Result<Option<Collection>> {
        self.collection_by_alias(DEFAULT_COLLECTION_ALIAS).await
    }

    /// Search every collection for items carrying all of `attributes`.
    pub async fn search_items(&self, attributes: &Attributes) -> Result<SearchItemsResult> {
        let (unlocked, locked) = self.ctx.bus.search_items(attributes).await?;
        Ok(SearchItemsResult {
            unlocked: unlocked.into_iter().map(|p| self.item(p)).collect(),
            locked: locked.into_iter().map(|p| self.item(p)).collect(),
        })
    }

    pub async fn lock(&self, objects: &[OwnedObjectPath]) -> Result<()> {
        self.ctx.set_locked(true, objects).await.map(drop)
    }

    pub async fn unlock(&self, objects: &[OwnedObjectPath]) -> Result<()> {
        self.ctx.set_locked(false, objects).await.map(drop)
    }

    pub async fn lock_collection(&self, collection: &Collection) -> Result<()> {
        self.lock(&[collection.path().clone()]).await
    }

    pub async fn unlock_collection(&self, collection: &Collection) -> Result<()> {
        self.unlock(&[collection.path().clone()]).await
    }

    pub async fn lock_item(&self, item: &Item) -> Result<()> {
        self.lock(&[item.path().clone()]).await
    }

    pub async fn unlock_item(&self, item: &Item) -> Result<()> {
        self.unlock(&[item.path().clone()]).await
    }
}
