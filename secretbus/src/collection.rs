use std::sync::Arc;

use secretbus_core::Attributes;
use secretbus_core::constants::{SS_COLLECTION_INTERFACE, SS_ITEM_ATTRIBUTES, SS_ITEM_LABEL};
use tracing::{debug, warn};
use zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::bus::Properties;
use crate::convert;
use crate::error::Result;
use crate::item::Item;
use crate::prompt::prompt;
use crate::service::ServiceContext;

/// Handle to an `org.freedesktop.Secret.Collection`.
///
/// Holds only the object path; every accessor is a bus round-trip.
#[derive(Clone)]
pub struct Collection {
    ctx: Arc<ServiceContext>,
    path: OwnedObjectPath,
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("path", &self.path.as_str())
            .finish()
    }
}

impl Collection {
    pub(crate) fn new(ctx: Arc<ServiceContext>, path: OwnedObjectPath) -> Self {
        Self { ctx, path }
    }

    pub fn path(&self) -> &OwnedObjectPath {
        &self.path
    }

    fn item(&self, path: OwnedObjectPath) -> Item {
        Item::new(Arc::clone(&self.ctx), path)
    }

    async fn property(&self, name: &'static str) -> Result<OwnedValue> {
        self.ctx
            .bus
            .get_property(&self.path, SS_COLLECTION_INTERFACE, name)
            .await
    }

    pub async fn items(&self) -> Result<Vec<Item>> {
        let value = self.property("Items").await?;
        Ok(convert::to_object_paths(&value, "Items")?
            .into_iter()
            .map(|path| self.item(path))
            .collect())
    }

    pub async fn label(&self) -> Result<String> {
        let value = self.property("Label").await?;
        convert::to_string(&value, "Label")
    }

    pub async fn set_label(&self, label: &str) -> Result<()> {
        self.ctx
            .bus
            .set_property(
                &self.path,
                SS_COLLECTION_INTERFACE,
                "Label",
                Value::from(label.to_string()),
            )
            .await
    }

    pub async fn is_locked(&self) -> Result<bool> {
        let value = self.property("Locked").await?;
        convert::to_bool(&value, "Locked")
    }

    /// Creation time, unix seconds.
    pub async fn created(&self) -> Result<u64> {
        let value = self.property("Created").await?;
        convert::to_u64(&value, "Created")
    }

    /// Last modification time, unix seconds.
    pub async fn modified(&self) -> Result<u64> {
        let value = self.property("Modified").await?;
        convert::to_u64(&value, "Modified")
    }

    pub async fn search_items(&self, attributes: &Attributes) -> Result<Vec<Item>> {
        let paths = self
            .ctx
            .bus
            .search_collection(&self.path, attributes)
            .await?;
        Ok(paths.into_iter().map(|path| self.item(path)).collect())
    }

    /// Store a new secret in this collection.
    ///
    /// A locked collection is unlocked first. With `replace`, an existing item
    /// with identical attributes is overwritten. Returns `None` if a prompt
    /// was dismissed or did not yield an item path.
    pub async fn create_item(
        &self,
        label: &str,
        attributes: &Attributes,
        secret: &[u8],
        content_type: &str,
        replace: bool,
    ) -> Result<Option<Item>> {
        let secret = self.ctx.session.format(secret, content_type)?;

        let mut properties = Properties::new();
        properties.insert(SS_ITEM_LABEL.to_string(), Value::from(label.to_string()));
        properties.insert(
            SS_ITEM_ATTRIBUTES.to_string(),
            Value::from(attributes.clone()),
        );

        if self.is_locked().await? {
            debug!(collection = %self.path.as_str(), "unlocking collection before CreateItem");
            if self.ctx.set_locked(false, &[self.path.clone()]).await? {
                debug!(collection = %self.path.as_str(), label, "unlock dismissed, item not created");
                return Ok(None);
            }
        }

        let (path, prompt_path) = self
            .ctx
            .bus
            .create_item(&self.path, properties, secret, replace)
            .await?;
        if !convert::is_root(&path) {
            return Ok(Some(self.item(path)));
        }

        let completion = prompt(self.ctx.bus.as_ref(), &prompt_path, &self.ctx.window_id).await?;
        if completion.dismissed {
            debug!(collection = %self.path.as_str(), label, "item creation dismissed");
            return Ok(None);
        }
        match convert::to_object_path(&completion.result, "prompt result") {
            Ok(path) => Ok(Some(self.item(path))),
            Err(_) => {
                warn!(
                    collection = %self.path.as_str(),
                    "item prompt completed without an object path"
                );
                Ok(None)
            }
        }
    }

    pub async fn lock(&self) -> Result<()> {
        self.ctx.set_locked(true, &[self.path.clone()]).await.map(drop)
    }

    pub async fn unlock(&self) -> Result<()> {
        self.ctx.set_locked(false, &[self.path.clone()]).await.map(drop)
    }

    /// Delete the collection and everything in it.
    pub async fn delete(&self) -> Result<()> {
        let prompt_path = self
            .ctx
            .bus
            .delete(&self.path, SS_COLLECTION_INTERFACE)
            .await?;
        if !convert::is_root(&prompt_path) {
            prompt(self.ctx.bus.as_ref(), &prompt_path, &self.ctx.window_id).await?;
        }
        Ok(())
    }
}
