use std::sync::Arc;

use secretbus_core::Attributes;
use secretbus_core::constants::SS_ITEM_INTERFACE;
use tracing::debug;
use zeroize::Zeroizing;
use zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::convert;
use crate::error::Result;
use crate::prompt::prompt;
use crate::service::ServiceContext;

/// Handle to an `org.freedesktop.Secret.Item`.
#[derive(Clone)]
pub struct Item {
    ctx: Arc<ServiceContext>,
    path: OwnedObjectPath,
}

impl std::fmt::Debug for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Item")
            .field("path", &self.path.as_str())
            .finish()
    }
}

impl Item {
    pub(crate) fn new(ctx: Arc<ServiceContext>, path: OwnedObjectPath) -> Self {
        Self { ctx, path }
    }

    pub fn path(&self) -> &OwnedObjectPath {
        &self.path
    }

    async fn property(&self, name: &'static str) -> Result<OwnedValue> {
        self.ctx
            .bus
            .get_property(&self.path, SS_ITEM_INTERFACE, name)
            .await
    }

    async fn set_property(&self, name: &'static str, value: Value<'static>) -> Result<()> {
        self.ctx
            .bus
            .set_property(&self.path, SS_ITEM_INTERFACE, name, value)
            .await
    }

    pub async fn attributes(&self) -> Result<Attributes> {
        let value = self.property("Attributes").await?;
        convert::to_attributes(&value, "Attributes")
    }

    pub async fn set_attributes(&self, attributes: &Attributes) -> Result<()> {
        self.set_property("Attributes", Value::from(attributes.clone()))
            .await
    }

    pub async fn label(&self) -> Result<String> {
        let value = self.property("Label").await?;
        convert::to_string(&value, "Label")
    }

    pub async fn set_label(&self, label: &str) -> Result<()> {
        self.set_property("Label", Value::from(label.to_string()))
            .await
    }

    pub async fn is_locked(&self) -> Result<bool> {
        let value = self.property("Locked").await?;
        convert::to_bool(&value, "Locked")
    }

    pub async fn created(&self) -> Result<u64> {
        let value = self.property("Created").await?;
        convert::to_u64(&value, "Created")
    }

    pub async fn modified(&self) -> Result<u64> {
        let value = self.property("Modified").await?;
        convert::to_u64(&value, "Modified")
    }

    async fn ensure_unlocked(&self) -> Result<()> {
        if self.is_locked().await? {
            debug!(item = %self.path.as_str(), "auto-unlocking item");
            self.unlock().await?;
        }
        Ok(())
    }

    /// Fetch and decrypt the secret, unlocking the item first if needed.
    ///
    /// The item is left unlocked afterwards.
    pub async fn get_secret(&self) -> Result<Zeroizing<Vec<u8>>> {
        let (secret, _content_type) = self.get_secret_with_content_type().await?;
        Ok(secret)
    }

    /// Like [`Item::get_secret`], also returning the stored content type.
    pub async fn get_secret_with_content_type(&self) -> Result<(Zeroizing<Vec<u8>>, String)> {
        self.ensure_unlocked().await?;
        let secret = self
            .ctx
            .bus
            .get_secret(&self.path, self.ctx.session.path())
            .await?;
        let plaintext = Zeroizing::new(self.ctx.session.decrypt(&secret)?);
        Ok((plaintext, secret.content_type))
    }

    /// Replace the stored secret, unlocking the item first if needed.
    pub async fn set_secret(&self, secret: &[u8], content_type: &str) -> Result<()> {
        let secret = self.ctx.session.format(secret, content_type)?;
        self.ensure_unlocked().await?;
        self.ctx.bus.set_secret(&self.path, secret).await
    }

    pub async fn lock(&self) -> Result<()> {
        self.ctx.set_locked(true, &[self.path.clone()]).await.map(drop)
    }

    pub async fn unlock(&self) -> Result<()> {
        self.ctx.set_locked(false, &[self.path.clone()]).await.map(drop)
    }

    pub async fn delete(&self) -> Result<()> {
        let prompt_path = self.ctx.bus.delete(&self.path, SS_ITEM_INTERFACE).await?;
        if !convert::is_root(&prompt_path) {
            prompt(self.ctx.bus.as_ref(), &prompt_path, &self.ctx.window_id).await?;
        }
        Ok(())
    }
}
