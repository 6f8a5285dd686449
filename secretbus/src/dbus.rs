//! [`SecretBus`] over a real D-Bus connection.

use async_trait::async_trait;
use futures_util::StreamExt;
use secretbus_core::Attributes;
use secretbus_core::constants::{
    SS_COLLECTION_INTERFACE, SS_DBUS_NAME, SS_DBUS_PATH, SS_ITEM_INTERFACE, SS_PROMPT_INTERFACE,
    SS_SERVICE_INTERFACE,
};
use tracing::{debug, warn};
use zbus::Connection;
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::bus::{CompletedCallback, PromptCompletion, Properties, SecretBus, Subscription};
use crate::error::Result;
use crate::secret::Secret;

const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// A session-bus connection to `org.freedesktop.secrets`.
///
/// Proxies are built per call; nothing is cached between calls.
#[derive(Clone, Debug)]
pub struct DbusConnection {
    conn: Connection,
}

impl DbusConnection {
    /// Connect to the user's session bus.
    pub async fn session() -> Result<Self> {
        Ok(Self {
            conn: Connection::session().await?,
        })
    }

    /// Connect to an explicit bus address, e.g. `unix:path=/run/user/1000/bus`.
    pub async fn with_address(address: &str) -> Result<Self> {
        let conn = zbus::connection::Builder::address(address)?.build().await?;
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    async fn proxy(
        &self,
        path: &ObjectPath<'_>,
        interface: &'static str,
    ) -> Result<zbus::Proxy<'static>> {
        Ok(zbus::Proxy::new(&self.conn, SS_DBUS_NAME, path.to_owned(), interface).await?)
    }

    async fn service(&self) -> Result<zbus::Proxy<'static>> {
        Ok(zbus::Proxy::new(&self.conn, SS_DBUS_NAME, SS_DBUS_PATH, SS_SERVICE_INTERFACE).await?)
    }
}

#[async_trait]
impl SecretBus for DbusConnection {
    async fn open_session(
        &self,
        algorithm: &str,
        input: Value<'static>,
    ) -> Result<(OwnedValue, OwnedObjectPath)> {
        let proxy = self.service().await?;
        Ok(proxy.call("OpenSession", &(algorithm, input)).await?)
    }

    async fn create_collection(
        &self,
        properties: Properties,
        alias: &str,
    ) -> Result<(OwnedObjectPath, OwnedObjectPath)> {
        let proxy = self.service().await?;
        Ok(proxy.call("CreateCollection", &(properties, alias)).await?)
    }

    async fn search_items(
        &self,
        attributes: &Attributes,
    ) -> Result<(Vec<OwnedObjectPath>, Vec<OwnedObjectPath>)> {
        let proxy = self.service().await?;
        Ok(proxy.call("SearchItems", &(attributes,)).await?)
    }

    async fn lock(
        &self,
        objects: &[OwnedObjectPath],
    ) -> Result<(Vec<OwnedObjectPath>, OwnedObjectPath)> {
        let proxy = self.service().await?;
        Ok(proxy.call("Lock", &(objects,)).await?)
    }

    async fn unlock(
        &self,
        objects: &[OwnedObjectPath],
    ) -> Result<(Vec<OwnedObjectPath>, OwnedObjectPath)> {
        let proxy = self.service().await?;
        Ok(proxy.call("Unlock", &(objects,)).await?)
    }

    async fn read_alias(&self, name: &str) -> Result<OwnedObjectPath> {
        let proxy = self.service().await?;
        Ok(proxy.call("ReadAlias", &(name,)).await?)
    }

    async fn create_item(
        &self,
        collection: &ObjectPath<'_>,
        properties: Properties,
        secret: Secret,
        replace: bool,
    ) -> Result<(OwnedObjectPath, OwnedObjectPath)> {
        let proxy = self.proxy(collection, SS_COLLECTION_INTERFACE).await?;
        Ok(proxy
            .call("CreateItem", &(properties, secret, replace))
            .await?)
    }

    async fn search_collection(
        &self,
        collection: &ObjectPath<'_>,
        attributes: &Attributes,
    ) -> Result<Vec<OwnedObjectPath>> {
        let proxy = self.proxy(collection, SS_COLLECTION_INTERFACE).await?;
        Ok(proxy.call("SearchItems", &(attributes,)).await?)
    }

    async fn delete(
        &self,
        object: &ObjectPath<'_>,
        interface: &'static str,
    ) -> Result<OwnedObjectPath> {
        let proxy = self.proxy(object, interface).await?;
        Ok(proxy.call("Delete", &()).await?)
    }

    async fn get_secret(&self, item: &ObjectPath<'_>, session: &ObjectPath<'_>) -> Result<Secret> {
        let proxy = self.proxy(item, SS_ITEM_INTERFACE).await?;
        Ok(proxy.call("GetSecret", &(session,)).await?)
    }

    async fn set_secret(&self, item: &ObjectPath<'_>, secret: Secret) -> Result<()> {
        let proxy = self.proxy(item, SS_ITEM_INTERFACE).await?;
        proxy.call::<_, _, ()>("SetSecret", &(secret,)).await?;
        Ok(())
    }

    async fn get_property(
        &self,
        object: &ObjectPath<'_>,
        interface: &'static str,
        name: &'static str,
    ) -> Result<OwnedValue> {
        let proxy = self.proxy(object, PROPERTIES_INTERFACE).await?;
        Ok(proxy.call("Get", &(interface, name)).await?)
    }

    async fn set_property(
        &self,
        object: &ObjectPath<'_>,
        interface: &'static str,
        name: &'static str,
        value: Value<'static>,
    ) -> Result<()> {
        let proxy = self.proxy(object, PROPERTIES_INTERFACE).await?;
        proxy
            .call::<_, _, ()>("Set", &(interface, name, value))
            .await?;
        Ok(())
    }

    async fn subscribe_completed(
        &self,
        prompt: &ObjectPath<'_>,
        on_completed: CompletedCallback,
    ) -> Result<Subscription> {
        let proxy = self.proxy(prompt, SS_PROMPT_INTERFACE).await?;
        // The match rule is registered with the bus before this returns.
        let mut stream = proxy.receive_signal("Completed").await?;
        let path = prompt.to_string();

        let task = tokio::spawn(async move {
            let outcome: Result<PromptCompletion> = match stream.next().await {
                Some(msg) => {
                    let body = msg.body();
                    body.deserialize::<(bool, OwnedValue)>()
                        .map(|(dismissed, result)| PromptCompletion { dismissed, result })
                        .map_err(Into::into)
                }
                None => {
                    warn!(prompt = %path, "Completed stream ended before the prompt finished");
                    Err(zbus::Error::Failure(format!(
                        "prompt {path} subscription closed"
                    ))
                    .into())
                }
            };
            debug!(prompt = %path, ok = outcome.is_ok(), "prompt signal received");
            on_completed(outcome);
        });

        Ok(Subscription::new(move || task.abort()))
    }

    async fn prompt(&self, prompt: &ObjectPath<'_>, window_id: &str) -> Result<()> {
        let proxy = self.proxy(prompt, SS_PROMPT_INTERFACE).await?;
        proxy.call::<_, _, ()>("Prompt", &(window_id,)).await?;
        Ok(())
    }
}
