//! Well-known names of the Secret Service D-Bus API.

// Bus peer
pub const SS_DBUS_NAME: &str = "org.freedesktop.secrets";
pub const SS_DBUS_PATH: &str = "/org/freedesktop/secrets";

// Interfaces
pub const SS_SERVICE_INTERFACE: &str = "org.freedesktop.Secret.Service";
pub const SS_COLLECTION_INTERFACE: &str = "org.freedesktop.Secret.Collection";
pub const SS_ITEM_INTERFACE: &str = "org.freedesktop.Secret.Item";
pub const SS_PROMPT_INTERFACE: &str = "org.freedesktop.Secret.Prompt";

// Item properties
pub const SS_ITEM_LABEL: &str = "org.freedesktop.Secret.Item.Label";
pub const SS_ITEM_ATTRIBUTES: &str = "org.freedesktop.Secret.Item.Attributes";

// Collection properties
pub const SS_COLLECTION_LABEL: &str = "org.freedesktop.Secret.Collection.Label";

// Algorithm names
pub const ALGORITHM_PLAIN: &str = "plain";
pub const ALGORITHM_DH: &str = "dh-ietf1024-sha256-aes128-cbc-pkcs7";

/// Alias of the collection new items land in by default.
pub const DEFAULT_COLLECTION_ALIAS: &str = "default";

/// Object path the service returns for "no object" (and "no prompt").
pub const ROOT_PATH: &str = "/";
