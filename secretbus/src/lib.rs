//! Async client for the freedesktop Secret Service
//! (`org.freedesktop.secrets`).
//!
//! ```no_run
//! # async fn demo() -> secretbus::Result<()> {
//! use secretbus::{Attributes, EncryptionType, Service};
//!
//! let service = Service::connect(EncryptionType::Dh).await?;
//! if let Some(collection) = service.default_collection().await? {
//!     let mut attrs = Attributes::new();
//!     attrs.insert("service".into(), "mail".into());
//!     collection
//!         .create_item("Mail password", &attrs, b"hunter2", "text/plain", true)
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod bus;
pub mod collection;
mod convert;
pub mod dbus;
pub mod error;
pub mod item;
pub mod lock;
pub mod prompt;
pub mod secret;
pub mod service;
pub mod session;


pub use bus::{PromptCompletion, SecretBus, Subscription};
pub use collection::Collection;
pub use dbus::DbusConnection;
pub use error::{Error, Result};
pub use item::Item;
pub use secret::Secret;
pub use service::{SearchItemsResult, Service};
pub use session::Session;

pub use secretbus_core::config::Config;
pub use secretbus_core::{Attributes, EncryptionType};
