//! Driving `org.freedesktop.Secret.Prompt` objects to completion.
//!
//! The daemon defers interactive operations by handing back a prompt path.
//! The client subscribes to the prompt's `Completed` signal, calls
//! `Prompt(window_id)` and waits for exactly one completion.

use tokio::sync::oneshot;
use tracing::debug;
use zvariant::ObjectPath;

use crate::bus::{PromptCompletion, SecretBus};
use crate::error::Result;

/// Show the prompt at `path` and wait for the user to finish with it.
///
/// The `Completed` subscription is in place before `Prompt` is called, so a
/// daemon that completes immediately is still observed. Dropping the returned
/// future releases the subscription.
pub async fn prompt(
    bus: &dyn SecretBus,
    path: &ObjectPath<'_>,
    window_id: &str,
) -> Result<PromptCompletion> {
    let (tx, rx) = oneshot::channel();
    let _subscription = bus
        .subscribe_completed(
            path,
            Box::new(move |outcome| {
                // The receiver is gone when the caller was cancelled.
                let _ = tx.send(outcome);
            }),
        )
        .await?;

    debug!(prompt = %path, window_id, "showing prompt");
    bus.prompt(path, window_id).await?;

    let completion = rx.await.map_err(|_| {
        zbus::Error::Failure(format!("prompt {path} ended without a Completed signal"))
    })??;
    debug!(prompt = %path, dismissed = completion.dismissed, "prompt completed");
    Ok(completion)
}
