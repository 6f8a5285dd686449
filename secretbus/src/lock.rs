use tracing::debug;
use zvariant::OwnedObjectPath;

use crate::bus::SecretBus;
use crate::convert::is_root;
use crate::error::Result;
use crate::prompt::prompt;

/// Lock or unlock `objects` through the service, driving a prompt if the
/// daemon asks for one.
///
/// Returns `true` if the user dismissed the prompt, in which case the
/// deferred objects keep their previous state.  The prompt's result value
/// is ignored otherwise.
pub async fn lock_or_unlock(
    bus: &dyn SecretBus,
    want_locked: bool,
    objects: &[OwnedObjectPath],
    window_id: &str,
) -> Result<bool> {
    let (done, prompt_path) = if want_locked {
        bus.lock(objects).await?
    } else {
        bus.unlock(objects).await?
    };
    debug!(
        want_locked,
        requested = objects.len(),
        immediate = done.len(),
        "lock state change requested"
    );

    if is_root(&prompt_path) {
        return Ok(false);
    }
    let completion = prompt(bus, &prompt_path, window_id).await?;
    if completion.dismissed {
        debug!(want_locked, "lock state change dismissed");
    }
    Ok(completion.dismissed)
}
