//! Interrupt handling.

use log::warn;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancels `cancel` on the first Ctrl-C.
///
/// The listener stops on its own once `cancel` is cancelled by anyone else.
pub fn cancel_on_interrupt(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    warn!("Interrupted; returning the records resolved so far");
                    cancel.cancel();
                }
                Err(e) => warn!("Could not listen for Ctrl-C: {e}"),
            },
            _ = cancel.cancelled() => {}
        }
    })
}

/// Stops the interrupt listener.
pub async fn shutdown_gracefully(cancel: CancellationToken, listener: JoinHandle<()>) {
    cancel.cancel();
    let _ = listener.await;
}
