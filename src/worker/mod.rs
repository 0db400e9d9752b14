//! Background tasks that run beside the event listener

pub mod announcer;

use tokio::sync::watch;

pub use announcer::Announcer;

/// Resolves once `true` has been sent on `shutdown`.
///
/// A dropped sender never counts as a stop request.
pub async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    while !*shutdown.borrow_and_update() {
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
