//! CLI command implementations

pub mod ask;
pub mod chat;
pub mod crawl;
pub mod curate;
pub mod discover;

pub use ask::ask;
pub use chat::chat;
pub use crawl::crawl;
pub use curate::curate;
pub use discover::discover;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Install a Ctrl-C handler that flips a shutdown flag
///
/// Crawlers check the flag between batches; interruption is a clean
/// shutdown path that still runs the final-persist contract.
pub(crate) fn shutdown_flag() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler = Arc::clone(&flag);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping after the current batch");
            handler.store(true, Ordering::SeqCst);
        }
    });
    flag
}
