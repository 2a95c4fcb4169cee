// src/telegram/poller.rs
// =============================================================================
// The update loop.
//
// 1. Long-poll getUpdates starting at `offset`
// 2. Spawn one tokio task per update, running it through the Router
// 3. Move `offset` past the highest update id so Telegram drops them
// 4. Repeat until Ctrl-C
//
// Handlers share nothing mutable; each task owns its update and only holds
// an Arc to the router. In-flight tasks are abandoned on shutdown.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, error, info, warn};

use super::client::TelegramClient;
use crate::bot::Router;

// Pause after a failed getUpdates before polling again
const RETRY_DELAY: Duration = Duration::from_secs(3);

pub async fn run_polling(client: Arc<TelegramClient>, router: Arc<Router>) -> Result<()> {
    let mut offset: i64 = 0;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!("polling for updates");

    loop {
        let polled = tokio::select! {
            _ = &mut shutdown => {
                info!("received Ctrl-C, shutting down");
                return Ok(());
            }
            polled = client.get_updates(offset) => polled,
        };

        let updates = match polled {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "getUpdates failed, retrying in {:?}", RETRY_DELAY);
                tokio::select! {
                    _ = &mut shutdown => {
                        info!("received Ctrl-C, shutting down");
                        return Ok(());
                    }
                    _ = tokio::time::sleep(RETRY_DELAY) => {}
                }
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            let update_id = update.update_id;

            let Some(incoming) = update.into_incoming() else {
                debug!(update_id, "skipping unsupported update");
                continue;
            };

            let router = Arc::clone(&router);
            tokio::spawn(async move {
                match router.handle(incoming).await {
                    Ok(outcome) => debug!(update_id, ?outcome, "update handled"),
                    Err(e) => error!(update_id, error = %e, "could not deliver reply"),
                }
            });
        }
    }
}
