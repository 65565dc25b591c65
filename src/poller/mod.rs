
use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    bot_handler::{BotHandler, BotHandlerError},
    messaging::MessagingService,
};

/// Failures that end a poll cycle early.
#[derive(Debug, Error)]
pub enum PollerError {
    /// The handler failed on an update; the rest of its batch was skipped.
    #[error("Failed to handle update {id}: {source}")]
    Handler {
        /// Identifier of the failing update.
        id: u32,
        /// What the handler reported.
        #[source]
        source: BotHandlerError,
    },
}

type Result<T> = std::result::Result<T, PollerError>;

/// Long-polls Telegram for updates and hands them to the bot handler one at
/// a time.
pub struct UpdatePoller {
    messaging_service: Arc<dyn MessagingService>,
    handler: Arc<BotHandler>,
    // Long-poll timeout in seconds.
    poll_timeout: u32,
    // Pause after every cycle.
    idle_pause: Duration,
    // Pause after a failed batch.
    error_pause: Duration,
    offset: Option<i32>,
}

impl UpdatePoller {
    /// Create a new UpdatePoller.
    pub fn new(
        messaging_service: Arc<dyn MessagingService>,
        handler: Arc<BotHandler>,
        poll_timeout: u32,
        idle_pause: Duration,
        error_pause: Duration,
    ) -> Self {
        Self { messaging_service, handler, poll_timeout, idle_pause, error_pause, offset: None }
    }

    /// Run the poller until the process is stopped.
    pub async fn run(mut self) {
        tracing::info!("Bot is running...");

        loop {
            let pause = self.run_cycle().await;
            tokio::time::sleep(pause).await;
        }
    }

    /// Poll and handle one batch, returning how long to wait before the next.
    async fn run_cycle(&mut self) -> Duration {
        match self.poll_once().await {
            Ok(handled) => {
                if handled > 0 {
                    tracing::debug!("Handled {handled} updates, next offset {:?}", self.offset);
                }
                self.idle_pause
            }
            Err(e) => {
                tracing::error!("Error in update loop: {e}");
                self.error_pause
            }
        }
    }

    /// Fetch one batch and handle it in order. A failed fetch counts as an
    /// empty batch. Handling stops at the first failing update; the offset
    /// already points past it so it is not delivered again.
    pub async fn poll_once(&mut self) -> Result<usize> {
        let updates =
            match self.messaging_service.get_updates(self.offset, self.poll_timeout).await {
                Ok(updates) => updates,
                Err(e) => {
                    tracing::warn!("Failed to fetch updates: {e}");
                    return Ok(0);
                }
            };

        let count = updates.len();
        for update in updates {
            let id = update.id;
            self.advance_offset(update.next_offset());
            self.handler
                .handle_update(update)
                .await
                .map_err(|source| PollerError::Handler { id, source })?;
        }

        Ok(count)
    }

    /// The offset the next poll will send.
    pub fn offset(&self) -> Option<i32> {
        self.offset
    }

    fn advance_offset(&mut self, next: i32) {
        self.offset = Some(self.offset.map_or(next, |current| current.max(next)));
    }
}
