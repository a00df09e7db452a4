use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use tokio::sync::mpsc;

use crate::error::AppResult;

use super::{StateKey, UserStateStore};

/// Creates a Redis client for persisted user state
///
/// Uses connection pooling via the connection-manager feature.
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Message for asynchronous state writes
struct StateWriteMessage {
    key: String,
    value: String,
}

/// Redis-backed user state store
///
/// Writes go through a background task so mutating user actions never wait
/// on Redis. User state is durable, so values are stored without expiry.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
    write_tx: mpsc::UnboundedSender<StateWriteMessage>,
}

/// Handle for gracefully shutting down the state writer
pub struct StoreWriterHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl StoreWriterHandle {
    /// Initiates a graceful shutdown of the state writer
    ///
    /// Sends a shutdown signal to the writer task and waits for it to flush
    /// all pending writes to Redis.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        tracing::info!("State writer shutdown signal sent");
    }
}

impl RedisStore {
    /// Creates a new store with an async write background task
    pub async fn new(client: Client) -> (Self, StoreWriterHandle) {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let writer_client = client.clone();
        tokio::spawn(async move {
            Self::writer_task(writer_client, write_rx, shutdown_rx).await;
        });

        let store = Self { client, write_tx };
        let handle = StoreWriterHandle { shutdown_tx };

        (store, handle)
    }

    /// Background task that processes state write messages
    ///
    /// On shutdown signal, flushes all remaining messages before exiting so
    /// the last user action is not lost.
    async fn writer_task(
        client: Client,
        mut write_rx: mpsc::UnboundedReceiver<StateWriteMessage>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::info!("State writer task started");

        loop {
            tokio::select! {
                Some(msg) = write_rx.recv() => {
                    if let Err(e) = Self::write_to_redis(&client, msg).await {
                        tracing::error!(error = %e, "Failed to write user state to Redis");
                    }
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("State writer shutting down, flushing remaining writes");

                    while let Ok(msg) = write_rx.try_recv() {
                        if let Err(e) = Self::write_to_redis(&client, msg).await {
                            tracing::error!(error = %e, "Failed to flush state write during shutdown");
                        }
                    }

                    tracing::info!("State writer task stopped");
                    break;
                }
            }
        }
    }

    async fn write_to_redis(client: &Client, msg: StateWriteMessage) -> AppResult<()> {
        let mut conn = client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(msg.key, msg.value).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStateStore for RedisStore {
    async fn get(&self, key: StateKey) -> AppResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key.to_string()).await?;
        Ok(value)
    }

    fn put(&self, key: StateKey, value: String) {
        let msg = StateWriteMessage {
            key: key.to_string(),
            value,
        };

        if let Err(e) = self.write_tx.send(msg) {
            tracing::error!(error = %e, "Failed to queue state write");
        }
    }
}
