//! Redis-backed counter store.

use async_trait::async_trait;
use ::redis::aio::ConnectionManager;
use ::redis::cluster::{ClusterClient, ClusterClientBuilder};
use ::redis::cluster_async::ClusterConnection;
use ::redis::{AsyncCommands, RedisResult};
use tokio::sync::OnceCell;

use crate::config::{StoreConfig, StoreMode};
use crate::store::{CounterStore, StoreError};

enum Target {
    Cluster(ClusterClient),
    Standalone(::redis::Client),
}

// Both variants are cheap handles over a shared multiplexed connection.
#[derive(Clone)]
enum Connection {
    Cluster(ClusterConnection),
    Standalone(ConnectionManager),
}

/// Counter store talking to Redis Cluster or a single Redis server.
pub struct RedisStore {
    target: Target,
    connection: OnceCell<Connection>,
}

impl RedisStore {
    /// Build a client from config. No network I/O happens until the first
    /// increment.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let target = match config.mode {
            StoreMode::Cluster => {
                let mut builder = ClusterClientBuilder::new(config.nodes.clone());
                if config.read_from_replicas {
                    builder = builder.read_from_replicas();
                }
                Target::Cluster(builder.build().map_err(connect_error)?)
            }
            StoreMode::Standalone => {
                let node = config
                    .nodes
                    .first()
                    .ok_or_else(|| StoreError::Connect("no store node configured".to_string()))?;
                Target::Standalone(::redis::Client::open(node.as_str()).map_err(connect_error)?)
            }
        };

        Ok(Self {
            target,
            connection: OnceCell::new(),
        })
    }

    pub fn mode(&self) -> StoreMode {
        match self.target {
            Target::Cluster(_) => StoreMode::Cluster,
            Target::Standalone(_) => StoreMode::Standalone,
        }
    }

    async fn connection(&self) -> Result<Connection, StoreError> {
        let connection = self
            .connection
            .get_or_try_init(|| async {
                let connection = match &self.target {
                    Target::Cluster(client) => {
                        client.get_async_connection().await.map(Connection::Cluster)
                    }
                    Target::Standalone(client) => ConnectionManager::new(client.clone())
                        .await
                        .map(Connection::Standalone),
                }
                .map_err(connect_error)?;

                tracing::info!(mode = ?self.mode(), "Connected to counter store");
                Ok::<_, StoreError>(connection)
            })
            .await?;

        Ok(connection.clone())
    }
}

#[async_trait]
impl CounterStore for RedisStore {
    async fn increment(&self, key: &str) -> Result<i64, StoreError> {
        let result: RedisResult<i64> = match self.connection().await? {
            Connection::Cluster(mut conn) => conn.incr(key, 1).await,
            Connection::Standalone(mut conn) => conn.incr(key, 1).await,
        };

        result.map_err(|e| StoreError::Command(e.to_string()))
    }
}

fn connect_error(err: ::redis::RedisError) -> StoreError {
    StoreError::Connect(err.to_string())
}
