use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub graph: GraphConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `memory` for the in-process store, or a sqlite URL such as
    /// `sqlite:data/gamegraph.db?mode=rwc`.
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Knobs for the relationship/mutation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub allocator: AllocatorPolicy,
    /// Attach a request-scoped dataloader that batches edge lookups.
    /// Resolved values are identical to the per-field path.
    pub batch_edges: bool,
    /// Reject review creation when a foreign key has no matching record.
    /// Off by default: the stock behavior accepts dangling references.
    pub enforce_referential_integrity: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocatorPolicy {
    Sequence,
    Random,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let allocator = match env::var("ID_ALLOCATOR")
            .unwrap_or_else(|_| "sequence".to_string())
            .to_lowercase()
            .as_str()
        {
            "sequence" => AllocatorPolicy::Sequence,
            "random" => AllocatorPolicy::Random,
            other => {
                return Err(AppError::Configuration(format!(
                    "unknown ID_ALLOCATOR '{}', expected 'sequence' or 'random'",
                    other
                )))
            }
        };

        Ok(Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "memory".to_string()),
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "4000".to_string())
                    .parse()
                    .unwrap_or(4000),
            },
            graph: GraphConfig {
                allocator,
                batch_edges: env_flag("GRAPHQL_BATCH_EDGES"),
                enforce_referential_integrity: env_flag("ENFORCE_REFERENTIAL_INTEGRITY"),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes")
    )
}
