//! Redis state backend for smsgate.
//!
//! Provides a Redis-backed implementation of the [`StateStore`] trait from
//! `smsgate-state`, used as the shared provider token cache.
//!
//! # Features
//!
//! - **State storage**: plain Redis strings written with `SET EX`, so entries
//!   expire on the server and every gateway process sees the same token.
//! - **Connection pooling**: uses `deadpool-redis` for connection management.
//!
//! # Example
//!
//! ```ignore
//! use smsgate_state_redis::{RedisConfig, RedisStateStore};
//!
//! let config = RedisConfig::new("redis://localhost:6379").with_prefix("gw");
//! let store = RedisStateStore::new(&config)?;
//! ```
//!
//! [`StateStore`]: smsgate_state::StateStore

mod config;
mod key_render;
mod store;

pub use config::RedisConfig;
pub use store::RedisStateStore;
