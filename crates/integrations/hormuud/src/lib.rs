//! Hormuud SMS channel handler for smsgate.
//!
//! Implements [`ChannelHandler`](smsgate_handler::ChannelHandler) for channels
//! of type `HM`. Outbound messages are split into 160 character segments and
//! posted to the Hormuud JSON API with a bearer token obtained through the
//! password grant and cached per channel. Inbound webhooks are translated with
//! [`receive_form`].
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use smsgate_handler::StateTokenCache;
//! use smsgate_hormuud::{HormuudConfig, HormuudHandler};
//! use smsgate_state_memory::MemoryStateStore;
//!
//! let cache = Arc::new(StateTokenCache::new(Arc::new(MemoryStateStore::new()), "hm"));
//! let handler = HormuudHandler::new(HormuudConfig::new(), cache).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod provider;
pub mod receive;
pub mod token;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::HormuudConfig;
pub use error::HormuudError;
pub use provider::{CHANNEL_TYPE, HormuudHandler};
pub use receive::receive_form;
pub use token::{TokenFetch, TokenFetcher};
pub use types::{MtPayload, NO_UDH, UNSET_MESSAGE_TYPE};
