pub mod error;
pub mod handler;
pub mod http;
pub mod registry;
pub mod token_cache;
pub mod trace_context;

pub use error::{DeliveryError, HandlerError};
pub use handler::{ChannelHandler, DynChannelHandler};
pub use http::{ExchangeError, HttpExchange, REDACTED, make_http_request};
pub use registry::HandlerRegistry;
pub use token_cache::{StateTokenCache, TokenCache};
pub use trace_context::inject_trace_context;
