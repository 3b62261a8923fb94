pub mod channel;
pub mod error;
pub mod log;
pub mod message;
pub mod segment;
pub mod status;
pub mod types;
pub mod urn;

pub use channel::{CONFIG_MAX_LENGTH, CONFIG_PASSWORD, CONFIG_USERNAME, Channel};
pub use error::CoreError;
pub use log::ChannelLog;
pub use message::{IncomingMsg, OutboundMessage};
pub use segment::{DEFAULT_MAX_MSG_LENGTH, max_length_for, split_msg, text_and_attachments};
pub use status::{DeliveryStatus, MsgState};
pub use types::{ChannelType, ChannelUuid, MsgId};
pub use urn::Urn;
