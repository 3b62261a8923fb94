use async_trait::async_trait;
use smsgate_core::{Channel, ChannelType, DeliveryStatus, IncomingMsg, OutboundMessage};

use crate::error::{DeliveryError, HandlerError};

/// Strongly-typed channel handler trait with native `async fn`.
///
/// This trait is **not** object-safe because it uses native `async fn` methods
/// (which desugar to opaque `impl Future` return types). If you need dynamic
/// dispatch, use [`DynChannelHandler`] instead -- every `ChannelHandler`
/// automatically implements `DynChannelHandler` via a blanket implementation.
pub trait ChannelHandler: Send + Sync {
    /// Short code of the channel type this handler serves.
    fn channel_type(&self) -> &ChannelType;

    /// Human readable provider name.
    fn name(&self) -> &str;

    /// Deliver `msg` through `channel`.
    ///
    /// Provider-side failures are reported through the returned status; the
    /// error is reserved for sends where no provider exchange was possible.
    fn send_msg(
        &self,
        channel: &Channel,
        msg: &OutboundMessage,
    ) -> impl std::future::Future<Output = Result<DeliveryStatus, DeliveryError>> + Send;

    /// Translate an inbound webhook form body into incoming messages.
    fn receive(&self, channel: &Channel, form_body: &str)
    -> Result<Vec<IncomingMsg>, HandlerError>;
}

/// Object-safe handler trait for use behind `Arc<dyn DynChannelHandler>`.
///
/// You generally should not implement this trait directly -- instead implement
/// [`ChannelHandler`] and rely on the blanket implementation.
#[async_trait]
pub trait DynChannelHandler: Send + Sync {
    fn channel_type(&self) -> &ChannelType;

    fn name(&self) -> &str;

    async fn send_msg(
        &self,
        channel: &Channel,
        msg: &OutboundMessage,
    ) -> Result<DeliveryStatus, DeliveryError>;

    fn receive(&self, channel: &Channel, form_body: &str)
    -> Result<Vec<IncomingMsg>, HandlerError>;
}

#[async_trait]
impl<T: ChannelHandler + Sync> DynChannelHandler for T {
    fn channel_type(&self) -> &ChannelType {
        ChannelHandler::channel_type(self)
    }

    fn name(&self) -> &str {
        ChannelHandler::name(self)
    }

    async fn send_msg(
        &self,
        channel: &Channel,
        msg: &OutboundMessage,
    ) -> Result<DeliveryStatus, DeliveryError> {
        ChannelHandler::send_msg(self, channel, msg).await
    }

    fn receive(
        &self,
        channel: &Channel,
        form_body: &str,
    ) -> Result<Vec<IncomingMsg>, HandlerError> {
        ChannelHandler::receive(self, channel, form_body)
    }
}
