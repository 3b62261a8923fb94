use std::collections::HashMap;
use std::sync::Arc;

use smsgate_core::{Channel, ChannelType, DeliveryStatus, IncomingMsg, MsgState, OutboundMessage};
use tracing::warn;

use crate::error::{DeliveryError, HandlerError};
use crate::handler::DynChannelHandler;

/// Maps channel type codes (`"HM"`, ...) to the handler serving them.
///
/// Built once at startup and then shared read-only, usually behind an `Arc`.
pub struct HandlerRegistry {
    handlers: HashMap<ChannelType, Arc<dyn DynChannelHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under its own channel type, replacing any handler
    /// already registered for that type.
    pub fn register(&mut self, handler: Arc<dyn DynChannelHandler>) {
        let channel_type = handler.channel_type().clone();
        self.handlers.insert(channel_type, handler);
    }

    pub fn get(&self, channel_type: &ChannelType) -> Option<Arc<dyn DynChannelHandler>> {
        self.handlers.get(channel_type).cloned()
    }

    /// Sorted channel type codes of all registered handlers.
    pub fn list(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.handlers.keys().map(ChannelType::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Send `msg` with the handler registered for `channel`'s type.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::NotFound`] (with an errored status) when no
    /// handler serves the channel type, and otherwise whatever the handler
    /// returns.
    pub async fn send_msg(
        &self,
        channel: &Channel,
        msg: &OutboundMessage,
    ) -> Result<DeliveryStatus, DeliveryError> {
        let Some(handler) = self.get(&channel.channel_type) else {
            warn!(channel_type = %channel.channel_type, "no handler registered");
            return Err(DeliveryError::new(
                DeliveryStatus::new(channel.uuid, msg.id, MsgState::Errored),
                HandlerError::NotFound(channel.channel_type.to_string()),
            ));
        };
        handler.send_msg(channel, msg).await
    }

    /// Translate an inbound form body with the handler registered for
    /// `channel`'s type.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::NotFound`] when no handler serves the channel
    /// type, and otherwise whatever the handler returns.
    pub fn receive(
        &self,
        channel: &Channel,
        form_body: &str,
    ) -> Result<Vec<IncomingMsg>, HandlerError> {
        let handler = self
            .get(&channel.channel_type)
            .ok_or_else(|| HandlerError::NotFound(channel.channel_type.to_string()))?;
        handler.receive(channel, form_body)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use smsgate_core::{ChannelUuid, MsgId, Urn};

    use super::*;
    use crate::handler::ChannelHandler;

    struct StubHandler {
        channel_type: ChannelType,
    }

    impl StubHandler {
        fn new(code: &str) -> Self {
            Self {
                channel_type: ChannelType::from(code),
            }
        }
    }

    impl ChannelHandler for StubHandler {
        fn channel_type(&self) -> &ChannelType {
            &self.channel_type
        }

        fn name(&self) -> &str {
            "stub"
        }

        async fn send_msg(
            &self,
            channel: &Channel,
            msg: &OutboundMessage,
        ) -> Result<DeliveryStatus, DeliveryError> {
            Ok(DeliveryStatus::new(channel.uuid, msg.id, MsgState::Wired)
                .with_external_id(format!("{}-{}", self.channel_type, msg.id)))
        }

        fn receive(
            &self,
            _channel: &Channel,
            _form_body: &str,
        ) -> Result<Vec<IncomingMsg>, HandlerError> {
            Err(HandlerError::Validation("stub rejects everything".into()))
        }
    }

    fn message(channel: &Channel) -> OutboundMessage {
        OutboundMessage::new(
            MsgId::new(10),
            channel.uuid,
            Urn::tel("+252634101111").unwrap(),
            "hello",
        )
    }

    #[test]
    fn empty_registry() {
        let reg = HandlerRegistry::default();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
        assert!(reg.list().is_empty());
    }

    #[test]
    fn register_get_and_list() {
        let mut reg = HandlerRegistry::new();
        reg.register(Arc::new(StubHandler::new("TW")));
        reg.register(Arc::new(StubHandler::new("HM")));
        reg.register(Arc::new(StubHandler::new("HM")));

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.list(), vec!["HM", "TW"]);
        assert!(reg.get(&ChannelType::from("HM")).is_some());
        assert!(reg.get(&ChannelType::from("XX")).is_none());
    }

    #[tokio::test]
    async fn send_dispatches_on_channel_type() {
        let mut reg = HandlerRegistry::new();
        reg.register(Arc::new(StubHandler::new("HM")));

        let channel = Channel::new(ChannelUuid::new_v4(), "HM", "SO", "2020");
        let status = reg.send_msg(&channel, &message(&channel)).await.unwrap();
        assert_eq!(status.state, MsgState::Wired);
        assert_eq!(status.external_id.as_deref(), Some("HM-10"));
    }

    #[tokio::test]
    async fn send_to_unknown_type_is_not_found() {
        let reg = HandlerRegistry::new();
        let channel = Channel::new(ChannelUuid::new_v4(), "XX", "SO", "2020");

        let err = reg.send_msg(&channel, &message(&channel)).await.unwrap_err();
        assert!(matches!(err.source, HandlerError::NotFound(ref t) if t == "XX"));
        assert_eq!(err.status.state, MsgState::Errored);
        assert!(err.status.logs.is_empty());
    }

    #[test]
    fn receive_dispatches_and_reports_unknown_type() {
        let mut reg = HandlerRegistry::new();
        reg.register(Arc::new(StubHandler::new("HM")));

        let hm = Channel::new(ChannelUuid::new_v4(), "HM", "SO", "2020");
        assert!(matches!(
            reg.receive(&hm, ""),
            Err(HandlerError::Validation(_))
        ));

        let xx = Channel::new(ChannelUuid::new_v4(), "XX", "SO", "2020");
        assert!(matches!(reg.receive(&xx, ""), Err(HandlerError::NotFound(_))));
    }
}
