use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};

use serde_json::{Value, json};

use super::message::{notice_message, page_message};
use super::types::InteractionCallbackType;
use crate::pagination::{RenderedPage, SessionId, Transport};

/// Collects the single callback an HTTP interaction may answer with.
///
/// Discord takes the response as the body of the interaction request, so
/// "sending" here only records it; the endpoint writes it out once the
/// handler returns.
#[derive(Debug, Default)]
pub struct InteractionReply {
    response: Mutex<Option<Value>>,
}

impl InteractionReply {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self, response: Value) -> anyhow::Result<()> {
        let mut slot = self.response.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            anyhow::bail!("interaction already answered");
        }
        *slot = Some(response);
        Ok(())
    }

    fn set(&self, kind: InteractionCallbackType, data: Value) -> anyhow::Result<()> {
        self.store(json!({ "type": kind as u8, "data": data }))
    }

    /// Answer with a bare callback type and no data.
    pub fn acknowledge(&self, kind: InteractionCallbackType) -> anyhow::Result<()> {
        self.store(json!({ "type": kind as u8 }))
    }

    /// Answer an autocomplete request.
    pub fn autocomplete(&self, choices: Value) -> anyhow::Result<()> {
        self.set(InteractionCallbackType::AutocompleteResult, choices)
    }

    pub fn is_answered(&self) -> bool {
        self.response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The recorded callback, if any.
    pub fn into_response(self) -> Option<Value> {
        self.response
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for InteractionReply {
    fn send_page<'a>(
        &'a self,
        session: &'a SessionId,
        page: &'a RenderedPage,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.set(
                InteractionCallbackType::ChannelMessageWithSource,
                page_message(session, page),
            )
        })
    }

    fn edit_page<'a>(
        &'a self,
        session: &'a SessionId,
        page: &'a RenderedPage,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.set(
                InteractionCallbackType::UpdateMessage,
                page_message(session, page),
            )
        })
    }

    fn send_notice<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.set(
                InteractionCallbackType::ChannelMessageWithSource,
                notice_message(text),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::RenderedField;
    use chrono::{DateTime, Utc};

    fn page() -> RenderedPage {
        RenderedPage {
            title: "t".into(),
            description: String::new(),
            footer: "f".into(),
            color: 1,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            fields: vec![RenderedField {
                name: "n".into(),
                value: "v".into(),
                inline: false,
            }],
            page_index: 1,
            page_count: 2,
            has_prev: true,
            has_next: false,
        }
    }

    #[tokio::test]
    async fn send_page_is_a_new_message() {
        let reply = InteractionReply::new();
        reply.send_page(&SessionId::from("s"), &page()).await.unwrap();

        let response = reply.into_response().unwrap();
        assert_eq!(response["type"], 4);
        assert_eq!(response["data"]["embeds"][0]["title"], "t");
    }

    #[tokio::test]
    async fn edit_page_updates_in_place() {
        let reply = InteractionReply::new();
        reply.edit_page(&SessionId::from("s"), &page()).await.unwrap();

        let response = reply.into_response().unwrap();
        assert_eq!(response["type"], 7);
        assert_eq!(
            response["data"]["components"][0]["components"][1]["disabled"],
            true
        );
    }

    #[tokio::test]
    async fn notice_is_ephemeral_message() {
        let reply = InteractionReply::new();
        reply.send_notice("expired").await.unwrap();

        let response = reply.into_response().unwrap();
        assert_eq!(response["type"], 4);
        assert_eq!(response["data"]["content"], "expired");
        assert_eq!(response["data"]["flags"], 64);
    }

    #[tokio::test]
    async fn only_one_answer_is_accepted() {
        let reply = InteractionReply::new();
        reply.send_notice("first").await.unwrap();
        assert!(reply.send_notice("second").await.is_err());
        assert!(reply.acknowledge(InteractionCallbackType::DeferredUpdateMessage).is_err());
        assert!(reply.is_answered());

        assert_eq!(reply.into_response().unwrap()["data"]["content"], "first");
    }

    #[test]
    fn unanswered_reply_has_no_response() {
        assert!(InteractionReply::new().into_response().is_none());
    }
}
