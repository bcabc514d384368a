use std::sync::Arc;

use super::controls::NavigationEvent;
use super::render::{RenderedPage, render};
use super::store::SessionStore;
use super::transport::Transport;
use crate::error::PaginationError;

/// Turns button presses into page changes.
///
/// Holds no state of its own; each event is one pass of
/// lookup → authorize → step → render against the store.
pub struct InteractionRouter {
    store: Arc<SessionStore>,
}

impl InteractionRouter {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Apply `event` and return the page to show.
    pub fn navigate(&self, event: &NavigationEvent) -> Result<RenderedPage, PaginationError> {
        let id = &event.session_id;
        let state = self
            .store
            .get(id)
            .ok_or_else(|| PaginationError::SessionNotFound(id.clone()))?;

        if state.meta().requester_id != event.actor_id {
            return Err(PaginationError::Unauthorized {
                session: id.clone(),
                actor: event.actor_id.clone(),
            });
        }

        // The sweep may have run between the lookup and here.
        let updated = self
            .store
            .update_page_index(id, event.direction.delta())
            .ok_or_else(|| PaginationError::SessionNotFound(id.clone()))?;

        render(&updated, updated.page_index())
    }

    /// Apply `event` and answer through `transport`: the updated page on
    /// success, a notice otherwise.
    pub async fn handle(
        &self,
        event: &NavigationEvent,
        transport: &dyn Transport,
    ) -> anyhow::Result<()> {
        match self.navigate(event) {
            Ok(page) => transport.edit_page(&event.session_id, &page).await,
            Err(err) => {
                if err.is_defect() {
                    tracing::error!(session = %event.session_id, "navigation failed: {err}");
                } else {
                    tracing::debug!(session = %event.session_id, "navigation refused: {err}");
                }
                transport.send_notice(err.user_notice()).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::controls::Direction;
    use crate::pagination::id::SessionId;
    use crate::pagination::section::Section;
    use crate::pagination::state::PagingState;
    use crate::pagination::state::fixtures::{meta, state};
    use crate::pagination::transport::recording::{RecordingTransport, Sent};
    use std::time::Duration;

    fn setup() -> (Arc<SessionStore>, InteractionRouter) {
        let store = Arc::new(SessionStore::with_timing(
            Duration::from_secs(300),
            Duration::from_secs(60),
        ));
        let router = InteractionRouter::new(Arc::clone(&store));
        (store, router)
    }

    fn press(session: &str, direction: Direction, actor: &str) -> NavigationEvent {
        NavigationEvent {
            session_id: SessionId::from(session),
            direction,
            actor_id: actor.into(),
        }
    }

    #[tokio::test]
    async fn next_and_prev_walk_the_pages() {
        let (store, router) = setup();
        store.put(SessionId::from("s"), state(12, 5)).unwrap();

        let walk = [
            (Direction::Next, 1),
            (Direction::Next, 2),
            (Direction::Next, 2),
            (Direction::Prev, 1),
        ];
        for (direction, expected) in walk {
            let page = router.navigate(&press("s", direction, "requester")).unwrap();
            assert_eq!(page.page_index, expected);
        }
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (store, router) = setup();
        let err = router
            .navigate(&press("ghost", Direction::Next, "requester"))
            .unwrap_err();
        assert_eq!(err, PaginationError::SessionNotFound(SessionId::from("ghost")));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn foreign_actor_is_refused_without_mutation() {
        let (store, router) = setup();
        store.put(SessionId::from("s"), state(12, 5)).unwrap();

        let err = router
            .navigate(&press("s", Direction::Next, "intruder"))
            .unwrap_err();
        assert!(matches!(err, PaginationError::Unauthorized { .. }));
        assert_eq!(store.get(&SessionId::from("s")).unwrap().page_index(), 0);
    }

    #[tokio::test]
    async fn malformed_state_is_a_render_defect() {
        let (store, router) = setup();
        let empty = PagingState::new(Vec::<Section>::new(), 5, meta("requester"));
        store.put(SessionId::from("s"), empty).unwrap();

        let err = router
            .navigate(&press("s", Direction::Next, "requester"))
            .unwrap_err();
        assert!(matches!(err, PaginationError::RenderDefect(_)));
    }

    #[tokio::test]
    async fn handle_edits_message_on_success() {
        let (store, router) = setup();
        store.put(SessionId::from("s"), state(12, 5)).unwrap();
        let transport = RecordingTransport::default();

        router
            .handle(&press("s", Direction::Next, "requester"), &transport)
            .await
            .unwrap();
        assert_eq!(
            transport.take(),
            vec![Sent::Edit {
                session: SessionId::from("s"),
                page_index: 1
            }]
        );
    }

    #[tokio::test]
    async fn handle_sends_notices_on_refusal() {
        let (store, router) = setup();
        store.put(SessionId::from("s"), state(12, 5)).unwrap();
        let transport = RecordingTransport::default();

        router
            .handle(&press("gone", Direction::Next, "requester"), &transport)
            .await
            .unwrap();
        router
            .handle(&press("s", Direction::Next, "intruder"), &transport)
            .await
            .unwrap();

        let sent = transport.take();
        assert_eq!(sent.len(), 2);
        let expired = PaginationError::SessionNotFound(SessionId::from("gone"));
        assert_eq!(sent[0], Sent::Notice(expired.user_notice().to_string()));
        assert!(matches!(&sent[1], Sent::Notice(text) if text.contains("Only the person")));
    }
}
