use std::sync::Arc;

use super::id::{IdGenerator, SessionId};
use super::render::{RenderedPage, render};
use super::state::PagingState;
use super::store::SessionStore;
use super::transport::Transport;
use crate::error::PaginationError;

/// Fresh ids tried before giving up: the first draw plus one retry.
const MAX_ID_ATTEMPTS: usize = 2;

/// Registers freshly produced content as a session and sends its first page.
pub struct InitialResponder {
    store: Arc<SessionStore>,
    ids: Arc<dyn IdGenerator>,
}

impl InitialResponder {
    pub fn new(store: Arc<SessionStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Store `state` under a new id and render its first page.
    ///
    /// The page is rendered before anything is stored, so a malformed state
    /// never leaves a session behind.
    pub fn open(
        &self,
        state: PagingState,
    ) -> Result<(SessionId, RenderedPage), PaginationError> {
        let page = render(&state, 0)?;

        let mut last_err = None;
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.generate();
            match self.store.put(id.clone(), state.clone()) {
                Ok(()) => return Ok((id, page)),
                Err(err) => {
                    tracing::warn!("regenerating paging session id: {err}");
                    last_err = Some(err);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| {
            PaginationError::RenderDefect("no session id could be allocated".into())
        }))
    }

    /// Open a session for `state` and reply with page 0 through `transport`.
    pub async fn respond(
        &self,
        state: PagingState,
        transport: &dyn Transport,
    ) -> anyhow::Result<()> {
        match self.open(state) {
            Ok((id, page)) => {
                tracing::debug!(session = %id, pages = page.page_count, "opened paging session");
                if let Err(e) = transport.send_page(&id, &page).await {
                    self.store.remove(&id);
                    return Err(e);
                }
                Ok(())
            }
            Err(err) => {
                tracing::error!("could not open paging session: {err}");
                transport.send_notice(err.user_notice()).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::id::RandomIds;
    use crate::pagination::section::Section;
    use crate::pagination::state::fixtures::{meta, state};
    use crate::pagination::transport::recording::{RecordingTransport, Sent};
    use std::sync::Mutex;
    use std::time::Duration;

    struct ScriptedIds(Mutex<Vec<&'static str>>);

    impl IdGenerator for ScriptedIds {
        fn generate(&self) -> SessionId {
            SessionId::from(self.0.lock().unwrap().remove(0))
        }
    }

    fn store() -> Arc<SessionStore> {
        Arc::new(SessionStore::with_timing(
            Duration::from_secs(300),
            Duration::from_secs(60),
        ))
    }

    #[tokio::test]
    async fn open_stores_session_and_renders_first_page() {
        let store = store();
        let responder = InitialResponder::new(Arc::clone(&store), Arc::new(RandomIds));

        let (id, page) = responder.open(state(12, 5)).unwrap();
        assert_eq!(page.page_index, 0);
        assert_eq!(page.page_count, 3);
        assert!(!page.has_prev);
        assert!(page.has_next);
        assert_eq!(store.get(&id).unwrap().page_index(), 0);
    }

    #[tokio::test]
    async fn collision_is_retried_with_a_fresh_id() {
        let store = store();
        store.put(SessionId::from("taken"), state(2, 5)).unwrap();
        let ids = ScriptedIds(Mutex::new(vec!["taken", "free"]));
        let responder = InitialResponder::new(Arc::clone(&store), Arc::new(ids));

        let (id, _) = responder.open(state(12, 5)).unwrap();
        assert_eq!(id, SessionId::from("free"));
        assert_eq!(store.get(&SessionId::from("taken")).unwrap().sections().len(), 2);
    }

    #[tokio::test]
    async fn repeated_collisions_surface_as_internal_error() {
        let store = store();
        store.put(SessionId::from("taken"), state(2, 5)).unwrap();
        let ids = ScriptedIds(Mutex::new(vec!["taken", "taken"]));
        let responder = InitialResponder::new(Arc::clone(&store), Arc::new(ids));

        let err = responder.open(state(12, 5)).unwrap_err();
        assert_eq!(err, PaginationError::IdCollision(SessionId::from("taken")));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn malformed_state_leaves_no_session() {
        let store = store();
        let responder = InitialResponder::new(Arc::clone(&store), Arc::new(RandomIds));
        let transport = RecordingTransport::default();

        let empty = PagingState::new(Vec::<Section>::new(), 5, meta("requester"));
        responder.respond(empty, &transport).await.unwrap();

        assert!(store.is_empty());
        assert!(matches!(&transport.take()[..], [Sent::Notice(_)]));
    }

    #[tokio::test]
    async fn respond_sends_page_zero() {
        let store = store();
        let responder = InitialResponder::new(Arc::clone(&store), Arc::new(RandomIds));
        let transport = RecordingTransport::default();

        responder.respond(state(7, 5), &transport).await.unwrap();

        let sent = transport.take();
        let [Sent::Page { session, page_index }] = &sent[..] else {
            panic!("expected a single page, got {sent:?}");
        };
        assert_eq!(*page_index, 0);
        assert!(store.contains(session));
    }
}
