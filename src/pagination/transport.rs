use std::future::Future;
use std::pin::Pin;

use super::id::SessionId;
use super::render::RenderedPage;

/// The two messaging capabilities the pager needs from a chat platform.
///
/// One value is bound to a single inbound request; it already knows which
/// conversation and message a reply belongs to.
pub trait Transport: Send + Sync {
    /// Reply to the triggering request with `page`, wiring its navigation
    /// controls to `session`.
    fn send_page<'a>(
        &'a self,
        session: &'a SessionId,
        page: &'a RenderedPage,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

    /// Replace the message the triggering control belongs to.
    fn edit_page<'a>(
        &'a self,
        session: &'a SessionId,
        page: &'a RenderedPage,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

    /// Short text visible only to the triggering user.
    fn send_notice<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Sent {
        Page {
            session: SessionId,
            page_index: usize,
        },
        Edit {
            session: SessionId,
            page_index: usize,
        },
        Notice(String),
    }

    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        pub(crate) sent: Mutex<Vec<Sent>>,
    }

    impl RecordingTransport {
        pub(crate) fn take(&self) -> Vec<Sent> {
            std::mem::take(&mut *self.sent.lock().unwrap())
        }
    }

    impl Transport for RecordingTransport {
        fn send_page<'a>(
            &'a self,
            session: &'a SessionId,
            page: &'a RenderedPage,
        ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
            Box::pin(async move {
                self.sent.lock().unwrap().push(Sent::Page {
                    session: session.clone(),
                    page_index: page.page_index,
                });
                Ok(())
            })
        }

        fn edit_page<'a>(
            &'a self,
            session: &'a SessionId,
            page: &'a RenderedPage,
        ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
            Box::pin(async move {
                self.sent.lock().unwrap().push(Sent::Edit {
                    session: session.clone(),
                    page_index: page.page_index,
                });
                Ok(())
            })
        }

        fn send_notice<'a>(
            &'a self,
            text: &'a str,
        ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
            Box::pin(async move {
                self.sent.lock().unwrap().push(Sent::Notice(text.to_string()));
                Ok(())
            })
        }
    }
}
