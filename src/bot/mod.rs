//! The course bot: answers `/fetch_course`, its autocomplete, and the page
//! buttons on the messages it sends.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::catalog::{CourseDirectory, MAX_SUGGESTIONS, READ_FAILURE_NOTICE, not_found_notice};
use crate::config::{CatalogConfig, Config};
use crate::error::CatalogError;
use crate::pagination::{
    IdGenerator, InitialResponder, InteractionRouter, NavigationEvent, RandomIds, SessionStore,
    Transport,
};
use crate::transport::discord::{
    AutocompleteRequest, COURSE_CODE_OPTION, CommandInvocation, ComponentPress, FETCH_COURSE,
    Interaction, InteractionCallbackType, InteractionHandler, InteractionReply,
    autocomplete_choices,
};

const UNKNOWN_COMMAND_NOTICE: &str = "Unknown command.";
const MISSING_CODE_NOTICE: &str = "Please provide a course code.";
const GENERIC_FAILURE_NOTICE: &str = "Something went wrong while handling this request.";

pub struct CourseBot {
    catalog: CourseDirectory,
    catalog_config: CatalogConfig,
    page_size: usize,
    responder: InitialResponder,
    router: InteractionRouter,
}

impl CourseBot {
    pub fn new(config: &Config, store: Arc<SessionStore>) -> Self {
        Self::with_ids(config, store, Arc::new(RandomIds))
    }

    pub fn with_ids(config: &Config, store: Arc<SessionStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            catalog: CourseDirectory::new(&config.catalog.dir),
            catalog_config: config.catalog.clone(),
            page_size: config.pagination.page_size,
            responder: InitialResponder::new(Arc::clone(&store), ids),
            router: InteractionRouter::new(store),
        }
    }

    async fn on_command(&self, command: &CommandInvocation, reply: &InteractionReply) -> Result<()> {
        if command.name != FETCH_COURSE {
            tracing::debug!(command = %command.name, "ignoring unknown command");
            return reply.send_notice(UNKNOWN_COMMAND_NOTICE).await;
        }
        let Some(code) = command
            .option(COURSE_CODE_OPTION)
            .map(str::trim)
            .filter(|code| !code.is_empty())
        else {
            return reply.send_notice(MISSING_CODE_NOTICE).await;
        };

        match self.catalog.load(code) {
            Ok(Some(course)) => {
                let url = self.catalog_config.course_url(&course.course_number);
                let state = course.paging_state(code, &command.user_id, self.page_size, &url);
                self.responder.respond(state, reply).await
            }
            Ok(None) | Err(CatalogError::InvalidCourseNumber(_)) => {
                tracing::debug!(code, "course not in catalog");
                reply.send_notice(&not_found_notice(code)).await
            }
            Err(e) => {
                tracing::error!(code, "cannot read course record: {e}");
                reply.send_notice(READ_FAILURE_NOTICE).await
            }
        }
    }

    fn on_autocomplete(&self, request: &AutocompleteRequest, reply: &InteractionReply) -> Result<()> {
        let prefix = request
            .focused
            .as_ref()
            .map_or("", |option| option.value.as_str());
        let suggestions = self
            .catalog
            .suggest(prefix, MAX_SUGGESTIONS)
            .unwrap_or_else(|e| {
                tracing::warn!("cannot list courses for autocomplete: {e}");
                Vec::new()
            });
        reply.autocomplete(autocomplete_choices(
            suggestions.into_iter().map(|s| (s.label, s.number)),
        ))
    }

    async fn on_component(&self, press: &ComponentPress, reply: &InteractionReply) -> Result<()> {
        match NavigationEvent::decode(&press.custom_id, press.user_id.as_str()) {
            Some(event) => self.router.handle(&event, reply).await,
            None => {
                tracing::debug!(custom_id = %press.custom_id, "ignoring foreign component");
                reply.acknowledge(InteractionCallbackType::DeferredUpdateMessage)
            }
        }
    }

    /// Answer `interaction`, returning the callback body for Discord.
    pub async fn respond(&self, interaction: Interaction) -> Option<Value> {
        let reply = InteractionReply::new();
        let result = match &interaction {
            Interaction::Command(command) => self.on_command(command, &reply).await,
            Interaction::Autocomplete(request) => self.on_autocomplete(request, &reply),
            Interaction::Component(press) => self.on_component(press, &reply).await,
            Interaction::Ping | Interaction::Unsupported(_) => {
                tracing::debug!(?interaction, "ignoring interaction");
                return None;
            }
        };

        if let Err(e) = result {
            tracing::warn!("interaction handling failed: {e:#}");
        }
        if !reply.is_answered()
            && let Err(e) = reply.send_notice(GENERIC_FAILURE_NOTICE).await
        {
            tracing::warn!("cannot answer interaction: {e:#}");
        }
        reply.into_response()
    }
}

impl InteractionHandler for CourseBot {
    fn handle<'a>(
        &'a self,
        interaction: Interaction,
    ) -> Pin<Box<dyn Future<Output = Option<Value>> + Send + 'a>> {
        Box::pin(self.respond(interaction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::course::fixtures::algorithms;
    use crate::transport::discord::CommandOption;
    use std::time::Duration;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Arc<SessionStore>, CourseBot) {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.catalog.dir = tmp.path().to_path_buf();
        CourseDirectory::new(tmp.path()).save(&algorithms()).unwrap();

        let store = Arc::new(SessionStore::with_timing(
            Duration::from_secs(300),
            Duration::from_secs(60),
        ));
        let bot = CourseBot::new(&config, Arc::clone(&store));
        (tmp, store, bot)
    }

    fn fetch(code: &str, user: &str) -> Interaction {
        Interaction::Command(CommandInvocation {
            name: FETCH_COURSE.into(),
            options: vec![CommandOption {
                name: COURSE_CODE_OPTION.into(),
                value: code.into(),
                focused: false,
            }],
            user_id: user.into(),
        })
    }

    fn press(custom_id: &str, user: &str) -> Interaction {
        Interaction::Component(ComponentPress {
            custom_id: custom_id.into(),
            user_id: user.into(),
        })
    }

    fn next_button(response: &Value) -> String {
        response["data"]["components"][0]["components"][1]["custom_id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn fetch_course_opens_a_session() {
        let (_tmp, store, bot) = setup();

        let response = bot.respond(fetch("02105", "u1")).await.unwrap();
        assert_eq!(response["type"], 4);
        let embed = &response["data"]["embeds"][0];
        assert_eq!(
            embed["title"],
            "Fetched course: 02105 - Algoritmer og datastrukturer"
        );
        assert!(
            embed["footer"]["text"]
                .as_str()
                .unwrap()
                .starts_with("Fetched from https://kurser.dtu.dk/course/02105")
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn next_button_updates_the_message() {
        let (_tmp, _store, bot) = setup();
        let first = bot.respond(fetch("02105", "u1")).await.unwrap();

        let response = bot.respond(press(&next_button(&first), "u1")).await.unwrap();
        assert_eq!(response["type"], 7);
        assert!(
            response["data"]["embeds"][0]["footer"]["text"]
                .as_str()
                .unwrap()
                .contains("Page 2 of")
        );
    }

    #[tokio::test]
    async fn other_users_get_a_notice() {
        let (_tmp, _store, bot) = setup();
        let first = bot.respond(fetch("02105", "u1")).await.unwrap();

        let response = bot.respond(press(&next_button(&first), "u2")).await.unwrap();
        assert_eq!(response["type"], 4);
        assert_eq!(response["data"]["flags"], 64);
    }

    #[tokio::test]
    async fn unknown_course_gets_not_found_notice() {
        let (_tmp, store, bot) = setup();

        for code in ["99999", "../etc"] {
            let response = bot.respond(fetch(code, "u1")).await.unwrap();
            assert_eq!(
                response["data"]["content"],
                format!("No course found for ID: {code}")
            );
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn malformed_record_gets_read_failure_notice() {
        let (tmp, store, bot) = setup();
        std::fs::write(tmp.path().join("01005.json"), "{not json").unwrap();

        let response = bot.respond(fetch("01005", "u1")).await.unwrap();
        assert_eq!(response["data"]["content"], READ_FAILURE_NOTICE);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn missing_option_and_unknown_command() {
        let (_tmp, _store, bot) = setup();

        let bare = Interaction::Command(CommandInvocation {
            name: FETCH_COURSE.into(),
            options: Vec::new(),
            user_id: "u1".into(),
        });
        let response = bot.respond(bare).await.unwrap();
        assert_eq!(response["data"]["content"], MISSING_CODE_NOTICE);

        let other = Interaction::Command(CommandInvocation {
            name: "roll".into(),
            options: Vec::new(),
            user_id: "u1".into(),
        });
        let response = bot.respond(other).await.unwrap();
        assert_eq!(response["data"]["content"], UNKNOWN_COMMAND_NOTICE);
    }

    #[tokio::test]
    async fn autocomplete_suggests_stored_courses() {
        let (_tmp, _store, bot) = setup();

        let request = Interaction::Autocomplete(AutocompleteRequest {
            command: FETCH_COURSE.into(),
            focused: Some(CommandOption {
                name: COURSE_CODE_OPTION.into(),
                value: "021".into(),
                focused: true,
            }),
        });
        let response = bot.respond(request).await.unwrap();
        assert_eq!(response["type"], 8);
        let choices = response["data"]["choices"].as_array().unwrap();
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0]["value"], "02105");
    }

    #[tokio::test]
    async fn foreign_components_are_acknowledged_silently() {
        let (_tmp, _store, bot) = setup();

        let response = bot.respond(press("poll:vote:1", "u1")).await.unwrap();
        assert_eq!(response, serde_json::json!({ "type": 6 }));
    }

    #[tokio::test]
    async fn unsupported_interactions_are_ignored() {
        let (_tmp, _store, bot) = setup();
        assert!(bot.respond(Interaction::Unsupported(5)).await.is_none());
    }
}
