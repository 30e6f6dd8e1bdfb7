//! Skill request dispatch.
//!
//! [`SkillHandler`] turns a [`SkillRequest`] into a [`SkillResponse`]:
//!
//! | Request                                   | Response                         |
//! |-------------------------------------------|----------------------------------|
//! | `LaunchRequest`, help, navigate home      | welcome text, session stays open |
//! | `SessionEndedRequest`                     | "Goodbye."                       |
//! | `next_event` intent                       | SSML for the next event          |
//! | anything else                             | [`SkillError`]                   |

use std::sync::Arc;

use nextevent_core::{CalendarType, CivilZone, Clock, SystemClock};
use nextevent_providers::{CalendarService, FeedFetcher};
use tracing::{debug, info, instrument, warn};

use crate::envelope::{Intent, Request, SkillRequest, SkillResponse};
use crate::error::{SkillError, SkillResult};
use crate::resolve::{CALENDAR_NAME_SLOT, resolve_calendar};
use crate::ssml::{DEFAULT_CALENDAR_NAME, render_next_event};

/// Intent asking for the next event of a calendar.
pub const NEXT_EVENT_INTENT: &str = "next_event";
/// Built-in help intent.
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
/// Built-in navigate home intent.
pub const NAVIGATE_HOME_INTENT: &str = "AMAZON.NavigateHomeIntent";

pub const WELCOME_TEXT: &str = "Welcome! I can tell you the events that are coming up on the City of Plano Calendar. Just say, when is the next meeting?";
pub const GOODBYE_TEXT: &str = "Goodbye.";
pub const UNKNOWN_CALENDAR_TEXT: &str =
    "I'm sorry. I wasn't able to understand that calendar name.";

/// Text spoken when a calendar has nothing coming up.
pub fn no_future_entries_text(calendar_name: Option<&str>) -> String {
    format!(
        "I'm sorry. I couldn't find any future calendar entries in the {} calendar.",
        calendar_name.unwrap_or(DEFAULT_CALENDAR_NAME)
    )
}

/// Answers skill requests from a calendar service and a clock.
pub struct SkillHandler<F> {
    service: CalendarService<F>,
    clock: Arc<dyn Clock>,
    zone: CivilZone,
}

impl<F: FeedFetcher> SkillHandler<F> {
    /// Creates a handler reading the system clock in the default zone.
    pub fn new(service: CalendarService<F>) -> Self {
        Self {
            service,
            clock: Arc::new(SystemClock),
            zone: CivilZone::default(),
        }
    }

    /// Builder method to replace the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builder method to set the civil zone used for "now" and "today".
    pub fn with_zone(mut self, zone: CivilZone) -> Self {
        self.zone = zone;
        self
    }

    /// Handles one request.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::UnsupportedRequest`] for request types and
    /// [`SkillError::UnsupportedIntent`] for intents the skill does not know.
    /// Calendar failures are answered with speech, not errors.
    #[instrument(skip_all, fields(request = request.request.kind()))]
    pub async fn handle(&self, request: &SkillRequest) -> SkillResult<SkillResponse> {
        match &request.request {
            Request::LaunchRequest => Ok(welcome()),
            Request::IntentRequest { intent } => self.handle_intent(intent).await,
            Request::SessionEndedRequest { reason } => {
                debug!(reason = ?reason, "Session ended");
                Ok(SkillResponse::tell_text(GOODBYE_TEXT).with_end_session(true))
            }
            Request::Unknown => Err(SkillError::UnsupportedRequest),
        }
    }

    async fn handle_intent(&self, intent: &Intent) -> SkillResult<SkillResponse> {
        match intent.name.as_str() {
            NEXT_EVENT_INTENT => Ok(self.handle_next_event(intent).await),
            HELP_INTENT | NAVIGATE_HOME_INTENT => Ok(welcome()),
            other => Err(SkillError::UnsupportedIntent(other.to_string())),
        }
    }

    async fn handle_next_event(&self, intent: &Intent) -> SkillResponse {
        let calendar_type = resolve_calendar(intent.slot(CALENDAR_NAME_SLOT));
        if calendar_type == CalendarType::None {
            info!("Could not resolve calendar name");
            return SkillResponse::tell_text(UNKNOWN_CALENDAR_TEXT);
        }

        let instant = self.clock.now();
        let now = self.zone.localize(instant);
        let today = self.zone.today(instant);

        let calendar = match self.service.get_calendar(calendar_type).await {
            Ok(calendar) => calendar,
            Err(e) => {
                warn!(calendar = %calendar_type, error = %e, "Failed to load calendar");
                return SkillResponse::tell_text(UNKNOWN_CALENDAR_TEXT);
            }
        };

        match calendar.next_entry(now) {
            Some(entry) => {
                let ssml = render_next_event(calendar.name(), entry, today);
                debug!(ssml = %ssml, "Created response SSML");
                SkillResponse::tell_ssml(ssml)
            }
            None => {
                info!(calendar = %calendar_type, "No future calendar entries");
                SkillResponse::tell_text(no_future_entries_text(calendar.name()))
            }
        }
    }
}

fn welcome() -> SkillResponse {
    SkillResponse::tell_text(WELCOME_TEXT).with_end_session(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{OutputSpeech, ResolutionAuthority, Slot};
    use chrono::NaiveDate;
    use nextevent_core::FixedClock;
    use nextevent_providers::{ErrorFetcher, ProviderError, StaticFetcher};

    const FEED: &str = r#"<rss version="2.0" xmlns:calendarEvent="http://www.plano.gov/Calendar.aspx">
  <channel>
    <title>Plano, TX - Calendar - Boards</title>
    <item>
      <title>Board of Adjustment</title>
      <calendarEvent:EventDates>February 25, 2019</calendarEvent:EventDates>
      <calendarEvent:EventTimes>08:00 PM - 09:00 PM</calendarEvent:EventTimes>
    </item>
  </channel>
</rss>"#;

    fn handler<F: FeedFetcher>(fetcher: F) -> SkillHandler<F> {
        let zone = CivilZone::default();
        let now = NaiveDate::from_ymd_opt(2019, 2, 25)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        let clock = FixedClock::at_civil(zone, now).unwrap();

        SkillHandler::new(CalendarService::new(fetcher))
            .with_clock(Arc::new(clock))
            .with_zone(zone)
    }

    fn request(request: Request) -> SkillRequest {
        SkillRequest {
            version: "1.0".to_string(),
            session: None,
            request,
        }
    }

    fn next_event(slot: Slot) -> SkillRequest {
        request(Request::IntentRequest {
            intent: Intent::new(NEXT_EVENT_INTENT).with_slot(slot),
        })
    }

    #[tokio::test]
    async fn launch_welcomes_and_keeps_session() {
        let response = handler(StaticFetcher::new())
            .handle(&request(Request::LaunchRequest))
            .await
            .unwrap();

        assert_eq!(response.speech(), Some(WELCOME_TEXT));
        assert!(!response.ends_session());
    }

    #[tokio::test]
    async fn help_and_navigate_home_welcome() {
        let handler = handler(StaticFetcher::new());
        for name in [HELP_INTENT, NAVIGATE_HOME_INTENT] {
            let response = handler
                .handle(&request(Request::IntentRequest {
                    intent: Intent::new(name),
                }))
                .await
                .unwrap();
            assert_eq!(response.speech(), Some(WELCOME_TEXT));
            assert_eq!(response.response.should_end_session, Some(false));
        }
    }

    #[tokio::test]
    async fn session_ended_says_goodbye() {
        let response = handler(StaticFetcher::new())
            .handle(&request(Request::SessionEndedRequest { reason: None }))
            .await
            .unwrap();

        assert_eq!(response.speech(), Some(GOODBYE_TEXT));
        assert!(response.ends_session());
    }

    #[tokio::test]
    async fn next_event_speaks_ssml() {
        let response = handler(StaticFetcher::always(FEED))
            .handle(&next_event(Slot::new(CALENDAR_NAME_SLOT, Some("meetings"))))
            .await
            .unwrap();

        let Some(OutputSpeech::Ssml { ssml }) = &response.response.output_speech else {
            panic!("expected SSML speech");
        };
        insta::assert_snapshot!(ssml, @r#"<speak><s>The next event in the Boards calendar is titled: "Board of Adjustment".</s> <s>It starts at <say-as interpret-as="time">08:00 PM</say-as> today.</s> <s>It lasts until <say-as interpret-as="time">09:00 PM</say-as>.</s></speak>"#);
        assert!(response.ends_session());
    }

    #[tokio::test]
    async fn resolved_synonym_is_used() {
        let slot = Slot::new(CALENDAR_NAME_SLOT, Some("council"))
            .with_resolution(ResolutionAuthority::new("ER_SUCCESS_MATCH", &["Meetings"]));

        let response = handler(StaticFetcher::always(FEED))
            .handle(&next_event(slot))
            .await
            .unwrap();

        assert!(matches!(
            response.response.output_speech,
            Some(OutputSpeech::Ssml { .. })
        ));
    }

    #[tokio::test]
    async fn unknown_calendar_name() {
        let response = handler(StaticFetcher::always(FEED))
            .handle(&next_event(Slot::new(CALENDAR_NAME_SLOT, Some("parks"))))
            .await
            .unwrap();

        assert_eq!(response.speech(), Some(UNKNOWN_CALENDAR_TEXT));
    }

    #[tokio::test]
    async fn missing_slot() {
        let response = handler(StaticFetcher::always(FEED))
            .handle(&request(Request::IntentRequest {
                intent: Intent::new(NEXT_EVENT_INTENT),
            }))
            .await
            .unwrap();

        assert_eq!(response.speech(), Some(UNKNOWN_CALENDAR_TEXT));
    }

    #[tokio::test]
    async fn fetch_failure_is_spoken() {
        let fetcher = ErrorFetcher::new("offline", ProviderError::network("connection refused"));
        let response = handler(fetcher)
            .handle(&next_event(Slot::new(CALENDAR_NAME_SLOT, Some("Meetings"))))
            .await
            .unwrap();

        assert_eq!(response.speech(), Some(UNKNOWN_CALENDAR_TEXT));
        assert!(response.ends_session());
    }

    #[tokio::test]
    async fn no_future_entries() {
        let feed = FEED.replace("February 25, 2019", "February 1, 2019");
        let response = handler(StaticFetcher::always(feed))
            .handle(&next_event(Slot::new(CALENDAR_NAME_SLOT, Some("Meetings"))))
            .await
            .unwrap();

        assert_eq!(
            response.speech(),
            Some("I'm sorry. I couldn't find any future calendar entries in the Boards calendar.")
        );
    }

    #[tokio::test]
    async fn unsupported_intent_and_request() {
        let handler = handler(StaticFetcher::new());

        let err = handler
            .handle(&request(Request::IntentRequest {
                intent: Intent::new("AMAZON.StopIntent"),
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, SkillError::UnsupportedIntent(ref name) if name == "AMAZON.StopIntent"));

        let err = handler.handle(&request(Request::Unknown)).await.unwrap_err();
        assert!(matches!(err, SkillError::UnsupportedRequest));
    }
}
