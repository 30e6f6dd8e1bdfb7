//! Skill requests answered from the captured City Council & Commissions feed.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use nextevent_core::{CivilZone, FixedClock};
use nextevent_providers::{CalendarService, MEETINGS_FEED_URL, StaticFetcher};
use nextevent_skill::commands::handle::respond;
use nextevent_skill::{SkillHandler, SkillRequest};
use serde_json::{Value, json};

const CITY_COUNCIL_MEETINGS: &str =
    include_str!("../../nextevent-core/tests/fixtures/city_council_meetings.xml");

fn civil(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn handler_at(now: NaiveDateTime) -> SkillHandler<StaticFetcher> {
    let zone = CivilZone::default();
    let fetcher = StaticFetcher::new().with_body(MEETINGS_FEED_URL, CITY_COUNCIL_MEETINGS);

    SkillHandler::new(CalendarService::new(fetcher))
        .with_clock(Arc::new(FixedClock::at_civil(zone, now).unwrap()))
        .with_zone(zone)
}

fn next_event_request(value: &str) -> Value {
    json!({
        "version": "1.0",
        "session": { "new": true, "sessionId": "amzn1.echo-api.session.test" },
        "request": {
            "type": "IntentRequest",
            "requestId": "amzn1.echo-api.request.test",
            "timestamp": "2019-02-26T01:00:00Z",
            "locale": "en-US",
            "intent": {
                "name": "next_event",
                "confirmationStatus": "NONE",
                "slots": {
                    "calendar_name": {
                        "name": "calendar_name",
                        "value": value,
                        "resolutions": {
                            "resolutionsPerAuthority": [{
                                "authority": "amzn1.er-authority.echo-sdk.test.calendar_name",
                                "status": { "code": "ER_SUCCESS_MATCH" },
                                "values": [{ "value": { "name": "Meetings", "id": "MEETINGS" } }]
                            }]
                        }
                    }
                }
            }
        }
    })
}

#[tokio::test]
async fn next_meeting_after_council_starts() {
    let handler = handler_at(civil(2019, 2, 25, 19, 0));
    let request: SkillRequest = serde_json::from_value(next_event_request("meeting")).unwrap();

    let response = handler.handle(&request).await.unwrap();

    insta::assert_snapshot!(response.speech().unwrap(), @r#"<speak><s>The next event in the City Council &amp; Commissions Meetings calendar is titled: "Plano Housing Authority Board Meeting".</s> <s>It starts at <say-as interpret-as="time">06:30 PM</say-as> tomorrow.</s> <s>It lasts until <say-as interpret-as="time">midnight</say-as>.</s></speak>"#);
    assert!(response.ends_session());
}

#[tokio::test]
async fn next_meeting_with_description() {
    let handler = handler_at(civil(2019, 3, 4, 20, 0));
    let request: SkillRequest = serde_json::from_value(next_event_request("meetings")).unwrap();

    let response = handler.handle(&request).await.unwrap();

    insta::assert_snapshot!(response.speech().unwrap(), @r#"<speak><s>The next event in the City Council &amp; Commissions Meetings calendar is titled: "Parks and Recreation Planning Board - Notice of Tour".</s> <s>It starts at <say-as interpret-as="time">03:00 PM</say-as> tomorrow.</s> <s>It lasts until <say-as interpret-as="time">midnight</say-as>.</s> <s>Here's the description:</s> <s>Board members will tour Legacy Trail and Oak Point Park and Nature Preserve.</s></speak>"#);
}

#[tokio::test]
async fn no_meetings_left() {
    let handler = handler_at(civil(2019, 3, 6, 9, 0));
    let request: SkillRequest = serde_json::from_value(next_event_request("meetings")).unwrap();

    let response = handler.handle(&request).await.unwrap();

    assert_eq!(
        response.speech(),
        Some("I'm sorry. I couldn't find any future calendar entries in the City Council & Commissions Meetings calendar.")
    );
}

#[tokio::test]
async fn json_round_trip_through_respond() {
    let handler = handler_at(civil(2019, 2, 26, 20, 0));
    let input = next_event_request("meetings").to_string();

    let output = respond(&handler, &input).await.unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["version"], "1.0");
    assert_eq!(value["response"]["outputSpeech"]["type"], "SSML");
    assert_eq!(value["response"]["shouldEndSession"], true);
    let ssml = value["response"]["outputSpeech"]["ssml"].as_str().unwrap();
    assert!(ssml.contains("Cultural Affairs Commission"));
    assert!(ssml.contains(r#"on <say-as interpret-as="date" format="md">0228</say-as>"#));
}
