use super::*;
use crate::{
    adapters::json,
    web::{chat_sessions::ChatSessions, ChatSessionLimits},
};

pub mod prelude {

    use crate::web::{api, sqlite, Cfg};

    pub use crate::web::tests::prelude::{LocalResponse as Response, *};

    pub fn setup() -> (Client, sqlite::Connections, tempfile::TempDir) {
        setup_with_cfg(Cfg::default())
    }

    pub fn setup_with_cfg(cfg: Cfg) -> (Client, sqlite::Connections, tempfile::TempDir) {
        rocket_test_setup(vec![("/", api::routes())], cfg, DummyTextGenerationGW::default())
    }

    pub fn setup_with_gateway(
        gateway: DummyTextGenerationGW,
    ) -> (Client, sqlite::Connections, tempfile::TempDir) {
        rocket_test_setup(vec![("/", api::routes())], Cfg::default(), gateway)
    }

    pub fn test_json(r: &Response) {
        assert_eq!(
            r.headers().get("Content-Type").collect::<Vec<_>>()[0],
            "application/json"
        );
    }

    pub fn insert_location(db: &sqlite::Connections, location: Location) {
        db.exclusive().unwrap().create_location(&location).unwrap();
    }

    pub fn parse<T: serde::de::DeserializeOwned>(res: Response) -> T {
        serde_json::from_str(&res.into_string().unwrap()).unwrap()
    }
}

use self::prelude::*;

const WELL_FORMED_SCHEDULE: &str = r#"{"title":"Harbour day","events":[{"title":"Ferry","location":"Central Pier","startTime":"2024-01-15T09:00:00","endTime":"2024-01-15T10:30:00"}]}"#;

fn create_schedule_call(arguments: &str) -> Completion {
    Completion {
        content: None,
        tool_calls: vec![ToolCall {
            name: "create_schedule".into(),
            arguments: arguments.into(),
        }],
    }
}

#[test]
fn create_a_new_location() {
    let (client, db, _dir) = setup();
    let res = client
        .post("/locations")
        .header(ContentType::JSON)
        .body(r#"{"title":" Tian Tan Buddha ","description":"Big Buddha","category":"sightseeing","lat":22.254,"lng":113.905,"photo":null}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    test_json(&res);
    let created: json::Location = parse(res);
    assert_eq!("Tian Tan Buddha", created.title);
    assert_eq!(0, created.votes);
    let stored = db.shared().unwrap().get_location(&created.id).unwrap();
    assert_eq!(created, json::Location::from(stored));

    let res = client.get(format!("/locations/{}", created.id)).dispatch();
    assert_eq!(Status::Ok, res.status());
    assert_eq!(created, parse::<json::Location>(res));
}

#[test]
fn create_location_with_invalid_position() {
    let (client, db, _dir) = setup();
    let res = client
        .post("/locations")
        .header(ContentType::JSON)
        .body(r#"{"title":"x","lat":91.0,"lng":0.0}"#)
        .dispatch();
    assert_eq!(Status::BadRequest, res.status());
    test_json(&res);
    let err: json::Error = parse(res);
    assert_eq!(400, err.http_status);
    assert_eq!(0, db.shared().unwrap().count_locations().unwrap());
}

#[test]
fn create_location_with_malformed_json() {
    let (client, _, _dir) = setup();
    let res = client
        .post("/locations")
        .header(ContentType::JSON)
        .body(r#"{"title":"x"}"#)
        .dispatch();
    assert_eq!(Status::UnprocessableEntity, res.status());
}

#[test]
fn get_unknown_location() {
    let (client, _, _dir) = setup();
    let res = client.get("/locations/does-not-exist").dispatch();
    assert_eq!(Status::NotFound, res.status());
    test_json(&res);
    let err: json::Error = parse(res);
    assert_eq!(404, err.http_status);
}

#[test]
fn get_locations_by_category() {
    let (client, db, _dir) = setup();
    insert_location(&db, Location::build().id("a").category("food").finish());
    insert_location(&db, Location::build().id("b").category("beach").finish());
    insert_location(&db, Location::build().id("c").category("food").finish());

    let all: Vec<json::Location> = parse(client.get("/locations").dispatch());
    assert_eq!(3, all.len());
    let all: Vec<json::Location> = parse(client.get("/locations?category=default").dispatch());
    assert_eq!(3, all.len());
    let food: Vec<json::Location> = parse(client.get("/locations?category=food").dispatch());
    assert_eq!(
        vec!["a", "c"],
        food.iter().map(|l| l.id.as_str()).collect::<Vec<_>>()
    );
}

#[test]
fn vote_for_central_pier() {
    let (client, db, _dir) = setup();
    insert_location(
        &db,
        Location::build().id("1").title("Central Pier").votes(3).finish(),
    );
    let res = client.post("/locations/1/vote").dispatch();
    assert_eq!(Status::Ok, res.status());
    test_json(&res);
    assert_eq!(
        r#"{"location_id":"1","new_vote_count":4}"#,
        res.into_string().unwrap()
    );
    assert_eq!(4, db.shared().unwrap().read_votes("1").unwrap());
}

#[test]
fn vote_atomically() {
    let (client, db, _dir) = setup_with_cfg(Cfg {
        vote_policy: usecases::VotePolicy::Atomic,
        ..Default::default()
    });
    insert_location(&db, Location::build().id("1").votes(3).finish());
    for expected in [4, 5] {
        let res: json::VoteResult = parse(client.post("/locations/1/vote").dispatch());
        assert_eq!(expected, res.new_vote_count);
    }
    assert_eq!(5, db.shared().unwrap().read_votes("1").unwrap());
}

#[test]
fn vote_for_unknown_location() {
    let (client, _, _dir) = setup();
    let res = client.post("/locations/999/vote").dispatch();
    assert_eq!(Status::NotFound, res.status());
    test_json(&res);
}

#[test]
fn leaderboard() {
    let (client, db, _dir) = setup();
    insert_location(&db, Location::build().id("a").category("food").votes(1500).finish());
    insert_location(&db, Location::build().id("b").category("beach").votes(2000).finish());
    insert_location(&db, Location::build().id("c").category("food").votes(7).finish());

    let ranking: Vec<json::RankedLocation> = parse(client.get("/leaderboard").dispatch());
    assert_eq!(
        vec![(1, "b", "2K"), (2, "a", "1.5K"), (3, "c", "7")],
        ranking
            .iter()
            .map(|r| (r.rank, r.location.id.as_str(), r.vote_label.as_str()))
            .collect::<Vec<_>>()
    );

    let ranking: Vec<json::RankedLocation> =
        parse(client.get("/leaderboard?category=food&limit=1").dispatch());
    assert_eq!(1, ranking.len());
    assert_eq!("a", ranking[0].location.id);

    let res = client.get("/leaderboard?limit=0").dispatch();
    assert_eq!(Status::BadRequest, res.status());
}

#[test]
fn categories() {
    let (client, db, _dir) = setup();
    insert_location(
        &db,
        Location::build()
            .category("food")
            .votes(1)
            .photo(Some("dim-sum.jpg"))
            .finish(),
    );
    insert_location(
        &db,
        Location::build()
            .category("food")
            .votes(9)
            .photo(Some("egg-tart.jpg"))
            .finish(),
    );
    insert_location(&db, Location::build().category("beach").finish());
    insert_location(&db, Location::build().category("seafood").finish());

    let frequencies: Vec<json::CategoryFrequency> = parse(client.get("/categories").dispatch());
    assert_eq!(
        vec![("food", 2), ("beach", 1), ("seafood", 1)],
        frequencies
            .iter()
            .map(|f| (f.category.as_str(), f.count))
            .collect::<Vec<_>>()
    );

    let top: Vec<json::TopCategory> = parse(client.get("/categories/top?limit=1").dispatch());
    assert_eq!(1, top.len());
    assert_eq!(Some("egg-tart.jpg"), top[0].photo.as_deref());

    let res = client.get("/categories/top?limit=0").dispatch();
    assert_eq!(Status::BadRequest, res.status());

    let found: Vec<json::CategoryFrequency> =
        parse(client.get("/categories/search?q=FOOD").dispatch());
    assert_eq!(
        vec!["food", "seafood"],
        found.iter().map(|f| f.category.as_str()).collect::<Vec<_>>()
    );
}

#[test]
fn new_chat_starts_with_a_greeting() {
    let (client, _, _dir) = setup();
    let res = client.get("/chat/s1").dispatch();
    assert_eq!(Status::Ok, res.status());
    test_json(&res);
    let transcript: Vec<json::Message> = parse(res);
    assert_eq!(1, transcript.len());
    assert_eq!(json::MessageRole::Assistant, transcript[0].role);
    assert_eq!(usecases::GREETING, transcript[0].content);
}

#[test]
fn chat_creates_a_schedule_and_exports_it() {
    let gateway = DummyTextGenerationGW::new(vec![Ok(create_schedule_call(
        WELL_FORMED_SCHEDULE,
    ))]);
    let (client, db, _dir) = setup_with_gateway(gateway);
    insert_location(&db, Location::build().title("Central Pier").finish());

    let res = client
        .post("/chat/s1")
        .header(ContentType::JSON)
        .body(r#"{"message":"Plan a harbour day"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    test_json(&res);
    let turn: json::ChatTurn = parse(res);
    assert_eq!(json::ChatOutcome::Schedules, turn.outcome);
    assert_eq!(1, turn.schedules.len());
    assert_eq!(json::MessageRole::User, turn.messages[0].role);

    let transcript: Vec<json::Message> = parse(client.get("/chat/s1").dispatch());
    assert_eq!(1 + turn.messages.len(), transcript.len());

    let schedules: Vec<json::Schedule> = parse(client.get("/chat/s1/schedules").dispatch());
    assert_eq!(turn.schedules, schedules);
    let other: Vec<json::Schedule> = parse(client.get("/chat/s2/schedules").dispatch());
    assert!(other.is_empty());

    let res = client
        .get(format!("/chat/s1/schedules/{}/calendar.ics", schedules[0].id))
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    assert_eq!(Some(ContentType::Calendar), res.content_type());
    let disposition = res.headers().get_one("Content-Disposition").unwrap().to_owned();
    assert!(disposition.ends_with(&format!("{}.ics\"", schedules[0].id)));
    let ics = res.into_string().unwrap();
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(ics.contains("SUMMARY:Ferry\r\n"));
    assert!(ics.contains("LOCATION:Central Pier\r\n"));
    assert!(ics.contains("DTSTART:20240115T090000Z\r\n"));
    assert!(ics.contains("DTEND:20240115T103000Z\r\n"));
}

#[test]
fn chat_without_credential() {
    let gateway = DummyTextGenerationGW::new(vec![Err(TextGenerationError::MissingCredential)]);
    let (client, _, _dir) = setup_with_gateway(gateway);
    let res = client
        .post("/chat/s1")
        .header(ContentType::JSON)
        .body(r#"{"message":"Plan a harbour day"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let turn: json::ChatTurn = parse(res);
    assert_eq!(json::ChatOutcome::ConfigError, turn.outcome);
    assert!(turn.schedules.is_empty());
    assert_eq!(
        1,
        turn.messages
            .iter()
            .filter(|m| m.role == json::MessageRole::Assistant)
            .count()
    );
    let schedules: Vec<json::Schedule> = parse(client.get("/chat/s1/schedules").dispatch());
    assert!(schedules.is_empty());
}

#[test]
fn chat_with_empty_message() {
    let (client, _, _dir) = setup();
    let res = client
        .post("/chat/s1")
        .header(ContentType::JSON)
        .body(r#"{"message":"  "}"#)
        .dispatch();
    assert_eq!(Status::BadRequest, res.status());
    test_json(&res);
}

#[test]
fn chat_with_invalid_session_id() {
    let (client, _, _dir) = setup();
    let session = "x".repeat(65);
    let res = client.get(format!("/chat/{session}")).dispatch();
    assert_eq!(Status::BadRequest, res.status());
    let res = client.get(format!("/chat/{session}/schedules")).dispatch();
    assert_eq!(Status::BadRequest, res.status());
}

#[test]
fn reading_chats_keeps_no_state() {
    let (client, _, dir) = setup();
    for i in 0..20 {
        let res = client.get(format!("/chat/reader{i}")).dispatch();
        assert_eq!(Status::Ok, res.status());
        let schedules: Vec<json::Schedule> =
            parse(client.get(format!("/chat/reader{i}/schedules")).dispatch());
        assert!(schedules.is_empty());
        let res = client
            .get(format!("/chat/reader{i}/schedules/x/calendar.ics"))
            .dispatch();
        assert_eq!(Status::NotFound, res.status());
    }
    assert_eq!(0, std::fs::read_dir(dir.path()).unwrap().count());
    let sessions = client.rocket().state::<ChatSessions>().unwrap();
    assert_eq!(0, sessions.len());
}

#[test]
fn chat_sessions_are_limited() {
    let (client, _, _dir) = setup_with_cfg(Cfg {
        chat_sessions: ChatSessionLimits {
            max_sessions: 2,
            ..Default::default()
        },
        ..Default::default()
    });
    for i in 0..5 {
        let res = client
            .post(format!("/chat/writer{i}"))
            .header(ContentType::JSON)
            .body(r#"{"message":"Hello"}"#)
            .dispatch();
        assert_eq!(Status::Ok, res.status());
    }
    let sessions = client.rocket().state::<ChatSessions>().unwrap();
    assert_eq!(2, sessions.len());
}

#[test]
fn export_unknown_schedule() {
    let (client, _, _dir) = setup();
    let res = client.get("/chat/s1/schedules/nope/calendar.ics").dispatch();
    assert_eq!(Status::NotFound, res.status());
    test_json(&res);
}

#[test]
fn get_version() {
    let (client, _, _dir) = setup();
    let res = client.get("/server/version").dispatch();
    assert_eq!(Status::Ok, res.status());
    assert_eq!(DUMMY_VERSION, res.into_string().unwrap());
}
