//! End-to-end session scoring from JSON input.

use std::io::Write;

use ludorum_core::{
    score_session, Directory, Event, EventKind, EventSheet, Gender, House, LudorumCutoff,
    Participant, ParticipantRef, PointsTable, RawEntry, ScoringConfig, SessionReport,
    SessionSheet, StandingRecord,
};
use serde_json::json;

fn sheet() -> SessionSheet {
    serde_json::from_value(json!({
        "session_id": "sports-day-2026",
        "directory": {
            "houses": [
                { "id": "red", "name": "Red House" },
                { "id": "blue", "name": "Blue House" }
            ],
            "participants": [
                { "id": "ada", "name": "Ada", "house_id": "red", "gender": "female" },
                { "id": "bea", "name": "Bea", "house_id": "blue", "gender": "female" },
                { "id": "cat", "name": "Cat", "house_id": "red", "gender": "female" }
            ]
        },
        "events": [
            {
                "event": {
                    "id": "g-u14-100m",
                    "name": "U14 Girls 100m",
                    "kind": "individual",
                    "nature": "time",
                    "metric": "seconds",
                    "age_group": "U14",
                    "gender": "female",
                    "record": { "value": "13.10", "holder": "Old Girl" },
                    "best_score": "12.95"
                },
                "entries": [
                    { "participant": { "kind": "individual", "id": "bea" }, "position": 2 },
                    { "participant": { "kind": "individual", "id": "ada" }, "position": 1 },
                    { "participant": { "kind": "individual", "id": "cat" }, "position": "DQ" }
                ]
            },
            {
                "event": {
                    "id": "g-u14-lj",
                    "kind": "individual",
                    "nature": "length",
                    "metric": "meters",
                    "age_group": "U14",
                    "gender": "female",
                    "record": { "value": "5.10", "holder": "Old Girl" },
                    "best_score": "4.80"
                },
                "entries": [
                    { "participant": { "kind": "individual", "id": "bea" }, "position": 1 },
                    { "participant": { "kind": "individual", "id": "cat" }, "position": 1 },
                    { "participant": { "kind": "individual", "id": "ada" }, "position": 3 }
                ]
            },
            {
                "event": {
                    "id": "relay",
                    "kind": "team",
                    "nature": "time",
                    "metric": "mm:ss.ff",
                    "age_group": "Open",
                    "gender": "mixed",
                    "best_score": "0:58.40"
                },
                "entries": [
                    { "participant": { "kind": "house", "id": "blue" }, "position": 1 },
                    { "participant": { "kind": "house", "id": "red" }, "position": 2 }
                ]
            }
        ]
    }))
    .expect("valid session sheet")
}

#[test]
fn session_scores_records_and_standings() {
    let mut sheet = sheet();
    let report = score_session(&mut sheet, &ScoringConfig::default()).expect("score session");

    assert_eq!(report.session_id, "sports-day-2026");
    assert_eq!(report.events.len(), 3);

    // 100m: record broken by Ada, event mutated in place
    let sprint = &sheet.events[0].event;
    assert!(sprint.record_broken);
    assert_eq!(sprint.record, Some(StandingRecord::new("12.95", "Ada")));
    assert!(report.events[0].record.as_ref().unwrap().broken);

    // long jump: record kept
    let jump = &sheet.events[1].event;
    assert!(!jump.record_broken);
    assert_eq!(jump.record.as_ref().unwrap().holder, "Old Girl");

    // relay: first time recorded, holder is the house name
    let relay = &sheet.events[2].event;
    assert_eq!(relay.record, Some(StandingRecord::new("0:58.40", "Blue House")));

    // standard table: individual 10/8/6, team 20/16
    // red  = ada (10 + 6) + cat (0 + 9) + relay 16 = 41
    // blue = bea (8 + 9) + relay 20 = 37
    let standings = &report.standings;
    assert_eq!(standings.house("red").unwrap().points, 41.0);
    assert_eq!(standings.house("blue").unwrap().points, 37.0);
    assert_eq!(standings.house_points[0].house_id, "red");

    // vlp standard: 10/8/6 -> ada 10 + 6 = 16, bea 8 + 10 = 18, cat 0 + 10 = 10
    let group = standings.ludorum.group(Gender::Female, "U14").unwrap();
    let order: Vec<(&str, u32)> = group
        .entries
        .iter()
        .map(|e| (e.participant_id.as_str(), e.vlp))
        .collect();
    assert_eq!(order, vec![("bea", 18), ("ada", 16), ("cat", 10)]);
    assert!(standings.ludorum.male.is_empty());
}

#[test]
fn standings_digest_is_reproducible() {
    let config = ScoringConfig::default();
    let first = score_session(&mut sheet(), &config).unwrap();
    let second = score_session(&mut sheet(), &config).unwrap();
    assert_eq!(first.standings_digest, second.standings_digest);
    assert_eq!(first.standings_digest.len(), 64);

    let narrower = config.with_cutoff(LudorumCutoff::Places(1));
    let third = score_session(&mut sheet(), &narrower).unwrap();
    assert_ne!(first.standings_digest, third.standings_digest);
}

#[test]
fn entry_order_does_not_change_the_report() {
    let mut reversed = sheet();
    for event in &mut reversed.events {
        event.entries.reverse();
    }
    let config = ScoringConfig::default();
    let a = score_session(&mut sheet(), &config).unwrap();
    let b = score_session(&mut reversed, &config).unwrap();
    assert_eq!(a.standings, b.standings);
    assert_eq!(a.standings_digest, b.standings_digest);
}

#[test]
fn fractional_points_digest_the_same_in_any_entry_order() {
    let directory = ["a", "b", "c"]
        .iter()
        .fold(Directory::new().with_house(House::new("red", "Red")), |dir, id| {
            dir.with_participant(Participant::new(*id, id.to_uppercase()).in_house("red"))
        });
    let session = |entries: Vec<RawEntry>| SessionSheet {
        session_id: "fractional".to_string(),
        directory: directory.clone(),
        events: vec![EventSheet {
            event: Event::new("100m", EventKind::Individual, Gender::Male),
            entries,
        }],
    };
    let config = ScoringConfig::default().with_points(
        PointsTable::new()
            .with_individual(1, 0.1)
            .with_individual(2, 0.2)
            .with_individual(3, 0.3),
    );

    let entries = vec![
        RawEntry::placed(ParticipantRef::individual("a"), 1),
        RawEntry::placed(ParticipantRef::individual("b"), 2),
        RawEntry::placed(ParticipantRef::individual("c"), 3),
    ];
    let mut reversed = entries.clone();
    reversed.reverse();

    let forward = score_session(&mut session(entries), &config).unwrap();
    let backward = score_session(&mut session(reversed), &config).unwrap();

    let red = |report: &SessionReport| report.standings.house("red").unwrap().points;
    assert_eq!(red(&forward).to_bits(), red(&backward).to_bits());
    assert_eq!(forward.standings_digest, backward.standings_digest);
}

#[test]
fn config_file_drives_the_session() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "points": {{
                "individual": {{ "1": 3, "2": 2, "3": 1 }},
                "team": {{ "1": 5 }},
                "vlp": {{ "1": 1 }}
            }},
            "ludorum": {{ "cutoff": {{ "type": "places", "value": 1 }} }}
        }}"#
    )
    .unwrap();

    let config = ScoringConfig::from_path(file.path()).expect("load config");
    let report = score_session(&mut sheet(), &config).unwrap();

    // red = ada (3 + 1) + cat (0 + 2.5) = 6.5, blue = bea (2 + 2.5) + relay 5 = 9.5
    assert_eq!(report.standings.house("red").unwrap().points, 6.5);
    assert_eq!(report.standings.house("blue").unwrap().points, 9.5);

    // vlp: ada 1, bea 1, cat 1 -> single three-way tie, kept whole
    let group = report
        .standings
        .ludorum
        .group(Gender::Female, "U14")
        .unwrap();
    assert_eq!(group.entries.len(), 3);
    assert!(group.entries.iter().all(|e| e.rank == 1));
}

#[test]
fn session_sheet_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&sheet()).unwrap().as_bytes())
        .unwrap();
    let loaded = SessionSheet::from_path(file.path()).expect("load sheet");
    assert_eq!(loaded, sheet());
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ScoringConfig::from_path(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ludorum_core::ScoringError::Io(_)));
}
