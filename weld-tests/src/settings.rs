use serde::Serialize;
use std::collections::BTreeMap;
use time::{OffsetDateTime, macros::datetime};
use weld::{Executor, Record, Statement, json, map_to_jsonb, null_time};

#[derive(Serialize)]
struct Limit {
    daily: i32,
    burst: i32,
}

#[derive(Record, Default, Debug)]
struct Setting {
    id: i32,
    owner: String,
    prefs: json::Value,
    updated_at: Option<OffsetDateTime>,
}

pub async fn settings<E: Executor>(executor: &mut E) {
    Statement::new()
        .q("DROP TABLE IF EXISTS weld_settings")
        .exec(executor, ())
        .await
        .expect("Failed to drop weld_settings");
    Statement::new()
        .q("CREATE TABLE weld_settings (")
        .q("id SERIAL PRIMARY KEY,")
        .q("owner TEXT NOT NULL,")
        .q("prefs JSONB NOT NULL,")
        .q("updated_at TIMESTAMPTZ)")
        .exec(executor, ())
        .await
        .expect("Failed to create weld_settings");

    let limits = BTreeMap::from([
        ("api", Limit { daily: 1000, burst: 20 }),
        ("export", Limit { daily: 5, burst: 1 }),
    ]);
    let prefs = map_to_jsonb(&limits).expect("Limits must serialize");
    let updated_at = datetime!(2024-03-10 08:15 UTC);
    Statement::new()
        .q("INSERT INTO weld_settings (owner, prefs, updated_at)")
        .q_args("VALUES (?, ?, ?)", ("alice", prefs, null_time(updated_at)))
        .exec(executor, ())
        .await
        .expect("Failed to insert the settings of alice");
    // Text bound to a jsonb parameter
    Statement::new()
        .q("INSERT INTO weld_settings (owner, prefs, updated_at)")
        .q_args(
            "VALUES (?, ?, ?)",
            (
                "bob",
                r#"{"api": {"daily": 10, "burst": 2}}"#,
                null_time(datetime!(0001-01-01 0:00 UTC)),
            ),
        )
        .exec(executor, ())
        .await
        .expect("Failed to insert the settings of bob");

    let mut setting = Setting::default();
    Statement::new()
        .q_args("SELECT * FROM weld_settings WHERE owner = ?", ("alice",))
        .exec(executor, &mut setting)
        .await
        .expect("Failed to select the settings of alice");
    assert_eq!(setting.prefs["api"]["daily"], 1000);
    assert_eq!(setting.prefs["export"]["burst"], 1);
    assert_eq!(setting.updated_at, Some(updated_at));

    let mut daily = String::new();
    Statement::new()
        .q("SELECT prefs->'api'->>'daily' FROM weld_settings")
        .q_args("WHERE owner = ?", ("bob",))
        .exec(executor, &mut daily)
        .await
        .expect("Failed to read a member of the prefs");
    assert_eq!(daily, "10");

    let mut missing = 0i64;
    Statement::new()
        .q("SELECT count(*) FROM weld_settings WHERE updated_at IS NULL")
        .exec(executor, &mut missing)
        .await
        .expect("Failed to count the settings without a timestamp");
    assert_eq!(missing, 1);
}
