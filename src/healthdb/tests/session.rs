use std::env::temp_dir;

use common::fields;
use common::Value;
use healthdb::error::DbError;
use healthdb::tables::ACTIVITIES;
use healthdb::tables::DEVICES;
use healthdb::tables::MONITORING_HR;
use healthdb::Databases;
use healthdb::NaturalKey;
use healthdb::Store;
use uuid::Uuid;

fn open() -> anyhow::Result<Databases> {
    let mut path = temp_dir();
    path.push(format!("{}.db", Uuid::new_v4()));

    Ok(Databases::open(path)?)
}

#[test]
fn test_commit_makes_rows_visible() -> anyhow::Result<()> {
    let dbs = open()?;

    let session = dbs.session();
    session.upsert_fields(&DEVICES, &fields! {"serial_number" => 100i64, "manufacturer" => "garmin"})?;
    session.upsert_fields(&MONITORING_HR, &fields! {
        "timestamp" => Value::Timestamp(chrono::Utc::now()),
        "heart_rate" => 60i64,
    })?;
    // uncommitted writes are visible inside the session only
    assert_eq!(session.rows(&DEVICES)?.len(), 1);
    assert!(dbs.rows(&DEVICES)?.is_empty());
    session.commit()?;

    assert_eq!(dbs.rows(&DEVICES)?.len(), 1);
    assert_eq!(dbs.rows(&MONITORING_HR)?.len(), 1);
    assert!(dbs.rows(&ACTIVITIES)?.is_empty());

    Ok(())
}

#[test]
fn test_dropped_session_rolls_back() -> anyhow::Result<()> {
    let dbs = open()?;
    {
        let session = dbs.session();
        session.upsert_fields(&ACTIVITIES, &fields! {"activity_id" => "1", "calories" => 10i64})?;
        session.upsert_fields(&DEVICES, &fields! {"serial_number" => 1i64})?;
    }
    assert!(dbs.rows(&ACTIVITIES)?.is_empty());
    assert!(dbs.rows(&DEVICES)?.is_empty());

    let session = dbs.session();
    session.upsert_fields(&ACTIVITIES, &fields! {"activity_id" => "1"})?;
    session.rollback()?;
    assert!(dbs.rows(&ACTIVITIES)?.is_empty());

    Ok(())
}

#[test]
fn test_merge_is_non_destructive() -> anyhow::Result<()> {
    let dbs = open()?;
    let key = NaturalKey(vec![Value::from("a")]);

    let session = dbs.session();
    session.upsert(&ACTIVITIES, &key, &fields! {"calories" => 5i64, "sport" => "running"})?;
    session.commit()?;

    let session = dbs.session();
    let row = session.upsert(&ACTIVITIES, &key, &fields! {"calories" => Value::Null})?;
    assert_eq!(row["calories"], Value::Int(5));
    let row = session.upsert(&ACTIVITIES, &key, &fields! {"calories" => 7i64})?;
    assert_eq!(row["calories"], Value::Int(7));
    assert_eq!(row["sport"], Value::from("running"));
    session.commit()?;

    let row = dbs.find_by_key(&ACTIVITIES, &key)?.unwrap();
    assert_eq!(row["activity_id"], Value::from("a"));
    assert_eq!(row["calories"], Value::Int(7));
    assert_eq!(dbs.rows(&ACTIVITIES)?.len(), 1);

    Ok(())
}

#[test]
fn test_invalid_values_are_rejected_before_writing() -> anyhow::Result<()> {
    let dbs = open()?;
    let session = dbs.session();
    let err = session
        .upsert_fields(&ACTIVITIES, &fields! {"activity_id" => "a", "calories" => -1i64})
        .unwrap_err();
    assert!(matches!(err, DbError::InvalidValue(_)));
    assert!(err.is_data_error());
    assert!(session.rows(&ACTIVITIES)?.is_empty());

    let err = session
        .upsert_fields(&ACTIVITIES, &fields! {"calories" => 1i64})
        .unwrap_err();
    assert!(matches!(err, DbError::MissingKey(_)));

    Ok(())
}

#[test]
fn test_tables_do_not_share_rows() -> anyhow::Result<()> {
    let dbs = open()?;
    let session = dbs.session();
    let ts = Value::Timestamp(chrono::Utc::now());
    session.upsert_fields(&MONITORING_HR, &fields! {"timestamp" => ts.clone(), "heart_rate" => 61i64})?;
    session.upsert_fields(&healthdb::tables::MONITORING, &fields! {
        "timestamp" => ts,
        "activity_type" => "walking",
        "steps" => 12i64,
    })?;
    session.commit()?;

    assert_eq!(dbs.rows(&MONITORING_HR)?.len(), 1);
    assert_eq!(dbs.rows(&healthdb::tables::MONITORING)?.len(), 1);

    Ok(())
}
