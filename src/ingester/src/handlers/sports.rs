//! Sport specific activity details.
//!
//! Each handler maps a session record to the row of its sport's detail table.
//! Handlers that return `None` only log the record.

use std::collections::HashMap;

use common::fields;
use common::Fields;
use common::Value;
use healthdb::tables::CYCLE_ACTIVITIES;
use healthdb::tables::ELLIPTICAL_ACTIVITIES;
use healthdb::tables::PADDLE_ACTIVITIES;
use healthdb::tables::RUN_ACTIVITIES;
use healthdb::tables::WALK_ACTIVITIES;
use healthdb::Table;
use lazy_static::lazy_static;
use tracing::debug;
use tracing::info;

use crate::conversions::cadence_to_steps_per_min;
use crate::conversions::speed_to_pace;
use crate::resolver::resolve;
use crate::resolver::resolve_first;
use crate::resolver::value;

pub type DetailRow = (&'static Table, Fields);

pub type SportHandler = fn(&str, &Fields) -> Option<DetailRow>;

/// Sport whose details depend on the sub sport.
pub const FITNESS_EQUIPMENT: &str = "fitness_equipment";

lazy_static! {
    static ref SPORT_HANDLERS: HashMap<&'static str, SportHandler> = {
        let mut m: HashMap<&'static str, SportHandler> = HashMap::new();
        m.insert("running", running);
        m.insert("walking", walking);
        m.insert("hiking", walking);
        m.insert("cycling", cycling);
        m.insert("stand_up_paddleboarding", paddling);
        m.insert("rowing", paddling);
        m.insert("alpine_skiing", log_only);
        m.insert("training", log_only);
        m
    };
    static ref SUB_SPORT_HANDLERS: HashMap<&'static str, SportHandler> = {
        let mut m: HashMap<&'static str, SportHandler> = HashMap::new();
        m.insert("elliptical", elliptical);
        m
    };
}

/// Detail row for the activity's sport, or `None` when the sport has no
/// detail table.
pub fn detail_row(
    activity_id: &str,
    sport: Option<&str>,
    sub_sport: Option<&str>,
    fields: &Fields,
) -> Option<DetailRow> {
    let handler = match sport {
        Some(FITNESS_EQUIPMENT) => sub_sport.and_then(|s| SUB_SPORT_HANDLERS.get(s)),
        Some(sport) => SPORT_HANDLERS.get(sport),
        None => None,
    };

    match handler {
        Some(handler) => handler(activity_id, fields),
        None => {
            info!(
                "no handler for sport {:?}/{:?} of {}",
                sport, sub_sport, activity_id
            );
            None
        }
    }
}

fn running(activity_id: &str, f: &Fields) -> Option<DetailRow> {
    Some((
        &RUN_ACTIVITIES,
        fields! {
            "activity_id" => activity_id,
            "steps" => value(f, "total_steps"),
            "avg_pace" => speed_to_pace(f.get("avg_speed")),
            "max_pace" => speed_to_pace(f.get("max_speed")),
            "avg_steps_per_min" => cadence_to_steps_per_min(f.get("avg_cadence")),
            "max_steps_per_min" => cadence_to_steps_per_min(f.get("max_cadence")),
            "avg_step_length" => value(f, "avg_step_length"),
            "avg_vertical_ratio" => value(f, "avg_vertical_ratio"),
            "avg_vertical_oscillation" => value(f, "avg_vertical_oscillation"),
            "avg_gct_balance" => value(f, "avg_stance_time_balance"),
            "avg_ground_contact_time" => value(f, "avg_stance_time"),
            "avg_stance_time_percent" => value(f, "avg_stance_time_percent"),
        },
    ))
}

fn walking(activity_id: &str, f: &Fields) -> Option<DetailRow> {
    Some((
        &WALK_ACTIVITIES,
        fields! {
            "activity_id" => activity_id,
            "steps" => value(f, "total_steps"),
            "avg_pace" => speed_to_pace(f.get("avg_speed")),
            "max_pace" => speed_to_pace(f.get("max_speed")),
        },
    ))
}

fn cycling(activity_id: &str, f: &Fields) -> Option<DetailRow> {
    Some((
        &CYCLE_ACTIVITIES,
        fields! {
            "activity_id" => activity_id,
            "strokes" => value(f, "total_strokes"),
        },
    ))
}

fn paddling(activity_id: &str, f: &Fields) -> Option<DetailRow> {
    Some((
        &PADDLE_ACTIVITIES,
        fields! {
            "activity_id" => activity_id,
            "strokes" => value(f, "total_strokes"),
            "avg_stroke_distance" => value(f, "avg_stroke_distance"),
        },
    ))
}

fn elliptical(activity_id: &str, f: &Fields) -> Option<DetailRow> {
    let steps = f
        .get("dev_Steps")
        .filter(|v| !v.is_null())
        .or_else(|| resolve(f, "total_steps"));
    let distance = resolve_first(f, &["User_distance", "distance"]);

    Some((
        &ELLIPTICAL_ACTIVITIES,
        fields! {
            "activity_id" => activity_id,
            "steps" => steps.cloned().unwrap_or(Value::Null),
            "elliptical_distance" => distance.cloned().unwrap_or(Value::Null),
        },
    ))
}

fn log_only(activity_id: &str, f: &Fields) -> Option<DetailRow> {
    debug!("{activity_id}: no details stored: {f:?}");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_aliases() {
        let f = fields! {"total_steps" => 100i64, "avg_speed" => 5.0};

        let (t, row) = detail_row("a", Some("hiking"), None, &f).unwrap();
        assert_eq!(t.name, "walk_activities");
        assert_eq!(row["avg_pace"], Value::Float(720.0));

        let (t, _) = detail_row("a", Some("rowing"), None, &f).unwrap();
        assert_eq!(t.name, "paddle_activities");
    }

    #[test]
    fn test_fitness_equipment_uses_sub_sport() {
        let f = fields! {"dev_Steps" => 1200i64, "total_steps" => 5i64, "dev_User_distance" => 2.5};

        let (t, row) = detail_row("a", Some(FITNESS_EQUIPMENT), Some("elliptical"), &f).unwrap();
        assert_eq!(t.name, "elliptical_activities");
        assert_eq!(row["steps"], Value::Int(1200));
        assert_eq!(row["elliptical_distance"], Value::Float(2.5));

        assert!(detail_row("a", Some(FITNESS_EQUIPMENT), Some("treadmill"), &f).is_none());
        assert!(detail_row("a", Some(FITNESS_EQUIPMENT), None, &f).is_none());
    }

    #[test]
    fn test_sports_without_details() {
        let f = fields! {};
        assert!(detail_row("a", Some("alpine_skiing"), None, &f).is_none());
        assert!(detail_row("a", Some("golf"), None, &f).is_none());
        assert!(detail_row("a", None, None, &f).is_none());
    }

    #[test]
    fn test_running_cadence_is_doubled() {
        let f = fields! {"avg_cadence" => 80i64};
        let (_, row) = detail_row("a", Some("running"), None, &f).unwrap();
        assert_eq!(row["avg_steps_per_min"], Value::Int(160));
        assert_eq!(row["max_steps_per_min"], Value::Null);
    }
}
