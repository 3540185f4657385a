//! Destination table schemas, grouped by the store they live in.

use crate::table::col;
use crate::table::Column;
use crate::table::ColumnKind::Any;
use crate::table::ColumnKind::Float;
use crate::table::ColumnKind::Int;
use crate::table::ColumnKind::String;
use crate::table::ColumnKind::Timestamp;
use crate::table::ColumnKind::UInt;
use crate::table::StoreKind;
use crate::table::Table;

// garmin

pub static FILES: Table = Table {
    name: "files",
    store: StoreKind::Garmin,
    columns: &[
        col("id", String),
        col("name", String),
        col("type", String),
        col("serial_number", Int),
    ],
    key: &["id"],
};

pub static DEVICES: Table = Table {
    name: "devices",
    store: StoreKind::Garmin,
    columns: &[
        col("serial_number", Int),
        col("timestamp", Timestamp),
        col("manufacturer", String),
        col("product", String),
        col("hardware_version", Any),
    ],
    key: &["serial_number"],
};

pub static DEVICE_INFO: Table = Table {
    name: "device_info",
    store: StoreKind::Garmin,
    columns: &[
        col("timestamp", Timestamp),
        col("file_id", String),
        col("serial_number", Int),
        col("device_type", String),
        col("software_version", Any),
        col("cum_operating_time", Any),
        col("battery_voltage", Float),
    ],
    key: &["timestamp", "serial_number"],
};

pub static ATTRIBUTES: Table = Table {
    name: "attributes",
    store: StoreKind::Garmin,
    columns: &[
        col("name", String),
        col("value", Any),
        col("timestamp", Timestamp),
    ],
    key: &["name"],
};

pub static STRESS: Table = Table {
    name: "stress",
    store: StoreKind::Garmin,
    columns: &[col("timestamp", Timestamp), col("stress", Int)],
    key: &["timestamp"],
};

pub static DAILY_EXTRA_DATA: Table = Table {
    name: "daily_extra_data",
    store: StoreKind::Garmin,
    columns: &[
        col("day", String),
        col("mood", String),
        col("condition", String),
        col("weather", String),
        col("text", String),
        col("people", String),
    ],
    key: &["day"],
};

// monitoring

pub static MONITORING_INFO: Table = Table {
    name: "monitoring_info",
    store: StoreKind::Monitoring,
    columns: &[
        col("timestamp", Timestamp),
        col("activity_type", Any),
        col("file_id", String),
        col("resting_metabolic_rate", UInt),
        col("cycles_to_distance", Float),
        col("cycles_to_calories", Float),
    ],
    key: &["timestamp", "activity_type"],
};

pub static MONITORING_HR: Table = Table {
    name: "monitoring_hr",
    store: StoreKind::Monitoring,
    columns: &[col("timestamp", Timestamp), col("heart_rate", UInt)],
    key: &["timestamp"],
};

pub static MONITORING_INTENSITY: Table = Table {
    name: "monitoring_intensity",
    store: StoreKind::Monitoring,
    columns: &[
        col("timestamp", Timestamp),
        col("moderate_activity_time", UInt),
        col("vigorous_activity_time", UInt),
    ],
    key: &["timestamp"],
};

pub static MONITORING_CLIMB: Table = Table {
    name: "monitoring_climb",
    store: StoreKind::Monitoring,
    columns: &[
        col("timestamp", Timestamp),
        col("ascent", Float),
        col("descent", Float),
        col("cum_ascent", Float),
        col("cum_descent", Float),
    ],
    key: &["timestamp"],
};

pub static MONITORING: Table = Table {
    name: "monitoring",
    store: StoreKind::Monitoring,
    columns: &[
        col("timestamp", Timestamp),
        col("activity_type", Any),
        col("intensity", UInt),
        col("duration", Float),
        col("distance", Float),
        col("cum_active_time", Float),
        col("active_calories", UInt),
        col("steps", UInt),
        col("strokes", UInt),
        col("cycles", Float),
    ],
    key: &["timestamp", "activity_type"],
};

// activities

const SUMMARY_COLUMNS: [Column; 22] = [
    col("start_time", Timestamp),
    col("stop_time", Timestamp),
    col("elapsed_time", Float),
    col("moving_time", Float),
    col("start_lat", Float),
    col("start_long", Float),
    col("stop_lat", Float),
    col("stop_long", Float),
    col("distance", Float),
    col("cycles", Float),
    col("avg_hr", UInt),
    col("max_hr", UInt),
    col("calories", UInt),
    col("avg_cadence", UInt),
    col("max_cadence", UInt),
    col("avg_speed", Float),
    col("max_speed", Float),
    col("ascent", Float),
    col("descent", Float),
    col("max_temperature", Float),
    col("avg_temperature", Float),
    col("training_effect", Float),
];

const fn activity_columns() -> [Column; 31] {
    let head = [
        col("activity_id", String),
        col("name", String),
        col("description", String),
        col("type", String),
        col("course_id", Int),
        col("sport", String),
        col("sub_sport", String),
        col("laps", UInt),
        col("anaerobic_training_effect", Float),
    ];
    let mut out = [col("", Any); 31];
    let mut i = 0;
    while i < head.len() {
        out[i] = head[i];
        i += 1;
    }
    let mut j = 0;
    while j < SUMMARY_COLUMNS.len() {
        out[head.len() + j] = SUMMARY_COLUMNS[j];
        j += 1;
    }
    out
}

const fn lap_columns() -> [Column; 23] {
    let mut out = [col("", Any); 23];
    out[0] = col("activity_id", String);
    out[1] = col("lap", UInt);
    // training effect is only reported for whole activities
    let mut i = 0;
    while i < SUMMARY_COLUMNS.len() - 1 {
        out[2 + i] = SUMMARY_COLUMNS[i];
        i += 1;
    }
    out
}

static ACTIVITY_COLUMNS: [Column; 31] = activity_columns();
static LAP_COLUMNS: [Column; 23] = lap_columns();

pub static ACTIVITIES: Table = Table {
    name: "activities",
    store: StoreKind::Activities,
    columns: &ACTIVITY_COLUMNS,
    key: &["activity_id"],
};

pub static ACTIVITY_LAPS: Table = Table {
    name: "activity_laps",
    store: StoreKind::Activities,
    columns: &LAP_COLUMNS,
    key: &["activity_id", "lap"],
};

pub static ACTIVITY_RECORDS: Table = Table {
    name: "activity_records",
    store: StoreKind::Activities,
    columns: &[
        col("activity_id", String),
        col("record", UInt),
        col("timestamp", Timestamp),
        col("position_lat", Float),
        col("position_long", Float),
        col("distance", Float),
        col("cadence", UInt),
        col("hr", UInt),
        col("altitude", Float),
        col("speed", Float),
        col("temperature", Float),
    ],
    key: &["activity_id", "record"],
};

pub static RUN_ACTIVITIES: Table = Table {
    name: "run_activities",
    store: StoreKind::Activities,
    columns: &[
        col("activity_id", String),
        col("steps", UInt),
        col("avg_pace", Float),
        col("max_pace", Float),
        col("avg_steps_per_min", UInt),
        col("max_steps_per_min", UInt),
        col("avg_step_length", Float),
        col("avg_vertical_ratio", Float),
        col("avg_vertical_oscillation", Float),
        col("avg_gct_balance", Float),
        col("avg_ground_contact_time", Float),
        col("avg_stance_time_percent", Float),
    ],
    key: &["activity_id"],
};

pub static WALK_ACTIVITIES: Table = Table {
    name: "walk_activities",
    store: StoreKind::Activities,
    columns: &[
        col("activity_id", String),
        col("steps", UInt),
        col("avg_pace", Float),
        col("max_pace", Float),
    ],
    key: &["activity_id"],
};

pub static CYCLE_ACTIVITIES: Table = Table {
    name: "cycle_activities",
    store: StoreKind::Activities,
    columns: &[col("activity_id", String), col("strokes", UInt)],
    key: &["activity_id"],
};

pub static PADDLE_ACTIVITIES: Table = Table {
    name: "paddle_activities",
    store: StoreKind::Activities,
    columns: &[
        col("activity_id", String),
        col("strokes", UInt),
        col("avg_stroke_distance", Float),
    ],
    key: &["activity_id"],
};

pub static ELLIPTICAL_ACTIVITIES: Table = Table {
    name: "elliptical_activities",
    store: StoreKind::Activities,
    columns: &[
        col("activity_id", String),
        col("steps", UInt),
        col("elliptical_distance", Float),
    ],
    key: &["activity_id"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_columns() {
        assert!(ACTIVITIES.has_column("anaerobic_training_effect"));
        assert!(ACTIVITIES.has_column("training_effect"));
        assert!(ACTIVITIES.has_column("avg_temperature"));
        assert!(!ACTIVITIES.has_column(""));
        assert!(ACTIVITY_LAPS.has_column("avg_temperature"));
        assert!(!ACTIVITY_LAPS.has_column("training_effect"));
        assert!(!ACTIVITY_LAPS.has_column(""));
    }
}
