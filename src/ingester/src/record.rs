//! Decoded records and the file abstraction handed to the ingester.
//!
//! Decoding of the binary container lives outside this crate. A decoder
//! yields a [`FitFile`]: its creation time, declared type and the records it
//! holds, grouped by record type in order of first appearance.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Utc;
use common::Fields;
use common::Value;
use serde::Deserialize;

use crate::error::IngesterError;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    FileId,
    DeviceInfo,
    Session,
    Lap,
    Record,
    MonitoringInfo,
    Monitoring,
    StressLevel,
    UserProfile,
    Event,
    Software,
    FileCreator,
    Sport,
    Sensor,
    Source,
    DeviceSettings,
    Battery,
    Activity,
    ZonesTarget,
    DevDataId,
    FieldDescription,
    Other(String),
}

impl RecordType {
    pub fn name(&self) -> &str {
        match self {
            RecordType::FileId => "file_id",
            RecordType::DeviceInfo => "device_info",
            RecordType::Session => "session",
            RecordType::Lap => "lap",
            RecordType::Record => "record",
            RecordType::MonitoringInfo => "monitoring_info",
            RecordType::Monitoring => "monitoring",
            RecordType::StressLevel => "stress_level",
            RecordType::UserProfile => "user_profile",
            RecordType::Event => "event",
            RecordType::Software => "software",
            RecordType::FileCreator => "file_creator",
            RecordType::Sport => "sport",
            RecordType::Sensor => "sensor",
            RecordType::Source => "source",
            RecordType::DeviceSettings => "device_settings",
            RecordType::Battery => "battery",
            RecordType::Activity => "activity",
            RecordType::ZonesTarget => "zones_target",
            RecordType::DevDataId => "dev_data_id",
            RecordType::FieldDescription => "field_description",
            RecordType::Other(name) => name.as_str(),
        }
    }
}

impl From<&str> for RecordType {
    fn from(name: &str) -> Self {
        match name {
            "file_id" => RecordType::FileId,
            "device_info" => RecordType::DeviceInfo,
            "session" => RecordType::Session,
            "lap" => RecordType::Lap,
            "record" => RecordType::Record,
            "monitoring_info" => RecordType::MonitoringInfo,
            "monitoring" => RecordType::Monitoring,
            "stress_level" => RecordType::StressLevel,
            "user_profile" => RecordType::UserProfile,
            "event" => RecordType::Event,
            "software" => RecordType::Software,
            "file_creator" => RecordType::FileCreator,
            "sport" => RecordType::Sport,
            "sensor" => RecordType::Sensor,
            "source" => RecordType::Source,
            "device_settings" => RecordType::DeviceSettings,
            "battery" => RecordType::Battery,
            "activity" => RecordType::Activity,
            "zones_target" => RecordType::ZonesTarget,
            "dev_data_id" => RecordType::DevDataId,
            "field_description" => RecordType::FieldDescription,
            other => RecordType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Sport pair an activity-scoped record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct SubType {
    pub sport: Option<String>,
    pub sub_sport: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub record_type: RecordType,
    pub sub_type: Option<SubType>,
    fields: Fields,
}

impl Record {
    pub fn new(record_type: RecordType, fields: Fields) -> Self {
        let sub_type = match record_type {
            RecordType::Session | RecordType::Lap | RecordType::Sport => sub_type_of(&fields),
            _ => None,
        };

        Record {
            record_type,
            sub_type,
            fields,
        }
    }

    pub fn with_sub_type(mut self, sub_type: SubType) -> Self {
        self.sub_type = Some(sub_type);
        self
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Field mapping of the record. With `ignore_null` fields that carry no
    /// data are left out.
    pub fn to_fields(&self, ignore_null: bool) -> Fields {
        if ignore_null {
            common::value::non_null(&self.fields)
        } else {
            self.fields.clone()
        }
    }
}

fn sub_type_of(fields: &Fields) -> Option<SubType> {
    let name = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);
    let sub_type = SubType {
        sport: name("sport"),
        sub_sport: name("sub_sport"),
    };

    if sub_type.sport.is_none() && sub_type.sub_sport.is_none() {
        None
    } else {
        Some(sub_type)
    }
}

/// A decoded activity file.
pub trait FitFile {
    fn path(&self) -> &Path;

    fn time_created(&self) -> Option<DateTime<Utc>>;

    fn file_type(&self) -> Option<String>;

    /// Record types present in the file, in order of first appearance.
    fn record_types(&self) -> Vec<RecordType>;

    /// Records of one type in stream order. Decoders that materialize lazily
    /// report truncated or corrupt data here.
    fn records_of(&self, record_type: &RecordType) -> Result<Vec<Record>>;
}

/// In-memory [`FitFile`], loadable from the JSON export of a decoder.
///
/// ```json
/// {"time_created": "2024-03-01T08:00:00Z", "type": "activity",
///  "records": [{"type": "file_id", "fields": {"serial_number": 100}}]}
/// ```
#[derive(Debug, Clone)]
pub struct DecodedFile {
    path: PathBuf,
    time_created: Option<DateTime<Utc>>,
    file_type: Option<String>,
    records: Vec<Record>,
}

#[derive(Deserialize)]
struct RawFile {
    time_created: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    file_type: Option<String>,
    records: Vec<RawRecord>,
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "type")]
    record_type: String,
    sub_type: Option<SubType>,
    #[serde(default)]
    fields: serde_json::Map<String, serde_json::Value>,
}

impl DecodedFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        DecodedFile {
            path: path.as_ref().to_path_buf(),
            time_created: None,
            file_type: None,
            records: vec![],
        }
    }

    pub fn with_time_created(mut self, ts: DateTime<Utc>) -> Self {
        self.time_created = Some(ts);
        self
    }

    pub fn with_file_type(mut self, file_type: &str) -> Self {
        self.file_type = Some(file_type.to_string());
        self
    }

    pub fn with_record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let raw: RawFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| IngesterError::Decode(format!("{}: {err}", path.display())))?;

        let mut out = DecodedFile::new(path);
        out.time_created = raw.time_created;
        out.file_type = raw.file_type;
        for raw in raw.records {
            let fields = raw
                .fields
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect();
            let mut record = Record::new(RecordType::from(raw.record_type.as_str()), fields);
            if let Some(sub_type) = raw.sub_type {
                record = record.with_sub_type(sub_type);
            }
            out.records.push(record);
        }

        Ok(out)
    }

    fn file_id_field(&self, name: &str) -> Option<&Value> {
        self.records
            .iter()
            .find(|r| r.record_type == RecordType::FileId)
            .and_then(|r| r.fields.get(name))
    }
}

impl FitFile for DecodedFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn time_created(&self) -> Option<DateTime<Utc>> {
        self.time_created
            .or_else(|| self.file_id_field("time_created")?.as_timestamp())
    }

    fn file_type(&self) -> Option<String> {
        self.file_type.clone().or_else(|| {
            self.file_id_field("type")?
                .to_name()
                .as_str()
                .map(str::to_string)
        })
    }

    fn record_types(&self) -> Vec<RecordType> {
        let mut out: Vec<RecordType> = vec![];
        for record in &self.records {
            if !out.contains(&record.record_type) {
                out.push(record.record_type.clone());
            }
        }

        out
    }

    fn records_of(&self, record_type: &RecordType) -> Result<Vec<Record>> {
        Ok(self
            .records
            .iter()
            .filter(|r| &r.record_type == record_type)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use common::fields;

    use super::*;

    #[test]
    fn test_record_type_names() {
        assert_eq!(RecordType::from("monitoring_info"), RecordType::MonitoringInfo);
        assert_eq!(RecordType::MonitoringInfo.name(), "monitoring_info");
        assert_eq!(
            RecordType::from("hrv"),
            RecordType::Other("hrv".to_string())
        );
        assert_eq!(RecordType::from("hrv").to_string(), "hrv");
    }

    #[test]
    fn test_to_fields() {
        let r = Record::new(
            RecordType::Lap,
            fields! {"sport" => "running", "calories" => Value::Null},
        );
        assert_eq!(r.to_fields(false).len(), 2);
        assert_eq!(r.to_fields(true).len(), 1);
        assert_eq!(
            r.sub_type,
            Some(SubType {
                sport: Some("running".to_string()),
                sub_sport: None,
            })
        );
    }

    #[test]
    fn test_record_types_in_first_seen_order() {
        let f = DecodedFile::new("a.fit")
            .with_record(Record::new(RecordType::Record, fields! {}))
            .with_record(Record::new(RecordType::FileId, fields! {}))
            .with_record(Record::new(RecordType::Record, fields! {}));

        assert_eq!(f.record_types(), vec![RecordType::Record, RecordType::FileId]);
        assert_eq!(f.records_of(&RecordType::Record).unwrap().len(), 2);
        assert!(f.records_of(&RecordType::Lap).unwrap().is_empty());
    }

    #[test]
    fn test_file_metadata_from_file_id() {
        let ts = "2024-03-01T08:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let f = DecodedFile::new("a.fit").with_record(Record::new(
            RecordType::FileId,
            fields! {"time_created" => ts, "type" => "activity"},
        ));

        assert_eq!(f.time_created(), Some(ts));
        assert_eq!(f.file_type(), Some("activity".to_string()));
    }
}
