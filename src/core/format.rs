// Data structures for telemetry readings and their derived views

use crate::core::constants::*;
use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone,
};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One equipment telemetry sample as delivered by the payloads API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub equipment_id: String,
    pub timestamp: String,
    pub value: f64,
}

impl Reading {
    pub fn new(equipment_id: impl Into<String>, timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            timestamp: timestamp.into(),
            value,
        }
    }

    /// Interprets the timestamp in `tz`. Offset-bearing timestamps are
    /// converted; offset-less ones are taken as wall-clock time in `tz`.
    pub fn timestamp_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        parse_timestamp(&self.timestamp, tz)
    }

    /// Calendar day of the reading in `tz`, used as the averages key.
    pub fn local_date_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        local_date(&self.timestamp, tz)
    }

    /// Calendar day shown on the chart axis. A bare date is taken as UTC
    /// midnight here, so it can land on the previous day west of UTC.
    pub fn label_date_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        match ParsedTimestamp::parse(&self.timestamp)? {
            ParsedTimestamp::Date(date) => {
                let midnight = date.and_hms_opt(0, 0, 0)?;
                Some(tz.from_utc_datetime(&midnight).date_naive())
            }
            other => Some(other.date_in(tz)),
        }
    }
}

enum ParsedTimestamp {
    Instant(DateTime<FixedOffset>),
    Wall(NaiveDateTime),
    Date(NaiveDate),
}

impl ParsedTimestamp {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self::Instant(dt));
        }

        for fmt in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(Self::Wall(naive));
            }
        }

        NaiveDate::parse_from_str(raw, NAIVE_DATE_FORMAT)
            .ok()
            .map(Self::Date)
    }

    // Wall-clock input already names its local day
    fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        match self {
            Self::Instant(dt) => dt.with_timezone(tz).date_naive(),
            Self::Wall(naive) => naive.date(),
            Self::Date(date) => *date,
        }
    }
}

pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    match ParsedTimestamp::parse(raw)? {
        ParsedTimestamp::Instant(dt) => Some(dt.with_timezone(tz)),
        ParsedTimestamp::Wall(naive) => Some(resolve_local(tz, naive)),
        ParsedTimestamp::Date(date) => Some(resolve_local(tz, date.and_hms_opt(0, 0, 0)?)),
    }
}

pub fn local_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    ParsedTimestamp::parse(raw).map(|parsed| parsed.date_in(tz))
}

// Wall-clock time inside a DST gap is pushed forward by the gap length,
// using the offset in force a day earlier.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(naive - Duration::days(1)))
                .fix()
                .local_minus_utc();
            tz.from_utc_datetime(&(naive - Duration::seconds(i64::from(before))))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAverage {
    pub date: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentAverages {
    pub equipment_id: String,
    pub days: Vec<DailyAverage>,
}

impl EquipmentAverages {
    pub fn get(&self, date: &str) -> Option<f64> {
        self.days.iter().find(|d| d.date == date).map(|d| d.average)
    }
}

/// equipmentId -> date -> mean value, both levels in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyAverageTable {
    pub(crate) equipment: Vec<EquipmentAverages>,
}

impl DailyAverageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.equipment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equipment.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquipmentAverages> {
        self.equipment.iter()
    }

    pub fn equipment_ids(&self) -> impl Iterator<Item = &str> {
        self.equipment.iter().map(|e| e.equipment_id.as_str())
    }

    pub fn equipment(&self, equipment_id: &str) -> Option<&EquipmentAverages> {
        self.equipment.iter().find(|e| e.equipment_id == equipment_id)
    }

    pub fn get(&self, equipment_id: &str, date: &str) -> Option<f64> {
        self.equipment(equipment_id).and_then(|e| e.get(date))
    }
}

// Serialized as a nested object so the wire shape is {"A": {"2024-01-01": 15.0}}
impl Serialize for DailyAverageTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        struct Days<'a>(&'a [DailyAverage]);

        impl Serialize for Days<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for day in self.0 {
                    map.serialize_entry(&day.date, &day.average)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(self.equipment.len()))?;
        for entry in &self.equipment {
            map.serialize_entry(&entry.equipment_id, &Days(&entry.days))?;
        }
        map.end()
    }
}

/// Single line series drawn from the raw, ungrouped readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
