// Daily averaging of raw readings per equipment

use crate::core::constants::{DATE_KEY_FORMAT, INVALID_DATE};
use crate::core::format::{DailyAverage, DailyAverageTable, EquipmentAverages, Reading};
use chrono::{Local, TimeZone};
use std::collections::HashMap;
use tracing::{debug, warn};

struct Bucket {
    sum: f64,
    count: usize,
}

struct EquipmentBuckets {
    equipment_id: String,
    dates: Vec<(String, Bucket)>,
    date_index: HashMap<String, usize>,
}

/// Groups readings by equipment and local calendar day and averages each group.
pub fn aggregate(readings: &[Reading]) -> DailyAverageTable {
    aggregate_in(readings, &Local)
}

/// Same as [`aggregate`], with day boundaries taken in `tz`.
///
/// Keys keep the order in which they first appear in `readings`. A reading
/// whose timestamp cannot be parsed is grouped under `"Invalid Date"`.
pub fn aggregate_in<Tz>(readings: &[Reading], tz: &Tz) -> DailyAverageTable
where
    Tz: TimeZone,
{
    let mut groups: Vec<EquipmentBuckets> = Vec::new();
    let mut equipment_index: HashMap<&str, usize> = HashMap::new();

    for reading in readings {
        let date = date_key(reading, tz);

        let slot = *equipment_index
            .entry(reading.equipment_id.as_str())
            .or_insert_with(|| {
                groups.push(EquipmentBuckets {
                    equipment_id: reading.equipment_id.clone(),
                    dates: Vec::new(),
                    date_index: HashMap::new(),
                });
                groups.len() - 1
            });
        let group = &mut groups[slot];

        match group.date_index.get(&date).copied() {
            Some(i) => {
                let bucket = &mut group.dates[i].1;
                bucket.sum += reading.value;
                bucket.count += 1;
            }
            None => {
                group.date_index.insert(date.clone(), group.dates.len());
                group.dates.push((date, Bucket { sum: reading.value, count: 1 }));
            }
        }
    }

    let equipment = groups
        .into_iter()
        .map(|group| EquipmentAverages {
            equipment_id: group.equipment_id,
            days: group
                .dates
                .into_iter()
                .map(|(date, bucket)| DailyAverage {
                    date,
                    average: bucket.sum / bucket.count as f64,
                })
                .collect(),
        })
        .collect::<Vec<_>>();

    debug!(
        "Aggregated {} readings into {} equipment groups",
        readings.len(),
        equipment.len()
    );

    DailyAverageTable { equipment }
}

fn date_key<Tz>(reading: &Reading, tz: &Tz) -> String
where
    Tz: TimeZone,
{
    match reading.local_date_in(tz) {
        Some(date) => date.format(DATE_KEY_FORMAT).to_string(),
        None => {
            warn!(
                "Unparseable timestamp {:?} for equipment {}",
                reading.timestamp, reading.equipment_id
            );
            INVALID_DATE.to_string()
        }
    }
}
