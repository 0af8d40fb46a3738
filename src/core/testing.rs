// Test-only time zone with a spring-forward gap

use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone};

/// UTC-5 until 2024-03-10 02:00 local, then UTC-4. Local 02:00..03:00 that day does not exist.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpringForward;

fn standard() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).unwrap()
}

fn daylight() -> FixedOffset {
    FixedOffset::west_opt(4 * 3600).unwrap()
}

fn at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(hour, 0, 0).unwrap()
}

impl TimeZone for SpringForward {
    type Offset = FixedOffset;

    fn from_offset(_offset: &FixedOffset) -> Self {
        SpringForward
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
        self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        if *local < at(2) {
            LocalResult::Single(standard())
        } else if *local < at(3) {
            LocalResult::None
        } else {
            LocalResult::Single(daylight())
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        // 02:00 EST == 07:00 UTC
        if *utc < at(7) {
            standard()
        } else {
            daylight()
        }
    }
}
