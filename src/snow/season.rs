//! Snow season gate
//!
//! Snow only falls in December, January and February, judged in Japan
//! Standard Time regardless of where the viewer is.

use chrono::{DateTime, Datelike, FixedOffset, Utc};

/// JST offset from UTC in seconds
const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Whether `now` falls in the snow season (Dec-Feb JST)
pub fn is_snow_season(now: DateTime<Utc>) -> bool {
    let Some(jst) = FixedOffset::east_opt(JST_OFFSET_SECS) else {
        return false;
    };
    matches!(now.with_timezone(&jst).month(), 12 | 1 | 2)
}
