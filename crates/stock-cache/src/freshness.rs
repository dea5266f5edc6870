//! Cache freshness policy tied to US equity market hours.
//!
//! A cached report is worth an hour while the market is trading and a full
//! day otherwise; the scheduled batch refresh runs at the close and always
//! writes the next-day window.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use std::time::Duration;

const MARKET_OPEN_MINUTES: u32 = 9 * 60 + 30;
const MARKET_CLOSE_MINUTES: u32 = 16 * 60;

/// Valid cache age while the market is open
pub const OPEN_WINDOW: Duration = Duration::from_secs(3600);
/// Valid cache age outside trading hours
pub const CLOSED_WINDOW: Duration = Duration::from_secs(86_400);
/// Flat TTL for batch-path writes, market state regardless
pub const BATCH_TTL: Duration = CLOSED_WINDOW;

/// Regular-session check: Mon–Fri, 09:30–16:00 US/Eastern (close exclusive)
pub fn is_market_open(now: DateTime<Utc>) -> bool {
    let et = now.with_timezone(&chrono_tz::US::Eastern);

    if et.weekday() == Weekday::Sat || et.weekday() == Weekday::Sun {
        return false;
    }

    let time_minutes = et.hour() * 60 + et.minute();
    (MARKET_OPEN_MINUTES..MARKET_CLOSE_MINUTES).contains(&time_minutes)
}

/// Maximum servable age for a cached report at this instant
pub fn valid_window(now: DateTime<Utc>) -> Duration {
    if is_market_open(now) {
        OPEN_WINDOW
    } else {
        CLOSED_WINDOW
    }
}

/// Whether a report computed at `timestamp` may still be served at `now`.
/// Clock skew (a timestamp in the future) counts as fresh.
pub fn is_fresh(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let age = now.signed_duration_since(timestamp);
    match age.to_std() {
        Ok(age) => age < valid_window(now),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::US::Eastern;

    /// 2024-06-12 is a Wednesday
    fn eastern(hour: u32, minute: u32) -> DateTime<Utc> {
        Eastern
            .with_ymd_and_hms(2024, 6, 12, hour, minute, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn weekend(hour: u32) -> DateTime<Utc> {
        Eastern
            .with_ymd_and_hms(2024, 6, 15, hour, 0, 0) // Saturday
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn session_boundaries() {
        assert!(!is_market_open(eastern(9, 29)));
        assert!(is_market_open(eastern(9, 30)));
        assert!(is_market_open(eastern(12, 0)));
        assert!(is_market_open(eastern(15, 59)));
        assert!(!is_market_open(eastern(16, 0)));
        assert!(!is_market_open(eastern(20, 0)));
        assert!(!is_market_open(weekend(12)));
    }

    #[test]
    fn window_follows_session_state() {
        assert_eq!(valid_window(eastern(11, 0)), OPEN_WINDOW);
        assert_eq!(valid_window(eastern(22, 0)), CLOSED_WINDOW);
        assert_eq!(valid_window(weekend(12)), CLOSED_WINDOW);
    }

    #[test]
    fn thirty_minute_old_entry_served_in_both_sessions() {
        let open_now = eastern(11, 0);
        assert!(is_fresh(open_now - chrono::Duration::minutes(30), open_now));

        let closed_now = eastern(22, 0);
        assert!(is_fresh(closed_now - chrono::Duration::minutes(30), closed_now));
    }

    #[test]
    fn two_hour_old_entry_stale_only_while_open() {
        let open_now = eastern(11, 45);
        assert!(!is_fresh(open_now - chrono::Duration::hours(2), open_now));

        let closed_now = eastern(22, 0);
        assert!(is_fresh(closed_now - chrono::Duration::hours(2), closed_now));
        assert!(!is_fresh(closed_now - chrono::Duration::hours(25), closed_now));
    }

    #[test]
    fn future_timestamp_counts_as_fresh() {
        let now = eastern(11, 0);
        assert!(is_fresh(now + chrono::Duration::minutes(5), now));
    }
}
