// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use chrono::{DateTime, NaiveDate, Utc};

/// Parses a deadline entered by the user.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC). Missing or
/// unparseable input yields `now`.
pub fn parse_deadline(input: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(input) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return now;
    };
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return timestamp.with_timezone(&Utc);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
        .unwrap_or(now)
}

/// Number of started days between `now` and `deadline`, rounded up.
///
/// Zero or negative when the deadline has passed.
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;
    let millis = (deadline - now).num_milliseconds();
    millis.div_euclid(DAY_MILLIS) + i64::from(millis.rem_euclid(DAY_MILLIS) != 0)
}

#[cfg(test)]
mod test {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn parse_deadline_formats() {
        assert_eq!(
            parse_deadline(Some("2026-04-02"), now()),
            Utc.with_ymd_and_hms(2026, 4, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_deadline(Some("2026-04-02T10:30:00+02:00"), now()),
            Utc.with_ymd_and_hms(2026, 4, 2, 8, 30, 0).unwrap()
        );
    }

    #[test]
    fn parse_deadline_falls_back_to_now() {
        assert_eq!(parse_deadline(None, now()), now());
        assert_eq!(parse_deadline(Some("  "), now()), now());
        assert_eq!(parse_deadline(Some("next friday"), now()), now());
    }

    #[test]
    fn days_until_rounds_up() {
        assert_eq!(days_until(now() + Duration::hours(1), now()), 1);
        assert_eq!(days_until(now() + Duration::days(3), now()), 3);
        assert_eq!(days_until(now() + Duration::hours(49), now()), 3);
        assert_eq!(days_until(now(), now()), 0);
        assert_eq!(days_until(now() - Duration::hours(1), now()), 0);
        assert_eq!(days_until(now() - Duration::hours(25), now()), -1);
    }
}
