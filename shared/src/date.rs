//! 取件时间规范化
//!
//! `datetime-local` 输入产出 `YYYY-MM-DDTHH:MM`（16 个字符）或带秒的本地时间；
//! 后端需要 UTC 的 ISO-8601，格式同 JS `toISOString()`：`YYYY-MM-DDTHH:MM:SS.mmmZ`。

use crate::error::ValidationError;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// 不带秒的 `datetime-local` 值长度
const MINUTE_PRECISION_LEN: usize = 16;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 按浏览器本地时区规范化
pub fn normalize_pickup_time(raw: &str) -> Result<String, ValidationError> {
    normalize_pickup_time_in(raw, &Local)
}

/// 按给定时区解释不带偏移量的时间
pub fn normalize_pickup_time_in<Tz: TimeZone>(
    raw: &str,
    tz: &Tz,
) -> Result<String, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::PickupTimeRequired);
    }

    let formatted = if raw.len() == MINUTE_PRECISION_LEN {
        format!("{}:00", raw)
    } else {
        raw.to_string()
    };

    let utc = parse_utc(&formatted, tz).ok_or(ValidationError::InvalidPickupTime)?;
    Ok(to_iso_string(&utc))
}

fn parse_utc<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(s, fmt).ok()?;
        // 夏令时切换处取较早的时刻；落在跳过区间内视为无效
        let local = tz.from_local_datetime(&naive).earliest()?;
        Some(local.with_timezone(&Utc))
    })
}

fn to_iso_string(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn minute_precision_gets_seconds_appended() {
        assert_eq!(
            normalize_pickup_time_in("2025-03-14T09:30", &Utc).unwrap(),
            "2025-03-14T09:30:00.000Z"
        );
    }

    #[test]
    fn local_time_is_converted_to_utc() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(
            normalize_pickup_time_in("2025-03-14T09:30:15", &ist).unwrap(),
            "2025-03-14T04:00:15.000Z"
        );
    }

    #[test]
    fn explicit_offsets_are_respected() {
        assert_eq!(
            normalize_pickup_time_in("2025-03-14T09:30:00-07:00", &Utc).unwrap(),
            "2025-03-14T16:30:00.000Z"
        );
    }

    #[test]
    fn result_is_parseable_iso_8601() {
        let iso = normalize_pickup_time("2025-12-01T18:45").unwrap();
        assert!(DateTime::parse_from_rfc3339(&iso).is_ok());
        assert!(iso.ends_with('Z'));
    }

    #[test]
    fn empty_and_garbage_are_rejected() {
        assert_eq!(
            normalize_pickup_time_in("  ", &Utc),
            Err(ValidationError::PickupTimeRequired)
        );
        assert_eq!(
            normalize_pickup_time_in("tomorrow at noon", &Utc),
            Err(ValidationError::InvalidPickupTime)
        );
        assert_eq!(
            normalize_pickup_time_in("2025-13-40T25:00", &Utc),
            Err(ValidationError::InvalidPickupTime)
        );
    }
}
