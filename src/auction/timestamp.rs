//! 권한 서버의 시각 직렬화
//!
//! 서버는 오프셋 없는 ISO-8601 시각(UTC 기준)을 내려줄 때가 있으므로
//! RFC 3339와 naive 형식을 모두 받아들이고, 보낼 때는 RFC 3339로 직렬화한다.
//! 서버가 naive 시각끼리 비교하는 입력값(번호판 마감 시간)은 `serialize_naive`로 보낸다.
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// 오프셋 없는 UTC 시각으로 직렬화 (`2026-03-01T12:00:00`)
pub fn serialize_naive<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.naive_utc().format(NAIVE_FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn naive_and_offset_forms_agree() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(parse("2026-03-01T12:00:00"), Some(expected));
        assert_eq!(parse("2026-03-01T12:00:00Z"), Some(expected));
        assert_eq!(parse("2026-03-01T14:00:00+02:00"), Some(expected));
        assert_eq!(parse("2026-03-01 12:00:00"), Some(expected));
    }

    #[test]
    fn fractional_seconds() {
        let parsed = parse("2026-03-01T12:00:00.250000").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn naive_serialization_has_no_offset() {
        #[derive(serde::Serialize)]
        struct Wire {
            #[serde(serialize_with = "serialize_naive")]
            at: DateTime<Utc>,
        }
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let value = serde_json::to_value(Wire { at }).unwrap();
        assert_eq!(value["at"], "2026-01-02T00:00:00");
        assert_eq!(parse("2026-01-02T00:00:00"), Some(at));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse("tomorrow"), None);
        assert_eq!(parse(""), None);
    }
}
