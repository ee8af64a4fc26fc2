//! Payload extraction for `label: value` marker lines.

use crate::error::{ParseError, ParseResult};

/// The value segment of a marker line: the text between the first colon
/// and the next one (or the end of the line), trimmed.
pub fn payload<'a>(marker: &'static str, line: &'a str) -> ParseResult<&'a str> {
    line.split(':')
        .nth(1)
        .map(str::trim)
        .ok_or_else(|| ParseError::MissingColon {
            marker,
            line: line.to_string(),
        })
}

pub fn extract_int(marker: &'static str, line: &str) -> ParseResult<i64> {
    let value = payload(marker, line)?;
    value.parse().map_err(|_| ParseError::InvalidInteger {
        marker,
        value: value.to_string(),
    })
}

pub fn extract_float(marker: &'static str, line: &str) -> ParseResult<f64> {
    let value = payload(marker, line)?;
    let invalid = || ParseError::InvalidFloat {
        marker,
        value: value.to_string(),
    };
    let parsed: f64 = value.parse().map_err(|_| invalid())?;
    if !parsed.is_finite() {
        return Err(invalid());
    }
    Ok(parsed)
}

/// Parse the elapsed time of a `Total analysis time: H:M:S.ff` line into
/// seconds. A leading day count (`D.H:M:S.ff`) is accepted as well.
pub fn extract_elapsed(marker: &'static str, line: &str) -> ParseResult<f64> {
    let (_, value) = line.split_once(':').ok_or_else(|| ParseError::MissingColon {
        marker,
        line: line.to_string(),
    })?;
    let value = value.trim();
    let invalid = || ParseError::InvalidElapsed {
        value: value.to_string(),
    };

    let parts: Vec<&str> = value.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(invalid());
    };

    let hours = match hours.split_once('.') {
        Some((days, hours)) => {
            let days: u64 = days.parse().map_err(|_| invalid())?;
            let hours: u64 = hours.parse().map_err(|_| invalid())?;
            days.checked_mul(24)
                .and_then(|h| h.checked_add(hours))
                .ok_or_else(invalid)?
        }
        None => hours.parse().map_err(|_| invalid())?,
    };
    let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
    let seconds: f64 = seconds.parse().map_err(|_| invalid())?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid());
    }

    let whole = hours
        .checked_mul(3600)
        .and_then(|s| s.checked_add(minutes.checked_mul(60)?))
        .ok_or_else(invalid)?;
    Ok(whole as f64 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_takes_segment_after_first_colon() {
        assert_eq!(payload("Methods:", "Methods: 42").unwrap(), "42");
        assert_eq!(
            payload("Interesting methods", "Interesting methods (not failed): 7 ").unwrap(),
            "7"
        );
        assert_eq!(payload("X", "X: 1: 2").unwrap(), "1");
    }

    #[test]
    fn test_payload_missing_colon() {
        let err = payload("Methods failed", "Methods failed 3").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColon {
                marker: "Methods failed",
                line: "Methods failed 3".to_string()
            }
        );
    }

    #[test]
    fn test_extract_int() {
        assert_eq!(extract_int("Methods:", "Methods: 10").unwrap(), 10);
        assert_eq!(extract_int("Methods:", "Methods:0").unwrap(), 0);
        assert!(matches!(
            extract_int("Methods:", "Methods: ten"),
            Err(ParseError::InvalidInteger { .. })
        ));
        assert!(matches!(
            extract_int("Methods:", "Methods:"),
            Err(ParseError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_extract_float() {
        let value = extract_float("!Union", "!Union columns percentage count cumulative: 12.5")
            .unwrap();
        assert_eq!(value, 12.5);
        assert!(extract_float("!Union", "!Union columns percentage: n/a").is_err());
    }

    #[test]
    fn test_extract_elapsed() {
        let marker = "Total analysis time";
        assert_eq!(
            extract_elapsed(marker, "Total analysis time: 00:00:01.50").unwrap(),
            1.5
        );
        assert_eq!(
            extract_elapsed(marker, "Total analysis time: 01:02:03.25").unwrap(),
            3723.25
        );
        assert_eq!(
            extract_elapsed(marker, "Total analysis time: 1.00:00:00").unwrap(),
            86400.0
        );
    }

    #[test]
    fn test_extract_elapsed_rejects_malformed() {
        let marker = "Total analysis time";
        assert!(matches!(
            extract_elapsed(marker, "Total analysis time: 12.5s"),
            Err(ParseError::InvalidElapsed { .. })
        ));
        assert!(matches!(
            extract_elapsed(marker, "Total analysis time: aa:bb:cc"),
            Err(ParseError::InvalidElapsed { .. })
        ));
        assert!(matches!(
            extract_elapsed(marker, "Total analysis time"),
            Err(ParseError::MissingColon { .. })
        ));
    }

    #[test]
    fn test_extract_elapsed_out_of_range() {
        let marker = "Total analysis time";
        for line in [
            "Total analysis time: 9999999999999999999:00:00",
            "Total analysis time: 0:99999999999999999999:00",
            "Total analysis time: 999999999999999999.0:00:00",
            "Total analysis time: 0:00:nan",
            "Total analysis time: 0:00:inf",
        ] {
            assert!(
                matches!(
                    extract_elapsed(marker, line),
                    Err(ParseError::InvalidElapsed { .. })
                ),
                "accepted {}",
                line
            );
        }
    }

    #[test]
    fn test_extract_float_rejects_non_finite() {
        assert!(matches!(
            extract_float("!Union", "!Union columns percentage: NaN"),
            Err(ParseError::InvalidFloat { .. })
        ));
        assert!(extract_float("!Union", "!Union columns percentage: inf").is_err());
    }
}
