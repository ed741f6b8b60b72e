// Copyright (C) 2022-2025 Michael Herstine <sp1ff@pobox.com>
//
// This file is part of elff.
//
// elff is free software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// elff is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even
// the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details.
//
// You should have received a copy of the GNU General Public License along with elff.  If not, see
// <http://www.gnu.org/licenses/>.

//! Encoding field values as ELFF text.
//!
//! Every value is rendered according to the [`FieldType`] of its field:
//!
//! - [`FieldType::Fixed`]: the shortest decimal form that round-trips the `f64`, without an
//!   exponent (`0.25`, `1.0`); see [`format_fixed`]
//! - [`FieldType::Integer`]: base ten, no grouping
//! - [`FieldType::Uri`]: the URI's string form, verbatim
//! - [`FieldType::Date`]: `YYYY-MM-DD`, in GMT
//! - [`FieldType::Time`]: `HH:MM:SS:SSS`, in GMT
//! - [`FieldType::String`]: escaped with [`encode_string`]
//! - [`FieldType::Address`]: verbatim
//!
//! An absent value is written as [`NULL_FIELD_VALUE`] whatever the field's type.

use crate::{
    error::{Error, Result},
    field::{AnyField, Value},
    types::FieldType,
};

use backtrace::Backtrace;
use chrono::prelude::*;

/// The value written for a field that has no value in an entry.
pub const NULL_FIELD_VALUE: &str = "-";

/// [`chrono`] format for an ELFF date
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// [`chrono`] format for an ELFF time; note that the milliseconds are separated by a colon
pub const TIME_FORMAT: &str = "%H:%M:%S:%3f";
/// [`chrono`] format for an ELFF date & time, as used in the `Date` directive
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S:%3f";

/// Encode a string for storing as a field value.
///
/// Entries are delimited by spaces, so every `+` is doubled and then every space replaced with a
/// single `+`: `"a b+c"` becomes `"a+b++c"`.
pub fn encode_string(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '+' => encoded.push_str("++"),
            ' ' => encoded.push('+'),
            c => encoded.push(c),
        }
    }
    encoded
}

/// Format the GMT calendar day of `instant` as `YYYY-MM-DD`
pub fn format_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant.with_timezone(&Utc).format(DATE_FORMAT).to_string()
}

/// Format the GMT wall-clock time of `instant` as `HH:MM:SS:SSS`
pub fn format_time<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant.with_timezone(&Utc).format(TIME_FORMAT).to_string()
}

/// Format `instant` in GMT as `YYYY-MM-DD HH:MM:SS:SSS`
pub fn format_date_time<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant.with_timezone(&Utc).format(DATE_TIME_FORMAT).to_string()
}

/// Format `x` as a FIXED value: decimal notation, never an exponent, with at least one digit after
/// the point (`1.0`, `0.00001`, `10000000000000000.0`). `None` for infinities & NaN, which have no
/// such form.
pub fn format_fixed(x: f64) -> Option<String> {
    if !x.is_finite() {
        return None;
    }
    // `Display` for `f64` is the shortest representation that round-trips, without an exponent
    let mut text = x.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    Some(text)
}

/// Append the encoding of `value` as a value of `field` to `buf`.
///
/// Fails if `value` is not of a kind `field`'s type can carry, or is a non-finite FIXED value;
/// nothing is appended in either case.
pub fn write_value(buf: &mut String, field: &AnyField, value: Option<&Value>) -> Result<()> {
    let value = match value {
        Some(value) => value,
        None => {
            buf.push_str(NULL_FIELD_VALUE);
            return Ok(());
        }
    };
    let encoded = match field.field_type() {
        FieldType::Address => match value {
            Value::Text(text) => Some(text.clone()),
            _ => None,
        },
        FieldType::Date => match value {
            Value::Timestamp(ts) => Some(format_date(ts)),
            _ => None,
        },
        FieldType::Fixed => match value {
            Value::Fixed(x) => Some(format_fixed(*x).ok_or_else(|| Error::NonFiniteFixed {
                name: field.to_string(),
                value: *x,
                back: Backtrace::new(),
            })?),
            _ => None,
        },
        FieldType::Integer => match value {
            Value::Integer(n) => Some(n.to_string()),
            _ => None,
        },
        FieldType::String => match value {
            Value::Text(text) => Some(encode_string(text)),
            _ => None,
        },
        FieldType::Time => match value {
            Value::Timestamp(ts) => Some(format_time(ts)),
            _ => None,
        },
        FieldType::Uri => match value {
            Value::Uri(uri) => Some(uri.to_string()),
            _ => None,
        },
    };
    match encoded {
        Some(text) => {
            buf.push_str(&text);
            Ok(())
        }
        None => Err(Error::ValueTypeMismatch {
            name: field.to_string(),
            field_type: field.field_type(),
            back: Backtrace::new(),
        }),
    }
}

/// Encode `value` as a value of `field`; see [`write_value`].
pub fn encode_value(field: &AnyField, value: Option<&Value>) -> Result<String> {
    let mut buf = String::new();
    write_value(&mut buf, field, value)?;
    Ok(buf)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::field::{
        AnyField, Field, BYTES, CLIENT_IP, CLIENT_SERVER_METHOD, CLIENT_SERVER_URI, DATE, TIME,
        TIME_TAKEN,
    };

    #[test]
    fn absent_values_are_null() {
        let fields: Vec<AnyField> = vec![
            (&DATE).into(),
            (&TIME).into(),
            (&TIME_TAKEN).into(),
            (&BYTES).into(),
            (&CLIENT_IP).into(),
            (&CLIENT_SERVER_METHOD).into(),
            (&CLIENT_SERVER_URI).into(),
        ];
        for field in &fields {
            assert_eq!(encode_value(field, None).unwrap(), "-");
        }
    }

    #[test]
    fn strings() {
        assert_eq!(encode_string("a b+c"), "a+b++c");
        assert_eq!(encode_string("a b+c"), encode_string("a b+c"));
        assert_eq!(encode_string(""), "");
        assert_eq!(encode_string("++ "), "+++++");
        assert_eq!(encode_string("\"quoted\""), "\"quoted\"");
        assert_eq!(
            encode_value(
                CLIENT_SERVER_METHOD.as_any(),
                Some(&Value::Text("GET it".to_string()))
            )
            .unwrap(),
            "GET+it"
        );
        // addresses are not escaped
        assert_eq!(
            encode_value(CLIENT_IP.as_any(), Some(&Value::Text("::1 x+".to_string()))).unwrap(),
            "::1 x+"
        );
    }

    #[test]
    fn numbers() {
        let fixed = |x: f64| encode_value(TIME_TAKEN.as_any(), Some(&Value::Fixed(x))).unwrap();
        assert_eq!(fixed(0.25), "0.25");
        assert_eq!(fixed(1.0), "1.0");
        assert_eq!(fixed(-3.5), "-3.5");
        assert_eq!(fixed(1e16), "10000000000000000.0");
        assert_eq!(fixed(1e-5), "0.00001");
        assert_eq!(fixed(123456789.125), "123456789.125");
        assert_eq!(fixed(-0.0), "-0.0");
        for x in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert_eq!(format_fixed(x), None);
            let mut buf = String::from("GET ");
            assert!(matches!(
                write_value(&mut buf, TIME_TAKEN.as_any(), Some(&Value::Fixed(x))),
                Err(Error::NonFiniteFixed { .. })
            ));
            assert_eq!(buf, "GET ");
        }

        let integer = |n: i64| encode_value(BYTES.as_any(), Some(&Value::Integer(n))).unwrap();
        assert_eq!(integer(0), "0");
        assert_eq!(integer(1024), "1024");
        assert_eq!(integer(-17), "-17");
        assert_eq!(integer(1_000_000_000_000), "1000000000000");
    }

    #[test]
    fn uris() {
        let uri: http::Uri = "http://example.com/a/b?c=d".parse().unwrap();
        assert_eq!(
            encode_value(CLIENT_SERVER_URI.as_any(), Some(&Value::Uri(uri))).unwrap(),
            "http://example.com/a/b?c=d"
        );
        let relative: http::Uri = "/index.html".parse().unwrap();
        assert_eq!(
            encode_value(CLIENT_SERVER_URI.as_any(), Some(&Value::Uri(relative))).unwrap(),
            "/index.html"
        );
    }

    #[test]
    fn dates_and_times_are_gmt() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 5).unwrap()
            + chrono::Duration::milliseconds(7);
        // the same instant, observed from UTC-08:00 & UTC+09:00
        let pst = utc.with_timezone(&FixedOffset::west_opt(8 * 3600).unwrap());
        let jst = utc.with_timezone(&FixedOffset::east_opt(9 * 3600).unwrap());

        for date in [format_date(&utc), format_date(&pst), format_date(&jst)] {
            assert_eq!(date, "2024-01-15");
        }
        for time in [format_time(&utc), format_time(&pst), format_time(&jst)] {
            assert_eq!(time, "23:30:05:007");
        }
        assert_eq!(format_date_time(&jst), "2024-01-15 23:30:05:007");

        assert_eq!(
            encode_value(DATE.as_any(), Some(&Value::Timestamp(pst.into()))).unwrap(),
            "2024-01-15"
        );
        assert_eq!(
            encode_value(TIME.as_any(), Some(&Value::Timestamp(utc))).unwrap(),
            "23:30:05:007"
        );
    }

    #[test]
    fn mismatched_values_fail() {
        let err = encode_value(TIME_TAKEN.as_any(), Some(&Value::Text("fast".to_string())));
        assert!(matches!(err, Err(Error::ValueTypeMismatch { .. })));

        let status = Field::integer(None, "status").unwrap();
        let mut buf = String::from("GET ");
        assert!(write_value(&mut buf, &status, Some(&Value::Fixed(1.5))).is_err());
        assert_eq!(buf, "GET ");
    }
}
