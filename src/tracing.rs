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

//! Primitives for mapping [`tracing`] events to ELFF entries.
//!
//! [`EntryRecorder`] implementations turn [`Event`]s into [`Entry`]s for a given list of fields.
//! This module provides one implementation: [`FieldNameRecorder`], which matches the names of an
//! event's fields against the identifiers of the log's fields.
//!
//! [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
//! [`Event`]: https://docs.rs/tracing/0.1.35/tracing/struct.Event.html

use crate::{
    entry::Entry,
    field::{AnyField, Timestamp, Value, DATE, SERVER_DNS, SERVER_IP, TIME},
    types::FieldType,
};

use backtrace::Backtrace;
use chrono::{DateTime, Utc};

type StdResult<T, E> = std::result::Result<T, E>;

/// Map [`tracing`] [`Event`]s to ELFF [`Entry`]s.
///
/// [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
/// [`Event`]: https://docs.rs/tracing/0.1.35/tracing/struct.Event.html
///
/// The translation from [`tracing`] events to ELFF log lines occurs in three parts:
///
/// 1. recording the event's values as an [`Entry`] for the log's fields
///
/// 2. formatting that [`Entry`] as a line of text
///
/// 3. handing that line to a [`Sink`](crate::sink::Sink)
///
/// Trait [`EntryRecorder`] formally defines step 1; steps 2 & 3 are the business of
/// [`Log`](crate::log::Log). An implementation returns `None` for events that shouldn't be logged
/// at all.
pub trait EntryRecorder<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    type Error: std::error::Error + 'static;
    /// An event has occurred
    fn on_event(
        &self,
        fields: &[AnyField],
        event: &tracing::Event,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) -> StdResult<Option<Entry>, Self::Error>;
}

#[non_exhaustive]
pub enum Error {
    /// An event field's value can't be logged as the type of the ELFF field it names
    Incompatible {
        name: &'static str,
        field_type: FieldType,
        back: Backtrace,
    },
}

impl std::fmt::Display for Error {
    // `Error` is non-exhaustive so that adding variants won't be a breaking change to our
    // callers. That means the compiler won't catch us if we miss a variant here, so we
    // always include a `_` arm.
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Incompatible {
                name, field_type, ..
            } => write!(
                f,
                "The value of event field '{}' can't be logged as {}",
                name, field_type
            ),
            _ => write!(f, "event recording error"),
        }
    }
}

impl std::fmt::Debug for Error {
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Incompatible { back, .. } => write!(f, "{}\n{:#?}", self, back),
            _ => write!(f, "{}", self),
        }
    }
}

impl std::error::Error for Error {}

/// An [`EntryRecorder`] that stores each event field in the log field of the same name.
///
/// An event field named `n` is recorded in the log field whose identifier is `n`, or whose
/// identifier becomes `n` when each `-` is replaced with `_` (event field names are Rust
/// identifiers unless quoted), so both of these populate `cs-uri-stem`:
///
/// ```ignore
/// info!(cs_uri_stem = "/index.html");
/// info!("cs-uri-stem" = "/index.html");
/// ```
///
/// Values are converted to the log field's type where that makes sense (integers may be logged as
/// FIXED, text is parsed as INTEGER, FIXED, URI or RFC 3339 DATE/TIME values, and so on). A value
/// that can't be converted fails the event: it is not silently logged as `-`.
///
/// Events that record none of the log's fields produce no entry. For the rest, the well-known
/// `date`, `time`, `s-dns` & `s-ip` fields are filled-in if the log records them & the event
/// didn't supply them.
pub struct FieldNameRecorder {
    clock: fn() -> Timestamp,
    server_dns: Option<String>,
    server_ip: Option<String>,
}

impl std::default::Default for FieldNameRecorder {
    /// Stamp entries with the current time, and identify this host by [gethostname()] and the
    /// local IP address; either of the latter that can't be determined is simply left out.
    ///
    /// [gethostname()]: https://man7.org/linux/man-pages/man2/gethostname.2.html
    fn default() -> Self {
        FieldNameRecorder {
            clock: Utc::now,
            server_dns: hostname::get().ok().and_then(|hn| hn.into_string().ok()),
            server_ip: local_ip_address::local_ip().ok().map(|ip| ip.to_string()),
        }
    }
}

pub struct FieldNameRecorderBuilder {
    imp: FieldNameRecorder,
}

impl FieldNameRecorderBuilder {
    /// Use `clock` to stamp the `date` & `time` fields
    pub fn clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.imp.clock = clock;
        self
    }
    pub fn server_dns(mut self, server_dns: Option<String>) -> Self {
        self.imp.server_dns = server_dns;
        self
    }
    pub fn server_ip(mut self, server_ip: Option<std::net::IpAddr>) -> Self {
        self.imp.server_ip = server_ip.map(|ip| ip.to_string());
        self
    }
    pub fn build(self) -> FieldNameRecorder {
        self.imp
    }
}

impl FieldNameRecorder {
    pub fn builder() -> FieldNameRecorderBuilder {
        FieldNameRecorderBuilder {
            imp: FieldNameRecorder::default(),
        }
    }
    /// Record the values of `event` for `fields`; `Ok(None)` if `event` names none of them.
    pub fn record(
        &self,
        fields: &[AnyField],
        event: &tracing::Event,
    ) -> StdResult<Option<Entry>, Error> {
        let mut visitor = EntryVisitor {
            fields,
            entry: Entry::new(),
            matched: false,
            error: None,
        };
        event.record(&mut visitor);
        if let Some(err) = visitor.error {
            return Err(err);
        }
        if !visitor.matched {
            return Ok(None);
        }
        let mut entry = visitor.entry;
        let now = (self.clock)();
        for field in fields {
            if entry.contains(field) {
                continue;
            }
            let value = if field == DATE.as_any() || field == TIME.as_any() {
                Some(Value::Timestamp(now))
            } else if field == SERVER_DNS.as_any() {
                self.server_dns.clone().map(Value::Text)
            } else if field == SERVER_IP.as_any() {
                self.server_ip.clone().map(Value::Text)
            } else {
                None
            };
            // A field sharing a well-known identifier but not its type is left alone
            if let Some(value) = value.filter(|v| v.fits(field.field_type())) {
                let _ = entry.set_value(field, value);
            }
        }
        Ok(Some(entry))
    }
}

impl<S> EntryRecorder<S> for FieldNameRecorder
where
    S: tracing_core::subscriber::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    type Error = Error;
    fn on_event(
        &self,
        fields: &[AnyField],
        event: &tracing::Event,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) -> StdResult<Option<Entry>, Error> {
        self.record(fields, event)
    }
}

struct EntryVisitor<'a> {
    fields: &'a [AnyField],
    entry: Entry,
    matched: bool,
    error: Option<Error>,
}

impl<'a> EntryVisitor<'a> {
    fn store<F>(&mut self, event_field: &tracing::field::Field, convert: F)
    where
        F: FnOnce(FieldType) -> Option<Value>,
    {
        let fields = self.fields;
        let field = match fields
            .iter()
            .find(|f| f.identifier().matches(event_field.name()))
        {
            Some(field) => field,
            None => return,
        };
        self.matched = true;
        let stored = convert(field.field_type())
            .and_then(|value| self.entry.set_value(field, value).ok());
        if stored.is_none() && self.error.is_none() {
            self.error = Some(Error::Incompatible {
                name: event_field.name(),
                field_type: field.field_type(),
                back: Backtrace::new(),
            });
        }
    }
}

fn from_text(field_type: FieldType, text: &str) -> Option<Value> {
    match field_type {
        FieldType::Address | FieldType::String => Some(Value::Text(text.to_owned())),
        FieldType::Date | FieldType::Time => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|ts| Value::Timestamp(ts.with_timezone(&Utc))),
        FieldType::Fixed => text.parse::<f64>().ok().map(Value::Fixed),
        FieldType::Integer => text.parse::<i64>().ok().map(Value::Integer),
        FieldType::Uri => text.parse::<http::Uri>().ok().map(Value::Uri),
    }
}

fn from_i64(field_type: FieldType, value: i64) -> Option<Value> {
    match field_type {
        FieldType::Integer => Some(Value::Integer(value)),
        FieldType::Fixed => Some(Value::Fixed(value as f64)),
        FieldType::Address | FieldType::String => Some(Value::Text(value.to_string())),
        FieldType::Date | FieldType::Time | FieldType::Uri => None,
    }
}

impl<'a> tracing::field::Visit for EntryVisitor<'a> {
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.store(field, |ty| from_i64(ty, value))
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.store(field, |ty| match i64::try_from(value) {
            Ok(value) => from_i64(ty, value),
            Err(_) => match ty {
                FieldType::Fixed => Some(Value::Fixed(value as f64)),
                FieldType::Address | FieldType::String => Some(Value::Text(value.to_string())),
                _ => None,
            },
        })
    }
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.store(field, |ty| match ty {
            FieldType::Fixed => Some(Value::Fixed(value)),
            FieldType::Address | FieldType::String => Some(Value::Text(format!("{:?}", value))),
            _ => None,
        })
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.store(field, |ty| match ty {
            FieldType::Integer => Some(Value::Integer(value as i64)),
            FieldType::Address | FieldType::String => Some(Value::Text(value.to_string())),
            _ => None,
        })
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.store(field, |ty| from_text(ty, value))
    }
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        // The `message` field, and values recorded with `%`, arrive here pre-formatted, so their
        // `Debug` representation is their `Display` representation.
        self.store(field, |ty| from_text(ty, &format!("{:?}", value)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::field::{
        Field, CLIENT_SERVER_METHOD, CLIENT_SERVER_URI, CLIENT_SERVER_URI_STEM,
        SERVER_CLIENT_STATUS, TIME_TAKEN,
    };

    use chrono::TimeZone;
    use tracing::subscriber::with_default;
    use tracing_subscriber::{layer::SubscriberExt, registry::Registry};

    use std::sync::{Arc, Mutex};

    fn fixed_clock() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    fn recorder() -> FieldNameRecorder {
        FieldNameRecorder::builder()
            .clock(fixed_clock)
            .server_dns(Some("bree.local".to_string()))
            .server_ip(Some("10.0.0.2".parse().unwrap()))
            .build()
    }

    type Recorded = Arc<Mutex<Vec<StdResult<Option<Entry>, String>>>>;

    /// A layer that just hands each event to a [`FieldNameRecorder`] & keeps the result
    struct Capture {
        fields: Vec<AnyField>,
        recorder: FieldNameRecorder,
        recorded: Recorded,
    }

    impl<S> tracing_subscriber::layer::Layer<S> for Capture
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let result = self
                .recorder
                .on_event(&self.fields, event, ctx)
                .map_err(|err| err.to_string());
            self.recorded.lock().unwrap().push(result);
        }
    }

    fn capture<F: FnOnce()>(fields: Vec<AnyField>, f: F) -> Vec<StdResult<Option<Entry>, String>> {
        let recorded = Recorded::default();
        let subscriber = Registry::default().with(Capture {
            fields,
            recorder: recorder(),
            recorded: recorded.clone(),
        });
        with_default(subscriber, f);
        let results = std::mem::take(&mut *recorded.lock().unwrap());
        results
    }

    #[test]
    fn names_are_matched() {
        let fields = vec![
            AnyField::from(&CLIENT_SERVER_METHOD),
            AnyField::from(&CLIENT_SERVER_URI_STEM),
            AnyField::from(&SERVER_CLIENT_STATUS),
            AnyField::from(&TIME_TAKEN),
        ];
        let results = capture(fields, || {
            tracing::info!(
                cs_method = "GET",
                "cs-uri-stem" = "/a b",
                sc_status = 200,
                time_taken = 3
            );
            tracing::info!(unrelated = 1, "nothing to see here");
        });
        assert_eq!(results.len(), 2);
        let entry = results[0].as_ref().unwrap().as_ref().unwrap();
        assert_eq!(entry.get(&CLIENT_SERVER_METHOD).map(String::as_str), Some("GET"));
        assert_eq!(entry.get(&CLIENT_SERVER_URI_STEM).map(String::as_str), Some("/a b"));
        assert_eq!(entry.get(&SERVER_CLIENT_STATUS), Some(&200));
        assert_eq!(entry.get(&TIME_TAKEN), Some(&3.0));
        assert!(matches!(results[1], Ok(None)));
    }

    #[test]
    fn conversions() {
        let message = Field::string(None, "message").unwrap();
        let fields = vec![
            AnyField::from(&CLIENT_SERVER_URI),
            AnyField::from(&SERVER_CLIENT_STATUS),
            AnyField::from(&message),
        ];
        let status = 404u16;
        let results = capture(fields, || {
            tracing::warn!(cs_uri = "http://example.com/x?y=z", sc_status = %status, "not found");
        });
        let entry = results[0].as_ref().unwrap().as_ref().unwrap();
        assert_eq!(
            entry.get(&CLIENT_SERVER_URI).map(|uri| uri.to_string()),
            Some("http://example.com/x?y=z".to_string())
        );
        assert_eq!(entry.get(&SERVER_CLIENT_STATUS), Some(&404));
        assert_eq!(entry.get(&message).map(String::as_str), Some("not found"));
    }

    #[test]
    fn incompatible_values_fail() {
        let fields = vec![AnyField::from(&SERVER_CLIENT_STATUS)];
        let results = capture(fields, || {
            tracing::info!(sc_status = "teapot");
            tracing::info!(sc_status = 2.5);
        });
        assert_eq!(results.len(), 2);
        for result in results {
            let err = result.unwrap_err();
            assert!(err.contains("sc_status"), "{}", err);
            assert!(err.contains("INTEGER"), "{}", err);
        }
    }

    #[test]
    fn well_known_fields_are_filled() {
        let fields = vec![
            AnyField::from(&DATE),
            AnyField::from(&TIME),
            AnyField::from(&SERVER_DNS),
            AnyField::from(&SERVER_IP),
            AnyField::from(&CLIENT_SERVER_METHOD),
        ];
        let results = capture(fields, || {
            tracing::info!(cs_method = "PUT");
            tracing::info!(cs_method = "PUT", s_dns = "override.local");
        });
        let entry = results[0].as_ref().unwrap().as_ref().unwrap();
        assert_eq!(entry.get(&DATE), Some(&fixed_clock()));
        assert_eq!(entry.get(&TIME), Some(&fixed_clock()));
        assert_eq!(entry.get(&SERVER_DNS).map(String::as_str), Some("bree.local"));
        assert_eq!(entry.get(&SERVER_IP).map(String::as_str), Some("10.0.0.2"));

        let entry = results[1].as_ref().unwrap().as_ref().unwrap();
        assert_eq!(entry.get(&SERVER_DNS).map(String::as_str), Some("override.local"));
    }

    #[test]
    fn default_recorder() {
        // At least _exercise_ `Default`
        let recorder = FieldNameRecorder::default();
        let _ = (recorder.clock)();
    }
}
