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

//! The ELFF log context.
//!
//! [`Elff`] owns the schema of a log stream (its ordered list of fields) along with any
//! session-level directives, and renders both the directive header & individual entries as text.
//! It writes nothing itself: where the text goes is up to the caller (see [`Log`] for a thin
//! wrapper that hands it to a [`Sink`]).
//!
//! [`Log`]: crate::log::Log
//! [`Sink`]: crate::sink::Sink
//!
//! ```rust
//! use elff::elff::Elff;
//! use elff::entry::Entry;
//! use elff::field::{CLIENT_SERVER_METHOD, SERVER_CLIENT_STATUS};
//!
//! let elff = Elff::builder()
//!     .field(&CLIENT_SERVER_METHOD)
//!     .field(&SERVER_CLIENT_STATUS)
//!     .build();
//!
//! assert_eq!(elff.fields_directive_value(), "cs-method sc-status");
//!
//! let mut entry = Entry::new();
//! entry.set(&CLIENT_SERVER_METHOD, "GET");
//! assert_eq!(elff.format_entry(&entry).unwrap(), "GET -\n");
//! ```

use crate::{
    directive::{
        write_directive, DirectiveStore, LocalDirectives, SharedDirectives, DATE_DIRECTIVE,
        FIELDS_DIRECTIVE, LATEST_VERSION, VERSION_DIRECTIVE,
    },
    encode::{format_date_time, write_value},
    entry::Entry,
    error::Result,
    field::{AnyField, Field, Timestamp},
};

use chrono::Utc;

/// An ELFF log context: the fields of a log stream plus its session-level directives.
///
/// The field list is fixed at construction. Directives may be set & removed at any time; with the
/// default [`SharedDirectives`] store that may be done concurrently with rendering.
#[derive(Debug)]
pub struct Elff<D: DirectiveStore = SharedDirectives> {
    fields: Vec<AnyField>,
    directives: D,
}

impl Elff<SharedDirectives> {
    /// Construct a log context recording `fields`, in that order.
    pub fn new<I, F>(fields: I) -> Elff<SharedDirectives>
    where
        I: IntoIterator<Item = F>,
        F: Into<AnyField>,
    {
        Elff::with_directive_store(fields, SharedDirectives::new())
    }
    pub fn builder() -> ElffBuilder<SharedDirectives> {
        ElffBuilder {
            fields: Vec::new(),
            directives: SharedDirectives::new(),
        }
    }
}

impl Elff<LocalDirectives> {
    /// Construct a single-threaded log context recording `fields`, in that order.
    pub fn local<I, F>(fields: I) -> Elff<LocalDirectives>
    where
        I: IntoIterator<Item = F>,
        F: Into<AnyField>,
    {
        Elff::with_directive_store(fields, LocalDirectives::new())
    }
}

impl<D: DirectiveStore> Elff<D> {
    /// Construct a log context recording `fields`, keeping its directives in `directives`.
    pub fn with_directive_store<I, F>(fields: I, directives: D) -> Elff<D>
    where
        I: IntoIterator<Item = F>,
        F: Into<AnyField>,
    {
        Elff {
            fields: fields.into_iter().map(Into::into).collect(),
            directives,
        }
    }
    /// The fields of this log, in order
    pub fn fields(&self) -> &[AnyField] {
        &self.fields
    }
    /// The value of session directive `name`, if set
    pub fn directive(&self, name: &str) -> Option<String> {
        self.directives.get(name)
    }
    /// Set session directive `name` to `value`, returning its previous value, if any
    pub fn set_directive<N: Into<String>, V: Into<String>>(
        &self,
        name: N,
        value: V,
    ) -> Option<String> {
        self.directives.insert(name.into(), value.into())
    }
    /// Remove session directive `name`, returning its value, if any
    pub fn remove_directive(&self, name: &str) -> Option<String> {
        self.directives.remove(name)
    }
    /// The value of the `Fields` directive: each field's identifier, separated by spaces
    pub fn fields_directive_value(&self) -> String {
        self.fields
            .iter()
            .map(|field| field.to_string())
            .collect::<Vec<String>>()
            .join(" ")
    }
    /// Format the directive header for this log, dated now; see [`Elff::format_directives_at`].
    pub fn format_directives(&self, directives: &[(&str, &str)]) -> String {
        self.format_directives_at(directives, Utc::now())
    }
    /// Format the directive header for this log.
    ///
    /// The header comprises, in order:
    ///
    /// 1. the session directives
    /// 2. `directives`
    /// 3. `#Version: 1.0`
    /// 4. `#Date: ` followed by `date` (in GMT)
    /// 5. `#Fields: ` followed by the field identifiers
    ///
    /// The last three are always written, even if they also appear in the session directives or
    /// `directives`.
    pub fn format_directives_at(&self, directives: &[(&str, &str)], date: Timestamp) -> String {
        let mut buf = String::new();
        for (name, value) in self.directives.snapshot() {
            write_directive(&mut buf, &name, &value);
        }
        for (name, value) in directives {
            write_directive(&mut buf, name, value);
        }
        write_directive(&mut buf, VERSION_DIRECTIVE, LATEST_VERSION);
        write_directive(&mut buf, DATE_DIRECTIVE, &format_date_time(&date));
        write_directive(&mut buf, FIELDS_DIRECTIVE, &self.fields_directive_value());
        buf
    }
    /// Format `entry` as one line: the value of each field of this log, in order, separated by
    /// spaces & terminated by a newline.
    ///
    /// Fields with no value in `entry` are written as `-`. Fails only if a value in `entry` can't
    /// be written as its field's type (which can happen only when two fields of different types
    /// share an identifier).
    pub fn format_entry(&self, entry: &Entry) -> Result<String> {
        let mut buf = String::new();
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                buf.push(' ');
            }
            write_value(&mut buf, field, entry.value(field))?;
        }
        buf.push('\n');
        Ok(buf)
    }
}

/// Build an [`Elff`] one field at a time.
pub struct ElffBuilder<D: DirectiveStore> {
    fields: Vec<AnyField>,
    directives: D,
}

impl<D: DirectiveStore> ElffBuilder<D> {
    /// Append `field` to the log's fields
    pub fn field<T>(mut self, field: &Field<T>) -> Self {
        self.fields.push(field.into());
        self
    }
    /// Append `field` to the log's fields
    pub fn any_field(mut self, field: AnyField) -> Self {
        self.fields.push(field);
        self
    }
    /// Set a session directive
    pub fn directive<N: Into<String>, V: Into<String>>(self, name: N, value: V) -> Self {
        self.directives.insert(name.into(), value.into());
        self
    }
    /// Keep session directives in `directives` rather than the default store
    pub fn directive_store<D2: DirectiveStore>(self, directives: D2) -> ElffBuilder<D2> {
        ElffBuilder {
            fields: self.fields,
            directives,
        }
    }
    pub fn build(self) -> Elff<D> {
        Elff {
            fields: self.fields,
            directives: self.directives,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        directive::{REMARK_DIRECTIVE, SOFTWARE_DIRECTIVE},
        error::Error,
        field::{
            FieldIdentifier, CLIENT_IP, CLIENT_SERVER_METHOD, CLIENT_SERVER_URI_STEM,
            CLIENT_SERVER_USER_AGENT_HEADER, DATE, SERVER_CLIENT_BYTES, SERVER_CLIENT_STATUS, TIME,
        },
        types::{FieldIdentifierPrefix, FieldType},
    };

    use chrono::prelude::*;

    fn web_log() -> Elff {
        Elff::builder()
            .field(&DATE)
            .field(&TIME)
            .field(&CLIENT_SERVER_METHOD)
            .field(&CLIENT_SERVER_URI_STEM)
            .field(&SERVER_CLIENT_STATUS)
            .field(&SERVER_CLIENT_BYTES)
            .build()
    }

    #[test]
    fn fields_directive() {
        let elff = Elff::new([
            AnyField::from(&CLIENT_IP),
            AnyField::from(&CLIENT_SERVER_USER_AGENT_HEADER),
        ]);
        assert_eq!(elff.fields_directive_value(), "c-ip cs(User-Agent)");

        let empty = Elff::new(Vec::<AnyField>::new());
        assert_eq!(empty.fields_directive_value(), "");

        assert_eq!(
            web_log().fields_directive_value(),
            "date time cs-method cs-uri-stem sc-status sc-bytes"
        );
    }

    #[test]
    fn entries() {
        let elff = web_log();
        let mut entry = Entry::new();
        let when = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        entry.set(&DATE, when);
        entry.set(&TIME, when);
        entry.set(&CLIENT_SERVER_METHOD, "GET");
        entry.set(&CLIENT_SERVER_URI_STEM, "/index.html");
        entry.set(&SERVER_CLIENT_STATUS, 200);
        entry.set(&SERVER_CLIENT_BYTES, 1024);
        assert_eq!(
            elff.format_entry(&entry).unwrap(),
            "2024-01-15 10:30:00:000 GET /index.html 200 1024\n"
        );

        entry.unset(&SERVER_CLIENT_BYTES);
        entry.set(&CLIENT_SERVER_URI_STEM, "/my documents/a+b.html");
        assert_eq!(
            elff.format_entry(&entry).unwrap(),
            "2024-01-15 10:30:00:000 GET /my+documents/a++b.html 200 -\n"
        );

        // values for fields outside the schema are ignored
        entry.set(&CLIENT_IP, "10.0.0.1");
        assert!(!elff.format_entry(&entry).unwrap().contains("10.0.0.1"));
    }

    #[test]
    fn method_and_missing_status() {
        let elff = Elff::new([
            AnyField::from(&CLIENT_SERVER_METHOD),
            AnyField::from(&SERVER_CLIENT_STATUS),
        ]);
        let mut entry = Entry::new();
        entry.set(&CLIENT_SERVER_METHOD, "GET");
        assert_eq!(elff.format_entry(&entry).unwrap(), "GET -\n");
    }

    #[test]
    fn empty_schema() {
        let elff = Elff::local(Vec::<AnyField>::new());
        let mut entry = Entry::new();
        entry.set(&CLIENT_SERVER_METHOD, "GET");
        assert_eq!(elff.format_entry(&entry).unwrap(), "\n");
        assert_eq!(elff.format_entry(&Entry::new()).unwrap(), "\n");
    }

    #[test]
    fn mismatch_fails_the_render() {
        // two fields of different types with the same identifier
        let as_text = Field::string(Some(FieldIdentifierPrefix::Server), "load").unwrap();
        let as_fixed = Field::<f64>::new(
            FieldIdentifier::new(Some(FieldIdentifierPrefix::Server), "load").unwrap(),
            FieldType::Fixed,
        )
        .unwrap();
        let elff = Elff::builder().field(&as_fixed).build();
        let mut entry = Entry::new();
        entry.set(&as_text, "high");
        assert!(matches!(
            elff.format_entry(&entry),
            Err(Error::ValueTypeMismatch { .. })
        ));
    }

    #[test]
    fn directives() {
        let elff = Elff::builder()
            .field(&CLIENT_SERVER_METHOD)
            .directive(SOFTWARE_DIRECTIVE, "elff")
            .build();
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(
            elff.format_directives_at(&[(REMARK_DIRECTIVE, "hello")], date),
            "#Software: elff\n\
             #Remark: hello\n\
             #Version: 1.0\n\
             #Date: 2024-01-15 10:30:00:123\n\
             #Fields: cs-method\n"
        );

        assert_eq!(elff.remove_directive(SOFTWARE_DIRECTIVE), Some("elff".into()));
        assert_eq!(elff.directive(SOFTWARE_DIRECTIVE), None);
        assert_eq!(
            elff.format_directives_at(&[], date),
            "#Version: 1.0\n#Date: 2024-01-15 10:30:00:123\n#Fields: cs-method\n"
        );
    }

    #[test]
    fn mandatory_directives_are_duplicated() {
        let elff = Elff::builder()
            .field(&DATE)
            .directive(VERSION_DIRECTIVE, "0.9")
            .build();
        let header = elff.format_directives(&[(FIELDS_DIRECTIVE, "bogus"), (DATE_DIRECTIVE, "x")]);
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "#Version: 0.9");
        assert_eq!(lines[1], "#Fields: bogus");
        assert_eq!(lines[2], "#Date: x");
        assert_eq!(lines[3], "#Version: 1.0");
        assert_eq!(lines[5], "#Fields: date");

        // the mandatory Date line is "YYYY-MM-DD HH:MM:SS:SSS"
        let date = lines[4].strip_prefix("#Date: ").unwrap();
        assert_eq!(date.len(), 23);
        assert!(NaiveDateTime::parse_from_str(&date[..19], "%Y-%m-%d %H:%M:%S").is_ok());
        assert_eq!(&date[19..20], ":");
        assert!(date[20..].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(
            header.matches("#Version: 1.0\n").count(),
            1,
            "exactly one mandatory Version line"
        );
    }

    #[test]
    fn local_directive_store() {
        let elff = Elff::builder()
            .directive_store(LocalDirectives::new())
            .directive("B", "1")
            .directive("A", "2")
            .build();
        assert!(elff
            .format_directives(&[])
            .starts_with("#B: 1\n#A: 2\n#Version: 1.0\n"));
    }

    #[test]
    fn shared_between_threads() {
        let elff = std::sync::Arc::new(web_log());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let elff = elff.clone();
                std::thread::spawn(move || {
                    let mut entry = Entry::new();
                    entry.set(&SERVER_CLIENT_STATUS, 200 + t);
                    elff.set_directive(format!("X-Thread-{}", t), "up");
                    elff.format_entry(&entry).unwrap()
                })
            })
            .collect();
        for (t, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("- - - - {} -\n", 200 + t));
        }
        for t in 0..4 {
            assert_eq!(elff.directive(&format!("X-Thread-{}", t)), Some("up".into()));
        }
    }
}
