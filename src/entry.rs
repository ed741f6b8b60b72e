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

//! [`Entry`]: the field values recorded for one logged event.

use crate::{
    error::{Error, Result},
    field::{AnyField, Field, FieldIdentifier, FieldValue, Value},
};

use backtrace::Backtrace;
use http::Uri;

use std::collections::HashMap;

/// The values of one ELFF entry, keyed by field.
///
/// Values are typed by their field: an `Entry` will only accept an `i64` for a `Field<i64>`, and
/// so on. Entries are unordered; the order in which values are written is the order of the fields
/// in the [`Elff`](crate::elff::Elff) rendering the entry, and fields with no value in the entry
/// are written as `-`.
///
/// ```rust
/// use elff::entry::Entry;
/// use elff::field::{CLIENT_SERVER_METHOD, SERVER_CLIENT_STATUS};
///
/// let mut entry = Entry::new();
/// entry.set(&CLIENT_SERVER_METHOD, "GET");
/// entry.set(&SERVER_CLIENT_STATUS, 200);
/// assert_eq!(entry.get(&SERVER_CLIENT_STATUS), Some(&200));
/// assert_eq!(entry.unset(&SERVER_CLIENT_STATUS), Some(200));
/// assert_eq!(entry.get(&SERVER_CLIENT_STATUS), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Entry {
    values: HashMap<FieldIdentifier, Value>,
}

impl Entry {
    pub fn new() -> Entry {
        Entry::default()
    }
    /// Retrieve the value stored for `field`, if any.
    pub fn get<T: FieldValue>(&self, field: &Field<T>) -> Option<&T> {
        self.values
            .get(field.identifier())
            .and_then(T::from_value_ref)
    }
    /// Store `value` for `field`, returning the value previously stored, if any.
    pub fn set<T: FieldValue, V: Into<T>>(&mut self, field: &Field<T>, value: V) -> Option<T> {
        self.values
            .insert(field.identifier().clone(), value.into().into_value())
            .and_then(T::from_value)
    }
    /// Parse `text` as a URI & store it for `field`, returning the value previously stored, if any.
    pub fn set_uri_str(&mut self, field: &Field<Uri>, text: &str) -> Result<Option<Uri>> {
        let uri = text.parse::<Uri>().map_err(|err| Error::BadUri {
            text: text.to_owned(),
            source: err,
            back: Backtrace::new(),
        })?;
        Ok(self.set(field, uri))
    }
    /// Store `value` for `field` if it is `Some`, or remove any value stored for `field` if it is
    /// `None`; either way, return the value previously stored, if any.
    pub fn set_opt<T: FieldValue>(&mut self, field: &Field<T>, value: Option<T>) -> Option<T> {
        match value {
            Some(value) => self.set(field, value),
            None => self.unset(field),
        }
    }
    /// Remove any value stored for `field`, returning it.
    pub fn unset<T: FieldValue>(&mut self, field: &Field<T>) -> Option<T> {
        self.values
            .remove(field.identifier())
            .and_then(T::from_value)
    }
    pub fn contains(&self, field: &AnyField) -> bool {
        self.values.contains_key(field.identifier())
    }
    /// The number of fields with a value
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn clear(&mut self) {
        self.values.clear()
    }
    /// The untyped value stored for `field`, if any
    pub fn value(&self, field: &AnyField) -> Option<&Value> {
        self.values.get(field.identifier())
    }
    /// Store an untyped value for `field`, checking that it is of a kind `field` can carry.
    pub fn set_value(&mut self, field: &AnyField, value: Value) -> Result<Option<Value>> {
        if !value.fits(field.field_type()) {
            return Err(Error::ValueTypeMismatch {
                name: field.to_string(),
                field_type: field.field_type(),
                back: Backtrace::new(),
            });
        }
        Ok(self.values.insert(field.identifier().clone(), value))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::field::{
        Timestamp, CLIENT_SERVER_METHOD, CLIENT_SERVER_URI, DATE, SERVER_CLIENT_BYTES,
        SERVER_CLIENT_STATUS, TIME_TAKEN,
    };
    use crate::types::FieldType;

    use chrono::prelude::*;

    #[test]
    fn set_get_unset() {
        let mut entry = Entry::new();
        assert!(entry.is_empty());
        assert_eq!(entry.set(&CLIENT_SERVER_METHOD, "GET"), None);
        assert_eq!(
            entry.set(&CLIENT_SERVER_METHOD, String::from("POST")),
            Some("GET".to_string())
        );
        assert_eq!(entry.get(&CLIENT_SERVER_METHOD).map(String::as_str), Some("POST"));
        assert_eq!(entry.len(), 1);

        assert_eq!(entry.unset(&CLIENT_SERVER_METHOD), Some("POST".to_string()));
        assert_eq!(entry.get(&CLIENT_SERVER_METHOD), None);
        assert_eq!(entry.unset(&CLIENT_SERVER_METHOD), None);
        assert!(entry.is_empty());
    }

    #[test]
    fn storing_absence_removes() {
        let mut entry = Entry::new();
        entry.set(&TIME_TAKEN, 0.5f32);
        assert_eq!(entry.set_opt(&TIME_TAKEN, None), Some(0.5));
        assert!(!entry.contains(&TIME_TAKEN));
        assert_eq!(entry.set_opt(&TIME_TAKEN, Some(2.0)), None);
        assert_eq!(entry.get(&TIME_TAKEN), Some(&2.0));
    }

    #[test]
    fn conversions_on_set() {
        let mut entry = Entry::new();
        entry.set(&SERVER_CLIENT_STATUS, 404u16);
        entry.set(&SERVER_CLIENT_BYTES, 17i32);
        let local = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 0, 30, 0)
            .unwrap();
        entry.set(&DATE, local);
        assert_eq!(entry.get(&SERVER_CLIENT_STATUS), Some(&404));
        assert_eq!(entry.get(&SERVER_CLIENT_BYTES), Some(&17));
        let expected: Timestamp = Utc.with_ymd_and_hms(2023, 12, 31, 23, 30, 0).unwrap();
        assert_eq!(entry.get(&DATE), Some(&expected));
    }

    #[test]
    fn uris_from_text() {
        let mut entry = Entry::new();
        assert_eq!(
            entry
                .set_uri_str(&CLIENT_SERVER_URI, "https://example.com/a?b=c")
                .unwrap(),
            None
        );
        assert_eq!(
            entry.get(&CLIENT_SERVER_URI).map(|uri| uri.path()),
            Some("/a")
        );
        assert!(matches!(
            entry.set_uri_str(&CLIENT_SERVER_URI, "not a uri"),
            Err(Error::BadUri { .. })
        ));
        // the failed parse left the previous value in place
        assert!(entry.contains(&CLIENT_SERVER_URI));
    }

    #[test]
    fn untyped_values_are_checked() {
        let mut entry = Entry::new();
        assert!(entry
            .set_value(&SERVER_CLIENT_STATUS, Value::Text("ok".to_string()))
            .is_err());
        assert!(entry.is_empty());
        assert_eq!(
            entry
                .set_value(&SERVER_CLIENT_STATUS, Value::Integer(200))
                .unwrap(),
            None
        );
        assert_eq!(entry.get(&SERVER_CLIENT_STATUS), Some(&200));
        assert_eq!(
            entry.value(&SERVER_CLIENT_STATUS),
            Some(&Value::Integer(200))
        );
    }

    #[test]
    fn identifier_shared_across_types() {
        let as_text = Field::string(None, "load").unwrap();
        let as_fixed = Field::<f64>::new(
            FieldIdentifier::new(None, "load").unwrap(),
            FieldType::Fixed,
        )
        .unwrap();
        let mut entry = Entry::new();
        entry.set(&as_text, "high");
        // a value of the wrong kind reads back as absent
        assert_eq!(entry.get(&as_fixed), None);
        assert_eq!(entry.set(&as_fixed, 0.9), None);
        assert_eq!(entry.get(&as_text), None);
        assert_eq!(entry.len(), 1);
    }
}
