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

//! ELFF field identifiers & typed field definitions.
//!
//! A field is a named, typed column of an ELFF log. [`FieldIdentifier`] carries the name, the
//! optional [`FieldIdentifierPrefix`] and whether the name denotes an HTTP header. [`Field<T>`]
//! adds a [`FieldType`] tag and ties the field to the Rust type `T` of the values an
//! [`Entry`](crate::entry::Entry) stores for it, so that storing, say, text against a
//! [`FieldType::Fixed`] field is a compile-time error rather than a malformed log line.
//!
//! The type tag & the value type must agree; [`FieldValue::accepts`] defines which tags each value
//! type may carry:
//!
//! | value type       | field types                              |
//! |------------------|------------------------------------------|
//! | [`String`]       | [`FieldType::String`], [`FieldType::Address`] |
//! | [`Timestamp`]    | [`FieldType::Date`], [`FieldType::Time`] |
//! | `f64`            | [`FieldType::Fixed`]                     |
//! | `i64`            | [`FieldType::Integer`]                   |
//! | [`http::Uri`]    | [`FieldType::Uri`]                       |
//!
//! Schemas mix fields of different value types; [`AnyField`] is the type-erased form used for such
//! lists. Fields compare & hash by identifier alone.
//!
//! The well-known fields are provided as constants; callers are free to define their own:
//!
//! ```rust
//! use elff::field::{Field, FieldIdentifier, CLIENT_SERVER_METHOD};
//! use elff::types::{FieldIdentifierPrefix, FieldType};
//!
//! assert_eq!(CLIENT_SERVER_METHOD.to_string(), "cs-method");
//!
//! let session: Field<String> =
//!     Field::string(Some(FieldIdentifierPrefix::ApplicationSpecific), "session").unwrap();
//! assert_eq!(session.to_string(), "x-session");
//!
//! // `f64` values can't be logged as INTEGERs
//! let ratio = FieldIdentifier::new(None, "ratio").unwrap();
//! assert!(Field::<f64>::new(ratio, FieldType::Integer).is_err());
//! ```

use crate::{
    error::{Error, Result},
    types::{FieldIdentifierPrefix, FieldType},
};

use backtrace::Backtrace;
use chrono::{DateTime, Utc};
use http::Uri;

use std::{borrow::Cow, marker::PhantomData, ops::Deref};

type StdResult<T, E> = std::result::Result<T, E>;

/// An instant, as logged by [`FieldType::Date`] & [`FieldType::Time`] fields.
pub type Timestamp = DateTime<Utc>;

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                        FieldIdentifier                                         //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// The identifier of a field: an optional prefix, a non-empty name & a header flag.
///
/// A header identifier names an HTTP header rather than a W3C attribute; the distinction only
/// affects how the identifier is written in the `Fields` directive (`cs(User-Agent)` rather than
/// `cs-uri-stem`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldIdentifier {
    prefix: Option<FieldIdentifierPrefix>,
    name: Cow<'static, str>,
    is_header: bool,
}

impl FieldIdentifier {
    /// Construct an identifier for an attribute (i.e. not a header); `name` may not be empty.
    pub fn new<N: Into<Cow<'static, str>>>(
        prefix: Option<FieldIdentifierPrefix>,
        name: N,
    ) -> Result<FieldIdentifier> {
        FieldIdentifier::with_header_flag(prefix, name.into(), false)
    }
    /// Construct an identifier for an HTTP header; `name` may not be empty.
    pub fn header<N: Into<Cow<'static, str>>>(
        prefix: Option<FieldIdentifierPrefix>,
        name: N,
    ) -> Result<FieldIdentifier> {
        FieldIdentifier::with_header_flag(prefix, name.into(), true)
    }
    fn with_header_flag(
        prefix: Option<FieldIdentifierPrefix>,
        name: Cow<'static, str>,
        is_header: bool,
    ) -> Result<FieldIdentifier> {
        if name.is_empty() {
            return Err(Error::EmptyFieldName {
                back: Backtrace::new(),
            });
        }
        Ok(FieldIdentifier {
            prefix,
            name,
            is_header,
        })
    }
    const fn from_static(
        prefix: Option<FieldIdentifierPrefix>,
        name: &'static str,
        is_header: bool,
    ) -> FieldIdentifier {
        assert!(!name.is_empty());
        FieldIdentifier {
            prefix,
            name: Cow::Borrowed(name),
            is_header,
        }
    }
    pub fn prefix(&self) -> Option<FieldIdentifierPrefix> {
        self.prefix
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn is_header(&self) -> bool {
        self.is_header
    }
    /// This identifier as it appears in the `Fields` directive (`c-ip`, `cs(User-Agent)`)
    pub fn token(&self) -> String {
        self.to_string()
    }
    /// Whether `name` designates this identifier: either its `Fields` directive token exactly, or
    /// that token with each `-` replaced by `_` (so that `cs_uri_stem` matches `cs-uri-stem`).
    pub fn matches(&self, name: &str) -> bool {
        let token = self.token();
        token == name
            || (token.len() == name.len()
                && token
                    .chars()
                    .zip(name.chars())
                    .all(|(t, n)| t == n || (t == '-' && n == '_')))
    }
}

impl std::fmt::Display for FieldIdentifier {
    /// Format this identifier as it appears in the `Fields` directive.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        match self.prefix {
            Some(prefix) if self.is_header => write!(f, "{}({})", prefix, self.name),
            Some(prefix) => write!(f, "{}-{}", prefix, self.name),
            None => f.write_str(&self.name),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                         field values                                           //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// A field value, erased to one of the semantic kinds ELFF can log.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Timestamp(Timestamp),
    Fixed(f64),
    Integer(i64),
    Uri(Uri),
}

mod private {
    pub trait Sealed {}
    impl Sealed for String {}
    impl Sealed for super::Timestamp {}
    impl Sealed for f64 {}
    impl Sealed for i64 {}
    impl Sealed for http::Uri {}
}

/// The Rust types a [`Field`] may hold.
///
/// This trait is sealed: the set of value kinds is fixed by the format.
pub trait FieldValue: private::Sealed + Sized {
    /// Name of this type, for error messages
    const TYPE_NAME: &'static str;
    /// Whether a field of type `field_type` may hold values of this type
    fn accepts(field_type: FieldType) -> bool;
    fn into_value(self) -> Value;
    fn from_value(value: Value) -> Option<Self>;
    fn from_value_ref(value: &Value) -> Option<&Self>;
}

impl FieldValue for String {
    const TYPE_NAME: &'static str = "String";
    fn accepts(field_type: FieldType) -> bool {
        matches!(field_type, FieldType::String | FieldType::Address)
    }
    fn into_value(self) -> Value {
        Value::Text(self)
    }
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
    fn from_value_ref(value: &Value) -> Option<&Self> {
        match value {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl FieldValue for Timestamp {
    const TYPE_NAME: &'static str = "DateTime<Utc>";
    fn accepts(field_type: FieldType) -> bool {
        matches!(field_type, FieldType::Date | FieldType::Time)
    }
    fn into_value(self) -> Value {
        Value::Timestamp(self)
    }
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }
    fn from_value_ref(value: &Value) -> Option<&Self> {
        match value {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }
}

impl FieldValue for f64 {
    const TYPE_NAME: &'static str = "f64";
    fn accepts(field_type: FieldType) -> bool {
        field_type == FieldType::Fixed
    }
    fn into_value(self) -> Value {
        Value::Fixed(self)
    }
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Fixed(x) => Some(x),
            _ => None,
        }
    }
    fn from_value_ref(value: &Value) -> Option<&Self> {
        match value {
            Value::Fixed(x) => Some(x),
            _ => None,
        }
    }
}

impl FieldValue for i64 {
    const TYPE_NAME: &'static str = "i64";
    fn accepts(field_type: FieldType) -> bool {
        field_type == FieldType::Integer
    }
    fn into_value(self) -> Value {
        Value::Integer(self)
    }
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }
    fn from_value_ref(value: &Value) -> Option<&Self> {
        match value {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }
}

impl FieldValue for Uri {
    const TYPE_NAME: &'static str = "Uri";
    fn accepts(field_type: FieldType) -> bool {
        field_type == FieldType::Uri
    }
    fn into_value(self) -> Value {
        Value::Uri(self)
    }
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Uri(uri) => Some(uri),
            _ => None,
        }
    }
    fn from_value_ref(value: &Value) -> Option<&Self> {
        match value {
            Value::Uri(uri) => Some(uri),
            _ => None,
        }
    }
}

impl Value {
    /// Whether this value may be stored for a field of type `field_type`
    pub fn fits(&self, field_type: FieldType) -> bool {
        match self {
            Value::Text(_) => String::accepts(field_type),
            Value::Timestamp(_) => Timestamp::accepts(field_type),
            Value::Fixed(_) => f64::accepts(field_type),
            Value::Integer(_) => i64::accepts(field_type),
            Value::Uri(_) => Uri::accepts(field_type),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                       AnyField & Field<T>                                      //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// A field with its value type erased: an identifier plus a [`FieldType`].
#[derive(Clone, Debug)]
pub struct AnyField {
    identifier: FieldIdentifier,
    field_type: FieldType,
}

impl AnyField {
    pub fn identifier(&self) -> &FieldIdentifier {
        &self.identifier
    }
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }
    pub fn prefix(&self) -> Option<FieldIdentifierPrefix> {
        self.identifier.prefix
    }
    pub fn name(&self) -> &str {
        &self.identifier.name
    }
    pub fn is_header(&self) -> bool {
        self.identifier.is_header
    }
}

impl PartialEq for AnyField {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for AnyField {}

impl std::hash::Hash for AnyField {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identifier.hash(state)
    }
}

impl std::fmt::Display for AnyField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        self.identifier.fmt(f)
    }
}

/// A field whose values are of type `T`.
///
/// `Field<T>` dereferences to [`AnyField`].
pub struct Field<T> {
    field: AnyField,
    // `fn() -> T` keeps `Field<T>` `Send`, `Sync` & covariant whatever `T` is
    value_type: PhantomData<fn() -> T>,
}

impl<T: FieldValue> Field<T> {
    /// Declare a field of type `field_type`; fails if `T` can't be logged as `field_type`.
    pub fn new(identifier: FieldIdentifier, field_type: FieldType) -> Result<Field<T>> {
        if !T::accepts(field_type) {
            return Err(Error::FieldTypeMismatch {
                name: identifier.to_string(),
                field_type,
                value_type: T::TYPE_NAME,
                back: Backtrace::new(),
            });
        }
        Ok(Field::from_parts(identifier, field_type))
    }
}

impl<T> Field<T> {
    const fn from_parts(identifier: FieldIdentifier, field_type: FieldType) -> Field<T> {
        Field {
            field: AnyField {
                identifier,
                field_type,
            },
            value_type: PhantomData,
        }
    }
    const fn well_known(
        prefix: Option<FieldIdentifierPrefix>,
        name: &'static str,
        is_header: bool,
        field_type: FieldType,
    ) -> Field<T> {
        Field::from_parts(
            FieldIdentifier::from_static(prefix, name, is_header),
            field_type,
        )
    }
    pub fn as_any(&self) -> &AnyField {
        &self.field
    }
}

impl Field<String> {
    /// Declare a [`FieldType::String`] field
    pub fn string<N: Into<Cow<'static, str>>>(
        prefix: Option<FieldIdentifierPrefix>,
        name: N,
    ) -> Result<Field<String>> {
        Ok(Field::from_parts(
            FieldIdentifier::new(prefix, name)?,
            FieldType::String,
        ))
    }
    /// Declare a [`FieldType::String`] field naming an HTTP header
    pub fn header<N: Into<Cow<'static, str>>>(
        prefix: Option<FieldIdentifierPrefix>,
        name: N,
    ) -> Result<Field<String>> {
        Ok(Field::from_parts(
            FieldIdentifier::header(prefix, name)?,
            FieldType::String,
        ))
    }
    /// Declare a [`FieldType::Address`] field
    pub fn address<N: Into<Cow<'static, str>>>(
        prefix: Option<FieldIdentifierPrefix>,
        name: N,
    ) -> Result<Field<String>> {
        Ok(Field::from_parts(
            FieldIdentifier::new(prefix, name)?,
            FieldType::Address,
        ))
    }
}

impl Field<Timestamp> {
    /// Declare a [`FieldType::Date`] field
    pub fn date<N: Into<Cow<'static, str>>>(
        prefix: Option<FieldIdentifierPrefix>,
        name: N,
    ) -> Result<Field<Timestamp>> {
        Ok(Field::from_parts(
            FieldIdentifier::new(prefix, name)?,
            FieldType::Date,
        ))
    }
    /// Declare a [`FieldType::Time`] field
    pub fn time<N: Into<Cow<'static, str>>>(
        prefix: Option<FieldIdentifierPrefix>,
        name: N,
    ) -> Result<Field<Timestamp>> {
        Ok(Field::from_parts(
            FieldIdentifier::new(prefix, name)?,
            FieldType::Time,
        ))
    }
}

impl Field<f64> {
    /// Declare a [`FieldType::Fixed`] field
    pub fn fixed<N: Into<Cow<'static, str>>>(
        prefix: Option<FieldIdentifierPrefix>,
        name: N,
    ) -> Result<Field<f64>> {
        Ok(Field::from_parts(
            FieldIdentifier::new(prefix, name)?,
            FieldType::Fixed,
        ))
    }
}

impl Field<i64> {
    /// Declare a [`FieldType::Integer`] field
    pub fn integer<N: Into<Cow<'static, str>>>(
        prefix: Option<FieldIdentifierPrefix>,
        name: N,
    ) -> Result<Field<i64>> {
        Ok(Field::from_parts(
            FieldIdentifier::new(prefix, name)?,
            FieldType::Integer,
        ))
    }
}

impl Field<Uri> {
    /// Declare a [`FieldType::Uri`] field
    pub fn uri<N: Into<Cow<'static, str>>>(
        prefix: Option<FieldIdentifierPrefix>,
        name: N,
    ) -> Result<Field<Uri>> {
        Ok(Field::from_parts(
            FieldIdentifier::new(prefix, name)?,
            FieldType::Uri,
        ))
    }
}

impl<T> Deref for Field<T> {
    type Target = AnyField;
    fn deref(&self) -> &AnyField {
        &self.field
    }
}

// Hand-rolled rather than derived: a derive would demand `T: Clone` & so on.
impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Field {
            field: self.field.clone(),
            value_type: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        f.debug_struct("Field")
            .field("identifier", &self.field.identifier)
            .field("field_type", &self.field.field_type)
            .finish()
    }
}

impl<T> PartialEq for Field<T> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
    }
}

impl<T> Eq for Field<T> {}

impl<T> std::hash::Hash for Field<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.field.hash(state)
    }
}

impl<T> std::fmt::Display for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        self.field.fmt(f)
    }
}

impl<T> From<&Field<T>> for AnyField {
    fn from(field: &Field<T>) -> AnyField {
        field.field.clone()
    }
}

impl<T> From<Field<T>> for AnyField {
    fn from(field: Field<T>) -> AnyField {
        field.field
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                      well-known fields                                         //
////////////////////////////////////////////////////////////////////////////////////////////////////

use FieldIdentifierPrefix::{Client, ClientServer, Dcs, Server, ServerClient};

/// The date at which the transaction completed
pub static DATE: Field<Timestamp> = Field::well_known(None, "date", false, FieldType::Date);
/// The time at which the transaction completed
pub static TIME: Field<Timestamp> = Field::well_known(None, "time", false, FieldType::Time);
/// The time taken for the transaction to complete, in seconds
pub static TIME_TAKEN: Field<f64> = Field::well_known(None, "time-taken", false, FieldType::Fixed);
/// The bytes transferred
pub static BYTES: Field<i64> = Field::well_known(None, "bytes", false, FieldType::Integer);
/// Whether a cache hit occurred; 0 indicates a cache miss
pub static CACHED: Field<i64> = Field::well_known(None, "cached", false, FieldType::Integer);
/// The client IP address
pub static CLIENT_IP: Field<String> =
    Field::well_known(Some(Client), "ip", false, FieldType::Address);
/// The client's DNS name
pub static CLIENT_DNS: Field<String> =
    Field::well_known(Some(Client), "dns", false, FieldType::String);
/// The server IP address
pub static SERVER_IP: Field<String> =
    Field::well_known(Some(Server), "ip", false, FieldType::Address);
/// The server's DNS name
pub static SERVER_DNS: Field<String> =
    Field::well_known(Some(Server), "dns", false, FieldType::String);
/// The server port
pub static SERVER_PORT: Field<i64> =
    Field::well_known(Some(Server), "port", false, FieldType::Integer);
/// The client's username to the server
pub static CLIENT_SERVER_USERNAME: Field<String> =
    Field::well_known(Some(ClientServer), "username", false, FieldType::String);
/// The host accessed by the client
pub static CLIENT_SERVER_HOST: Field<String> =
    Field::well_known(Some(ClientServer), "host", false, FieldType::String);
/// The method used by the client to the server
pub static CLIENT_SERVER_METHOD: Field<String> =
    Field::well_known(Some(ClientServer), "method", false, FieldType::String);
/// The full URI requested by the client
pub static CLIENT_SERVER_URI: Field<Uri> =
    Field::well_known(Some(ClientServer), "uri", false, FieldType::Uri);
/// The URI path accessed by the client
pub static CLIENT_SERVER_URI_STEM: Field<String> =
    Field::well_known(Some(ClientServer), "uri-stem", false, FieldType::String);
/// The query string accessed by the client
pub static CLIENT_SERVER_URI_QUERY: Field<String> =
    Field::well_known(Some(ClientServer), "uri-query", false, FieldType::String);
/// The HTTP response status returned to the client
pub static SERVER_CLIENT_STATUS: Field<i64> =
    Field::well_known(Some(ServerClient), "status", false, FieldType::Integer);
/// The bytes transferred from server to client
pub static SERVER_CLIENT_BYTES: Field<i64> =
    Field::well_known(Some(ServerClient), "bytes", false, FieldType::Integer);
/// The protocol version of the client accessing the server
pub static CLIENT_SERVER_VERSION: Field<String> =
    Field::well_known(Some(ClientServer), "version", false, FieldType::String);
/// The User-Agent header of the client accessing the server
pub static CLIENT_SERVER_USER_AGENT_HEADER: Field<String> =
    Field::well_known(Some(ClientServer), "User-Agent", true, FieldType::String);
/// The Cookie header of the client accessing the server
pub static CLIENT_SERVER_COOKIE_HEADER: Field<String> =
    Field::well_known(Some(ClientServer), "Cookie", true, FieldType::String);
/// The Referer header of the client accessing the server
pub static CLIENT_SERVER_REFERER_HEADER: Field<String> =
    Field::well_known(Some(ClientServer), "Referer", true, FieldType::String);
/// The WebTrends DCS identification field
pub static DCS_ID: Field<String> = Field::well_known(Some(Dcs), "id", false, FieldType::String);

#[cfg(test)]
mod test {
    use super::*;

    fn consistent<T: FieldValue>(field: &Field<T>) -> bool {
        T::accepts(field.field_type())
    }

    #[test]
    fn well_known_fields_are_consistent() {
        assert!(consistent(&DATE) && consistent(&TIME));
        assert!(consistent(&TIME_TAKEN));
        assert!(consistent(&BYTES) && consistent(&CACHED) && consistent(&SERVER_PORT));
        assert!(consistent(&SERVER_CLIENT_STATUS) && consistent(&SERVER_CLIENT_BYTES));
        assert!(consistent(&CLIENT_SERVER_URI));
        for field in [
            &CLIENT_IP,
            &CLIENT_DNS,
            &SERVER_IP,
            &SERVER_DNS,
            &CLIENT_SERVER_USERNAME,
            &CLIENT_SERVER_HOST,
            &CLIENT_SERVER_METHOD,
            &CLIENT_SERVER_URI_STEM,
            &CLIENT_SERVER_URI_QUERY,
            &CLIENT_SERVER_VERSION,
            &CLIENT_SERVER_USER_AGENT_HEADER,
            &CLIENT_SERVER_COOKIE_HEADER,
            &CLIENT_SERVER_REFERER_HEADER,
            &DCS_ID,
        ] {
            assert!(consistent(field), "{} is inconsistent", field);
        }
    }

    #[test]
    fn tokens() {
        assert_eq!(DATE.to_string(), "date");
        assert_eq!(CLIENT_IP.to_string(), "c-ip");
        assert_eq!(SERVER_CLIENT_BYTES.to_string(), "sc-bytes");
        assert_eq!(CLIENT_SERVER_USER_AGENT_HEADER.to_string(), "cs(User-Agent)");
        assert_eq!(DCS_ID.to_string(), "dcs-id");
        assert_eq!(CLIENT_SERVER_REFERER_HEADER.identifier().token(), "cs(Referer)");

        let unprefixed_header = Field::header(None, "Host").unwrap();
        assert_eq!(unprefixed_header.to_string(), "Host");
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(matches!(
            FieldIdentifier::new(None, ""),
            Err(Error::EmptyFieldName { .. })
        ));
        assert!(FieldIdentifier::header(Some(ClientServer), String::new()).is_err());
        assert!(Field::integer(None, "").is_err());
    }

    #[test]
    fn mismatched_types_are_rejected() {
        let id = FieldIdentifier::new(Some(Server), "load").unwrap();
        assert!(matches!(
            Field::<String>::new(id.clone(), FieldType::Fixed),
            Err(Error::FieldTypeMismatch { .. })
        ));
        assert!(Field::<i64>::new(id.clone(), FieldType::Fixed).is_err());
        assert!(Field::<Timestamp>::new(id.clone(), FieldType::Uri).is_err());
        let load = Field::<f64>::new(id, FieldType::Fixed).unwrap();
        assert_eq!(load.field_type(), FieldType::Fixed);
        assert_eq!(load.prefix(), Some(Server));
        assert_eq!(load.name(), "load");
        assert!(!load.is_header());
    }

    #[test]
    fn equality_is_by_identifier() {
        let method = Field::string(Some(ClientServer), "method").unwrap();
        assert_eq!(method, CLIENT_SERVER_METHOD);
        assert_ne!(AnyField::from(&BYTES), AnyField::from(&SERVER_CLIENT_BYTES));
        // same identifier, different type tag
        let as_address = Field::address(Some(ClientServer), "method").unwrap();
        assert_eq!(AnyField::from(&as_address), AnyField::from(&method));
        // the header flag is part of the identity
        let as_header = Field::header(Some(ClientServer), "method").unwrap();
        assert_ne!(as_header, method);
    }

    #[test]
    fn name_matching() {
        assert!(CLIENT_SERVER_URI_STEM.identifier().matches("cs-uri-stem"));
        assert!(CLIENT_SERVER_URI_STEM.identifier().matches("cs_uri_stem"));
        assert!(!CLIENT_SERVER_URI_STEM.identifier().matches("cs-uri"));
        assert!(!CLIENT_SERVER_URI_STEM.identifier().matches("uri-stem"));
        assert!(TIME_TAKEN.identifier().matches("time_taken"));
        assert!(CLIENT_SERVER_REFERER_HEADER
            .identifier()
            .matches("cs(Referer)"));
    }
}
