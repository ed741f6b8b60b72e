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

//! [elff](crate) errors

use crate::types::FieldType;

use backtrace::Backtrace;

/// [elff](crate) error type
///
/// [elff](crate) eschews libraries like [thiserror], [anyhow] & [Snafu] in favor of a
/// straightforward enumeration with a few match arms chosen on the basis what the caller will need
/// to respond.
///
/// [thiserror]: https://docs.rs/thiserror
/// [anyhow]: https://docs.rs/anyhow
/// [Snafu]: https://docs.rs/snafu/latest/snafu
#[non_exhaustive]
pub enum Error {
    /// A field identifier was constructed with an empty name
    EmptyFieldName { back: Backtrace },
    /// A [`Field`](crate::field::Field) was declared with a [`FieldType`] its value type can't
    /// carry (e.g. an `f64` field tagged [`FieldType::Integer`])
    FieldTypeMismatch {
        name: String,
        field_type: FieldType,
        value_type: &'static str,
        back: Backtrace,
    },
    /// The value stored in an [`Entry`](crate::entry::Entry) for a field can't be rendered as that
    /// field's type
    ValueTypeMismatch {
        name: String,
        field_type: FieldType,
        back: Backtrace,
    },
    /// A FIXED value is infinite or NaN, and so has no decimal form
    NonFiniteFixed {
        name: String,
        value: f64,
        back: Backtrace,
    },
    /// A URI value failed to parse
    BadUri {
        text: String,
        source: http::uri::InvalidUri,
        back: Backtrace,
    },
    /// General sink error; the underlying error is passed through unchanged as `source`
    Sink {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        back: Backtrace,
    },
}

impl Error {
    pub(crate) fn sink<E>(err: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Sink {
            source: Box::new(err),
            back: Backtrace::new(),
        }
    }
}

impl std::fmt::Display for Error {
    // `Error` is non-exhaustive so that adding variants won't be a breaking change to our
    // callers. That means the compiler won't catch us if we miss a variant here, so we
    // always include a `_` arm.
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::EmptyFieldName { .. } => write!(f, "ELFF field identifiers must have a name"),
            Error::FieldTypeMismatch {
                name,
                field_type,
                value_type,
                ..
            } => write!(
                f,
                "Field '{}' is declared {} but its values are of type {}",
                name, field_type, value_type
            ),
            Error::ValueTypeMismatch {
                name, field_type, ..
            } => write!(
                f,
                "The value stored for field '{}' can't be encoded as {}",
                name, field_type
            ),
            Error::NonFiniteFixed { name, value, .. } => {
                write!(f, "Field '{}' can't be encoded as FIXED: {}", name, value)
            }
            Error::BadUri { text, source, .. } => {
                write!(f, "'{}' is not a valid URI: {}", text, source)
            }
            Error::Sink { source, .. } => write!(f, "Sink error: {}", source),
            _ => write!(f, "Other elff error"),
        }
    }
}

impl std::fmt::Debug for Error {
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::EmptyFieldName { back } => write!(f, "{}\n{:?}", self, back),
            Error::FieldTypeMismatch { back, .. } => write!(f, "{}\n{:?}", self, back),
            Error::ValueTypeMismatch { back, .. } => write!(f, "{}\n{:?}", self, back),
            Error::NonFiniteFixed { back, .. } => write!(f, "{}\n{:?}", self, back),
            Error::BadUri { back, .. } => write!(f, "{}\n{:?}", self, back),
            Error::Sink { back, .. } => write!(f, "{}\n{:?}", self, back),
            err => write!(f, "elff error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::BadUri { source, .. } => Some(source),
            Error::Sink { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
