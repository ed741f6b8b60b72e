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

//! [elff](crate) [`Layer`] implementation.
//!
//! [`Layer`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html
//!
//! [`Layer`] maps each [`tracing`] [`Event`] to an ELFF [`Entry`] via an [`EntryRecorder`], and
//! writes it to a [`Log`]. Events this crate emits about its own operation (for instance, reports
//! of failures to log) are never recorded; see [`INTERNAL_TARGET`].
//!
//! [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
//! [`Event`]: https://docs.rs/tracing/0.1.35/tracing/struct.Event.html
//! [`Entry`]: crate::entry::Entry

use crate::{
    log::Log,
    sink::Sink,
    tracing::{EntryRecorder, FieldNameRecorder},
};

use backtrace::Backtrace;
use tracing::Event;
use tracing_subscriber::layer::Context;

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                       module error type                                        //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// module error type
#[non_exhaustive]
pub enum Error {
    /// Recording error
    Record {
        source: Box<dyn std::error::Error>,
        back: Backtrace,
    },
    /// Formatting or sink error
    Log {
        source: crate::error::Error,
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
            Error::Record { source, .. } => {
                write!(f, "While recording an Event, got {}", source)
            }
            Error::Log { source, .. } => {
                write!(f, "While writing an ELFF entry, got {}", source)
            }
            _ => write!(f, "ELFF layer error"),
        }
    }
}

impl std::fmt::Debug for Error {
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Record { source: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::Log { source: _, back } => write!(f, "{}\n{:#?}", self, back),
            _ => write!(f, "{}", self),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// The target of the events this crate emits about its own operation; [`Layer`] never records
/// events with this target.
pub const INTERNAL_TARGET: &str = "elff::internal";

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                          struct Layer                                          //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// A [`tracing-subscriber`]-compliant [`Layer`] implementation that will write [`Event`]s to an
/// ELFF [`Log`].
///
/// [`tracing-subscriber`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/index.html
/// [`Layer`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html
/// [`Event`]: https://docs.rs/tracing/0.1.35/tracing/struct.Event.html
pub struct Layer<S, R: EntryRecorder<S>, K: Sink>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    log: Log<K>,
    recorder: R,
    // The Subscriber implementation type is only needed to transmit it to the EntryRecorder
    // trait.
    subscriber_type: std::marker::PhantomData<S>,
}

impl<S, K: Sink> Layer<S, FieldNameRecorder, K>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    /// Construct a [`Layer`] that will record events by field name (see [`FieldNameRecorder`]) and
    /// write them to `log`.
    pub fn with_log(log: Log<K>) -> Self {
        Layer::new(log, FieldNameRecorder::default())
    }
}

impl<S, R: EntryRecorder<S>, K: Sink> Layer<S, R, K>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    /// construct Layer with custom inners
    pub fn new(log: Log<K>, recorder: R) -> Self {
        Layer {
            log,
            recorder,
            subscriber_type: std::marker::PhantomData,
        }
    }
    /// Write the directive header for the log before handing back the [`Layer`].
    pub fn try_with_header(self, directives: &[(&str, &str)]) -> Result<Self> {
        self.log
            .log_directives(directives)
            .map_err(|err| Error::Log {
                source: err,
                back: Backtrace::new(),
            })?;
        Ok(self)
    }
    pub fn log(&self) -> &Log<K> {
        &self.log
    }
}

/// The [`Layer`] implementation.
///
/// [`Layer`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html
impl<S, R, K> tracing_subscriber::layer::Layer<S> for Layer<S, R, K>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    R: EntryRecorder<S> + 'static,
    K: Sink + 'static,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        // A failure to log one of our own reports would just be reported in turn
        if event.metadata().target() == INTERNAL_TARGET {
            return;
        }

        self.recorder
            .on_event(self.log.elff().fields(), event, ctx) // :=> Result<Option<Entry>, R::Error>
            .map_err(|err| Error::Record {
                source: Box::new(err),
                back: Backtrace::new(),
            }) // 👈:=> StdResult<Option<Entry>, Error>
            .and_then(|entry| match entry {
                Some(entry) => self.log.log(&entry).map_err(|err| Error::Log {
                    source: err,
                    back: Backtrace::new(),
                }),
                None => Ok(()),
            })
            .unwrap_or_else(|err| {
                ::tracing::error!(
                    target: INTERNAL_TARGET,
                    "failed to write an ELFF entry: {}",
                    err
                );
            })
    }
}
