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

//! Writing an ELFF log to a [`Sink`].
//!
//! [`Log`] pairs an [`Elff`] log context with a [`Sink`]: it renders directive headers & entries
//! and hands the text to the sink. Each call results in exactly one [`Sink::send`], so a directive
//! header is never interleaved with entries written from other threads.
//!
//! ```rust
//! use elff::{elff::Elff, entry::Entry, log::Log, sink::WriterSink};
//! use elff::field::{CLIENT_SERVER_METHOD, SERVER_CLIENT_STATUS};
//!
//! let log = Log::new(
//!     Elff::builder().field(&CLIENT_SERVER_METHOD).field(&SERVER_CLIENT_STATUS).build(),
//!     WriterSink::new(Vec::new()),
//! );
//! let mut entry = Entry::new();
//! entry.set(&CLIENT_SERVER_METHOD, "HEAD");
//! entry.set(&SERVER_CLIENT_STATUS, 304);
//! log.log(&entry).unwrap();
//! assert_eq!(log.into_sink().into_inner(), b"HEAD 304\n");
//! ```

use crate::{
    directive::{DirectiveStore, SharedDirectives},
    elff::Elff,
    entry::Entry,
    error::Result,
    layer::INTERNAL_TARGET,
    sink::Sink,
};

use tracing::debug;

/// An ELFF log context writing to a [`Sink`].
pub struct Log<K: Sink, D: DirectiveStore = SharedDirectives> {
    elff: Elff<D>,
    sink: K,
}

impl<K: Sink, D: DirectiveStore> Log<K, D> {
    pub fn new(elff: Elff<D>, sink: K) -> Log<K, D> {
        Log { elff, sink }
    }
    pub fn elff(&self) -> &Elff<D> {
        &self.elff
    }
    pub fn sink(&self) -> &K {
        &self.sink
    }
    pub fn into_sink(self) -> K {
        self.sink
    }
    /// Write the directive header for this log; see [`Elff::format_directives_at`].
    pub fn log_directives(&self, directives: &[(&str, &str)]) -> Result<()> {
        let header = self.elff.format_directives(directives);
        debug!(
            target: INTERNAL_TARGET,
            "writing an ELFF directive header of {} lines",
            header.lines().count()
        );
        self.sink.send(&header)
    }
    /// Write `entry` to this log.
    pub fn log(&self, entry: &Entry) -> Result<()> {
        self.sink.send(&self.elff.format_entry(entry)?)
    }
}
