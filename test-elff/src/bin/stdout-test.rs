// Copyright (C) 2025 Michael Herstine <sp1ff@pobox.com>
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

//! Test writing an ELFF log to stdout.

use elff::{
    elff::Elff,
    field::{Field, CLIENT_SERVER_METHOD, CLIENT_SERVER_URI, DATE, SERVER_CLIENT_BYTES, TIME},
    layer::Layer,
    log::Log,
    sink::WriterSink,
    types::FieldIdentifierPrefix,
};
use tracing::{debug, error, info, trace};
use tracing_subscriber::{
    layer::SubscriberExt, // Needed to get `with()`
    registry::Registry,
};

pub fn main() {
    let comment =
        Field::string(Some(FieldIdentifierPrefix::ApplicationSpecific), "comment").unwrap();
    let log = Log::new(
        Elff::builder()
            .field(&DATE)
            .field(&TIME)
            .field(&CLIENT_SERVER_METHOD)
            .field(&CLIENT_SERVER_URI)
            .field(&SERVER_CLIENT_BYTES)
            .field(&comment)
            .build(),
        WriterSink::stdout(),
    );
    let subscriber =
        Registry::default().with(Layer::with_log(log).try_with_header(&[]).unwrap());
    let _guard = tracing::subscriber::set_default(subscriber);

    trace!(cs_method = "GET", cs_uri = "http://example.com/a?b=c", sc_bytes = 1024);
    debug!(cs_method = "POST", x_comment = "你好, stdout.");
    info!(cs_method = "HEAD", cs_uri = "/relative/path");
    // Not a URI; reported & dropped
    error!(cs_method = "GET", cs_uri = "not a uri");
}
