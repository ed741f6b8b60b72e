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

//! Test writing an ELFF log to a file.
//!
//! Writes `access.log` in the current directory (or the path given as the first argument).

use elff::{
    elff::Elff,
    field::{
        CLIENT_IP, CLIENT_SERVER_METHOD, CLIENT_SERVER_URI_STEM, CLIENT_SERVER_USER_AGENT_HEADER,
        DATE, SERVER_CLIENT_STATUS, TIME, TIME_TAKEN,
    },
    layer::Layer,
    log::Log,
    sink::WriterSink,
};
use tracing::{info, warn};
use tracing_subscriber::{
    layer::SubscriberExt, // Needed to get `with()`
    registry::Registry,
};

pub fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "access.log".to_string());
    let log = Log::new(
        Elff::builder()
            .field(&DATE)
            .field(&TIME)
            .field(&CLIENT_IP)
            .field(&CLIENT_SERVER_METHOD)
            .field(&CLIENT_SERVER_URI_STEM)
            .field(&SERVER_CLIENT_STATUS)
            .field(&TIME_TAKEN)
            .field(&CLIENT_SERVER_USER_AGENT_HEADER)
            .directive("Software", "elff file-test")
            .build(),
        WriterSink::create(&path).unwrap(),
    );
    // Setup the real subsriber...
    let subscriber = Registry::default().with(
        Layer::with_log(log)
            .try_with_header(&[("Remark", "file sink smoke test")])
            .unwrap(),
    );
    // and install it.
    let _guard = tracing::subscriber::set_default(subscriber);

    info!(
        c_ip = "192.168.0.7",
        cs_method = "GET",
        cs_uri_stem = "/index.html",
        sc_status = 200,
        time_taken = 0.012,
        "cs(User-Agent)" = "Mozilla/5.0 (X11; Linux x86_64)"
    );
    warn!(
        c_ip = "192.168.0.9",
        cs_method = "GET",
        cs_uri_stem = "/你好 世界+.html",
        sc_status = 404
    );
}
