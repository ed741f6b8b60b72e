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

//! Test writing an ELFF log over TCP to port 5140 on the local host (or the address given as the
//! first argument); `nc -l 5140` makes a fine collector.

use elff::{
    elff::Elff,
    field::{CLIENT_SERVER_METHOD, DATE, SERVER_CLIENT_STATUS, SERVER_DNS, SERVER_IP, TIME},
    layer::Layer,
    log::Log,
    sink::TcpSink,
};
use tracing::{info, warn};
use tracing_subscriber::{
    layer::SubscriberExt, // Needed to get `with()`
    registry::Registry,
};

pub fn main() {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:5140".to_string());
    let log = Log::new(
        Elff::builder()
            .field(&DATE)
            .field(&TIME)
            .field(&SERVER_DNS)
            .field(&SERVER_IP)
            .field(&CLIENT_SERVER_METHOD)
            .field(&SERVER_CLIENT_STATUS)
            .build(),
        TcpSink::new(addr).unwrap(),
    );
    // Setup the real subsriber...
    let subscriber = Registry::default().with(Layer::with_log(log).try_with_header(&[]).unwrap());
    // and install it.
    let _guard = tracing::subscriber::set_default(subscriber);

    info!(cs_method = "GET", sc_status = 200, "你好, TCP socket.");
    warn!(cs_method = "DELETE", sc_status = 403, "你好, TCP socket.");
}
