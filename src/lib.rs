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

//! Writing the W3C [Extended Log File Format] (ELFF)
//!
//! [Extended Log File Format]: https://www.w3.org/TR/WD-logfile.html
//!
//! # Introduction
//!
//! ELFF is the self-describing, whitespace-delimited text format written by many web & proxy
//! servers. A log begins with a header of _directives_ (lines like `#Version: 1.0`), the most
//! important of which is `#Fields`, naming the columns of each subsequent _entry_ line:
//!
//! ```text
//! #Software: my-server 1.0
//! #Version: 1.0
//! #Date: 2024-01-15 10:30:00:000
//! #Fields: date time c-ip cs-method cs-uri-stem sc-status cs(User-Agent)
//! 2024-01-15 10:30:00:000 192.168.0.7 GET /index.html 200 Mozilla/5.0+(X11)
//! ```
//!
//! Each field has a type (STRING, INTEGER, DATE & so on) governing how its values are written;
//! values a given entry lacks are written as `-`.
//!
//! This crate models fields as typed values ([`Field<T>`](field::Field)), so that an [`Entry`]
//! can only ever hold a value of the right type for each field. An [`Elff`] log context owns the
//! fields of a log along with its session directives, and renders the header & entries as text.
//! Where that text goes is the business of a [`Sink`]; [`Log`] ties the two together.
//!
//! [`Entry`]: entry::Entry
//! [`Elff`]: elff::Elff
//! [`Sink`]: sink::Sink
//! [`Log`]: log::Log
//!
//! # Usage
//!
//! Rendering entries directly:
//!
//! ```rust
//! use elff::elff::Elff;
//! use elff::entry::Entry;
//! use elff::field::{CLIENT_IP, CLIENT_SERVER_USER_AGENT_HEADER, SERVER_CLIENT_STATUS};
//!
//! let elff = Elff::builder()
//!     .field(&CLIENT_IP)
//!     .field(&SERVER_CLIENT_STATUS)
//!     .field(&CLIENT_SERVER_USER_AGENT_HEADER)
//!     .build();
//!
//! let mut entry = Entry::new();
//! entry.set(&CLIENT_IP, "192.168.0.7");
//! entry.set(&CLIENT_SERVER_USER_AGENT_HEADER, "Mozilla/5.0 (X11)");
//!
//! assert_eq!(
//!     elff.format_entry(&entry).unwrap(),
//!     "192.168.0.7 - Mozilla/5.0+(X11)\n"
//! );
//! ```
//!
//! The crate also provides a [`tracing-subscriber`] [`Layer`](layer::Layer) that writes
//! [`tracing`] events to an ELFF log, matching event field names to log field identifiers:
//!
//! [`tracing-subscriber`]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/index.html
//! [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html
//!
//! ```rust
//! use elff::elff::Elff;
//! use elff::field::{CLIENT_SERVER_METHOD, DATE, SERVER_CLIENT_STATUS, TIME};
//! use elff::layer::Layer;
//! use elff::log::Log;
//! use elff::sink::WriterSink;
//! use tracing::info;
//! use tracing_subscriber::layer::SubscriberExt; // Needed to get `with()`
//! use tracing_subscriber::registry::Registry;
//!
//! let log = Log::new(
//!     Elff::builder()
//!         .field(&DATE)
//!         .field(&TIME)
//!         .field(&CLIENT_SERVER_METHOD)
//!         .field(&SERVER_CLIENT_STATUS)
//!         .build(),
//!     WriterSink::stdout(),
//! );
//!
//! let subscriber = Registry::default().with(
//!     Layer::with_log(log)
//!         .try_with_header(&[("Software", "my-server 1.0")])
//!         .unwrap(),
//! );
//!
//! tracing::subscriber::with_default(subscriber, || {
//!     info!(cs_method = "GET", sc_status = 200, "served /index.html");
//! });
//! ```

pub mod directive;
pub mod elff;
pub mod encode;
pub mod entry;
pub mod error;
pub mod field;
pub mod layer;
pub mod log;
pub mod sink;
pub mod tracing;
pub mod types;
pub mod webtrends;
