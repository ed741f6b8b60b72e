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

//! Where ELFF text goes.
//!
//! This module defines the [`Sink`] trait that all destinations must support, along with an
//! implementation for anything implementing [`std::io::Write`] (files, standard output, in-memory
//! buffers) and one for TCP streams.
//!
//! # Examples
//!
//! To append to a log file:
//!
//! ```no_run
//! use elff::sink::WriterSink;
//! let sink = WriterSink::append("/var/log/www/access.log").unwrap();
//! ```
//!
//! To write to a collector listening on another host:
//!
//! ```no_run
//! use elff::sink::TcpSink;
//! let sink = TcpSink::new("some-host.domain.io:5170").unwrap();
//! ```

use crate::error::{Error, Result};

use std::{
    fs::{File, OpenOptions},
    io::Write,
    net::TcpStream,
    path::Path,
    sync::{Arc, Mutex},
};

/// Operations all sinks must support.
pub trait Sink {
    /// Write `text`, then flush.
    ///
    /// `text` is one or more complete lines. Implementations shall not interleave the contents of
    /// concurrent calls: each call is one write as far as other writers are concerned.
    fn send(&self, text: &str) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn send(&self, text: &str) -> Result<()> {
        (**self).send(text)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn send(&self, text: &str) -> Result<()> {
        (**self).send(text)
    }
}

/// Writing ELFF text to an [`std::io::Write`] implementation.
///
/// Writes are serialized by a mutex, so one [`WriterSink`] may be shared between threads.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> WriterSink<W> {
        WriterSink {
            writer: Mutex::new(writer),
        }
    }
    /// Run `f` against the underlying writer, with other writers locked out.
    pub fn with_writer<R, F: FnOnce(&mut W) -> R>(&self, f: F) -> R {
        // A panic while holding the lock can at worst leave a partial line in the writer; carry on
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut writer)
    }
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WriterSink<File> {
    /// Create (or truncate) the file at `path` & write to it.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<WriterSink<File>> {
        Ok(WriterSink::new(File::create(path).map_err(Error::sink)?))
    }
    /// Append to the file at `path`, creating it if need be.
    pub fn append<P: AsRef<Path>>(path: P) -> Result<WriterSink<File>> {
        Ok(WriterSink::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(Error::sink)?,
        ))
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> WriterSink<std::io::Stdout> {
        WriterSink::new(std::io::stdout())
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn send(&self, text: &str) -> Result<()> {
        self.with_writer(|writer| {
            writer.write_all(text.as_bytes()).map_err(Error::sink)?;
            writer.flush().map_err(Error::sink)
        })
    }
}

/// Writing ELFF text over a TCP stream
pub struct TcpSink {
    socket: Mutex<TcpStream>,
}

impl TcpSink {
    /// Construct a [`Sink`] implementation writing to a TCP connection to `addr`.
    pub fn new<A: std::net::ToSocketAddrs>(addr: A) -> Result<TcpSink> {
        Ok(TcpSink {
            socket: Mutex::new(TcpStream::connect(addr).map_err(Error::sink)?),
        })
    }
}

impl Sink for TcpSink {
    fn send(&self, text: &str) -> Result<()> {
        let mut socket = self
            .socket
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        socket.write_all(text.as_bytes()).map_err(Error::sink)?;
        socket.flush().map_err(Error::sink)
    }
}
