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

//! ELFF directives.
//!
//! A directive is a header line of the form `#Name: value` describing the log: its version, the
//! fields it records, when it was written & so forth. This module names the standard directives,
//! formats directive lines, and defines [`DirectiveStore`], the session-level collection of
//! directives an [`Elff`](crate::elff::Elff) writes ahead of its mandatory ones.
//!
//! Two stores are provided, and the choice between them is the caller's:
//!
//! - [`SharedDirectives`] may be updated from any number of threads while entries are rendered
//! - [`LocalDirectives`] is for single-threaded use, and preserves insertion order

use dashmap::DashMap;

use std::cell::RefCell;

/// The ELFF version written in the `Version` directive
pub const LATEST_VERSION: &str = "1.0";

/// The version of the extended log file format used
pub const VERSION_DIRECTIVE: &str = "Version";
/// The fields recorded in the log
pub const FIELDS_DIRECTIVE: &str = "Fields";
/// The software which generated the log
pub const SOFTWARE_DIRECTIVE: &str = "Software";
/// The date and time at which the log was started
pub const START_DATE_DIRECTIVE: &str = "Start-Date";
/// The date and time at which the log was finished
pub const END_DATE_DIRECTIVE: &str = "End-Date";
/// The date and time at which the entry was added
pub const DATE_DIRECTIVE: &str = "Date";
/// Comment information
pub const REMARK_DIRECTIVE: &str = "Remark";

/// Append the directive line `#name: value\n` to `buf`.
///
/// `value` is not escaped; it is the caller's responsibility to keep newlines out of it.
pub fn write_directive(buf: &mut String, name: &str, value: &str) {
    buf.push('#');
    buf.push_str(name);
    buf.push_str(": ");
    buf.push_str(value);
    buf.push('\n');
}

/// Format the directive line `#name: value\n`.
pub fn format_directive(name: &str, value: &str) -> String {
    let mut buf = String::with_capacity(name.len() + value.len() + 4);
    write_directive(&mut buf, name, value);
    buf
}

/// Operations all directive stores must support.
///
/// All methods take `&self`; implementations choose their own synchronization (or none).
pub trait DirectiveStore {
    /// The value of directive `name`, if set
    fn get(&self, name: &str) -> Option<String>;
    /// Set directive `name` to `value`, returning the previous value, if any
    fn insert(&self, name: String, value: String) -> Option<String>;
    /// Remove directive `name`, returning its value, if any
    fn remove(&self, name: &str) -> Option<String>;
    /// Copy out all directives currently set
    fn snapshot(&self) -> Vec<(String, String)>;
}

/// A [`DirectiveStore`] that may be shared between threads.
///
/// Per-directive operations are atomic; concurrent updates to different directives don't interfere
/// with one another, and the last write to any one directive wins. Directives are written in no
/// particular order.
#[derive(Debug, Default)]
pub struct SharedDirectives {
    map: DashMap<String, String>,
}

impl SharedDirectives {
    pub fn new() -> SharedDirectives {
        SharedDirectives::default()
    }
}

impl DirectiveStore for SharedDirectives {
    fn get(&self, name: &str) -> Option<String> {
        self.map.get(name).map(|value| value.value().clone())
    }
    fn insert(&self, name: String, value: String) -> Option<String> {
        self.map.insert(name, value)
    }
    fn remove(&self, name: &str) -> Option<String> {
        self.map.remove(name).map(|(_, value)| value)
    }
    fn snapshot(&self) -> Vec<(String, String)> {
        self.map
            .iter()
            .map(|kv| (kv.key().clone(), kv.value().clone()))
            .collect()
    }
}

/// A single-threaded [`DirectiveStore`].
///
/// [`LocalDirectives`] is not [`Sync`], so an [`Elff`](crate::elff::Elff) using it can't be shared
/// across threads. Directives are written in the order in which they were first set.
#[derive(Debug, Default)]
pub struct LocalDirectives {
    entries: RefCell<Vec<(String, String)>>,
}

impl LocalDirectives {
    pub fn new() -> LocalDirectives {
        LocalDirectives::default()
    }
}

impl DirectiveStore for LocalDirectives {
    fn get(&self, name: &str) -> Option<String> {
        self.entries
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
    fn insert(&self, name: String, value: String) -> Option<String> {
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                entries.push((name, value));
                None
            }
        }
    }
    fn remove(&self, name: &str) -> Option<String> {
        let mut entries = self.entries.borrow_mut();
        let idx = entries.iter().position(|(n, _)| n == name)?;
        Some(entries.remove(idx).1)
    }
    fn snapshot(&self) -> Vec<(String, String)> {
        self.entries.borrow().clone()
    }
}
