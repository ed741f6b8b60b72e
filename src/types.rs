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

//! ELFF field type & identifier prefix definitions.
//!
//! [`FieldType`] names the seven kinds of value an ELFF field may carry, and
//! [`FieldIdentifierPrefix`] the standard prefixes that say which parties a field describes. Both
//! are closed enumerations; each variant owns exactly one textual form.

type StdResult<T, E> = std::result::Result<T, E>;

/// The type of an individual field in an entry of the Extended Log File Format.
///
/// The type determines both which Rust values a [`Field`](crate::field::Field) may hold and how
/// those values are rendered in an entry line (see [`encode`](crate::encode)).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// An Internet address and port; written verbatim
    Address,
    /// The date in GMT in the format `YYYY-MM-DD`
    Date,
    /// A fixed format float
    Fixed,
    /// A sequence of digits
    Integer,
    /// A sequence of characters; spaces & plus signs are escaped
    String,
    /// The time in GMT in the format `HH:MM:SS:SSS`
    Time,
    /// An absolute or relative URI
    Uri,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                FieldType::Address => "ADDRESS",
                FieldType::Date => "DATE",
                FieldType::Fixed => "FIXED",
                FieldType::Integer => "INTEGER",
                FieldType::String => "STRING",
                FieldType::Time => "TIME",
                FieldType::Uri => "URI",
            }
        )
    }
}

/// The prefix of a field identifier.
///
/// The W3C draft defines prefixes for the parties to a transaction (client, server & remote
/// server) and for the direction of transfer between them; WebTrends adds its own `dcs` prefix, and
/// `x` marks application-specific fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldIdentifierPrefix {
    /// Client information
    Client,
    /// Server information
    Server,
    /// Remote information
    Remote,
    /// Client-to-server information
    ClientServer,
    /// Server-to-client information
    ServerClient,
    /// Server-to-remote server information
    ServerRemoteServer,
    /// Remote-server-to-server information
    RemoteServerServer,
    /// WebTrends DCS prefix
    Dcs,
    /// Application-specific information
    ApplicationSpecific,
}

impl FieldIdentifierPrefix {
    /// The literal character sequence used to format this prefix
    pub const fn id(&self) -> &'static str {
        match self {
            FieldIdentifierPrefix::Client => "c",
            FieldIdentifierPrefix::Server => "s",
            FieldIdentifierPrefix::Remote => "r",
            FieldIdentifierPrefix::ClientServer => "cs",
            FieldIdentifierPrefix::ServerClient => "sc",
            FieldIdentifierPrefix::ServerRemoteServer => "sr",
            FieldIdentifierPrefix::RemoteServerServer => "rs",
            FieldIdentifierPrefix::Dcs => "dcs",
            FieldIdentifierPrefix::ApplicationSpecific => "x",
        }
    }
}

impl std::fmt::Display for FieldIdentifierPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prefix_ids() {
        use FieldIdentifierPrefix::*;
        let ids: Vec<&str> = [
            Client,
            Server,
            Remote,
            ClientServer,
            ServerClient,
            ServerRemoteServer,
            RemoteServerServer,
            Dcs,
            ApplicationSpecific,
        ]
        .iter()
        .map(|p| p.id())
        .collect();
        assert_eq!(ids, ["c", "s", "r", "cs", "sc", "sr", "rs", "dcs", "x"]);
        assert_eq!(format!("{}", ClientServer), "cs");
    }

    #[test]
    fn field_type_display() {
        assert_eq!(format!("{}", FieldType::Fixed), "FIXED");
        assert_eq!(format!("{:?}", FieldType::Uri), "Uri");
    }
}
