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

//! WebTrends conventions.
//!
//! WebTrends analytics passes client-side measurements to the server as query parameters in the
//! `WT` namespace (`WT.bh`, `WT.sr` & so on), which then land in ELFF logs by way of the
//! `cs-uri-query` field. The constants here name those parameters, and [`query_parameter`] builds
//! them.

type StdResult<T, E> = std::result::Result<T, E>;

/// The name of the WebTrends ID cookie
pub const WEBTRENDS_ID_COOKIE_NAME: &str = "WEBTRENDS_ID";
/// The namespace for WebTrends query parameters
pub const WEBTRENDS_QUERY_NAMESPACE: &str = "WT";
/// Separates the namespace from the local name of a query parameter
pub const QUERY_NAMESPACE_SEPARATOR: char = '.';

/// The client's hour
pub const BROWSING_HOUR_QUERY_ATTRIBUTE_NAME: &str = "WT.bh";
/// The browser size
pub const BROWSER_SIZE_QUERY_ATTRIBUTE_NAME: &str = "WT.bs";
/// The client's color depth
pub const COLOR_DEPTH_QUERY_ATTRIBUTE_NAME: &str = "WT.cd";
/// One or more content groups
pub const CONTENT_GROUP_NAME_QUERY_ATTRIBUTE_NAME: &str = "WT.cg_n";
/// One or more content subgroups
pub const CONTENT_SUBGROUP_NAME_QUERY_ATTRIBUTE_NAME: &str = "WT.cg_s";
/// Whether the client has Java enabled
pub const JAVA_ENABLED_QUERY_ATTRIBUTE_NAME: &str = "WT.jo";
/// Whether JavaScript is supported; see [`YesNo`]
pub const JAVASCRIPT_QUERY_ATTRIBUTE_NAME: &str = "WT.js";
pub const JAVASCRIPT_VERSION_QUERY_ATTRIBUTE_NAME: &str = "WT.jv";
pub const SCREEN_RESOLUTION_QUERY_ATTRIBUTE_NAME: &str = "WT.sr";
/// The content title
pub const TITLE_QUERY_ATTRIBUTE_NAME: &str = "WT.ti";
/// The client's time zone offset from GMT
pub const TIMEZONE_QUERY_ATTRIBUTE_NAME: &str = "WT.tz";
/// The client's language
pub const USER_LANGUAGE_QUERY_ATTRIBUTE_NAME: &str = "WT.ul";

/// Form the name of a query parameter from a namespace & local name; `WT`, `ti` :=> `WT.ti`
pub fn query_attribute_name(namespace: &str, local_name: &str) -> String {
    format!("{}{}{}", namespace, QUERY_NAMESPACE_SEPARATOR, local_name)
}

/// Separates a query parameter's name from its values
pub const QUERY_NAME_VALUE_ASSIGNMENT: char = '=';
/// Separates the values of a multi-valued query parameter
pub const QUERY_VALUE_SEPARATOR: char = ';';

/// Append the query parameter `name=value1;value2...` to `buf`, percent-encoding the name & each
/// value. With no values, just `name=` is appended.
pub fn append_query_parameter<V: AsRef<str>>(buf: &mut String, name: &str, values: &[V]) {
    buf.push_str(&urlencoding::encode(name));
    buf.push(QUERY_NAME_VALUE_ASSIGNMENT);
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            buf.push(QUERY_VALUE_SEPARATOR);
        }
        buf.push_str(&urlencoding::encode(value.as_ref()));
    }
}

/// Format the query parameter `name=value1;value2...`; see [`append_query_parameter`].
pub fn query_parameter<V: AsRef<str>>(name: &str, values: &[V]) -> String {
    let mut buf = String::new();
    append_query_parameter(&mut buf, name, values);
    buf
}

/// The values WebTrends uses for booleans
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl std::convert::From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

impl std::fmt::Display for YesNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                YesNo::Yes => "Yes",
                YesNo::No => "No",
            }
        )
    }
}
