// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Method tags

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::constants::methods;

/// Method tag of a request
///
/// Tags are matched exactly. Anything that is not `GET`, `POST` or `JSONP`
/// is kept verbatim and travels the generic HTTP path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Jsonp,
    Other(String),
}

impl Method {
    /// Parse a tag
    pub fn parse(tag: &str) -> Self {
        match tag {
            methods::GET => Method::Get,
            methods::POST => Method::Post,
            methods::JSONP => Method::Jsonp,
            other => Method::Other(other.to_string()),
        }
    }

    /// The literal tag, as passed to the transport's `open`
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => methods::GET,
            Method::Post => methods::POST,
            Method::Jsonp => methods::JSONP,
            Method::Other(tag) => tag,
        }
    }

    /// Check if the request goes through script injection
    pub fn is_jsonp(&self) -> bool {
        matches!(self, Method::Jsonp)
    }
}

impl FromStr for Method {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Method::parse(s))
    }
}

impl From<&str> for Method {
    fn from(s: &str) -> Self {
        Method::parse(s)
    }
}

impl From<String> for Method {
    fn from(s: String) -> Self {
        Method::parse(&s)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
