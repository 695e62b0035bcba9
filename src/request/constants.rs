// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Verb and header tables

use super::Method;

/// Method tags
pub mod methods {
    pub const GET: &str = "GET";
    pub const POST: &str = "POST";
    pub const JSONP: &str = "JSONP";
}

/// Header names
pub mod headers {
    pub const CONTENT_TYPE: &str = "Content-type";
    pub const X_REQUESTED_WITH: &str = "X-Requested-With";
}

/// Header values
pub mod values {
    pub const JSON: &str = "application/json";
    pub const FORM_ENCODED: &str = "application/x-www-form-urlencoded";
    pub const REQUESTED: &str = "XMLHttpRequest";
    pub const SCRIPT_TYPE: &str = "text/javascript";
}

/// Program id of the legacy request object
pub const ACTIVEX: &str = "Microsoft.XMLHTTP";

const JSON_HEADERS: &[(&str, &str)] = &[(headers::CONTENT_TYPE, values::JSON)];

const FORM_HEADERS: &[(&str, &str)] = &[
    (headers::X_REQUESTED_WITH, values::REQUESTED),
    (headers::CONTENT_TYPE, values::FORM_ENCODED),
];

/// Headers set on the transport for a method, in order
pub fn headers_for(method: &Method) -> &'static [(&'static str, &'static str)] {
    match method {
        Method::Post => FORM_HEADERS,
        _ => JSON_HEADERS,
    }
}
