// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Query string layer
//!
//! Parameter values and their serialization into the query strings sent by
//! both the HTTP and the JSONP transports.

mod serializer;
mod value;

pub use serializer::{serialize, QuerySerializer};
pub use value::ParamValue;
