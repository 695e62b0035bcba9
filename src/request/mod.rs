// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request dispatching
//!
//! A [`Request`] carries a URL, parameters and a method tag. Dispatching it
//! either drives a host request object through its ready states or injects
//! a JSONP script, and delivers the outcome through a resolve/reject pair.

pub mod constants;
mod completion;
mod dispatcher;
mod method;

pub use completion::{Completion, CompletionResult, Reject, Resolve};
pub use dispatcher::{DispatchState, Request};
pub use method::Method;
