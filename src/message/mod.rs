// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire vocabulary of the sprinkler controller protocol.
//!
//! Every frame exchanged with the frontend is a JSON object carrying a
//! mandatory string `type` field plus type-specific payload fields. Both
//! directions are modeled as internally tagged enums so the dispatch over
//! `type` is exhaustive at compile time:
//!
//! - [`Request`] — frames the frontend sends to the device
//! - [`Response`] — frames the device sends back
//!
//! Requests with a `type` the protocol does not know deserialize to
//! [`Request::Unknown`] instead of failing, matching the device firmware,
//! which ignores unrecognized message types.

mod request;
mod response;

pub use request::Request;
pub use response::{Response, WifiNetwork};
