// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query admission, quota enforcement, and usage logging.
//!
//! [`QueryBroker`] is the heart of the service: it validates the incoming
//! request, enforces the per-identity weekly quota, brokers one provider
//! round trip, and records the usage afterwards.

pub mod broker;

pub use broker::{QueryBroker, QuotaLimits, RequestContext};
