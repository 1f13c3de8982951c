// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vision log reducer for the Larder service.
//!
//! Folds transient object-detection records into per-identity usage logs
//! and removes the uploaded image plus the triggering record afterwards.

pub mod reducer;

pub use reducer::{parse_image_path, ObjectCreatedEvent, VisionLogReducer, VISION_MODEL_LABEL};
