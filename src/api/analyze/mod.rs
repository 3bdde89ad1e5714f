// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cell analysis API endpoint module
//!
//! Provides POST /analyze for counting and sizing cells in an uploaded image.

pub mod handler;
pub mod request;

pub use handler::analyze_handler;
pub use request::{read_file_field, FILE_FIELD};
