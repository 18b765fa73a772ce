// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for videos, project files and clip export.

pub mod export;
pub mod media;
pub mod serialization;
