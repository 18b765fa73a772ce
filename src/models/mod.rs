// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data model: tags, clips, playback position and projects.

pub mod clip;
pub mod playback;
pub mod project;
pub mod tag;
