// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the MatchClip application.

pub mod canvas;
pub mod clips;
pub mod shortcuts;
pub mod tags;
pub mod timeline;
pub mod toolbar;
