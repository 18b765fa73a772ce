// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project data.
//!
//! A project is the video being annotated plus its clips. It is what gets
//! written to and read back from the JSON sidecar file.

use super::clip::Clip;

/// Complete project data, see `io::serialization` for the file format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    /// Path of the annotated video, empty for an unsaved new project.
    pub video_path: String,
    pub clips: Vec<Clip>,
}

impl Project {
    pub fn has_video(&self) -> bool {
        !self.video_path.is_empty()
    }
}
