// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project document serialization and deserialization.
//!
//! Projects are stored as JSON sidecar files of the form
//! `{ "video_path": "...", "clips": [ { "start": 0, "end": 10, "tag": "Goal" } ] }`.
//! There is no version field; documents written before clips existed have
//! no `clips` key and load with an empty clip list.

use crate::error::{FormatError, ProjectError};
use crate::models::{clip::Clip, project::Project};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

/// On-disk form of a project.
#[derive(Debug, Serialize, Deserialize)]
struct ProjectDoc {
    #[serde(default)]
    video_path: Option<String>,
    #[serde(default)]
    clips: Vec<ClipDoc>,
}

/// On-disk form of a clip.
#[derive(Debug, Serialize, Deserialize)]
struct ClipDoc {
    start: u64,
    end: u64,
    tag: String,
}

impl From<&Clip> for ClipDoc {
    fn from(clip: &Clip) -> Self {
        Self {
            start: clip.start_frame,
            end: clip.end_frame,
            tag: clip.tag.clone(),
        }
    }
}

impl From<ClipDoc> for Clip {
    fn from(doc: ClipDoc) -> Self {
        // Older files may hold clips whose end was marked before their start
        Clip::new(doc.start, doc.end, doc.tag)
    }
}

impl From<&Project> for ProjectDoc {
    fn from(project: &Project) -> Self {
        Self {
            video_path: Some(project.video_path.clone()),
            clips: project.clips.iter().map(ClipDoc::from).collect(),
        }
    }
}

/// Convert a project into its JSON document.
pub fn serialize(project: &Project) -> Value {
    json!(ProjectDoc::from(project))
}

/// Rebuild a project from its JSON document.
///
/// Unknown keys are ignored; a missing or `null` `video_path` reads as empty
/// and a missing `clips` key as no clips.
pub fn deserialize(document: &Value) -> Result<Project, FormatError> {
    // Derived structs also accept arrays, which are not valid here
    if !document.is_object() {
        return Err(FormatError::new(format!("expected an object, found {}", document)));
    }
    if let Some(Value::Array(clips)) = document.get("clips") {
        if let Some(index) = clips.iter().position(|clip| !clip.is_object()) {
            return Err(FormatError::new(format!("clip {index} must be an object")));
        }
    }
    let doc = ProjectDoc::deserialize(document).map_err(|e| FormatError::new(e.to_string()))?;

    Ok(Project {
        video_path: doc.video_path.unwrap_or_default(),
        clips: doc.clips.into_iter().map(Clip::from).collect(),
    })
}

/// Write a project to a JSON file.
pub fn save_project(project: &Project, path: &Path) -> Result<(), ProjectError> {
    let json = serde_json::to_string_pretty(&ProjectDoc::from(project))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a project from a JSON file.
pub fn load_project(path: &Path) -> Result<Project, ProjectError> {
    let json = std::fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&json)?;
    Ok(deserialize(&document)?)
}
