// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for clip editing and project documents.
//!
//! Tag registry operations never fail, so there is no error type for them.

use thiserror::Error;

/// Preconditions for committing or editing a clip were not met.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No start marker set")]
    MissingStartMarker,

    #[error("No end marker set")]
    MissingEndMarker,

    #[error("Clip tag must not be empty")]
    EmptyTag,
}

/// A clip index was outside the clip list.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Clip index {index} out of range ({len} clips)")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// Errors from clip list mutations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// A project document did not match the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed project document: {reason}")]
pub struct FormatError {
    pub reason: String,
}

impl FormatError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors from reading or writing project files.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
