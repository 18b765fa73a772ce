// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clip data structures.
//!
//! A clip is a tagged `[start_frame, end_frame]` interval of the loaded
//! video. Clips are authored by setting a start and an end marker and then
//! committing them with a tag text.

use crate::error::{ClipError, IndexError, ValidationError};

/// A tagged frame interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub start_frame: u64,
    pub end_frame: u64,
    pub tag: String,
}

impl Clip {
    /// Create a clip, swapping the bounds if they are out of order.
    pub fn new(start_frame: u64, end_frame: u64, tag: impl Into<String>) -> Self {
        let (start_frame, end_frame) = ordered(start_frame, end_frame);
        Self {
            start_frame,
            end_frame,
            tag: tag.into(),
        }
    }

    /// Number of frames covered, both ends inclusive. Saturates at `u64::MAX`.
    pub fn frame_count(&self) -> u64 {
        (self.end_frame - self.start_frame).saturating_add(1)
    }
}

/// Export selection used by the clip list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClipFilter {
    #[default]
    All,
    Tag(String),
}

impl ClipFilter {
    pub fn matches(&self, clip: &Clip) -> bool {
        match self {
            ClipFilter::All => true,
            ClipFilter::Tag(tag) => clip.tag == *tag,
        }
    }
}

/// Clips of the loaded video plus the clip currently being authored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipSet {
    clips: Vec<Clip>,
    pending_start: Option<u64>,
    pending_end: Option<u64>,
}

impl ClipSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start marker, replacing any earlier one.
    pub fn begin_marker(&mut self, frame: u64) {
        self.pending_start = Some(frame);
    }

    /// Record the end marker, replacing any earlier one.
    pub fn end_marker(&mut self, frame: u64) {
        self.pending_end = Some(frame);
    }

    pub fn pending_start(&self) -> Option<u64> {
        self.pending_start
    }

    pub fn pending_end(&self) -> Option<u64> {
        self.pending_end
    }

    pub fn has_pending_start(&self) -> bool {
        self.pending_start.is_some()
    }

    pub fn has_pending_end(&self) -> bool {
        self.pending_end.is_some()
    }

    pub fn clear_pending(&mut self) {
        self.pending_start = None;
        self.pending_end = None;
    }

    /// Turn the pending markers into a clip tagged with `tag_text`.
    ///
    /// Markers set in reverse order are swapped. On success the clip is
    /// appended and both markers are cleared; on failure nothing changes.
    pub fn commit(&mut self, tag_text: &str) -> Result<&Clip, ValidationError> {
        let start = self.pending_start.ok_or(ValidationError::MissingStartMarker)?;
        let end = self.pending_end.ok_or(ValidationError::MissingEndMarker)?;
        let tag = non_blank(tag_text)?;

        self.clips.push(Clip::new(start, end, tag));
        self.clear_pending();
        Ok(&self.clips[self.clips.len() - 1])
    }

    /// Replace the bounds and tag of an existing clip.
    pub fn edit(&mut self, index: usize, new_start: u64, new_end: u64, new_tag: &str) -> Result<(), ClipError> {
        let len = self.clips.len();
        if index >= len {
            return Err(IndexError { index, len }.into());
        }
        let tag = non_blank(new_tag)?;
        self.clips[index] = Clip::new(new_start, new_end, tag);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Clip, IndexError> {
        let len = self.clips.len();
        if index >= len {
            return Err(IndexError { index, len });
        }
        Ok(self.clips.remove(index))
    }

    pub fn list(&self) -> &[Clip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Clips matching `predicate`, in list order.
    pub fn select_for_export<P>(&self, predicate: P) -> Vec<&Clip>
    where
        P: Fn(&Clip) -> bool,
    {
        self.clips.iter().filter(|clip| predicate(clip)).collect()
    }

    /// Distinct tags used by clips, in order of first use.
    pub fn tags_in_use(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for clip in &self.clips {
            if !tags.contains(&clip.tag.as_str()) {
                tags.push(&clip.tag);
            }
        }
        tags
    }

    /// Swap in clips loaded from a project file. Pending markers are dropped.
    pub fn replace_clips(&mut self, clips: Vec<Clip>) {
        self.clips = clips;
        self.clear_pending();
    }

    /// Drop all clips and markers.
    pub fn reset(&mut self) {
        self.clips.clear();
        self.clear_pending();
    }
}

fn ordered(a: u64, b: u64) -> (u64, u64) {
    if b < a { (b, a) } else { (a, b) }
}

fn non_blank(tag_text: &str) -> Result<&str, ValidationError> {
    let tag = tag_text.trim();
    if tag.is_empty() {
        Err(ValidationError::EmptyTag)
    } else {
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_with(clips: &[(u64, u64, &str)]) -> ClipSet {
        let mut set = ClipSet::new();
        for (start, end, tag) in clips {
            set.begin_marker(*start);
            set.end_marker(*end);
            set.commit(tag).unwrap();
        }
        set
    }

    #[test]
    fn test_commit_appends_and_clears_markers() {
        let mut set = ClipSet::new();
        set.begin_marker(50);
        set.end_marker(120);

        let clip = set.commit("Goal").unwrap().clone();
        assert_eq!(clip, Clip { start_frame: 50, end_frame: 120, tag: "Goal".to_string() });
        assert_eq!(set.list(), &[clip]);
        assert!(!set.has_pending_start());
        assert!(!set.has_pending_end());

        assert_eq!(set.commit("Goal"), Err(ValidationError::MissingStartMarker));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_commit_requires_both_markers() {
        let mut set = ClipSet::new();
        assert_eq!(set.commit("Goal"), Err(ValidationError::MissingStartMarker));

        set.begin_marker(10);
        assert_eq!(set.commit("Goal"), Err(ValidationError::MissingEndMarker));

        let mut set = ClipSet::new();
        set.end_marker(10);
        assert_eq!(set.commit("Goal"), Err(ValidationError::MissingStartMarker));
    }

    #[test]
    fn test_failed_commit_keeps_markers() {
        let mut set = ClipSet::new();
        set.begin_marker(10);
        set.end_marker(20);

        assert_eq!(set.commit("   "), Err(ValidationError::EmptyTag));
        assert_eq!(set.commit(""), Err(ValidationError::EmptyTag));
        assert_eq!(set.pending_start(), Some(10));
        assert_eq!(set.pending_end(), Some(20));
        assert!(set.is_empty());

        assert_eq!(set.commit(" SetPiece ").unwrap().tag, "SetPiece");
    }

    #[test]
    fn test_reversed_markers_are_swapped() {
        let mut set = ClipSet::new();
        set.begin_marker(300);
        set.end_marker(200);

        let clip = set.commit("CounterAttack").unwrap();
        assert_eq!((clip.start_frame, clip.end_frame), (200, 300));
    }

    #[test]
    fn test_markers_are_last_write_wins() {
        let mut set = ClipSet::new();
        set.begin_marker(10);
        set.begin_marker(40);
        set.end_marker(90);
        set.end_marker(80);

        let clip = set.commit("Goal").unwrap();
        assert_eq!((clip.start_frame, clip.end_frame), (40, 80));
    }

    #[test]
    fn test_single_frame_clip() {
        let mut set = ClipSet::new();
        set.begin_marker(7);
        set.end_marker(7);
        assert_eq!(set.commit("Goal").unwrap().frame_count(), 1);
    }

    #[test]
    fn test_frame_count_of_whole_range_saturates() {
        assert_eq!(Clip::new(0, u64::MAX, "Goal").frame_count(), u64::MAX);
        assert_eq!(Clip::new(1, u64::MAX, "Goal").frame_count(), u64::MAX);
        assert_eq!(Clip::new(u64::MAX, 0, "Goal").frame_count(), u64::MAX);
    }

    #[test]
    fn test_edit() {
        let mut set = set_with(&[(0, 10, "Goal"), (20, 30, "SetPiece")]);

        set.edit(1, 45, 25, "DefCorner").unwrap();
        assert_eq!(set.list()[1], Clip::new(25, 45, "DefCorner"));

        assert_eq!(
            set.edit(2, 0, 1, "Goal"),
            Err(ClipError::Index(IndexError { index: 2, len: 2 }))
        );
        assert_eq!(set.edit(0, 0, 1, " "), Err(ClipError::Validation(ValidationError::EmptyTag)));
        assert_eq!(set.list()[0], Clip::new(0, 10, "Goal"));
    }

    #[test]
    fn test_remove() {
        let mut set = set_with(&[(0, 10, "Goal"), (20, 30, "SetPiece")]);

        assert_eq!(set.remove(5), Err(IndexError { index: 5, len: 2 }));
        assert_eq!(set.remove(0).unwrap().tag, "Goal");
        assert_eq!(set.list(), &[Clip::new(20, 30, "SetPiece")]);
    }

    #[test]
    fn test_select_for_export() {
        let set = set_with(&[(0, 10, "Goal"), (20, 30, "SetPiece"), (40, 50, "Goal")]);

        let goals = set.select_for_export(|c| ClipFilter::Tag("Goal".to_string()).matches(c));
        assert_eq!(goals.iter().map(|c| c.start_frame).collect::<Vec<_>>(), vec![0, 40]);

        assert_eq!(set.select_for_export(|c| ClipFilter::All.matches(c)).len(), 3);
        assert!(set.select_for_export(|c| c.end_frame > 100).is_empty());
    }

    #[test]
    fn test_tags_in_use_and_reset() {
        let mut set = set_with(&[(0, 10, "Goal"), (20, 30, "SetPiece"), (40, 50, "Goal")]);
        assert_eq!(set.tags_in_use(), vec!["Goal", "SetPiece"]);

        set.begin_marker(3);
        set.reset();
        assert!(set.is_empty());
        assert!(!set.has_pending_start());
    }
}
