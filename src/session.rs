// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation session.
//!
//! A session owns everything that belongs to one launch of the tool: the tag
//! registry, the clips of the open video, the playback cursor and the text
//! in the tag field. The UI never touches these directly; it reports what
//! the user did as [`ShellAction`]s and the session applies them.

use crate::error::ClipError;
use crate::io::media::VideoInfo;
use crate::models::{
    clip::{Clip, ClipSet},
    playback::PlaybackCursor,
    project::Project,
    tag::{Rgb, TagRegistry},
};

/// Commands the presentation layer issues against the session.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellAction {
    TogglePlay,
    StepForward,
    StepBackward,
    JumpSeconds(f64),
    Seek(i64),
    MarkStart,
    MarkEnd,
    /// A tag button or tag shortcut was used.
    SelectTag(String),
    SetTagText(String),
    CommitClip,
    EditClip {
        index: usize,
        start: u64,
        end: u64,
        tag: String,
    },
    RemoveClip(usize),
    AddTag {
        name: String,
        shortcut: Option<String>,
    },
    SetTagColor {
        name: String,
        color: Rgb,
    },
    SetTagShortcut {
        name: String,
        shortcut: Option<String>,
    },
    RemoveTag(String),
    ReorderTags {
        source: String,
        target: String,
    },
}

/// What the shell has to do after an action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The cursor moved; the displayed frame must be re-read from the video.
    FrameChanged,
    PlaybackToggled,
    ClipsChanged,
    TagsChanged,
}

/// State of one annotation session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub tags: TagRegistry,
    pub clips: ClipSet,
    pub cursor: PlaybackCursor,
    video_path: String,
    tag_text: String,
}

impl Session {
    pub fn new(tags: TagRegistry) -> Self {
        Self {
            tags,
            clips: ClipSet::new(),
            ..Self::default()
        }
    }

    pub fn video_path(&self) -> &str {
        &self.video_path
    }

    pub fn has_video(&self) -> bool {
        !self.video_path.is_empty()
    }

    pub fn tag_text(&self) -> &str {
        &self.tag_text
    }

    /// Start over: no video, no clips, cursor rewound. Tags are kept.
    pub fn new_project(&mut self) {
        self.video_path.clear();
        self.clips.reset();
        self.cursor.reset();
    }

    /// Attach a newly opened video. Clips are kept, playback state is reset.
    pub fn open_video(&mut self, path: &str, info: VideoInfo) {
        self.video_path = path.to_string();
        self.cursor.load(info.total_frames, info.fps);
    }

    /// Replace the clips (and video path, when the document has one) with a
    /// loaded project.
    pub fn load_project(&mut self, project: Project) {
        if project.has_video() {
            self.video_path = project.video_path;
        }
        self.clips.replace_clips(project.clips);
    }

    /// Snapshot of the session as a saveable project.
    pub fn to_project(&self) -> Project {
        Project {
            video_path: self.video_path.clone(),
            clips: self.clips.list().to_vec(),
        }
    }

    /// Apply one command. On error the session is unchanged.
    pub fn apply(&mut self, action: ShellAction) -> Result<Effect, ClipError> {
        let effect = match action {
            ShellAction::TogglePlay => {
                self.cursor.toggle_play();
                Effect::PlaybackToggled
            }
            ShellAction::StepForward => {
                self.cursor.advance_one_frame();
                Effect::FrameChanged
            }
            ShellAction::StepBackward => {
                self.cursor.retreat_one_frame();
                Effect::FrameChanged
            }
            ShellAction::JumpSeconds(delta) => {
                self.cursor.jump_seconds(delta);
                Effect::FrameChanged
            }
            ShellAction::Seek(frame) => {
                self.cursor.seek(frame);
                Effect::FrameChanged
            }
            ShellAction::MarkStart => {
                self.clips.begin_marker(self.cursor.current_frame());
                Effect::None
            }
            ShellAction::MarkEnd => {
                self.clips.end_marker(self.cursor.current_frame());
                Effect::None
            }
            ShellAction::SelectTag(name) | ShellAction::SetTagText(name) => {
                self.tag_text = name;
                Effect::None
            }
            ShellAction::CommitClip => {
                self.clips.commit(&self.tag_text)?;
                Effect::ClipsChanged
            }
            ShellAction::EditClip {
                index,
                start,
                end,
                tag,
            } => {
                self.clips.edit(index, start, end, &tag)?;
                Effect::ClipsChanged
            }
            ShellAction::RemoveClip(index) => {
                self.clips.remove(index)?;
                Effect::ClipsChanged
            }
            ShellAction::AddTag { name, shortcut } => {
                let name = name.trim();
                if name.is_empty() {
                    return Ok(Effect::None);
                }
                self.tags.add(name, shortcut.as_deref(), None);
                Effect::TagsChanged
            }
            ShellAction::SetTagColor { name, color } => {
                self.tags.set_color(&name, color);
                log::debug!("Tag {} color set to {}", name, color);
                Effect::TagsChanged
            }
            ShellAction::SetTagShortcut { name, shortcut } => {
                self.tags.set_shortcut(&name, shortcut.as_deref());
                Effect::TagsChanged
            }
            ShellAction::RemoveTag(name) => {
                self.tags.remove(&name);
                Effect::TagsChanged
            }
            ShellAction::ReorderTags { source, target } => {
                self.tags.reorder(&source, &target);
                Effect::TagsChanged
            }
        };
        Ok(effect)
    }

    /// Clips matching the export predicate, in list order.
    pub fn clips_for_export<P>(&self, predicate: P) -> Vec<&Clip>
    where
        P: Fn(&Clip) -> bool,
    {
        self.clips.select_for_export(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IndexError, ValidationError};

    fn session_with_video(total_frames: u64) -> Session {
        let mut tags = TagRegistry::new();
        tags.add("Goal", Some("Ctrl+5"), None);
        let mut session = Session::new(tags);
        session.open_video(
            "match.mp4",
            VideoInfo {
                total_frames,
                fps: 30.0,
                width: 1920,
                height: 1080,
            },
        );
        session
    }

    #[test]
    fn test_mark_and_commit_through_actions() {
        let mut session = session_with_video(1000);

        session.apply(ShellAction::Seek(50)).unwrap();
        session.apply(ShellAction::MarkStart).unwrap();
        session.apply(ShellAction::Seek(120)).unwrap();
        session.apply(ShellAction::MarkEnd).unwrap();
        session.apply(ShellAction::SelectTag("Goal".to_string())).unwrap();

        assert_eq!(session.apply(ShellAction::CommitClip), Ok(Effect::ClipsChanged));
        assert_eq!(session.clips.list(), &[Clip::new(50, 120, "Goal")]);

        assert_eq!(
            session.apply(ShellAction::CommitClip),
            Err(ClipError::Validation(ValidationError::MissingStartMarker))
        );
    }

    #[test]
    fn test_commit_without_tag_text_fails() {
        let mut session = session_with_video(1000);
        session.apply(ShellAction::MarkStart).unwrap();
        session.apply(ShellAction::MarkEnd).unwrap();

        assert_eq!(
            session.apply(ShellAction::CommitClip),
            Err(ClipError::Validation(ValidationError::EmptyTag))
        );
        assert!(session.clips.has_pending_start());
    }

    #[test]
    fn test_clip_tags_are_not_checked_against_registry() {
        let mut session = session_with_video(1000);
        session.apply(ShellAction::MarkStart).unwrap();
        session.apply(ShellAction::MarkEnd).unwrap();
        session.apply(ShellAction::SetTagText("Offside".to_string())).unwrap();

        session.apply(ShellAction::CommitClip).unwrap();
        assert_eq!(session.clips.list()[0].tag, "Offside");
        assert!(!session.tags.contains("Offside"));
    }

    #[test]
    fn test_navigation_actions() {
        let mut session = session_with_video(30 * 120);

        session.apply(ShellAction::JumpSeconds(60.0)).unwrap();
        assert_eq!(session.cursor.current_frame(), 1800);
        session.apply(ShellAction::StepForward).unwrap();
        session.apply(ShellAction::StepForward).unwrap();
        session.apply(ShellAction::StepBackward).unwrap();
        assert_eq!(session.cursor.current_frame(), 1801);
        session.apply(ShellAction::JumpSeconds(600.0)).unwrap();
        assert_eq!(session.cursor.current_frame(), 3600);

        assert_eq!(session.apply(ShellAction::TogglePlay), Ok(Effect::PlaybackToggled));
        assert!(session.cursor.is_playing());
    }

    #[test]
    fn test_edit_and_remove_errors_leave_state() {
        let mut session = session_with_video(1000);
        session.load_project(Project {
            video_path: String::new(),
            clips: vec![Clip::new(1, 2, "Goal")],
        });

        assert_eq!(
            session.apply(ShellAction::RemoveClip(3)),
            Err(ClipError::Index(IndexError { index: 3, len: 1 }))
        );
        session
            .apply(ShellAction::EditClip {
                index: 0,
                start: 10,
                end: 20,
                tag: "SetPiece".to_string(),
            })
            .unwrap();
        assert_eq!(session.clips.list(), &[Clip::new(10, 20, "SetPiece")]);
        assert_eq!(session.video_path(), "match.mp4");
    }

    #[test]
    fn test_tag_actions() {
        let mut session = session_with_video(10);
        session
            .apply(ShellAction::AddTag {
                name: " Press ".to_string(),
                shortcut: Some("Ctrl+6".to_string()),
            })
            .unwrap();
        assert_eq!(
            session.apply(ShellAction::AddTag {
                name: "  ".to_string(),
                shortcut: None
            }),
            Ok(Effect::None)
        );
        session
            .apply(ShellAction::ReorderTags {
                source: "Press".to_string(),
                target: "Goal".to_string(),
            })
            .unwrap();
        assert_eq!(session.tags.get_tags(), vec!["Press", "Goal"]);

        session
            .apply(ShellAction::SetTagShortcut {
                name: "Press".to_string(),
                shortcut: Some("Ctrl+P".to_string()),
            })
            .unwrap();
        assert_eq!(session.tags.tag_for_shortcut("Ctrl+P"), Some("Press"));

        session.apply(ShellAction::RemoveTag("Press".to_string())).unwrap();
        assert_eq!(session.tags.get_tags(), vec!["Goal"]);
    }

    #[test]
    fn test_new_project_keeps_tags() {
        let mut session = session_with_video(1000);
        session.apply(ShellAction::Seek(500)).unwrap();
        session.apply(ShellAction::MarkStart).unwrap();

        session.new_project();
        assert!(!session.has_video());
        assert!(!session.clips.has_pending_start());
        assert_eq!(session.cursor.total_frames(), 0);
        assert_eq!(session.tags.get_tags(), vec!["Goal"]);
    }

    #[test]
    fn test_project_snapshot_roundtrip() {
        let mut session = session_with_video(1000);
        session.load_project(Project {
            video_path: "other.mp4".to_string(),
            clips: vec![Clip::new(1, 2, "Goal"), Clip::new(5, 9, "SetPiece")],
        });

        let project = session.to_project();
        assert_eq!(project.video_path, "other.mp4");
        assert_eq!(project.clips.len(), 2);
        assert_eq!(session.clips_for_export(|c| c.tag == "Goal").len(), 1);
    }
}
