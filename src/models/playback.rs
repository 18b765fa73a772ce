// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback position tracking.
//!
//! The cursor is driven by the seek slider, the step buttons and the
//! playback timer. Every move is clamped to `[0, total_frames]`, so
//! repeated presses at either end simply stop there.

use std::time::Duration;

/// Frame rate assumed when the video reports none.
pub const DEFAULT_FPS: f64 = 30.0;

/// Convert a frame count to `HH:MM:SS`.
///
/// Hours are not wrapped at 24. A non-positive (or NaN) frame rate yields
/// `00:00:00`.
pub fn frames_to_timecode(frame_count: u64, fps: f64) -> String {
    let seconds = if fps > 0.0 {
        (frame_count as f64 / fps).floor() as u64
    } else {
        0
    };
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Current position and rate of the loaded video.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackCursor {
    total_frames: u64,
    fps: f64,
    current_frame: u64,
    playing: bool,
}

impl Default for PlaybackCursor {
    fn default() -> Self {
        Self::new(0, DEFAULT_FPS)
    }
}

impl PlaybackCursor {
    pub fn new(total_frames: u64, fps: f64) -> Self {
        Self {
            total_frames,
            fps: sanitize_fps(fps),
            current_frame: 0,
            playing: false,
        }
    }

    /// Point the cursor at a newly opened video, rewinding to frame 0.
    pub fn load(&mut self, total_frames: u64, fps: f64) {
        *self = Self::new(total_frames, fps);
    }

    /// Forget the loaded video.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_at_end(&self) -> bool {
        self.current_frame >= self.total_frames
    }

    pub fn toggle_play(&mut self) -> bool {
        self.set_playing(!self.playing);
        self.playing
    }

    /// Start or stop playback. Playback never starts on an empty video.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing && self.total_frames > 0;
    }

    pub fn advance_one_frame(&mut self) {
        self.move_by(1);
    }

    pub fn retreat_one_frame(&mut self) {
        self.move_by(-1);
    }

    /// Move by `round(delta_seconds * fps)` frames.
    pub fn jump_seconds(&mut self, delta_seconds: f64) {
        let delta = (delta_seconds * self.fps).round();
        if delta.is_finite() {
            self.move_by(delta as i64);
        }
    }

    pub fn seek(&mut self, frame: i64) {
        self.current_frame = frame.clamp(0, self.total_frames.min(i64::MAX as u64) as i64) as u64;
    }

    /// Advance one frame of playback. Returns `false` once playback stopped.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.advance_one_frame();
        if self.is_at_end() {
            self.playing = false;
        }
        self.playing
    }

    /// Wall-clock time between playback ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }

    /// `"current / total"` label shown next to the seek slider.
    pub fn timecode_label(&self) -> String {
        format!(
            "{} / {}",
            frames_to_timecode(self.current_frame, self.fps),
            frames_to_timecode(self.total_frames, self.fps)
        )
    }

    fn move_by(&mut self, delta: i64) {
        let target = if delta >= 0 {
            self.current_frame.saturating_add(delta as u64)
        } else {
            self.current_frame.saturating_sub(delta.unsigned_abs())
        };
        self.current_frame = target.min(self.total_frames);
    }
}

fn sanitize_fps(fps: f64) -> f64 {
    if fps.is_finite() && fps > 0.0 {
        fps
    } else {
        DEFAULT_FPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timecode_examples() {
        assert_eq!(frames_to_timecode(0, 30.0), "00:00:00");
        assert_eq!(frames_to_timecode(90, 30.0), "00:00:03");
        assert_eq!(frames_to_timecode(108_000, 30.0), "01:00:00");
        assert_eq!(frames_to_timecode(89, 30.0), "00:00:02");
        assert_eq!(frames_to_timecode(1_500, 25.0), "00:01:00");
    }

    #[test]
    fn test_timecode_hours_are_unbounded() {
        assert_eq!(frames_to_timecode(30 * 3600 * 25, 30.0), "25:00:00");
        assert_eq!(frames_to_timecode(30 * 3600 * 100 + 30 * 61, 30.0), "100:01:01");
    }

    #[test]
    fn test_timecode_non_positive_fps() {
        for n in [0, 1, 90, u64::MAX] {
            assert_eq!(frames_to_timecode(n, 0.0), "00:00:00");
            assert_eq!(frames_to_timecode(n, -25.0), "00:00:00");
            assert_eq!(frames_to_timecode(n, f64::NAN), "00:00:00");
        }
    }

    #[test]
    fn test_unknown_fps_defaults_to_30() {
        assert_eq!(PlaybackCursor::new(100, 0.0).fps(), DEFAULT_FPS);
        assert_eq!(PlaybackCursor::new(100, f64::NAN).fps(), DEFAULT_FPS);
        assert_eq!(PlaybackCursor::new(100, 25.0).fps(), 25.0);
    }

    #[test]
    fn test_stepping_is_clamped() {
        let mut cursor = PlaybackCursor::new(3, 30.0);
        cursor.retreat_one_frame();
        assert_eq!(cursor.current_frame(), 0);

        for _ in 0..10 {
            cursor.advance_one_frame();
        }
        assert_eq!(cursor.current_frame(), 3);

        cursor.retreat_one_frame();
        assert_eq!(cursor.current_frame(), 2);
    }

    #[test]
    fn test_seek_is_clamped() {
        let mut cursor = PlaybackCursor::new(500, 30.0);
        cursor.seek(250);
        assert_eq!(cursor.current_frame(), 250);
        cursor.seek(-4);
        assert_eq!(cursor.current_frame(), 0);
        cursor.seek(10_000);
        assert_eq!(cursor.current_frame(), 500);
    }

    #[test]
    fn test_mixed_moves_stay_in_range() {
        let mut cursor = PlaybackCursor::new(40, 30.0);
        let moves: [i64; 12] = [5, -9, 80, 1, -1, 39, -200, 2, 41, -41, 0, 3];
        for (i, m) in moves.iter().enumerate() {
            match i % 3 {
                0 => cursor.seek(*m),
                1 => cursor.advance_one_frame(),
                _ => cursor.retreat_one_frame(),
            }
            assert!(cursor.current_frame() <= cursor.total_frames());
        }
    }

    #[test]
    fn test_jump_seconds() {
        let mut cursor = PlaybackCursor::new(30 * 600, 30.0);
        cursor.jump_seconds(60.0);
        assert_eq!(cursor.current_frame(), 1800);
        cursor.jump_seconds(-0.5);
        assert_eq!(cursor.current_frame(), 1785);
        cursor.jump_seconds(-120.0);
        assert_eq!(cursor.current_frame(), 0);
        cursor.jump_seconds(1e9);
        assert_eq!(cursor.current_frame(), 30 * 600);
    }

    #[test]
    fn test_playback_ticks_stop_at_end() {
        let mut cursor = PlaybackCursor::new(2, 30.0);
        assert!(cursor.toggle_play());
        assert!(cursor.tick());
        assert!(!cursor.tick());
        assert!(!cursor.is_playing());
        assert_eq!(cursor.current_frame(), 2);
    }

    #[test]
    fn test_cannot_play_empty_video() {
        let mut cursor = PlaybackCursor::default();
        assert!(!cursor.toggle_play());
        assert!(!cursor.tick());
    }

    #[test]
    fn test_load_resets_position() {
        let mut cursor = PlaybackCursor::new(100, 30.0);
        cursor.seek(50);
        cursor.set_playing(true);
        cursor.load(200, 25.0);
        assert_eq!(cursor.current_frame(), 0);
        assert!(!cursor.is_playing());
        assert_eq!(cursor.total_frames(), 200);
        assert_eq!(cursor.timecode_label(), "00:00:00 / 00:00:08");
    }
}
