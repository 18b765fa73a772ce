// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clip export.
//!
//! Two kinds of output: one video file per clip, cut by an external
//! `ffmpeg` process, and an annotation manifest listing the selected clips
//! with their time-codes in YAML or JSON.

use crate::models::{clip::Clip, playback::frames_to_timecode};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Cuts clips out of a source video.
pub trait ClipExporter {
    /// Write one output file per clip, returning the files in clip order.
    fn export(&self, video_path: &Path, clips: &[&Clip], fps: f64) -> Result<Vec<PathBuf>>;
}

/// Exports clips by running the `ffmpeg` command-line tool once per clip.
#[derive(Debug, Clone)]
pub struct FfmpegExporter {
    pub ffmpeg_path: PathBuf,
    /// Output directory; next to the source video when `None`.
    pub output_dir: Option<PathBuf>,
    /// Copy streams instead of re-encoding. Faster, but cuts snap to keyframes.
    pub stream_copy: bool,
}

impl FfmpegExporter {
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            output_dir: None,
            stream_copy: true,
        }
    }

    /// Where the clip at `index` of the selection is written.
    pub fn output_path(&self, video_path: &Path, index: usize, clip: &Clip) -> PathBuf {
        let dir = self
            .output_dir
            .clone()
            .or_else(|| video_path.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        let stem = video_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "clip".to_string());
        let ext = video_path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mp4".to_string());

        dir.join(format!(
            "{}_{:02}_{}_{}-{}.{}",
            stem,
            index + 1,
            sanitize_file_component(&clip.tag),
            clip.start_frame,
            clip.end_frame,
            ext
        ))
    }

    /// Arguments passed to ffmpeg to cut `clip` into `output`.
    pub fn command_args(&self, video_path: &Path, clip: &Clip, fps: f64, output: &Path) -> Vec<String> {
        let start = clip.start_frame as f64 / fps;
        let duration = clip.frame_count() as f64 / fps;

        let mut args: Vec<String> = vec![
            "-y".into(),
            "-loglevel".into(),
            "error".into(),
            "-ss".into(),
            format!("{start:.3}"),
            "-i".into(),
            video_path.to_string_lossy().into_owned(),
            "-t".into(),
            format!("{duration:.3}"),
        ];
        if self.stream_copy {
            args.push("-c".into());
            args.push("copy".into());
        }
        args.push(output.to_string_lossy().into_owned());
        args
    }
}

impl ClipExporter for FfmpegExporter {
    fn export(&self, video_path: &Path, clips: &[&Clip], fps: f64) -> Result<Vec<PathBuf>> {
        if fps.is_nan() || fps <= 0.0 {
            bail!("Cannot export clips without a frame rate");
        }
        if let Some(dir) = &self.output_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
        }

        let mut written = Vec::with_capacity(clips.len());
        for (index, clip) in clips.iter().enumerate() {
            let output = self.output_path(video_path, index, clip);
            let args = self.command_args(video_path, clip, fps, &output);
            log::debug!("{} {}", self.ffmpeg_path.display(), args.join(" "));

            let result = Command::new(&self.ffmpeg_path)
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .output()
                .with_context(|| format!("Failed to run {}", self.ffmpeg_path.display()))?;
            if !result.status.success() {
                bail!(
                    "ffmpeg failed on clip {} ({}): {}",
                    index + 1,
                    clip.tag,
                    String::from_utf8_lossy(&result.stderr).trim()
                );
            }

            log::info!("Exported clip {} to {}", index + 1, output.display());
            written.push(output);
        }
        Ok(written)
    }
}

/// Replace characters that are awkward in file names with `_`.
fn sanitize_file_component(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() { "untagged".to_string() } else { cleaned }
}

/// One clip in an exported manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestEntry {
    pub tag: String,
    pub start_frame: u64,
    pub end_frame: u64,
    pub start_time: String,
    pub end_time: String,
}

/// Annotation manifest for a selection of clips.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    pub video_path: String,
    pub fps: f64,
    pub clips: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(video_path: &str, fps: f64, clips: &[&Clip]) -> Self {
        Self {
            video_path: video_path.to_string(),
            fps,
            clips: clips
                .iter()
                .map(|clip| ManifestEntry {
                    tag: clip.tag.clone(),
                    start_frame: clip.start_frame,
                    end_frame: clip.end_frame,
                    start_time: frames_to_timecode(clip.start_frame, fps),
                    end_time: frames_to_timecode(clip.end_frame, fps),
                })
                .collect(),
        }
    }
}

/// Export a manifest to YAML format.
pub fn export_manifest_yaml(manifest: &Manifest, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(manifest)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a manifest to JSON format.
pub fn export_manifest_json(manifest: &Manifest, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Export a manifest, picking the format from the file extension.
pub fn export_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_manifest_yaml(manifest, path),
        Some("json") => export_manifest_json(manifest, path),
        other => bail!("Unsupported manifest extension: {:?}", other),
    }
}
