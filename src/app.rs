// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the annotation session and the open video,
//! turns UI interaction into session actions, drives playback and reports
//! errors in the status bar.

use crate::config::AppConfig;
use crate::io::{
    export::{self, ClipExporter, FfmpegExporter, Manifest},
    media::{self, VideoSource, VIDEO_EXTENSIONS},
    serialization,
};
use crate::models::clip::{Clip, ClipFilter};
use crate::session::{Effect, Session, ShellAction};
use crate::ui::{canvas, clips, shortcuts, tags, timeline, toolbar};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// Message shown in the status bar.
struct Status {
    text: String,
    is_error: bool,
}

/// Main application state.
pub struct MatchClipApp {
    /// Tags, clips and playback position
    session: Session,

    config: AppConfig,

    /// Decoder for the open video
    video: Option<Box<dyn VideoSource>>,

    /// Texture holding the last decoded frame
    frame_texture: Option<egui::TextureHandle>,

    /// Decoded frame dimensions (width, height)
    frame_size: Option<(u32, u32)>,

    /// Set when the cursor jumped and the frame must be re-read
    needs_seek: bool,

    /// UI time of the last playback tick
    last_tick: Option<f64>,

    /// Which clips an export covers
    export_filter: ClipFilter,

    /// Open add/edit tag dialog
    tag_draft: Option<tags::TagDraft>,

    /// Open clip edit dialog
    clip_draft: Option<clips::ClipDraft>,

    /// Receiver for a running clip export
    export_job: Option<Receiver<Result<Vec<PathBuf>, String>>>,

    status: Option<Status>,
}

impl MatchClipApp {
    /// Create the application around a session.
    pub fn new(session: Session, config: AppConfig) -> Self {
        Self {
            session,
            config,
            video: None,
            frame_texture: None,
            frame_size: None,
            needs_seek: false,
            last_tick: None,
            export_filter: ClipFilter::All,
            tag_draft: None,
            clip_draft: None,
            export_job: None,
            status: None,
        }
    }

    fn info(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::info!("{}", text);
        self.status = Some(Status { text, is_error: false });
    }

    fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::error!("{}", text);
        self.status = Some(Status { text, is_error: true });
    }

    /// Apply a session action and carry out its side effects.
    fn handle(&mut self, action: ShellAction) {
        log::debug!("Action: {:?}", action);
        let removes_clip = matches!(action, ShellAction::RemoveClip(_));
        match self.session.apply(action) {
            Ok(Effect::FrameChanged) => self.needs_seek = true,
            Ok(Effect::PlaybackToggled) => {
                self.last_tick = None;
                if self.session.cursor.is_playing() {
                    self.needs_seek = true;
                }
            }
            Ok(Effect::ClipsChanged) => {
                // Indices after the removed clip shift, so an open edit dialog is stale
                if removes_clip {
                    self.clip_draft = None;
                }
                log::info!("Clip list changed, total: {}", self.session.clips.len());
            }
            Ok(Effect::TagsChanged) | Ok(Effect::None) => {}
            Err(e) => self.error(e.to_string()),
        }
    }

    /// Drop the decoder and everything shown from it.
    fn close_video(&mut self) {
        self.video = None;
        self.frame_texture = None;
        self.frame_size = None;
        self.needs_seek = false;
        self.session.cursor.reset();
    }

    /// Reset everything except the tags.
    fn new_project(&mut self) {
        self.session.new_project();
        self.close_video();
        self.clip_draft = None;
        self.info("New project created");
    }

    /// Open a video file and show its first frame. Returns whether it opened.
    pub fn open_video_file(&mut self, path: &Path) -> bool {
        match media::open_video(path) {
            Ok(source) => {
                let info = source.info();
                self.session.open_video(&path.to_string_lossy(), info);
                self.video = Some(source);
                self.frame_texture = None;
                self.frame_size = None;
                self.needs_seek = true;
                self.info(format!(
                    "Opened {} ({} frames @ {:.2} fps)",
                    path.display(),
                    self.session.cursor.total_frames(),
                    self.session.cursor.fps()
                ));
                true
            }
            Err(e) => {
                self.error(format!("Failed to open video: {:#}", e));
                false
            }
        }
    }

    /// Load a project file, opening its video when it is not already open.
    pub fn load_project_file(&mut self, path: &Path) {
        let project = match serialization::load_project(path) {
            Ok(project) => project,
            Err(e) => {
                self.error(format!("Failed to load data: {}", e));
                return;
            }
        };

        let previous = self.session.video_path().to_string();
        let video_path = project.video_path.clone();
        let clip_count = project.clips.len();
        self.session.load_project(project);
        self.clip_draft = None;
        self.info(format!("Loaded {} clips from {}", clip_count, path.display()));

        let already_open = self.video.is_some() && video_path == previous;
        if video_path.is_empty() || already_open {
            return;
        }

        let video_path = PathBuf::from(video_path);
        let opened = if video_path.exists() {
            self.open_video_file(&video_path)
        } else {
            log::warn!("Referenced video not found: {}", video_path.display());
            false
        };
        // Clips now belong to the referenced video, not to whatever was open
        if !opened && self.video.is_some() {
            self.close_video();
        }
    }

    fn save_project_file(&mut self, path: &Path) {
        match serialization::save_project(&self.session.to_project(), path) {
            Ok(()) => self.info(format!("Project data saved to {}", path.display())),
            Err(e) => self.error(format!("Failed to save data: {}", e)),
        }
    }

    fn selected_clips(&self) -> Vec<Clip> {
        let filter = &self.export_filter;
        self.session
            .clips_for_export(|c| filter.matches(c))
            .into_iter()
            .cloned()
            .collect()
    }

    /// Cut the selected clips on a background thread.
    fn export_clips(&mut self) {
        if !self.session.has_video() {
            self.error("No video is loaded");
            return;
        }
        if self.export_job.is_some() {
            self.error("An export is already running");
            return;
        }
        let selected = self.selected_clips();
        if selected.is_empty() {
            self.error("No clips selected for export");
            return;
        }

        let mut exporter = FfmpegExporter::new(self.config.ffmpeg_path.clone());
        exporter.output_dir = self.config.export_dir.clone();
        exporter.stream_copy = self.config.stream_copy;
        let video_path = PathBuf::from(self.session.video_path());
        let fps = self.session.cursor.fps();

        let (sender, receiver) = channel();
        self.export_job = Some(receiver);
        self.info(format!("Exporting {} clips...", selected.len()));

        // Spawn background thread for exporting
        std::thread::spawn(move || {
            let refs: Vec<&Clip> = selected.iter().collect();
            let result = exporter
                .export(&video_path, &refs, fps)
                .map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
    }

    fn export_manifest(&mut self, path: &Path) {
        let selected = self.selected_clips();
        let refs: Vec<&Clip> = selected.iter().collect();
        let manifest = Manifest::new(self.session.video_path(), self.session.cursor.fps(), &refs);
        match export::export_manifest(&manifest, path) {
            Ok(()) => self.info(format!("Exported manifest of {} clips to {}", refs.len(), path.display())),
            Err(e) => self.error(format!("Failed to export manifest: {:#}", e)),
        }
    }

    fn poll_export(&mut self) {
        let Some(receiver) = &self.export_job else {
            return;
        };
        match receiver.try_recv() {
            Ok(result) => {
                self.export_job = None;
                match result {
                    Ok(files) => self.info(format!("Exported {} clips", files.len())),
                    Err(e) => self.error(format!("Export failed: {}", e)),
                }
            }
            Err(TryRecvError::Disconnected) => {
                self.export_job = None;
                self.error("Export failed: the export thread stopped unexpectedly");
            }
            Err(TryRecvError::Empty) => {}
        }
    }

    /// Upload a decoded frame to the canvas texture.
    fn show_frame(&mut self, ctx: &egui::Context, frame: image::RgbaImage) {
        let size = [frame.width() as usize, frame.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, frame.as_raw());
        match &mut self.frame_texture {
            Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.frame_texture =
                    Some(ctx.load_texture("video_frame", color_image, egui::TextureOptions::LINEAR));
            }
        }
        self.frame_size = Some((frame.width(), frame.height()));
    }

    /// Re-read the frame under the cursor after a jump.
    fn refresh_frame(&mut self, ctx: &egui::Context) {
        if !self.needs_seek {
            return;
        }
        self.needs_seek = false;
        let frame_index = self.session.cursor.current_frame();
        let Some(video) = self.video.as_mut() else {
            return;
        };

        let result = video.seek(frame_index).and_then(|_| video.read_next_frame());
        match result {
            Ok(Some(frame)) => self.show_frame(ctx, frame),
            Ok(None) => log::debug!("No frame at {}", frame_index),
            Err(e) => self.error(format!("Failed to decode frame {}: {:#}", frame_index, e)),
        }
    }

    /// Advance playback by at most one frame per tick.
    fn playback_tick(&mut self, ctx: &egui::Context) {
        if !self.session.cursor.is_playing() {
            return;
        }
        let interval = self.session.cursor.frame_interval();
        let now = ctx.input(|i| i.time);
        let due = self
            .last_tick
            .map_or(true, |last| now - last >= interval.as_secs_f64());

        if due {
            self.last_tick = Some(now);
            self.session.cursor.tick();
            if let Some(video) = self.video.as_mut() {
                match video.read_next_frame() {
                    Ok(Some(frame)) => self.show_frame(ctx, frame),
                    Ok(None) => self.session.cursor.set_playing(false),
                    Err(e) => {
                        self.session.cursor.set_playing(false);
                        self.error(format!("Playback stopped: {:#}", e));
                    }
                }
            }
        }

        if self.session.cursor.is_playing() {
            ctx.request_repaint_after(interval);
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New Project").clicked() {
                        self.new_project();
                        ui.close_menu();
                    }
                    if ui.button("Open Video...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Video Files", VIDEO_EXTENSIONS)
                            .pick_file()
                        {
                            self.open_video_file(&path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Load Data...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON Files", &["json"])
                            .pick_file()
                        {
                            self.load_project_file(&path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Save Data As...").clicked() {
                        if !self.session.has_video() {
                            self.error("No video is loaded");
                        } else if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON Files", &["json"])
                            .set_file_name("project.json")
                            .save_file()
                        {
                            self.save_project_file(&path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Tags", |ui| {
                    if ui.button("Add New Tag").clicked() {
                        self.tag_draft = Some(tags::TagDraft::default());
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn pick_manifest_path(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("YAML", &["yaml", "yml"])
            .add_filter("JSON", &["json"])
            .set_file_name("clips.yaml")
            .save_file()
        {
            self.export_manifest(&path);
        }
    }
}

impl eframe::App for MatchClipApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_export();
        if self.export_job.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }

        let mut actions = shortcuts::collect(ctx, &self.session.tags, self.config.jump_seconds);

        self.menu_bar(ctx);

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| match &self.status {
                Some(status) if status.is_error => {
                    ui.colored_label(egui::Color32::LIGHT_RED, &status.text);
                }
                Some(status) => {
                    ui.label(&status.text);
                }
                None => {
                    ui.label(egui::RichText::new("Ready").weak());
                }
            });
        });

        // Tags and clips (right side)
        let clips_request = egui::SidePanel::right("side_panel")
            .default_width(380.0)
            .show(ctx, |ui| {
                tags::show(
                    ui,
                    &self.session.tags,
                    self.session.tag_text(),
                    &mut self.tag_draft,
                    &mut actions,
                );
                ui.separator();
                clips::show(
                    ui,
                    &self.session.clips,
                    &self.session.tags,
                    self.session.cursor.fps(),
                    &mut self.export_filter,
                    &mut self.clip_draft,
                    &mut actions,
                )
            })
            .inner;

        // Transport, timeline and clip controls (bottom of the video)
        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            timeline::show(
                ui,
                &self.session.cursor,
                &self.session.clips,
                &self.session.tags,
                &mut actions,
            );
            toolbar::show(ui, &self.session, self.config.jump_seconds, &mut actions);
            ui.add_space(4.0);
        });

        // Video (center)
        egui::CentralPanel::default().show(ctx, |ui| {
            canvas::show(ui, &self.frame_texture, self.frame_size, self.session.video_path());
        });

        tags::show_dialog(ctx, &mut self.tag_draft, &mut actions);
        clips::show_dialog(
            ctx,
            &mut self.clip_draft,
            self.session.cursor.total_frames(),
            &mut actions,
        );

        for action in actions {
            self.handle(action);
        }

        match clips_request {
            clips::ClipsRequest::ExportVideos => self.export_clips(),
            clips::ClipsRequest::ExportManifest => self.pick_manifest_path(),
            clips::ClipsRequest::None => {}
        }

        self.refresh_frame(ctx);
        self.playback_tick(ctx);
    }
}
