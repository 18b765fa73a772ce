// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clip list panel.
//!
//! This module lists the committed clips, lets the user jump to, edit or
//! remove them, and picks which clips an export covers.

use super::tags::color32;
use crate::models::clip::{Clip, ClipFilter, ClipSet};
use crate::models::playback::frames_to_timecode;
use crate::models::tag::TagRegistry;
use crate::session::ShellAction;

/// Result of clip panel interaction that the app handles itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipsRequest {
    None,
    ExportVideos,
    ExportManifest,
}

/// Contents of the clip edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipDraft {
    pub index: usize,
    pub start: u64,
    pub end: u64,
    pub tag: String,
}

impl ClipDraft {
    pub fn from_clip(index: usize, clip: &Clip) -> Self {
        Self {
            index,
            start: clip.start_frame,
            end: clip.end_frame,
            tag: clip.tag.clone(),
        }
    }

    fn into_action(self) -> ShellAction {
        ShellAction::EditClip {
            index: self.index,
            start: self.start,
            end: self.end,
            tag: self.tag,
        }
    }
}

/// Text shown for a clip in the list.
pub fn clip_label(clip: &Clip, fps: f64) -> String {
    format!(
        "{}: {}-{}  ({} - {})",
        clip.tag,
        clip.start_frame,
        clip.end_frame,
        frames_to_timecode(clip.start_frame, fps),
        frames_to_timecode(clip.end_frame, fps)
    )
}

/// Display the clip list and export controls.
pub fn show(
    ui: &mut egui::Ui,
    clips: &ClipSet,
    tags: &TagRegistry,
    fps: f64,
    filter: &mut ClipFilter,
    draft: &mut Option<ClipDraft>,
    actions: &mut Vec<ShellAction>,
) -> ClipsRequest {
    let mut request = ClipsRequest::None;

    ui.heading(format!("Clips ({})", clips.len()));

    let list_height = (ui.available_height() - 70.0).max(80.0);
    egui::ScrollArea::vertical()
        .id_source("clip_list")
        .max_height(list_height)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            if clips.is_empty() {
                ui.label(egui::RichText::new("Set start and end markers, then add a clip").italics().weak());
            }
            for (index, clip) in clips.list().iter().enumerate() {
                ui.horizontal(|ui| {
                    let (swatch, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, color32(tags.get_color(&clip.tag)));

                    let row = ui.selectable_label(false, clip_label(clip, fps));
                    if row.clicked() {
                        actions.push(ShellAction::Seek(clip.start_frame as i64));
                    }
                    if row.double_clicked() {
                        *draft = Some(ClipDraft::from_clip(index, clip));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("🗑").on_hover_text("Remove clip").clicked() {
                            actions.push(ShellAction::RemoveClip(index));
                        }
                        if ui.small_button("✏").on_hover_text("Edit clip").clicked() {
                            *draft = Some(ClipDraft::from_clip(index, clip));
                        }
                    });
                });
            }
        });

    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Export:");
        let selected_text = match filter {
            ClipFilter::All => "All clips".to_string(),
            ClipFilter::Tag(tag) => tag.clone(),
        };
        egui::ComboBox::from_id_source("export_filter")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                ui.selectable_value(filter, ClipFilter::All, "All clips");
                for tag in export_tags(tags, clips) {
                    ui.selectable_value(filter, ClipFilter::Tag(tag.to_string()), tag);
                }
            });
    });

    let selected = clips.select_for_export(|c| filter.matches(c)).len();
    ui.horizontal(|ui| {
        ui.add_enabled_ui(selected > 0, |ui| {
            if ui.button(format!("💾 Export {selected} Clips")).clicked() {
                request = ClipsRequest::ExportVideos;
            }
            if ui.button("📄 Export Manifest...").clicked() {
                request = ClipsRequest::ExportManifest;
            }
        });
    });

    request
}

/// Tags offered by the export filter: registered tags first, then any clip
/// tags the registry does not know.
fn export_tags<'a>(tags: &'a TagRegistry, clips: &'a ClipSet) -> Vec<&'a str> {
    let mut names = tags.get_tags();
    for tag in clips.tags_in_use() {
        if !names.contains(&tag) {
            names.push(tag);
        }
    }
    names
}

/// Display the clip edit dialog while a draft is open.
pub fn show_dialog(
    ctx: &egui::Context,
    draft: &mut Option<ClipDraft>,
    max_frame: u64,
    actions: &mut Vec<ShellAction>,
) {
    let Some(current) = draft.as_mut() else {
        return;
    };

    let mut confirmed = false;
    let mut cancelled = false;

    egui::Window::new(format!("Edit Clip {}", current.index + 1))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            let range = 0..=max_frame.max(current.start).max(current.end);
            egui::Grid::new("clip_dialog").num_columns(2).show(ui, |ui| {
                ui.label("Start frame:");
                ui.add(egui::DragValue::new(&mut current.start).range(range.clone()));
                ui.end_row();

                ui.label("End frame:");
                ui.add(egui::DragValue::new(&mut current.end).range(range));
                ui.end_row();

                ui.label("Tag:");
                ui.text_edit_singleline(&mut current.tag);
                ui.end_row();
            });

            ui.horizontal(|ui| {
                confirmed = ui.button("OK").clicked();
                cancelled = ui.button("Cancel").clicked();
            });
        });

    if confirmed {
        if let Some(current) = draft.take() {
            actions.push(current.into_action());
        }
    } else if cancelled {
        *draft = None;
    }
}
