// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video timeline scrubber control.
//!
//! This module provides the seek slider and time label for navigating
//! through the video, with the pending clip markers drawn on the track.

use crate::models::clip::ClipSet;
use crate::models::playback::{frames_to_timecode, PlaybackCursor};
use crate::models::tag::TagRegistry;
use crate::session::ShellAction;

/// Display the seek slider, clip overlays and time label.
pub fn show(
    ui: &mut egui::Ui,
    cursor: &PlaybackCursor,
    clips: &ClipSet,
    tags: &TagRegistry,
    actions: &mut Vec<ShellAction>,
) {
    let total = cursor.total_frames();

    ui.horizontal(|ui| {
        let mut frame = cursor.current_frame();
        ui.spacing_mut().slider_width = (ui.available_width() - 190.0).max(100.0);
        let response = ui.add_enabled(
            total > 0,
            egui::Slider::new(&mut frame, 0..=total.max(1)).show_value(false),
        );
        if response.changed() {
            actions.push(ShellAction::Seek(frame as i64));
        }

        if total > 0 {
            paint_overlays(ui.painter(), response.rect, cursor, clips, tags);
        }

        ui.label(egui::RichText::new(cursor.timecode_label()).monospace());
    });

    // Pending markers
    ui.horizontal(|ui| {
        let marker = |frame: Option<u64>| match frame {
            Some(f) => format!("{} ({})", frames_to_timecode(f, cursor.fps()), f),
            None => "-".to_string(),
        };
        ui.label(format!("Start: {}", marker(clips.pending_start())));
        ui.separator();
        ui.label(format!("End: {}", marker(clips.pending_end())));
        ui.separator();
        ui.label(
            egui::RichText::new(format!("Frame {} / {} @ {:.2} fps", cursor.current_frame(), total, cursor.fps()))
                .weak(),
        );
    });
}

/// Draw committed clips and pending markers along the slider track.
fn paint_overlays(
    painter: &egui::Painter,
    rect: egui::Rect,
    cursor: &PlaybackCursor,
    clips: &ClipSet,
    tags: &TagRegistry,
) {
    let total = cursor.total_frames().max(1) as f32;
    let x_at = |frame: u64| rect.left() + rect.width() * (frame as f32 / total).min(1.0);
    let band_top = rect.bottom() - 3.0;

    for clip in clips.list() {
        let [r, g, b] = tags.get_color(&clip.tag).to_array();
        let band = egui::Rect::from_min_max(
            egui::pos2(x_at(clip.start_frame), band_top),
            egui::pos2(x_at(clip.end_frame).max(x_at(clip.start_frame) + 1.0), rect.bottom()),
        );
        painter.rect_filled(band, 0.0, egui::Color32::from_rgb(r, g, b));
    }

    let pending = [
        (clips.pending_start(), egui::Color32::LIGHT_GREEN),
        (clips.pending_end(), egui::Color32::LIGHT_RED),
    ];
    for (frame, color) in pending {
        if let Some(frame) = frame {
            let x = x_at(frame);
            painter.line_segment(
                [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
                egui::Stroke::new(2.0, color),
            );
        }
    }
}
