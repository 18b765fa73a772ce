// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video canvas.
//!
//! This module draws the current video frame, letterboxed to the available
//! space, or a welcome message when no video is open.

use crate::util::geometry::{center_offset, fit_within};

/// Display the current frame.
pub fn show(
    ui: &mut egui::Ui,
    frame_texture: &Option<egui::TextureHandle>,
    frame_size: Option<(u32, u32)>,
    video_path: &str,
) {
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(20);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        match (frame_texture, frame_size) {
            (Some(texture), Some((width, height))) => {
                let available = ui.available_size();
                let display = fit_within(width, height, available.x, available.y);
                let (x_offset, y_offset) = center_offset(display, (available.x, available.y));

                let frame_rect = egui::Rect::from_min_size(
                    ui.min_rect().min + egui::vec2(x_offset, y_offset),
                    egui::vec2(display.0, display.1),
                );

                ui.painter().image(
                    texture.id(),
                    frame_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            _ if !video_path.is_empty() => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{}\n(no frame decoded)", video_path))
                            .color(egui::Color32::from_gray(180)),
                    );
                });
            }
            _ => {
                // Show welcome message when no video is loaded
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.heading(
                            egui::RichText::new("MatchClip")
                                .size(32.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                        ui.label(
                            egui::RichText::new("Football match clip tagger")
                                .size(14.0)
                                .color(egui::Color32::from_gray(150)),
                        );
                        ui.add_space(20.0);
                        ui.label(
                            egui::RichText::new("File → Open Video... to begin tagging")
                                .weak()
                                .color(egui::Color32::from_gray(130)),
                        );
                    });
                });
            }
        }
    });
}
