// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Transport and clip controls.
//!
//! This module provides the button rows under the video: play/pause, frame
//! and jump stepping, and the start/end markers with the tag field used to
//! commit a clip.

use crate::session::{Session, ShellAction};

/// Display the transport and clip control rows.
pub fn show(ui: &mut egui::Ui, session: &Session, jump_seconds: f64, actions: &mut Vec<ShellAction>) {
    let has_video = session.cursor.total_frames() > 0;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        ui.add_enabled_ui(has_video, |ui| {
            let play_label = if session.cursor.is_playing() { "⏸ Pause" } else { "▶ Play" };
            if ui.button(play_label).on_hover_text("Space").clicked() {
                actions.push(ShellAction::TogglePlay);
            }
            if ui.button("⏮ Frame").on_hover_text("Left").clicked() {
                actions.push(ShellAction::StepBackward);
            }
            if ui.button("⏭ Frame").on_hover_text("Right").clicked() {
                actions.push(ShellAction::StepForward);
            }

            let jump = format_jump(jump_seconds);
            if ui.button(format!("⏪ -{jump}")).on_hover_text("Shift+Left").clicked() {
                actions.push(ShellAction::JumpSeconds(-jump_seconds));
            }
            if ui.button(format!("⏩ +{jump}")).on_hover_text("Shift+Right").clicked() {
                actions.push(ShellAction::JumpSeconds(jump_seconds));
            }
        });
    });

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        ui.add_enabled_ui(has_video, |ui| {
            if ui.button("⏺ Set Start").on_hover_text("I").clicked() {
                actions.push(ShellAction::MarkStart);
            }
            if ui.button("⏹ Set End").on_hover_text("O").clicked() {
                actions.push(ShellAction::MarkEnd);
            }
        });

        ui.label("Tag:");
        let mut text = session.tag_text().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut text)
                .hint_text("Pick a tag or type one")
                .desired_width(180.0),
        );
        if response.changed() {
            actions.push(ShellAction::SetTagText(text));
        }
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let ready = session.clips.has_pending_start() && session.clips.has_pending_end();
        if ui.add_enabled(ready, egui::Button::new("➕ Add Clip")).clicked() || submitted {
            actions.push(ShellAction::CommitClip);
        }
    });
}

fn format_jump(seconds: f64) -> String {
    if seconds >= 60.0 && seconds % 60.0 == 0.0 {
        format!("{} Min", seconds / 60.0)
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_jump() {
        assert_eq!(format_jump(60.0), "1 Min");
        assert_eq!(format_jump(120.0), "2 Min");
        assert_eq!(format_jump(10.0), "10s");
        assert_eq!(format_jump(90.0), "90s");
    }
}
