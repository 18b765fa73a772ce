// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tag panel.
//!
//! One colored button per tag. Clicking a button fills the tag field,
//! dragging one onto another reorders them, the swatch next to each button
//! edits its color, and the context menu rebinds or removes it.

use crate::models::tag::{Rgb, Tag, TagRegistry};
use crate::session::ShellAction;

/// Contents of the add/edit tag dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDraft {
    pub name: String,
    pub shortcut: String,
    /// Set when rebinding an existing tag instead of adding a new one.
    pub editing: Option<String>,
}

impl TagDraft {
    fn for_tag(tag: &Tag) -> Self {
        Self {
            name: tag.name.clone(),
            shortcut: tag.shortcut.clone().unwrap_or_default(),
            editing: Some(tag.name.clone()),
        }
    }

    /// Action for the confirmed dialog, if there is anything to apply.
    fn into_action(self) -> Option<ShellAction> {
        let shortcut = Some(self.shortcut.trim().to_string()).filter(|s| !s.is_empty());
        match self.editing {
            Some(name) => Some(ShellAction::SetTagShortcut { name, shortcut }),
            None if self.name.trim().is_empty() => None,
            None => Some(ShellAction::AddTag {
                name: self.name.trim().to_string(),
                shortcut,
            }),
        }
    }
}

pub fn color32(color: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

/// Display the tag buttons.
pub fn show(
    ui: &mut egui::Ui,
    tags: &TagRegistry,
    selected: &str,
    draft: &mut Option<TagDraft>,
    actions: &mut Vec<ShellAction>,
) {
    ui.horizontal(|ui| {
        ui.heading("Tags");
        if ui.small_button("➕").on_hover_text("Add new tag").clicked() {
            *draft = Some(TagDraft::default());
        }
    });

    if tags.is_empty() {
        ui.label(egui::RichText::new("No tags yet").italics().weak());
        return;
    }

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = egui::vec2(4.0, 6.0);
        for tag in tags.iter() {
            show_tag(ui, tag, tag.name == selected, draft, actions);
        }
    });

    ui.label(
        egui::RichText::new("Drag a tag onto another to reorder, right-click for more")
            .small()
            .weak(),
    );
}

fn show_tag(
    ui: &mut egui::Ui,
    tag: &Tag,
    is_selected: bool,
    draft: &mut Option<TagDraft>,
    actions: &mut Vec<ShellAction>,
) {
    let fill = if is_selected { tag.color.lighter(0.3) } else { tag.color };
    let stroke = if is_selected {
        egui::Stroke::new(2.0, egui::Color32::WHITE)
    } else {
        egui::Stroke::new(1.0, egui::Color32::from_gray(136))
    };

    let id = egui::Id::new(("tag_button", &tag.name));
    let drag = ui.dnd_drag_source(id, tag.name.clone(), |ui| {
        ui.add(
            egui::Button::new(egui::RichText::new(&tag.name).color(egui::Color32::BLACK))
                .fill(color32(fill))
                .stroke(stroke)
                .min_size(egui::vec2(60.0, 0.0)),
        )
    });

    let button = match &tag.shortcut {
        Some(shortcut) => drag.inner.on_hover_text(format!("Shortcut: {shortcut}")),
        None => drag.inner,
    };
    if button.clicked() {
        actions.push(ShellAction::SelectTag(tag.name.clone()));
    }
    button.context_menu(|ui| {
        if ui.button("Edit shortcut...").clicked() {
            *draft = Some(TagDraft::for_tag(tag));
            ui.close_menu();
        }
        if ui.button("Remove tag").clicked() {
            actions.push(ShellAction::RemoveTag(tag.name.clone()));
            ui.close_menu();
        }
    });

    if let Some(source) = drag.response.dnd_release_payload::<String>() {
        if *source != tag.name {
            actions.push(ShellAction::ReorderTags {
                source: source.as_ref().clone(),
                target: tag.name.clone(),
            });
        }
    }

    let mut rgb = tag.color.to_array();
    let swatch = egui::color_picker::color_edit_button_srgb(ui, &mut rgb)
        .on_hover_text(format!("Change color of {}", tag.name));
    if swatch.changed() {
        actions.push(ShellAction::SetTagColor {
            name: tag.name.clone(),
            color: Rgb::from(rgb),
        });
    }
}

/// Display the add/edit tag dialog while a draft is open.
pub fn show_dialog(ctx: &egui::Context, draft: &mut Option<TagDraft>, actions: &mut Vec<ShellAction>) {
    let Some(current) = draft.as_mut() else {
        return;
    };

    let title = if current.editing.is_some() { "Edit Tag" } else { "Add New Tag" };
    let mut confirmed = false;
    let mut cancelled = false;

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            egui::Grid::new("tag_dialog").num_columns(2).show(ui, |ui| {
                ui.label("Name:");
                ui.add_enabled(
                    current.editing.is_none(),
                    egui::TextEdit::singleline(&mut current.name),
                );
                ui.end_row();

                ui.label("Shortcut:");
                ui.add(egui::TextEdit::singleline(&mut current.shortcut).hint_text("e.g. Ctrl+6"));
                ui.end_row();
            });

            ui.horizontal(|ui| {
                confirmed = ui.button("OK").clicked();
                cancelled = ui.button("Cancel").clicked();
            });
        });

    if confirmed {
        if let Some(action) = draft.take().and_then(TagDraft::into_action) {
            actions.push(action);
        }
    } else if cancelled {
        *draft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tag_draft() {
        let draft = TagDraft {
            name: " Press ".to_string(),
            shortcut: " ".to_string(),
            editing: None,
        };
        assert_eq!(
            draft.into_action(),
            Some(ShellAction::AddTag {
                name: "Press".to_string(),
                shortcut: None
            })
        );
        assert_eq!(TagDraft::default().into_action(), None);
    }

    #[test]
    fn test_edit_tag_draft() {
        let mut tags = TagRegistry::new();
        tags.add("Goal", Some("Ctrl+5"), None);
        let mut draft = TagDraft::for_tag(tags.iter().next().unwrap());
        assert_eq!(draft.shortcut, "Ctrl+5");

        draft.shortcut = "Ctrl+G".to_string();
        assert_eq!(
            draft.into_action(),
            Some(ShellAction::SetTagShortcut {
                name: "Goal".to_string(),
                shortcut: Some("Ctrl+G".to_string())
            })
        );
    }
}
