// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Keyboard shortcut handling.
//!
//! Fixed transport bindings plus one binding per tag. Tag bindings are
//! parsed from the registry every frame, so a rebinding applies to the very
//! next key press.

use crate::models::tag::TagRegistry;
use crate::session::ShellAction;
use egui::{Key, KeyboardShortcut, Modifiers};

/// Parse a combo such as `"Ctrl+1"` or `"Shift+Left"`.
///
/// `Ctrl` maps to the platform command key so the same config works on
/// macOS. Returns `None` for anything egui has no key for.
pub fn parse_shortcut(text: &str) -> Option<KeyboardShortcut> {
    let mut modifiers = Modifiers::NONE;
    let mut key = None;

    for part in text.split('+').map(str::trim) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "cmd" | "command" => modifiers = modifiers | Modifiers::COMMAND,
            "shift" => modifiers = modifiers | Modifiers::SHIFT,
            "alt" | "option" => modifiers = modifiers | Modifiers::ALT,
            "" => return None,
            _ => {
                if key.is_some() {
                    return None;
                }
                key = Some(parse_key(part)?);
            }
        }
    }

    key.map(|key| KeyboardShortcut::new(modifiers, key))
}

fn parse_key(name: &str) -> Option<Key> {
    match name.to_ascii_lowercase().as_str() {
        "left" => Some(Key::ArrowLeft),
        "right" => Some(Key::ArrowRight),
        "up" => Some(Key::ArrowUp),
        "down" => Some(Key::ArrowDown),
        "space" => Some(Key::Space),
        "enter" | "return" => Some(Key::Enter),
        "esc" | "escape" => Some(Key::Escape),
        _ if name.len() == 1 => Key::from_name(&name.to_ascii_uppercase()),
        _ => Key::from_name(name),
    }
}

/// Collect the actions triggered by this frame's key presses.
///
/// Plain-key transport bindings are ignored while a text field has focus;
/// tag bindings always fire.
pub fn collect(ctx: &egui::Context, tags: &TagRegistry, jump_seconds: f64) -> Vec<ShellAction> {
    let mut actions = Vec::new();

    ctx.input_mut(|input| {
        for tag in tags.iter() {
            let Some(shortcut) = tag.shortcut.as_deref().and_then(parse_shortcut) else {
                continue;
            };
            if input.consume_shortcut(&shortcut) {
                actions.push(ShellAction::SelectTag(tag.name.clone()));
            }
        }
    });

    if ctx.wants_keyboard_input() {
        return actions;
    }

    // Shift variants first: plain arrows would also match them
    let transport = [
        (KeyboardShortcut::new(Modifiers::SHIFT, Key::ArrowLeft), ShellAction::JumpSeconds(-jump_seconds)),
        (KeyboardShortcut::new(Modifiers::SHIFT, Key::ArrowRight), ShellAction::JumpSeconds(jump_seconds)),
        (KeyboardShortcut::new(Modifiers::NONE, Key::ArrowLeft), ShellAction::StepBackward),
        (KeyboardShortcut::new(Modifiers::NONE, Key::ArrowRight), ShellAction::StepForward),
        (KeyboardShortcut::new(Modifiers::NONE, Key::Space), ShellAction::TogglePlay),
        (KeyboardShortcut::new(Modifiers::NONE, Key::I), ShellAction::MarkStart),
        (KeyboardShortcut::new(Modifiers::NONE, Key::O), ShellAction::MarkEnd),
        (KeyboardShortcut::new(Modifiers::NONE, Key::Enter), ShellAction::CommitClip),
    ];
    ctx.input_mut(|input| {
        for (shortcut, action) in transport {
            if input.consume_shortcut(&shortcut) {
                actions.push(action);
            }
        }
    });

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_shortcuts() {
        assert_eq!(
            parse_shortcut("Ctrl+1"),
            Some(KeyboardShortcut::new(Modifiers::COMMAND, Key::Num1))
        );
        assert_eq!(
            parse_shortcut("ctrl + shift + g"),
            Some(KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::G))
        );
        assert_eq!(
            parse_shortcut("Shift+Left"),
            Some(KeyboardShortcut::new(Modifiers::SHIFT, Key::ArrowLeft))
        );
        assert_eq!(parse_shortcut("Space"), Some(KeyboardShortcut::new(Modifiers::NONE, Key::Space)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_shortcut(""), None);
        assert_eq!(parse_shortcut("Ctrl+"), None);
        assert_eq!(parse_shortcut("Ctrl"), None);
        assert_eq!(parse_shortcut("Ctrl+1+2"), None);
        assert_eq!(parse_shortcut("Ctrl+NotAKey"), None);
    }
}
