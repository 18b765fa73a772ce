// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tag registry data structures.
//!
//! Tags are the categorical labels attached to clips. The registry keeps
//! them unique and ordered, with an optional keyboard shortcut and a display
//! color for each one. Lookups for unknown tags degrade to defaults instead
//! of failing, since the tag panel can hold stale names for a frame.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGB color, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Blend towards white by `factor` (0.0 keeps the color, 1.0 is white).
    pub fn lighter(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let lift = |c: u8| c.saturating_add(((255 - c) as f32 * factor) as u8);
        Self::new(lift(self.r), lift(self.g), lift(self.b))
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color {value:?}, expected #RRGGBB"))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// Color returned for tags the registry does not know.
pub const DEFAULT_TAG_COLOR: Rgb = Rgb::new(0xDD, 0xDD, 0xDD);

/// Colors handed out to tags registered without an explicit color.
pub const PALETTE: [Rgb; 11] = [
    Rgb::new(0xFF, 0x99, 0x99),
    Rgb::new(0x99, 0xFF, 0x99),
    Rgb::new(0x99, 0x99, 0xFF),
    Rgb::new(0xFF, 0xFF, 0x99),
    Rgb::new(0xFF, 0x99, 0xFF),
    Rgb::new(0x99, 0xFF, 0xFF),
    Rgb::new(0xFF, 0xCC, 0x99),
    Rgb::new(0xCC, 0x99, 0xFF),
    Rgb::new(0xFF, 0x66, 0x66),
    Rgb::new(0x66, 0xFF, 0x66),
    Rgb::new(0x66, 0x66, 0xFF),
];

/// A registered tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub shortcut: Option<String>,
    pub color: Rgb,
}

/// Ordered collection of unique tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRegistry {
    tags: Vec<Tag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag at the end of the order.
    ///
    /// Adding a name that is already registered does nothing; the first
    /// registration keeps its shortcut and color. Without an explicit color
    /// the tag gets the palette entry indexed by the new tag count.
    pub fn add(&mut self, name: &str, shortcut: Option<&str>, color: Option<Rgb>) -> &mut Self {
        if self.contains(name) {
            return self;
        }
        let color = color.unwrap_or(PALETTE[(self.tags.len() + 1) % PALETTE.len()]);
        self.tags.push(Tag {
            name: name.to_string(),
            shortcut: shortcut.filter(|s| !s.trim().is_empty()).map(str::to_string),
            color,
        });
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// Tag names in display order.
    pub fn get_tags(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn get_color(&self, name: &str) -> Rgb {
        self.get(name).map_or(DEFAULT_TAG_COLOR, |t| t.color)
    }

    pub fn get_shortcut(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|t| t.shortcut.as_deref())
    }

    pub fn set_color(&mut self, name: &str, color: Rgb) {
        if let Some(tag) = self.get_mut(name) {
            tag.color = color;
        }
    }

    /// Rebind (or clear) the shortcut of an existing tag.
    pub fn set_shortcut(&mut self, name: &str, shortcut: Option<&str>) {
        if let Some(tag) = self.get_mut(name) {
            tag.shortcut = shortcut.filter(|s| !s.trim().is_empty()).map(str::to_string);
        }
    }

    /// Remove a tag. Returns whether it was registered.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.tags.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Move `source` so it sits immediately before `target`.
    ///
    /// All other tags keep their relative order. Unknown names or
    /// `source == target` leave the order untouched.
    pub fn reorder(&mut self, source: &str, target: &str) {
        if source == target {
            return;
        }
        let (Some(from), Some(_)) = (self.position(source), self.position(target)) else {
            return;
        };
        let tag = self.tags.remove(from);
        // Target index shifts by one when source was in front of it
        let to = self.position(target).unwrap_or(self.tags.len());
        self.tags.insert(to, tag);
    }

    /// Find the tag bound to a shortcut such as `"Ctrl+1"` (case-insensitive).
    pub fn tag_for_shortcut(&self, combo: &str) -> Option<&str> {
        let combo = normalize_combo(combo);
        self.tags
            .iter()
            .find(|t| t.shortcut.as_deref().map(normalize_combo).as_deref() == Some(combo.as_str()))
            .map(|t| t.name.as_str())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tags.iter().position(|t| t.name == name)
    }

    fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Tag> {
        self.tags.iter_mut().find(|t| t.name == name)
    }
}

fn normalize_combo(combo: &str) -> String {
    combo
        .split('+')
        .map(|part| part.trim().to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("+")
}
