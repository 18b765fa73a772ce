// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the letterboxing math used to fit a video frame
//! into the canvas while keeping its aspect ratio.

/// Size of a `width` x `height` frame scaled to fit inside the available
/// area, keeping its aspect ratio.
pub fn fit_within(width: u32, height: u32, available_w: f32, available_h: f32) -> (f32, f32) {
    if width == 0 || height == 0 || available_w <= 0.0 || available_h <= 0.0 {
        return (0.0, 0.0);
    }
    let frame_aspect = width as f32 / height as f32;
    let available_aspect = available_w / available_h;

    if frame_aspect > available_aspect {
        // Frame is wider - fit to width
        (available_w, available_w / frame_aspect)
    } else {
        // Frame is taller - fit to height
        (available_h * frame_aspect, available_h)
    }
}

/// Offset that centers a `size` box inside `available`.
pub fn center_offset(size: (f32, f32), available: (f32, f32)) -> (f32, f32) {
    ((available.0 - size.0) / 2.0, (available.1 - size.1) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_frame() {
        let (w, h) = fit_within(1920, 1080, 800.0, 800.0);
        assert!((w - 800.0).abs() < 0.001);
        assert!((h - 450.0).abs() < 0.001);
        let (x, y) = center_offset((w, h), (800.0, 800.0));
        assert!(x.abs() < 0.001);
        assert!((y - 175.0).abs() < 0.001);
    }

    #[test]
    fn test_fit_tall_frame() {
        let (w, h) = fit_within(1080, 1920, 1000.0, 480.0);
        assert!((w - 270.0).abs() < 0.001);
        assert!((h - 480.0).abs() < 0.001);
    }

    #[test]
    fn test_fit_degenerate() {
        assert_eq!(fit_within(0, 1080, 800.0, 600.0), (0.0, 0.0));
        assert_eq!(fit_within(1920, 1080, 0.0, 600.0), (0.0, 0.0));
    }
}
