// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video file loading.
//!
//! Decoding is delegated to an external library. The application only sees
//! the [`VideoSource`] trait: frame count, frame rate, seeking and reading
//! the next decoded frame as RGBA. The OpenCV backend is compiled in with
//! the `video-opencv` feature.

use anyhow::Result;
use image::RgbaImage;
use std::path::Path;

/// File extensions offered in the open-video dialog.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv"];

/// Stream properties reported by the decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    pub total_frames: u64,
    /// Frames per second; 0.0 when the container does not say.
    pub fps: f64,
    pub width: u32,
    pub height: u32,
}

/// A decoded video the playback cursor can drive.
pub trait VideoSource {
    fn info(&self) -> VideoInfo;

    /// Position the decoder so the next read returns `frame`.
    fn seek(&mut self, frame: u64) -> Result<()>;

    /// Decode the next frame, or `None` at the end of the stream.
    fn read_next_frame(&mut self) -> Result<Option<RgbaImage>>;
}

/// Open a video file with the compiled-in decoder.
#[cfg(feature = "video-opencv")]
pub fn open_video(path: &Path) -> Result<Box<dyn VideoSource>> {
    Ok(Box::new(opencv_source::OpenCvSource::open(path)?))
}

/// Open a video file with the compiled-in decoder.
#[cfg(not(feature = "video-opencv"))]
pub fn open_video(path: &Path) -> Result<Box<dyn VideoSource>> {
    anyhow::bail!(
        "Cannot open {}: built without a video decoder (enable the `video-opencv` feature)",
        path.display()
    )
}

#[cfg(feature = "video-opencv")]
mod opencv_source {
    use super::{VideoInfo, VideoSource};
    use anyhow::{anyhow, Context, Result};
    use image::RgbaImage;
    use opencv::{core::Mat, imgproc, prelude::*, videoio};
    use std::path::Path;

    pub struct OpenCvSource {
        capture: videoio::VideoCapture,
        info: VideoInfo,
    }

    impl OpenCvSource {
        pub fn open(path: &Path) -> Result<Self> {
            let path_str = path
                .to_str()
                .ok_or_else(|| anyhow!("Video path is not valid UTF-8: {}", path.display()))?;
            let capture = videoio::VideoCapture::from_file(path_str, videoio::CAP_ANY)
                .with_context(|| format!("Failed to open video {}", path.display()))?;
            if !capture.is_opened()? {
                return Err(anyhow!("Decoder could not open {}", path.display()));
            }

            let info = VideoInfo {
                total_frames: capture.get(videoio::CAP_PROP_FRAME_COUNT)?.max(0.0) as u64,
                fps: capture.get(videoio::CAP_PROP_FPS)?,
                width: capture.get(videoio::CAP_PROP_FRAME_WIDTH)?.max(0.0) as u32,
                height: capture.get(videoio::CAP_PROP_FRAME_HEIGHT)?.max(0.0) as u32,
            };
            log::info!(
                "Opened {} ({}x{}, {} frames @ {:.3} fps)",
                path.display(),
                info.width,
                info.height,
                info.total_frames,
                info.fps
            );

            Ok(Self { capture, info })
        }
    }

    impl VideoSource for OpenCvSource {
        fn info(&self) -> VideoInfo {
            self.info
        }

        fn seek(&mut self, frame: u64) -> Result<()> {
            self.capture.set(videoio::CAP_PROP_POS_FRAMES, frame as f64)?;
            Ok(())
        }

        fn read_next_frame(&mut self) -> Result<Option<RgbaImage>> {
            let mut bgr = Mat::default();
            if !self.capture.read(&mut bgr)? || bgr.empty() {
                return Ok(None);
            }

            let mut rgba = Mat::default();
            imgproc::cvt_color(&bgr, &mut rgba, imgproc::COLOR_BGR2RGBA, 0)?;
            let width = rgba.cols() as u32;
            let height = rgba.rows() as u32;
            let pixels = rgba.data_bytes()?.to_vec();

            RgbaImage::from_raw(width, height, pixels)
                .map(Some)
                .ok_or_else(|| anyhow!("Decoded frame has unexpected size {}x{}", width, height))
        }
    }
}
