use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};
use tracing::{debug, warn};
use crate::error::{OverlayError, OverlayResult};

/// Looping ffmpeg decode of a video file into raw RGBA frames, cropped to
/// cover `width`x`height` and resampled to `fps`.
pub struct VideoDecoder {
    process: Child,
    stdout: Option<ChildStdout>,
    frame: Vec<u8>,
    pub width: i32,
    pub height: i32,
}

pub fn frame_len(width: i32, height: i32) -> usize {
    (width.max(0) as usize) * (height.max(0) as usize) * 4 // 4 bytes per pixel (RGBA)
}

impl VideoDecoder {
    pub fn spawn(path: &Path, width: i32, height: i32, fps: u32) -> OverlayResult<VideoDecoder> {
        let filter = format!(
            "fps={fps},scale={width}:{height}:force_original_aspect_ratio=increase,crop={width}:{height}"
        );
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .args(["-loglevel", "error"])
            .args(["-stream_loop", "-1"])
            .arg("-i")
            .arg(path)
            .arg("-an")
            .args(["-vf", &filter])
            .args(["-f", "rawvideo"])
            .args(["-pix_fmt", "rgba"])
            .arg("-")
            .spawn()
            .map_err(|e| OverlayError::Decoder(format!("failed to start ffmpeg: {}", e)))?;
        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| OverlayError::Decoder("failed to open ffmpeg stdout".into()))?;
        debug!(path = %path.display(), width, height, fps, "ffmpeg decoder started");

        Ok(VideoDecoder {
            process,
            stdout: Some(stdout),
            frame: vec![0; frame_len(width, height)],
            width,
            height,
        })
    }

    /// Blocks until the next frame is available. The stream loops forever, so
    /// running dry is reported once as an error and as `None` afterwards.
    pub fn next_frame(&mut self) -> OverlayResult<Option<&[u8]>> {
        let Some(stdout) = self.stdout.as_mut() else {
            return Ok(None);
        };
        match stdout.read_exact(&mut self.frame) {
            Ok(()) => Ok(Some(&self.frame)),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                self.stdout = None;
                Err(OverlayError::Decoder("ffmpeg produced no more frames".into()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for VideoDecoder {
    fn drop(&mut self) {
        // Close stdout so ffmpeg cannot block on a full pipe, then reap it
        self.stdout = None;
        if let Err(e) = self.process.kill() {
            debug!("ffmpeg already exited: {}", e);
        }
        if let Err(e) = self.process.wait() {
            warn!("failed to wait for ffmpeg process: {}", e);
        }
    }
}
