use rand::Rng;
use raylib::prelude::*;
use tracing::{info, warn};
use crate::constants::*;
use crate::error::{OverlayError, OverlayResult};
use crate::ffmpeg::VideoDecoder;
use crate::media::{MediaAsset, MediaHandle, MediaKind};
use crate::scene::{advance_phase, cover_source, float_offset, OverlayLayer};
use crate::texture_loader::load_texture_with_exif_rotation;

/// Destination for the overlay shifted `offset` pixels vertically. It is
/// oversized so the drift never uncovers an edge.
fn drift_dest(screen_width: f32, screen_height: f32, offset: f32) -> Rectangle {
    Rectangle::new(
        -DRIFT_AMPLITUDE,
        -DRIFT_AMPLITUDE + offset,
        screen_width + DRIFT_AMPLITUDE * 2.0,
        screen_height + DRIFT_AMPLITUDE * 2.0,
    )
}

enum Source {
    Video { decoder: VideoDecoder, texture: Texture2D },
    Image { texture: Texture2D },
}

/// GPU side of the current media asset. Dropping it kills the decoder and
/// unloads the texture.
pub struct MediaLayer {
    handle: MediaHandle,
    source: Source,
    /// +1 drifts down first, -1 drifts up first.
    drift: f32,
    /// Position in the drift cycle, kept in [0, 1).
    phase: f32,
}

impl MediaLayer {
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, asset: &MediaAsset) -> OverlayResult<Self> {
        let source = match asset.kind {
            MediaKind::Video => {
                let decoder = VideoDecoder::spawn(&asset.path, DECODE_WIDTH, DECODE_HEIGHT, FPS)?;
                let blank = Image::gen_image_color(decoder.width, decoder.height, Color::BLANK);
                let texture = rl
                    .load_texture_from_image(thread, &blank)
                    .map_err(|e| OverlayError::Decoder(format!("failed to create video texture: {}", e)))?;
                Source::Video { decoder, texture }
            }
            MediaKind::Image => Source::Image {
                texture: load_texture_with_exif_rotation(rl, thread, &asset.path)?,
            },
        };

        // Vertical float; only the starting direction is random
        let drift = if rand::rng().random_bool(0.5) { 1.0 } else { -1.0 };

        info!(handle = ?asset.handle, kind = asset.kind.label(), "media layer loaded");
        Ok(Self { handle: asset.handle, source, drift, phase: 0.0 })
    }

    pub fn handle(&self) -> MediaHandle {
        self.handle
    }

    /// Advances the drift phase and pulls the next video frame.
    pub fn update(&mut self, dt: f32, period_secs: f32) -> OverlayResult<()> {
        self.phase = advance_phase(self.phase, dt, period_secs);

        if let Source::Video { decoder, texture } = &mut self.source {
            if let Some(frame) = decoder.next_frame()? {
                if let Err(e) = texture.update_texture(frame) {
                    warn!("failed to upload video frame: {}", e);
                }
            }
        }
        Ok(())
    }

    fn texture(&self) -> &Texture2D {
        match &self.source {
            Source::Video { texture, .. } | Source::Image { texture } => texture,
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, layer: &OverlayLayer) {
        let screen_width = d.get_screen_width() as f32;
        let screen_height = d.get_screen_height() as f32;

        let offset = self.drift * float_offset(self.phase, DRIFT_AMPLITUDE);
        let dest = drift_dest(screen_width, screen_height, offset);

        let texture = self.texture();
        let source_rec = cover_source(texture.width() as f32, texture.height() as f32, dest.width, dest.height);
        let alpha = (layer.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;

        d.draw_texture_pro(
            texture,
            source_rec,
            dest,
            Vector2::new(0.0, 0.0),
            0.0,
            Color::new(255, 255, 255, alpha),
        );
    }
}

/// What the stage has to do to match the controller's current asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPlan {
    Keep,
    /// Drop the loaded layer and leave the stage empty.
    Release,
    /// Drop the loaded layer, if any, and load the wanted asset.
    Load,
}

/// `loaded` is the handle on the GPU, `failed` the last handle that could not
/// be loaded or played.
pub fn sync_plan(
    loaded: Option<MediaHandle>,
    failed: Option<MediaHandle>,
    wanted: Option<MediaHandle>,
) -> SyncPlan {
    match wanted {
        _ if loaded == wanted => SyncPlan::Keep,
        None => SyncPlan::Release,
        Some(handle) if failed == Some(handle) => SyncPlan::Release,
        Some(_) => SyncPlan::Load,
    }
}

/// Keeps the loaded layer in step with the controller's current asset.
#[derive(Default)]
pub struct MediaStage {
    layer: Option<MediaLayer>,
    failed: Option<MediaHandle>,
}

impl MediaStage {
    pub fn layer(&self) -> Option<&MediaLayer> {
        self.layer.as_ref()
    }

    fn release(&mut self) {
        if let Some(old) = self.layer.take() {
            info!(handle = ?old.handle(), "media layer released");
        }
    }

    /// Releases a superseded layer and loads the new asset. A load failure is
    /// returned once; the same handle is not retried.
    pub fn sync(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        asset: Option<&MediaAsset>,
    ) -> OverlayResult<()> {
        let loaded = self.layer.as_ref().map(MediaLayer::handle);
        let plan = sync_plan(loaded, self.failed, asset.map(|a| a.handle));
        match (plan, asset) {
            (SyncPlan::Keep, _) => Ok(()),
            (SyncPlan::Release, _) | (SyncPlan::Load, None) => {
                self.release();
                Ok(())
            }
            (SyncPlan::Load, Some(asset)) => {
                self.release();
                match MediaLayer::load(rl, thread, asset) {
                    Ok(layer) => {
                        self.layer = Some(layer);
                        Ok(())
                    }
                    Err(e) => {
                        self.failed = Some(asset.handle);
                        Err(e)
                    }
                }
            }
        }
    }

    /// Advances the layer; a layer that fails is dropped and not retried.
    pub fn update(&mut self, dt: f32, period_secs: f32) -> OverlayResult<()> {
        let Some(layer) = self.layer.as_mut() else {
            return Ok(());
        };
        if let Err(e) = layer.update(dt, period_secs) {
            self.failed = Some(layer.handle());
            self.release();
            return Err(e);
        }
        Ok(())
    }
}
