//! Pan and zoom of the view onto the world.
//!
//! Screen positions passed to the camera are relative to the centre of the
//! container; the world is drawn at `screen = pan + world_px * scale`.


use crate::chunk::{CellCoord, ChunkCoord, CHUNK_SIZE};

/// Rendered size of one cell, in world pixels.
pub const CELL_SIZE_PX: f64 = 40.0;
/// Rendered size of one chunk, in world pixels.
pub const CHUNK_SIZE_PX: f64 = CELL_SIZE_PX * CHUNK_SIZE as f64;

pub const MIN_SCALE: f64 = 0.25;
pub const MAX_SCALE: f64 = 4.0;

/// Wheel zoom factors.
pub const ZOOM_OUT_STEP: f64 = 0.9;
pub const ZOOM_IN_STEP: f64 = 1.1;

/// Duration of a pan-to-chunk animation in milliseconds.
pub const PAN_DURATION_MS: f64 = 1000.0;

/// Cubic ease-out.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// An in-flight animated pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanAnimation {
    from: (f64, f64),
    to: (f64, f64),
    /// Set on the first tick.
    started_at: Option<f64>,
    duration_ms: f64,
}

impl PanAnimation {
    pub fn new(from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            from,
            to,
            started_at: None,
            duration_ms: PAN_DURATION_MS,
        }
    }

    /// Progress in `0.0..=1.0` at time `now_ms`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        match self.started_at {
            Some(start) if self.duration_ms > 0.0 => {
                ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
            }
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    fn position_at(&self, progress: f64) -> (f64, f64) {
        let ease = ease_out_cubic(progress);
        (
            self.from.0 + (self.to.0 - self.from.0) * ease,
            self.from.1 + (self.to.1 - self.from.1) * ease,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pan_x: f64,
    pan_y: f64,
    scale: f64,
    animation: Option<PanAnimation>,
    /// Pointer position minus pan at the start of a drag.
    drag_origin: Option<(f64, f64)>,
}

impl Default for Camera {
    /// Centred on the origin chunk at scale 1.
    fn default() -> Self {
        Self::new(-CHUNK_SIZE_PX / 2.0, -CHUNK_SIZE_PX / 2.0, 1.0)
    }
}

impl Camera {
    pub fn new(pan_x: f64, pan_y: f64, scale: f64) -> Self {
        Self {
            pan_x,
            pan_y,
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            animation: None,
            drag_origin: None,
        }
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_pan(&mut self, pan_x: f64, pan_y: f64) {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Start dragging the view with the pointer at `(x, y)`. Cancels any animation.
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.cancel_animation();
        self.drag_origin = Some((x - self.pan_x, y - self.pan_y));
    }

    pub fn drag_to(&mut self, x: f64, y: f64) {
        if let Some((ox, oy)) = self.drag_origin {
            self.pan_x = x - ox;
            self.pan_y = y - oy;
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Zoom to `new_scale`, keeping the world point under `(anchor_x, anchor_y)` fixed.
    pub fn zoom_at(&mut self, new_scale: f64, anchor_x: f64, anchor_y: f64) {
        let new_scale = new_scale.clamp(MIN_SCALE, MAX_SCALE);
        let world_x = (anchor_x - self.pan_x) / self.scale;
        let world_y = (anchor_y - self.pan_y) / self.scale;

        self.scale = new_scale;
        self.pan_x = anchor_x - world_x * new_scale;
        self.pan_y = anchor_y - world_y * new_scale;
    }

    /// One wheel notch; positive `delta_y` zooms out.
    pub fn wheel(&mut self, delta_y: f64, anchor_x: f64, anchor_y: f64) {
        let step = if delta_y > 0.0 { ZOOM_OUT_STEP } else { ZOOM_IN_STEP };
        self.zoom_at(self.scale * step, anchor_x, anchor_y);
    }

    pub fn screen_to_world(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.pan_x) / self.scale, (y - self.pan_y) / self.scale)
    }

    /// The cell under a screen position.
    pub fn cell_at_screen(&self, x: f64, y: f64) -> CellCoord {
        let (wx, wy) = self.screen_to_world(x, y);
        CellCoord::new(
            (wx / CELL_SIZE_PX).floor() as i32,
            (wy / CELL_SIZE_PX).floor() as i32,
        )
    }

    /// Pan that centres `chunk` at the current scale.
    pub fn chunk_target(&self, chunk: ChunkCoord) -> (f64, f64) {
        let centre_x = f64::from(chunk.cx) * CHUNK_SIZE_PX + CHUNK_SIZE_PX / 2.0;
        let centre_y = f64::from(chunk.cy) * CHUNK_SIZE_PX + CHUNK_SIZE_PX / 2.0;
        (-centre_x * self.scale, -centre_y * self.scale)
    }

    /// Animate towards `chunk`, replacing any running animation.
    pub fn pan_to_chunk(&mut self, chunk: ChunkCoord) {
        self.animation = Some(PanAnimation::new(self.pan(), self.chunk_target(chunk)));
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.animation = None;
    }

    /// Advance the animation to `now_ms`.
    ///
    /// Returns `true` while further ticks are needed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        if animation.started_at.is_none() {
            animation.started_at = Some(now_ms);
        }

        let progress = animation.progress(now_ms);
        let (x, y) = animation.position_at(progress);
        self.pan_x = x;
        self.pan_y = y;

        if progress >= 1.0 {
            self.animation = None;
            false
        } else {
            true
        }
    }
}
