use std::sync::atomic::{AtomicU64, Ordering};

use hbdraw_core::{CameraState, ConfigError, DrawConfig};
use parking_lot::Mutex;

use crate::assembler::DrawShape;
use crate::draw_list::{CommandList, DrawCommand, Paint};
use crate::shape::ProjectionContext;

/// Accumulated draw commands for a single frame.
pub(crate) struct FrameData {
    pub commands: Vec<DrawCommand>,
}

impl FrameData {
    fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    fn clear(&mut self) {
        self.commands.clear();
    }
}

struct DrawerState {
    camera: Option<CameraState>,
    config: DrawConfig,
    frames: [FrameData; 2],
}

/// Thread-safe debug shape accumulator.
///
/// Uses double-buffered [`FrameData`]:
/// - `frames[current_tick % 2]` is being written to by [`DebugDrawerContext`]s
/// - `frames[(current_tick + 1) % 2]` holds previous tick data, ready for rendering
///
/// Call [`update_camera`](Self::update_camera) once per frame before creating
/// any contexts. Each context works on a copy of the camera and config taken
/// when it was created, so shapes never see a half-updated camera.
pub struct DebugDrawer {
    current_tick: AtomicU64,
    state: Mutex<DrawerState>,
}

impl DebugDrawer {
    /// Create a new drawer at tick 0 with no camera.
    pub fn new() -> Self {
        Self::with_config(DrawConfig::default())
    }

    pub fn with_config(config: DrawConfig) -> Self {
        Self {
            current_tick: AtomicU64::new(0),
            state: Mutex::new(DrawerState {
                camera: None,
                config,
                frames: [FrameData::new(), FrameData::new()],
            }),
        }
    }

    /// Get the current tick.
    pub fn current_tick(&self) -> u64 {
        self.current_tick.load(Ordering::Acquire)
    }

    /// Install this frame's camera and advance to the next tick.
    ///
    /// Clears the new write buffer. Contexts created before this call are
    /// discarded when they flush.
    pub fn update_camera(&self, camera: CameraState) {
        let mut state = self.state.lock();
        state.camera = Some(camera);
        let tick = self.advance_tick(&mut state);
        log::debug!("debug drawer camera updated, tick {}", tick);
    }

    /// Drop the camera and every buffered frame.
    ///
    /// Used when the render device goes away. No context can be created
    /// until the next [`update_camera`](Self::update_camera).
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.camera = None;
        for frame in &mut state.frames {
            frame.clear();
        }
        let tick = self.advance_tick(&mut state);
        log::debug!("debug drawer reset, tick {}", tick);
    }

    /// Must be called with the state lock held.
    fn advance_tick(&self, state: &mut DrawerState) -> u64 {
        let new_tick = self.current_tick.load(Ordering::Acquire) + 1;
        state.frames[(new_tick % 2) as usize].clear();
        self.current_tick.store(new_tick, Ordering::Release);
        new_tick
    }

    /// The camera installed by the last [`update_camera`](Self::update_camera).
    pub fn camera(&self) -> Option<CameraState> {
        self.state.lock().camera
    }

    pub fn config(&self) -> DrawConfig {
        self.state.lock().config
    }

    /// Set the tessellation segment count used by new contexts.
    pub fn set_segments(&self, segments: u32) -> Result<(), ConfigError> {
        let mut state = self.state.lock();
        state.config = state.config.with_segments(segments)?;
        log::info!("debug drawer segments set to {}", segments);
        Ok(())
    }

    /// Set the outline stroke thickness used by new contexts.
    pub fn set_outline_thickness(&self, thickness: f32) -> Result<(), ConfigError> {
        let mut state = self.state.lock();
        state.config = state.config.with_outline_thickness(thickness)?;
        log::info!("debug drawer outline thickness set to {}", thickness);
        Ok(())
    }

    /// Create a drawing context for the current tick.
    ///
    /// Returns `None` until a camera has been installed. The context
    /// records commands locally and flushes them to the drawer on [`Drop`],
    /// so the mutex is only held briefly.
    pub fn context(&self) -> Option<DebugDrawerContext<'_>> {
        let state = self.state.lock();
        let camera = state.camera?;
        Some(DebugDrawerContext {
            drawer: self,
            tick: self.current_tick.load(Ordering::Acquire),
            camera,
            config: state.config,
            commands: CommandList::new(),
        })
    }

    /// Take the previous tick's render data.
    ///
    /// Returns the commands recorded during tick N-1 (while tick N is being
    /// collected). The internal storage is left empty.
    pub fn take_render_data(&self) -> Vec<DrawCommand> {
        let tick = self.current_tick.load(Ordering::Acquire);
        let render_index = ((tick + 1) % 2) as usize;
        let mut state = self.state.lock();
        std::mem::take(&mut state.frames[render_index].commands)
    }

    /// Append commands from a finished context.
    fn flush(&self, tick: u64, mut commands: Vec<DrawCommand>) {
        if commands.is_empty() {
            return;
        }
        let mut state = self.state.lock();
        let current = self.current_tick.load(Ordering::Acquire);
        if tick != current {
            log::warn!(
                "DebugDrawerContext flushed for tick {} but current is {}; discarding",
                tick,
                current
            );
            return;
        }
        state.frames[(tick % 2) as usize]
            .commands
            .append(&mut commands);
    }
}

impl Default for DebugDrawer {
    fn default() -> Self {
        Self::new()
    }
}

/// A short-lived drawing context.
///
/// Builds shapes against the camera and config captured at creation and
/// records their draw calls locally. On [`Drop`], flushes them to the
/// parent [`DebugDrawer`] under a brief lock.
///
/// Obtain via [`DebugDrawer::context()`].
pub struct DebugDrawerContext<'a> {
    drawer: &'a DebugDrawer,
    tick: u64,
    camera: CameraState,
    config: DrawConfig,
    pub(crate) commands: CommandList,
}

impl DebugDrawerContext<'_> {
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Projection context for building shapes by hand.
    pub fn projection(&self) -> ProjectionContext<'_> {
        ProjectionContext::new(&self.camera, self.config)
    }

    /// Record an already built shape. Invalid shapes are skipped.
    #[inline]
    pub fn draw_shape(&mut self, shape: &impl DrawShape, paint: Paint) {
        shape.draw(&mut self.commands, &paint, &self.config);
    }
}

impl Drop for DebugDrawerContext<'_> {
    fn drop(&mut self) {
        let commands = self.commands.take_commands();
        self.drawer.flush(self.tick, commands);
    }
}
