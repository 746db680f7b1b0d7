//! The fixed-rate render/event loop.
//!
//! A single long-lived loop, entered once, multiplexing four event sources:
//! the shutdown signal, the dispatch queue, settings-change notifications,
//! and a 60 Hz frame ticker. The multiplex is a fair select: whichever
//! source is ready is serviced, none starves another over time. Every
//! graphics-context operation in the toolkit bottoms out here.

use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{Receiver, tick};
use crossbeam::select;
use log::{debug, info};
use lumen_core::{Position, Settings, text};

use crate::backend::{GraphicsBinding, Viewport, WindowingBackend};
use crate::canvas::Canvas;
use crate::context::{DriverContext, PendingCall};
use crate::textures::TextureCache;

/// Render tick rate in frames per second.
pub const FRAME_RATE: u32 = 60;

struct DriverWindow<V> {
    viewport: V,
    canvas: Arc<dyn Canvas>,
    // Closing the master window shuts the whole application down.
    master: bool,
}

/// The render driver: owns the loop, the open windows, and the texture
/// cache.
///
/// Construct it on the thread that owns the graphics context and call
/// [`Driver::run`] from that same thread; share [`Driver::context`] with
/// every other thread.
pub struct Driver<B: WindowingBackend> {
    context: Arc<DriverContext>,
    queue: Receiver<PendingCall>,
    shutdown: Receiver<()>,
    settings: Arc<Settings>,
    backend: B,
    graphics: B::Graphics,
    textures: Arc<TextureCache>,
    windows: Vec<DriverWindow<B::Viewport>>,
}

impl<B: WindowingBackend> Driver<B> {
    /// Create a driver over the given windowing and graphics backends.
    ///
    /// The calling thread is recorded as the main thread; [`Driver::run`]
    /// must later be invoked from this same thread.
    pub fn new(backend: B, graphics: B::Graphics, settings: Arc<Settings>) -> Self {
        let (context, queue, shutdown) = DriverContext::new();
        Self {
            context: Arc::new(context),
            queue,
            shutdown,
            settings,
            backend,
            graphics,
            textures: Arc::new(TextureCache::new()),
            windows: Vec::new(),
        }
    }

    /// The dispatch/shutdown handle, sharable with any thread.
    #[must_use]
    pub fn context(&self) -> Arc<DriverContext> {
        Arc::clone(&self.context)
    }

    /// The settings this driver watches.
    #[must_use]
    pub fn settings(&self) -> Arc<Settings> {
        Arc::clone(&self.settings)
    }

    /// The texture cache shared with painting code.
    #[must_use]
    pub fn textures(&self) -> Arc<TextureCache> {
        Arc::clone(&self.textures)
    }

    /// Register a window. The first window created is the master window;
    /// closing it terminates the application.
    pub fn create_window(&mut self, viewport: B::Viewport, canvas: Arc<dyn Canvas>) {
        let master = self.windows.is_empty();
        self.windows.push(DriverWindow {
            viewport,
            canvas,
            master,
        });
    }

    /// Number of currently open windows.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Run the render loop until shutdown. Blocks the calling thread, which
    /// must be the thread that constructed the driver.
    pub fn run(&mut self) {
        debug_assert!(
            self.context.is_main_thread(),
            "Driver::run called off the thread that constructed the driver",
        );

        let frames = tick(Duration::from_secs(1) / FRAME_RATE);
        let settings_changes = self.settings.subscribe();
        let queue = self.queue.clone();
        let shutdown = self.shutdown.clone();

        self.context.set_running(true);
        info!("render loop started at {FRAME_RATE} fps");

        loop {
            select! {
                recv(shutdown) -> _ => {
                    // Terminal state. The frame ticker stops when dropped.
                    self.backend.terminate();
                    self.context.set_running(false);
                    info!("render loop stopped");
                    return;
                }
                recv(queue) -> call => {
                    if let Ok(call) = call {
                        call.execute();
                    }
                }
                recv(settings_changes) -> change => {
                    if change.is_ok() {
                        debug!("settings changed; clearing font cache");
                        text::clear_font_cache();
                    }
                }
                recv(frames) -> _ => self.frame(),
            }
        }
    }

    /// One render tick: poll OS events once, then service every window.
    fn frame(&mut self) {
        self.backend.poll_events();

        let mut index = 0;
        while index < self.windows.len() {
            let canvas = Arc::clone(&self.windows[index].canvas);

            // Reclaim stale textures even for clean or closing windows; GPU
            // memory stays bounded regardless of paint activity.
            self.free_dirty_textures(&canvas);

            if self.windows[index].viewport.should_close() {
                self.close_window(index);
                continue;
            }

            if !canvas.is_dirty() {
                index += 1;
                continue;
            }

            let size = canvas.size();
            let scale_factor = self.settings.scale_factor();
            let window = &mut self.windows[index];
            window.viewport.make_context_current();
            self.graphics.use_program(canvas.program());
            window.viewport.refresh_context(size, scale_factor);
            canvas.paint(size);
            window.viewport.swap_buffers();
            self.backend.detach_current_context();

            index += 1;
        }
    }

    /// Tear one window down: splice it out preserving the order of the
    /// remaining windows, release its native resources, and initiate full
    /// shutdown if it was the master window.
    fn close_window(&mut self, index: usize) {
        let mut closed = self.windows.remove(index);
        closed.viewport.destroy();
        if closed.master {
            info!("master window closed; shutting down");
            self.context.quit();
        } else {
            debug!("window closed; {} remaining", self.windows.len());
        }
    }

    /// Drain the canvas's eviction queue, deleting the cached texture of
    /// every object in each evicted tree.
    ///
    /// Single pass: objects queued after the pass starts wait for the next
    /// tick. Objects without a cached texture are skipped silently.
    fn free_dirty_textures(&mut self, canvas: &Arc<dyn Canvas>) {
        while let Some(root) = canvas.poll_eviction() {
            let graphics = &mut self.graphics;
            let textures = &self.textures;
            canvas.walk_objects(&root, Position::ZERO, &mut |object, _position| {
                if let Some(texture) = textures.evict_valid(object) {
                    graphics.delete_textures(&[texture]);
                }
            });
        }
    }
}
