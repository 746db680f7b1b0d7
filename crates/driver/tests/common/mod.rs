//! Recording fakes for the windowing and graphics seams, plus a harness
//! that boots a driver loop on its own thread.

// Not every test binary exercises every helper.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{Receiver, bounded};
use lumen_core::{ObjectRef, Position, Settings, Size, walk_object_tree};
use lumen_driver::{
    Canvas, Driver, DriverContext, GraphicsBinding, ProgramId, RefreshQueue, TextureCache,
    TextureId, Viewport, WindowingBackend,
};
use parking_lot::Mutex;

// Process-wide ordering of buffer swaps, so tests can assert which window
// painted first within a tick.
static SWAP_SEQUENCE: AtomicUsize = AtomicUsize::new(1);

/// Observable state of one fake viewport.
#[derive(Default)]
pub struct ViewportState {
    pub should_close: AtomicBool,
    pub destroyed: AtomicBool,
    pub made_current: AtomicUsize,
    pub swaps: AtomicUsize,
    pub last_swap_order: AtomicUsize,
    pub refreshes: Mutex<Vec<(Size, f32)>>,
}

impl ViewportState {
    pub fn request_close(&self) {
        self.should_close.store(true, Ordering::SeqCst);
    }

    pub fn swap_count(&self) -> usize {
        self.swaps.load(Ordering::SeqCst)
    }

    /// Global sequence number of the most recent swap; zero if never swapped.
    pub fn swap_order(&self) -> usize {
        self.last_swap_order.load(Ordering::SeqCst)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

pub struct TestViewport {
    state: Arc<ViewportState>,
}

impl TestViewport {
    pub fn new() -> (Self, Arc<ViewportState>) {
        let state = Arc::new(ViewportState::default());
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl Viewport for TestViewport {
    fn should_close(&self) -> bool {
        self.state.should_close.load(Ordering::SeqCst)
    }

    fn destroy(&mut self) {
        self.state.destroyed.store(true, Ordering::SeqCst);
    }

    fn make_context_current(&mut self) {
        self.state.made_current.fetch_add(1, Ordering::SeqCst);
    }

    fn refresh_context(&mut self, size: Size, scale_factor: f32) {
        self.state.refreshes.lock().push((size, scale_factor));
    }

    fn swap_buffers(&mut self) {
        self.state.swaps.fetch_add(1, Ordering::SeqCst);
        let order = SWAP_SEQUENCE.fetch_add(1, Ordering::SeqCst);
        self.state.last_swap_order.store(order, Ordering::SeqCst);
    }
}

/// A canvas whose dirtiness and content the test controls directly.
pub struct TestCanvas {
    dirty: AtomicBool,
    size: Size,
    program: ProgramId,
    paints: AtomicUsize,
    refresh_queue: RefreshQueue,
}

impl TestCanvas {
    pub fn new(size: Size) -> Arc<Self> {
        Arc::new(Self {
            dirty: AtomicBool::new(false),
            size,
            program: ProgramId(1),
            paints: AtomicUsize::new(0),
            refresh_queue: RefreshQueue::new(),
        })
    }

    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    pub fn paint_count(&self) -> usize {
        self.paints.load(Ordering::SeqCst)
    }

    /// Queue an object tree for texture eviction, as canvas content
    /// replacement would.
    pub fn evict(&self, object: ObjectRef) {
        self.refresh_queue.push(object);
    }
}

impl Canvas for TestCanvas {
    fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    fn size(&self) -> Size {
        self.size
    }

    fn program(&self) -> ProgramId {
        self.program
    }

    fn paint(&self, _size: Size) {
        self.paints.fetch_add(1, Ordering::SeqCst);
        self.dirty.store(false, Ordering::SeqCst);
    }

    fn walk_objects(
        &self,
        root: &ObjectRef,
        origin: Position,
        visit: &mut dyn FnMut(&ObjectRef, Position),
    ) {
        walk_object_tree(root, origin, visit);
    }

    fn poll_eviction(&self) -> Option<ObjectRef> {
        self.refresh_queue.poll()
    }
}

/// Observable state of the fake windowing subsystem.
#[derive(Default)]
pub struct BackendState {
    pub polls: AtomicUsize,
    pub detaches: AtomicUsize,
    pub terminated: AtomicBool,
}

impl BackendState {
    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }
}

pub struct TestBackend {
    state: Arc<BackendState>,
}

impl TestBackend {
    pub fn new() -> (Self, Arc<BackendState>) {
        let state = Arc::new(BackendState::default());
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl WindowingBackend for TestBackend {
    type Viewport = TestViewport;
    type Graphics = TestGraphics;

    fn poll_events(&mut self) {
        self.state.polls.fetch_add(1, Ordering::SeqCst);
    }

    fn detach_current_context(&mut self) {
        self.state.detaches.fetch_add(1, Ordering::SeqCst);
    }

    fn terminate(&mut self) {
        self.state.terminated.store(true, Ordering::SeqCst);
    }
}

/// Graphics binding that records every call.
pub struct TestGraphics {
    pub deleted: Arc<Mutex<Vec<TextureId>>>,
    pub programs: Arc<Mutex<Vec<ProgramId>>>,
}

impl TestGraphics {
    pub fn new() -> (Self, Arc<Mutex<Vec<TextureId>>>) {
        let deleted = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                deleted: Arc::clone(&deleted),
                programs: Arc::new(Mutex::new(Vec::new())),
            },
            deleted,
        )
    }
}

impl GraphicsBinding for TestGraphics {
    fn use_program(&mut self, program: ProgramId) {
        self.programs.lock().push(program);
    }

    fn delete_textures(&mut self, textures: &[TextureId]) {
        self.deleted.lock().extend_from_slice(textures);
    }
}

/// A driver loop running on its own thread.
///
/// The driver is constructed inside that thread so the thread-identity
/// contract holds; the context and texture cache are handed back for the
/// test to poke at.
pub struct DriverHarness {
    pub context: Arc<DriverContext>,
    pub textures: Arc<TextureCache>,
    exited: Receiver<()>,
    handle: Option<JoinHandle<()>>,
}

impl DriverHarness {
    pub fn start(
        backend: TestBackend,
        graphics: TestGraphics,
        settings: Arc<Settings>,
        windows: Vec<(TestViewport, Arc<TestCanvas>)>,
    ) -> Self {
        let (ready_sender, ready) = bounded(1);
        let (exit_sender, exited) = bounded(1);
        let handle = thread::spawn(move || {
            let mut driver = Driver::new(backend, graphics, settings);
            for (viewport, canvas) in windows {
                driver.create_window(viewport, canvas);
            }
            ready_sender
                .send((driver.context(), driver.textures()))
                .expect("harness dropped before the loop started");
            driver.run();
            drop(exit_sender.send(()));
        });
        let (context, textures) = ready
            .recv_timeout(Duration::from_secs(5))
            .expect("driver thread failed to start");
        Self {
            context,
            textures,
            exited,
            handle: Some(handle),
        }
    }

    /// Wait for the loop to exit of its own accord.
    pub fn wait_exit(&mut self, timeout: Duration) -> bool {
        if self.exited.recv_timeout(timeout).is_err() {
            return false;
        }
        if let Some(handle) = self.handle.take() {
            handle.join().expect("driver thread panicked");
        }
        true
    }

    /// Request shutdown and wait for the loop to exit.
    pub fn shutdown(mut self) {
        self.context.quit();
        assert!(
            self.wait_exit(Duration::from_secs(5)),
            "render loop did not exit after quit",
        );
    }
}

/// Poll `condition` until it holds or `timeout` elapses.
pub fn eventually(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}
