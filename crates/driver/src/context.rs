//! The driver context: run state, main-thread identity, and the dispatch
//! queue that funnels closures from any thread onto the render thread.
//!
//! There is exactly one context per driver, constructed on the thread that
//! will run the render loop. That thread's identity is recorded at
//! construction; every dispatch compares real thread identity, so a call made
//! from the render thread itself (including reentrant dispatch from inside an
//! already-dequeued closure) executes inline instead of deadlocking against a
//! queue whose only consumer is the caller.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread::{self, ThreadId};

use crossbeam::channel::{Receiver, Sender, TrySendError, bounded, unbounded};
use log::{debug, error, warn};
use parking_lot::Mutex;

/// A closure queued for execution on the render thread.
///
/// Owned by the caller until enqueued; the completion sender (present only
/// for synchronous dispatch) is signaled exactly once by the consumer.
pub(crate) struct PendingCall {
    action: Box<dyn FnOnce() + Send + 'static>,
    done: Option<Sender<()>>,
}

impl PendingCall {
    /// Run the action on the current thread and signal completion.
    ///
    /// A panicking action is contained here: it is logged and the loop goes
    /// on, and the completion signal still fires so a blocked caller is
    /// released.
    pub(crate) fn execute(self) {
        let Self { action, done } = self;
        if catch_unwind(AssertUnwindSafe(action)).is_err() {
            error!("a call dispatched to the render thread panicked");
        }
        if let Some(done) = done {
            if done.send(()).is_err() {
                debug!("completion receiver dropped before the call finished");
            }
        }
    }
}

struct RunState {
    running: bool,
}

/// Handle for interacting with a running (or about-to-run) driver from any
/// thread: dispatch work to the render thread, query run state, request
/// shutdown.
pub struct DriverContext {
    queue: Sender<PendingCall>,
    shutdown: Sender<()>,
    main_thread: ThreadId,
    state: Mutex<RunState>,
}

impl DriverContext {
    /// Create the context plus the receiver halves owned by the render loop.
    ///
    /// Must be called on the thread that will run the loop: that thread's
    /// identity becomes "the main thread" for the lifetime of the driver.
    pub(crate) fn new() -> (Self, Receiver<PendingCall>, Receiver<()>) {
        let (queue, queue_receiver) = unbounded();
        let (shutdown, shutdown_receiver) = bounded(1);
        let context = Self {
            queue,
            shutdown,
            main_thread: thread::current().id(),
            state: Mutex::new(RunState { running: false }),
        };
        (context, queue_receiver, shutdown_receiver)
    }

    /// Whether the render loop has started and not yet exited.
    #[must_use]
    pub fn running(&self) -> bool {
        self.state.lock().running
    }

    pub(crate) fn set_running(&self, running: bool) {
        self.state.lock().running = running;
    }

    /// Whether the calling thread is the thread that owns the graphics
    /// context.
    #[must_use]
    pub fn is_main_thread(&self) -> bool {
        thread::current().id() == self.main_thread
    }

    /// Run `action` on the render thread and wait for it to finish.
    ///
    /// Called from the render thread itself, the action runs inline.
    /// Otherwise it is queued and the caller blocks until the loop has
    /// executed it; everything the action wrote is visible to the caller
    /// when this returns. Actions must be fast and non-blocking: a hung
    /// action stalls every window repaint.
    pub fn run_on_main<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_main_thread() {
            action();
            return;
        }

        let (done, completion) = bounded(1);
        let call = PendingCall {
            action: Box::new(action),
            done: Some(done),
        };
        if self.queue.send(call).is_err() {
            warn!("dropped a synchronous dispatch: the render loop is gone");
            return;
        }
        if completion.recv().is_err() {
            warn!("the render loop exited before completing a dispatched call");
        }
    }

    /// Queue `action` for the render thread without waiting.
    ///
    /// Always queued, even from the render thread itself. Runs after every
    /// previously queued action; gives no ordering guarantee relative to the
    /// caller's subsequent code.
    pub fn run_on_main_async<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let call = PendingCall {
            action: Box::new(action),
            done: None,
        };
        if self.queue.send(call).is_err() {
            warn!("dropped an asynchronous dispatch: the render loop is gone");
        }
    }

    /// Request full application shutdown.
    ///
    /// The render loop observes the signal at its next multiplex point,
    /// terminates the windowing subsystem, and exits. Safe to call from any
    /// thread, any number of times.
    pub fn quit(&self) {
        match self.shutdown.try_send(()) {
            // A full slot means shutdown is already pending.
            Ok(()) | Err(TrySendError::Full(())) => {}
            Err(TrySendError::Disconnected(())) => {
                debug!("quit requested after the render loop exited");
            }
        }
    }
}
