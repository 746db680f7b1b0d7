//! The infinite progress bar: a horizontal panel indicating indefinite
//! waiting, looping 0% to 100% until stopped.

use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

use crossbeam::channel::{Sender, bounded, tick};
use crossbeam::select;
use log::error;
use lumen_core::{CanvasObject, ObjectRef, Position, Rectangle, Size, measure_text, theme};
use lumen_core::text::TextStyle;
use parking_lot::Mutex;

use crate::base::{BaseWidget, RefreshHook};

/// How often the animation advances.
const REFRESH_INTERVAL: Duration = Duration::from_millis(50);

struct Ticker {
    stop: Sender<()>,
    thread: thread::JoinHandle<()>,
}

/// A progress bar that loops indefinitely instead of tracking a value.
///
/// While running, a dedicated ticker thread advances the inner bar every
/// 50 ms: the bar grows toward a fifth of the widget width across the first
/// half, shrinks toward a twentieth across the second half, and wraps back
/// to the left edge when it runs off the right.
///
/// Create it with [`InfiniteProgressBar::new`]; it is always handled through
/// an [`Arc`] so the animation thread can reach the shared state.
pub struct InfiniteProgressBar {
    base: Mutex<BaseWidget>,
    bar: Arc<Rectangle>,
    ticker: Mutex<Option<Ticker>>,
    refresh_hook: Mutex<Option<RefreshHook>>,
    self_ref: Mutex<Weak<Self>>,
}

impl InfiniteProgressBar {
    /// Create a stopped progress bar laid out at its minimum size.
    #[must_use]
    pub fn new() -> Arc<Self> {
        let widget = Arc::new(Self {
            base: Mutex::new(BaseWidget::default()),
            bar: Arc::new(Rectangle::new(theme::primary_color())),
            ticker: Mutex::new(None),
            refresh_hook: Mutex::new(None),
            self_ref: Mutex::new(Weak::new()),
        });
        *widget.self_ref.lock() = Arc::downgrade(&widget);
        widget.resize(widget.min_size());
        widget
    }

    /// Install the repaint callback invoked after every animation step.
    pub fn set_refresh_hook(&self, hook: RefreshHook) {
        *self.refresh_hook.lock() = Some(hook);
    }

    /// Whether the animation ticker is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ticker.lock().is_some()
    }

    /// Start the animation ticker. Idempotent: a running bar keeps its
    /// existing ticker.
    pub fn start(&self) {
        let mut ticker = self.ticker.lock();
        if ticker.is_some() {
            return;
        }

        let (stop, stopped) = bounded(1);
        let weak = self.self_ref.lock().clone();
        let handle = thread::spawn(move || {
            let frames = tick(REFRESH_INTERVAL);
            loop {
                select! {
                    recv(stopped) -> _ => return,
                    recv(frames) -> _ => {
                        // The widget may drop while we sleep; exit quietly.
                        let Some(widget) = weak.upgrade() else { return };
                        widget.step();
                    }
                }
            }
        });
        *ticker = Some(Ticker {
            stop,
            thread: handle,
        });
    }

    /// Stop the animation ticker and wait for it to exit.
    pub fn stop(&self) {
        let ticker = self.ticker.lock().take();
        if let Some(Ticker { stop, thread }) = ticker {
            drop(stop);
            if thread.join().is_err() {
                error!("progress ticker thread panicked");
            }
        }
    }

    /// One animation step; also run by the ticker thread.
    fn step(&self) {
        let progress_size = self.size();
        let bar_size = self.bar.size();
        let mut bar_position = self.bar.position();
        let max_width = progress_size.width / 5.0;
        let min_width = progress_size.width / 20.0;
        let mut step = progress_size.width / 50.0;

        if bar_position.x + bar_size.width < progress_size.width / 2.0 {
            // First half: grow toward the maximum, trading forward motion
            // for growth so the leading edge advances steadily.
            if bar_size.width < max_width {
                self.bar
                    .resize(Size::new(bar_size.width + 2.0, progress_size.height));
                step -= 2.0;
            }
        } else if bar_size.width > min_width {
            // Second half: shrink toward the minimum; a shrinking bar needs
            // a larger forward step to read as moving forwards.
            self.bar
                .resize(Size::new(bar_size.width - 2.0, progress_size.height));
            step += 2.0;
        }

        bar_position.x += step;

        // Wrap to the start when the bar runs off the right edge.
        if self.bar.size().width + bar_position.x >= progress_size.width {
            bar_position.x = 0.0;
            self.bar.resize(Size::new(min_width, progress_size.height));
        }
        self.bar.move_to(Position::new(bar_position.x, bar_position.y));

        if let Some(hook) = self.refresh_hook.lock().as_ref() {
            hook();
        }
    }
}

impl CanvasObject for InfiniteProgressBar {
    fn size(&self) -> Size {
        self.base.lock().size
    }

    fn position(&self) -> Position {
        self.base.lock().position
    }

    fn resize(&self, size: Size) {
        self.base.lock().size = size;
        // Layout: the bar starts at a fifth of the widget width, full
        // height, keeping its current horizontal progress.
        self.bar.resize(Size::new(size.width / 5.0, size.height));
    }

    fn move_to(&self, position: Position) {
        self.base.lock().position = position;
    }

    fn min_size(&self) -> Size {
        // Sized like a regular progress bar showing "100%".
        let label = measure_text("100%", theme::text_size(), TextStyle::default());
        Size::new(
            label.width + theme::padding() * 4.0,
            label.height + theme::padding() * 2.0,
        )
    }

    fn visible(&self) -> bool {
        !self.base.lock().hidden
    }

    fn show(&self) {
        self.start();
        self.base.lock().hidden = false;
    }

    fn hide(&self) {
        self.stop();
        self.base.lock().hidden = true;
    }

    fn children(&self) -> Vec<ObjectRef> {
        vec![Arc::clone(&self.bar) as ObjectRef]
    }
}
