//! Demo application: one window, an animated progress bar, and some
//! dispatcher traffic from a worker thread.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context as _, Result};
use log::{error, info};
use lumen_core::{CanvasObject as _, Container, ObjectRef, Position, Settings, Size};
use lumen_driver::{Driver, ProgramId};
use lumen_gl_backend::{GlCanvas, GlGraphics, GlfwBackend};
use lumen_widget::InfiniteProgressBar;

const WINDOW_SIZE: Size = Size::new(480.0, 320.0);

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        error!("lumen demo failed: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = Arc::new(Settings::new());
    let mut backend = GlfwBackend::new()?;
    let viewport = backend.create_viewport("lumen demo", WINDOW_SIZE)?;
    let gl = backend
        .graphics()
        .context("GL function pointers were not loaded")?;
    let graphics = GlGraphics::new(Arc::clone(&gl));

    // The driver must be built on this thread: it pins the thread identity
    // the dispatcher checks against, and GLFW shares the same affinity.
    let mut driver = Driver::new(backend, graphics, Arc::clone(&settings));

    let canvas = GlCanvas::new(gl, ProgramId(0), WINDOW_SIZE);

    let progress = InfiniteProgressBar::new();
    progress.resize(Size::new(WINDOW_SIZE.width - 40.0, 24.0));
    progress.move_to(Position::new(20.0, (WINDOW_SIZE.height - 24.0) / 2.0));
    {
        let canvas = Arc::clone(&canvas);
        progress.set_refresh_hook(Box::new(move || canvas.refresh()));
    }

    let content: ObjectRef = Arc::new(Container::with_children(vec![
        Arc::clone(&progress) as ObjectRef,
    ]));
    canvas.set_content(content);
    progress.start();

    driver.create_window(viewport, canvas);

    // Worker threads reach the render thread only through the context.
    let context = driver.context();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(500));
        context.run_on_main(|| info!("hello from the render thread"));
    });

    driver.run();
    progress.stop();
    Ok(())
}
