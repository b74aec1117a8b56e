// Cube Inspector: click a cube to see its properties

use std::path::Path;

use cube_inspector::renderer::Renderer;
use cube_inspector::{CubeError, Options, Stage};
use winit::event_loop::EventLoop;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    if let Err(e) = run().await {
        log::error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CubeError> {
    // Optional options file as the first argument
    let options = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading options from {path}");
            Options::load(Path::new(&path))?
        }
        None => Options::default(),
    };
    let stage = Stage::new(options)?;

    // Create event loop
    let event_loop = EventLoop::new().map_err(|e| CubeError::Window(e.to_string()))?;

    // Create renderer
    let renderer = Renderer::new(&event_loop, stage).await?;

    // Run the renderer
    renderer.run(event_loop)
}
