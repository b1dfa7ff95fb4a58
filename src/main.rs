/*
 * BlockBoids Viewer
 *
 * Opens a window that animates the flock: every frame the engine advances
 * and the boids' positions are redrawn. Set RUST_LOG to see engine logs.
 */

mod app;
mod debug;
mod renderer;
mod ui;

fn main() {
    env_logger::init();

    nannou::app(app::model)
        .update(app::update)
        .run();
}
