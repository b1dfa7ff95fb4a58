/*
 * Renderer Module
 *
 * Draws the world rectangle and every boid's current position, fitted to the
 * window. Positions are read fresh each frame and never kept across updates.
 */

use nannou::prelude::*;

use blockboids::DVec2;

use crate::app::Model;

const BOID_RADIUS: f32 = 2.0;

pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let params = model.simulation.params();
    let world = vec2(params.x_bound as f32, params.y_bound as f32);

    // Uniform scale so the whole world fits with a small border
    let scale = (window_rect.w() / world.x).min(window_rect.h() / world.y) * 0.95;
    let to_screen = |p: DVec2| vec2(p.x as f32 - world.x / 2.0, p.y as f32 - world.y / 2.0) * scale;

    draw.rect()
        .xy(Vec2::ZERO)
        .wh(world * scale)
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.3, 0.3, 0.3, 1.0));

    for &position in model.simulation.positions() {
        draw.ellipse()
            .xy(to_screen(position))
            .radius(BOID_RADIUS)
            .color(rgb(220u8, 220, 220));
    }

    if model.show_debug {
        if let (Some(&position), Some(&velocity)) = (
            model.simulation.positions().first(),
            model.simulation.velocities().first(),
        ) {
            let center = to_screen(position);

            // Interaction radii of the first boid
            for (radius, color) in [
                (params.separation_distance, RED),
                (params.alignment_distance, GREEN),
                (params.cohesion_distance, BLUE),
            ] {
                draw.ellipse()
                    .xy(center)
                    .radius(radius as f32 * scale)
                    .no_fill()
                    .stroke(color)
                    .stroke_weight(1.0);
            }

            // Velocity, exaggerated to be visible
            let heading = vec2(velocity.x as f32, velocity.y as f32) * scale * 20.0;
            draw.arrow()
                .start(center)
                .end(center + heading)
                .color(YELLOW)
                .stroke_weight(2.0);
        }
    }

    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}
