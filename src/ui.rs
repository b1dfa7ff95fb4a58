/*
 * UI Module
 *
 * Control panel built with nannou_egui. Run controls act immediately; the
 * parameter controls edit the pending parameters used by the next reseed,
 * since a running simulation's parameters never change.
 */

use nannou_egui::egui;

use blockboids::{BoundaryBehavior, SimulationParams};

use crate::app::Model;

pub enum UiAction {
    Reseed,
    Restart,
    Step,
}

pub fn update_ui(model: &mut Model) -> Option<UiAction> {
    let mut action = None;

    let Model {
        simulation,
        pending_params,
        egui: gui,
        debug_info,
        seed,
        paused,
        ticks_per_frame,
        show_debug,
    } = model;

    let ctx = gui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Run", |ui| {
                ui.checkbox(paused, "Pause Simulation");
                if ui.button("Step").clicked() {
                    action = Some(UiAction::Step);
                }
                ui.add(egui::Slider::new(ticks_per_frame, 1..=20).text("Ticks per Frame"));
                if ui.button("Restart (same seed)").clicked() {
                    action = Some(UiAction::Restart);
                }
                if ui.button("Reseed").clicked() {
                    action = Some(UiAction::Reseed);
                }
            });

            ui.collapsing("Next Run", |ui| {
                ui.add(
                    egui::Slider::new(
                        &mut pending_params.num_boids,
                        SimulationParams::get_num_boids_range(),
                    )
                    .text("Number of Boids"),
                );
                ui.horizontal(|ui| {
                    ui.radio_value(&mut pending_params.boundary_behavior, BoundaryBehavior::Avoid, "avoid");
                    ui.radio_value(&mut pending_params.boundary_behavior, BoundaryBehavior::Wrap, "wrap");
                });
                ui.checkbox(&mut pending_params.enable_spatial_grid, "Enable Spatial Grid");
                ui.checkbox(&mut pending_params.enable_parallel, "Enable Parallel Processing");
            });

            ui.collapsing("Current Run", |ui| {
                let params = simulation.params();
                ui.label(format!("Seed: {}", seed));
                ui.label(format!("Tick: {}", simulation.tick()));
                ui.label(format!("Boids: {}", params.num_boids));
                ui.label(format!("Boundary: {}", params.boundary_behavior));
                ui.label(format!("Speed: [{:.2e}, {:.2e}]", params.min_speed, params.max_speed));
                match simulation.grid() {
                    Some(grid) => ui.label(format!("Grid: {}x{} blocks", grid.num_x, grid.num_y)),
                    None => ui.label("Grid: off (all pairs)"),
                };
            });

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!(
                "Step time: {:.2} ms ({} ticks)",
                debug_info.step_time.as_secs_f64() * 1000.0,
                debug_info.ticks_this_frame
            ));
            if let Some(err) = &debug_info.last_error {
                ui.colored_label(egui::Color32::RED, err);
            }
            ui.checkbox(show_debug, "Show Debug Info");
        });

    action
}
