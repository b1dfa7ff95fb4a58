/*
 * Application Module
 *
 * This module defines the viewer's model and per-frame update. The viewer is
 * a plain consumer of the engine: it calls `update()` a few times per frame
 * and reads positions back for drawing. Controls edit a pending copy of the
 * parameters, which only takes effect when the flock is reseeded.
 */

use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::Egui;

use blockboids::{Simulation, SimulationParams};

use crate::debug::DebugInfo;
use crate::renderer;
use crate::ui::{self, UiAction};

pub struct Model {
    pub simulation: Simulation,
    // Parameters applied on the next reseed
    pub pending_params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub seed: u64,
    pub paused: bool,
    pub ticks_per_frame: usize,
    pub show_debug: bool,
}

pub fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("BlockBoids")
        .size(900, 900)
        .view(renderer::view)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let params = SimulationParams::default();
    let seed = rand::random::<u64>();
    let simulation = Simulation::with_seed(params.clone(), seed)
        .expect("default simulation parameters are valid");
    log::info!("Starting viewer with seed {}", seed);

    Model {
        simulation,
        pending_params: params,
        egui,
        debug_info: DebugInfo::default(),
        seed,
        paused: false,
        ticks_per_frame: 1,
        show_debug: false,
    }
}

pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let action = ui::update_ui(model);

    match action {
        Some(UiAction::Reseed) => reseed(model, rand::random::<u64>()),
        Some(UiAction::Restart) => {
            let seed = model.seed;
            reseed(model, seed);
        }
        Some(UiAction::Step) => step(model, 1),
        None => {}
    }

    if !model.paused {
        let ticks = model.ticks_per_frame;
        step(model, ticks);
    }
}

fn step(model: &mut Model, ticks: usize) {
    let start = Instant::now();
    let mut done = 0;

    for _ in 0..ticks {
        if let Err(err) = model.simulation.update() {
            // The engine is unchanged; stop driving it until reseeded
            log::error!("Simulation halted: {}", err);
            model.debug_info.last_error = Some(err.to_string());
            model.paused = true;
            break;
        }
        done += 1;
    }

    model.debug_info.ticks_this_frame = done;
    model.debug_info.step_time = start.elapsed();
}

fn reseed(model: &mut Model, seed: u64) {
    match Simulation::with_seed(model.pending_params.clone(), seed) {
        Ok(simulation) => {
            log::info!(
                "Reseeded {} boids with seed {}",
                simulation.params().num_boids,
                seed
            );
            model.simulation = simulation;
            model.seed = seed;
            model.debug_info.last_error = None;
        }
        Err(err) => {
            log::warn!("Rejected parameters: {}", err);
            model.debug_info.last_error = Some(err.to_string());
        }
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
