/*
 * Debug Information Module
 *
 * Frame and step metrics shown in the viewer's control panel.
 */

use std::time::Duration;

#[derive(Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub step_time: Duration,
    pub ticks_this_frame: usize,
    pub last_error: Option<String>,
}
