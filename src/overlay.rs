//! egui context + winit input glue for the parameter panel.

use winit::event::WindowEvent;
use winit::window::Window;

use crate::rendering::PanelFrame;

pub struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
}

impl Overlay {
    pub fn new(window: &Window) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        Self { ctx, state }
    }

    /// Feed a window event to egui. Returns true if the panel consumed it,
    /// in which case camera controls must ignore it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run one UI pass and tessellate it for the renderer
    pub fn run(&mut self, window: &Window, build_ui: impl FnMut(&egui::Context)) -> PanelFrame {
        let raw_input = self.state.take_egui_input(window);
        let output = self.ctx.run(raw_input, build_ui);

        self.state
            .handle_platform_output(window, output.platform_output);

        let paint_jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);

        PanelFrame {
            paint_jobs,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        }
    }
}
