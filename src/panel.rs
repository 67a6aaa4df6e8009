//! On-screen parameter panel.
//!
//! Each [`WaveParameters`] field is exposed through an explicit binding
//! (label, getter, setter, range) built once at startup. Setters clamp, so a
//! value outside its declared range never reaches the evaluator.

use std::ops::RangeInclusive;

use crate::params::{ranges, Rgb, WaveParameters};
use crate::rendering::DebugView;

/// Slider step for continuous parameters
const FINE_STEP: f64 = 0.001;

/// Binding for a continuous parameter
pub struct ScalarBinding {
    pub label: &'static str,
    pub range: RangeInclusive<f32>,
    pub step: f64,
    get: fn(&WaveParameters) -> f32,
    set: fn(&mut WaveParameters, f32),
}

impl ScalarBinding {
    pub fn read(&self, params: &WaveParameters) -> f32 {
        (self.get)(params)
    }

    /// Store `value` clamped to the binding's range
    pub fn write(&self, params: &mut WaveParameters, value: f32) {
        (self.set)(params, ranges::clamp(value, &self.range));
    }
}

/// Binding for an integer parameter
pub struct IntegerBinding {
    pub label: &'static str,
    pub range: RangeInclusive<u32>,
    get: fn(&WaveParameters) -> u32,
    set: fn(&mut WaveParameters, u32),
}

impl IntegerBinding {
    pub fn read(&self, params: &WaveParameters) -> u32 {
        (self.get)(params)
    }

    pub fn write(&self, params: &mut WaveParameters, value: u32) {
        (self.set)(params, value.clamp(*self.range.start(), *self.range.end()));
    }
}

/// Binding for a color picker, written back on every change
pub struct ColorBinding {
    pub label: &'static str,
    get: fn(&WaveParameters) -> Rgb,
    set: fn(&mut WaveParameters, Rgb),
}

impl ColorBinding {
    pub fn read(&self, params: &WaveParameters) -> Rgb {
        (self.get)(params)
    }

    pub fn write(&self, params: &mut WaveParameters, color: Rgb) {
        (self.set)(params, Rgb::from_array(color.to_array()));
    }
}

pub enum Binding {
    Scalar(ScalarBinding),
    Integer(IntegerBinding),
    Color(ColorBinding),
}

impl Binding {
    pub fn label(&self) -> &'static str {
        match self {
            Binding::Scalar(b) => b.label,
            Binding::Integer(b) => b.label,
            Binding::Color(b) => b.label,
        }
    }
}

fn scalar(
    label: &'static str,
    range: RangeInclusive<f32>,
    get: fn(&WaveParameters) -> f32,
    set: fn(&mut WaveParameters, f32),
) -> Binding {
    Binding::Scalar(ScalarBinding {
        label,
        range,
        step: FINE_STEP,
        get,
        set,
    })
}

/// The binding table, in panel order
pub fn wave_bindings() -> Vec<Binding> {
    vec![
        // Big waves
        scalar(
            "big_waves_elevation",
            ranges::BIG_WAVES_ELEVATION,
            |p| p.big_waves_elevation,
            |p, v| p.big_waves_elevation = v,
        ),
        scalar(
            "big_waves_frequency_x",
            ranges::BIG_WAVES_FREQUENCY,
            |p| p.big_waves_frequency[0],
            |p, v| p.big_waves_frequency[0] = v,
        ),
        scalar(
            "big_waves_frequency_y",
            ranges::BIG_WAVES_FREQUENCY,
            |p| p.big_waves_frequency[1],
            |p, v| p.big_waves_frequency[1] = v,
        ),
        scalar(
            "big_waves_speed",
            ranges::BIG_WAVES_SPEED,
            |p| p.big_waves_speed,
            |p, v| p.big_waves_speed = v,
        ),
        // Small waves
        scalar(
            "small_waves_elevation",
            ranges::SMALL_WAVES_ELEVATION,
            |p| p.small_waves_elevation,
            |p, v| p.small_waves_elevation = v,
        ),
        scalar(
            "small_waves_frequency",
            ranges::SMALL_WAVES_FREQUENCY,
            |p| p.small_waves_frequency,
            |p, v| p.small_waves_frequency = v,
        ),
        scalar(
            "small_waves_speed",
            ranges::SMALL_WAVES_SPEED,
            |p| p.small_waves_speed,
            |p, v| p.small_waves_speed = v,
        ),
        Binding::Integer(IntegerBinding {
            label: "small_waves_iterations",
            range: ranges::SMALL_WAVES_ITERATIONS,
            get: |p| p.small_waves_iterations,
            set: |p, v| p.small_waves_iterations = v,
        }),
        // Colors
        Binding::Color(ColorBinding {
            label: "depth_color",
            get: |p| p.depth_color,
            set: |p, c| p.depth_color = c,
        }),
        Binding::Color(ColorBinding {
            label: "surface_color",
            get: |p| p.surface_color,
            set: |p, c| p.surface_color = c,
        }),
        scalar(
            "color_offset",
            ranges::COLOR_OFFSET,
            |p| p.color_offset,
            |p, v| p.color_offset = v,
        ),
        scalar(
            "color_multiplier",
            ranges::COLOR_MULTIPLIER,
            |p| p.color_multiplier,
            |p, v| p.color_multiplier = v,
        ),
    ]
}

/// Read-only numbers shown at the bottom of the panel
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    pub elapsed_s: f32,
    pub fps: f32,
    pub render_size: (u32, u32),
    pub pixel_ratio: f64,
}

/// Parameter panel state
pub struct ParameterPanel {
    bindings: Vec<Binding>,
    pub debug_view: DebugView,
}

impl ParameterPanel {
    pub fn new() -> Self {
        Self {
            bindings: wave_bindings(),
            debug_view: DebugView::Gradient,
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Draw the panel and apply any edits to `params`. Returns true if a
    /// parameter changed this frame.
    pub fn show(&mut self, ctx: &egui::Context, params: &mut WaveParameters, stats: &FrameStats) -> bool {
        let mut changed = false;

        egui::Window::new("Water")
            .default_width(340.0)
            .resizable(false)
            .show(ctx, |ui| {
                for binding in &self.bindings {
                    changed |= show_binding(ui, binding, params);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("view");
                    ui.radio_value(&mut self.debug_view, DebugView::Gradient, "gradient");
                    ui.radio_value(&mut self.debug_view, DebugView::Normals, "normals");
                });

                if ui.button("reset").clicked() {
                    params.reset_tunables();
                    changed = true;
                }

                ui.separator();
                ui.label(format!("time {:.2} s   {:.0} fps", stats.elapsed_s, stats.fps));
                ui.label(format!(
                    "target {}x{} @ {:.2}x",
                    stats.render_size.0, stats.render_size.1, stats.pixel_ratio
                ));
            });

        changed
    }
}

impl Default for ParameterPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn show_binding(ui: &mut egui::Ui, binding: &Binding, params: &mut WaveParameters) -> bool {
    match binding {
        Binding::Scalar(b) => {
            let mut value = b.read(params);
            let slider = egui::Slider::new(&mut value, b.range.clone())
                .step_by(b.step)
                .text(b.label);
            let changed = ui.add(slider).changed();
            if changed {
                b.write(params, value);
            }
            changed
        }
        Binding::Integer(b) => {
            let mut value = b.read(params);
            let changed = ui
                .add(egui::Slider::new(&mut value, b.range.clone()).text(b.label))
                .changed();
            if changed {
                b.write(params, value);
            }
            changed
        }
        Binding::Color(b) => {
            ui.horizontal(|ui| {
                let mut rgb = b.read(params).to_array();
                let changed = ui.color_edit_button_rgb(&mut rgb).changed();
                if changed {
                    b.write(params, Rgb::from_array(rgb));
                }
                ui.label(format!("{} {}", b.label, b.read(params)));
                changed
            })
            .inner
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_zero() -> WaveParameters {
        WaveParameters {
            elapsed_time: 0.0,
            big_waves_elevation: 0.0,
            big_waves_frequency: [0.0, 0.0],
            big_waves_speed: 0.0,
            small_waves_elevation: 0.0,
            small_waves_frequency: 0.0,
            small_waves_speed: 0.0,
            small_waves_iterations: 0,
            depth_color: Rgb::BLACK,
            surface_color: Rgb::BLACK,
            color_offset: 0.0,
            color_multiplier: 0.0,
        }
    }

    #[test]
    fn test_labels_are_unique_field_names() {
        let bindings = wave_bindings();
        let labels: HashSet<_> = bindings.iter().map(Binding::label).collect();

        assert_eq!(labels.len(), bindings.len());
        assert_eq!(bindings.len(), 12);
        assert!(labels.contains("big_waves_elevation"));
        assert!(labels.contains("small_waves_iterations"));
        assert!(labels.contains("surface_color"));
    }

    #[test]
    fn test_every_field_has_a_binding() {
        let white = Rgb::new(1.0, 1.0, 1.0);
        let mut params = all_zero();

        for binding in wave_bindings() {
            match binding {
                Binding::Scalar(b) => b.write(&mut params, *b.range.end()),
                Binding::Integer(b) => b.write(&mut params, *b.range.end()),
                Binding::Color(b) => b.write(&mut params, white),
            }
        }

        let expected = WaveParameters {
            elapsed_time: 0.0,
            big_waves_elevation: 1.0,
            big_waves_frequency: [10.0, 10.0],
            big_waves_speed: 10.0,
            small_waves_elevation: 1.0,
            small_waves_frequency: 30.0,
            small_waves_speed: 10.0,
            small_waves_iterations: 5,
            depth_color: white,
            surface_color: white,
            color_offset: 1.0,
            color_multiplier: 10.0,
        };
        assert_eq!(params, expected);
    }

    #[test]
    fn test_writes_are_clamped() {
        let mut params = WaveParameters::default();

        for binding in wave_bindings() {
            match binding {
                Binding::Scalar(b) => {
                    b.write(&mut params, 1e6);
                    assert_eq!(b.read(&params), *b.range.end(), "{}", b.label);
                    b.write(&mut params, -1e6);
                    assert_eq!(b.read(&params), *b.range.start(), "{}", b.label);
                    b.write(&mut params, f32::NAN);
                    assert_eq!(b.read(&params), *b.range.start(), "{}", b.label);
                }
                Binding::Integer(b) => {
                    b.write(&mut params, 99);
                    assert_eq!(b.read(&params), 5);
                }
                Binding::Color(b) => {
                    b.write(&mut params, Rgb::new(2.0, -1.0, 0.5));
                    assert_eq!(b.read(&params), Rgb::new(1.0, 0.0, 0.5));
                }
            }
        }

        assert_eq!(params.clamped(), params);
    }

    #[test]
    fn test_color_write_back_is_immediate() {
        let mut params = WaveParameters::default();
        let bindings = wave_bindings();
        let Some(Binding::Color(depth)) = bindings.iter().find(|b| b.label() == "depth_color") else {
            panic!("depth_color binding missing");
        };

        let red = Rgb::from_hex("#ff0000").unwrap();
        depth.write(&mut params, red);
        assert_eq!(params.depth_color, red);
    }

    #[test]
    fn test_panel_draws_headless_without_edits() {
        let ctx = egui::Context::default();
        let mut panel = ParameterPanel::new();
        let mut params = WaveParameters::default();
        let stats = FrameStats::default();

        let mut changed = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            changed = panel.show(ctx, &mut params, &stats);
        });

        assert!(!changed);
        assert_eq!(params, WaveParameters::default());
        assert_eq!(panel.debug_view, DebugView::Gradient);
        assert_eq!(panel.bindings().len(), wave_bindings().len());
    }
}
