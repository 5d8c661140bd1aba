use crate::animation::{AnimationSession, FrameScheduler, Mode};
use crate::config::SceneConfig;
use crate::input::{clear_default, restore_default, FieldEvent, FieldId, InputFields};
use crate::report::{report_positions, Outputs};
use crate::scene::render_scene;
use crate::state::Params;
use crate::surface::Surface;
use crate::transform::build_rect_transform;
use log::{debug, info, trace};

/// Owns the parameter set and drives recompute, redraw and the rotation animation
pub struct Controller<S: Surface, I: InputFields, F: FrameScheduler> {
    surface: S,
    inputs: I,
    outputs: Outputs,
    frames: F,
    config: SceneConfig,
    params: Params,
    mode: Mode,
}

impl<S: Surface, I: InputFields, F: FrameScheduler> Controller<S, I, F> {
    pub fn new(surface: S, inputs: I, outputs: Outputs, frames: F, config: SceneConfig) -> Self {
        let params = Params::from_fields(&inputs);
        Self {
            surface,
            inputs,
            outputs,
            frames,
            config,
            params,
            mode: Mode::Idle,
        }
    }

    /// Initial recompute and draw
    pub fn start(&mut self) {
        self.recompute();
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn inputs(&self) -> &I {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut I {
        &mut self.inputs
    }

    /// Applies the field's default-value behaviour, then recomputes when idle
    pub fn handle_field_event(&mut self, field: FieldId, event: FieldEvent) {
        match event {
            FieldEvent::Focus => {
                clear_default(&mut self.inputs, field);
            }
            FieldEvent::Blur => {
                restore_default(&mut self.inputs, field);
            }
            FieldEvent::Input => {}
        }
        self.recompute();
    }

    /// Starts a full-turn rotation. Returns false if one is already running.
    pub fn trigger_rotation(&mut self, now: f64) -> bool {
        if self.mode.is_animating() {
            debug!("rotation already running, trigger ignored");
            return false;
        }

        let session = AnimationSession::begin(now, self.params.degree, self.config.animation_ms);
        info!(
            "rotating from {} to {} degrees at t={}ms",
            session.start_degree(),
            session.target_degree(),
            session.start_time()
        );
        self.mode = Mode::Animating(session);
        self.frames.request_frame();
        true
    }

    /// Frame callback: advances the animation and redraws
    pub fn on_frame(&mut self, now: f64) {
        let Mode::Animating(session) = self.mode else {
            trace!("frame at {now} with no animation running");
            return;
        };

        let ratio = session.ratio(now);
        self.params.degree = session.degree_at(ratio);
        trace!("frame at {now}: ratio {ratio:.3}, degree {:.2}", self.params.degree);
        self.redraw();

        if ratio < 1.0 {
            self.frames.request_frame();
        } else {
            info!("rotation finished at {} degrees", self.params.degree);
            self.mode = Mode::Idle;
        }
    }

    /// Re-renders the current parameter set without re-reading the fields
    pub fn redraw(&mut self) {
        let transform = build_rect_transform(&self.params, self.config.scale);
        report_positions(&transform, &mut self.outputs);
        render_scene(&mut self.surface, &transform, &self.params, &self.config);
    }

    fn recompute(&mut self) {
        if self.mode.is_animating() {
            debug!("animation owns the parameters, recompute skipped");
            return;
        }
        self.params = Params::from_fields(&self.inputs);
        debug!("parameters recomputed: {:?}", self.params);
        self.redraw();
    }
}
