//! Frame loop driving the renderer and a display sink

use crate::config::AnimationConfig;
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::terminal::DisplaySink;
use std::io;

/// Rotation angle for a frame index
pub fn theta_for_frame(frame: u32, steps_per_radian: f64) -> f32 {
    (frame as f64 / steps_per_radian) as f32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Running,
    Terminated,
}

/// Result of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSummary {
    pub frames_rendered: u32,
    /// Rotation the molecule has accumulated once the run ends
    pub final_theta: f32,
}

/// Spins a scene for a fixed number of frames
pub struct Animator {
    scene: Scene,
    renderer: Renderer,
    settings: AnimationConfig,
    frame: u32,
    state: AnimationState,
}

impl Animator {
    pub fn new(scene: Scene, renderer: Renderer, settings: AnimationConfig) -> Self {
        let state = if settings.frame_count == 0 {
            AnimationState::Terminated
        } else {
            AnimationState::Running
        };

        Self {
            scene,
            renderer,
            settings,
            frame: 0,
            state,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Frames completed so far
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Render frame `index` without touching any display
    pub fn render_frame(&mut self, index: u32) -> String {
        let theta = theta_for_frame(index, self.settings.steps_per_radian);
        self.renderer.render(&self.scene, theta);
        self.renderer.to_ascii()
    }

    /// Draw the next frame, wait, then clear it away
    pub fn step<S: DisplaySink>(&mut self, sink: &mut S) -> io::Result<AnimationState> {
        if self.state == AnimationState::Terminated {
            return Ok(self.state);
        }

        let theta = theta_for_frame(self.frame, self.settings.steps_per_radian);
        tracing::trace!(frame = self.frame, theta, "Rendering frame");

        sink.clear()?;
        self.renderer.render(&self.scene, theta);
        sink.present(&self.renderer.to_ascii())?;
        sink.pause(self.settings.frame_delay())?;
        sink.clear()?;

        self.frame += 1;
        if self.frame >= self.settings.frame_count {
            self.state = AnimationState::Terminated;
        }

        Ok(self.state)
    }

    /// Run until the configured frame count is reached.
    ///
    /// A closed output pipe ends the run early without an error.
    pub fn run<S: DisplaySink>(&mut self, sink: &mut S) -> io::Result<AnimationSummary> {
        tracing::info!(
            frames = self.settings.frame_count,
            delay_ms = self.settings.frame_delay_ms,
            atoms = self.scene.atoms.len(),
            "Starting animation"
        );

        while self.state == AnimationState::Running {
            match self.step(sink) {
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::warn!(frame = self.frame, "Output closed, stopping animation");
                    self.state = AnimationState::Terminated;
                }
                Err(e) => return Err(e),
            }
        }

        let summary = AnimationSummary {
            frames_rendered: self.frame,
            final_theta: theta_for_frame(self.frame, self.settings.steps_per_radian),
        };
        tracing::info!(
            frames = summary.frames_rendered,
            final_theta = summary.final_theta,
            "Animation finished"
        );

        Ok(summary)
    }
}
