//! ASCII molecule raytracer
//!
//! Renders four overlapping spheres (a hydroxymethylene molecule) lit by a
//! single directional light, rotating over time, as shaded ASCII glyphs in
//! the terminal.

pub mod animation;
pub mod config;
pub mod renderer;
pub mod scene;
pub mod terminal;

pub use animation::{AnimationSummary, Animator};
pub use config::AppConfig;
pub use renderer::Renderer;
pub use scene::Scene;
pub use terminal::{DisplaySink, MemoryDisplay, TerminalDisplay};

/// Glyphs from dimmest to brightest
pub const GLYPH_RAMP: &str = ".-:=+*#@";

/// Glyph emitted for cells whose ray hits nothing
pub const BLANK: char = ' ';
