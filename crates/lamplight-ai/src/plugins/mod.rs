//! Built-in plugins: in-process state exposed to the model as tools.

mod lights;

pub use lights::{default_lights, Light, LightsPlugin};
