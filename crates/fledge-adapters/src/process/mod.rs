//! Process runner adapters.

mod palette;
mod scripted;
mod spinner;

pub use palette::Palette;
pub use scripted::ScriptedRunner;
pub use spinner::{DEFAULT_TICK, LABEL_WIDTH, SPINNER_FRAMES, SpinnerRunner};
