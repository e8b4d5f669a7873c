#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod backend;
pub mod compositing;
pub mod config;
pub mod drawing;
pub mod error;
pub mod gallery;
pub mod gateway;
pub mod input;
pub mod panels;
pub mod placement;
pub mod renderer;
pub mod stroke;
pub mod submission;
pub mod texture_manager;
pub mod toast;

pub use app::PumpkinApp;
pub use config::AppConfig;
pub use drawing::Drawing;
pub use gallery::Garden;
pub use gateway::Gateway;
pub use input::{InputEvent, InputLocation};
pub use renderer::Renderer;
pub use stroke::{PenColor, Stroke, Tool};
