pub mod app;
pub mod changes;
pub mod flatten;
pub mod fold;
pub mod input;
pub mod render;
pub mod theme;
pub mod viewport;

pub use app::run;
