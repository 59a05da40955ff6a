pub mod loader;

pub use loader::TitleModel;
pub use loader::VibeModel;
