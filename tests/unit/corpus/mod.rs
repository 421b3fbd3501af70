pub mod assets;
pub mod loader;
