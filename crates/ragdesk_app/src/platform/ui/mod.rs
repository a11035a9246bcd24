pub mod browse;
pub mod constants;
pub mod render;
