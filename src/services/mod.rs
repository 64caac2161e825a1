pub mod export_service;
pub mod generator_service;
pub mod normalize_service;
pub mod render_service;
