/// State management module
/// 
/// Each screen owns a private state record; nothing here is shared
/// between screens:
/// - Static reference tables (data.rs)
/// - Configuration file (config.rs)
/// - Tickets for in-flight simulated work (pending.rs)
/// - Translate, Photo AI and Maps pipelines (translate.rs, photo.rs, maps.rs)

pub mod config;
pub mod data;
pub mod maps;
pub mod pending;
pub mod photo;
pub mod translate;
