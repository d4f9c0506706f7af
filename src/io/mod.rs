pub mod editor;
pub mod error;
pub mod paths;
pub mod schedule;
pub mod settings;
pub mod watcher;

pub use paths::AppPaths;
pub use schedule::load_tasks;
pub use settings::load_settings_or_default;
