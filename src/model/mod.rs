pub mod focus;
pub mod settings;
pub mod task;
pub mod timeline;
pub mod track;

pub use settings::Settings;
pub use task::Task;
pub use timeline::{ScaleLine, ScalePen, TimeAxis, TimeWindow};
