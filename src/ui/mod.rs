pub mod meter;
pub mod theme;
pub mod tip;
