pub mod calendar;
pub mod chart_service;
pub mod color_service;
pub mod format_service;
pub mod merge_service;
pub mod tick_service;
