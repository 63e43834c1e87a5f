pub mod chart;
pub mod price;
pub mod query;
pub mod series;
pub mod settings;
pub mod vendor;
