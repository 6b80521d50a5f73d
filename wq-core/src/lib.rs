pub mod date_range;
pub mod error;
pub mod loader;
pub mod reading;
pub mod series;
pub mod site;
pub mod variable;
