pub mod chart;
pub mod coords;
pub mod dataset;
pub mod mapping;
pub mod series_look;
pub mod table;
