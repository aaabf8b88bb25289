pub mod config;
pub mod facts;
pub mod history;
pub mod personality;
pub mod report;
pub mod stats;
pub mod style;
