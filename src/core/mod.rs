//! Configuration, domain models and the ordering-hours policy

pub mod clock;
pub mod config;
pub mod hours;
pub mod models;
