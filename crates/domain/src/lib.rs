pub mod errors;
pub mod models;
pub mod repositories;
pub mod rules;
pub mod services;
