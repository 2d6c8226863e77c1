//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod ai_itinerary;
pub mod attraction;
pub mod budget_estimate;
pub mod category;
pub mod city;
pub mod free_trip;
pub mod generation_log;
pub mod hotel;
pub mod restaurant;
pub mod trip;
pub mod user;
