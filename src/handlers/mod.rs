pub mod achievements;
pub mod breaks;
pub mod calendar;
pub mod challenges;
pub mod dashboard;
pub mod health;
pub mod hydration;
pub mod mood;
pub mod oauth;
pub mod reminders;
pub mod settings;
pub mod sleep;
pub mod stats;
pub mod users;
pub mod work;
