pub mod app;
pub mod auth;
pub mod bookings;
pub mod confirmation;
pub mod error;
pub mod metrics;
pub mod payment;
pub mod refunds;
pub mod rooms;
pub mod user;
