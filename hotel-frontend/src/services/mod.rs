pub mod hotel_api;
pub mod pricing;
pub mod workflow;

pub use hotel_api::HotelApiClient;
