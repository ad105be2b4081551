pub mod catalog;
pub mod flights;
pub mod hotels;
pub mod links;
pub mod messaging;
pub mod mocks;
pub mod normalize;
pub mod restaurants;
pub mod scoring;

pub use crate::domain::ports::{ConfigProvider, FlightProvider, HotelProvider};
pub use crate::utils::error::Result;
pub use flights::FlightWidget;
pub use hotels::HotelWidget;
pub use restaurants::RestaurantWidget;
