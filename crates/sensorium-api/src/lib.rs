// sensorium-api: Async Rust client for the sensor station data endpoint

pub mod client;
pub mod error;
pub mod reading;
pub mod transport;

pub use client::StationClient;
pub use error::Error;
pub use reading::{Reading, WaterLevel};
pub use transport::TransportConfig;
