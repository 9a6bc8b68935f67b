//! Procedural city generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod city;
pub mod config;
pub mod error;
pub mod export;
pub mod mesh;
pub mod seeds;
pub mod tilemap;
pub mod viewer;

pub use city::{generate_city, City};
pub use config::CityConfig;
pub use error::CityError;
