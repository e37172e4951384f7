//! This crate provides forward-geocoding through the Google Maps Geocoding API.
//!
//! A lookup returns a [`GeocodedAddress`](struct.GeocodedAddress.html): the city, county,
//! state, country, postal code, formatted address and coordinates of the first result, plus
//! whether Google considered it a partial match. Non-`OK` responses become a
//! [`GeocodingError::Status`](enum.GeocodingError.html) carrying the raw response and a
//! [`StatusKind`](enum.StatusKind.html).
//!
//! The HTTP clients only fetch; parsing is a plain function of the response document, so
//! responses fetched or stored elsewhere can be fed to
//! [`GeocodedAddress::from_json`](struct.GeocodedAddress.html#method.from_json) directly.
//!
//! Successful lookups are logged at `info` and provider error messages at `error`, both
//! through the [`log`](https://docs.rs/log) facade with the target `GoogleMapsGeocoder`.
//!
//! ### A note on Coordinate Order
//! Google Maps speaks `[Latitude, Longitude]`, and so do `GeocodedAddress::coordinates` and
//! the `lat`/`lng` accessors. Everything built on [`Point`](struct.Point.html)
//! (`GeocodedAddress::point`, the `Forward` trait, [`InputBounds`](struct.InputBounds.html))
//! uses `[Longitude, Latitude]` (`x, y`) order.
//!
//! ### Usage of rustls
//!
//! If you like to use [rustls](https://github.com/ctz/rustls) instead of OpenSSL
//! you can enable the `rustls-tls` feature in your `Cargo.toml`:
//!
//!```toml
//![dependencies]
//!google_maps_geocoder = { version = "*", default-features = false, features = ["blocking", "rustls-tls"] }
//!```

static UA_STRING: &str = "Rust-GoogleMapsGeocoder";
/// The `log` target every record of this crate is written to
pub static LOG_TARGET: &str = "GoogleMapsGeocoder";

pub use geo_types::Point;
use num_traits::Float;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[cfg(feature = "async")]
pub mod async_impl;
#[cfg(feature = "blocking")]
pub mod blocking;

pub mod error;
pub use crate::error::{GeocodingError, StatusKind};

// The Google Maps geocoding provider
pub mod googlemaps;
pub use crate::googlemaps::{GeocodeResponse, GeocodedAddress, NOBOX};
#[cfg(feature = "blocking")]
pub use crate::blocking::googlemaps::GoogleMaps;
#[cfg(feature = "blocking")]
pub use crate::blocking::Forward;

/// Used to specify a bounding box that biases a forward-geocoding lookup
///
/// - `minimum` refers to the **bottom-left** or **south-west** corner of the bounding box
/// - `maximum` refers to the **top-right** or **north-east** corner of the bounding box.
#[derive(Copy, Clone, Debug)]
pub struct InputBounds<T>
where
    T: Float,
{
    pub minimum_lonlat: Point<T>,
    pub maximum_lonlat: Point<T>,
}

impl<T> InputBounds<T>
where
    T: Float,
{
    /// Create a new `InputBounds` struct by passing 2 `Point`s defining:
    /// - minimum (bottom-left) longitude and latitude coordinates
    /// - maximum (top-right) longitude and latitude coordinates
    pub fn new<U>(minimum_lonlat: U, maximum_lonlat: U) -> InputBounds<T>
    where
        U: Into<Point<T>>,
    {
        InputBounds {
            minimum_lonlat: minimum_lonlat.into(),
            maximum_lonlat: maximum_lonlat.into(),
        }
    }
}

/// Convert input bounds into Google's `bounds` query parameter
impl<T> From<InputBounds<T>> for String
where
    T: Float + Display,
{
    fn from(ip: InputBounds<T>) -> String {
        googlemaps::bounds_param(&ip)
    }
}
