use async_trait::async_trait;
use num_traits::Float;

use crate::{GeocodingError, Point};

pub mod googlemaps;

/// Forward-geocode an address without blocking the executor.
///
/// The async counterpart of [`blocking::Forward`](../blocking/trait.Forward.html).
/// Like it, a lookup without results is an error, never an empty `Vec`.
#[async_trait]
pub trait Forward<T>
where
    T: Float,
{
    // NOTE TO IMPLEMENTERS: while returned provider point data may not be in
    // lon, lat (x, y) order, Geocoding requires this order in its output Point
    // data. Please pay attention when using returned data to construct Points
    async fn forward(&self, address: &str) -> Result<Vec<Point<T>>, GeocodingError>;
}
