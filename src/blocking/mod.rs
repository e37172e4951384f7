pub mod googlemaps;

use crate::{GeocodingError, Point};
use num_traits::Float;

/// Forward-geocode an address.
///
/// This trait represents the most simple and minimal implementation available
/// from a given geocoding provider: the `Point` of the first result, in a `Vec`.
/// A lookup without results is an error (`StatusKind::ZeroResults`), never an empty `Vec`.
///
/// Examples
///
/// ```no_run
/// use google_maps_geocoder::{Forward, GoogleMaps, Point};
///
/// let gm = GoogleMaps::from_env();
/// let res: Vec<Point<f64>> = gm.forward("1600 Pennsylvania Ave, Washington DC").unwrap();
/// println!("{:?}", res);
/// ```
pub trait Forward<T>
where
    T: Float,
{
    // NOTE TO IMPLEMENTERS: while returned provider point data may not be in
    // lon, lat (x, y) order, Geocoding requires this order in its output Point
    // data. Please pay attention when using returned data to construct Points
    fn forward(&self, address: &str) -> Result<Vec<Point<T>>, GeocodingError>;
}
