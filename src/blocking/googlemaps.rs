//! The blocking Google Maps geocoding client.
//!
//! Geocoding methods are implemented on the [`GoogleMaps`](struct.GoogleMaps.html) struct.
//! Please see the [API documentation](https://developers.google.com/maps/documentation/geocoding/overview)
//! for details, including usage limits. Requests without an API key are sent unauthenticated and
//! are heavily quota-limited by Google.
//!
//! ### Example
//!
//! ```no_run
//! use google_maps_geocoder::GoogleMaps;
//!
//! let gm = GoogleMaps::from_env();
//! let chez_barack = gm.geocode("1600 Pennsylvania Ave, Washington DC").unwrap();
//! assert_eq!(chez_barack.state_short_name(), Some("DC"));
//! ```
use crate::blocking::Forward;
use crate::googlemaps::{GeocodeResponse, GeocodedAddress, Parameters, API_KEY_ENV, ENDPOINT, NOBOX};
use crate::{GeocodingError, InputBounds, Point, LOG_TARGET};
use crate::{HeaderMap, HeaderValue, UA_STRING, USER_AGENT};
use num_traits::Float;
use reqwest::blocking::Client;
use std::fmt::Display;

/// An instance of the Google Maps geocoding service
pub struct GoogleMaps<'a> {
    api_key: Option<String>,
    client: Client,
    endpoint: String,
    pub parameters: Parameters<'a>,
}

impl<'a> GoogleMaps<'a> {
    /// Create a new Google Maps geocoding instance using the default endpoint
    pub fn new(api_key: Option<String>) -> Self {
        GoogleMaps::new_with_endpoint(api_key, ENDPOINT.to_string())
    }

    /// Create a new instance with the API key from the `GOOGLE_MAPS_API_KEY` environment variable.
    ///
    /// The variable is read once, here. If it is unset, requests are sent without a key.
    pub fn from_env() -> Self {
        GoogleMaps::new(std::env::var(API_KEY_ENV).ok())
    }

    /// Create a new Google Maps geocoding instance with a custom endpoint.
    ///
    /// The endpoint is the full URL of the JSON geocoding resource
    /// (i.e. "https://maps.googleapis.com/maps/api/geocode/json")
    pub fn new_with_endpoint(api_key: Option<String>, endpoint: String) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(UA_STRING));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .expect("Couldn't build a client!");
        GoogleMaps {
            api_key,
            client,
            endpoint,
            parameters: Parameters::default(),
        }
    }

    /// A forward-geocoding lookup of an address, returning the raw response.
    ///
    /// The response is returned as is, whatever its `status`; it's up to the caller to
    /// validate it, e.g. with [`GeocodedAddress::from_response`](../../struct.GeocodedAddress.html#method.from_response).
    /// Pass [`NOBOX`](../../static.NOBOX.html) if you don't want to bias the lookup with a bounding box.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use google_maps_geocoder::{GoogleMaps, InputBounds};
    ///
    /// let gm = GoogleMaps::from_env();
    /// let bounds = InputBounds::new((-77.12, 38.79), (-76.91, 38.99));
    /// let res = gm.forward_full("Pennsylvania Avenue", bounds).unwrap();
    /// assert_eq!(res.status.as_deref(), Some("OK"));
    /// ```
    pub fn forward_full<T, U>(
        &self,
        address: &str,
        bounds: U,
    ) -> Result<GeocodeResponse, GeocodingError>
    where
        T: Float + Display,
        U: Into<Option<InputBounds<T>>>,
    {
        // we need this to avoid lifetime inconvenience
        let bd;
        let mut query = vec![("address", address)];
        if let Some(key) = &self.api_key {
            query.push(("key", key.as_str()));
        }
        if let Some(bds) = bounds.into() {
            bd = String::from(bds);
            query.push(("bounds", bd.as_str()));
        }
        query.extend(self.parameters.as_query());

        log::debug!(target: LOG_TARGET, "GET {} for \"{}\"", self.endpoint, address);
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()?
            .error_for_status()?;
        let res: GeocodeResponse = resp.json()?;
        Ok(res)
    }

    /// Geocode an address and parse the first result.
    ///
    /// Fails with [`GeocodingError::Status`](../../enum.GeocodingError.html#variant.Status)
    /// when Google doesn't answer `OK` with at least one result.
    pub fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeocodingError> {
        let res = self.forward_full(address, NOBOX)?;
        GeocodedAddress::parse(res, Some(address))
    }
}

impl<'a> Forward<f64> for GoogleMaps<'a> {
    /// A forward-geocoding lookup of an address, returning the location of the first result.
    ///
    /// A lookup without results is an error (`StatusKind::ZeroResults`), not an empty `Vec`.
    fn forward(&self, address: &str) -> Result<Vec<Point<f64>>, GeocodingError> {
        Ok(vec![self.geocode(address)?.point()])
    }
}
