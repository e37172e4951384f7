//! The [Google Maps Geocoding API](https://developers.google.com/maps/documentation/geocoding/overview) provider.
//!
//! The response schema and the [`GeocodedAddress`](struct.GeocodedAddress.html) parser live
//! here; the HTTP clients are in `blocking::googlemaps` and `async_impl::googlemaps`.
//!
//! A `GeocodedAddress` can also be built from a response that was fetched elsewhere:
//!
//! ```
//! use google_maps_geocoder::GeocodedAddress;
//!
//! let json = r#"{
//!     "status": "OK",
//!     "results": [{
//!         "formatted_address": "Carrer de Calatrava, 68, 08017 Barcelona, Spain",
//!         "geometry": { "location": { "lat": 41.4014067, "lng": 2.1287224 } },
//!         "address_components": [
//!             { "types": ["locality", "political"], "long_name": "Barcelona", "short_name": "Barcelona" }
//!         ]
//!     }]
//! }"#;
//! let address = GeocodedAddress::from_json_str(json).unwrap();
//! assert_eq!(address.city(), Some("Barcelona"));
//! assert!(address.is_exact_match());
//! ```
use crate::error::{GeocodingError, StatusKind};
use crate::{Deserialize, Point, Serialize};
use crate::{InputBounds, LOG_TARGET};
use num_traits::Float;
use serde::Deserializer;
use serde_json::Value;
use std::fmt::Display;

macro_rules! add_optional_param {
    ($query:expr, $param:expr, $name:expr) => {
        if let Some(p) = $param {
            $query.push(($name, p))
        }
    };
}

/// The `status` value of a successful lookup
pub static OK: &str = "OK";
/// The environment variable `from_env` reads the API key from
pub static API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
/// The public geocoding endpoint
pub static ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";
/// Use this constant if you don't need to bias a `forward_full` call with a bounding box
pub static NOBOX: Option<InputBounds<f64>> = None::<InputBounds<f64>>;

// Please see the [API documentation](https://developers.google.com/maps/documentation/geocoding/requests-geocoding#geocoding-lookup) for details.
#[derive(Default)]
pub struct Parameters<'a> {
    pub language: Option<&'a str>,
    pub region: Option<&'a str>,
    pub components: Option<&'a str>,
}

impl<'a> Parameters<'a> {
    pub fn as_query(&self) -> Vec<(&'a str, &'a str)> {
        let mut query = vec![];
        add_optional_param!(query, self.language, "language");
        add_optional_param!(query, self.region, "region");
        add_optional_param!(query, self.components, "components");
        query
    }
}

/// Format bounds the way Google expects them: `south,west|north,east`
pub fn bounds_param<T>(bounds: &InputBounds<T>) -> String
where
    T: Float + Display,
{
    // Google expects lat, lng order
    format!(
        "{},{}|{},{}",
        bounds.minimum_lonlat.y(),
        bounds.minimum_lonlat.x(),
        bounds.maximum_lonlat.y(),
        bounds.maximum_lonlat.x()
    )
}

/// Only a literal JSON `true` counts; anything else, `null` included, is `false`.
pub fn deserialize_strict_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value == Value::Bool(true))
}

/// An explicit `null` reads like a missing field: the type's default.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The top-level JSON response returned by a geocoding request
///
/// See [the documentation](https://developers.google.com/maps/documentation/geocoding/requests-geocoding#GeocodingResponses)
/// for more details. Every field is optional so that error responses and
/// truncated documents still deserialize.
///
///```json
/// {
///   "results": [
///     {
///       "address_components": [
///         { "long_name": "1600", "short_name": "1600", "types": ["street_number"] },
///         { "long_name": "Pennsylvania Avenue Northwest", "short_name": "Pennsylvania Avenue NW", "types": ["route"] },
///         { "long_name": "Washington", "short_name": "Washington", "types": ["locality", "political"] },
///         { "long_name": "District of Columbia", "short_name": "DC", "types": ["administrative_area_level_1", "political"] },
///         { "long_name": "United States", "short_name": "US", "types": ["country", "political"] },
///         { "long_name": "20500", "short_name": "20500", "types": ["postal_code"] }
///       ],
///       "formatted_address": "1600 Pennsylvania Avenue NW, Washington, DC 20500, USA",
///       "geometry": {
///         "location": { "lat": 38.8976633, "lng": -77.0365739 },
///         "location_type": "ROOFTOP"
///       },
///       "partial_match": true,
///       "place_id": "ChIJGVtI4by3t4kRr51d_Qm_x58",
///       "types": ["street_address"]
///     }
///   ],
///   "status": "OK"
/// }
///```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub results: Vec<GeocodeResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    /// The first result, the only one this crate looks at
    pub fn first_result(&self) -> Option<&GeocodeResult> {
        self.results.first()
    }
}

/// A single geocoding result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_strict_true")]
    pub partial_match: bool,
    pub geometry: Option<Geometry>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub address_components: Vec<AddressComponent>,
}

impl GeocodeResult {
    /// The first component, in response order, tagged with `type_code`
    pub fn component(&self, type_code: &str) -> Option<&AddressComponent> {
        self.address_components
            .iter()
            .find(|component| component.types.iter().any(|t| t == type_code))
    }

    /// `long_name` of the first component tagged with `type_code`
    pub fn long_name_of(&self, type_code: &str) -> Option<&str> {
        self.component(type_code)
            .and_then(|component| component.long_name.as_deref())
    }

    /// `short_name` of the first component tagged with `type_code`
    pub fn short_name_of(&self, type_code: &str) -> Option<&str> {
        self.component(type_code)
            .and_then(|component| component.short_name.as_deref())
    }

    fn location(&self) -> Option<&Location> {
        self.geometry
            .as_ref()
            .and_then(|geometry| geometry.location.as_ref())
    }
}

/// Geometry of a result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Option<Location>,
}

/// A WGS84 coordinate in Google's lat, lng order
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// A fragment of a structured address, e.g. a locality or a postal code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub types: Vec<String>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
}

/// The address fields of a successful Google Maps lookup.
///
/// Built all at once from the first result of an `OK` response and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedAddress {
    city: Option<String>,
    country_long_name: Option<String>,
    country_short_name: Option<String>,
    county: Option<String>,
    formatted_address: String,
    formatted_street_address: String,
    lat: f64,
    lng: f64,
    partial_match: bool,
    postal_code: Option<String>,
    state_long_name: Option<String>,
    state_short_name: Option<String>,
}

impl GeocodedAddress {
    /// Validate an already fetched response and extract its address fields
    pub fn from_response(response: GeocodeResponse) -> Result<Self, GeocodingError> {
        Self::parse(response, None)
    }

    /// Like [`from_response`](#method.from_response), for an arbitrary JSON document.
    ///
    /// `null`, `{}` and anything that isn't an object fail with `StatusKind::Unknown`.
    pub fn from_json(value: Value) -> Result<Self, GeocodingError> {
        let is_empty = match &value {
            Value::Object(map) => map.is_empty(),
            _ => true,
        };
        if is_empty {
            return Err(GeocodingError::status(
                StatusKind::Unknown,
                GeocodeResponse::default(),
            ));
        }
        Self::from_response(serde_json::from_value(value)?)
    }

    /// Like [`from_json`](#method.from_json), for JSON text
    pub fn from_json_str(json: &str) -> Result<Self, GeocodingError> {
        Self::from_json(serde_json::from_str(json)?)
    }

    pub(crate) fn parse(
        response: GeocodeResponse,
        query: Option<&str>,
    ) -> Result<Self, GeocodingError> {
        let status = response.status.as_deref();
        if status != Some(OK) || response.results.is_empty() {
            if let Some(message) = &response.error_message {
                log::error!(target: LOG_TARGET, "GeocodingError: {}", message);
            }
            let kind = StatusKind::from_status(status);
            return Err(GeocodingError::status(kind, response));
        }
        let address = Self::from_result(&response.results[0])?;

        if log::log_enabled!(target: LOG_TARGET, log::Level::Info) {
            let input = match query {
                Some(query) => query.to_string(),
                None => serde_json::to_string(&response).unwrap_or_default(),
            };
            log::info!(
                target: LOG_TARGET,
                "Geocoded \"{}\" => \"{}\"",
                input,
                address.formatted_address
            );
        }
        Ok(address)
    }

    fn from_result(result: &GeocodeResult) -> Result<Self, GeocodingError> {
        let location = result.location();
        let lat = location
            .and_then(|location| location.lat)
            .ok_or(GeocodingError::MissingField("results[0].geometry.location.lat"))?;
        let lng = location
            .and_then(|location| location.lng)
            .ok_or(GeocodingError::MissingField("results[0].geometry.location.lng"))?;

        let long_name = |type_code: &str| result.long_name_of(type_code).map(String::from);
        let short_name = |type_code: &str| result.short_name_of(type_code).map(String::from);

        Ok(GeocodedAddress {
            city: long_name("sublocality").or_else(|| long_name("locality")),
            country_long_name: long_name("country"),
            country_short_name: short_name("country"),
            county: long_name("administrative_area_level_2"),
            formatted_address: result.formatted_address.clone().unwrap_or_default(),
            // An empty street number or route still leaves the separating space
            formatted_street_address: format!(
                "{} {}",
                result.long_name_of("street_number").unwrap_or_default(),
                result.long_name_of("route").unwrap_or_default()
            ),
            lat,
            lng,
            partial_match: result.partial_match,
            postal_code: long_name("postal_code"),
            state_long_name: long_name("administrative_area_level_1"),
            state_short_name: short_name("administrative_area_level_1"),
        })
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn country_long_name(&self) -> Option<&str> {
        self.country_long_name.as_deref()
    }

    pub fn country_short_name(&self) -> Option<&str> {
        self.country_short_name.as_deref()
    }

    pub fn county(&self) -> Option<&str> {
        self.county.as_deref()
    }

    /// The complete formatted address with standardized abbreviations
    pub fn formatted_address(&self) -> &str {
        &self.formatted_address
    }

    /// Street number and route, joined by a single space
    pub fn formatted_street_address(&self) -> &str {
        &self.formatted_street_address
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn state_long_name(&self) -> Option<&str> {
        self.state_long_name.as_deref()
    }

    pub fn state_short_name(&self) -> Option<&str> {
        self.state_short_name.as_deref()
    }

    /// Whether Google could only approximately match the query
    pub fn is_partial_match(&self) -> bool {
        self.partial_match
    }

    /// Whether Google considers the result a full match of the query
    pub fn is_exact_match(&self) -> bool {
        !self.is_partial_match()
    }

    // Aliases

    pub fn address(&self) -> &str {
        self.formatted_address()
    }

    pub fn country(&self) -> Option<&str> {
        self.country_long_name()
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_short_name()
    }

    pub fn latitude(&self) -> f64 {
        self.lat
    }

    pub fn longitude(&self) -> f64 {
        self.lng
    }

    pub fn state(&self) -> Option<&str> {
        self.state_long_name()
    }

    pub fn state_code(&self) -> Option<&str> {
        self.state_short_name()
    }

    /// `[lat, lng]`
    pub fn coordinates(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    /// The location as a `Point` in lon, lat (x, y) order
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}
