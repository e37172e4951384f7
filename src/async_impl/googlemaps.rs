use crate::async_impl::Forward;
use crate::googlemaps::{GeocodeResponse, GeocodedAddress, Parameters, API_KEY_ENV, ENDPOINT, NOBOX};
use crate::{GeocodingError, InputBounds, Point, LOG_TARGET};
use crate::{HeaderMap, HeaderValue, UA_STRING, USER_AGENT};
use async_trait::async_trait;
use num_traits::Float;
use std::fmt::Display;

/// An instance of the Google Maps geocoding service
pub struct GoogleMaps<'a> {
    api_key: Option<String>,
    client: reqwest::Client,
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
        let client = reqwest::Client::builder()
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
    /// use google_maps_geocoder::async_impl::googlemaps::GoogleMaps;
    /// use google_maps_geocoder::NOBOX;
    ///
    /// # async fn run() {
    /// let gm = GoogleMaps::from_env();
    /// let res = gm.forward_full("1600 Pennsylvania Ave, Washington DC", NOBOX).await.unwrap();
    /// assert_eq!(res.status.as_deref(), Some("OK"));
    /// # }
    /// ```
    pub async fn forward_full<T, U>(
        &self,
        address: &str,
        bounds: U,
    ) -> Result<GeocodeResponse, GeocodingError>
    where
        T: Float + Display,
        U: Into<Option<InputBounds<T>>>,
    {
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
        let res = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json::<GeocodeResponse>()
            .await?;
        Ok(res)
    }

    /// Geocode an address and parse the first result.
    ///
    /// Fails with [`GeocodingError::Status`](../../enum.GeocodingError.html#variant.Status)
    /// when Google doesn't answer `OK` with at least one result.
    pub async fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeocodingError> {
        let res = self.forward_full(address, NOBOX).await?;
        GeocodedAddress::parse(res, Some(address))
    }
}

#[async_trait]
impl<'a> Forward<f64> for GoogleMaps<'a> {
    /// A forward-geocoding lookup of an address, returning the location of the first result.
    async fn forward(&self, address: &str) -> Result<Vec<Point<f64>>, GeocodingError> {
        Ok(vec![self.geocode(address).await?.point()])
    }
}

#[cfg(test)]
mod async_test {
    use super::*;
    use crate::googlemaps::test::white_house;
    use crate::StatusKind;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GEOCODE_PATH: &str = "/maps/api/geocode/json";

    fn endpoint(server: &MockServer) -> String {
        format!("{}{}", server.uri(), GEOCODE_PATH)
    }

    #[tokio::test]
    async fn geocode_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(GEOCODE_PATH))
            .and(query_param("address", "1600 Pennsylvania Ave, Washington DC"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(white_house()))
            .expect(1)
            .mount(&server)
            .await;

        let gm = GoogleMaps::new_with_endpoint(Some("test-key".to_string()), endpoint(&server));
        let res = gm
            .geocode("1600 Pennsylvania Ave, Washington DC")
            .await
            .unwrap();
        assert_eq!(res.city(), Some("Washington"));
        assert_eq!(res.state_long_name(), Some("District of Columbia"));
        assert_eq!(res.country_short_name(), Some("US"));
        assert!(!res.is_exact_match());
    }

    #[tokio::test]
    async fn forward_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(GEOCODE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(white_house()))
            .mount(&server)
            .await;

        let gm = GoogleMaps::new_with_endpoint(None, endpoint(&server));
        let res = gm.forward("1600 Pennsylvania Ave, Washington DC").await;
        assert_eq!(res.unwrap(), vec![Point::new(-77.0365, 38.8977)]);
    }

    #[tokio::test]
    async fn query_limit_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(GEOCODE_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({
                    "status": "OVER_QUERY_LIMIT",
                    "error_message": "You have exceeded your daily request quota for this API.",
                    "results": []
                })),
            )
            .mount(&server)
            .await;

        let gm = GoogleMaps::new_with_endpoint(None, endpoint(&server));
        let err = gm.geocode("Washington").await.unwrap_err();
        assert_eq!(err.kind(), Some(StatusKind::QueryLimit));
        assert_eq!(
            err.response().and_then(|r| r.error_message.as_deref()),
            Some("You have exceeded your daily request quota for this API.")
        );
    }
}
