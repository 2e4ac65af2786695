//! Configuration constants, request URL construction and input validation.

use url::form_urlencoded;

use crate::error::{GeocoderError, Result};
use crate::types::{Address, LatLng};

/// Default endpoint of the geocoding service.
pub const GEOCODER_URL: &str = "http://maps.google.com/maps/geo";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Status code the service reports on success.
pub const SUCCESS_STATUS: &str = "200";

/// Element whose text carries the service status.
pub const STATUS_ELEMENT: &str = "code";

/// Element whose text carries a `lat,lng` pair.
pub const COORDINATES_ELEMENT: &str = "coordinates";

/// Build the forward lookup URL for an address.
///
/// The query repeats the country component; the other address fields are
/// not sent. Missing values are rendered as empty strings.
///
/// # Examples
/// ```
/// use geocoder::config::geocode_url;
/// use geocoder::Address;
///
/// let url = geocode_url("http://maps.google.com/maps/geo", &Address::new().with_country("NL"), Some("key"));
/// assert_eq!(url, "http://maps.google.com/maps/geo?q=NL+NL&output=xml&oe=utf8&sensor=false&key=key");
/// ```
pub fn geocode_url(base_url: &str, address: &Address, api_key: Option<&str>) -> String {
    let country = encode(address.country.as_deref().unwrap_or_default());
    let key = encode(api_key.unwrap_or_default());
    format!("{base_url}?q={country}+{country}&output=xml&oe=utf8&sensor=false&key={key}")
}

/// Build the reverse lookup URL for a coordinate.
///
/// Values use the shortest decimal form that round-trips, so whole
/// numbers carry no fraction (`1.0` is sent as `1`) and very small values
/// are written out in full rather than in `E` notation.
///
/// # Examples
/// ```
/// use geocoder::config::reverse_url;
/// use geocoder::LatLng;
///
/// let url = reverse_url("http://maps.google.com/maps/geo", &LatLng::new(37.4, -122.1), Some("key"));
/// assert_eq!(url, "http://maps.google.com/maps/geo?output=xml&oe=utf-8&ll=37.4%2C-122.1&key=key");
/// ```
pub fn reverse_url(base_url: &str, location: &LatLng, api_key: Option<&str>) -> String {
    let key = encode(api_key.unwrap_or_default());
    format!(
        "{base_url}?output=xml&oe=utf-8&ll={}%2C{}&key={key}",
        location.lat, location.lng
    )
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Validate a latitude in degrees.
///
/// # Examples
/// ```
/// use geocoder::config::validate_latitude;
///
/// assert!(validate_latitude(52.08).is_ok());
/// assert!(validate_latitude(90.5).is_err());
/// ```
pub fn validate_latitude(lat: f64) -> Result<()> {
    if lat.is_finite() && (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        Err(GeocoderError::InvalidLatitude(lat))
    }
}

/// Validate a longitude in degrees.
pub fn validate_longitude(lng: f64) -> Result<()> {
    if lng.is_finite() && (-180.0..=180.0).contains(&lng) {
        Ok(())
    } else {
        Err(GeocoderError::InvalidLongitude(lng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_url_repeats_country() {
        let address = Address::new()
            .with_country("US")
            .with_town("Mountain View")
            .with_address("Amphitheatre Parkway");

        assert_eq!(
            geocode_url(GEOCODER_URL, &address, Some("abc")),
            "http://maps.google.com/maps/geo?q=US+US&output=xml&oe=utf8&sensor=false&key=abc"
        );
    }

    #[test]
    fn test_geocode_url_encodes_country() {
        let address = Address::new().with_country("New Zealand");
        assert_eq!(
            geocode_url("http://localhost", &address, Some("k")),
            "http://localhost?q=New+Zealand+New+Zealand&output=xml&oe=utf8&sensor=false&key=k"
        );
    }

    #[test]
    fn test_geocode_url_missing_values() {
        assert_eq!(
            geocode_url("http://localhost", &Address::new(), None),
            "http://localhost?q=+&output=xml&oe=utf8&sensor=false&key="
        );
    }

    #[test]
    fn test_reverse_url() {
        assert_eq!(
            reverse_url(GEOCODER_URL, &LatLng::new(52.08, 4.31), Some("abc")),
            "http://maps.google.com/maps/geo?output=xml&oe=utf-8&ll=52.08%2C4.31&key=abc"
        );
    }

    #[test]
    fn test_reverse_url_number_formatting() {
        assert_eq!(
            reverse_url("http://localhost", &LatLng::new(1.0, -2.0), None),
            "http://localhost?output=xml&oe=utf-8&ll=1%2C-2&key="
        );
        assert_eq!(
            reverse_url("http://localhost", &LatLng::new(0.00001, 0.5), None),
            "http://localhost?output=xml&oe=utf-8&ll=0.00001%2C0.5&key="
        );
    }

    #[test]
    fn test_validate_latitude() {
        assert!(validate_latitude(0.0).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(-90.1).is_err());
        assert!(validate_latitude(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_longitude() {
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.5).is_err());
        assert!(validate_longitude(f64::INFINITY).is_err());
    }
}
