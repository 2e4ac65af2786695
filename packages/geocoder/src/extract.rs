//! Extraction policies for the two lookup directions.
//!
//! A policy is a closure handed to [`crate::xml::parse`]. It inspects each
//! text node and writes into output storage owned by the caller.

use crate::config::COORDINATES_ELEMENT;
use crate::error::{GeocoderError, Result};
use crate::types::{Address, LatLng};
use crate::xml::TextNode;

/// Element carrying the country code in a reverse lookup response.
pub const COUNTRY_ELEMENT: &str = "CountryNameCode";

/// Element carrying the town.
pub const LOCALITY_ELEMENT: &str = "LocalityName";

/// Element carrying the street.
pub const THOROUGHFARE_ELEMENT: &str = "ThoroughfareName";

/// Element carrying the state or region.
pub const ADMINISTRATIVE_AREA_ELEMENT: &str = "AdministrativeAreaName";

/// Element carrying the postal code.
pub const POSTAL_CODE_ELEMENT: &str = "PostalCodeNumber";

/// Forward lookup policy: read `coordinates` text into `out`.
///
/// `out` stays `None` if the response has no `coordinates` element.
pub fn forward_policy(out: &mut Option<LatLng>) -> impl FnMut(&TextNode<'_>) -> Result<()> + '_ {
    move |node| {
        if node.element == COORDINATES_ELEMENT {
            *out = Some(parse_coordinates(node.text)?);
        }
        Ok(())
    }
}

/// Reverse lookup policy: copy address components into `out`.
///
/// Unrecognized elements are ignored.
pub fn reverse_policy(out: &mut Address) -> impl FnMut(&TextNode<'_>) -> Result<()> + '_ {
    move |node| {
        let field = match node.element {
            COUNTRY_ELEMENT => &mut out.country,
            LOCALITY_ELEMENT => &mut out.town,
            THOROUGHFARE_ELEMENT => &mut out.address,
            ADMINISTRATIVE_AREA_ELEMENT => &mut out.state,
            POSTAL_CODE_ELEMENT => &mut out.postal_code,
            _ => return Ok(()),
        };
        *field = Some(node.text.to_string());
        Ok(())
    }
}

/// Parse a comma-separated coordinate pair.
///
/// The first value is the latitude and the second the longitude. Any
/// further values (such as an altitude) are ignored.
///
/// # Examples
/// ```
/// use geocoder::extract::parse_coordinates;
///
/// let location = parse_coordinates("37.4,-122.1").unwrap();
/// assert_eq!(location.lat, 37.4);
/// assert_eq!(location.lng, -122.1);
/// assert!(parse_coordinates("37.4").is_err());
/// ```
pub fn parse_coordinates(text: &str) -> Result<LatLng> {
    let mut parts = text.split(',').map(str::trim);

    let (Some(lat), Some(lng)) = (parts.next(), parts.next()) else {
        return Err(GeocoderError::InvalidCoordinates {
            text: text.to_string(),
            reason: "expected 'lat,lng'".to_string(),
        });
    };

    let number = |value: &str| {
        value
            .parse::<f64>()
            .map_err(|e| GeocoderError::InvalidCoordinates {
                text: text.to_string(),
                reason: format!("'{value}': {e}"),
            })
    };

    Ok(LatLng::new(number(lat)?, number(lng)?))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ErrorKind;
    use crate::xml::ElementStack;

    fn feed<F>(policy: &mut F, element: &str, text: &str) -> Result<()>
    where
        F: FnMut(&TextNode<'_>) -> Result<()>,
    {
        let ancestors = ElementStack::new();
        policy(&TextNode {
            element,
            text,
            ancestors: &ancestors,
        })
    }

    #[test]
    fn test_parse_coordinates_exact() {
        let location = parse_coordinates("37.4,-122.1").unwrap();
        assert_eq!(location, LatLng::new(37.4, -122.1));
    }

    #[test]
    fn test_parse_coordinates_ignores_extra_values() {
        let location = parse_coordinates("4.3007, 52.0705, 0").unwrap();
        assert_eq!(location, LatLng::new(4.3007, 52.0705));
    }

    #[test]
    fn test_parse_coordinates_invalid() {
        for text in ["", "37.4", "abc,1.0", "1.0,", "1.0;2.0"] {
            let err = parse_coordinates(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TransportOrParse, "input {text:?}");
        }
    }

    #[test]
    fn test_forward_policy_only_reads_coordinates() {
        let mut location = None;
        {
            let mut policy = forward_policy(&mut location);
            feed(&mut policy, "code", "200").unwrap();
            feed(&mut policy, "address", "1,2").unwrap();
            feed(&mut policy, "coordinates", "37.4,-122.1").unwrap();
        }
        assert_eq!(location, Some(LatLng::new(37.4, -122.1)));
    }

    #[test]
    fn test_forward_policy_rejects_bad_coordinates() {
        let mut location = None;
        let mut policy = forward_policy(&mut location);
        assert!(feed(&mut policy, "coordinates", "north").is_err());
    }

    #[test]
    fn test_reverse_policy_maps_components() {
        let mut address = Address::new();
        {
            let mut policy = reverse_policy(&mut address);
            feed(&mut policy, COUNTRY_ELEMENT, "US").unwrap();
            feed(&mut policy, ADMINISTRATIVE_AREA_ELEMENT, "CA").unwrap();
            feed(&mut policy, LOCALITY_ELEMENT, "Mountain View").unwrap();
            feed(&mut policy, THOROUGHFARE_ELEMENT, "1600 Amphitheatre Pkwy").unwrap();
            feed(&mut policy, POSTAL_CODE_ELEMENT, "94043").unwrap();
            feed(&mut policy, "ExtraField", "ignored").unwrap();
            feed(&mut policy, "code", "200").unwrap();
        }

        assert_eq!(
            address,
            Address::new()
                .with_country("US")
                .with_state("CA")
                .with_town("Mountain View")
                .with_address("1600 Amphitheatre Pkwy")
                .with_postal_code("94043")
        );
    }

    #[test]
    fn test_reverse_policy_last_value_wins() {
        let mut address = Address::new();
        {
            let mut policy = reverse_policy(&mut address);
            feed(&mut policy, LOCALITY_ELEMENT, "Delft").unwrap();
            feed(&mut policy, LOCALITY_ELEMENT, "Leiden").unwrap();
        }
        assert_eq!(address.town.as_deref(), Some("Leiden"));
    }
}
