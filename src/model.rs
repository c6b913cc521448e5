//! Core data model for cairn.
//!
//! Points of interest, the coordinate pair they carry, and the map
//! viewport the home screen renders them in.

use serde::{Deserialize, Serialize};

/// Image URI stored when the creation form leaves the image field empty.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A point of interest as the screens see it.
///
/// `id` is assigned by the backing store at creation time and stable for
/// the document's lifetime. A POI without coordinates is excluded from map
/// rendering but still listed.
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    pub id: String,
    pub name: String,
    pub description: String,
    pub coordinates: Option<Coordinates>,
    pub image: String,
}

/// A POI as submitted by the creation form, before the store assigns an id.
///
/// Latitude and longitude are taken as parsed, NaN included; they flow
/// through unvalidated. The placeholder image default is applied here so
/// the stored document and the optimistic local append agree.
#[derive(Debug, Clone)]
pub struct NewPoi {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: String,
}

impl NewPoi {
    /// Assembles a submission, defaulting an empty image to the
    /// placeholder URI. A non-empty image is kept verbatim.
    pub fn new(
        name: String,
        description: String,
        latitude: f64,
        longitude: f64,
        image: String,
    ) -> Self {
        let image = if image.is_empty() {
            PLACEHOLDER_IMAGE.to_string()
        } else {
            image
        };
        Self {
            name,
            description,
            latitude,
            longitude,
            image,
        }
    }

    /// The optimistic-append step: the local record for a POI the store
    /// just accepted, built from the submitted fields plus the assigned id.
    /// Independent of any network call.
    pub fn into_poi(self, id: String) -> Poi {
        Poi {
            id,
            name: self.name,
            description: self.description,
            coordinates: Some(Coordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            }),
            image: self.image,
        }
    }
}

/// Padding factor applied around the fitted marker bounding box.
const FIT_PADDING: f64 = 1.2;

/// The map viewport: a center and the visible span along each axis.
///
/// The canvas derives its x/y bounds from it: longitude along x,
/// latitude along y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Default for Region {
    /// The initial viewport: central Barcelona.
    fn default() -> Self {
        Self {
            latitude: 41.3851,
            longitude: 2.1734,
            latitude_delta: 0.0922,
            longitude_delta: 0.0421,
        }
    }
}

impl Region {
    /// Fits the viewport around every finite marker coordinate, padded on
    /// each axis and never smaller than the default spans. Falls back to
    /// the default region when no POI carries finite coordinates.
    ///
    /// Non-finite coordinates (NaN from unvalidated input) are ignored.
    pub fn fit(pois: &[Poi]) -> Self {
        let coords: Vec<Coordinates> = pois
            .iter()
            .filter_map(|p| p.coordinates)
            .filter(|c| c.latitude.is_finite() && c.longitude.is_finite())
            .collect();

        let Some(first) = coords.first().copied() else {
            return Self::default();
        };

        let mut min_lat = first.latitude;
        let mut max_lat = first.latitude;
        let mut min_lon = first.longitude;
        let mut max_lon = first.longitude;
        for c in &coords[1..] {
            min_lat = min_lat.min(c.latitude);
            max_lat = max_lat.max(c.latitude);
            min_lon = min_lon.min(c.longitude);
            max_lon = max_lon.max(c.longitude);
        }

        let default = Self::default();
        Self {
            latitude: (min_lat + max_lat) / 2.0,
            longitude: (min_lon + max_lon) / 2.0,
            latitude_delta: ((max_lat - min_lat) * FIT_PADDING).max(default.latitude_delta),
            longitude_delta: ((max_lon - min_lon) * FIT_PADDING).max(default.longitude_delta),
        }
    }

    /// Canvas x bounds: the visible longitude span.
    pub fn x_bounds(&self) -> [f64; 2] {
        [
            self.longitude - self.longitude_delta / 2.0,
            self.longitude + self.longitude_delta / 2.0,
        ]
    }

    /// Canvas y bounds: the visible latitude span.
    pub fn y_bounds(&self) -> [f64; 2] {
        [
            self.latitude - self.latitude_delta / 2.0,
            self.latitude + self.latitude_delta / 2.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi_at(id: &str, latitude: f64, longitude: f64) -> Poi {
        Poi {
            id: id.into(),
            name: format!("poi {id}"),
            description: String::new(),
            coordinates: Some(Coordinates {
                latitude,
                longitude,
            }),
            image: PLACEHOLDER_IMAGE.into(),
        }
    }

    #[test]
    fn empty_image_defaults_to_placeholder() {
        let new = NewPoi::new("Cafe".into(), "Corner cafe".into(), 41.40, 2.17, String::new());
        assert_eq!(new.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn explicit_image_kept_verbatim() {
        let new = NewPoi::new(
            "Cafe".into(),
            "Corner cafe".into(),
            41.40,
            2.17,
            "http://x/y.png".into(),
        );
        assert_eq!(new.image, "http://x/y.png");
    }

    #[test]
    fn into_poi_carries_fields_and_assigned_id() {
        let poi = NewPoi::new("Cafe".into(), "Corner cafe".into(), 41.40, 2.17, String::new())
            .into_poi("abc123".into());

        assert_eq!(poi.id, "abc123");
        assert_eq!(poi.name, "Cafe");
        assert_eq!(poi.description, "Corner cafe");
        assert_eq!(
            poi.coordinates,
            Some(Coordinates {
                latitude: 41.40,
                longitude: 2.17,
            })
        );
        assert_eq!(poi.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn fit_of_nothing_is_the_default_region() {
        assert_eq!(Region::fit(&[]), Region::default());

        let mut no_coords = poi_at("a", 0.0, 0.0);
        no_coords.coordinates = None;
        assert_eq!(Region::fit(&[no_coords]), Region::default());
    }

    #[test]
    fn fit_centers_a_single_marker_at_default_spans() {
        let region = Region::fit(&[poi_at("a", 48.8566, 2.3522)]);

        assert!((region.latitude - 48.8566).abs() < 1e-9);
        assert!((region.longitude - 2.3522).abs() < 1e-9);
        assert!((region.latitude_delta - Region::default().latitude_delta).abs() < 1e-9);
        assert!((region.longitude_delta - Region::default().longitude_delta).abs() < 1e-9);
    }

    #[test]
    fn fit_contains_every_marker() {
        let pois = vec![
            poi_at("a", 41.38, 2.17),
            poi_at("b", 41.40, 2.20),
            poi_at("c", 41.35, 2.10),
        ];
        let region = Region::fit(&pois);
        let [min_lon, max_lon] = region.x_bounds();
        let [min_lat, max_lat] = region.y_bounds();

        for poi in &pois {
            let c = poi.coordinates.unwrap();
            assert!(c.longitude >= min_lon && c.longitude <= max_lon);
            assert!(c.latitude >= min_lat && c.latitude <= max_lat);
        }
    }

    #[test]
    fn fit_ignores_non_finite_coordinates() {
        let pois = vec![poi_at("a", 41.38, 2.17), poi_at("nan", f64::NAN, f64::NAN)];
        let region = Region::fit(&pois);

        assert!((region.latitude - 41.38).abs() < 1e-9);
        assert!((region.longitude - 2.17).abs() < 1e-9);
    }
}
