//! Remote persistence for points of interest.
//!
//! One document per POI in a single collection:
//!
//! ```text
//! { "_id": ObjectId("..."),
//!   "name": "Sagrada Familia",
//!   "description": "Basilica by Gaudi",
//!   "coordinates": { "type": "Point", "coordinates": [2.1744, 41.4036] },
//!   "image": "https://via.placeholder.com/150" }
//! ```
//!
//! The client is a lazy connection handle: constructing the store parses
//! the connection string, and I/O happens at the first operation.

use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::model::{Coordinates, NewPoi, Poi};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("insert did not return an object id")]
    MissingInsertId,
}

pub type Result<T> = core::result::Result<T, StoreError>;

/// Handle to the remote POI collection.
///
/// Cheap to clone; the driver pools connections internally.
#[derive(Clone)]
pub struct PoiStore {
    pois: Collection<PoiDocument>,
}

impl PoiStore {
    /// Opens a handle to the collection named by the config.
    ///
    /// The connection string is validated here; connections are
    /// established lazily by the driver on first use.
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        let pois = client
            .database(&config.database)
            .collection(&config.collection);
        Ok(Self { pois })
    }

    /// Lists every POI in the collection, in natural order.
    #[tracing::instrument(skip(self))]
    pub async fn list_pois(&self) -> Result<Vec<Poi>> {
        let mut cursor = self.pois.find(doc! {}).await?;
        let mut pois = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            pois.push(document.into_poi());
        }
        tracing::debug!(count = pois.len(), "fetched pois");
        Ok(pois)
    }

    /// Inserts a new POI and returns the identifier the store assigned.
    #[tracing::instrument(skip(self, new))]
    pub async fn insert_poi(&self, new: &NewPoi) -> Result<String> {
        let result = self.pois.insert_one(PoiDocument::from_new(new)).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or(StoreError::MissingInsertId)?;
        tracing::debug!(id = %id, "inserted poi");
        Ok(id.to_hex())
    }
}

/// The failure policy for the mount-time list: log and yield an empty
/// list, so no error value ever reaches the UI layer. No retry.
pub fn pois_or_empty(result: Result<Vec<Poi>>) -> Vec<Poi> {
    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to fetch pois");
        Vec::new()
    })
}

/// Wire form of a POI document.
///
/// Read tolerantly: a document missing a string field maps to an empty
/// string, and a missing point maps to no coordinates.
#[derive(Debug, Serialize, Deserialize)]
struct PoiDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,

    #[serde(default)]
    name: String,

    #[serde(default)]
    description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    coordinates: Option<GeoPoint>,

    #[serde(default)]
    image: String,
}

impl PoiDocument {
    /// The document to insert: no id (the store assigns one), and the
    /// numeric pair packed into a geographic point.
    fn from_new(new: &NewPoi) -> Self {
        Self {
            id: None,
            name: new.name.clone(),
            description: new.description.clone(),
            coordinates: Some(GeoPoint::from(Coordinates {
                latitude: new.latitude,
                longitude: new.longitude,
            })),
            image: new.image.clone(),
        }
    }

    /// Unpacks a stored document into the domain record.
    fn into_poi(self) -> Poi {
        Poi {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: self.name,
            description: self.description,
            coordinates: self.coordinates.map(Coordinates::from),
            image: self.image,
        }
    }
}

/// A GeoJSON point. `coordinates` is `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "type")]
enum GeoPoint {
    Point { coordinates: [f64; 2] },
}

impl From<Coordinates> for GeoPoint {
    fn from(c: Coordinates) -> Self {
        GeoPoint::Point {
            coordinates: [c.longitude, c.latitude],
        }
    }
}

impl From<GeoPoint> for Coordinates {
    fn from(point: GeoPoint) -> Self {
        let GeoPoint::Point {
            coordinates: [longitude, latitude],
        } = point;
        Self {
            latitude,
            longitude,
        }
    }
}
