//! City reference data: the read-only directory trucks and loads refer to.
//!
//! Cities come either from in-memory records or from a CSV table laid out like
//! the public US cities dataset (`id`, `city`, `state_name`, `lat`, `lng`,
//! `population`; other columns are ignored). Coordinates are validated once,
//! here, so the rest of the simulation can treat them as trusted.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::ecs::CityId;
use crate::error::CityDataError;
use crate::spatial::{validate_coordinates, GeoPoint};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    /// State or province name.
    pub region: String,
    pub location: GeoPoint,
    pub population: u64,
}

/// One row of the city table as it appears on disk.
#[derive(Debug, Deserialize)]
struct CityRow {
    id: u64,
    city: String,
    state_name: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    population: Option<f64>,
}

/// Population-filtered, id-ordered set of cities.
#[derive(Debug, Clone, Default, Resource)]
pub struct CityDirectory {
    cities: BTreeMap<CityId, City>,
    min_population: u64,
}

impl CityDirectory {
    /// Builds a directory keeping only cities with `population > min_population`.
    ///
    /// Ids must be unique across every input row. Coordinates are only checked
    /// for cities that pass the filter.
    pub fn from_cities(
        cities: impl IntoIterator<Item = City>,
        min_population: u64,
    ) -> Result<Self, CityDataError> {
        let mut seen = BTreeSet::new();
        let mut map = BTreeMap::new();
        for city in cities {
            if !seen.insert(city.id) {
                return Err(CityDataError::DuplicateId(city.id.0));
            }
            if city.population <= min_population {
                continue;
            }
            validate_coordinates(city.location.lat, city.location.lng).map_err(|source| {
                CityDataError::InvalidCoordinates {
                    id: city.id.0,
                    name: city.name.clone(),
                    source,
                }
            })?;
            map.insert(city.id, city);
        }
        Ok(Self {
            cities: map,
            min_population,
        })
    }

    /// Reads a CSV city table with headers and applies the population filter.
    pub fn from_csv_reader<R: Read>(reader: R, min_population: u64) -> Result<Self, CityDataError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut cities = Vec::new();
        for row in rdr.deserialize::<CityRow>() {
            let row = row?;
            cities.push(City {
                id: CityId(row.id),
                name: row.city,
                region: row.state_name,
                location: GeoPoint::new(row.lat, row.lng),
                population: row.population.unwrap_or(0.0).max(0.0) as u64,
            });
        }
        Self::from_cities(cities, min_population)
    }

    pub fn from_csv_path(
        path: impl AsRef<std::path::Path>,
        min_population: u64,
    ) -> Result<Self, CityDataError> {
        let file = std::fs::File::open(path).map_err(|e| CityDataError::Csv(e.into()))?;
        Self::from_csv_reader(file, min_population)
    }

    pub fn lookup(&self, id: CityId) -> Option<&City> {
        self.cities.get(&id)
    }

    pub fn location(&self, id: CityId) -> Option<GeoPoint> {
        self.lookup(id).map(|c| c.location)
    }

    /// Cities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    pub fn ids(&self) -> Vec<CityId> {
        self.cities.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn min_population(&self) -> u64 {
        self.min_population
    }

    /// `"Name, Region"` label used in log lines.
    pub fn label(&self, id: CityId) -> String {
        match self.lookup(id) {
            Some(city) => format!("{}, {}", city.name, city.region),
            None => format!("city #{id}"),
        }
    }
}
