use std::fmt;
use thiserror::Error;

use crate::core::distance::haversine_distance_feet;
use crate::models::{FieldError, GeoPoint, MatchedPair, Record};

/// Default match radius in feet
pub const DEFAULT_MAX_DISTANCE_FT: f64 = 15.0;

/// Which input set a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSide {
    Base,
    Comparison,
}

impl fmt::Display for RecordSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSide::Base => write!(f, "base"),
            RecordSide::Comparison => write!(f, "comparison"),
        }
    }
}

/// Errors that abort a matching run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("{side} record {index}: {source}")]
    Field {
        side: RecordSide,
        index: usize,
        #[source]
        source: FieldError,
    },
}

/// Attribute keys holding latitude/longitude in each record set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnKeys {
    pub base_lat: String,
    pub base_lon: String,
    pub target_lat: String,
    pub target_lon: String,
}

impl Default for ColumnKeys {
    fn default() -> Self {
        Self {
            base_lat: "lat".to_string(),
            base_lon: "lon".to_string(),
            target_lat: "lat".to_string(),
            target_lon: "lon".to_string(),
        }
    }
}

/// Brute-force nearest-point matcher
///
/// Every base record is compared against every comparison record using the
/// Haversine distance. The closest candidate within `max_distance_ft` wins;
/// on an exact tie the first candidate seen is kept.
#[derive(Debug, Clone, Copy)]
pub struct NearestMatcher {
    max_distance_ft: f64,
}

impl NearestMatcher {
    pub fn new(max_distance_ft: f64) -> Self {
        Self { max_distance_ft }
    }

    pub fn max_distance_ft(&self) -> f64 {
        self.max_distance_ft
    }

    /// Pair each base record with its closest comparison record
    ///
    /// # Arguments
    /// * `base` - Records to find a counterpart for
    /// * `comparison` - Candidate records
    /// * `keys` - Coordinate attribute names for both sets
    ///
    /// # Returns
    /// One MatchedPair per base record, in input order. Fails on the first
    /// record whose coordinates cannot be read.
    pub fn find_closest<'a>(
        &self,
        base: &'a [Record],
        comparison: &'a [Record],
        keys: &ColumnKeys,
    ) -> Result<Vec<MatchedPair<'a>>, MatchError> {
        if base.is_empty() {
            return Ok(Vec::new());
        }

        let candidates: Vec<(&Record, GeoPoint)> = comparison
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .point(&keys.target_lat, &keys.target_lon)
                    .map(|point| (record, point))
                    .map_err(|source| MatchError::Field {
                        side: RecordSide::Comparison,
                        index,
                        source,
                    })
            })
            .collect::<Result<_, _>>()?;

        base.iter()
            .enumerate()
            .map(|(index, record)| {
                let origin = record
                    .point(&keys.base_lat, &keys.base_lon)
                    .map_err(|source| MatchError::Field {
                        side: RecordSide::Base,
                        index,
                        source,
                    })?;

                Ok(self.closest_to(record, origin, &candidates))
            })
            .collect()
    }

    fn closest_to<'a>(
        &self,
        record: &'a Record,
        origin: GeoPoint,
        candidates: &[(&'a Record, GeoPoint)],
    ) -> MatchedPair<'a> {
        let mut best: Option<(&'a Record, f64)> = None;
        let mut min_distance = f64::MAX;

        for &(candidate, point) in candidates {
            let distance = haversine_distance_feet(
                origin.latitude,
                origin.longitude,
                point.latitude,
                point.longitude,
            );

            if distance <= self.max_distance_ft && distance < min_distance {
                min_distance = distance;
                best = Some((candidate, distance));
            }
        }

        MatchedPair {
            base_record: record,
            closest_comparison: best.map(|(candidate, _)| candidate),
            distance_in_feet: best.map(|(_, distance)| distance),
        }
    }
}

impl Default for NearestMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE_FT)
    }
}
