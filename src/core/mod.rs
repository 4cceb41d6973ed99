// Core algorithm exports
pub mod distance;
pub mod geodesic;
pub mod matcher;

pub use distance::{haversine_distance_feet, meters_to_feet, EARTH_RADIUS_FT, FEET_PER_METER};
pub use geodesic::{vincenty_inverse, GeodesicError, GeodesicSolver, DEFAULT_MAX_ITERATIONS};
pub use matcher::{ColumnKeys, MatchError, NearestMatcher, RecordSide, DEFAULT_MAX_DISTANCE_FT};
