pub mod bounds;
pub mod projector;

pub use bounds::{bounding_box, GeoBounds};
pub use projector::{
    field_polygon_ring, local_ring_to_lng_lat, local_to_lng_lat, meters_per_deg_lng, LngLat,
    METERS_PER_DEG_LAT,
};
