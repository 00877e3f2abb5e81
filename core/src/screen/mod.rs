pub mod bounds;
pub mod mapper;

pub use bounds::WorldBounds;
pub use mapper::{ScreenMapper, ScreenPoint};
