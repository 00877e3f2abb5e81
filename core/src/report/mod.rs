pub mod payload;

pub use payload::{
    BuildingFacade, CalculationPoint, Direction, FieldDimensions, GeoCenter, LightPoint,
    ReportPayload,
};
