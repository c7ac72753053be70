pub mod coordinates;
pub mod poi;
pub mod route;

pub use coordinates::{path_distance_km, Coordinates};
pub use poi::{CategoryFilter, HeritageTier, Poi};
pub use route::{AssembledRoute, Place, ScenicRouteRequest, ScenicRouteResponse, Stop, Tour};
