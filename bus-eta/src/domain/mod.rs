//! Domain types for the bus ETA client.
//!
//! This module contains the core domain model types that represent
//! validated transit data. Identifier types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod arrival;
mod direction;
mod route;
mod stop;
mod text;

pub use arrival::{ArrivalDisplay, ArrivalEstimate};
pub use direction::{Direction, InvalidDirection};
pub use route::{InvalidRouteCode, Route, RouteCode};
pub use stop::{Coordinates, EnrichedStop, InvalidStopId, RouteStop, StopDetails, StopId};
pub use text::BilingualText;
