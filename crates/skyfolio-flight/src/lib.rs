//! Free-flight mode: a kinematic plane steered by held keys, with a chase
//! camera fixed in the plane's own frame.

mod integrator;

pub use integrator::{FlightConfig, FlightIntegrator, FlightState, LOCAL_FORWARD, wrap_angle};
