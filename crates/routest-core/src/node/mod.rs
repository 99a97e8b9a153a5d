//! Typed application, route and scenario nodes
//!
//! Each document kind has a record type with one [`Property`] field per
//! property its schema may declare. Records are built with
//! [`ConfigRecord::from_validated`] and then wrapped in the node that places
//! them in the project tree:
//!
//! ```text
//! Application ─┬─ Route ─┬─ Scenario
//!              │         └─ Scenario
//!              └─ Route ─── Scenario
//! ```
//!
//! Nodes own their children. A child only remembers its parent's source
//! path, for diagnostics.

mod application;
mod parameters;
mod property;
mod record;
mod route;
mod scenario;

pub use application::{Application, ApplicationConfig};
pub use parameters::{CapturedResponse, Meta, Parameter, Parameters};
pub use property::Property;
pub use record::ConfigRecord;
pub use route::{Route, RouteConfig};
pub use scenario::{Scenario, ScenarioConfig};
