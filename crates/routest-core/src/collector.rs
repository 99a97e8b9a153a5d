//! Flattening the project tree into a scenario collection

use crate::node::{Application, Scenario};

/// Every scenario of every route: routes in discovery order, scenarios in
/// the order their manifest lists them.
///
/// The collection is rebuilt on each call and borrows from `app`.
pub fn collect(app: &Application) -> Vec<&Scenario> {
    let scenarios: Vec<&Scenario> = app
        .routes
        .iter()
        .flat_map(|route| route.scenarios.iter())
        .collect();
    tracing::trace!(
        routes = app.routes.len(),
        scenarios = scenarios.len(),
        "Collected scenarios"
    );
    scenarios
}
