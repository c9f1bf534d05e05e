// Module layout (Clean Architecture style)
// - bootstrap: configuration and the service container
// - infrastructure: Postgres pool, migrations and sqlx repositories
// - presentation: HTTP handlers, auth extractor and routing
// - application: ports, use cases, import normalization
// - domain: core models and points rules

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
