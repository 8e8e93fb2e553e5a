// Application layer: HTTP routes and server wiring.

pub mod routes;
pub mod server;
