//! HTTP surface for the student performance service.
//!
//! Exposes the prediction core and the tutoring endpoints under `/api`, with a
//! consistent JSON envelope, permissive CORS for the browser frontend, and
//! request logging.

pub mod middleware;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
