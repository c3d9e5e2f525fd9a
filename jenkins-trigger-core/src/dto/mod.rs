//! Data Transfer Objects (DTOs)
//!
//! Shapes of the Jenkins JSON API responses read by the client. Only the
//! fields the action needs are declared; everything else is ignored.

pub mod build;
pub mod crumb;
pub mod queue;
