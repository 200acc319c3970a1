// rest_api/src/handlers/mod.rs

pub mod billing;
pub mod dashboard;
pub mod patients;
pub mod reports;
pub mod services;
pub mod visits;

use models::{ClinicError, ClinicResult};
use uuid::Uuid;

/// Validates a path/payload identifier before any storage call. Mirrors the
/// API's "Invalid {entity} ID format" message.
pub(crate) fn parse_entity_id(entity: &str, raw: &str) -> ClinicResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ClinicError::invalid_id(entity))
}
