// ABOUTME: Shared utility functions for Stockroom
// ABOUTME: Entity id generation used by all storage layers

use uuid::Uuid;

/// Generate a unique entity id for database rows
pub fn generate_entity_id() -> String {
    Uuid::new_v4().to_string()
}
