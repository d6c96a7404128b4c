//! Entity trait: identity + the backend collection it lives in.

use crate::EntityId;

/// A backend-managed record reachable under `/<collection>[/:id]`.
pub trait Entity {
    /// Collection path segment (e.g. `"students"`).
    const COLLECTION: &'static str;

    /// Backend-assigned id; `None` until the record has been created.
    fn id(&self) -> Option<&EntityId>;

    /// Path of the whole collection, e.g. `/students`.
    fn collection_path() -> String {
        format!("/{}", Self::COLLECTION)
    }

    /// Path of a single record, e.g. `/students/7`.
    fn item_path(id: &EntityId) -> String {
        format!("/{}/{}", Self::COLLECTION, id)
    }
}
