use common::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A (user, item) bookmark; unique per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Favorite {
    pub uid: UserId,
    pub item_id: Uuid,
}
