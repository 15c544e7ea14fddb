//! Customer orders.

use common::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::validate::{Validate, require};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    New,
    Processing,
    Shipped,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: Uuid,
    pub quantity: u32,
    /// Unit price at the time of ordering, in minor units.
    #[serde(default)]
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: u64,
    /// Owner; set server-side from the caller identity.
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub fio: String,
    pub tel: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub lines: Vec<OrderLine>,
}

impl Validate for Order {
    fn validate(&self) -> Result<(), CatalogError> {
        require(&self.fio, "fio")?;
        require(&self.tel, "tel")?;
        if !self.email.contains('@') {
            return Err(CatalogError::validation("email is invalid"));
        }
        if self.lines.is_empty() {
            return Err(CatalogError::validation("order has no items"));
        }
        if self.lines.iter().any(|line| line.quantity == 0) {
            return Err(CatalogError::validation("quantity must be positive"));
        }
        Ok(())
    }
}
