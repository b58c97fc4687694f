use serde::{Deserialize, Serialize};
use crate::server::lifecycle::status::OrderStatus;
use crate::server::model::{MenuItemId, OrderId, TableId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Order {
    pub id: OrderId,
    pub table_id: TableId,
    pub status: OrderStatus,
    pub items: Vec<OrderLine>,
    pub notes: Option<String>,
    pub server_name: Option<String>,
    pub total: u64,
    pub created_at: String,
    pub updated_at: String,
    pub settled_at: Option<String>, // only paid orders are settled
}

impl Order {
    pub(crate) fn recompute_total(&mut self) {
        self.total = self.items.iter().map(OrderLine::subtotal).sum();
    }

    pub fn is_settled(&self) -> bool {
        self.settled_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct OrderLine {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    /// price quoted when the line was added
    pub unit_price: u32,
    pub special_instructions: Option<String>,
}

impl OrderLine {
    pub fn subtotal(&self) -> u64 {
        u64::from(self.unit_price) * u64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LineRequest {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    pub special_instructions: Option<String>,
}

#[cfg(test)]
impl LineRequest {
    pub fn new(menu_item_id: &str, quantity: u32) -> Self {
        Self {
            menu_item_id: menu_item_id.to_string(),
            quantity,
            special_instructions: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NewOrder {
    pub table_id: Option<TableId>,
    #[serde(default)]
    pub items: Vec<LineRequest>,
    pub notes: Option<String>,
    pub server_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub table_id: Option<TableId>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OrderResponse {
    pub result_code: Option<String>,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetOrdersResponse {
    pub result_code: Option<String>,
    pub orders: Vec<Order>,
}

/// Open orders per status plus what has been paid so far.
#[derive(Debug, Default, PartialEq, Serialize)]
pub(crate) struct Summary {
    pub pending: usize,
    pub preparing: usize,
    pub ready: usize,
    pub delivered: usize,
    pub settled: usize,
    pub revenue: u64,
}

impl Summary {
    pub(crate) fn count(&mut self, status: OrderStatus) {
        match status {
            OrderStatus::Pending => self.pending += 1,
            OrderStatus::Preparing => self.preparing += 1,
            OrderStatus::Ready => self.ready += 1,
            OrderStatus::Delivered => self.delivered += 1,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetSummaryResponse {
    pub result_code: Option<String>,
    pub summary: Summary,
}
