use derive_more::Display;
use serde::{Deserialize, Serialize};
use crate::server::model::{OrderId, TableId};

#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Location {
    #[display("window")]
    Window,
    #[default]
    #[display("center")]
    Center,
    #[display("corner")]
    Corner,
    #[display("outdoor")]
    Outdoor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Table {
    pub id: TableId,
    pub capacity: u8,
    pub location: Location,
    pub occupied: bool,
    pub guests: Option<u8>,
    pub active_order_id: Option<OrderId>, // only an occupied table can have an active order
}

impl Table {
    pub fn new(id: TableId, capacity: u8, location: Location) -> Self {
        Self {
            id,
            capacity,
            location,
            occupied: false,
            guests: None,
            active_order_id: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostTablesRequest {
    pub capacity: u8,
    #[serde(default)]
    pub location: Location,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PatchTableRequest {
    pub customer_count: u8,
}

#[derive(Debug, Serialize)]
pub(crate) struct TableResponse {
    pub result_code: Option<String>,
    pub table: Table,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetTablesResponse {
    pub result_code: Option<String>,
    pub tables: Option<Vec<Table>>,
}
