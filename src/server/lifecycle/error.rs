use derive_more::{Display, Error};
use crate::server::lifecycle::status::OrderStatus;
use crate::server::model::{MenuItemId, OrderId, TableId};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entity {
    #[display("order")]
    Order,
    #[display("table")]
    Table,
    #[display("menu item")]
    MenuItem,
}

/// Why an input was rejected before anything was mutated.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub(crate) enum Invalid {
    #[display("no table selected")]
    NoTable,
    #[display("table {table_id} already has an active order")]
    TableBusy { table_id: TableId },
    #[display("table {table_id} is already occupied")]
    TableOccupied { table_id: TableId },
    #[display("at least one guest is required")]
    NoGuests,
    #[display("table capacity must be positive")]
    ZeroCapacity,
    #[display("no table id left to assign")]
    TooManyTables,
    #[display("order has no items")]
    NoItems,
    #[display("unknown menu item {id}")]
    UnknownMenuItem { id: MenuItemId },
    #[display("menu item {id} is not available")]
    Unavailable { id: MenuItemId },
    #[display("quantity of {id} must be at least 1")]
    ZeroQuantity { id: MenuItemId },
    #[display("menu item {id} already exists")]
    DuplicateMenuItem { id: MenuItemId },
    #[display("menu item name must not be blank")]
    BlankName,
    #[display("price must be positive")]
    ZeroPrice,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub(crate) enum LifecycleError {
    #[display("invalid request: {reason}")]
    Validation { reason: Invalid },
    #[display("{entity} {id} not found")]
    NotFound { entity: Entity, id: String },
    #[display("order {id} cannot move on from {from}")]
    InvalidTransition { id: OrderId, from: OrderStatus },
    #[display("order {id} is already settled")]
    Closed { id: OrderId },
}

impl LifecycleError {
    pub fn invalid(reason: Invalid) -> Self {
        Self::Validation { reason }
    }

    pub fn order_not_found(id: OrderId) -> Self {
        Self::NotFound { entity: Entity::Order, id: id.to_string() }
    }

    pub fn table_not_found(id: TableId) -> Self {
        Self::NotFound { entity: Entity::Table, id: id.to_string() }
    }

    pub fn menu_item_not_found(id: &str) -> Self {
        Self::NotFound { entity: Entity::MenuItem, id: id.to_string() }
    }
}
