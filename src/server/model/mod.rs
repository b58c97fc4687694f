pub(crate) mod config;
pub(crate) mod item;
pub(crate) mod order;
pub(crate) mod table;

pub(crate) type OrderId = u64;
pub(crate) type TableId = u16;
pub(crate) type MenuItemId = String;
