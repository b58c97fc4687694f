use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::server::model::MenuItemId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: u32,
    pub category: String,
    pub available: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewMenuItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: u32,
    pub category: String,
}

/// Fields left as `None` are kept as they are.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MenuItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u32>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetMenuResponse {
    pub result_code: Option<String>,
    pub categories: BTreeMap<String, Vec<MenuItem>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MenuItemResponse {
    pub result_code: Option<String>,
    pub item: MenuItem,
}
