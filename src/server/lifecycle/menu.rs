//! Menu catalogue and the price list orders are totalled against.

use std::collections::{BTreeMap, HashMap};
use serde::{Deserialize, Serialize};
use crate::server::lifecycle::error::{Invalid, LifecycleError};
use crate::server::model::item::{MenuItem, MenuItemPatch, NewMenuItem};
use crate::server::model::MenuItemId;

/// Read-only view of unit prices used when pricing order lines.
pub(crate) trait PriceList {
    fn unit_price(&self, id: &str) -> Option<u32>;

    fn is_available(&self, _id: &str) -> bool {
        true
    }
}

impl PriceList for HashMap<String, u32> {
    fn unit_price(&self, id: &str) -> Option<u32> {
        self.get(id).copied()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Menu {
    items: BTreeMap<MenuItemId, MenuItem>,
}

impl PriceList for Menu {
    fn unit_price(&self, id: &str) -> Option<u32> {
        self.items.get(id).map(|item| item.price)
    }

    fn is_available(&self, id: &str) -> bool {
        self.items.get(id).is_some_and(|item| item.available)
    }
}

impl Menu {
    /// The house menu the service starts with.
    pub fn sample() -> Self {
        let mut menu = Self::default();
        let seed = [
            ("Butter Chicken", "Chicken in a tomato and butter gravy", 350, "Main Course"),
            ("Paneer Butter Masala", "Cottage cheese in a rich tomato gravy", 300, "Main Course"),
            ("Biryani", "Layered rice with spices and meat", 320, "Rice"),
            ("Pulao", "Mildly spiced vegetable rice", 220, "Rice"),
            ("Masala Dosa", "Rice crepe filled with spiced potato", 180, "South Indian"),
            ("Vada", "Fried lentil doughnuts with chutney", 120, "South Indian"),
            ("Naan", "Leavened flatbread from the tandoor", 50, "Breads"),
            ("Garlic Naan", "Naan brushed with garlic butter", 70, "Breads"),
            ("Coffee", "Filter coffee", 80, "Beverages"),
        ];
        for (name, description, price, category) in seed {
            menu.items.insert(slug(name), MenuItem {
                id: slug(name),
                name: name.to_string(),
                description: description.to_string(),
                price,
                category: category.to_string(),
                available: true,
            });
        }
        menu
    }

    pub fn get(&self, id: &str) -> Result<&MenuItem, LifecycleError> {
        self.items.get(id).ok_or_else(|| LifecycleError::menu_item_not_found(id))
    }

    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.values()
    }

    /// Available items grouped by category.
    pub fn by_category(&self) -> BTreeMap<String, Vec<MenuItem>> {
        let mut categories: BTreeMap<String, Vec<MenuItem>> = BTreeMap::new();
        for item in self.items.values().filter(|item| item.available) {
            categories.entry(item.category.clone()).or_default().push(item.clone());
        }
        categories
    }

    pub fn add(&mut self, new: NewMenuItem) -> Result<MenuItem, LifecycleError> {
        let id = slug(&new.name);
        if id.is_empty() {
            return Err(LifecycleError::invalid(Invalid::BlankName));
        }
        if new.price == 0 {
            return Err(LifecycleError::invalid(Invalid::ZeroPrice));
        }
        if self.items.contains_key(&id) {
            return Err(LifecycleError::invalid(Invalid::DuplicateMenuItem { id }));
        }
        let item = MenuItem {
            id: id.clone(),
            name: new.name.trim().to_string(),
            description: new.description,
            price: new.price,
            category: new.category,
            available: true,
        };
        self.items.insert(id, item.clone());
        Ok(item)
    }

    /// Applies the patch in place; the id stays the same even if the name changes.
    pub fn update(&mut self, id: &str, patch: MenuItemPatch) -> Result<MenuItem, LifecycleError> {
        if patch.price == Some(0) {
            return Err(LifecycleError::invalid(Invalid::ZeroPrice));
        }
        if patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(LifecycleError::invalid(Invalid::BlankName));
        }
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| LifecycleError::menu_item_not_found(id))?;
        let MenuItemPatch { name, description, price, category, available } = patch;
        if let Some(name) = name {
            item.name = name.trim().to_string();
        }
        if let Some(description) = description {
            item.description = description;
        }
        if let Some(price) = price {
            item.price = price;
        }
        if let Some(category) = category {
            item.category = category;
        }
        if let Some(available) = available {
            item.available = available;
        }
        Ok(item.clone())
    }
}

/// "Garlic Naan" -> "garlic_naan"
fn slug(name: &str) -> MenuItemId {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(name: &str, price: u32) -> NewMenuItem {
        NewMenuItem {
            name: name.to_string(),
            description: String::new(),
            price,
            category: "Desserts".to_string(),
        }
    }

    #[test]
    fn slugs() {
        assert_eq!(slug("Garlic Naan"), "garlic_naan");
        assert_eq!(slug("  Paneer -- Butter Masala "), "paneer_butter_masala");
        assert_eq!(slug("!!"), "");
    }

    #[test]
    fn sample_prices() {
        let menu = Menu::sample();
        assert_eq!(menu.unit_price("naan"), Some(50));
        assert_eq!(menu.unit_price("butter_chicken"), Some(350));
        assert_eq!(menu.unit_price("kulfi"), None);
        assert!(menu.is_available("coffee"));
        assert!(!menu.is_available("kulfi"));
    }

    #[test]
    fn add_rejects_duplicates_and_bad_input() {
        let mut menu = Menu::sample();
        let kulfi = menu.add(new_item("Kulfi", 90)).unwrap();
        assert_eq!(kulfi.id, "kulfi");
        assert_eq!(menu.unit_price("kulfi"), Some(90));

        assert_eq!(
            menu.add(new_item("kulfi", 95)),
            Err(LifecycleError::invalid(Invalid::DuplicateMenuItem { id: "kulfi".to_string() }))
        );
        assert_eq!(menu.add(new_item("Gulab Jamun", 0)), Err(LifecycleError::invalid(Invalid::ZeroPrice)));
        assert_eq!(menu.add(new_item(" ", 10)), Err(LifecycleError::invalid(Invalid::BlankName)));
    }

    #[test]
    fn unavailable_items_leave_the_category_view() {
        let mut menu = Menu::sample();
        let patch = MenuItemPatch { available: Some(false), price: Some(60), ..Default::default() };
        let naan = menu.update("naan", patch).unwrap();
        assert_eq!(naan.price, 60);
        assert!(!menu.is_available("naan"));

        let categories = menu.by_category();
        let breads = &categories["Breads"];
        assert_eq!(breads.len(), 1);
        assert_eq!(breads[0].id, "garlic_naan");
        assert_eq!(menu.items().count(), 9);
    }

    #[test]
    fn update_unknown_item() {
        let mut menu = Menu::sample();
        assert_eq!(
            menu.update("kulfi", MenuItemPatch::default()),
            Err(LifecycleError::menu_item_not_found("kulfi"))
        );
    }
}
