//! Order and table registry.
//!
//! The registry is the only owner of order status and table occupancy. Callers
//! get copies back and never mutate records directly. Operations validate their
//! whole input before touching any record, so a rejected call leaves the
//! registry exactly as it was.

pub(crate) mod error;
pub(crate) mod menu;
pub(crate) mod status;

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::server::lifecycle::error::{Invalid, LifecycleError};
use crate::server::lifecycle::menu::PriceList;
use crate::server::lifecycle::status::{OrderStatus, WrapPolicy};
use crate::server::model::order::{LineRequest, NewOrder, Order, OrderFilter, OrderLine, Summary};
use crate::server::model::table::{Location, Table};
use crate::server::model::{OrderId, TableId};
use crate::server::util::time;

const FIRST_ORDER_ID: OrderId = 1001;
const DEFAULT_TABLE_CAPACITY: u8 = 4;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OrderLifecycle {
    orders: BTreeMap<OrderId, Order>,
    tables: BTreeMap<TableId, Table>,
    next_order_id: OrderId,
    #[serde(skip)] // taken from config on every start
    wrap_policy: WrapPolicy,
    revenue: u64,
}

impl OrderLifecycle {
    pub fn new(wrap_policy: WrapPolicy) -> Self {
        Self {
            orders: BTreeMap::new(),
            tables: BTreeMap::new(),
            next_order_id: FIRST_ORDER_ID,
            wrap_policy,
            revenue: 0,
        }
    }

    /// A registry with tables `1..=count`, all free and of default size.
    pub fn with_tables(wrap_policy: WrapPolicy, count: TableId) -> Self {
        let mut lifecycle = Self::new(wrap_policy);
        for id in 1..=count {
            lifecycle.tables.insert(id, Table::new(id, DEFAULT_TABLE_CAPACITY, Location::default()));
        }
        lifecycle
    }

    pub fn wrap_policy(&self) -> WrapPolicy {
        self.wrap_policy
    }

    pub fn set_wrap_policy(&mut self, wrap_policy: WrapPolicy) {
        self.wrap_policy = wrap_policy;
    }

    pub fn add_table(&mut self, capacity: u8, location: Location) -> Result<Table, LifecycleError> {
        if capacity == 0 {
            return Err(LifecycleError::invalid(Invalid::ZeroCapacity));
        }
        let id = match self.tables.keys().next_back() {
            Some(last) => last
                .checked_add(1)
                .ok_or_else(|| LifecycleError::invalid(Invalid::TooManyTables))?,
            None => 1,
        };
        let table = Table::new(id, capacity, location);
        self.tables.insert(id, table.clone());
        Ok(table)
    }

    pub fn table(&self, table_id: TableId) -> Result<Table, LifecycleError> {
        self.tables
            .get(&table_id)
            .cloned()
            .ok_or_else(|| LifecycleError::table_not_found(table_id))
    }

    pub fn tables(&self) -> Vec<Table> {
        self.tables.values().cloned().collect()
    }

    /// Occupy a free table before any order is placed.
    pub fn seat(&mut self, table_id: TableId, guests: u8) -> Result<Table, LifecycleError> {
        if guests == 0 {
            return Err(LifecycleError::invalid(Invalid::NoGuests));
        }
        let table = self
            .tables
            .get_mut(&table_id)
            .ok_or_else(|| LifecycleError::table_not_found(table_id))?;
        if table.occupied {
            return Err(LifecycleError::invalid(Invalid::TableOccupied { table_id }));
        }
        table.occupied = true;
        table.guests = Some(guests);
        Ok(table.clone())
    }

    pub fn create(&mut self, prices: &impl PriceList, new: NewOrder) -> Result<Order, LifecycleError> {
        let NewOrder { table_id, items, notes, server_name } = new;
        let table_id = table_id.ok_or_else(|| LifecycleError::invalid(Invalid::NoTable))?;
        let table = self
            .tables
            .get(&table_id)
            .ok_or_else(|| LifecycleError::table_not_found(table_id))?;
        if table.active_order_id.is_some() {
            return Err(LifecycleError::invalid(Invalid::TableBusy { table_id }));
        }
        if items.is_empty() {
            return Err(LifecycleError::invalid(Invalid::NoItems));
        }
        let lines = items
            .into_iter()
            .map(|line| quote(prices, line))
            .collect::<Result<Vec<_>, _>>()?;

        let id = self.next_order_id;
        let now = time::helper::timestamp();
        let mut order = Order {
            id,
            table_id,
            status: OrderStatus::Pending,
            items: lines,
            notes: notes.filter(|n| !n.trim().is_empty()),
            server_name,
            total: 0,
            created_at: now.clone(),
            updated_at: now,
            settled_at: None,
        };
        order.recompute_total();

        if let Some(table) = self.tables.get_mut(&table_id) {
            table.occupied = true;
            table.active_order_id = Some(id);
        }
        self.next_order_id += 1;
        self.orders.insert(id, order.clone());
        Ok(order)
    }

    pub fn get(&self, order_id: OrderId) -> Result<Order, LifecycleError> {
        self.orders
            .get(&order_id)
            .cloned()
            .ok_or_else(|| LifecycleError::order_not_found(order_id))
    }

    /// Moves the order exactly one step along the status cycle.
    pub fn advance(&mut self, order_id: OrderId) -> Result<Order, LifecycleError> {
        let policy = self.wrap_policy;
        let order = self.open_order_mut(order_id)?;
        let next = order
            .status
            .next(policy)
            .ok_or(LifecycleError::InvalidTransition { id: order_id, from: order.status })?;
        order.status = next;
        order.updated_at = time::helper::timestamp();
        Ok(order.clone())
    }

    /// Appends a line to an open order and reprices it.
    pub fn add_item(
        &mut self,
        prices: &impl PriceList,
        order_id: OrderId,
        line: LineRequest,
    ) -> Result<Order, LifecycleError> {
        self.open_order_mut(order_id)?;
        let line = quote(prices, line)?;
        let order = self.open_order_mut(order_id)?;
        order.items.push(line);
        order.recompute_total();
        order.updated_at = time::helper::timestamp();
        Ok(order.clone())
    }

    /// Marks a delivered order as paid and books its total.
    pub fn settle(&mut self, order_id: OrderId) -> Result<Order, LifecycleError> {
        let order = self.open_order_mut(order_id)?;
        if order.status != OrderStatus::Delivered {
            return Err(LifecycleError::InvalidTransition { id: order_id, from: order.status });
        }
        let now = time::helper::timestamp();
        order.settled_at = Some(now.clone());
        order.updated_at = now;
        let order = order.clone();
        self.revenue += order.total;
        Ok(order)
    }

    /// Frees the table. Its order, if any, stays in the registry untouched.
    pub fn clear_table(&mut self, table_id: TableId) -> Result<Table, LifecycleError> {
        let table = self
            .tables
            .get_mut(&table_id)
            .ok_or_else(|| LifecycleError::table_not_found(table_id))?;
        table.occupied = false;
        table.guests = None;
        table.active_order_id = None;
        Ok(table.clone())
    }

    pub fn orders(&self, filter: &OrderFilter) -> Vec<Order> {
        self.orders
            .values()
            .filter(|o| filter.status.map_or(true, |s| o.status == s))
            .filter(|o| filter.table_id.map_or(true, |t| o.table_id == t))
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary { revenue: self.revenue, ..Default::default() };
        for order in self.orders.values() {
            if order.is_settled() {
                summary.settled += 1;
            } else {
                summary.count(order.status);
            }
        }
        summary
    }

    fn open_order_mut(&mut self, order_id: OrderId) -> Result<&mut Order, LifecycleError> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| LifecycleError::order_not_found(order_id))?;
        if order.is_settled() {
            return Err(LifecycleError::Closed { id: order_id });
        }
        Ok(order)
    }
}

fn quote(prices: &impl PriceList, line: LineRequest) -> Result<OrderLine, LifecycleError> {
    let LineRequest { menu_item_id, quantity, special_instructions } = line;
    let unit_price = match prices.unit_price(&menu_item_id) {
        Some(price) => price,
        None => return Err(LifecycleError::invalid(Invalid::UnknownMenuItem { id: menu_item_id })),
    };
    if !prices.is_available(&menu_item_id) {
        return Err(LifecycleError::invalid(Invalid::Unavailable { id: menu_item_id }));
    }
    if quantity == 0 {
        return Err(LifecycleError::invalid(Invalid::ZeroQuantity { id: menu_item_id }));
    }
    Ok(OrderLine {
        menu_item_id,
        quantity,
        unit_price,
        special_instructions: special_instructions.filter(|s| !s.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use super::*;
    use crate::server::lifecycle::error::Entity;
    use crate::server::lifecycle::menu::Menu;
    use crate::server::model::item::MenuItemPatch;

    fn prices() -> HashMap<String, u32> {
        HashMap::from([
            ("naan".to_string(), 50),
            ("biryani".to_string(), 320),
            ("coffee".to_string(), 80),
        ])
    }

    fn order_for(table_id: TableId, items: Vec<LineRequest>) -> NewOrder {
        NewOrder { table_id: Some(table_id), items, ..Default::default() }
    }

    fn lifecycle() -> OrderLifecycle {
        OrderLifecycle::with_tables(WrapPolicy::Cycle, 9)
    }

    #[test]
    fn create_prices_the_order_and_binds_the_table() {
        let mut lc = lifecycle();
        let order = lc.create(&prices(), order_for(3, vec![LineRequest::new("naan", 2)])).unwrap();
        assert_eq!(order.id, FIRST_ORDER_ID);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, 100);
        assert_eq!(order.notes, None);

        let table = lc.table(3).unwrap();
        assert!(table.occupied);
        assert_eq!(table.active_order_id, Some(order.id));
    }

    #[test]
    fn total_sums_every_line() {
        let mut lc = lifecycle();
        let items = vec![
            LineRequest::new("naan", 3),
            LineRequest::new("biryani", 1),
            LineRequest::new("coffee", 2),
        ];
        let order = lc.create(&prices(), order_for(1, items)).unwrap();
        assert_eq!(order.total, 3 * 50 + 320 + 2 * 80);
        assert_eq!(order.items.len(), 3);
    }

    #[test]
    fn create_rejects_bad_input_without_side_effects() {
        let mut lc = lifecycle();
        let cases = [
            (NewOrder { items: vec![LineRequest::new("naan", 1)], ..Default::default() }, Invalid::NoTable),
            (order_for(2, vec![]), Invalid::NoItems),
            (
                order_for(2, vec![LineRequest::new("naan", 1), LineRequest::new("kulfi", 1)]),
                Invalid::UnknownMenuItem { id: "kulfi".to_string() },
            ),
            (
                order_for(2, vec![LineRequest::new("naan", 0)]),
                Invalid::ZeroQuantity { id: "naan".to_string() },
            ),
        ];
        for (new, reason) in cases {
            assert_eq!(lc.create(&prices(), new), Err(LifecycleError::invalid(reason)));
        }
        assert!(lc.orders(&OrderFilter::default()).is_empty());
        assert!(!lc.table(2).unwrap().occupied);

        // ids are only consumed by successful creations
        let order = lc.create(&prices(), order_for(2, vec![LineRequest::new("naan", 1)])).unwrap();
        assert_eq!(order.id, FIRST_ORDER_ID);
    }

    #[test]
    fn create_on_unknown_or_busy_table() {
        let mut lc = lifecycle();
        assert_eq!(
            lc.create(&prices(), order_for(42, vec![LineRequest::new("naan", 1)])),
            Err(LifecycleError::NotFound { entity: Entity::Table, id: "42".to_string() })
        );
        lc.create(&prices(), order_for(5, vec![LineRequest::new("naan", 1)])).unwrap();
        assert_eq!(
            lc.create(&prices(), order_for(5, vec![LineRequest::new("coffee", 1)])),
            Err(LifecycleError::invalid(Invalid::TableBusy { table_id: 5 }))
        );
    }

    #[test]
    fn create_on_seated_table() {
        let mut lc = lifecycle();
        lc.seat(4, 3).unwrap();
        let order = lc.create(&prices(), order_for(4, vec![LineRequest::new("naan", 1)])).unwrap();
        let table = lc.table(4).unwrap();
        assert_eq!(table.guests, Some(3));
        assert_eq!(table.active_order_id, Some(order.id));
    }

    #[test]
    fn unavailable_menu_items_are_rejected() {
        let mut menu = Menu::sample();
        menu.update("biryani", MenuItemPatch { available: Some(false), ..Default::default() }).unwrap();
        let mut lc = lifecycle();
        assert_eq!(
            lc.create(&menu, order_for(1, vec![LineRequest::new("biryani", 1)])),
            Err(LifecycleError::invalid(Invalid::Unavailable { id: "biryani".to_string() }))
        );
    }

    #[test]
    fn advance_walks_the_cycle() {
        let mut lc = lifecycle();
        let id = lc.create(&prices(), order_for(1, vec![LineRequest::new("naan", 1)])).unwrap().id;
        let seen = (0..4)
            .map(|_| lc.advance(id).unwrap().status)
            .collect::<Vec<_>>();
        assert_eq!(
            seen,
            vec![OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Delivered, OrderStatus::Pending]
        );
        assert_eq!(lc.get(id).unwrap().status, OrderStatus::Pending);
    }

    #[test]
    fn advance_stamps_updated_at() {
        time::helper::set_utc_now(0);
        let mut lc = lifecycle();
        let id = lc.create(&prices(), order_for(1, vec![LineRequest::new("naan", 1)])).unwrap().id;
        time::helper::set_utc_now(90);
        let order = lc.advance(id).unwrap();
        assert_eq!(order.created_at, "1970-01-01T00:00:00");
        assert_eq!(order.updated_at, "1970-01-01T00:01:30");
        time::helper::set_utc_now(0);
    }

    #[test]
    fn advance_leaves_other_orders_alone() {
        let mut lc = lifecycle();
        let first = lc.create(&prices(), order_for(1, vec![LineRequest::new("naan", 1)])).unwrap();
        let second = lc.create(&prices(), order_for(2, vec![LineRequest::new("naan", 1)])).unwrap();
        lc.advance(first.id).unwrap();
        assert_eq!(lc.get(second.id).unwrap(), second);
    }

    #[test]
    fn advance_unknown_order() {
        let mut lc = lifecycle();
        lc.create(&prices(), order_for(1, vec![LineRequest::new("naan", 1)])).unwrap();
        let before = lc.orders(&OrderFilter::default());
        assert_eq!(lc.advance(9999), Err(LifecycleError::order_not_found(9999)));
        assert_eq!(lc.get(9999), Err(LifecycleError::order_not_found(9999)));
        assert_eq!(lc.orders(&OrderFilter::default()), before);
    }

    #[test]
    fn halt_policy_keeps_delivered_orders() {
        let mut lc = OrderLifecycle::with_tables(WrapPolicy::Halt, 2);
        let id = lc.create(&prices(), order_for(1, vec![LineRequest::new("naan", 1)])).unwrap().id;
        for _ in 0..3 {
            lc.advance(id).unwrap();
        }
        assert_eq!(
            lc.advance(id),
            Err(LifecycleError::InvalidTransition { id, from: OrderStatus::Delivered })
        );
        assert_eq!(lc.get(id).unwrap().status, OrderStatus::Delivered);
    }

    #[test]
    fn clear_table_keeps_the_order() {
        let mut lc = lifecycle();
        let id = lc.create(&prices(), order_for(3, vec![LineRequest::new("naan", 2)])).unwrap().id;
        lc.advance(id).unwrap();

        let table = lc.clear_table(3).unwrap();
        assert!(!table.occupied);
        assert_eq!(table.active_order_id, None);
        assert_eq!(table.guests, None);
        assert_eq!(lc.get(id).unwrap().status, OrderStatus::Preparing);

        // the table takes a fresh order once cleared
        assert!(lc.create(&prices(), order_for(3, vec![LineRequest::new("coffee", 1)])).is_ok());
        assert_eq!(lc.clear_table(77), Err(LifecycleError::table_not_found(77)));
    }

    #[test]
    fn add_item_reprices() {
        let mut lc = lifecycle();
        let id = lc.create(&prices(), order_for(1, vec![LineRequest::new("naan", 2)])).unwrap().id;
        let mut line = LineRequest::new("coffee", 1);
        line.special_instructions = Some("no sugar".to_string());
        let order = lc.add_item(&prices(), id, line).unwrap();
        assert_eq!(order.total, 180);
        assert_eq!(order.items[1].special_instructions.as_deref(), Some("no sugar"));

        assert_eq!(
            lc.add_item(&prices(), id, LineRequest::new("kulfi", 1)),
            Err(LifecycleError::invalid(Invalid::UnknownMenuItem { id: "kulfi".to_string() }))
        );
        assert_eq!(lc.get(id).unwrap().total, 180);
    }

    #[test]
    fn settle_books_revenue_and_closes_the_order() {
        let mut lc = lifecycle();
        let id = lc.create(&prices(), order_for(1, vec![LineRequest::new("biryani", 1)])).unwrap().id;
        assert_eq!(
            lc.settle(id),
            Err(LifecycleError::InvalidTransition { id, from: OrderStatus::Pending })
        );
        for _ in 0..3 {
            lc.advance(id).unwrap();
        }
        let order = lc.settle(id).unwrap();
        assert!(order.is_settled());

        assert_eq!(lc.advance(id), Err(LifecycleError::Closed { id }));
        assert_eq!(lc.settle(id), Err(LifecycleError::Closed { id }));
        assert_eq!(lc.add_item(&prices(), id, LineRequest::new("naan", 1)), Err(LifecycleError::Closed { id }));
        assert_eq!(lc.summary().revenue, 320);
    }

    #[test]
    fn filter_and_summary() {
        let mut lc = lifecycle();
        let a = lc.create(&prices(), order_for(1, vec![LineRequest::new("naan", 1)])).unwrap().id;
        lc.create(&prices(), order_for(2, vec![LineRequest::new("naan", 1)])).unwrap();
        lc.advance(a).unwrap();

        let preparing = OrderFilter { status: Some(OrderStatus::Preparing), table_id: None };
        assert_eq!(lc.orders(&preparing).iter().map(|o| o.id).collect::<Vec<_>>(), vec![a]);
        let at_two = OrderFilter { status: None, table_id: Some(2) };
        assert_eq!(lc.orders(&at_two).len(), 1);

        let summary = lc.summary();
        assert_eq!((summary.pending, summary.preparing, summary.settled), (1, 1, 0));
    }

    #[test]
    fn tables_and_seating() {
        let mut lc = lifecycle();
        let added = lc.add_table(6, Location::Window).unwrap();
        assert_eq!(added.id, 10);
        assert_eq!(lc.tables().len(), 10);
        assert_eq!(lc.add_table(0, Location::Outdoor), Err(LifecycleError::invalid(Invalid::ZeroCapacity)));

        assert_eq!(lc.seat(10, 0), Err(LifecycleError::invalid(Invalid::NoGuests)));
        lc.seat(10, 5).unwrap();
        assert_eq!(lc.seat(10, 2), Err(LifecycleError::invalid(Invalid::TableOccupied { table_id: 10 })));
        assert_eq!(lc.seat(11, 2), Err(LifecycleError::table_not_found(11)));
    }

    #[test]
    fn add_table_stops_at_the_last_id() {
        let mut lc = OrderLifecycle::with_tables(WrapPolicy::Cycle, TableId::MAX);
        lc.seat(TableId::MAX, 2).unwrap();
        assert_eq!(
            lc.add_table(4, Location::Window),
            Err(LifecycleError::invalid(Invalid::TooManyTables))
        );
        assert_eq!(lc.tables().len(), usize::from(TableId::MAX));
        assert!(lc.table(TableId::MAX).unwrap().occupied);
        assert_eq!(lc.table(0), Err(LifecycleError::table_not_found(0)));
    }
}
