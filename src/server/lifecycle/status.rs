use std::str::FromStr;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Kitchen-facing status of an order.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OrderStatus {
    #[display("pending")]
    Pending,
    #[display("preparing")]
    Preparing,
    #[display("ready")]
    Ready,
    #[display("delivered")]
    Delivered,
}

/// What happens when a delivered order is advanced again.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum WrapPolicy {
    /// delivered wraps back to pending
    #[default]
    #[display("cycle")]
    Cycle,
    /// delivered is terminal
    #[display("halt")]
    Halt,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// The status one step further along the cycle, or `None` when the
    /// policy makes the current status terminal.
    pub fn next(self, policy: WrapPolicy) -> Option<OrderStatus> {
        match (self, policy) {
            (OrderStatus::Pending, _) => Some(OrderStatus::Preparing),
            (OrderStatus::Preparing, _) => Some(OrderStatus::Ready),
            (OrderStatus::Ready, _) => Some(OrderStatus::Delivered),
            (OrderStatus::Delivered, WrapPolicy::Cycle) => Some(OrderStatus::Pending),
            (OrderStatus::Delivered, WrapPolicy::Halt) => None,
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.to_string() == lower)
            .ok_or_else(|| format!("Invalid OrderStatus: {s}"))
    }
}

impl FromStr for WrapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cycle" => Ok(Self::Cycle),
            "halt" => Ok(Self::Halt),
            s => Err(format!("Invalid WrapPolicy: {s}")),
        }
    }
}
