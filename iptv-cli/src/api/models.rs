//! Client record model and row mapping

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Column indices (storage order is part of the contract, columns A..I)
pub mod cols {
    pub const NAME: usize = 0;
    pub const PHONE: usize = 1;
    pub const START_DATE: usize = 2;
    pub const LINK: usize = 3;
    pub const END_DATE: usize = 4;
    pub const MAC: usize = 5;
    pub const COST: usize = 6;
    pub const SELL: usize = 7;
    pub const PROFIT: usize = 8;
    pub const COUNT: usize = 9;
}

/// Header row of the worksheet, in column order
pub const HEADERS: [&str; cols::COUNT] = [
    "Name",
    "Phone",
    "Start Date",
    "Link",
    "End Date",
    "Mac Address",
    "Cost",
    "Sell",
    "Profit",
];

/// One IPTV client, one worksheet row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "End Date")]
    pub end_date: String,
    #[serde(rename = "Mac Address")]
    pub mac: String,
    #[serde(rename = "Cost")]
    pub cost: f64,
    #[serde(rename = "Sell")]
    pub sell: f64,
    #[serde(rename = "Profit")]
    pub profit: f64,
}

impl ClientRecord {
    /// Profit is derived, never edited independently. Called on every write path.
    pub fn recompute_profit(&mut self) {
        self.profit = self.sell - self.cost;
    }

    /// Serialize into one worksheet row, columns A..I
    pub fn to_row(&self) -> Vec<Value> {
        vec![
            json!(self.name),
            json!(self.phone),
            json!(self.start_date),
            json!(self.link),
            json!(self.end_date),
            json!(self.mac),
            json!(self.cost),
            json!(self.sell),
            json!(self.profit),
        ]
    }

    /// Map one worksheet row. Trailing cells the API omitted read as empty,
    /// non-numeric Cost/Sell cells read as 0.0.
    pub fn from_row(row: &[Value]) -> Self {
        Self {
            name: cell_string(row, cols::NAME),
            phone: cell_string(row, cols::PHONE),
            start_date: cell_string(row, cols::START_DATE),
            link: cell_string(row, cols::LINK),
            end_date: cell_string(row, cols::END_DATE),
            mac: cell_string(row, cols::MAC),
            cost: cell_number(row, cols::COST),
            sell: cell_number(row, cols::SELL),
            profit: cell_number(row, cols::PROFIT),
        }
    }

    /// Every field as a display string, in column order
    pub fn display_row(&self) -> [String; cols::COUNT] {
        [
            self.name.clone(),
            self.phone.clone(),
            self.start_date.clone(),
            self.link.clone(),
            self.end_date.clone(),
            self.mac.clone(),
            format!("{:.2}", self.cost),
            format!("{:.2}", self.sell),
            format!("{:.2}", self.profit),
        ]
    }
}

fn cell_string(row: &[Value], idx: usize) -> String {
    match row.get(idx) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn cell_number(row: &[Value], idx: usize) -> f64 {
    match row.get(idx) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
