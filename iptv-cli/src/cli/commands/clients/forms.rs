//! Interactive prompts for collecting and selecting client records

use anyhow::Result;
use chrono::{Local, NaiveDate};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use crate::api::ClientRecord;
use crate::mac;

/// Collect all user-entered fields for one record. `defaults` pre-fills
/// the form when editing. Returns `None` if the MAC is rejected; the
/// error has already been shown and nothing has touched the store.
pub fn prompt_record(defaults: Option<&ClientRecord>) -> Result<Option<ClientRecord>> {
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Name")
        .with_initial_text(defaults.map(|r| r.name.clone()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let phone: String = Input::with_theme(&theme)
        .with_prompt("Phone Number (e.g. +355691234567)")
        .with_initial_text(defaults.map(|r| r.phone.clone()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let start_date: NaiveDate = Input::with_theme(&theme)
        .with_prompt("Start Date (YYYY-MM-DD)")
        .default(initial_date(defaults.map(|r| r.start_date.as_str())))
        .interact_text()?;

    let link: String = Input::with_theme(&theme)
        .with_prompt("Link")
        .with_initial_text(defaults.map(|r| r.link.clone()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let end_date: NaiveDate = Input::with_theme(&theme)
        .with_prompt("End Date (YYYY-MM-DD)")
        .default(initial_date(defaults.map(|r| r.end_date.as_str())))
        .interact_text()?;

    let mac_input: String = Input::with_theme(&theme)
        .with_prompt("MAC Address (e.g. 00:1A:2B:3C:4D:5E)")
        .with_initial_text(defaults.map(|r| r.mac.clone()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let cost: f64 = Input::with_theme(&theme)
        .with_prompt("Cost")
        .default(defaults.map(|r| r.cost).unwrap_or(0.0))
        .interact_text()?;

    let sell: f64 = Input::with_theme(&theme)
        .with_prompt("Sell")
        .default(defaults.map(|r| r.sell).unwrap_or(0.0))
        .interact_text()?;

    match build_record(name, phone, start_date, link, end_date, &mac_input, cost, sell) {
        Some(record) => Ok(Some(record)),
        None => {
            eprintln!(
                "{}",
                "Invalid MAC Address! Use format: 00:1A:2B:3C:4D:5E".red()
            );
            Ok(None)
        }
    }
}

/// Assemble a record from form input: normalize the MAC, reject it if
/// malformed, and derive Profit. Returns `None` on a malformed MAC.
#[allow(clippy::too_many_arguments)]
fn build_record(
    name: String,
    phone: String,
    start_date: NaiveDate,
    link: String,
    end_date: NaiveDate,
    mac_input: &str,
    cost: f64,
    sell: f64,
) -> Option<ClientRecord> {
    let mac = mac::normalize(mac_input);
    if !mac::is_valid(&mac) {
        return None;
    }

    let mut record = ClientRecord {
        name,
        phone,
        start_date: start_date.to_string(),
        link,
        end_date: end_date.to_string(),
        mac,
        cost,
        sell,
        profit: 0.0,
    };
    record.recompute_profit();
    Some(record)
}

/// Selector over the cached snapshot, labeled "<1-based-position>. <Name>"
pub fn select_record(records: &[ClientRecord], prompt: &str) -> Result<usize> {
    let labels = selector_labels(records);
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(index)
}

pub fn selector_labels(records: &[ClientRecord]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| format!("{}. {}", i + 1, record.name))
        .collect()
}

/// Stored dates are ISO strings; anything unparsable falls back to today
fn initial_date(stored: Option<&str>) -> NaiveDate {
    match stored {
        Some(value) if !value.trim().is_empty() => {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").unwrap_or_else(|_| {
                log::warn!("Unparsable stored date '{}', defaulting to today", value);
                Local::now().date_naive()
            })
        }
        _ => Local::now().date_naive(),
    }
}
