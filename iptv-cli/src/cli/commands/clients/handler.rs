//! View handlers: translate user actions into store calls

use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use unicode_width::UnicodeWidthStr;

use crate::api::{ClientRecord, HEADERS, RecordStore, SheetsClient, cols};
use crate::cache::SnapshotCache;
use crate::config::Config;

use super::{DeleteArgs, ListArgs, OutputFormat, forms};

/// One interactive session: a connected store plus the snapshot cache
/// shared by every view
pub struct Session {
    store: SheetsClient,
    cache: SnapshotCache,
}

impl Session {
    pub async fn connect(config: &Config) -> Result<Self> {
        let store = SheetsClient::connect(config).await?;
        Ok(Self {
            store,
            cache: SnapshotCache::default(),
        })
    }

    async fn snapshot(&mut self) -> Result<Vec<ClientRecord>> {
        Ok(self.cache.records(&self.store).await?.to_vec())
    }
}

pub async fn handle_add(session: &mut Session) -> Result<()> {
    println!("{}", "Add New Client".bold());

    let Some(record) = forms::prompt_record(None)? else {
        return Ok(());
    };

    session.store.append(&record).await?;
    session.cache.invalidate();
    println!("{}", "Record added successfully!".green());
    Ok(())
}

pub async fn handle_list(session: &mut Session, args: &ListArgs) -> Result<()> {
    let records = session.snapshot().await?;

    if records.is_empty() && args.format == OutputFormat::Table {
        println!("{}", "No records found.".yellow());
        return Ok(());
    }

    let rendered = format_output(&records, args.format);

    if let Some(path) = &args.output {
        fs::write(path, &rendered)
            .with_context(|| format!("Failed to write output to: {}", path.display()))?;
        println!("Results saved to: {}", path.display().to_string().green());
    } else {
        print!("{}", rendered);
    }
    Ok(())
}

pub async fn handle_edit(session: &mut Session) -> Result<()> {
    println!("{}", "Edit Client".bold());

    let records = session.snapshot().await?;
    if records.is_empty() {
        println!("{}", "No data to edit.".yellow());
        return Ok(());
    }

    let index = forms::select_record(&records, "Select a client to edit")?;
    let Some(record) = forms::prompt_record(Some(&records[index]))? else {
        return Ok(());
    };

    session.store.update(index, &record).await?;
    session.cache.invalidate();
    println!("{}", "Record updated.".green());
    Ok(())
}

pub async fn handle_delete(session: &mut Session, args: &DeleteArgs) -> Result<()> {
    println!("{}", "Delete Client".bold());

    let records = session.snapshot().await?;
    if records.is_empty() {
        println!("{}", "No data to delete.".yellow());
        return Ok(());
    }

    let index = forms::select_record(&records, "Select a client to delete")?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete {}?", records[index].name))
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    session.store.delete(index).await?;
    session.cache.invalidate();
    println!("{}", "Deleted successfully.".green());
    Ok(())
}

/// Menu loop over the four views. A failure inside one action aborts
/// that action only; the menu keeps running.
pub async fn run_menu(session: &mut Session) -> Result<()> {
    println!("{}", "IPTV Client Manager".bold());

    const CHOICES: [&str; 5] = [
        "Add New Client",
        "View All Clients",
        "Edit Client",
        "Delete Client",
        "Quit",
    ];

    loop {
        println!();
        let choice = dialoguer::Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(&CHOICES)
            .default(0)
            .interact()?;

        let result = match choice {
            0 => handle_add(session).await,
            1 => handle_list(session, &ListArgs::default()).await,
            2 => handle_edit(session).await,
            3 => handle_delete(session, &DeleteArgs::default()).await,
            _ => break,
        };

        if let Err(err) = result {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
        }
    }
    Ok(())
}

/// Render records according to the requested output format
fn format_output(records: &[ClientRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<_> = records.iter().map(ClientRecord::display_row).collect();
            format_table(&HEADERS, &rows)
        }
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(records)
                .unwrap_or_else(|_| "[]".to_string());
            out.push('\n');
            out
        }
        OutputFormat::Csv => {
            let mut csv = HEADERS.join(",");
            csv.push('\n');
            for record in records {
                let row: Vec<String> =
                    record.display_row().iter().map(|c| csv_escape(c)).collect();
                csv.push_str(&row.join(","));
                csv.push('\n');
            }
            csv
        }
    }
}

/// Plain-text table with unicode-aware column sizing
fn format_table(headers: &[&str], rows: &[[String; cols::COUNT]]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.width());
        }
    }

    let mut out = String::new();
    render_row(&mut out, headers.iter().map(|h| *h), &widths);
    render_row(
        &mut out,
        widths.iter().map(|w| "-".repeat(*w)),
        &widths,
    );
    for row in rows {
        render_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn render_row<S: AsRef<str>>(
    out: &mut String,
    cells: impl Iterator<Item = S>,
    widths: &[usize],
) {
    let rendered: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let cell = cell.as_ref();
            let pad = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(rendered.join("  ").trim_end());
    out.push('\n');
}

/// Escape a string for CSV output
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClientRecord {
        ClientRecord {
            name: "Alba".into(),
            phone: "+355691234567".into(),
            start_date: "2025-01-01".into(),
            link: "http://example.com".into(),
            end_date: "2026-01-01".into(),
            mac: "00:1A:2B:3C:4D:5E".into(),
            cost: 5.0,
            sell: 10.0,
            profit: 5.0,
        }
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_csv_output_has_header_and_rows() {
        let out = format_output(&[sample()], OutputFormat::Csv);
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Name,Phone,Start Date,Link,End Date,Mac Address,Cost,Sell,Profit"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Alba,+355691234567,2025-01-01,http://example.com,2026-01-01,00:1A:2B:3C:4D:5E,5.00,10.00,5.00"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_json_output_is_keyed_by_header() {
        let out = format_output(&[sample()], OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["Name"], "Alba");
        assert_eq!(parsed[0]["Mac Address"], "00:1A:2B:3C:4D:5E");
        assert_eq!(parsed[0]["Profit"], 5.0);
    }

    #[test]
    fn test_table_aligns_columns() {
        let out = format_output(&[sample()], OutputFormat::Table);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].starts_with("----"));
        // Phone column starts at the same offset in every line
        let offset = lines[0].find("Phone").unwrap();
        assert_eq!(&lines[2][offset..offset + 4], "+355");
    }

    #[test]
    fn test_empty_json_and_csv_still_render() {
        assert_eq!(format_output(&[], OutputFormat::Json).trim(), "[]");
        let csv = format_output(&[], OutputFormat::Csv);
        assert_eq!(csv.lines().count(), 1);
    }
}
