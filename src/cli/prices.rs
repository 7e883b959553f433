use super::ui;
use crate::core::coin::{CryptoInfo, SearchHit};
use crate::core::ledger::{Ledger, RefreshReport};
use crate::crypto::PriceService;
use anyhow::Result;
use comfy_table::Cell;
use std::collections::HashMap;

fn not_found(symbol: &str) -> String {
    ui::style_text(
        &format!("No price found for {}", symbol.trim().to_uppercase()),
        ui::StyleType::Error,
    )
}

pub fn info_line(info: &CryptoInfo, currency: &str) -> String {
    format!(
        "{} ({}): {} {}",
        ui::style_text(&info.name, ui::StyleType::TotalLabel),
        info.symbol,
        ui::style_text(&ui::format_money(info.price), ui::StyleType::TotalValue),
        currency
    )
}

/// Rows follow the requested order; tickers without a price are dimmed.
pub fn prices_table(symbols: &[String], prices: &HashMap<String, f64>, currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell(&format!("Price ({currency})")),
    ]);

    let mut seen = Vec::new();
    for symbol in symbols {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() || seen.contains(&symbol) {
            continue;
        }
        let row = match prices.get(&symbol) {
            Some(price) => vec![Cell::new(&symbol), ui::money_cell(*price)],
            None => vec![
                Cell::new(ui::style_text(&symbol, ui::StyleType::Subtle)),
                Cell::new(ui::style_text("not found", ui::StyleType::Subtle)),
            ],
        };
        table.add_row(row);
        seen.push(symbol);
    }
    table.to_string()
}

pub fn search_table(hits: &[SearchHit]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Name"),
        ui::header_cell("Id"),
    ]);
    for hit in hits {
        table.add_row(vec![
            Cell::new(&hit.symbol),
            Cell::new(&hit.name),
            Cell::new(ui::style_text(&hit.id, ui::StyleType::Subtle)),
        ]);
    }
    table.to_string()
}

pub fn refresh_table(report: &RefreshReport, currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Asset"),
        ui::header_cell("Amount"),
        ui::header_cell(&format!("Value ({currency})")),
    ]);
    for asset in &report.updated {
        table.add_row(vec![
            Cell::new(&asset.name),
            ui::amount_cell(asset.amount),
            ui::money_cell(asset.value_in_eur),
        ]);
    }
    for name in &report.skipped {
        table.add_row(vec![
            Cell::new(ui::style_text(name, ui::StyleType::Subtle)),
            Cell::new(""),
            Cell::new(ui::style_text("unchanged", ui::StyleType::Subtle)),
        ]);
    }
    table.to_string()
}

/// Prints the price of one ticker. A ticker without a price is reported but
/// is not a failure.
pub async fn price(service: &PriceService, symbol: &str, info: bool, currency: &str) -> Result<()> {
    if info {
        match service.get_info(symbol).await {
            Some(found) => println!("{}", info_line(&found, currency)),
            None => println!("{}", not_found(symbol)),
        }
        return Ok(());
    }

    match service.get_price(symbol).await {
        Some(price) => println!("{} {}", ui::format_money(price), currency),
        None => println!("{}", not_found(symbol)),
    }
    Ok(())
}

pub async fn prices(service: &PriceService, symbols: &[String], currency: &str) -> Result<()> {
    let found = service.get_multiple(symbols).await;
    println!("{}", prices_table(symbols, &found, currency));
    Ok(())
}

pub async fn search(service: &PriceService, query: &str, limit: usize) -> Result<()> {
    let hits = service.search(query, limit).await?;
    if hits.is_empty() {
        println!(
            "{}",
            ui::style_text(&format!("No coins match \"{}\"", query.trim()), ui::StyleType::Subtle)
        );
        return Ok(());
    }
    println!("{}", search_table(&hits));
    Ok(())
}

pub async fn refresh(
    ledger: &Ledger,
    service: &PriceService,
    vault_id: &str,
    currency: &str,
) -> Result<()> {
    let report = ledger.refresh_crypto_prices(vault_id, service).await?;
    println!(
        "{}\n",
        ui::style_text(
            &format!("Updated {} asset(s)", report.updated.len()),
            ui::StyleType::Title
        )
    );
    println!("{}", refresh_table(&report, currency));
    Ok(())
}
