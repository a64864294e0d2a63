use super::{ReportOptions, Session, ui};
use crate::core::config::AppConfig;
use crate::core::report::{self, PriceLine};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;

/// Renders normalized prices as a table.
pub fn display_as_table(lines: &[PriceLine], base: &str, date: NaiveDate) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Commodity"),
        ui::header_cell(&format!("Price ({base})")),
        ui::header_cell(&format!("Units per {base}")),
    ]);

    for line in lines {
        table.add_row(vec![
            Cell::new(&line.commodity),
            ui::number_cell(format!("{:.6}", line.rate)),
            ui::number_cell(format!("{:.6}", 1.0 / line.rate)),
        ]);
    }

    let mut output = format!(
        "Prices in {} on {}\n\n",
        ui::style_text(base, ui::StyleType::Title),
        date
    );
    output.push_str(&table.to_string());
    output
}

pub fn render(config: &AppConfig, options: &ReportOptions) -> Result<String> {
    let session = Session::open(config, options)?;
    let lines = report::price_table(
        &session.history,
        &session.registry,
        session.base,
        session.date,
    );
    let base = session.registry.symbol(session.base).unwrap_or_default();

    if options.json {
        return Ok(serde_json::to_string_pretty(&lines)?);
    }
    Ok(display_as_table(&lines, base, session.date))
}

pub fn run(config: &AppConfig, options: &ReportOptions) -> Result<()> {
    println!("{}", render(config, options)?);
    Ok(())
}
