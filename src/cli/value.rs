use super::{ReportOptions, Session, ui};
use crate::core::config::AppConfig;
use crate::core::report::{self, ValuationReport};
use anyhow::Result;
use comfy_table::Cell;

impl ValuationReport {
    pub fn display_as_table(&self) -> String {
        let base = &self.base;

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Holding"),
            ui::header_cell("Amount"),
            ui::header_cell(&format!("Price ({base})")),
            ui::header_cell(&format!("Value ({base})")),
        ]);

        for holding in &self.holdings {
            let label = match &holding.name {
                Some(name) => format!("{name} ({})", holding.commodity),
                None => holding.commodity.clone(),
            };
            let amount = ui::number_cell(format!("{} {}", holding.amount, holding.commodity));
            let rate = ui::format_optional_cell(holding.rate, |r| format!("{r:.4}"));
            let value = match (&holding.value, &holding.error) {
                (Some(v), _) => ui::number_cell(format!("{:.2}", v.round_dp(2))),
                (None, error) => ui::na_cell(error.is_some()),
            };

            table.add_row(vec![Cell::new(label), amount, rate, value]);
        }

        let total_style_type = if self.total.is_some() {
            ui::StyleType::TotalValue
        } else {
            ui::StyleType::Error
        };
        let total = self
            .total
            .map_or("N/A".to_string(), |v| format!("{:.2}", v.round_dp(2)));

        let mut output = format!(
            "Holdings on {}\n\n",
            ui::style_text(&self.date.to_string(), ui::StyleType::Title)
        );
        output.push_str(&table.to_string());

        let errors: Vec<&str> = self
            .holdings
            .iter()
            .filter_map(|h| h.error.as_deref())
            .collect();
        if !errors.is_empty() {
            output.push('\n');
            for error in errors {
                output.push_str(&format!(
                    "\n{}",
                    ui::style_text(error, ui::StyleType::Error)
                ));
            }
        }

        output.push_str(&format!(
            "\n\nTotal Value ({}): {}",
            ui::style_text(base, ui::StyleType::TotalLabel),
            ui::style_text(&total, total_style_type)
        ));
        output
    }
}

pub fn render(config: &AppConfig, options: &ReportOptions) -> Result<String> {
    let session = Session::open(config, options)?;
    let report = report::value_holdings(
        &session.history,
        &session.registry,
        &config.holdings,
        session.base,
        session.date,
    );

    if options.json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(report.display_as_table())
}

pub fn run(config: &AppConfig, options: &ReportOptions) -> Result<()> {
    println!("{}", render(config, options)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config() -> AppConfig {
        serde_yaml::from_str(
            r#"
base: GBP
prices:
  - date: 2024-01-02
    commodity: USD
    target: EUR
    rate: 0.9
  - date: 2024-01-02
    commodity: EUR
    target: GBP
    rate: 0.85
holdings:
  - commodity: USD
    amount: "100"
    name: Checking
  - commodity: GBP
    amount: "10"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_render_table_with_total() {
        let output = render(&config(), &ReportOptions::default()).unwrap();
        assert!(output.contains("Checking (USD)"));
        assert!(output.contains("76.50"));
        assert!(output.contains("86.50"));
        assert!(!output.contains("No price found"));
    }

    #[test]
    fn test_render_before_prices_shows_errors() {
        let options = ReportOptions {
            date: NaiveDate::from_ymd_opt(2023, 12, 31),
            ..Default::default()
        };
        let output = render(&config(), &options).unwrap();
        assert!(output.contains("No price found for USD in GBP"));
        assert!(output.contains("N/A"));
    }

    #[test]
    fn test_render_json() {
        let options = ReportOptions {
            base: Some("EUR".to_string()),
            json: true,
            ..Default::default()
        };
        let output = render(&config(), &options).unwrap();
        let report: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(report["base"], "EUR");
        assert_eq!(report["date"], "2024-01-02");
        assert_eq!(report["holdings"].as_array().unwrap().len(), 2);
        assert!(report["total"].is_string());
    }
}
