//! Location, plan and image listings.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

use na_core::config::ApiConfig;
use na_core::error::NaResult;

use super::{cell, create_driver, print_value};
use crate::OutputFormat;

pub async fn locations(config: &ApiConfig, format: OutputFormat) -> NaResult<()> {
    let driver = create_driver(config)?;
    let locations = driver.locations().await?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&locations).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            if locations.is_empty() {
                println!("No locations found.");
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["ID", "Name", "Country"]);

            for location in &locations {
                let field = |key: &str| location.extra.get(key).map(cell).unwrap_or_default();
                table.add_row(vec![
                    field("id"),
                    field("name"),
                    location.country.clone().unwrap_or_default(),
                ]);
            }
            println!("{table}");
            println!("  {} location(s)", locations.len());
        }
    }
    Ok(())
}

pub async fn plans(config: &ApiConfig, location: Option<&str>, format: OutputFormat) -> NaResult<()> {
    let driver = create_driver(config)?;
    print_value(&driver.plans(location).await?, format);
    Ok(())
}

pub async fn images(config: &ApiConfig, format: OutputFormat) -> NaResult<()> {
    let driver = create_driver(config)?;
    print_value(&driver.os_list().await?, format);
    Ok(())
}
