//! # Seed Data Generator
//!
//! Populates the database with demo print services for development.
//!
//! ## Usage
//! ```bash
//! # Use pricing.toml / PRINTDESK_* settings
//! cargo run -p printdesk-db --bin seed
//!
//! # Specify database path and config file
//! cargo run -p printdesk-db --bin seed -- --db ./data/pricing.db --config ./pricing.toml
//! ```
//!
//! ## Generated Services
//! - "Document Printing" (Bond Paper, colour + duplex): saved as DRAFT
//! - "Sticker Printing" (all capabilities, one extra option, lamination):
//!   saved and ACTIVATED
//!
//! Both start from their scaffold and go through the lifecycle controller,
//! so the rows written are exactly what the console would write.

use std::env;
use std::path::PathBuf;

use printdesk_core::preview::compute_preview_with;
use printdesk_core::{
    scaffold, AgentService, NewCustomSpecification, NewPricingOption, PricingLifecycle,
};
use printdesk_db::{init_tracing, Database, DbConfig, EngineConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("PrintDesk Pricing Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>       Database file path (overrides config)");
                println!("  -c, --config <PATH>   pricing.toml to load");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut engine = EngineConfig::load(config_path)?;
    if let Some(path) = db_path {
        engine.database.path = path;
    }

    println!("🌱 PrintDesk Pricing Seed");
    println!("=========================");
    println!("Database: {}", engine.database.path.display());
    println!();

    let db = Database::new(DbConfig::from(&engine)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.services().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} services", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let lifecycle = PricingLifecycle::with_mode(db.backend(), engine.validation_mode());

    // -------------------------------------------------------------------------
    // Bond paper: scaffold as-is, saved as draft
    // -------------------------------------------------------------------------
    let mut documents = AgentService::new("svc-documents", "Document Printing")
        .with_sub_category("Bond Paper")
        .with_capabilities(true, true, false);
    documents.category = Some("Printing".to_string());
    db.services().insert(&documents).await?;

    let config = scaffold(&documents);
    let outcome = lifecycle.save_draft(&mut documents, config).await?;
    println!("✓ {} → {}", documents.name, outcome.state);

    // -------------------------------------------------------------------------
    // Stickers: scaffold plus edits, saved and activated
    // -------------------------------------------------------------------------
    let mut stickers = AgentService::new("svc-stickers", "Sticker Printing")
        .with_sub_category("Vinyl Sticker")
        .with_capabilities(true, true, true);
    stickers.category = Some("Printing".to_string());
    db.services().insert(&stickers).await?;

    let mut config = scaffold(&stickers);
    config.update_base_configuration(
        0,
        printdesk_core::BaseConfigurationPatch {
            unit_price_cents: Some(1500),
            ..Default::default()
        },
    )?;
    config.add_option(NewPricingOption {
        name: "Holographic".to_string(),
        enabled: true,
        is_default: false,
        price_modifier_cents: 300,
    });
    config.add_custom_specification(NewCustomSpecification {
        name: "Lamination".to_string(),
        price_modifier_cents: 500,
    });

    let outcome = lifecycle.save_and_activate(&mut stickers, config).await?;
    println!("✓ {} → {}", stickers.name, outcome.state);

    // -------------------------------------------------------------------------
    // Verify what landed
    // -------------------------------------------------------------------------
    println!();
    println!("Verifying stored pricing...");
    let format = engine.currency_format();
    for service in db.services().list().await? {
        let Some(config) = service.pricing_config.as_ref() else {
            continue;
        };
        let preview = compute_preview_with(config, &format);
        println!(
            "  {}: {} tiers, {} options, {} extras, active={}",
            service.name,
            preview.base_configurations.len(),
            preview.options.len(),
            preview.custom_specifications.len(),
            service.is_active
        );
        info!(
            service_id = %service.id,
            preview = %serde_json::to_string(&preview)?,
            "Seeded pricing preview"
        );
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
