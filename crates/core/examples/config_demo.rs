//! Example printing the built-in extraction profile and running it on a
//! small inline report
//!
//! Run with: cargo run --package venue-core --example config_demo

use venue_core::{ExtractorConfig, Venue};
use venue_infra::HtmlDocument;

const REPORT: &str = r#"
<html><body>
<table class="header">
  <tr><td class="console">Avid VENUE</td><td class="version">VENUE 4.5.3</td></tr>
  <tr><td class="label">Show:</td><td class="show">Demo\Sunday AM</td></tr>
</table>
<div class="device">
  <h2>Stage 1</h2>
  <table class="inputs">
    <tr><td>1</td><td>Kick</td></tr>
    <tr><td>2</td><td>Keys-L, Keys-R</td></tr>
  </table>
</div>
</body></html>
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("venue_core=debug,info")
        .init();

    println!("=== Built-in extraction profile ===\n");
    let config = ExtractorConfig::default();
    println!("{}", config.to_toml_string()?);

    println!("=== Parsing inline report ===\n");
    let doc = HtmlDocument::parse(REPORT)?;
    let venue = Venue::from_document(&doc, &config)?;
    println!("console: {}", venue.console());
    println!("version: {}", venue.version());
    println!("show:    {}", venue.show());
    for device in venue.devices().values() {
        println!(
            "{} ({}): {} in / {} out",
            device.name(),
            device.hardware(),
            device.num_inputs(),
            device.num_outputs()
        );
        for channel in device.inputs() {
            println!("  {:<20} -> {}", channel.name(), channel.clean_name());
        }
    }

    Ok(())
}
