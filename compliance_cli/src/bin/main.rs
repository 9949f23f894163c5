use anyhow::Result;
use clap::Parser;
use compliance_cli::app::ComplianceApp;

#[tokio::main]
async fn main() -> Result<()> {
    let app = ComplianceApp::parse();

    app.run().await?;

    Ok(())
}
