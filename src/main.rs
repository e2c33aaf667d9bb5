use gitfan::presentation::cli::CliApp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = CliApp::new()?;

    // Initialize logging
    app.init_tracing();

    // Run the CLI application
    app.run().await
}
