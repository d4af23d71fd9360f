use sales_voice::app_composite;
use sales_voice::config;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize rustls crypto provider, for secure connections
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install the rustls crypto provider"))?;

    let config = config::load()?;

    let app_composite = app_composite::AppComposite::new(&config)?;
    app_composite.serve(&config).await
}
