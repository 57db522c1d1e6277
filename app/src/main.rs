use todo_app::{HttpTransport, Shell};
use todo_core::{ClientConfig, TodoClient, TodoView};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the rendered list.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "starting todo app");

    let view = TodoView::new(TodoClient::from_config(&config));
    let shell = Shell::new(view, HttpTransport::new(), std::io::stdout());
    shell.run(tokio::io::BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}
