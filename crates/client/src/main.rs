use std::ops::ControlFlow;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use invoicehub_client::terminal::{self, Command, CommandError};
use invoicehub_client::{AppConfig, TerminalScreen, ViewController};
use invoicehub_gateway::HttpGateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    invoicehub_observability::init(config.log_format);

    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }

    let gateway = HttpGateway::new(&config.gateway).context("failed to build API client")?;
    tracing::info!(
        api = gateway.base_url(),
        timeout_secs = config.gateway.timeout.as_secs(),
        "starting invoicehub"
    );

    let screen = TerminalScreen::new(std::io::stdout());
    let mut controller = ViewController::new(gateway, screen);
    controller.start().await;
    controller.screen_mut().message("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                controller.screen_mut().message(&err.to_string());
                continue;
            }
        };

        if terminal::run_command(&mut controller, command).await == ControlFlow::Break(()) {
            break;
        }
    }

    tracing::info!("bye");
    Ok(())
}
