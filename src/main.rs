use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use mausam_core::Config;
use mausam_weather::{ProviderSettings, WeatherProvider};
use mausam_widget::{
    read_input_line, request_lookup, Key, LookupServiceMessage, SubmitOutcome, TerminalRenderer,
    WeatherWidget,
};
use tokio::io::BufReader;
use tokio::runtime::Handle;
use tokio::sync::mpsc::unbounded_channel;

fn provider_settings(config: &Config) -> ProviderSettings {
    let defaults = ProviderSettings::default();
    ProviderSettings {
        geocoding_url: config.api.geocoding_url.clone(),
        forecast_url: config.api.forecast_url.clone(),
        language: config.api.language.clone(),
        timeout: config.http.timeout_secs.map(Duration::from_secs),
        user_agent: config
            .http
            .user_agent
            .clone()
            .unwrap_or(defaults.user_agent),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    mausam_core::init()?;

    let (config, _) = Config::load_validated()?;
    let provider = Arc::new(
        WeatherProvider::new(provider_settings(&config))
            .context("Failed to create weather provider")?,
    );

    let mut widget = WeatherWidget::new(config.lookup.policy);
    let mut renderer = TerminalRenderer::new(std::io::stdout());
    let (tx, mut rx) = unbounded_channel::<LookupServiceMessage>();
    let runtime = Handle::current();

    // A city on the command line runs one lookup instead of reading stdin
    let args: Vec<String> = std::env::args().skip(1).collect();
    let one_shot = !args.is_empty();
    let mut pending_input = one_shot.then(|| args.join(" "));
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut line_buf = Vec::new();
    let mut input_open = !one_shot;

    if input_open {
        println!("Mausam - enter a city name (Ctrl-D to quit)");
    }

    tracing::info!("Mausam started");

    loop {
        if let Some(text) = pending_input.take() {
            widget.input_changed(text);
            if let SubmitOutcome::Lookup(request) = widget.key_pressed(Key::Enter) {
                request_lookup(&runtime, &tx, provider.clone(), request);
            }
            widget.render(&mut renderer)?;
        }

        if !input_open && widget.in_flight() == 0 {
            break;
        }

        tokio::select! {
            line = read_input_line(&mut stdin, &mut line_buf), if input_open => {
                match line.context("Failed to read input")? {
                    Some(text) => pending_input = Some(text),
                    None => input_open = false,
                }
            }
            Some(message) = rx.recv() => {
                let LookupServiceMessage::LookupDone { generation, result } = message;
                if widget.apply(generation, result) {
                    widget.render(&mut renderer)?;
                }
            }
        }
    }

    tracing::info!("Mausam shutting down");

    if one_shot && widget.view().error.is_some() {
        std::process::exit(1);
    }
    Ok(())
}
