mod cli;

use clap::Parser;
use cli::{Args, Command};
use qcs_client::api::{Client, HandlerOutput, RequestOptions, ResponseHandler};
use qcs_client::config::Config;
use qcs_client::error::ApiError;
use qcs_client::logging::setup_logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    let args = Args::parse();

    let (log_path, _guard) = setup_logging(args.log_file.as_ref(), args.verbose).await?;
    info!("Logging to {log_path}");

    if let Command::ShowConfig = args.command {
        return Config::display().await;
    }

    let config = Config::load().await?;

    let handler = if args.raw {
        ResponseHandler::Echo
    } else {
        ResponseHandler::CodeCheck
    };

    let mut builder = Client::builder().response_handler(handler);
    if let Some(url) = &args.url {
        builder = builder.base_url(url);
    }

    let mut client = if args.no_auth {
        builder.build(&config)?
    } else {
        builder.authenticate(&config).await?
    };

    match args.command {
        Command::ShowConfig => unreachable!("handled before client construction"),
        Command::Login => {
            // The authenticate path above already logged in unless --no-auth
            // was given; run it explicitly in that case too.
            if client.token().is_none() {
                client.login().await?;
            }
            println!("Login succeeded against {}", client.base_url());
        }
        Command::Get { endpoint } => {
            let output = client.get(&endpoint, RequestOptions::default()).await?;
            print_output(output);
        }
        Command::Post { endpoint, payload } => {
            let payload: serde_json::Value = serde_json::from_str(&payload)
                .map_err(|e| ApiError::config_error(format!("Invalid JSON payload: {e}")))?;
            let output = client
                .post(&endpoint, &payload, RequestOptions::default())
                .await?;
            print_output(output);
        }
        Command::Put { endpoint, payload } => {
            let payload: serde_json::Value = serde_json::from_str(&payload)
                .map_err(|e| ApiError::config_error(format!("Invalid JSON payload: {e}")))?;
            let output = client
                .put(&endpoint, &payload, RequestOptions::default())
                .await?;
            print_output(output);
        }
        Command::Delete { endpoint } => {
            let output = client.delete(&endpoint, RequestOptions::default()).await?;
            print_output(output);
        }
    }

    Ok(())
}

fn print_output(output: HandlerOutput) {
    match output {
        HandlerOutput::Raw(response) => {
            println!("{}", response.status());
            if !response.text().is_empty() {
                println!("{}", response.text());
            }
        }
        HandlerOutput::Json(value) => {
            println!("{value:#}");
        }
    }
}
