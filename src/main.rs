use std::env;
use std::io;
use std::process::ExitCode;

use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use visa_budget::config::{SessionConfig, load_config_from_path};
use visa_budget::csv::{read_actions, write_summary};
use visa_budget::{Session, Summary};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: visa-budget <actions.csv> [config.toml]");
        return ExitCode::FAILURE;
    };

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let config = match args.next() {
        Some(config_path) => match load_config_from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => SessionConfig::default(),
    };

    let actions = match read_actions(&path) {
        Ok(actions) => actions,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(&config);
    let (action_sender, action_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in actions {
            match result {
                Ok(action) => {
                    if action_sender.send(action).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    session.run(ReceiverStream::new(action_receiver)).await;

    if let Err(e) = write_summary(io::stdout().lock(), &Summary::of(&session)) {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
