mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lootspin_engine::{
    load_credentials, DispatchEvent, EngineHandle, RawResultLog, ReqwestSpinClient,
    ResponseInterpreter, ResultLogger, SessionEvent, SessionSpec, TokioSleeper,
};
use lootspin_logging::{engine_error, engine_info, wallet_error, wallet_info};

use cli::{Cli, LogTarget};

#[derive(Debug, Default)]
struct RunSummary {
    sessions: usize,
    completed: usize,
    crashed: usize,
}

impl RunSummary {
    fn all_completed(&self) -> bool {
        self.crashed == 0 && self.completed == self.sessions
    }

    /// 0 when every session completed, 1 otherwise.
    fn exit_status(&self) -> u8 {
        if self.all_completed() {
            0
        } else {
            1
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let destination = cli.log_destination;
    lootspin_logging::initialize(destination.into(), cli.log_level.into(), &cli.log_file);

    match run(&cli) {
        Ok(summary) => {
            if summary.all_completed() {
                engine_info!("All {} sessions completed.", summary.completed);
            } else {
                engine_error!(
                    "{} of {} sessions crashed.",
                    summary.crashed,
                    summary.sessions
                );
            }
            ExitCode::from(summary.exit_status())
        }
        Err(err) => {
            engine_error!("{:#}", err);
            if destination == LogTarget::File {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    engine_info!(
        "Starting Auto Spin Bot with multiple wallets, tokens, and proxies in parallel sessions..."
    );

    let inputs = load_credentials(&cli.input_paths()).context("failed to load inputs")?;
    engine_info!(
        "Loaded {} wallets, {} tokens, and {} proxies.",
        inputs.wallet_count,
        inputs.token_count,
        inputs.proxy_count
    );

    // Every client is built before the first request goes out.
    let client_settings = cli.client_settings();
    let mut sessions = Vec::with_capacity(inputs.credentials.len());
    for credentials in inputs.credentials {
        wallet_info!(
            credentials.wallet,
            "Using token: {}... (partial token shown), proxy: {}",
            credentials.token_preview(),
            credentials.proxy
        );
        let client = ReqwestSpinClient::new(client_settings.clone(), Some(&credentials.proxy))
            .with_context(|| format!("failed to build client for wallet {}", credentials.wallet))?;
        sessions.push(SessionSpec {
            credentials,
            transport: Arc::new(client),
        });
    }

    let spin_settings = cli.spin_settings();
    let loggers: Vec<Arc<dyn ResultLogger>> = if spin_settings.log_results {
        let raw_log: Arc<dyn ResultLogger> = Arc::new(RawResultLog::new(&cli.raw_log));
        vec![raw_log]
    } else {
        Vec::new()
    };

    let mut summary = RunSummary {
        sessions: sessions.len(),
        ..RunSummary::default()
    };
    let engine = EngineHandle::launch(
        sessions,
        spin_settings,
        Arc::new(ResponseInterpreter::new(loggers)),
        Arc::new(TokioSleeper),
    )?;

    while let Some(DispatchEvent { wallet, event }) = engine.recv() {
        match event {
            SessionEvent::Progress(text) => wallet_info!(wallet, "{}", text),
            SessionEvent::Report(report) => {
                for line in report.to_string().lines() {
                    wallet_info!(wallet, "{}", line);
                }
            }
            SessionEvent::Completed => {
                summary.completed += 1;
                wallet_info!(wallet, "Worker completed successfully.");
            }
            SessionEvent::Crashed(reason) => {
                summary.crashed += 1;
                wallet_error!(wallet, "Worker crashed: {}", reason);
            }
        }
    }

    Ok(summary)
}
