use std::io::IsTerminal;
use std::sync::Arc;

use crate::config::Config;
use crate::dashboard::Outcome;
use crate::provider::{Memo, Yahoo};
use crate::widgets::Terminal;

#[macro_use]
mod macros;

pub mod analysis;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod helper;
pub mod logger;
pub mod provider;
pub mod render;
pub mod report;
pub mod ui;
pub mod widgets;

mod views;

#[macro_use]
extern crate rust_i18n;
i18n!("locales");

#[tokio::main]
async fn main() {
    let bin_name = std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{}", err.message);
            std::process::exit(err.code);
        }
    };

    let args = match command {
        cli::Command::Help => {
            println!("{}", cli::help_text(&bin_name));
            return;
        }
        cli::Command::Version => {
            println!("{}", cli::version_text());
            return;
        }
        cli::Command::Run(args) => args,
    };

    dotenvy::dotenv().ok();
    let config = Config::from_env();
    rust_i18n::set_locale(&config.locale);

    let _guard = match logger::init() {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("logging disabled: {err:#}");
            None
        }
    };
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        locale = %config.locale,
        log_dir = %logger::active_log_dir().display(),
        "starting"
    );

    let controls = match args.controls() {
        Ok(controls) => controls,
        Err(err) => {
            eprintln!("{}", err.message);
            std::process::exit(err.code);
        }
    };

    let provider = match Yahoo::new(&config) {
        Ok(yahoo) => Arc::new(Memo::new(yahoo)),
        Err(err) => {
            tracing::error!(error = %err, "failed to build http client");
            eprintln!("failed to start: {err:#}");
            std::process::exit(1);
        }
    };

    if args.print {
        match dashboard::evaluate(provider.as_ref(), &controls).await {
            Outcome::Ready(dashboard) => print!("{}", report::render(&dashboard)),
            Outcome::Halted(halt) => {
                eprintln!("{}", halt.message());
                std::process::exit(1);
            }
        }
        return;
    }

    if !std::io::stdout().is_terminal() {
        eprintln!("{bin_name} needs an interactive terminal; use --print for a text report.");
        std::process::exit(1);
    }

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        Terminal::exit_full_screen();
        hook(info);
    }));

    Terminal::enter_full_screen();
    let _restore = scopeguard::guard((), |()| Terminal::exit_full_screen());

    tokio::select! {
        result = app::run(Arc::clone(&provider), controls) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "event loop failed");
            } else {
                tracing::info!("event loop exited");
            }
        }
        _ = wait_for_shutdown_signal() => {
            tracing::warn!("shutdown signal received");
        }
    }

    let (histories, snapshots) = provider.len();
    tracing::info!(histories, snapshots, "memoized entries at exit");
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use std::future::pending;
    use tokio::signal::unix::{signal, Signal, SignalKind};

    async fn recv_or_pending(signal: Option<Signal>) {
        let mut signal = signal;
        if let Some(sig) = signal.as_mut() {
            let _ = sig.recv().await;
            return;
        }
        pending::<()>().await;
    }

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = recv_or_pending(signal(SignalKind::terminate()).ok()) => {}
        _ = recv_or_pending(signal(SignalKind::hangup()).ok()) => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
