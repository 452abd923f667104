use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dashboard_client::{ApiSettings, ClientHandle, ReqwestApi};
use dashboard_core::{LocalFile, Msg};
use dashboard_logging::{dashboard_info, dashboard_warn, set_session_label};

use crate::config::AppConfig;
use crate::logging::{self, LogDestination};
use crate::render;
use crate::session::SessionRunner;
use crate::shell;

#[derive(Parser, Debug)]
#[command(
    name = "dashboard",
    version,
    about = "Classify images with the prediction service and browse your prediction history."
)]
pub struct Cli {
    /// RON config file (defaults to ./dashboard.ron when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// API base URL, e.g. http://localhost:8000/api/
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Bearer token for the API.
    #[arg(long, global = true)]
    pub token: Option<String>,
    /// Where log output goes.
    #[arg(long, value_enum, global = true)]
    pub log: Option<LogDestination>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify one or more images, then print the refreshed history.
    Predict {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the profile and the prediction history.
    History,
    /// Interactive session reading commands from stdin.
    Shell,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        config.apply_overrides(self.base_url, self.token, self.log);
        logging::initialize(config.log_destination, config.level_filter()?);

        let settings = resolve_settings(&config)?;
        let client = ClientHandle::new(&settings).context("failed to start the service client")?;
        let mut runner = SessionRunner::new(client);

        match self.command {
            Command::Predict { files } => run_predict(&mut runner, &config, &files),
            Command::History => run_history(&mut runner, &config),
            Command::Shell => shell::run(&mut runner, config.effect_wait()),
        }
    }
}

/// Build client settings, logging in first when only credentials are configured.
fn resolve_settings(config: &AppConfig) -> Result<ApiSettings> {
    let mut settings = config.api_settings();
    let Some((username, password)) = config.credentials() else {
        return Ok(settings);
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start login runtime")?;
    let api = ReqwestApi::new(&settings)?;
    let login = runtime
        .block_on(api.login(username, password))
        .map_err(|err| match err.service_message.clone() {
            Some(message) => anyhow::anyhow!("login failed: {message}"),
            None => anyhow::anyhow!("login failed: {err}"),
        })?;

    dashboard_info!("logged in as {}", login.user.username);
    set_session_label(login.user.username);
    settings.bearer_token = Some(login.access);
    Ok(settings)
}

fn run_predict(runner: &mut SessionRunner, config: &AppConfig, files: &[PathBuf]) -> Result<()> {
    let wait = config.effect_wait();
    runner.start();
    if !runner.wait_idle(wait) {
        dashboard_warn!("timed out waiting for profile and history");
    }
    println!("{}", render::render_header(&runner.view()));

    let mut failed = 0;
    for path in files {
        runner.dispatch(Msg::FileSelected(Some(LocalFile::from_path(path))));
        if !runner.wait_idle(wait) {
            dashboard_warn!("timed out decoding preview of {}", path.display());
        }
        runner.dispatch(Msg::SubmitClicked);
        if !runner.wait_idle(wait) {
            bail!("timed out waiting for the prediction of {}", path.display());
        }

        let view = runner.view();
        println!("\n{}", render::render_upload(&view));
        if view.error.is_some() {
            failed += 1;
        }
    }

    println!("\n{}", render::render_history(&runner.view()));
    runner.dispatch(Msg::LogoutClicked);

    if failed > 0 {
        bail!("{failed} of {} predictions failed", files.len());
    }
    Ok(())
}

fn run_history(runner: &mut SessionRunner, config: &AppConfig) -> Result<()> {
    runner.start();
    if !runner.wait_idle(config.effect_wait()) {
        bail!("timed out waiting for profile and history");
    }
    let view = runner.view();
    println!("{}", render::render_header(&view));
    println!("\n{}", render::render_history(&view));
    runner.dispatch(Msg::LogoutClicked);
    Ok(())
}
