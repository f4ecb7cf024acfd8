//! `infisical-login-action` entry point.

use action_common::{ActionHost, GithubActionsHost, TracingConfig, init_tracing, report_error};
use infisical_client::EnvIdTokenProvider;
use infisical_login_action::config::ActionInputs;
use std::process::ExitCode;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing(&TracingConfig::from_env());
    info!("Starting Infisical login action");

    let host = GithubActionsHost::from_env();
    let inputs = ActionInputs::from_env();

    match infisical_login_action::run(&host, &inputs, &EnvIdTokenProvider).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&host, &err);
            host.set_failed(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
