//! Races the scenario against an interrupt and turns the outcome into a process exit code.

use crate::{config::ExerciserConfig, error::Error, scenario};
use replay_log::HttpClient;
use std::{future::Future, sync::Arc};
use tracing::{error, info, warn};

/// Runs the scenario until it finishes or `interrupt` resolves, whichever comes first.
///
/// # Returns
/// `0` when every call completed, `130` when interrupted and `1` on a transport or transcript
/// failure. On interrupt the scenario future is dropped, which closes the transcript with every
/// line written so far.
pub async fn run_until<F>(
    config: &ExerciserConfig,
    http_client: Arc<dyn HttpClient + Send + Sync>,
    interrupt: F,
) -> i32
where
    F: Future<Output = ()>,
{
    let outcome = tokio::select! {
        result = scenario::run(config, http_client) => result,
        () = interrupt => Err(Error::Interrupted),
    };

    match outcome {
        Ok(report) => {
            info!(
                calls = report.calls,
                error_responses = report.error_responses,
                transcript = %config.transcript_path().display(),
                "all API calls completed"
            );
            0
        }
        Err(Error::Interrupted) => {
            warn!("interrupted, transcript left as written so far");
            Error::Interrupted.exit_code()
        }
        Err(e) => {
            error!("scenario aborted: {}", e);
            e.exit_code()
        }
    }
}
