//! Background task publishing the live metrics record to the UI.
//!
//! Runs on the embassy executor thread. Each cycle fetches the record,
//! publishes the resulting [`MetricsStatus`] and then waits for either the
//! poll interval or a refresh request from the UI, whichever comes first.
//! Failures are reported as advisory statuses and the loop keeps going.

use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Timer};

use super::{MetricsClient, MetricsStatus, NetworkMetrics};
use crate::config::MetricsConfig;
use crate::ui::{UICommand, UIRefreshState};
use crate::{UICommandQueueReceiver, UIRefreshQueueSender};

/// Map a fetch result to the status shown in the UI.
pub fn status_from(result: Result<Option<NetworkMetrics>, String>) -> MetricsStatus {
    match result {
        Ok(Some(metrics)) => MetricsStatus::Live(metrics, chrono::Local::now()),
        Ok(None) => MetricsStatus::Unavailable,
        Err(message) => MetricsStatus::Error(message),
    }
}

/// Discard queued refresh requests. Returns how many were dropped.
///
/// Requests that arrived while a fetch was running are answered by that
/// fetch's result.
fn drain_refresh_requests(ui_command_rx: &UICommandQueueReceiver) -> usize {
    let mut drained = 0;
    while let Ok(UICommand::RefreshMetrics) = ui_command_rx.try_receive() {
        drained += 1;
    }
    drained
}

/// Poll the live metrics feed forever.
///
/// # Parameters
///
/// * `config` - Feed configuration; `None` publishes `Unavailable` and only answers refresh requests
/// * `ui_refresh_tx` - Channel for sending status updates to the UI
/// * `ui_command_rx` - Channel for receiving refresh requests
#[embassy_executor::task]
pub async fn metrics_feed_task(config: Option<MetricsConfig>, ui_refresh_tx: UIRefreshQueueSender, ui_command_rx: UICommandQueueReceiver) {
    match config {
        Some(config) => run_feed(config, ui_refresh_tx, ui_command_rx).await,
        None => {
            log::info!("Live metrics feed not configured");
            run_unconfigured(ui_refresh_tx, ui_command_rx).await
        }
    }
}

/// Answer every refresh request with `Unavailable`.
async fn run_unconfigured(ui_refresh_tx: UIRefreshQueueSender, ui_command_rx: UICommandQueueReceiver) {
    loop {
        ui_refresh_tx.send(UIRefreshState::MetricsUpdated(MetricsStatus::Unavailable)).await;
        let UICommand::RefreshMetrics = ui_command_rx.receive().await;
    }
}

/// The feed cannot recover without a client: alert the user once and leave an error status behind.
async fn report_client_failure(ui_refresh_tx: &UIRefreshQueueSender, error: String) {
    log::error!("{}", error);
    ui_refresh_tx
        .send(UIRefreshState::Alert(format!("Live metrics are disabled.\n\n{}", error)))
        .await;
    ui_refresh_tx.send(UIRefreshState::MetricsUpdated(MetricsStatus::Error(error))).await;
}

async fn run_feed(config: MetricsConfig, ui_refresh_tx: UIRefreshQueueSender, ui_command_rx: UICommandQueueReceiver) {
    let poll_interval = Duration::from_millis(config.poll_interval().as_millis() as u64);
    let client = match MetricsClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            report_client_failure(&ui_refresh_tx, e).await;
            return;
        }
    };
    log::info!("Live metrics feed polling {} every {}s", client.record_url(), poll_interval.as_secs());

    loop {
        // Blocking call; the executor thread only hosts this task
        let result = client.fetch();
        if let Err(e) = &result {
            log::warn!("Live metrics fetch failed: {}", e);
        }
        let dropped = drain_refresh_requests(&ui_command_rx);
        if dropped > 0 {
            log::debug!("Collapsed {} refresh requests into the last fetch", dropped);
        }
        ui_refresh_tx.send(UIRefreshState::MetricsUpdated(status_from(result))).await;

        match select(Timer::after(poll_interval), ui_command_rx.receive()).await {
            Either::First(_) => {}
            Either::Second(UICommand::RefreshMetrics) => log::debug!("Live metrics refresh requested"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{UICommandQueue, UIRefreshQueue};
    use embassy_futures::block_on;

    fn queues() -> (&'static UIRefreshQueue, &'static UICommandQueue) {
        (Box::leak(Box::new(UIRefreshQueue::new())), Box::leak(Box::new(UICommandQueue::new())))
    }

    fn expect_status(msg: UIRefreshState) -> MetricsStatus {
        match msg {
            UIRefreshState::MetricsUpdated(status) => status,
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn fetch_results_map_to_statuses() {
        assert_eq!(status_from(Ok(None)), MetricsStatus::Unavailable);
        assert_eq!(status_from(Err("Network error".into())), MetricsStatus::Error("Network error".into()));

        let metrics = NetworkMetrics {
            latency: "9 ms".into(),
            ..NetworkMetrics::default()
        };
        let status = status_from(Ok(Some(metrics.clone())));
        assert_eq!(status.metrics(), Some(&metrics));
    }

    #[test]
    fn unconfigured_feed_answers_each_refresh_with_unavailable() {
        let (refresh, commands) = queues();
        let (refresh_rx, command_tx) = (refresh.receiver(), commands.sender());

        let ui = async {
            let mut statuses = vec![expect_status(refresh_rx.receive().await)];
            for _ in 0..2 {
                command_tx.send(UICommand::RefreshMetrics).await;
                statuses.push(expect_status(refresh_rx.receive().await));
            }
            statuses
        };

        match block_on(select(run_unconfigured(refresh.sender(), commands.receiver()), ui)) {
            Either::Second(statuses) => assert_eq!(statuses, vec![MetricsStatus::Unavailable; 3]),
            Either::First(()) => panic!("feed loop returned"),
        }
        assert!(refresh_rx.try_receive().is_err());
    }

    #[test]
    fn client_failure_raises_an_alert_and_an_error_status() {
        let (refresh, _) = queues();
        block_on(report_client_failure(&refresh.sender(), "Failed to create HTTP client: tls".into()));

        let rx = refresh.receiver();
        match rx.try_receive() {
            Ok(UIRefreshState::Alert(text)) => assert!(text.contains("Failed to create HTTP client: tls")),
            other => panic!("expected alert, got {:?}", other),
        }
        assert_eq!(
            expect_status(rx.try_receive().unwrap()),
            MetricsStatus::Error("Failed to create HTTP client: tls".into())
        );
        assert!(rx.try_receive().is_err());
    }

    #[test]
    fn queued_refresh_requests_collapse() {
        let (_, commands) = queues();
        let (tx, rx) = (commands.sender(), commands.receiver());
        for _ in 0..3 {
            tx.try_send(UICommand::RefreshMetrics).unwrap();
        }
        assert_eq!(drain_refresh_requests(&rx), 3);
        assert_eq!(drain_refresh_requests(&rx), 0);
        assert!(rx.try_receive().is_err());
    }
}
