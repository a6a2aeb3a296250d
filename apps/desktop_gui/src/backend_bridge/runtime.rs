//! Backend worker thread: owns the tokio runtime and the HTTP client.

use std::thread;

use crossbeam_channel::{Receiver, Sender};

use client_core::{PredictionApi, PredictorClient};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Spawns the backend worker thread. The worker builds its own tokio
/// runtime so the UI thread never blocks on network calls; failures
/// before the command loop starts are reported as error events.
pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(err) => {
                tracing::error!(error = %err, "failed to build backend tokio runtime");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to start backend runtime: {err}"),
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let client = match PredictorClient::new(&server_url) {
                Ok(client) => client,
                Err(err) => {
                    tracing::error!(error = %err, url = %server_url, "invalid server url");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                        UiErrorContext::BackendStartup,
                        &err,
                    )));
                    return;
                }
            };

            tracing::info!(url = %server_url, "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadOptions => match client.fetch_options().await {
                        Ok(catalog) => {
                            let _ = ui_tx.try_send(UiEvent::OptionsLoaded(catalog));
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "options load failed");
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                                UiErrorContext::LoadOptions,
                                &err,
                            )));
                        }
                    },
                    BackendCommand::Predict { request } => match client.predict(&request).await {
                        Ok(price) => {
                            let _ = ui_tx.try_send(UiEvent::PredictionReady(price));
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "prediction failed");
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                                UiErrorContext::Predict,
                                &err,
                            )));
                        }
                    },
                }
            }

            tracing::info!("ui command channel closed, backend worker exiting");
        });
    });
}
