//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{CountrySource, GraphQlCountryClient, Settings};
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match GraphQlCountryClient::from_settings(&settings) {
            Ok(client) => client,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {}", err.describe()),
                )));
                error!("failed to build countries client: {}", err.describe());
                return;
            }
        };

        runtime.block_on(async move {
            info!(endpoint = %client.endpoint(), "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                let cmd_name = cmd.name();
                let event = handle_command(&client, cmd).await;
                if ui_tx.try_send(event).is_err() {
                    warn!(command = cmd_name, "ui event queue unavailable, dropping result");
                }
            }
            info!("backend command channel closed, worker exiting");
        });
    });
}

pub async fn handle_command(source: &dyn CountrySource, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::FetchCountries => {
            info!("backend: fetch_countries");
            match source.list_countries().await {
                Ok(countries) => UiEvent::CountriesLoaded(countries),
                Err(err) => {
                    error!("backend: fetch_countries failed: {}", err.describe());
                    UiEvent::CountriesFailed(UiError::from_message(
                        UiErrorContext::FetchCountries,
                        err.describe(),
                    ))
                }
            }
        }
        BackendCommand::FetchCountryDetail { code } => {
            info!(code = %code, "backend: fetch_country_detail");
            match source.country(&code).await {
                Ok(country) => UiEvent::CountryDetailLoaded(country),
                Err(err) => {
                    error!(code = %code, "backend: fetch_country_detail failed: {}", err.describe());
                    UiEvent::CountryDetailFailed {
                        code,
                        error: UiError::from_message(UiErrorContext::FetchDetail, err.describe()),
                    }
                }
            }
        }
    }
}
