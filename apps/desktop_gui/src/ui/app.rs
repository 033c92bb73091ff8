use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use list_controller::{ListConfig, ListController};
use shared::domain::{Country, CountryCode};
use shared::fetch::FetchState;
use tracing::{debug, info, warn};

use super::forms::{FormError, LoginForm, RegisterForm};
use super::toast::ToastQueue;
use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{reduce, ListIntent, Navigation};

pub const LOGOUT_REDIRECT_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub list_config: ListConfig,
    pub endpoint: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            list_config: ListConfig::default(),
            endpoint: client_core::config::DEFAULT_GRAPHQL_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppViewState {
    Login,
    Register,
    Countries,
    Detail(CountryCode),
}

#[derive(Debug, Clone)]
pub(super) struct DetailState {
    pub(super) code: CountryCode,
    pub(super) country: FetchState<Country>,
}

pub struct CountriesApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    pub(super) startup: StartupConfig,
    pub(super) view_state: AppViewState,
    pub(super) login_form: LoginForm,
    pub(super) register_form: RegisterForm,
    pub(super) form_error: Option<FormError>,
    pub(super) list: Option<ListController>,
    pub(super) detail: Option<DetailState>,
    pub(super) toasts: ToastQueue,
    pending_navigation: Option<(AppViewState, Instant)>,
    pub(super) status: String,
}

impl CountriesApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            startup,
            view_state: AppViewState::Login,
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            form_error: None,
            list: None,
            detail: None,
            toasts: ToastQueue::default(),
            pending_navigation: None,
            status: "Not signed in".to_string(),
        }
    }

    pub fn view_state(&self) -> &AppViewState {
        &self.view_state
    }

    fn set_status(&mut self, message: impl AsRef<str>) {
        self.status = format!(
            "[{}] {}",
            chrono::Local::now().format("%H:%M:%S"),
            message.as_ref()
        );
    }

    pub(super) fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.set_status(message),
                UiEvent::CountriesLoaded(countries) => {
                    let count = countries.len();
                    match self.list.as_mut() {
                        Some(list) => {
                            info!(count, "countries loaded");
                            list.set_source(FetchState::Ready(Arc::from(countries)));
                            self.set_status(format!("Loaded {count} countries"));
                        }
                        None => debug!(count, "countries arrived after logout, discarding"),
                    }
                }
                UiEvent::CountriesFailed(err) => {
                    warn!(category = ?err.category(), "countries fetch failed: {}", err.message());
                    if let Some(list) = self.list.as_mut() {
                        list.set_source(FetchState::Failed(err.summary()));
                    }
                    self.set_status(err.summary());
                }
                UiEvent::CountryDetailLoaded(country) => match self.detail.as_mut() {
                    Some(detail) if detail.code == country.code => {
                        info!(code = %country.code, "country detail loaded");
                        detail.country = FetchState::Ready(country);
                    }
                    _ => debug!(code = %country.code, "stale country detail, discarding"),
                },
                UiEvent::CountryDetailFailed { code, error } => match self.detail.as_mut() {
                    Some(detail) if detail.code == code => {
                        warn!(code = %code, "country detail failed: {}", error.message());
                        detail.country = FetchState::Failed(error.summary());
                        self.set_status(error.summary());
                    }
                    _ => debug!(code = %code, "stale country detail failure, discarding"),
                },
                UiEvent::Error(err) => {
                    warn!(context = ?err.context(), "backend error: {}", err.message());
                    if err.context() == UiErrorContext::BackendStartup {
                        if let Some(list) = self.list.as_mut() {
                            if list.source().is_loading() {
                                list.set_source(FetchState::Failed(err.summary()));
                            }
                        }
                    }
                    self.toasts.error(err.summary());
                    self.set_status(err.summary());
                }
            }
        }
    }

    pub(super) fn submit_login(&mut self) {
        match self.login_form.validate() {
            Ok(credentials) => {
                debug!(?credentials, "login submitted");
                self.form_error = None;
                self.login_form.clear();
                self.enter_countries();
            }
            Err(err) => {
                debug!(error = %err, "login form rejected");
                self.form_error = Some(err);
            }
        }
    }

    pub(super) fn submit_register(&mut self) {
        match self.register_form.validate() {
            Ok(credentials) => {
                debug!(?credentials, "registration submitted");
                self.form_error = None;
                self.register_form.clear();
                self.toasts.success("User registered successfully");
                self.navigate(AppViewState::Login);
            }
            Err(err) => {
                debug!(error = %err, "registration form rejected");
                self.form_error = Some(err);
            }
        }
    }

    fn enter_countries(&mut self) {
        self.list = Some(ListController::new(self.startup.list_config));
        self.detail = None;
        self.navigate(AppViewState::Countries);
        self.set_status("Loading countries...");
        if let Err(err) = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchCountries,
            &mut self.status,
        ) {
            if let Some(list) = self.list.as_mut() {
                list.set_source(FetchState::Failed(err.summary()));
            }
        }
    }

    pub(super) fn logout(&mut self, now: Instant) {
        if self.pending_navigation.is_some() {
            return;
        }
        info!("logging out");
        self.toasts.push_at(
            super::toast::ToastKind::Success,
            "Logged out successfully",
            now,
        );
        self.pending_navigation = Some((AppViewState::Login, now + LOGOUT_REDIRECT_DELAY));
    }

    pub(super) fn logout_pending(&self) -> bool {
        self.pending_navigation.is_some()
    }

    pub(super) fn poll_navigation(&mut self, now: Instant) {
        let due = matches!(&self.pending_navigation, Some((_, at)) if now >= *at);
        if !due {
            return;
        }
        if let Some((target, _)) = self.pending_navigation.take() {
            if target == AppViewState::Login {
                self.list = None;
                self.detail = None;
                self.status = "Signed out".to_string();
            }
            self.navigate(target);
        }
    }

    pub(super) fn navigate(&mut self, target: AppViewState) {
        if self.view_state != target {
            info!(from = ?self.view_state, to = ?target, "navigate");
        }
        self.form_error = None;
        self.view_state = target;
    }

    pub(super) fn apply_intents(&mut self, intents: Vec<ListIntent>) {
        for intent in intents {
            let Some(list) = self.list.as_mut() else {
                return;
            };
            if let Some(Navigation::Detail(code)) = reduce(list, intent) {
                self.open_detail(code);
            }
        }
    }

    fn open_detail(&mut self, code: CountryCode) {
        self.detail = Some(DetailState {
            code: code.clone(),
            country: FetchState::Loading,
        });
        self.navigate(AppViewState::Detail(code.clone()));
        if let Err(err) = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchCountryDetail { code },
            &mut self.status,
        ) {
            if let Some(detail) = self.detail.as_mut() {
                detail.country = FetchState::Failed(err.summary());
            }
        }
    }

    pub(super) fn back_to_list(&mut self) {
        self.detail = None;
        self.navigate(AppViewState::Countries);
    }
}

impl eframe::App for CountriesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.process_ui_events();
        self.poll_navigation(now);

        self.show_status_bar(ctx);
        match self.view_state().clone() {
            AppViewState::Login => self.show_login_screen(ctx),
            AppViewState::Register => self.show_register_screen(ctx),
            AppViewState::Countries => self.show_countries_screen(ctx),
            AppViewState::Detail(_) => self.show_detail_screen(ctx),
        }

        self.toasts.prune(now);
        self.show_toasts(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
