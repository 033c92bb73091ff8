//! egui rendering for each screen. Widgets only collect intents; state changes happen
//! after the frame's panels have been drawn.

use std::time::Instant;

use list_controller::{ComparisonPair, ListController, ListView};
use shared::domain::Country;
use shared::fetch::FetchState;

use super::app::CountriesApp;
use super::forms::{FormError, FormField};
use super::toast::ToastKind;
use crate::controller::reducer::ListIntent;

const CARD_WIDTH: f32 = 380.0;

fn form_text_field(
    ui: &mut egui::Ui,
    id: &'static str,
    label: &str,
    hint: &str,
    value: &mut String,
    password: bool,
) -> egui::Response {
    ui.label(egui::RichText::new(label).strong());
    let edit = egui::TextEdit::singleline(value)
        .id_salt(id)
        .hint_text(
            egui::RichText::new(hint).color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
        )
        .password(password)
        .desired_width(f32::INFINITY);
    ui.add_sized([ui.available_width(), 32.0], edit)
}

fn field_error(ui: &mut egui::Ui, error: Option<&FormError>, field: FormField) {
    if let Some(err) = error.filter(|err| err.field() == field) {
        ui.colored_label(ui.visuals().error_fg_color, err.to_string());
    }
}

fn auth_card(ui: &mut egui::Ui, title: &str, subtitle: &str, add: impl FnOnce(&mut egui::Ui)) {
    let avail = ui.available_size();
    ui.add_space((avail.y * 0.12).clamp(16.0, 120.0));
    ui.vertical_centered(|ui| {
        ui.set_width(CARD_WIDTH.min(avail.x - 24.0));
        egui::Frame::NONE
            .fill(ui.visuals().faint_bg_color)
            .corner_radius(12.0)
            .stroke(egui::Stroke::new(
                1.0,
                ui.visuals().widgets.noninteractive.bg_stroke.color,
            ))
            .inner_margin(egui::Margin::symmetric(20, 18))
            .show(ui, |ui| {
                ui.style_mut().spacing.item_spacing = egui::vec2(8.0, 8.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("🌍").size(24.0));
                    ui.vertical(|ui| {
                        ui.heading(title);
                        ui.weak(subtitle);
                    });
                });
                ui.add_space(6.0);
                add(ui);
            });
    });
}

fn primary_button(ui: &mut egui::Ui, label: &str) -> bool {
    let button = egui::Button::new(egui::RichText::new(label).strong().size(16.0))
        .min_size(egui::vec2(ui.available_width(), 36.0));
    ui.add(button).clicked()
}

impl CountriesApp {
    pub(super) fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(egui::RichText::new(&self.startup.endpoint).weak());
                });
            });
        });
    }

    pub(super) fn show_login_screen(&mut self, ctx: &egui::Context) {
        let mut submit = false;
        let mut go_register = false;
        let error = self.form_error.clone();
        let form = &mut self.login_form;

        egui::CentralPanel::default().show(ctx, |ui| {
            auth_card(ui, "Sign in", "Sign in to browse countries.", |ui| {
                form_text_field(
                    ui,
                    "login_email",
                    "Email",
                    "you@example.com",
                    &mut form.email,
                    false,
                );
                field_error(ui, error.as_ref(), FormField::Email);
                let password = form_text_field(
                    ui,
                    "login_password",
                    "Password",
                    "Your password",
                    &mut form.password,
                    true,
                );
                field_error(ui, error.as_ref(), FormField::Password);

                let enter_pressed =
                    password.lost_focus() && ctx.input(|i| i.key_pressed(egui::Key::Enter));
                ui.add_space(6.0);
                if primary_button(ui, "Sign in") || enter_pressed {
                    submit = true;
                }
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    ui.small("Don't have an account?");
                    if ui.link("Register").clicked() {
                        go_register = true;
                    }
                });
            });
        });

        if submit {
            self.submit_login();
        } else if go_register {
            self.navigate(super::app::AppViewState::Register);
        }
    }

    pub(super) fn show_register_screen(&mut self, ctx: &egui::Context) {
        let mut submit = false;
        let mut go_login = false;
        let error = self.form_error.clone();
        let form = &mut self.register_form;

        egui::CentralPanel::default().show(ctx, |ui| {
            auth_card(ui, "Create account", "Register to browse countries.", |ui| {
                form_text_field(
                    ui,
                    "register_name",
                    "Full name",
                    "Ada Lovelace",
                    &mut form.name,
                    false,
                );
                field_error(ui, error.as_ref(), FormField::Name);
                form_text_field(
                    ui,
                    "register_email",
                    "Email",
                    "you@example.com",
                    &mut form.email,
                    false,
                );
                field_error(ui, error.as_ref(), FormField::Email);
                form_text_field(
                    ui,
                    "register_password",
                    "Password",
                    "Choose a password",
                    &mut form.password,
                    true,
                );
                field_error(ui, error.as_ref(), FormField::Password);

                ui.add_space(6.0);
                if primary_button(ui, "Register") {
                    submit = true;
                }
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    ui.small("Already have an account?");
                    if ui.link("Sign in").clicked() {
                        go_login = true;
                    }
                });
            });
        });

        if submit {
            self.submit_register();
        } else if go_login {
            self.navigate(super::app::AppViewState::Login);
        }
    }

    pub(super) fn show_countries_screen(&mut self, ctx: &egui::Context) {
        let mut intents = Vec::new();
        let mut logout = false;
        let logout_pending = self.logout_pending();
        let list = self.list.as_ref();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Countries List");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(!logout_pending, egui::Button::new("Log out"))
                        .clicked()
                    {
                        logout = true;
                    }
                });
            });
            ui.separator();

            let Some(list) = list else {
                ui.weak("Not signed in.");
                return;
            };
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| countries_body(ui, list, &mut intents));
        });

        if logout {
            self.logout(Instant::now());
        }
        self.apply_intents(intents);
    }

    pub(super) fn show_detail_screen(&mut self, ctx: &egui::Context) {
        let mut back = false;
        let detail = self.detail.as_ref();

        egui::CentralPanel::default().show(ctx, |ui| {
            if ui.button("⬅ Back").clicked() {
                back = true;
            }
            ui.separator();

            let Some(detail) = detail else {
                return;
            };
            match &detail.country {
                FetchState::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Loading {}...", detail.code));
                    });
                }
                FetchState::Failed(reason) => {
                    ui.colored_label(ui.visuals().error_fg_color, reason);
                }
                FetchState::Ready(country) => country_details(ui, country),
            }
        });

        if back {
            self.back_to_list();
        }
    }

    pub(super) fn show_toasts(&self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toast_stack"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in self.toasts.iter() {
                    let (fill, stroke) = match toast.kind {
                        ToastKind::Success => (
                            egui::Color32::from_rgb(34, 94, 60),
                            egui::Color32::from_rgb(76, 160, 110),
                        ),
                        ToastKind::Error => (
                            egui::Color32::from_rgb(111, 53, 53),
                            egui::Color32::from_rgb(175, 96, 96),
                        ),
                    };
                    egui::Frame::NONE
                        .fill(fill)
                        .stroke(egui::Stroke::new(1.0, stroke))
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(&toast.message).color(egui::Color32::WHITE),
                            );
                        });
                    ui.add_space(6.0);
                }
            });
    }
}

fn countries_body(ui: &mut egui::Ui, list: &ListController, intents: &mut Vec<ListIntent>) {
    match list.source() {
        FetchState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading countries...");
            });
            return;
        }
        FetchState::Failed(reason) => {
            ui.colored_label(ui.visuals().error_fg_color, reason);
            return;
        }
        FetchState::Ready(_) => {}
    }

    let view = list.view();
    let mut search = view.search_text.to_string();
    let search_box = egui::TextEdit::singleline(&mut search)
        .hint_text("Search for a country...")
        .desired_width(f32::INFINITY);
    if ui.add(search_box).changed() {
        intents.push(ListIntent::SearchTextChanged(search));
    }
    ui.add_space(4.0);
    ui.label("Please select two countries to compare:");

    if view.page.is_empty() {
        ui.weak("No countries match your search.");
    } else {
        country_table(ui, list, &view, intents);
    }

    if view.shows_pagination() {
        pagination_row(ui, &view, intents);
    }

    if let Some(pair) = view.comparison {
        ui.add_space(10.0);
        comparison_panel(ui, pair);
    }
}

fn country_table(
    ui: &mut egui::Ui,
    list: &ListController,
    view: &ListView<'_>,
    intents: &mut Vec<ListIntent>,
) {
    egui::Grid::new("countries_table")
        .striped(true)
        .num_columns(4)
        .spacing([18.0, 6.0])
        .show(ui, |ui| {
            ui.strong("Select");
            ui.strong("Flag");
            ui.strong("Name");
            ui.strong("Details");
            ui.end_row();

            for country in &view.page {
                let mut checked = list.is_selected(&country.code);
                let enabled = list.can_select(&country.code);
                if ui
                    .add_enabled(enabled, egui::Checkbox::without_text(&mut checked))
                    .changed()
                {
                    intents.push(ListIntent::ToggleSelect(country.code.clone()));
                }
                ui.label(egui::RichText::new(&country.emoji).size(20.0));
                ui.label(&country.name);
                if ui.button("Details").clicked() {
                    intents.push(ListIntent::ViewDetail(country.code.clone()));
                }
                ui.end_row();
            }
        });
}

fn pagination_row(ui: &mut egui::Ui, view: &ListView<'_>, intents: &mut Vec<ListIntent>) {
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(view.has_previous(), egui::Button::new("Previous"))
            .clicked()
        {
            intents.push(ListIntent::PageChanged(view.current_page - 1));
        }
        ui.label(format!("Page {} of {}", view.current_page, view.total_pages));
        if ui
            .add_enabled(view.has_next(), egui::Button::new("Next"))
            .clicked()
        {
            intents.push(ListIntent::PageChanged(view.current_page + 1));
        }
    });
}

fn comparison_panel(ui: &mut egui::Ui, pair: ComparisonPair<'_>) {
    let ComparisonPair { first, second } = pair;
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(14, 10))
        .show(ui, |ui| {
            ui.heading("Country Comparison");
            ui.add_space(4.0);
            egui::Grid::new("comparison_grid")
                .num_columns(3)
                .spacing([28.0, 6.0])
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(format!("{} {}", first.emoji, first.name)).strong(),
                    );
                    ui.label(
                        egui::RichText::new("VS")
                            .strong()
                            .color(ui.visuals().warn_fg_color),
                    );
                    ui.label(
                        egui::RichText::new(format!("{} {}", second.emoji, second.name)).strong(),
                    );
                    ui.end_row();

                    let rows = [
                        (
                            "Capital",
                            first.capital_label().to_string(),
                            second.capital_label().to_string(),
                        ),
                        (
                            "Currency",
                            first.currency_label().to_string(),
                            second.currency_label().to_string(),
                        ),
                        ("Languages", first.language_names(), second.language_names()),
                    ];
                    for (label, left, right) in rows {
                        ui.label(left);
                        ui.weak(label);
                        ui.label(right);
                        ui.end_row();
                    }
                });
        });
}

fn country_details(ui: &mut egui::Ui, country: &Country) {
    ui.heading(format!("{} {}", country.emoji, country.name));
    ui.add_space(8.0);
    egui::Grid::new("country_detail_grid")
        .num_columns(2)
        .spacing([18.0, 6.0])
        .show(ui, |ui| {
            ui.strong("Capital:");
            ui.label(country.capital_label());
            ui.end_row();
            ui.strong("Currency:");
            ui.label(country.currency_label());
            ui.end_row();
            ui.strong("Languages:");
            ui.label(country.language_names());
            ui.end_row();
        });
}
