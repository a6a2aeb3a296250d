//! The prediction form application: form state, event handling, rendering.

use crossbeam_channel::{Receiver, Sender};

use client_core::display::{format_price, humanize_token};
use client_core::{FormSession, ModelListing};
use shared::domain::FormField;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const OPTIONS_LOAD_FAILED: &str = "Failed to load car options. Use Retry to reload.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionsState {
    Loading,
    Ready,
    Failed,
}

pub struct PredictorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: FormSession,
    options_state: OptionsState,
    prediction_pending: bool,
    result: String,
    status: String,
}

impl PredictorApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            session: FormSession::default(),
            options_state: OptionsState::Loading,
            prediction_pending: false,
            result: String::new(),
            status: "Loading car options".to_string(),
        };
        app.request_options_load();
        app
    }

    fn request_options_load(&mut self) {
        self.options_state = OptionsState::Loading;
        self.result.clear();
        dispatch_backend_command(&self.cmd_tx, BackendCommand::LoadOptions, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::OptionsLoaded(catalog) => {
                    self.session.set_catalog(catalog);
                    self.options_state = OptionsState::Ready;
                    self.status = "Options loaded".to_string();
                }
                UiEvent::PredictionReady(price) => {
                    self.prediction_pending = false;
                    self.result = prediction_result_line(price);
                    self.status.clear();
                }
                UiEvent::Error(err) => self.apply_error(err),
            }
        }
    }

    fn apply_error(&mut self, err: UiError) {
        match err.context() {
            UiErrorContext::BackendStartup | UiErrorContext::LoadOptions => {
                self.options_state = OptionsState::Failed;
                self.prediction_pending = false;
                self.result = OPTIONS_LOAD_FAILED.to_string();
                self.status = err.message().to_string();
            }
            UiErrorContext::Predict => {
                self.prediction_pending = false;
                self.result = prediction_error_line(&err);
                self.status.clear();
            }
        }
    }

    fn on_submit(&mut self) {
        match self.session.build_request() {
            Ok(request) => {
                self.prediction_pending = true;
                self.result.clear();
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::Predict { request },
                    &mut self.status,
                );
            }
            Err(err) => {
                self.result = err.to_string();
            }
        }
    }

    fn show_make_selector(&mut self, ui: &mut egui::Ui) {
        let selected = if self.session.make.is_empty() {
            FormField::Make.select_placeholder()
        } else {
            humanize_token(&self.session.make)
        };
        let makes: Vec<String> = self
            .session
            .catalog()
            .map(|catalog| catalog.makes.clone())
            .unwrap_or_default();

        let mut choice: Option<String> = None;
        egui::ComboBox::from_id_salt("make_combo")
            .selected_text(selected)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(
                        self.session.make.is_empty(),
                        FormField::Make.select_placeholder(),
                    )
                    .clicked()
                {
                    choice = Some(String::new());
                }
                for make in &makes {
                    if ui
                        .selectable_label(self.session.make == *make, humanize_token(make))
                        .clicked()
                    {
                        choice = Some(make.clone());
                    }
                }
            });
        if let Some(make) = choice {
            self.session.select_make(make);
        }
    }

    fn show_model_selector(&mut self, ui: &mut egui::Ui) {
        let models = match self.session.visible_models() {
            ModelListing::Models(models) => models,
            ModelListing::NoModelsForMake => {
                // The dropdown stays visible but inert, mirroring the
                // single-placeholder state of the reference form.
                ui.add_enabled_ui(false, |ui| {
                    egui::ComboBox::from_id_salt("model_combo")
                        .selected_text("No models found for this make")
                        .width(ui.available_width())
                        .show_ui(ui, |_ui| {});
                });
                return;
            }
        };

        let selected = if self.session.model.is_empty() {
            FormField::Model.select_placeholder()
        } else {
            humanize_token(&self.session.model)
        };
        egui::ComboBox::from_id_salt("model_combo")
            .selected_text(selected)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                ui.selectable_value(
                    &mut self.session.model,
                    String::new(),
                    FormField::Model.select_placeholder(),
                );
                for model in &models {
                    ui.selectable_value(
                        &mut self.session.model,
                        model.clone(),
                        humanize_token(model),
                    );
                }
            });
    }

    fn show_condition_selector(&mut self, ui: &mut egui::Ui) {
        let selected = if self.session.condition.is_empty() {
            FormField::Condition.select_placeholder()
        } else {
            humanize_token(&self.session.condition)
        };
        let conditions: Vec<String> = self
            .session
            .catalog()
            .map(|catalog| catalog.conditions.clone())
            .unwrap_or_default();

        egui::ComboBox::from_id_salt("condition_combo")
            .selected_text(selected)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                ui.selectable_value(
                    &mut self.session.condition,
                    String::new(),
                    FormField::Condition.select_placeholder(),
                );
                for condition in &conditions {
                    ui.selectable_value(
                        &mut self.session.condition,
                        condition.clone(),
                        humanize_token(condition),
                    );
                }
            });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("prediction_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .min_col_width(110.0)
            .show(ui, |ui| {
                ui.label(FormField::Make.label());
                self.show_make_selector(ui);
                ui.end_row();

                ui.label(FormField::Model.label());
                self.show_model_selector(ui);
                ui.end_row();

                ui.label(FormField::Condition.label());
                self.show_condition_selector(ui);
                ui.end_row();

                ui.label(FormField::Age.label());
                ui.add(
                    egui::TextEdit::singleline(&mut self.session.age)
                        .id_salt("age_input")
                        .hint_text("Years"),
                );
                ui.end_row();

                ui.label(FormField::EngineSize.label());
                ui.add(
                    egui::TextEdit::singleline(&mut self.session.engine_size)
                        .id_salt("engine_size_input")
                        .hint_text("Litres"),
                );
                ui.end_row();

                ui.label(FormField::HorsePower.label());
                ui.add(
                    egui::TextEdit::singleline(&mut self.session.horse_power)
                        .id_salt("horse_power_input")
                        .hint_text("HP"),
                );
                ui.end_row();
            });

        ui.add_space(12.0);

        let can_predict = self.options_state == OptionsState::Ready && !self.prediction_pending;
        let predict_label = if self.prediction_pending {
            "Predicting..."
        } else {
            "Predict Price"
        };
        ui.horizontal(|ui| {
            if ui
                .add_enabled(can_predict, egui::Button::new(predict_label))
                .clicked()
            {
                self.on_submit();
            }
            if self.options_state == OptionsState::Failed && ui.button("Retry").clicked() {
                self.request_options_load();
            }
        });
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Car Price Prediction");
            ui.add_space(8.0);

            self.show_form(ui);

            if !self.result.is_empty() {
                ui.add_space(12.0);
                ui.separator();
                ui.label(egui::RichText::new(&self.result).strong());
            }

            if !self.status.is_empty() {
                ui.add_space(8.0);
                ui.small(&self.status);
            }
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

fn prediction_result_line(price: f64) -> String {
    format!("Estimated Price: {}", format_price(price))
}

fn prediction_error_line(err: &UiError) -> String {
    match err.category() {
        UiErrorCategory::Api => format!("Error: {}", err.message()),
        _ => format!("Request failed: {}", err.message()),
    }
}
