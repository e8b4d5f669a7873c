use std::sync::Arc;

use crate::backend::SubmitReceipt;
use crate::config::AppConfig;
use crate::drawing::Drawing;
use crate::gallery::Garden;
use crate::gateway::{self, Gateway, Pending};
use crate::input::InputHandler;
use crate::panels::{self, AdminState};
use crate::renderer::Renderer;
use crate::stroke::{PenColor, Tool};
use crate::submission::{self, ClientId, CLIENT_ID_KEY};
use crate::toast::Toasts;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Preferences {
    pub tool: Tool,
    pub color: PenColor,
    pub drawing: Drawing,
}

pub struct PumpkinApp {
    pub(crate) tool: Tool,
    pub(crate) color: PenColor,
    pub(crate) drawing: Drawing,
    pub(crate) client_id: ClientId,
    pub(crate) renderer: Renderer,
    pub(crate) input: InputHandler,
    pub(crate) garden: Garden,
    pub(crate) admin: AdminState,
    pub(crate) show_admin: bool,
    pub(crate) toasts: Toasts,
    pub(crate) gateway: Arc<dyn Gateway>,
    submitting: Option<Pending<SubmitReceipt>>,
}

impl PumpkinApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let (preferences, stored_id) = match cc.storage {
            Some(storage) => (
                eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default(),
                storage.get_string(CLIENT_ID_KEY),
            ),
            None => (Preferences::default(), None),
        };

        let mut app = Self::with_gateway(gateway::from_config(&config), preferences, ClientId::from_stored(stored_id));
        app.garden.refresh(&cc.egui_ctx, app.gateway.clone());
        app
    }

    pub fn with_gateway(gateway: Arc<dyn Gateway>, preferences: Preferences, client_id: ClientId) -> Self {
        Self {
            tool: preferences.tool,
            color: preferences.color,
            drawing: preferences.drawing,
            client_id,
            renderer: Renderer::new(),
            input: InputHandler::default(),
            garden: Garden::default(),
            admin: AdminState::default(),
            show_admin: false,
            toasts: Toasts::default(),
            gateway,
            submitting: None,
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    pub fn undo(&mut self) {
        self.drawing.undo();
    }

    pub fn redo(&mut self) {
        self.drawing.redo();
    }

    /// Export the canvas and send it for moderation
    pub fn save_pumpkin(&mut self, ctx: &egui::Context) {
        if self.submitting.is_some() {
            return;
        }
        let now = ctx.input(|i| i.time);

        let request = match submission::prepare_submission(&self.drawing, self.renderer.canvas_size(), &self.client_id) {
            Ok(request) => request,
            Err(e) => {
                log::error!("Exporting the canvas failed: {e}");
                self.toasts.show(e.to_string(), now);
                return;
            }
        };

        log::info!("Submitting pumpkin for {}", self.client_id);
        let gateway = self.gateway.clone();
        self.submitting = Some(Pending::spawn(ctx, move || gateway.submit(&request)));
    }

    fn poll_submission(&mut self, now: f64) {
        let Some(result) = self.submitting.as_mut().and_then(Pending::poll) else {
            return;
        };
        self.submitting = None;
        match result {
            Ok(receipt) => {
                self.drawing.clear();
                self.toasts.show(format!("Pumpkin saved 🎃 ({} left)", receipt.remaining), now);
            }
            Err(e) => {
                log::warn!("Submission failed: {e}");
                self.toasts.show(e.to_string(), now);
            }
        }
    }
}

impl eframe::App for PumpkinApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let preferences = Preferences {
            tool: self.tool,
            color: self.color,
            drawing: self.drawing.clone(),
        };
        eframe::set_value(storage, eframe::APP_KEY, &preferences);
        storage.set_string(CLIENT_ID_KEY, self.client_id.to_string());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.poll_submission(now);
        self.garden.poll();
        if self.admin.poll(&mut self.toasts, now) {
            self.garden.refresh(ctx, self.gateway.clone());
        }

        let half_width = (ctx.screen_rect().width() / 2.0).max(1.0);
        egui::SidePanel::left("garden_panel")
            .resizable(false)
            .exact_width(half_width)
            .show(ctx, |ui| panels::garden_panel(self, ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            panels::tools_panel(self, ui);
            ui.separator();
            egui::TopBottomPanel::bottom("save_row")
                .show_separator_line(false)
                .show_inside(ui, |ui| panels::save_row(self, ui));
            panels::canvas_panel(self, ui);
        });

        panels::admin_window(self, ctx);
        panels::toast_overlay(self, ctx, now);
    }
}
