use std::sync::Arc;

use egui::{Color32, Vec2};

use crate::backend::{ApiError, GalleryItem, ModerationAction, ModerationRequest};
use crate::error::GatewayError;
use crate::gateway::{Gateway, Pending};
use crate::texture_manager::TextureManager;
use crate::toast::Toasts;
use crate::PumpkinApp;

const THUMBNAIL_SIZE: f32 = 128.0;

struct Moderation {
    id: i64,
    action: ModerationAction,
    pending: Pending<()>,
}

/// Login, pending list and in-flight moderation calls of the admin window
#[derive(Default)]
pub struct AdminState {
    password_input: String,
    /// Set once the administrator entered a password
    password: Option<String>,
    pending: Vec<GalleryItem>,
    textures: TextureManager,
    loading: Option<Pending<Vec<GalleryItem>>>,
    moderations: Vec<Moderation>,
    error: Option<String>,
}

impl AdminState {
    pub fn is_authenticated(&self) -> bool {
        self.password.is_some()
    }

    pub fn pending(&self) -> &[GalleryItem] {
        &self.pending
    }

    pub fn login(&mut self, ctx: &egui::Context, gateway: Arc<dyn Gateway>) {
        if self.password_input.is_empty() {
            self.error = Some("Enter the admin password".to_string());
            return;
        }
        self.password = Some(std::mem::take(&mut self.password_input));
        self.error = None;
        self.refresh(ctx, gateway);
    }

    pub fn logout(&mut self) {
        self.password = None;
        self.pending.clear();
        self.textures.clear_cache();
    }

    /// Reload pumpkins waiting for approval
    pub fn refresh(&mut self, ctx: &egui::Context, gateway: Arc<dyn Gateway>) {
        if self.loading.is_some() {
            return;
        }
        self.loading = Some(Pending::spawn(ctx, move || gateway.fetch_pumpkins(false)));
    }

    pub fn moderate(&mut self, ctx: &egui::Context, gateway: Arc<dyn Gateway>, id: i64, action: ModerationAction) {
        let Some(password) = self.password.clone() else {
            return;
        };
        if self.moderations.iter().any(|m| m.id == id) {
            return;
        }
        let request = ModerationRequest::new(action, id, password);
        self.moderations.push(Moderation {
            id,
            action,
            pending: Pending::spawn(ctx, move || gateway.moderate(&request)),
        });
    }

    /// Collect finished calls.
    ///
    /// Returns true when a pumpkin was approved, i.e. the garden changed.
    pub fn poll(&mut self, toasts: &mut Toasts, now: f64) -> bool {
        if let Some(result) = self.loading.as_mut().and_then(Pending::poll) {
            self.loading = None;
            match result {
                Ok(items) => {
                    self.textures.retain(|id| items.iter().any(|item| item.id == id));
                    self.pending = items;
                    self.error = None;
                }
                Err(e) => self.error = Some(e.to_string()),
            }
        }

        let mut approved = false;
        let mut finished = Vec::new();
        for (index, moderation) in self.moderations.iter_mut().enumerate() {
            if let Some(result) = moderation.pending.poll() {
                finished.push((index, result));
            }
        }
        for (index, result) in finished.into_iter().rev() {
            let moderation = self.moderations.remove(index);
            match result {
                Ok(()) => {
                    log::info!("Pumpkin {}: {}", moderation.id, moderation.action.as_str());
                    self.pending.retain(|item| item.id != moderation.id);
                    approved |= moderation.action == ModerationAction::Approve;
                }
                Err(e) => {
                    if is_wrong_password(&e) {
                        self.logout();
                    }
                    toasts.show(e.to_string(), now);
                }
            }
        }
        approved
    }

    fn is_busy(&self, id: i64) -> bool {
        self.moderations.iter().any(|m| m.id == id)
    }
}

fn is_wrong_password(error: &GatewayError) -> bool {
    matches!(error, GatewayError::Rejected(message) if *message == ApiError::WrongPassword.to_string())
}

pub fn admin_window(app: &mut PumpkinApp, ctx: &egui::Context) {
    let mut open = app.show_admin;
    egui::Window::new("Moderation")
        .open(&mut open)
        .default_size(Vec2::new(640.0, 480.0))
        .show(ctx, |ui| {
            if app.admin.is_authenticated() {
                pending_list(app, ui);
            } else {
                login_form(app, ui);
            }
        });
    app.show_admin = open;
}

fn login_form(app: &mut PumpkinApp, ui: &mut egui::Ui) {
    ui.heading("Administrator access");
    let response = ui.add(egui::TextEdit::singleline(&mut app.admin.password_input).password(true).hint_text("Password"));
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    if ui.button("Enter").clicked() || submitted {
        app.admin.login(ui.ctx(), app.gateway.clone());
    }
    if let Some(error) = &app.admin.error {
        ui.colored_label(Color32::from_rgb(0xdc, 0x26, 0x26), error);
    }
}

fn pending_list(app: &mut PumpkinApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.heading("Awaiting approval");
        if ui.button("Refresh").clicked() {
            app.admin.refresh(ui.ctx(), app.gateway.clone());
        }
        if ui.button("Log out").clicked() {
            app.admin.logout();
        }
    });

    if app.admin.loading.is_some() {
        ui.spinner();
    }
    if let Some(error) = &app.admin.error {
        ui.colored_label(Color32::from_rgb(0xdc, 0x26, 0x26), error);
    }
    if app.admin.pending.is_empty() && app.admin.loading.is_none() {
        ui.label("No pumpkins waiting.");
        return;
    }

    let ctx = ui.ctx().clone();
    let mut chosen = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            for item in app.admin.pending.clone() {
                let busy = app.admin.is_busy(item.id);
                ui.vertical(|ui| {
                    match app.admin.textures.get_or_load(&ctx, &item) {
                        Some(texture) => {
                            ui.add(egui::Image::from_texture(texture).fit_to_exact_size(Vec2::splat(THUMBNAIL_SIZE)));
                        }
                        None => {
                            ui.label(format!("pumpkin-{}", item.id));
                        }
                    }
                    ui.horizontal(|ui| {
                        if ui.add_enabled(!busy, egui::Button::new("Approve")).clicked() {
                            chosen = Some((item.id, ModerationAction::Approve));
                        }
                        if ui.add_enabled(!busy, egui::Button::new("Delete")).clicked() {
                            chosen = Some((item.id, ModerationAction::Reject));
                        }
                    });
                });
            }
        });
    });

    if let Some((id, action)) = chosen {
        app.admin.moderate(&ctx, app.gateway.clone(), id, action);
    }
}
