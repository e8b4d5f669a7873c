use std::sync::Arc;

use egui::Vec2;

use crate::backend::GalleryItem;
use crate::gateway::{Gateway, Pending};
use crate::placement::{self, Placed, PlacementConfig};
use crate::texture_manager::TextureManager;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GardenStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Approved pumpkins and their current scatter layout
pub struct Garden {
    status: GardenStatus,
    items: Vec<GalleryItem>,
    /// Indices into `items`
    layout: Vec<Placed<usize>>,
    /// Viewport the layout was computed for; `None` forces a new pass
    layout_viewport: Option<Vec2>,
    config: PlacementConfig,
    rng: fastrand::Rng,
    pub(crate) textures: TextureManager,
    loading: Option<Pending<Vec<GalleryItem>>>,
}

impl Default for Garden {
    fn default() -> Self {
        Self::new(fastrand::Rng::new())
    }
}

impl Garden {
    pub fn new(rng: fastrand::Rng) -> Self {
        Self {
            status: GardenStatus::Loading,
            items: Vec::new(),
            layout: Vec::new(),
            layout_viewport: None,
            config: PlacementConfig::default(),
            rng,
            textures: TextureManager::new(),
            loading: None,
        }
    }

    pub fn status(&self) -> &GardenStatus {
        &self.status
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Fetch visible pumpkins in the background
    pub fn refresh(&mut self, ctx: &egui::Context, gateway: Arc<dyn Gateway>) {
        if self.loading.is_some() {
            return;
        }
        if self.items.is_empty() {
            self.status = GardenStatus::Loading;
        }
        self.loading = Some(Pending::spawn(ctx, move || gateway.fetch_pumpkins(true)));
    }

    /// Pick up a finished fetch, if any
    pub fn poll(&mut self) {
        let Some(result) = self.loading.as_mut().and_then(Pending::poll) else {
            return;
        };
        self.loading = None;
        match result {
            Ok(items) => self.set_items(items),
            Err(e) => {
                log::error!("Loading the garden failed: {e}");
                self.status = GardenStatus::Failed(e.to_string());
            }
        }
    }

    pub fn set_items(&mut self, items: Vec<GalleryItem>) {
        self.textures.retain(|id| items.iter().any(|item| item.id == id));
        self.items = items;
        self.status = GardenStatus::Ready;
        self.layout_viewport = None;
    }

    /// Layout for `viewport`, recomputed when the items or the size changed
    pub fn layout_for(&mut self, viewport: Vec2) -> &[Placed<usize>] {
        let stale = match self.layout_viewport {
            Some(previous) => (previous - viewport).abs().max_elem() > 1.0,
            None => true,
        };
        if stale {
            self.layout = placement::place(0..self.items.len(), viewport, &self.config, &mut self.rng);
            self.layout_viewport = Some(viewport);
        }
        &self.layout
    }
}
