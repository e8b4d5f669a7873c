use egui::{Pos2, Vec2};

/// Used when the viewport has not been measured yet
pub const FALLBACK_VIEWPORT: Vec2 = Vec2::new(1200.0, 800.0);

/// Parameters for scattering gallery items over a viewport
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    /// Side of the square each item is assumed to occupy
    pub footprint: f32,
    /// Gap kept between an item and the viewport edge
    pub padding: f32,
    /// Samples tried per item before the last one is accepted anyway
    pub max_tries: usize,
    /// Minimum centre distance as a fraction of the footprint
    pub min_distance_factor: f32,
    /// Rotation is drawn from `-max_rotation..max_rotation` whole degrees
    pub max_rotation: i32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            footprint: 120.0,
            padding: 8.0,
            max_tries: 200,
            min_distance_factor: 0.9,
            max_rotation: 20,
        }
    }
}

impl PlacementConfig {
    pub fn min_distance(&self) -> f32 {
        self.footprint * self.min_distance_factor
    }
}

/// An item with its cosmetic layout for one pass
#[derive(Debug, Clone, PartialEq)]
pub struct Placed<T> {
    pub item: T,
    /// Centre of the item within the viewport
    pub center: Pos2,
    /// Rotation in degrees
    pub rotation: i32,
}

impl<T> Placed<T> {
    pub fn left(&self) -> f32 {
        self.center.x
    }

    pub fn top(&self) -> f32 {
        self.center.y
    }
}

/// Scatter `items` over `viewport` so that no two centres are closer than
/// [`PlacementConfig::min_distance`].
///
/// This is best effort: after `max_tries` rejected samples an item is placed
/// at the last sample regardless, so dense inputs may overlap.
pub fn place<T>(
    items: impl IntoIterator<Item = T>,
    viewport: Vec2,
    config: &PlacementConfig,
    rng: &mut fastrand::Rng,
) -> Vec<Placed<T>> {
    let viewport = if viewport.x <= 0.0 || viewport.y <= 0.0 {
        FALLBACK_VIEWPORT
    } else {
        viewport
    };

    let half = config.footprint / 2.0;
    let min_x = half + config.padding;
    let max_x = min_x.max(viewport.x - half - config.padding);
    let min_y = half + config.padding;
    let max_y = min_y.max(viewport.y - half - config.padding);
    let min_distance_sq = config.min_distance() * config.min_distance();

    let mut placed: Vec<Placed<T>> = Vec::new();
    for item in items {
        let mut center;
        let mut tries = 0;
        loop {
            center = Pos2::new(
                rng.f32() * (max_x - min_x) + min_x,
                rng.f32() * (max_y - min_y) + min_y,
            );
            tries += 1;
            let collides = placed
                .iter()
                .any(|other| (other.center - center).length_sq() < min_distance_sq);
            if !collides || tries >= config.max_tries {
                break;
            }
        }

        let rotation = if config.max_rotation > 0 {
            rng.i32(-config.max_rotation..config.max_rotation)
        } else {
            0
        };
        placed.push(Placed {
            item,
            center,
            rotation,
        });
    }

    placed
}
