//! Turns simulation instances into surface draw calls

use crate::surface::{Rect, Surface};
use crate::texture_cache::TextureCache;
use sakura_core::Color;
use sakura_particles::{PetalInstance, StarInstance};

/// Sprites are drawn at this fraction of their texture side
pub const PETAL_DRAW_SCALE: f32 = 0.35;

/// Destination rectangle for a petal sprite of side `side`
pub fn petal_rect(instance: &PetalInstance, sprite_width: u32, sprite_height: u32) -> Rect {
    let w = sprite_width as f32 * PETAL_DRAW_SCALE * instance.scale;
    let h = sprite_height as f32 * PETAL_DRAW_SCALE * instance.scale;
    Rect::centered(instance.position, w, h)
}

pub fn draw_petal<S: Surface + ?Sized>(
    surface: &mut S,
    cache: &mut TextureCache,
    instance: &PetalInstance,
) {
    let sprite = cache.get(instance.size);
    let dest = petal_rect(instance, sprite.width(), sprite.height());
    surface.draw_sprite(&sprite, dest, instance.alpha);
}

/// Draw petals in the order given; callers sort far-to-near first
pub fn draw_petals<S, I>(surface: &mut S, cache: &mut TextureCache, instances: I)
where
    S: Surface + ?Sized,
    I: IntoIterator<Item = PetalInstance>,
{
    for instance in instances {
        draw_petal(surface, cache, &instance);
    }
}

pub fn draw_stars<S, I>(surface: &mut S, instances: I)
where
    S: Surface + ?Sized,
    I: IntoIterator<Item = StarInstance>,
{
    for star in instances {
        surface.fill_circle(star.position, star.radius, Color::WHITE.with_alpha(star.alpha));
    }
}
