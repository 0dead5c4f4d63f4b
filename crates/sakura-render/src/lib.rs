//! Sakura Render - software raster output
//!
//! - `Surface`: the drawing contract (clear, circles, sprite composites)
//! - `Canvas`: an in-memory surface honouring the device pixel ratio
//! - `TextureCache`: procedurally rendered petal sprites per size class
//! - `painter`: draws petal and star instances onto a surface
//! - `headless`: PNG export

pub mod canvas;
pub mod headless;
pub mod painter;
pub mod petal_sprite;
pub mod sprite;
pub mod surface;
pub mod texture_cache;

pub use canvas::Canvas;
pub use headless::{save_png, NIGHT_SKY};
pub use sprite::{SizeClass, Sprite};
pub use surface::{Rect, Surface};
pub use texture_cache::TextureCache;
