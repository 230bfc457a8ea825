//! Background starfield: three vertically stacked tiles of stars that drift,
//! get pushed by fast pointer movement and wrap around as the page scrolls.

use crate::constants::{
    POINTER_INFLUENCE_RADIUS, POINTER_SMOOTHING, POINTER_VELOCITY_TRANSFER, STAR_DAMPING,
    STAR_DENSITY, STAR_DRIFT_AMOUNT, STAR_DRIFT_SPEED_RANGE, STAR_MAX_OFFSET,
    STAR_OPACITY_MIN, STAR_OPACITY_RANGE, STAR_RETURN_FORCE, STAR_SIZE_MIN, STAR_SIZE_RANGE,
    STAR_TILES, STAR_TILE_VIEWPORTS, STAR_TIME_STEP,
};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub left: f32,
    /// Document-space top, shifted by whole tile stacks when wrapping.
    pub original_top: f32,
    /// Viewport-space top after the last step.
    pub current_top: f32,
    pub size: f32,
    pub opacity: f32,
    pub drift: Vec2,
    pub drift_speed: Vec2,
    pub phase: f32,
    pub velocity: Vec2,
}

impl Star {
    /// Rendered offset from (`left`, `current_top`).
    pub fn offset(&self) -> Vec2 {
        self.drift + self.velocity
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.left, self.current_top) + self.offset()
    }
}

pub struct Starfield {
    pub stars: Vec<Star>,
    tile_height: f32,
    width: f32,
    time: f32,
    pointer: Vec2,
    prev_pointer: Vec2,
    pointer_velocity: Vec2,
    rng: StdRng,
}

impl Starfield {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut field = Self {
            stars: Vec::new(),
            tile_height: 0.0,
            width,
            time: 0.0,
            pointer: Vec2::ZERO,
            prev_pointer: Vec2::ZERO,
            pointer_velocity: Vec2::ZERO,
            rng: StdRng::seed_from_u64(seed),
        };
        field.resize(width, height);
        field
    }

    /// Stars per tile for a viewport.
    pub fn count_per_tile(width: f32, height: f32) -> usize {
        let tile = height * STAR_TILE_VIEWPORTS;
        (width * tile * STAR_DENSITY).max(0.0).floor() as usize
    }

    pub fn tile_height(&self) -> f32 {
        self.tile_height
    }

    /// Regenerate for a new viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.tile_height = height.max(0.0) * STAR_TILE_VIEWPORTS;
        let count = Self::count_per_tile(self.width, height.max(0.0));
        let h = self.tile_height;
        let mut stars = Vec::with_capacity(count * STAR_TILES);
        for tile in 0..STAR_TILES {
            for _ in 0..count {
                let original_top = self.rng.gen::<f32>() * h + tile as f32 * h - h;
                stars.push(Star {
                    left: self.rng.gen::<f32>() * self.width,
                    original_top,
                    current_top: original_top,
                    size: self.rng.gen::<f32>() * STAR_SIZE_RANGE + STAR_SIZE_MIN,
                    opacity: STAR_OPACITY_MIN + self.rng.gen::<f32>() * STAR_OPACITY_RANGE,
                    drift: Vec2::ZERO,
                    drift_speed: Vec2::new(
                        (self.rng.gen::<f32>() - 0.5) * STAR_DRIFT_SPEED_RANGE,
                        (self.rng.gen::<f32>() - 0.5) * STAR_DRIFT_SPEED_RANGE,
                    ),
                    phase: self.rng.gen::<f32>() * TAU,
                    velocity: Vec2::ZERO,
                });
            }
        }
        log::debug!("[starfield] {} stars, tile {:.0}px", stars.len(), h);
        self.stars = stars;
    }

    /// Latest pointer position in viewport coordinates.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Advance one animation frame at the given scroll offset.
    pub fn step(&mut self, scroll_y: f32) {
        self.time += STAR_TIME_STEP;
        let instant = self.pointer - self.prev_pointer;
        self.prev_pointer = self.pointer;
        self.pointer_velocity += (instant - self.pointer_velocity) * POINTER_SMOOTHING;

        let tile = self.tile_height;
        let stack = tile * STAR_TILES as f32;
        for star in &mut self.stars {
            star.current_top = star.original_top - scroll_y;
            if star.current_top < -tile {
                star.original_top += stack;
                star.current_top += stack;
            } else if star.current_top > tile * 2.0 {
                star.original_top -= stack;
                star.current_top -= stack;
            }

            star.drift = Vec2::new(
                (self.time * star.drift_speed.x + star.phase).sin(),
                (self.time * star.drift_speed.y + star.phase).cos(),
            ) * STAR_DRIFT_AMOUNT;

            let to_pointer = Vec2::new(star.left, star.current_top) - self.pointer;
            let dist = to_pointer.length();
            if dist > 0.0 && dist < POINTER_INFLUENCE_RADIUS {
                let influence = 1.0 - dist / POINTER_INFLUENCE_RADIUS;
                star.velocity += self.pointer_velocity * influence * POINTER_VELOCITY_TRANSFER;
            }
            star.velocity *= STAR_DAMPING;

            let magnitude = star.velocity.length();
            if magnitude > STAR_MAX_OFFSET {
                star.velocity -= star.velocity / magnitude
                    * STAR_RETURN_FORCE
                    * (magnitude - STAR_MAX_OFFSET);
            }
        }
    }

    /// Stars currently overlapping `[0, height)` vertically.
    pub fn visible(&self, height: f32) -> impl Iterator<Item = &Star> {
        self.stars.iter().filter(move |s| {
            let y = s.position().y;
            y + s.size >= 0.0 && y - s.size < height
        })
    }
}
