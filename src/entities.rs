/// Game entity types and their per-frame motion.
///
/// The bird and the obstacles share no base type: the bird falls and jumps,
/// obstacles only scroll left.

use rand::Rng;

use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in world units (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when both rectangles share a region of non-zero area.
    /// Touching edges do not count, and empty rectangles never intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Bird ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity in units/frame (positive = falling).
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Bottom edge of the play area.
    pub floor: f32,
}

impl Bird {
    pub fn from_config(config: &GameConfig) -> Self {
        let size = config.bird_size as f32;
        Self {
            x: config.bird_start_x,
            y: config.bird_start_y,
            velocity: 0.0,
            width: size,
            height: size,
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
            floor: config.screen_height as f32,
        }
    }

    /// Apply one tick of gravity and clamp to the screen.
    ///
    /// Landing on the floor stops the bird; the ceiling only stops the
    /// position, so upward velocity keeps pressing against it.
    pub fn integrate(&mut self) {
        self.velocity += self.gravity;
        self.y += self.velocity;

        if self.y + self.height >= self.floor {
            self.y = self.floor - self.height;
            self.velocity = 0.0;
        }

        if self.y <= 0.0 {
            self.y = 0.0;
        }
    }

    /// Replace the current velocity with the jump impulse.
    pub fn jump(&mut self) {
        self.velocity = self.jump_impulse;
    }

    pub fn reset(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.velocity = 0.0;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Obstacle {
    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Creation-order identifier of an obstacle pair. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairId(pub u64);

/// Read-only view of a pair for crossing tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairMark {
    pub id: PairId,
    pub trailing_edge: f32,
}

/// Shape shared by every pair of a stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairGeometry {
    pub width: u32,
    pub gap: u32,
    pub speed: f32,
    pub screen_height: u32,
    pub min_height: u32,
}

impl PairGeometry {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            width: config.pipe_width,
            gap: config.gap,
            speed: config.speed,
            screen_height: config.screen_height,
            min_height: config.pipe_min_height,
        }
    }

    /// Inclusive range the top pipe height is drawn from. Never empty: an
    /// oversized gap collapses it onto `min_height`.
    pub fn top_height_range(&self) -> (u32, u32) {
        let max = self
            .screen_height
            .saturating_sub(self.gap)
            .saturating_sub(self.min_height)
            .max(self.min_height);
        (self.min_height, max)
    }
}

/// A top and a bottom pipe around one passable gap.
#[derive(Clone, Debug, PartialEq)]
pub struct ObstaclePair {
    pub id: PairId,
    pub gap: f32,
    pub top: Obstacle,
    pub bottom: Obstacle,
}

impl ObstaclePair {
    pub fn new(id: PairId, x: f32, geometry: &PairGeometry, rng: &mut impl Rng) -> Self {
        let (min, max) = geometry.top_height_range();
        let top_height = rng.gen_range(min..=max);
        let bottom_height = geometry
            .screen_height
            .saturating_sub(geometry.gap)
            .saturating_sub(top_height);
        let width = geometry.width as f32;

        Self {
            id,
            gap: geometry.gap as f32,
            top: Obstacle {
                x,
                y: 0.0,
                width,
                height: top_height as f32,
                speed: geometry.speed,
            },
            bottom: Obstacle {
                x,
                y: (top_height + geometry.gap) as f32,
                width,
                height: bottom_height as f32,
                speed: geometry.speed,
            },
        }
    }

    pub fn update(&mut self) {
        self.top.update();
        self.bottom.update();
    }

    pub fn x(&self) -> f32 {
        self.top.x
    }

    /// Right edge of the pair, used for recycling and scoring.
    pub fn trailing_edge(&self) -> f32 {
        self.top.rect().right()
    }

    pub fn colliders(&self) -> [Rect; 2] {
        [self.top.rect(), self.bottom.rect()]
    }

    pub fn mark(&self) -> PairMark {
        PairMark {
            id: self.id,
            trailing_edge: self.trailing_edge(),
        }
    }
}
