/// The obstacle stream: an ordered run of pipe pairs scrolling left.
///
/// New pairs are appended at the tail on a fixed cadence and pairs that have
/// fully left the screen are dropped from the head, so the sequence stays
/// sorted by x (and by id).

use std::collections::VecDeque;

use rand::Rng;

use crate::config::{GameConfig, INITIAL_PAIRS};
use crate::entities::{ObstaclePair, PairGeometry, PairId, PairMark, Rect};

#[derive(Clone, Debug)]
pub struct ObstacleStream {
    pairs: VecDeque<ObstaclePair>,
    geometry: PairGeometry,
    spawn_distance: f32,
    spawn_x: f32,
    spawn_interval_frames: u32,
    frames_since_spawn: u32,
    next_id: u64,
}

impl ObstacleStream {
    /// Build a stream already holding its initial pairs.
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let mut stream = Self {
            pairs: VecDeque::new(),
            geometry: PairGeometry::from_config(config),
            spawn_distance: config.spawn_distance as f32,
            spawn_x: config.spawn_x(),
            spawn_interval_frames: config.spawn_interval_frames(),
            frames_since_spawn: 0,
            next_id: 0,
        };
        stream.seed_initial(rng);
        stream
    }

    /// Advance one tick: scroll, spawn on cadence, recycle off-screen pairs.
    pub fn update(&mut self, rng: &mut impl Rng) {
        for pair in self.pairs.iter_mut() {
            pair.update();
        }

        self.frames_since_spawn += 1;
        if self.frames_since_spawn >= self.spawn_interval_frames {
            let x = match self.pairs.back() {
                Some(tail) => (tail.x() + self.spawn_distance).max(self.spawn_x),
                None => self.spawn_x,
            };
            self.spawn(x, rng);
            self.frames_since_spawn = 0;
        }

        while self
            .pairs
            .front()
            .is_some_and(|head| head.trailing_edge() < 0.0)
        {
            if let Some(pair) = self.pairs.pop_front() {
                log::trace!("recycled pair {:?}", pair.id);
            }
        }
    }

    /// Drop every pair and lay out a fresh initial run with new gap offsets.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.pairs.clear();
        self.frames_since_spawn = 0;
        self.seed_initial(rng);
        log::debug!("obstacle stream reset with {} pairs", self.pairs.len());
    }

    fn seed_initial(&mut self, rng: &mut impl Rng) {
        for i in 0..INITIAL_PAIRS {
            let x = self.spawn_x + i as f32 * self.spawn_distance;
            self.spawn(x, rng);
        }
    }

    fn spawn(&mut self, x: f32, rng: &mut impl Rng) {
        let id = PairId(self.next_id);
        self.next_id += 1;
        let pair = ObstaclePair::new(id, x, &self.geometry, rng);
        log::trace!(
            "spawned pair {:?} at x={} (top height {})",
            id,
            x,
            pair.top.height
        );
        self.pairs.push_back(pair);
    }

    // ── Read-only views ──────────────────────────────────────────────────────

    /// Every obstacle rectangle, top then bottom for each pair.
    pub fn colliders(&self) -> Vec<Rect> {
        self.pairs.iter().flat_map(|p| p.colliders()).collect()
    }

    /// (id, trailing edge) of each pair, leftmost first.
    pub fn marks(&self) -> Vec<PairMark> {
        self.pairs.iter().map(ObstaclePair::mark).collect()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &ObstaclePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn spawn_interval_frames(&self) -> u32 {
        self.spawn_interval_frames
    }

    pub fn frames_since_spawn(&self) -> u32 {
        self.frames_since_spawn
    }
}
