//! Shape selection for spawning - random in play, scripted in tests.

use gridfall_core::Shape;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the next shape to spawn.
pub trait ShapeFeed {
    fn next_shape(&mut self) -> Shape;
}

/// Uniform random selection over the prototype set.
pub struct RandomFeed {
    rng: StdRng,
}

impl RandomFeed {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed seed - reproducible draw order.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ShapeFeed for RandomFeed {
    fn next_shape(&mut self) -> Shape {
        Shape::ALL[self.rng.gen_range(0..Shape::ALL.len())]
    }
}

/// Fixed shape sequence, wrapping around when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedFeed {
    shapes: Vec<Shape>,
    index: usize,
}

impl ScriptedFeed {
    /// Panics on an empty script - a feed must always produce.
    pub fn new(shapes: &[Shape]) -> Self {
        assert!(!shapes.is_empty(), "scripted feed needs at least one shape");
        Self {
            shapes: shapes.to_vec(),
            index: 0,
        }
    }

    pub fn peek(&self) -> Shape {
        self.shapes[self.index]
    }

    /// Shapes left before the script wraps.
    pub fn remaining(&self) -> &[Shape] {
        &self.shapes[self.index..]
    }
}

impl ShapeFeed for ScriptedFeed {
    fn next_shape(&mut self) -> Shape {
        let shape = self.shapes[self.index];
        self.index = (self.index + 1) % self.shapes.len();
        shape
    }
}
