//! Per-trial generation context.
//!
//! Every draw a property makes during one trial goes through a [`Context`].
//! The context owns the trial's seed stream (splitting off an independent
//! seed per draw), records a log of the draws it served, and fires any
//! registered on-generate hooks. Threading the context explicitly keeps
//! concurrent trials isolated: there is no ambient "current handler", so
//! a draw can never land in the wrong trial's state.

use crate::data::{Replay, Seed, Size};
use crate::gen::Gen;
use crate::shrinkable::Shrinkable;

/// A record of one generator draw within a trial: its position in the
/// trial's draw order and the generator's diagnostic name, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub index: usize,
    pub name: Option<String>,
}

type Hook = Box<dyn FnMut(&Draw)>;

/// Trial-scoped generation state.
///
/// A context built from the same seed and size serves the same values to
/// the same sequence of draws, which is what makes a failing trial exactly
/// reproducible from its [`Replay`] coordinates.
pub struct Context {
    trial_seed: Seed,
    size: Size,
    stream: Seed,
    draws: Vec<Draw>,
    hooks: Vec<Hook>,
}

impl Context {
    /// Create a context for one trial.
    pub fn new(seed: Seed, size: Size) -> Self {
        Context {
            trial_seed: seed,
            size,
            stream: seed,
            draws: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// The size in effect for this trial.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The coordinates needed to reproduce this trial exactly.
    pub fn replay(&self) -> Replay {
        Replay {
            seed: self.trial_seed,
            size: self.size,
        }
    }

    /// The draws served so far, in order.
    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    /// Register a hook fired on every draw, e.g. to collect generated
    /// values' names for diagnostics.
    pub fn on_generate<F>(&mut self, hook: F)
    where
        F: FnMut(&Draw) + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Serve one draw: split an independent seed off the trial stream,
    /// record the draw, fire hooks, and run the generator.
    pub fn draw<T: 'static>(&mut self, gen: &Gen<T>) -> Shrinkable<T> {
        let (draw_seed, rest) = self.stream.split();
        self.stream = rest;

        let draw = Draw {
            index: self.draws.len(),
            name: gen.name().map(str::to_string),
        };
        for hook in &mut self.hooks {
            hook(&draw);
        }
        self.draws.push(draw);

        gen.run(self.size, draw_seed)
    }
}
