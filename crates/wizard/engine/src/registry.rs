//! The handler registry: step index → handler constructor.
//!
//! Built once at assembly time; the wizard asks it to construct a step's
//! handler the first time that step activates, and caches the instance.

use crate::handler::StepHandler;
use std::collections::HashMap;

type HandlerCtor = Box<dyn Fn() -> Box<dyn StepHandler>>;

/// Registry mapping step indices to handler constructors.
#[derive(Default)]
pub struct HandlerRegistry {
    ctors: HashMap<usize, HandlerCtor>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructor for one step. Re-registering replaces.
    pub fn register<H, F>(&mut self, step: usize, ctor: F)
    where
        H: StepHandler + 'static,
        F: Fn() -> H + 'static,
    {
        self.ctors.insert(step, Box::new(move || Box::new(ctor())));
    }

    /// Construct the handler for a step, if one is registered.
    pub fn construct(&self, step: usize) -> Option<Box<dyn StepHandler>> {
        self.ctors.get(&step).map(|ctor| ctor())
    }

    pub fn contains(&self, step: usize) -> bool {
        self.ctors.contains_key(&step)
    }

    pub fn len(&self) -> usize {
        self.ctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ctors.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut steps: Vec<&usize> = self.ctors.keys().collect();
        steps.sort();
        f.debug_struct("HandlerRegistry")
            .field("steps", &steps)
            .finish()
    }
}
