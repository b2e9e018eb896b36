//! Ordered fallback chains.
//!
//! Several parts of the engine try a sequence of approaches until one
//! produces a result (bracketed → parenthetical → inline timestamps,
//! timestamp → speaker → paragraph splitting). Each approach is a
//! [`Strategy`] with an `applicable` predicate; a [`FallbackChain`] tries
//! them in order and reports which one won.

use tracing::debug;

/// One approach in a fallback chain.
pub trait Strategy<I: ?Sized> {
    type Output;

    /// Short stable name, used in logs and tests.
    fn name(&self) -> &'static str;

    /// Cheap check whether this strategy should be attempted at all.
    fn applicable(&self, input: &I) -> bool;

    /// Run the strategy. `None` means "not after all", and the chain moves on.
    fn apply(&self, input: &I) -> Option<Self::Output>;
}

/// Strategies tried in insertion order; the first `Some` wins.
pub struct FallbackChain<'a, I: ?Sized, O> {
    strategies: Vec<Box<dyn Strategy<I, Output = O> + 'a>>,
}

impl<'a, I: ?Sized, O> FallbackChain<'a, I, O> {
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Append a strategy to the end of the chain.
    pub fn then(mut self, strategy: impl Strategy<I, Output = O> + 'a) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Strategy names in the order they will be tried.
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run the chain, returning the winning strategy's name and output.
    pub fn run(&self, input: &I) -> Option<(&'static str, O)> {
        for strategy in &self.strategies {
            if !strategy.applicable(input) {
                continue;
            }
            match strategy.apply(input) {
                Some(output) => {
                    debug!(strategy = strategy.name(), "strategy selected");
                    return Some((strategy.name(), output));
                }
                None => debug!(strategy = strategy.name(), "strategy declined, falling back"),
            }
        }
        None
    }
}

impl<'a, I: ?Sized, O> Default for FallbackChain<'a, I, O> {
    fn default() -> Self {
        Self::new()
    }
}
