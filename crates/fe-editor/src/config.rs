//! Editor configuration.

/// Tunables for an `Editor`.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Maximum number of undo steps kept (0 = unbounded).
    pub max_history: usize,
    /// Largest accepted tick in seconds. Longer ticks are clamped.
    pub tick_limit: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: 100,
            tick_limit: 1.0,
        }
    }
}

impl EditorConfig {
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn with_tick_limit(mut self, tick_limit: f32) -> Self {
        self.tick_limit = tick_limit;
        self
    }
}
