//! Event system of the orchestrator

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::OrchestrationResult;

/// Event handler (callback)
pub type EventHandler = Arc<dyn Fn(&ArtEvent) + Send + Sync>;

/// Events emitted while the stack runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArtEvent {
    /// The circuit reached stable resonance
    ResonanceAchieved {
        category: usize,
        match_score: f64,
        step: u64,
    },
    /// The resonance search hit its iteration cap
    SearchExhausted { best: Option<(usize, f64)> },
    /// FuzzyART committed a new category
    CategoryCreated { index: usize },
    /// STORE-2 depletion reset cleared the working memory
    MemoryReset { resets: u64 },
    /// The masking field elected a chunk
    ChunkEmitted {
        scale: usize,
        index: usize,
        strength: f64,
    },
    /// A component failed mid-sequence
    ComponentError { component: String, message: String },
}

/// Event filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventFilter {
    /// Every event
    All,
    /// Resonance outcomes (achieved or exhausted)
    Resonance,
    /// Category commits
    Category,
    /// Working-memory resets
    Memory,
    /// Chunk elections
    Chunking,
    /// Component errors
    Error,
}

impl EventFilter {
    /// True when an event passes this filter
    pub fn matches(&self, event: &ArtEvent) -> bool {
        matches!(
            (self, event),
            (EventFilter::All, _)
                | (EventFilter::Resonance, ArtEvent::ResonanceAchieved { .. })
                | (EventFilter::Resonance, ArtEvent::SearchExhausted { .. })
                | (EventFilter::Category, ArtEvent::CategoryCreated { .. })
                | (EventFilter::Memory, ArtEvent::MemoryReset { .. })
                | (EventFilter::Chunking, ArtEvent::ChunkEmitted { .. })
                | (EventFilter::Error, ArtEvent::ComponentError { .. })
        )
    }
}

/// Event bus with filter-keyed handlers and a bounded history
#[derive(Clone)]
pub struct EventBus {
    handlers: Arc<Mutex<HashMap<EventFilter, Vec<EventHandler>>>>,
    history: Arc<Mutex<Vec<ArtEvent>>>,
    max_history: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_history(100)
    }

    pub fn with_history(max_history: usize) -> Self {
        Self {
            handlers: Arc::new(Mutex::new(HashMap::new())),
            history: Arc::new(Mutex::new(Vec::new())),
            max_history,
        }
    }

    /// Register a handler for events passing `filter`
    pub fn subscribe(&self, filter: EventFilter, handler: EventHandler) -> OrchestrationResult<()> {
        let mut handlers = self.handlers.lock()?;
        handlers.entry(filter).or_default().push(handler);
        Ok(())
    }

    /// Deliver an event to every matching handler and record it
    pub fn emit(&self, event: ArtEvent) -> OrchestrationResult<()> {
        {
            let handlers = self.handlers.lock()?;
            for (filter, subscribed) in handlers.iter() {
                if filter.matches(&event) {
                    for handler in subscribed {
                        handler(&event);
                    }
                }
            }
        }
        if self.max_history > 0 {
            let mut history = self.history.lock()?;
            if history.len() >= self.max_history {
                history.remove(0);
            }
            history.push(event);
        }
        Ok(())
    }

    /// Snapshot of the recorded history
    pub fn history(&self) -> OrchestrationResult<Vec<ArtEvent>> {
        Ok(self.history.lock()?.clone())
    }

    pub fn clear_history(&self) -> OrchestrationResult<()> {
        self.history.lock()?.clear();
        Ok(())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
