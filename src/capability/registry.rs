//! Handler registry - maps role marker kinds to their capability handler.
//!
//! The registry is built once per inspection scheme and shared read-only
//! afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use crate::capability::artifact::InputArtifactHandler;
use crate::capability::files::InputFilesHandler;
use crate::capability::handler::CapabilityHandler;
use crate::capability::ignored::IgnoredHandler;
use crate::capability::input::InputHandler;
use crate::capability::nested::NestedHandler;
use crate::capability::outputs::{DestroysHandler, LocalStateHandler, OutputHandler};
use crate::core::marker::MarkerKind;

/// Registry of capability handlers keyed by the role they serve.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<MarkerKind, Arc<dyn CapabilityHandler>>,
}

impl HandlerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        HandlerRegistry::default()
    }

    /// Handlers for every task role.
    pub fn for_tasks() -> Self {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(InputHandler::new()));
        registry.register_file_inputs();
        registry.register(Arc::new(NestedHandler));
        registry.register(Arc::new(OutputHandler::output_file()));
        registry.register(Arc::new(OutputHandler::output_files()));
        registry.register(Arc::new(OutputHandler::output_directory()));
        registry.register(Arc::new(OutputHandler::output_directories()));
        registry.register(Arc::new(DestroysHandler));
        registry.register(Arc::new(LocalStateHandler));
        registry.register_ignored();
        registry
    }

    /// Handlers for the roles a transform action may declare.
    pub fn for_transform_actions() -> Self {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(InputArtifactHandler::input_artifact()));
        registry.register(Arc::new(InputArtifactHandler::input_artifact_dependencies()));
        registry
    }

    /// Handlers for the roles a transform parameters type may declare.
    pub fn for_transform_parameters() -> Self {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(InputHandler::new()));
        registry.register_file_inputs();
        registry.register(Arc::new(NestedHandler));
        registry.register_ignored();
        registry
    }

    fn register_file_inputs(&mut self) {
        self.register(Arc::new(InputFilesHandler::input_file()));
        self.register(Arc::new(InputFilesHandler::input_files()));
        self.register(Arc::new(InputFilesHandler::input_directory()));
    }

    fn register_ignored(&mut self) {
        self.register(Arc::new(IgnoredHandler::internal()));
        self.register(Arc::new(IgnoredHandler::console()));
        self.register(Arc::new(IgnoredHandler::replaced_by()));
    }

    /// Register a handler, replacing any handler for the same role.
    pub fn register(&mut self, handler: Arc<dyn CapabilityHandler>) {
        self.handlers.insert(handler.role(), handler);
    }

    pub fn get(&self, role: MarkerKind) -> Option<&Arc<dyn CapabilityHandler>> {
        self.handlers.get(&role)
    }

    /// Registered role kinds, sorted by name.
    pub fn roles(&self) -> Vec<MarkerKind> {
        let mut roles: Vec<_> = self.handlers.keys().copied().collect();
        roles.sort_by_key(|role| role.as_str());
        roles
    }

    /// Whether any registered handler serves an output role.
    pub fn has_output_roles(&self) -> bool {
        self.handlers.values().any(|handler| handler.is_output())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn contains(&self, role: MarkerKind) -> bool {
        self.handlers.contains_key(&role)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("roles", &self.roles())
            .finish()
    }
}
