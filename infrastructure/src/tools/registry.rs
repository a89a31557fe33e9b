//! Tool Registry
//!
//! The [`ToolRegistry`] aggregates tool providers into a single
//! `name → descriptor` map. It is populated once at startup and read-only
//! afterwards; the launcher resolves the requested tool through it.
//!
//! # Usage
//!
//! ```ignore
//! use chainrun_infrastructure::tools::{BuiltinProvider, ToolRegistry};
//!
//! let mut registry = ToolRegistry::new().register(BuiltinProvider);
//! registry.discover()?;
//!
//! let chain = registry.launch("keep-ui-open", &["iterations=10"])?;
//! ```
//!
//! # Priority-Based Resolution
//!
//! When two providers offer a tool with the same name, the provider with the
//! higher priority wins. Two tools with the same name at the same priority
//! are a [`DomainError::DuplicateTool`].

use chainrun_domain::{
    DomainError, ToolChain, ToolDescriptor, ToolProvider, parse_launch_arguments,
};
use std::collections::BTreeMap;
use std::sync::Arc;

struct RegisteredTool {
    descriptor: ToolDescriptor,
    provider_id: String,
    priority: i32,
}

/// Registry of every tool the launcher can start.
pub struct ToolRegistry {
    providers: Vec<Arc<dyn ToolProvider>>,
    tools: BTreeMap<String, RegisteredTool>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool provider
    pub fn register<P: ToolProvider + 'static>(self, provider: P) -> Self {
        self.register_arc(Arc::new(provider))
    }

    /// Register a tool provider (Arc version)
    pub fn register_arc(mut self, provider: Arc<dyn ToolProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Collect tools from all providers.
    ///
    /// Providers that are unavailable or fail discovery are skipped with a
    /// warning.
    pub fn discover(&mut self) -> Result<(), DomainError> {
        self.providers
            .sort_by_key(|p| std::cmp::Reverse(p.priority()));

        let mut tools: BTreeMap<String, RegisteredTool> = BTreeMap::new();

        for provider in &self.providers {
            if !provider.is_available() {
                tracing::debug!(provider = provider.id(), "Provider not available, skipping");
                continue;
            }

            let discovered = match provider.discover_tools() {
                Ok(discovered) => discovered,
                Err(e) => {
                    tracing::warn!(
                        provider = provider.id(),
                        error = %e,
                        "Failed to discover tools from provider"
                    );
                    continue;
                }
            };

            for descriptor in discovered {
                match tools.get(&descriptor.name) {
                    Some(existing) if existing.priority == provider.priority() => {
                        return Err(DomainError::DuplicateTool(descriptor.name));
                    }
                    Some(existing) => {
                        tracing::trace!(
                            tool = %descriptor.name,
                            provider = provider.id(),
                            winner = %existing.provider_id,
                            "Tool already registered by higher priority provider"
                        );
                    }
                    None => {
                        tracing::debug!(
                            tool = %descriptor.name,
                            provider = provider.id(),
                            "Registered tool"
                        );
                        tools.insert(
                            descriptor.name.clone(),
                            RegisteredTool {
                                descriptor,
                                provider_id: provider.id().to_string(),
                                priority: provider.priority(),
                            },
                        );
                    }
                }
            }
        }

        self.tools = tools;
        Ok(())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Result<&ToolDescriptor, DomainError> {
        self.tools
            .get(name)
            .map(|t| &t.descriptor)
            .ok_or_else(|| DomainError::ToolNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Every registered tool, ordered by collection then name.
    pub fn tools(&self) -> Vec<&ToolDescriptor> {
        let mut tools: Vec<_> = self.tools.values().map(|t| &t.descriptor).collect();
        tools.sort_by(|a, b| (&a.collection, &a.name).cmp(&(&b.collection, &b.name)));
        tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Build the initial chain for `chainrun <tool> [param=value ...]`.
    ///
    /// Every `param` must name a parameter of the requested tool. The values
    /// are kept as strings in the chain's tool data and coerced when the
    /// tool is instantiated.
    pub fn launch<S: AsRef<str>>(&self, name: &str, args: &[S]) -> Result<ToolChain, DomainError> {
        let descriptor = self.get(name)?;
        let data = parse_launch_arguments(args)?;

        let (tool, _) = descriptor.instantiate(&Default::default());
        if let Some(unknown) = data.keys().find(|k| tool.parameters().get(k).is_none()) {
            return Err(DomainError::UnknownParameter {
                tool: descriptor.name.clone(),
                parameter: unknown.clone(),
            });
        }

        let mut chain = ToolChain::new().with_tool_data(data);
        chain.add_tool(descriptor.clone());
        Ok(chain)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
