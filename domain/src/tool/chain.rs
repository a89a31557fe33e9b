//! Tool chain
//!
//! An ordered, growing queue of [`ToolDescriptor`]s plus the shared
//! [`ToolData`] and a cursor to the current tool.
//!
//! ```text
//!   add_tool ──▶ [ A ][ B ][ C ] ◀── add_tool (from a running tool)
//!                  ▲
//!                cursor   (None until start())
//! ```
//!
//! Advancing past the last descriptor means the chain is complete; the
//! cursor stays on the last tool.

use super::entities::{ToolData, ToolDescriptor};
use crate::core::error::DomainError;

#[derive(Debug, Clone, Default)]
pub struct ToolChain {
    tools: Vec<ToolDescriptor>,
    tool_data: ToolData,
    cursor: Option<usize>,
}

impl ToolChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool_data(mut self, data: ToolData) -> Self {
        self.tool_data = data;
        self
    }

    pub fn add_tool(&mut self, descriptor: ToolDescriptor) {
        self.tools.push(descriptor);
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// `None` until the chain has been started.
    pub fn current_tool_index(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current_tool(&self) -> Option<&ToolDescriptor> {
        self.cursor.and_then(|i| self.tools.get(i))
    }

    pub fn get_tool(&self, index: usize) -> Option<&ToolDescriptor> {
        self.tools.get(index)
    }

    pub fn has_next(&self) -> bool {
        match self.cursor {
            Some(i) => i + 1 < self.tools.len(),
            None => !self.tools.is_empty(),
        }
    }

    /// Whether the current tool is the last one queued right now.
    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Point the cursor at the first tool.
    pub fn start(&mut self) -> Result<&ToolDescriptor, DomainError> {
        if self.tools.is_empty() {
            return Err(DomainError::ChainEmpty);
        }
        self.cursor = Some(0);
        Ok(&self.tools[0])
    }

    /// Move to the next tool. Returns `None` when the chain is complete.
    pub fn advance(&mut self) -> Option<&ToolDescriptor> {
        if !self.has_next() {
            return None;
        }
        let next = self.cursor.map_or(0, |i| i + 1);
        self.cursor = Some(next);
        self.tools.get(next)
    }

    pub fn tool_data(&self) -> &ToolData {
        &self.tool_data
    }

    pub fn tool_data_mut(&mut self) -> &mut ToolData {
        &mut self.tool_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::{ParamValue, ParameterSet};
    use crate::tool::traits::{Tool, ToolInterface};
    use async_trait::async_trait;

    struct Noop(ParameterSet);

    #[async_trait(?Send)]
    impl Tool for Noop {
        fn parameters(&self) -> &ParameterSet {
            &self.0
        }

        fn parameters_mut(&mut self) -> &mut ParameterSet {
            &mut self.0
        }

        async fn execute(&mut self, _ui: &mut dyn ToolInterface) -> i32 {
            0
        }
    }

    fn tool(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, || Box::new(Noop(ParameterSet::new())))
    }

    #[test]
    fn test_empty_chain_fails_to_start() {
        let mut chain = ToolChain::new();
        assert_eq!(chain.start().unwrap_err(), DomainError::ChainEmpty);
        assert_eq!(chain.current_tool_index(), None);
    }

    #[test]
    fn test_cursor_walks_chain() {
        let mut chain = ToolChain::new();
        chain.add_tool(tool("a"));
        chain.add_tool(tool("b"));
        assert_eq!(chain.current_tool_index(), None);

        assert_eq!(chain.start().unwrap().name, "a");
        assert!(chain.has_next());

        assert_eq!(chain.advance().unwrap().name, "b");
        assert!(chain.is_last());

        assert!(chain.advance().is_none());
        assert_eq!(chain.current_tool_index(), Some(1));
        assert_eq!(chain.current_tool().unwrap().name, "b");
    }

    #[test]
    fn test_chain_grows_while_running() {
        let mut chain = ToolChain::new();
        chain.add_tool(tool("a"));
        chain.start().unwrap();
        assert!(chain.is_last());

        chain.add_tool(tool("a"));
        assert_eq!(chain.tool_count(), 2);
        assert!(chain.has_next());
        assert_eq!(chain.advance().unwrap().name, "a");
    }

    #[test]
    fn test_tool_data_is_shared() {
        let mut data = ToolData::new();
        data.insert("input".into(), ParamValue::from("/tmp/a.mov"));
        let mut chain = ToolChain::new().with_tool_data(data);
        chain
            .tool_data_mut()
            .insert("handoff".into(), ParamValue::Int(3));
        assert_eq!(chain.tool_data().len(), 2);
    }
}
