//! The bindings of one loaded tool.

use super::adapter::BindingAdapter;
use crate::ports::frontend::Frontend;
use chainrun_domain::{ParamValue, ParameterSet, ParameterValidationError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BindingError {
    /// No control is bound to this parameter (unknown or hidden).
    #[error("No control for parameter '{0}'")]
    Unbound(String),

    #[error(transparent)]
    Rejected(#[from] ParameterValidationError),
}

/// One adapter per visible parameter, in declaration order.
#[derive(Debug, Default)]
pub struct BindingSet {
    adapters: Vec<BindingAdapter>,
}

impl BindingSet {
    /// Bind every non-hidden parameter.
    pub fn bind_all(parameters: &mut ParameterSet, frontend: &mut dyn Frontend) -> Self {
        let adapters = parameters
            .iter_mut()
            .filter(|p| !p.is_hidden())
            .map(|p| BindingAdapter::bind(p, frontend))
            .collect();
        Self { adapters }
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    pub fn get(&self, parameter: &str) -> Option<&BindingAdapter> {
        self.adapters.iter().find(|a| a.parameter() == parameter)
    }

    /// Route a user edit to the adapter bound to `parameter`.
    pub fn apply_user_edit(
        &self,
        parameters: &mut ParameterSet,
        parameter: &str,
        value: ParamValue,
    ) -> Result<ParamValue, BindingError> {
        let adapter = self
            .get(parameter)
            .ok_or_else(|| BindingError::Unbound(parameter.to_string()))?;
        let target = parameters
            .get_mut(parameter)
            .ok_or_else(|| BindingError::Unbound(parameter.to_string()))?;
        Ok(adapter.apply_user_edit(target, value)?)
    }

    /// Tear down and recreate adapters whose parameter's choices changed.
    ///
    /// Returns how many were rebuilt.
    pub fn rebuild_stale(
        &mut self,
        parameters: &mut ParameterSet,
        frontend: &mut dyn Frontend,
    ) -> usize {
        let mut rebuilt = 0;
        let adapters = std::mem::take(&mut self.adapters);
        self.adapters = adapters
            .into_iter()
            .map(|adapter| {
                if !adapter.is_stale() {
                    return adapter;
                }
                match parameters.get_mut(adapter.parameter()) {
                    Some(parameter) => {
                        adapter.unbind(parameter, frontend);
                        rebuilt += 1;
                        debug!("Rebuilding control for '{}'", parameter.name());
                        BindingAdapter::bind(parameter, frontend)
                    }
                    None => adapter,
                }
            })
            .collect();
        rebuilt
    }

    /// Remove every adapter and discard its control.
    pub fn unbind_all(self, parameters: &ParameterSet, frontend: &mut dyn Frontend) {
        for adapter in self.adapters {
            match parameters.get(adapter.parameter()) {
                Some(parameter) => adapter.unbind(parameter, frontend),
                None => frontend.discard_control(adapter.parameter()),
            }
        }
    }
}
