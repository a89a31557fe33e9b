//! Parameter entities

use super::notifier::Notifier;
use super::options::{OPTION_ENABLED, OPTION_MAXIMUM, OPTION_MINIMUM, OPTION_VISIBLE, ParameterOptions};
use super::validator::Validator;
use super::value::{DataType, ParamValue};
use crate::tool::entities::ToolData;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Why a candidate value was rejected by [`Parameter::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterValidationError {
    #[error("{name}: {reason}")]
    WrongType { name: String, reason: String },

    #[error("{name}: '{value}' is not one of the available choices")]
    NotAChoice { name: String, value: String },

    #[error("{name}: {value} is below the minimum of {minimum}")]
    BelowMinimum { name: String, value: f64, minimum: f64 },

    #[error("{name}: {value} is above the maximum of {maximum}")]
    AboveMaximum { name: String, value: f64, maximum: f64 },

    #[error("{name}: {reason}")]
    Rejected { name: String, reason: String },

    #[error("{name}: a value is required")]
    Missing { name: String },
}

impl ParameterValidationError {
    /// Name of the parameter that rejected the value.
    pub fn parameter(&self) -> &str {
        match self {
            Self::WrongType { name, .. }
            | Self::NotAChoice { name, .. }
            | Self::BelowMinimum { name, .. }
            | Self::AboveMaximum { name, .. }
            | Self::Rejected { name, .. }
            | Self::Missing { name } => name,
        }
    }
}

/// A typed, named, validated value cell with change notification.
///
/// Three notifiers fire synchronously after the matching mutation:
/// [`on_value_changed`](Self::on_value_changed),
/// [`on_choices_changed`](Self::on_choices_changed) and
/// [`on_options_changed`](Self::on_options_changed). Subscribers receive the
/// parameter itself and cannot mutate it from inside the callback.
pub struct Parameter {
    name: String,
    data_type: DataType,
    value: Option<ParamValue>,
    default: Option<ParamValue>,
    choices: Option<Vec<ParamValue>>,
    options: ParameterOptions,
    hidden: bool,
    description: String,
    validators: Vec<Arc<dyn Validator>>,
    on_value_changed: Notifier<Parameter>,
    on_choices_changed: Notifier<Parameter>,
    on_options_changed: Notifier<Parameter>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            value: None,
            default: None,
            choices: None,
            options: ParameterOptions::new(),
            hidden: false,
            description: String::new(),
            validators: Vec::new(),
            on_value_changed: Notifier::new(),
            on_choices_changed: Notifier::new(),
            on_options_changed: Notifier::new(),
        }
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Int)
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Bool)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Float)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, DataType::String)
    }

    pub fn list(name: impl Into<String>) -> Self {
        Self::new(name, DataType::List)
    }

    // ==================== Builders ====================

    pub fn with_value(mut self, value: impl Into<ParamValue>) -> Self {
        self.value = Some(self.lenient(value.into()));
        self
    }

    pub fn with_default(mut self, default: impl Into<ParamValue>) -> Self {
        self.default = Some(self.lenient(default.into()));
        self
    }

    pub fn with_choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        let choices = choices
            .into_iter()
            .map(|c| self.lenient(c.into()))
            .collect();
        self.choices = Some(choices);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options.set(key, value);
        self
    }

    pub fn with_ui(self, ui: &str) -> Self {
        self.with_option(super::options::OPTION_UI, ui)
    }

    pub fn with_minimum(self, minimum: impl Into<serde_json::Value>) -> Self {
        self.with_option(OPTION_MINIMUM, minimum)
    }

    pub fn with_maximum(self, maximum: impl Into<serde_json::Value>) -> Self {
        self.with_option(OPTION_MAXIMUM, maximum)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Declared values are coerced when possible but kept as given otherwise;
    /// declarations are the tool author's responsibility.
    fn lenient(&self, value: ParamValue) -> ParamValue {
        self.data_type.coerce(&value).unwrap_or(value)
    }

    // ==================== Accessors ====================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn value(&self) -> Option<&ParamValue> {
        self.value.as_ref()
    }

    pub fn default(&self) -> Option<&ParamValue> {
        self.default.as_ref()
    }

    /// The live value, falling back to the default.
    pub fn effective_value(&self) -> Option<&ParamValue> {
        self.value.as_ref().or(self.default.as_ref())
    }

    pub fn choices(&self) -> Option<&[ParamValue]> {
        self.choices.as_deref()
    }

    pub fn options(&self) -> &ParameterOptions {
        &self.options
    }

    /// Shorthand for reading a single option.
    pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.get(key)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn on_value_changed(&self) -> &Notifier<Parameter> {
        &self.on_value_changed
    }

    pub fn on_choices_changed(&self) -> &Notifier<Parameter> {
        &self.on_choices_changed
    }

    pub fn on_options_changed(&self) -> &Notifier<Parameter> {
        &self.on_options_changed
    }

    // ==================== Validation ====================

    /// Decide whether `candidate` is acceptable and return the value to store.
    ///
    /// The candidate is coerced to the declared data type, then checked
    /// against `choices`, the `minimum`/`maximum` options and every
    /// applicable validator in order. The live value is never touched.
    pub fn validate(
        &self,
        candidate: impl Into<ParamValue>,
    ) -> Result<ParamValue, ParameterValidationError> {
        let candidate = candidate.into();
        let accepted = self
            .data_type
            .coerce(&candidate)
            .map_err(|reason| ParameterValidationError::WrongType {
                name: self.name.clone(),
                reason,
            })?;

        if let Some(choices) = &self.choices
            && !choices.contains(&accepted)
        {
            return Err(ParameterValidationError::NotAChoice {
                name: self.name.clone(),
                value: accepted.to_string(),
            });
        }

        if matches!(self.data_type, DataType::Int | DataType::Float)
            && let Some(number) = accepted.as_float()
        {
            if let Some(minimum) = self.options.minimum()
                && number < minimum
            {
                return Err(ParameterValidationError::BelowMinimum {
                    name: self.name.clone(),
                    value: number,
                    minimum,
                });
            }
            if let Some(maximum) = self.options.maximum()
                && number > maximum
            {
                return Err(ParameterValidationError::AboveMaximum {
                    name: self.name.clone(),
                    value: number,
                    maximum,
                });
            }
        }

        for validator in self
            .validators
            .iter()
            .filter(|v| v.applies_to(self.data_type))
        {
            validator
                .check(&accepted)
                .map_err(|reason| ParameterValidationError::Rejected {
                    name: self.name.clone(),
                    reason,
                })?;
        }

        Ok(accepted)
    }

    /// Validate the current (or default) value before execution.
    ///
    /// An unset parameter passes unless it is marked `required`.
    pub fn validate_current(&self) -> Result<(), ParameterValidationError> {
        match self.effective_value() {
            Some(value) => self.validate(value.clone()).map(|_| ()),
            None if self.options.required() => Err(ParameterValidationError::Missing {
                name: self.name.clone(),
            }),
            None => Ok(()),
        }
    }

    // ==================== Mutation ====================

    /// Store a value without validation and notify value subscribers.
    ///
    /// For initialization and programmatic writes; user input must go
    /// through [`validate`](Self::validate) first.
    pub fn set_value(&mut self, value: impl Into<ParamValue>) {
        self.value = Some(value.into());
        self.on_value_changed.emit(self);
    }

    /// Validate and store in one step.
    pub fn try_set_value(
        &mut self,
        candidate: impl Into<ParamValue>,
    ) -> Result<(), ParameterValidationError> {
        let accepted = self.validate(candidate)?;
        self.set_value(accepted);
        Ok(())
    }

    pub fn clear_value(&mut self) {
        self.value = None;
        self.on_value_changed.emit(self);
    }

    pub fn set_choices(&mut self, choices: Option<Vec<ParamValue>>) {
        self.choices = choices.map(|items| items.into_iter().map(|c| self.lenient(c)).collect());
        self.on_choices_changed.emit(self);
    }

    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.options.set(key, value);
        self.on_options_changed.emit(self);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.set_option(OPTION_ENABLED, enabled);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.set_option(OPTION_VISIBLE, visible);
    }
}

/// Copies the declaration and current value; subscribers are not copied.
impl Clone for Parameter {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            data_type: self.data_type,
            value: self.value.clone(),
            default: self.default.clone(),
            choices: self.choices.clone(),
            options: self.options.clone(),
            hidden: self.hidden,
            description: self.description.clone(),
            validators: self.validators.clone(),
            on_value_changed: Notifier::new(),
            on_choices_changed: Notifier::new(),
            on_options_changed: Notifier::new(),
        }
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("data_type", &self.data_type)
            .field("value", &self.value)
            .field("default", &self.default)
            .field("choices", &self.choices)
            .field("options", &self.options)
            .field("hidden", &self.hidden)
            .finish()
    }
}

/// The ordered parameters of one tool instance.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    parameters: Vec<Parameter>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, parameter: Parameter) -> Self {
        self.push(parameter);
        self
    }

    /// Append a parameter. A parameter with the same name is replaced in place.
    pub fn push(&mut self, parameter: Parameter) {
        match self.position(parameter.name()) {
            Some(index) => self.parameters[index] = parameter,
            None => self.parameters.push(parameter),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name() == name)
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.iter_mut().find(|p| p.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Parameter> {
        self.parameters.iter_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name())
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Validate every parameter in declaration order, stopping at the first failure.
    pub fn validate_all(&self) -> Result<(), ParameterValidationError> {
        self.parameters.iter().try_for_each(|p| p.validate_current())
    }

    /// Seed values from shared invocation data.
    ///
    /// Keys that don't name a parameter are ignored (they are handoff data
    /// for other tools). Values that fail validation are skipped and
    /// returned so the caller can report them.
    pub fn seed(&mut self, data: &ToolData) -> Vec<ParameterValidationError> {
        let mut rejected = Vec::new();
        for parameter in self.parameters.iter_mut() {
            if let Some(raw) = data.get(parameter.name())
                && let Err(e) = parameter.try_set_value(raw.clone())
            {
                rejected.push(e);
            }
        }
        rejected
    }

    // ==================== Typed value helpers ====================

    pub fn value(&self, name: &str) -> Option<&ParamValue> {
        self.get(name).and_then(|p| p.effective_value())
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(|v| v.as_int())
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(|v| v.as_float())
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(|v| v.as_bool())
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(|v| v.as_str())
    }
}
