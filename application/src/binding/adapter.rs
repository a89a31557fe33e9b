//! Binding adapter: one parameter ↔ one control.
//!
//! ```text
//!   UserEvent::Edit ──▶ apply_user_edit ──▶ validate ──ok──▶ set_value ──▶ on_value_changed
//!                                              │                               │
//!                                              └─err──▶ control.set_error      └─(guarded)─✗ adapter
//!
//!   tool code ──▶ set_value / set_option ──▶ notifier ──▶ control.set_value / set_enabled / set_visible
//!   tool code ──▶ set_choices ──────────────▶ notifier ──▶ marked stale, rebuilt by BindingSet
//! ```

use super::kind::{ControlKind, control_kind_for};
use crate::ports::frontend::{Frontend, SharedControl};
use chainrun_domain::{ParamValue, Parameter, ParameterValidationError, SubscriptionId};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

pub struct BindingAdapter {
    parameter: String,
    kind: ControlKind,
    control: SharedControl,
    /// Set while the adapter itself writes the parameter.
    writing: Rc<Cell<bool>>,
    /// Set when the parameter's choices changed and the control must be rebuilt.
    stale: Rc<Cell<bool>>,
    value_subscription: SubscriptionId,
    options_subscription: SubscriptionId,
    choices_subscription: SubscriptionId,
}

impl BindingAdapter {
    /// Create a control for `parameter` and wire the two together.
    pub fn bind(parameter: &mut Parameter, frontend: &mut dyn Frontend) -> Self {
        let kind = control_kind_for(parameter);
        let control = frontend.create_control(parameter, kind);

        match parameter.effective_value().cloned() {
            Some(value) => control.borrow_mut().set_value(Some(&value)),
            None => {
                let initial = control.borrow().value();
                if let Some(initial) = initial {
                    match parameter.validate(initial) {
                        Ok(accepted) => parameter.set_value(accepted),
                        Err(e) => debug!("Initial control value rejected: {}", e),
                    }
                }
            }
        }

        {
            let mut c = control.borrow_mut();
            c.set_enabled(parameter.options().enabled());
            c.set_visible(parameter.options().visible());
        }

        let writing = Rc::new(Cell::new(false));
        let stale = Rc::new(Cell::new(false));

        let value_subscription = {
            let control = Rc::clone(&control);
            let writing = Rc::clone(&writing);
            parameter.on_value_changed().subscribe(move |p: &Parameter| {
                if !writing.get() {
                    control.borrow_mut().set_value(p.value());
                }
            })
        };

        let options_subscription = {
            let control = Rc::clone(&control);
            parameter.on_options_changed().subscribe(move |p: &Parameter| {
                let mut c = control.borrow_mut();
                c.set_enabled(p.options().enabled());
                c.set_visible(p.options().visible());
            })
        };

        let choices_subscription = {
            let stale = Rc::clone(&stale);
            parameter
                .on_choices_changed()
                .subscribe(move |_: &Parameter| stale.set(true))
        };

        debug!("Bound parameter '{}' to {}", parameter.name(), kind);

        Self {
            parameter: parameter.name().to_string(),
            kind,
            control,
            writing,
            stale,
            value_subscription,
            options_subscription,
            choices_subscription,
        }
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn control(&self) -> &SharedControl {
        &self.control
    }

    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    /// Handle a user edit on the control.
    ///
    /// On success the inline error is cleared and the accepted value is
    /// stored and shown. On failure the error is shown and the parameter
    /// keeps its value.
    pub fn apply_user_edit(
        &self,
        parameter: &mut Parameter,
        candidate: ParamValue,
    ) -> Result<ParamValue, ParameterValidationError> {
        match parameter.validate(candidate) {
            Ok(accepted) => {
                self.writing.set(true);
                parameter.set_value(accepted.clone());
                self.writing.set(false);

                let mut control = self.control.borrow_mut();
                control.set_error(None);
                control.set_value(Some(&accepted));
                Ok(accepted)
            }
            Err(e) => {
                self.control.borrow_mut().set_error(Some(&e.to_string()));
                Err(e)
            }
        }
    }

    /// Remove every subscription and discard the control.
    pub fn unbind(self, parameter: &Parameter, frontend: &mut dyn Frontend) {
        parameter.on_value_changed().unsubscribe(self.value_subscription);
        parameter.on_options_changed().unsubscribe(self.options_subscription);
        parameter.on_choices_changed().unsubscribe(self.choices_subscription);
        frontend.discard_control(&self.parameter);
    }
}

impl std::fmt::Debug for BindingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingAdapter")
            .field("parameter", &self.parameter)
            .field("kind", &self.kind)
            .field("stale", &self.stale.get())
            .finish()
    }
}
