//! Listener registration and failure-isolated dispatch.

use super::context::InputContext;
use super::events::{ActionKind, InputEvent};
use log::error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// Result returned by every listener and shortcut callback.
pub type HandlerResult = anyhow::Result<()>;

type HandlerFn = dyn Fn(&InputEvent, &InputContext<'_>) -> HandlerResult;

/// A shareable input handler.
///
/// Receives the event and an [`InputContext`] for querying press state and
/// the `consumed_by_ui` flag. Clones refer to the same handler, which is how
/// [`ListenerSet::unbind`] and shortcut unbinding recognize it.
#[derive(Clone)]
pub struct Callback(Rc<HandlerFn>);

impl Callback {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&InputEvent, &InputContext<'_>) -> HandlerResult + 'static,
    {
        Self(Rc::new(handler))
    }

    /// True if both values refer to the same registered handler.
    pub fn same(&self, other: &Callback) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Runs the handler, capturing both errors and panics.
    ///
    /// Returns `false` if the handler failed; the failure is logged with
    /// `context` and never propagates.
    pub(crate) fn invoke(
        &self,
        event: &InputEvent,
        input: &InputContext<'_>,
        context: &str,
    ) -> bool {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.0)(event, input))) {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                error!("{context} failed on {event}: {err:#}");
                false
            }
            Err(payload) => {
                error!(
                    "{context} panicked on {event}: {}",
                    panic_message(payload.as_ref())
                );
                false
            }
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Outcome of delivering one event to a listener list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
}

/// The three ordered listener lists (began, changed, ended).
#[derive(Debug, Default)]
pub struct ListenerSet {
    began: Vec<Callback>,
    changed: Vec<Callback>,
    ended: Vec<Callback>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn list(&self, kind: ActionKind) -> &Vec<Callback> {
        match kind {
            ActionKind::Began => &self.began,
            ActionKind::Changed => &self.changed,
            ActionKind::Ended => &self.ended,
        }
    }

    fn list_mut(&mut self, kind: ActionKind) -> &mut Vec<Callback> {
        match kind {
            ActionKind::Began => &mut self.began,
            ActionKind::Changed => &mut self.changed,
            ActionKind::Ended => &mut self.ended,
        }
    }

    /// Appends a listener to the list for `kind`.
    pub fn bind(&mut self, kind: ActionKind, callback: Callback) {
        self.list_mut(kind).push(callback);
    }

    /// Removes the first registration of `callback` for `kind`.
    ///
    /// Returns whether a listener was removed.
    pub fn unbind(&mut self, kind: ActionKind, callback: &Callback) -> bool {
        let list = self.list_mut(kind);
        match list.iter().position(|registered| registered.same(callback)) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self, kind: ActionKind) -> usize {
        self.list(kind).len()
    }

    pub fn is_empty(&self, kind: ActionKind) -> bool {
        self.list(kind).is_empty()
    }

    /// Delivers `event` to every listener of its phase, in registration order.
    ///
    /// A failing listener is logged and skipped; the rest still run.
    pub fn dispatch(&self, event: &InputEvent, input: &InputContext<'_>) -> DispatchReport {
        let list = self.list(event.action_kind());
        let mut report = DispatchReport::default();
        for callback in list {
            if callback.invoke(event, input, "Input listener") {
                report.delivered += 1;
            } else {
                report.failed += 1;
            }
        }
        report
    }
}
