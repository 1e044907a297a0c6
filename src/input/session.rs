//! Host event-source seam and scoped listening sessions.

use super::state::InputState;
use anyhow::Result;
use std::ops::{Deref, DerefMut};

/// A platform event source (window, canvas, replay script).
///
/// `attach` registers the native listeners that will feed raw events into an
/// [`InputState`]; `detach` removes them again.
pub trait InputSource {
    /// Human-readable name used in log messages.
    fn name(&self) -> &str;

    fn attach(&mut self) -> Result<()>;

    fn detach(&mut self);
}

/// An [`InputState`] that is listening to a source for as long as the session
/// lives. Dropping the session stops listening and resets press state.
pub struct Session<'a, S: InputSource + ?Sized> {
    state: &'a mut InputState,
    source: &'a mut S,
}

impl<S: InputSource + ?Sized> Session<'_, S> {
    pub fn source(&self) -> &S {
        &*self.source
    }
}

impl InputState {
    /// Starts listening to `source` for the lifetime of the returned session.
    pub fn session<'a, S: InputSource + ?Sized>(
        &'a mut self,
        source: &'a mut S,
    ) -> Result<Session<'a, S>> {
        self.start(&mut *source)?;
        Ok(Session {
            state: self,
            source,
        })
    }
}

impl<S: InputSource + ?Sized> Deref for Session<'_, S> {
    type Target = InputState;

    fn deref(&self) -> &InputState {
        &*self.state
    }
}

impl<S: InputSource + ?Sized> DerefMut for Session<'_, S> {
    fn deref_mut(&mut self) -> &mut InputState {
        &mut *self.state
    }
}

impl<S: InputSource + ?Sized> Drop for Session<'_, S> {
    fn drop(&mut self) {
        self.state.stop(&mut *self.source);
    }
}
