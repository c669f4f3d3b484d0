use core::cell::RefCell;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};

use crate::domain::{
    dto::ResponseBody,
    ports::{Actor, ActorError, ConfigBuffer, Persistence},
};

/// Actor handle that serializes every call.
///
/// Each call holds a critical section until the actor returns, so a call
/// always runs to completion before the next one starts. Calling back into
/// the same handle from inside [`SharedActor::with`] panics.
pub struct SharedActor<A: Actor> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<A>>,
}

impl<A: Actor> SharedActor<A> {
    pub const fn new(actor: A) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(actor)),
        }
    }

    /// Run `f` with exclusive access to the actor
    pub fn with<R>(&self, f: impl FnOnce(&mut A) -> R) -> R {
        self.inner.lock(|actor| f(&mut actor.borrow_mut()))
    }

    pub fn begin(&self) -> Result<(), ActorError> {
        self.with(|actor| actor.begin())
    }

    pub fn receive_action(&self, action: i32, payload: &str) -> (bool, ResponseBody) {
        self.with(|actor| actor.receive_action(action, payload))
    }

    pub fn get_config(&self) -> Result<ConfigBuffer, ActorError> {
        self.with(|actor| actor.get_config())
    }

    pub fn set_config(&self, config: &[u8], save: bool) -> Result<Persistence, ActorError> {
        self.with(|actor| actor.set_config(config, save))
    }

    pub fn into_inner(self) -> A {
        self.inner.into_inner().into_inner()
    }
}
