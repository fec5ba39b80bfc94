//! Component decorator
//!
//! Explicit composition instead of subclassing: the wrapper owns the inner
//! component and implements the same lifecycle surface, forwarding `init`
//! and `update` to it. Whether the wrapped component also accepts a
//! visitor is the decorator's own choice, expressed through
//! [`Decorated::accepts_inner`]; there is no implicit chaining.
//!
//! The world's attach operations accept either a plain component or a
//! wrapper: the component lands in its store either way, and
//! [`Decorated::accepts_inner`] decides whether the entity's dispatch
//! list carries the slot, i.e. whether traversal visitors reach it.

use super::{Component, UpdateArgs};

/// Wrapper adding capability to a component without subclassing
#[derive(Debug, Clone, PartialEq)]
pub struct Decorated<C> {
    inner: C,
    accept_inner: bool,
}

impl<C: Component> Decorated<C> {
    /// Wrap a component; by default the inner component also accepts visitors
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            accept_inner: true,
        }
    }

    /// Choose whether visitors reach the wrapped component
    #[must_use]
    pub fn with_accept_inner(mut self, accept_inner: bool) -> Self {
        self.accept_inner = accept_inner;
        self
    }

    /// Whether visitors should also be dispatched to the inner component
    pub fn accepts_inner(&self) -> bool {
        self.accept_inner
    }

    /// Shared access to the wrapped component
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Mutable access to the wrapped component
    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    /// Unwrap, returning the inner component
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Component> From<C> for Decorated<C> {
    fn from(inner: C) -> Self {
        Self::new(inner)
    }
}

impl<C: Component> Component for Decorated<C> {
    fn init(&mut self) {
        self.inner.init();
    }

    fn update(&mut self, args: &UpdateArgs) {
        self.inner.update(args);
    }
}
