use std::fmt;

use crate::Lifecycle;

type CreateFn<R> = Box<dyn FnMut() -> R>;
type TouchFn<R> = Box<dyn FnMut(&mut R)>;
type ValidateFn<R> = Box<dyn FnMut(&R) -> bool>;
type DestroyFn<R> = Box<dyn FnMut(R)>;

/// A [`Lifecycle`] assembled from plain closures.
///
/// Use this when implementing the trait on a dedicated type is more
/// ceremony than the resource deserves: start from the mandatory `create`
/// closure and chain setters for the optional hooks. Unset hooks fall
/// back to the trait defaults (no-op activation and reset, always-valid,
/// destroy by drop).
pub struct Hooks<R> {
    create: CreateFn<R>,
    on_acquire: Option<TouchFn<R>>,
    on_release: Option<TouchFn<R>>,
    validate: Option<ValidateFn<R>>,
    destroy: Option<DestroyFn<R>>,
}

impl<R> Hooks<R> {
    /// Starts a hook set from the `create` closure.
    pub fn new<F>(create: F) -> Self
    where
        F: FnMut() -> R + 'static,
    {
        Hooks {
            create: Box::new(create),
            on_acquire: None,
            on_release: None,
            validate: None,
            destroy: None,
        }
    }

    /// Runs on every resource just before it is handed out.
    pub fn on_acquire<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut R) + 'static,
    {
        self.on_acquire.replace(Box::new(hook));
        self
    }

    /// Runs on every resource just after it is returned to the pool.
    pub fn on_release<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut R) + 'static,
    {
        self.on_release.replace(Box::new(hook));
        self
    }

    /// Decides whether an idle resource is still usable.
    pub fn validate<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&R) -> bool + 'static,
    {
        self.validate.replace(Box::new(hook));
        self
    }

    /// Permanently disposes of a resource.
    pub fn destroy<F>(mut self, hook: F) -> Self
    where
        F: FnMut(R) + 'static,
    {
        self.destroy.replace(Box::new(hook));
        self
    }
}

impl<R> Lifecycle<R> for Hooks<R> {
    fn create(&mut self) -> R {
        (self.create)()
    }

    fn on_acquire(&mut self, resource: &mut R) {
        if let Some(hook) = self.on_acquire.as_mut() {
            hook(resource);
        }
    }

    fn on_release(&mut self, resource: &mut R) {
        if let Some(hook) = self.on_release.as_mut() {
            hook(resource);
        }
    }

    fn validate(&mut self, resource: &R) -> bool {
        match self.validate.as_mut() {
            Some(hook) => hook(resource),
            None => true,
        }
    }

    fn destroy(&mut self, resource: R) {
        if let Some(hook) = self.destroy.as_mut() {
            hook(resource);
        }
    }
}

impl<R> fmt::Debug for Hooks<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_acquire", &self.on_acquire.is_some())
            .field("on_release", &self.on_release.is_some())
            .field("validate", &self.validate.is_some())
            .field("destroy", &self.destroy.is_some())
            .finish()
    }
}
