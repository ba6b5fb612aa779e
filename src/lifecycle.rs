/// A trait defining the lifecycle of resources managed by a pool.
///
/// This trait provides methods for creating and destroying resources, as
/// well as preparing, resetting, and validating them as they move in and
/// out of the pool.
pub trait Lifecycle<R> {
    /// Creates a new resource.
    ///
    /// Called only when the pool has no usable idle resource and is below
    /// its capacity.
    fn create(&mut self) -> R;

    /// Prepares a resource that is about to be handed out.
    ///
    /// By default, this method does nothing. Override this method to
    /// provide custom activation logic.
    #[inline(always)]
    fn on_acquire(&mut self, _resource: &mut R) {}

    /// Resets a resource that was just returned to the pool.
    ///
    /// By default, this method does nothing. Override this method to
    /// provide custom reset logic.
    #[inline(always)]
    fn on_release(&mut self, _resource: &mut R) {}

    /// Validates that an idle resource is still in a good state to be
    /// handed out again.
    ///
    /// By default, this method always returns true. Override this method
    /// to provide custom validation logic.
    #[inline(always)]
    fn validate(&mut self, _resource: &R) -> bool {
        true
    }

    /// Permanently disposes of a resource.
    ///
    /// By default, the resource is simply dropped. Override this method
    /// when disposal requires out-of-band teardown.
    #[inline(always)]
    fn destroy(&mut self, _resource: R) {}
}
