#[cfg(doc)]
use super::DomainId;
use super::IntegerVariable;

/// Trait for transforming a variable into a view onto the same domain. Calling
/// [`TransformableVariable::scaled`] on a [`DomainId`] with scale `a` gives the variable `a * x`
/// without introducing a new variable or constraint.
pub trait TransformableVariable<View: IntegerVariable> {
    /// Get a variable which domain is scaled compared to the domain of self.
    ///
    /// The scaled domain will have holes in it. E.g. if we have `dom(x) = {1, 2}`, then
    /// `dom(x.scaled(2)) = {2, 4}` and *not* `dom(x.scaled(2)) = {1, 2, 3, 4}`.
    fn scaled(&self, scale: i32) -> View;

    /// Get a variable which domain has a constant offset to the domain of self.
    fn offset(&self, offset: i32) -> View;
}
