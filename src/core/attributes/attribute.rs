use std::any::Any;
use std::sync::Arc;

/// Shared, immutable attribute descriptor.
pub type AttributeRef = Arc<dyn Attribute>;

/// Schema-level description of a single column of an instance.
///
/// Concrete kinds ([`NominalAttribute`](super::NominalAttribute),
/// [`NumericAttribute`](super::NumericAttribute)) are recovered through
/// [`as_any`](Attribute::as_any) downcasts where the distinction matters,
/// e.g. when counting the classes of a nominal class attribute.
pub trait Attribute: Send + Sync {
    fn name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}
