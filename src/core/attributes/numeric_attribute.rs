use crate::core::attributes::Attribute;
use std::any::Any;

/// Continuous attribute. Carries no state beyond its name.
pub struct NumericAttribute {
    pub name: String,
}

impl NumericAttribute {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

impl Attribute for NumericAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
