use crate::core::attributes::{Attribute, AttributeRef, NominalAttribute};

/// Immutable schema shared by every instance of one stream: relation name,
/// attribute descriptors and the index of the class attribute.
pub struct InstanceHeader {
    pub relation_name: String,
    pub attributes: Vec<AttributeRef>,
    pub class_index: usize,
}

impl InstanceHeader {
    pub fn new(
        relation_name: String,
        attributes: Vec<AttributeRef>,
        class_index: usize,
    ) -> InstanceHeader {
        InstanceHeader {
            relation_name,
            attributes,
            class_index,
        }
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.attributes.get(index).map(|a| &**a)
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    /// Number of classes of the class attribute, 0 when it is not nominal.
    pub fn number_of_classes(&self) -> usize {
        match self.attributes.get(self.class_index) {
            Some(attr) => attr
                .as_any()
                .downcast_ref::<NominalAttribute>()
                .map_or(0, |nominal| nominal.values.len()),
            None => 0,
        }
    }
}
