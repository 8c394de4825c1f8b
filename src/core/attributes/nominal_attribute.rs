use crate::core::attributes::Attribute;
use std::any::Any;
use std::collections::HashMap;

/// Categorical attribute with a fixed set of labels.
///
/// Values are stored as indexes into `values`; `label_map` resolves a label
/// back to its index.
pub struct NominalAttribute {
    pub name: String,
    pub values: Vec<String>,
    pub label_map: HashMap<String, usize>,
}

impl NominalAttribute {
    pub fn new(name: String) -> Self {
        Self {
            name,
            values: Vec::new(),
            label_map: HashMap::new(),
        }
    }

    pub fn with_values(
        name: String,
        values: Vec<String>,
        label_map: HashMap<String, usize>,
    ) -> Self {
        Self {
            name,
            values,
            label_map,
        }
    }

    pub fn index_of_value(&self, value: &str) -> Option<usize> {
        self.label_map.get(value).copied()
    }
}

impl Attribute for NominalAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_labels_to_indexes() {
        let mut map = HashMap::new();
        map.insert("yes".to_string(), 0);
        map.insert("no".to_string(), 1);
        let attr = NominalAttribute::with_values(
            "answer".into(),
            vec!["yes".into(), "no".into()],
            map,
        );

        assert_eq!(attr.index_of_value("no"), Some(1));
        assert_eq!(attr.index_of_value("maybe"), None);
        assert_eq!(attr.values.len(), 2);
    }
}
