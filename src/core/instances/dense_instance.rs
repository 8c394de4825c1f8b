use crate::core::instance_header::InstanceHeader;
use crate::core::instances::instance::Instance;
use std::sync::Arc;

pub struct DenseInstance {
    pub header: Arc<InstanceHeader>,
    pub values: Vec<f64>,
    pub weight: f64,
}

impl DenseInstance {
    pub fn new(header: Arc<InstanceHeader>, values: Vec<f64>, weight: f64) -> DenseInstance {
        DenseInstance {
            header,
            values,
            weight,
        }
    }
}

impl Instance for DenseInstance {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn class_index(&self) -> usize {
        self.header.class_index()
    }

    fn class_value(&self) -> Option<f64> {
        let value = *self.values.get(self.header.class_index())?;
        if value.is_nan() { None } else { Some(value) }
    }

    fn number_of_classes(&self) -> usize {
        self.header.number_of_classes()
    }

    fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }

    fn header(&self) -> &InstanceHeader {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::header_numeric_binary;

    #[test]
    fn class_value_reads_class_index() {
        let instance = DenseInstance::new(header_numeric_binary(), vec![3.5, 1.0], 1.0);
        assert_eq!(instance.class_index(), 1);
        assert_eq!(instance.class_value(), Some(1.0));
        assert_eq!(instance.value_at_index(0), Some(3.5));
        assert_eq!(instance.value_at_index(7), None);
        assert_eq!(instance.number_of_classes(), 2);
    }

    #[test]
    fn missing_class_is_none() {
        let instance = DenseInstance::new(header_numeric_binary(), vec![0.0, f64::NAN], 1.0);
        assert_eq!(instance.class_value(), None);
    }
}
