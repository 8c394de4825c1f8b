use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use std::collections::HashMap;
use std::sync::Arc;

/// One numeric feature `x` plus a binary nominal class, class index 1.
pub fn header_numeric_binary() -> Arc<InstanceHeader> {
    let vals = vec!["A".to_string(), "B".to_string()];
    let mut map = HashMap::new();
    map.insert("A".to_string(), 0);
    map.insert("B".to_string(), 1);
    let attributes: Vec<AttributeRef> = vec![
        Arc::new(NumericAttribute::new("x".into())) as AttributeRef,
        Arc::new(NominalAttribute::with_values("class".into(), vals, map)) as AttributeRef,
    ];

    Arc::new(InstanceHeader::new("bin".into(), attributes, 1))
}
