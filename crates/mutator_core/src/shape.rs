//! Resolved static shape of a record type.

use crate::key::TypeKey;
use crate::reflect::{FieldDescriptor, Record};

/// A record's type key plus its ordered field descriptors.
#[derive(Debug, Clone)]
pub struct Shape {
    record: TypeKey,
    fields: Vec<FieldDescriptor>,
}

impl Shape {
    /// Collect the shape of `R`.
    pub fn of<R: Record>() -> Self {
        Self {
            record: R::record_type(),
            fields: R::fields(),
        }
    }

    pub fn record(&self) -> TypeKey {
        self.record
    }

    /// Field descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look a field up by its identifier.
    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Distinct destination types annotated by any field, in first-seen order.
    pub fn targets(&self) -> Vec<TypeKey> {
        let mut targets = Vec::new();
        for annotation in self.fields.iter().flat_map(|f| f.annotations()) {
            if !targets.contains(&annotation.target) {
                targets.push(annotation.target);
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;

    struct Moth;
    struct Butterfly;

    #[derive(Default)]
    struct Caterpillar {
        id: String,
        ears: i64,
    }

    impl Record for Caterpillar {
        fn fields() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::new::<String>("id", 0, true)
                    .annotate::<Moth>("moth_id")
                    .annotate::<Butterfly>("butterfly_id"),
                FieldDescriptor::new::<i64>("ears", 1, true).annotate::<Moth>("ear_count"),
            ]
        }

        fn field(&self, index: usize) -> Option<&dyn Any> {
            match index {
                0 => Some(&self.id),
                1 => Some(&self.ears),
                _ => None,
            }
        }

        fn field_mut(&mut self, index: usize) -> Option<&mut dyn Any> {
            match index {
                0 => Some(&mut self.id),
                1 => Some(&mut self.ears),
                _ => None,
            }
        }
    }

    #[test]
    fn shape_lists_fields_in_declaration_order() {
        let shape = Shape::of::<Caterpillar>();
        let names: Vec<_> = shape.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["id", "ears"]);
        assert_eq!(shape.record(), TypeKey::of::<Caterpillar>());
    }

    #[test]
    fn field_named_resolves_by_identifier() {
        let shape = Shape::of::<Caterpillar>();
        assert_eq!(shape.field_named("ears").map(|f| f.index()), Some(1));
        assert!(shape.field_named("wings").is_none());
    }

    #[test]
    fn targets_are_distinct_and_ordered() {
        let shape = Shape::of::<Caterpillar>();
        assert_eq!(shape.targets(), vec![TypeKey::of::<Moth>(), TypeKey::of::<Butterfly>()]);
    }

    #[test]
    fn field_access_matches_descriptors() {
        let mut record = Caterpillar {
            id: "c-1".into(),
            ears: 2,
        };
        for field in Caterpillar::fields() {
            let value = record.field(field.index()).expect("descriptor index must resolve");
            assert_eq!((*value).type_id(), field.ty().id());
        }
        assert!(record.field(2).is_none());
        assert!(record.field_mut(2).is_none());
    }
}
