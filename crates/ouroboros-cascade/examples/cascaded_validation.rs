//! Cascaded Validation Example
//!
//! This example demonstrates cascading into lists and maps, constraints on
//! container elements and a custom value extractor.
//!
//! Run with:
//! ```bash
//! cargo run -p ouroboros-cascade --example cascaded_validation
//! ```

use std::error::Error;

use ouroboros_cascade::{
    BeanValue, ClassDef, ConstrainedElement, ConstraintKind, ConstraintViolations,
    TypeParameterSlot, TypeRegistry, ValidatorFactory, Value, ValueExtractor,
    ValueExtractorDescriptor, ValueReceiver,
};

/// Hands the `content` of a `Crate` bean to the receiver
#[derive(Debug)]
struct CrateContentExtractor;

impl ValueExtractor for CrateContentExtractor {
    fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
        if let Some(bean) = container.as_bean() {
            receiver.value(None, bean.property("content").unwrap_or(&Value::Null));
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("Cascaded Validation Example");
    println!("===========================\n");

    let factory = build_factory()?;
    cascade_into_list(&factory)?;
    constrain_map_entries(&factory)?;
    cascade_through_custom_container(&factory)?;
    Ok(())
}

// ============================================================================
// Setup
// ============================================================================

fn build_factory() -> Result<ValidatorFactory, Box<dyn Error>> {
    let mut registry = TypeRegistry::new();
    registry.define(ClassDef::builder("Item").field("name", "String"))?;
    registry.define(ClassDef::builder("Crate").type_param("T").field("content", "T"))?;
    registry.define(
        ClassDef::builder("Order")
            .field("items", "List<Item>")
            .field("stock", "Map<String, Integer>")
            .field("packed", "Crate<Item>"),
    )?;

    let factory = ValidatorFactory::builder(registry)
        .add_value_extractor(ValueExtractorDescriptor::new(
            "CrateContentExtractor",
            "Crate",
            TypeParameterSlot::declared("Crate", 0, "T"),
            CrateContentExtractor,
        ))
        .element(ConstrainedElement::field("Item", "name").constraint(ConstraintKind::NotBlank))
        .element(ConstrainedElement::field("Order", "items").cascade_type_argument(&[0]))
        .element(
            ConstrainedElement::field("Order", "stock")
                .type_argument_constraint(&[0], ConstraintKind::size(2, 8))
                .type_argument_constraint(&[1], ConstraintKind::Positive),
        )
        .element(ConstrainedElement::field("Order", "packed").cascade_type_argument(&[0]))
        .build()?;
    Ok(factory)
}

fn item(name: &str) -> Value {
    Value::from(BeanValue::new("Item").with("name", name))
}

fn print_violations(violations: &ConstraintViolations) {
    if violations.is_empty() {
        println!("  valid");
    }
    for violation in violations.iter() {
        println!("  {}: {}", violation.property_path, violation.message);
    }
    println!();
}

// ============================================================================
// Lists
// ============================================================================

fn cascade_into_list(factory: &ValidatorFactory) -> Result<(), Box<dyn Error>> {
    println!("1. Cascading Into a List");
    println!("------------------------");

    let order = Value::from(
        BeanValue::new("Order").with("items", Value::list(vec![item("bolt"), item(" ")])),
    );
    print_violations(&factory.validator().validate(&order, &[])?);
    Ok(())
}

// ============================================================================
// Maps
// ============================================================================

fn constrain_map_entries(factory: &ValidatorFactory) -> Result<(), Box<dyn Error>> {
    println!("2. Map Key and Value Constraints");
    println!("--------------------------------");

    let order = Value::from(BeanValue::new("Order").with(
        "stock",
        Value::map(vec![
            (Value::from("x"), Value::from(3)),
            (Value::from("nuts"), Value::from(0)),
        ]),
    ));
    print_violations(&factory.validator().validate(&order, &[])?);
    Ok(())
}

// ============================================================================
// Custom Containers
// ============================================================================

fn cascade_through_custom_container(factory: &ValidatorFactory) -> Result<(), Box<dyn Error>> {
    println!("3. Custom Container");
    println!("-------------------");

    let order = Value::from(
        BeanValue::new("Order").with("packed", BeanValue::new("Crate").with("content", item(""))),
    );
    print_violations(&factory.validator().validate(&order, &[])?);
    Ok(())
}
