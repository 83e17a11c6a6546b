//! End-to-end validation tests

use ouroboros_cascade::*;

// ============================================================================
// Fixtures
// ============================================================================

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .define(
            ClassDef::builder("Item")
                .field("name", "String")
                .getter("getCode", "String"),
        )
        .unwrap();
    registry
        .define(
            ClassDef::builder("Order")
                .field("items", "List<Item>")
                .field("members", "Set<Item>")
                .field("labels", "List<String>")
                .field("tags", "Map<String, Integer>")
                .field("byCode", "Map<String, Item>")
                .field("nested", "List<List<Item>>")
                .field("nickname", "Optional<String>")
                .field("maybe", "Optional<Item>")
                .field("anything", "Object")
                .field("primary", "Item")
                .field("scores", "int[]")
                .field("groups", "Map<String, List<String>>"),
        )
        .unwrap();
    registry
}

fn factory(elements: Vec<ConstrainedElement>) -> ValidatorFactory {
    factory_with(registry(), ValidationConfig::default(), elements)
}

fn factory_with(
    registry: TypeRegistry,
    config: ValidationConfig,
    elements: Vec<ConstrainedElement>,
) -> ValidatorFactory {
    ValidatorFactory::builder(registry)
        .config(config)
        .elements(elements)
        .build()
        .unwrap()
}

fn build_error(elements: Vec<ConstrainedElement>) -> ConfigurationError {
    match ValidatorFactory::builder(registry()).elements(elements).build() {
        Err(Error::Configuration(err)) => err,
        other => panic!("expected a configuration error, got {:?}", other.map(|_| ())),
    }
}

fn item(name: &str) -> Value {
    Value::from(BeanValue::new("Item").with("name", name))
}

fn order(property: &str, value: Value) -> Value {
    Value::from(BeanValue::new("Order").with(property, value))
}

fn item_name_not_blank() -> ConstrainedElement {
    ConstrainedElement::field("Item", "name").constraint(ConstraintKind::NotBlank)
}

fn paths(factory: &ValidatorFactory, object: &Value) -> Vec<String> {
    factory.validator().validate(object, &[]).unwrap().paths()
}

// ============================================================================
// Cascading Into Containers
// ============================================================================

#[test]
fn test_cascade_into_list_elements() {
    let factory = factory(vec![
        item_name_not_blank(),
        ConstrainedElement::field("Order", "items").cascade_type_argument(&[0]),
    ]);
    let object = order(
        "items",
        Value::list(vec![item("a"), item("b"), item(" ")]),
    );

    let violations = factory.validator().validate(&object, &[]).unwrap();
    assert_eq!(violations.paths(), vec!["items[2].name".to_string()]);

    let violation = &violations.as_slice()[0];
    assert_eq!(violation.constraint, "NotBlank");
    assert_eq!(violation.message, "must not be blank");
    assert_eq!(violation.invalid_value, Value::from(" "));
    assert_eq!(violation.root_bean_class, Some(ClassName::new("Order")));
    assert_eq!(violation.leaf_bean_class, Some(ClassName::new("Item")));
}

#[test]
fn test_whole_element_cascade_on_container() {
    let factory = factory(vec![
        item_name_not_blank(),
        ConstrainedElement::field("Order", "items").cascade(),
    ]);
    let object = order("items", Value::list(vec![item(""), item("ok")]));
    assert_eq!(paths(&factory, &object), vec!["items[0].name"]);
}

#[test]
fn test_cascade_into_set_and_map_values() {
    let factory = factory(vec![
        item_name_not_blank(),
        ConstrainedElement::field("Order", "members").cascade_type_argument(&[0]),
        ConstrainedElement::field("Order", "byCode").cascade_type_argument(&[1]),
    ]);

    let members = order("members", Value::set(vec![item("a"), item("")]));
    assert_eq!(paths(&factory, &members), vec!["members[].name"]);

    let by_code = order(
        "byCode",
        Value::map(vec![
            (Value::from("a"), item("x")),
            (Value::from("b"), item("")),
        ]),
    );
    assert_eq!(paths(&factory, &by_code), vec!["byCode[b].name"]);
}

#[test]
fn test_cascade_into_nested_containers() {
    let factory = factory(vec![
        item_name_not_blank(),
        ConstrainedElement::field("Order", "nested").cascade_type_argument(&[0, 0]),
    ]);
    let object = order(
        "nested",
        Value::list(vec![
            Value::list(vec![item("a")]),
            Value::list(vec![item(""), item("b")]),
        ]),
    );
    assert_eq!(
        paths(&factory, &object),
        vec!["nested[1].<collection element>[0].name"]
    );
}

#[test]
fn test_cascade_through_optional() {
    let factory = factory(vec![
        item_name_not_blank(),
        ConstrainedElement::field("Order", "maybe").cascade(),
    ]);
    let present = order("maybe", Value::optional(Some(item(""))));
    assert_eq!(paths(&factory, &present), vec!["maybe.name"]);

    let empty = order("maybe", Value::optional(None));
    assert!(paths(&factory, &empty).is_empty());
}

#[test]
fn test_potential_container_resolved_at_runtime() {
    let factory = factory(vec![
        item_name_not_blank(),
        ConstrainedElement::field("Order", "anything").cascade(),
    ]);

    let list = order("anything", Value::list(vec![item("a"), item("")]));
    assert_eq!(paths(&factory, &list), vec!["anything[1].name"]);

    let map = order(
        "anything",
        Value::map(vec![(Value::from("k"), item(""))]),
    );
    assert_eq!(paths(&factory, &map), vec!["anything[k].name"]);

    let bean = order("anything", item(""));
    assert_eq!(paths(&factory, &bean), vec!["anything.name"]);

    let scalar = order("anything", Value::from("text"));
    assert!(paths(&factory, &scalar).is_empty());
}

#[test]
fn test_legacy_runtime_containers() {
    let elements = vec![
        item_name_not_blank(),
        ConstrainedElement::field("Order", "primary").cascade(),
    ];
    let object = order("primary", Value::list(vec![item(""), item("b")]));

    let current = factory(elements.clone());
    assert!(paths(&current, &object).is_empty());

    let legacy = factory_with(
        registry(),
        ValidationConfig::new().legacy_runtime_containers(true),
        elements,
    );
    assert_eq!(paths(&legacy, &object), vec!["primary[0].name"]);
}

#[test]
fn test_null_values_are_not_cascaded() {
    let factory = factory(vec![
        item_name_not_blank(),
        ConstrainedElement::field("Order", "items").cascade_type_argument(&[0]),
        ConstrainedElement::field("Order", "primary").cascade(),
    ]);
    let object = Value::from(
        BeanValue::new("Order")
            .with("items", Value::list(vec![Value::Null, item("ok")]))
            .with("primary", Value::Null),
    );
    assert!(paths(&factory, &object).is_empty());
}

// ============================================================================
// Type Argument Constraints
// ============================================================================

#[test]
fn test_type_argument_constraints_paths() {
    let factory = factory(vec![
        ConstrainedElement::field("Order", "labels")
            .type_argument_constraint(&[0], ConstraintKind::NotBlank),
        ConstrainedElement::field("Order", "tags")
            .type_argument_constraint(&[0], ConstraintKind::size(2, 10))
            .type_argument_constraint(&[1], ConstraintKind::Positive),
        ConstrainedElement::field("Order", "scores")
            .type_argument_constraint(&[0], ConstraintKind::Positive),
    ]);

    let labels = order(
        "labels",
        Value::list(vec![Value::from("ok"), Value::from("")]),
    );
    assert_eq!(paths(&factory, &labels), vec!["labels[1].<collection element>"]);

    let tags = order(
        "tags",
        Value::map(vec![
            (Value::from("x"), Value::from(1)),
            (Value::from("ok"), Value::from(-1)),
        ]),
    );
    assert_eq!(
        paths(&factory, &tags),
        vec!["tags[x].<map key>", "tags[ok].<collection element>"]
    );

    let scores = order(
        "scores",
        Value::Array(ArrayValue::Int(vec![3, 0])),
    );
    assert_eq!(paths(&factory, &scores), vec!["scores[1].<collection element>"]);
}

#[test]
fn test_equal_element_values_reported_per_index() {
    let factory = factory(vec![ConstrainedElement::field("Order", "labels")
        .type_argument_constraint(&[0], ConstraintKind::NotBlank)]);
    let object = order(
        "labels",
        Value::list(vec![Value::from(""), Value::from("A"), Value::from("")]),
    );

    let violations = factory.validator().validate(&object, &[]).unwrap();
    assert_eq!(
        violations.paths(),
        vec!["labels[0].<collection element>", "labels[2].<collection element>"]
    );
    assert!(violations.iter().all(|v| v.invalid_value == Value::from("")));
}

#[test]
fn test_map_value_container_constraint_paths() {
    let factory = factory(vec![ConstrainedElement::field("Order", "groups")
        .type_argument_constraint(&[1], ConstraintKind::size(1, 10))]);
    let object = order(
        "groups",
        Value::map(vec![
            (Value::from("EMPTY_1"), Value::list(vec![])),
            (Value::from("FULL"), Value::list(vec![Value::from("x")])),
            (Value::from("EMPTY_2"), Value::list(vec![])),
        ]),
    );
    assert_eq!(
        paths(&factory, &object),
        vec![
            "groups[EMPTY_1].<collection element>",
            "groups[EMPTY_2].<collection element>",
        ]
    );
}

#[test]
fn test_optional_unwrapped_by_default() {
    let factory = factory(vec![
        ConstrainedElement::field("Order", "nickname").constraint(ConstraintKind::NotBlank)
    ]);
    let object = order("nickname", Value::optional(Some(Value::from(" "))));

    let violations = factory.validator().validate(&object, &[]).unwrap();
    assert_eq!(violations.paths(), vec!["nickname".to_string()]);
    assert_eq!(violations.as_slice()[0].invalid_value, Value::from(" "));
}

#[test]
fn test_container_constraint_applies_to_container() {
    let factory = factory(vec![
        ConstrainedElement::field("Order", "items").constraint(ConstraintKind::size(1, 2))
    ]);
    let object = order("items", Value::list(vec![]));

    let violations = factory.validator().validate(&object, &[]).unwrap();
    assert_eq!(violations.paths(), vec!["items".to_string()]);
    assert_eq!(violations.as_slice()[0].message, "size must be between 1 and 2");
}

// ============================================================================
// Groups
// ============================================================================

fn grouped_registry() -> TypeRegistry {
    let mut registry = registry();
    registry.define(ClassDef::interface("Basic")).unwrap();
    registry.define(ClassDef::interface("Strict")).unwrap();
    registry
        .define(ClassDef::interface("Checks").group_sequence(["Default", "Strict"]))
        .unwrap();
    registry
        .define(
            ClassDef::builder("Account")
                .field("id", "String")
                .field("email", "String")
                .group_sequence(["Account", "Strict"]),
        )
        .unwrap();
    registry
}

fn code_in_strict() -> ConstrainedElement {
    ConstrainedElement::getter("Item", "getCode").constraint(
        ConstraintDescriptor::new(ConstraintKind::pattern("[A-Z]{3}")).with_groups(["Strict"]),
    )
}

#[test]
fn test_group_selection() {
    let factory = factory_with(
        grouped_registry(),
        ValidationConfig::default(),
        vec![item_name_not_blank(), code_in_strict()],
    );
    let validator = factory.validator();
    let bad = Value::from(BeanValue::new("Item").with("name", "").with("code", "x"));

    assert_eq!(validator.validate(&bad, &[]).unwrap().paths(), vec!["name"]);
    assert_eq!(
        validator.validate(&bad, &[ClassName::new("Strict")]).unwrap().paths(),
        vec!["code"]
    );
    let both = validator
        .validate(&bad, &[ClassName::new("Default"), ClassName::new("Strict")])
        .unwrap();
    assert_eq!(both.len(), 2);

    let twice = validator
        .validate(&bad, &[ClassName::new("Default"), ClassName::new("Default")])
        .unwrap();
    assert_eq!(twice.len(), 1);
}

#[test]
fn test_group_sequence_stops_after_failing_member() {
    let factory = factory_with(
        grouped_registry(),
        ValidationConfig::default(),
        vec![item_name_not_blank(), code_in_strict()],
    );
    let validator = factory.validator();
    let checks = [ClassName::new("Checks")];

    let both_bad = Value::from(BeanValue::new("Item").with("name", "").with("code", "x"));
    assert_eq!(validator.validate(&both_bad, &checks).unwrap().paths(), vec!["name"]);

    let code_bad = Value::from(BeanValue::new("Item").with("name", "n").with("code", "x"));
    assert_eq!(validator.validate(&code_bad, &checks).unwrap().paths(), vec!["code"]);

    let valid = Value::from(BeanValue::new("Item").with("name", "n").with("code", "ABC"));
    assert!(validator.validate(&valid, &checks).unwrap().is_empty());
}

#[test]
fn test_redefined_default_group_sequence() {
    let factory = factory_with(
        grouped_registry(),
        ValidationConfig::default(),
        vec![
            ConstrainedElement::field("Account", "id").constraint(ConstraintKind::NotNull),
            ConstrainedElement::field("Account", "email").constraint(
                ConstraintDescriptor::new(ConstraintKind::Email).with_groups(["Strict"]),
            ),
        ],
    );
    let validator = factory.validator();

    let missing_id = Value::from(BeanValue::new("Account").with("email", "nope"));
    assert_eq!(validator.validate(&missing_id, &[]).unwrap().paths(), vec!["id"]);

    let bad_email = Value::from(
        BeanValue::new("Account")
            .with("id", "42")
            .with("email", "nope"),
    );
    assert_eq!(validator.validate(&bad_email, &[]).unwrap().paths(), vec!["email"]);
}

#[test]
fn test_group_conversion_on_cascade() {
    let name_in_basic = ConstrainedElement::field("Item", "name").constraint(
        ConstraintDescriptor::new(ConstraintKind::NotBlank).with_groups(["Basic"]),
    );
    let object = order("items", Value::list(vec![item("")]));

    let plain = factory_with(
        grouped_registry(),
        ValidationConfig::default(),
        vec![
            name_in_basic.clone(),
            ConstrainedElement::field("Order", "items").cascade_type_argument(&[0]),
        ],
    );
    assert!(paths(&plain, &object).is_empty());

    let converted = factory_with(
        grouped_registry(),
        ValidationConfig::default(),
        vec![
            name_in_basic,
            ConstrainedElement::field("Order", "items")
                .cascade_type_argument(&[0])
                .convert_type_argument_group(&[0], "Default", "Basic"),
        ],
    );
    assert_eq!(paths(&converted, &object), vec!["items[0].name"]);
}

#[test]
fn test_fail_fast() {
    let elements = vec![
        item_name_not_blank(),
        ConstrainedElement::field("Order", "items").cascade_type_argument(&[0]),
    ];
    let object = order("items", Value::list(vec![item(""), item(""), item("")]));

    let all = factory(elements.clone());
    assert_eq!(paths(&all, &object).len(), 3);

    let fast = factory_with(registry(), ValidationConfig::new().fail_fast(true), elements);
    assert_eq!(paths(&fast, &object), vec!["items[0].name"]);
}

// ============================================================================
// Property and Value Validation
// ============================================================================

#[test]
fn test_validate_property_and_value() {
    let factory = factory(vec![
        item_name_not_blank(),
        ConstrainedElement::getter("Item", "getCode").constraint(ConstraintKind::NotNull),
    ]);
    let validator = factory.validator();
    let object = Value::from(BeanValue::new("Item").with("name", ""));

    let name = validator.validate_property(&object, "name", &[]).unwrap();
    assert_eq!(name.paths(), vec!["name"]);
    assert_eq!(validator.validate(&object, &[]).unwrap().len(), 2);

    let value = validator
        .validate_value(&ClassName::new("Item"), "code", &Value::Null, &[])
        .unwrap();
    assert_eq!(value.paths(), vec!["code"]);
    assert!(validator
        .validate_value(&ClassName::new("Item"), "name", &Value::from("ok"), &[])
        .unwrap()
        .is_empty());

    assert!(matches!(
        validator.validate_property(&object, "missing", &[]),
        Err(Error::UnknownProperty { .. })
    ));
    assert!(matches!(
        validator.validate(&Value::from(1), &[]),
        Err(Error::NotABean(_))
    ));
}

// ============================================================================
// Method Validation
// ============================================================================

#[derive(Debug)]
struct CountWithinName;

impl ConstraintValidator for CountWithinName {
    fn name(&self) -> &str {
        "CountWithinName"
    }

    fn is_valid(&self, value: &Value) -> bool {
        let Value::Array(ArrayValue::Object { items, .. }) = value else {
            return true;
        };
        match (items.first().and_then(Value::as_str), items.get(1).and_then(Value::as_i64)) {
            (Some(name), Some(count)) => count <= name.chars().count() as i64,
            _ => true,
        }
    }
}

fn service_factory() -> ValidatorFactory {
    let mut registry = registry();
    registry
        .define(ClassDef::builder("Service").method("register", ["String", "int"], Some("Item")))
        .unwrap();
    factory_with(
        registry,
        ValidationConfig::default(),
        vec![
            item_name_not_blank(),
            ConstrainedElement::parameter("Service", "register", 0).constraint(ConstraintKind::NotBlank),
            ConstrainedElement::parameter("Service", "register", 1).constraint(ConstraintKind::Positive),
            ConstrainedElement::cross_parameter("Service", "register")
                .constraint(ConstraintKind::custom(CountWithinName)),
            ConstrainedElement::return_value("Service", "register").cascade(),
        ],
    )
}

#[test]
fn test_parameter_validation_paths() {
    let validator = service_factory().validator();
    let service = Value::from(BeanValue::new("Service"));

    let invalid = validator
        .validate_parameters(&service, "register", &[Value::Null, Value::from(0)], &[])
        .unwrap();
    assert_eq!(invalid.paths(), vec!["register.arg0", "register.arg1"]);

    let cross = validator
        .validate_parameters(&service, "register", &[Value::from("ab"), Value::from(5)], &[])
        .unwrap();
    assert_eq!(cross.paths(), vec!["register.<cross-parameter>"]);
    assert_eq!(cross.as_slice()[0].message, "must satisfy CountWithinName");

    assert!(validator
        .validate_parameters(&service, "register", &[Value::from("abc"), Value::from(2)], &[])
        .unwrap()
        .is_empty());
}

#[test]
fn test_return_value_validation_paths() {
    let validator = service_factory().validator();
    let service = Value::from(BeanValue::new("Service"));

    let violations = validator
        .validate_return_value(&service, "register", &item(""), &[])
        .unwrap();
    assert_eq!(violations.paths(), vec!["register.<return value>.name"]);
}

#[test]
fn test_method_usage_errors() {
    let validator = service_factory().validator();
    let service = Value::from(BeanValue::new("Service"));

    assert!(matches!(
        validator.validate_parameters(&service, "register", &[Value::Null], &[]),
        Err(Error::ParameterCountMismatch {
            expected: 2,
            actual: 1,
            ..
        })
    ));
    assert!(matches!(
        validator.validate_return_value(&service, "unregister", &Value::Null, &[]),
        Err(Error::UnknownMethod { .. })
    ));
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[test]
fn test_group_conversion_errors() {
    assert!(matches!(
        build_error(vec![
            ConstrainedElement::field("Order", "primary").convert_group("Default", "Basic")
        ]),
        ConfigurationError::GroupConversionOnNonCascadingElement { .. }
    ));

    assert!(matches!(
        build_error(vec![
            ConstrainedElement::field("Order", "primary")
                .cascade()
                .convert_group("Default", "Basic"),
            ConstrainedElement::field("Order", "primary")
                .cascade()
                .convert_group("Default", "Strict"),
        ]),
        ConfigurationError::MultipleGroupConversionsForSameSource { .. }
    ));

    let err = ValidatorFactory::builder(grouped_registry())
        .element(
            ConstrainedElement::field("Order", "primary")
                .cascade()
                .convert_group("Checks", "Basic"),
        )
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Configuration(ConfigurationError::GroupConversionForSequence { .. })
    ));
}

#[test]
fn test_unsupported_constraint_target() {
    assert!(matches!(
        build_error(vec![
            ConstrainedElement::field("Order", "labels").constraint(ConstraintKind::NotBlank)
        ]),
        ConfigurationError::NoValidatorForType { constraint, .. } if constraint == "NotBlank"
    ));
}

#[test]
fn test_unknown_member() {
    assert!(matches!(
        build_error(vec![ConstrainedElement::field("Order", "missing").cascade()]),
        ConfigurationError::MemberNotFound { .. }
    ));
}

// ============================================================================
// Custom Value Extractors
// ============================================================================

/// Unwraps the `content` property of a `Box` bean
#[derive(Debug)]
struct BoxContentExtractor;

impl ValueExtractor for BoxContentExtractor {
    fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
        if let Some(bean) = container.as_bean() {
            receiver.value(None, bean.property("content").unwrap_or(&Value::Null));
        }
    }
}

/// List extractor naming each element node `item`
#[derive(Debug)]
struct NamedListExtractor;

impl ValueExtractor for NamedListExtractor {
    fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
        if let Value::List { items, .. } = container {
            for (index, item) in items.iter().enumerate() {
                receiver.indexed_value(Some("item"), index, item);
            }
        }
    }
}

#[derive(Debug)]
struct NoopExtractor;

impl ValueExtractor for NoopExtractor {
    fn extract_values(&self, _container: &Value, _receiver: &mut dyn ValueReceiver) {}
}

fn shelf_registry() -> TypeRegistry {
    let mut registry = registry();
    registry
        .define(ClassDef::builder("Box").type_param("T").field("content", "T"))
        .unwrap();
    registry
        .define(ClassDef::builder("Shelf").field("boxed", "Box<Item>"))
        .unwrap();
    registry
}

fn shelf_elements() -> Vec<ConstrainedElement> {
    vec![
        item_name_not_blank(),
        ConstrainedElement::field("Shelf", "boxed").cascade_type_argument(&[0]),
    ]
}

#[test]
fn test_custom_container_requires_extractor() {
    let err = ValidatorFactory::builder(shelf_registry())
        .elements(shelf_elements())
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Configuration(ConfigurationError::NoValueExtractorFound { .. })
    ));
}

#[test]
fn test_custom_container_extractor() {
    let factory = ValidatorFactory::builder(shelf_registry())
        .add_value_extractor(ValueExtractorDescriptor::new(
            "BoxContentExtractor",
            "Box",
            TypeParameterSlot::declared("Box", 0, "T"),
            BoxContentExtractor,
        ))
        .elements(shelf_elements())
        .build()
        .unwrap();

    let shelf = Value::from(
        BeanValue::new("Shelf").with(
            "boxed",
            BeanValue::new("Box").with("content", item("")),
        ),
    );
    assert_eq!(paths(&factory, &shelf), vec!["boxed.name"]);
}

#[test]
fn test_validator_with_additional_extractors() {
    let factory = factory(vec![ConstrainedElement::field("Order", "labels")
        .type_argument_constraint(&[0], ConstraintKind::NotBlank)]);
    let object = order("labels", Value::list(vec![Value::from("")]));

    let overlay = factory
        .validator_with_value_extractors([ValueExtractorDescriptor::new(
            "NamedListExtractor",
            "List",
            TypeParameterSlot::declared("List", 0, "E"),
            NamedListExtractor,
        )])
        .unwrap();
    assert_eq!(
        overlay.validate(&object, &[]).unwrap().paths(),
        vec!["labels[0].item"]
    );

    // The factory keeps its own extractors
    assert_eq!(paths(&factory, &object), vec!["labels[0].<collection element>"]);
}

#[test]
fn test_ambiguous_extractors_rejected_at_build() {
    let mut registry = registry();
    registry
        .define(ClassDef::interface("Left").type_param("T"))
        .unwrap();
    registry
        .define(ClassDef::interface("Right").type_param("T"))
        .unwrap();
    registry
        .define(
            ClassDef::builder("Both")
                .type_param("T")
                .extends("Left<T>")
                .extends("Right<T>"),
        )
        .unwrap();
    registry
        .define(ClassDef::builder("Pair").field("both", "Both<String>"))
        .unwrap();

    let err = ValidatorFactory::builder(registry)
        .add_value_extractor(ValueExtractorDescriptor::new(
            "LeftExtractor",
            "Left",
            TypeParameterSlot::declared("Left", 0, "T"),
            NoopExtractor,
        ))
        .add_value_extractor(ValueExtractorDescriptor::new(
            "RightExtractor",
            "Right",
            TypeParameterSlot::declared("Right", 0, "T"),
            NoopExtractor,
        ))
        .element(
            ConstrainedElement::field("Pair", "both")
                .type_argument_constraint(&[0], ConstraintKind::NotBlank),
        )
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Configuration(ConfigurationError::AmbiguousValueExtractors { .. })
    ));
}
