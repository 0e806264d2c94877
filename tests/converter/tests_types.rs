//! Type conversion end to end: annotations through the type node
//! converters, inferred types through the resolved type converters.

use rstest::rstest;

use docgraph::converter::{Conversion, codes};
use docgraph::models::{
    LiteralValue, MappedModifier, ObjectType, ReferenceType, SignatureParameter, SignatureType,
    Type, TypeParameterType,
};
use docgraph::program::{
    DeclarationKind, FunctionTypeNode, MemoryProgram, ParameterNode, ResolvedParameter,
    ResolvedSignature, ResolvedType, TypeMemberNode, TypeNode,
};

use crate::helpers::program_fixtures::{ENTRY_FILE, convert};
use crate::helpers::project_assertions::get_reflection;

// =============================================================================
// HELPERS
// =============================================================================

/// A module exporting `value`, annotated with `node`.
fn annotated_program(node: TypeNode) -> MemoryProgram {
    let mut program = MemoryProgram::new();
    let index = program.add_module("index", ENTRY_FILE);
    program.add_export(index, "value", DeclarationKind::Variable, |d| d.with_type(node));
    program
}

/// A module exporting `value`, whose checker type is `ty`.
fn inferred_program(ty: ResolvedType) -> MemoryProgram {
    let mut program = MemoryProgram::new();
    let index = program.add_module("index", ENTRY_FILE);
    let (_, value) = program.add_export(index, "value", DeclarationKind::Variable, |d| d);
    program.set_type(value, ty);
    program
}

fn value_type(conversion: &Conversion) -> Type {
    get_reflection(&conversion.project, "index.value")
        .declaration_data()
        .and_then(|d| d.ty.clone())
        .unwrap_or_else(|| panic!("index.value has no type"))
}

fn annotated(node: TypeNode) -> Type {
    value_type(&convert(&annotated_program(node)))
}

fn inferred(ty: ResolvedType) -> Type {
    value_type(&convert(&inferred_program(ty)))
}

fn string() -> Type {
    Type::intrinsic("string")
}

fn number() -> Type {
    Type::intrinsic("number")
}

// =============================================================================
// TYPE NODES
// =============================================================================

#[rstest]
#[case::keyword(TypeNode::keyword("string"), string())]
#[case::array(TypeNode::array(TypeNode::keyword("number")), Type::array(number()))]
#[case::tuple(
    TypeNode::Tuple(vec![TypeNode::keyword("string"), TypeNode::keyword("number")]),
    Type::Tuple { elements: vec![string(), number()] }
)]
#[case::parenthesized_union(
    TypeNode::Parenthesized(Box::new(TypeNode::Union(vec![
        TypeNode::keyword("string"),
        TypeNode::Literal(LiteralValue::Boolean(false)),
    ]))),
    Type::union(vec![string(), Type::literal(LiteralValue::Boolean(false))])
)]
#[case::intersection(
    TypeNode::Intersection(vec![TypeNode::reference("A", None), TypeNode::reference("B", None)]),
    Type::intersection(vec![
        Type::Reference(ReferenceType::unresolved("A")),
        Type::Reference(ReferenceType::unresolved("B")),
    ])
)]
#[case::this(TypeNode::This, Type::intrinsic("this"))]
#[case::infer(TypeNode::Infer("U".into()), Type::Inferred { name: "U".into() })]
#[case::keyof(
    TypeNode::TypeOperator {
        operator: "keyof".into(),
        target: Box::new(TypeNode::reference("Options", None)),
    },
    Type::TypeOperator {
        operator: "keyof".into(),
        target: Box::new(Type::Reference(ReferenceType::unresolved("Options"))),
    }
)]
fn test_type_node(#[case] node: TypeNode, #[case] expected: Type) {
    assert_eq!(annotated(node), expected);
}

#[test]
fn test_conditional_and_indexed_access() {
    let node = TypeNode::Conditional {
        check_type: Box::new(TypeNode::Infer("T".into())),
        extends_type: Box::new(TypeNode::keyword("string")),
        true_type: Box::new(TypeNode::IndexedAccess {
            object_type: Box::new(TypeNode::reference("Map", None)),
            index_type: Box::new(TypeNode::Literal(LiteralValue::String("key".into()))),
        }),
        false_type: Box::new(TypeNode::keyword("never")),
    };
    assert_eq!(
        annotated(node),
        Type::Conditional {
            check_type: Box::new(Type::Inferred { name: "T".into() }),
            extends_type: Box::new(string()),
            true_type: Box::new(Type::IndexedAccess {
                object_type: Box::new(Type::Reference(ReferenceType::unresolved("Map"))),
                index_type: Box::new(Type::literal(LiteralValue::String("key".into()))),
            }),
            false_type: Box::new(Type::intrinsic("never")),
        }
    );
}

#[test]
fn test_mapped_type_keeps_modifiers() {
    let node = TypeNode::Mapped {
        parameter: "K".into(),
        constraint: Box::new(TypeNode::keyword("string")),
        template: Box::new(TypeNode::keyword("number")),
        name_type: None,
        readonly_modifier: Some(MappedModifier::Remove),
        optional_modifier: Some(MappedModifier::Add),
    };
    let Type::Mapped {
        parameter,
        parameter_type,
        readonly_modifier,
        optional_modifier,
        name_type,
        ..
    } = annotated(node)
    else {
        panic!("Expected a mapped type");
    };
    assert_eq!(parameter, "K");
    assert_eq!(*parameter_type, string());
    assert_eq!(readonly_modifier, Some(MappedModifier::Remove));
    assert_eq!(optional_modifier, Some(MappedModifier::Add));
    assert!(name_type.is_none());
}

#[test]
fn test_predicate() {
    let node = TypeNode::Predicate {
        name: "x".into(),
        asserts: true,
        target_type: Some(Box::new(TypeNode::keyword("string"))),
    };
    assert_eq!(
        annotated(node),
        Type::Predicate {
            name: "x".into(),
            asserts: true,
            target_type: Some(Box::new(string())),
        }
    );
}

#[test]
fn test_type_literal_members() {
    let node = TypeNode::TypeLiteral(vec![
        TypeMemberNode::Property {
            name: "id".into(),
            optional: true,
            readonly: true,
            type_node: None,
        },
        TypeMemberNode::Method {
            name: "run".into(),
            optional: false,
            signature: FunctionTypeNode::new(Vec::new(), TypeNode::keyword("void")),
        },
        TypeMemberNode::Construct(FunctionTypeNode::new(Vec::new(), TypeNode::keyword("object"))),
        TypeMemberNode::Index {
            parameter: "key".into(),
            key_type: TypeNode::keyword("string"),
            value_type: TypeNode::keyword("number"),
            readonly: false,
        },
    ]);
    let Type::Object(object) = annotated(node) else {
        panic!("Expected an object type");
    };
    assert_eq!(object.properties.len(), 2);
    assert_eq!(object.properties[0].ty, Type::intrinsic("any"));
    assert!(object.properties[0].optional && object.properties[0].readonly);
    assert!(matches!(object.properties[1].ty, Type::Signature(_)));
    assert!(object.call_signatures.is_empty());
    assert!(object.construct_signatures[0].is_constructor);
    let index = object.index_signature.as_ref().unwrap();
    assert_eq!(index.key_type, string());
    assert_eq!(index.value_type, number());
}

#[test]
fn test_function_and_constructor_types() {
    let signature = FunctionTypeNode::new(
        vec![ParameterNode::new("input", TypeNode::keyword("string"))],
        TypeNode::keyword("number"),
    );
    let expected = |is_constructor| {
        Type::Signature(SignatureType {
            is_constructor,
            type_parameters: Vec::new(),
            parameters: vec![SignatureParameter {
                name: "input".into(),
                optional: false,
                rest: false,
                ty: string(),
            }],
            return_type: Box::new(number()),
        })
    };
    assert_eq!(annotated(TypeNode::Function(signature.clone())), expected(false));
    assert_eq!(annotated(TypeNode::Constructor(signature)), expected(true));
}

#[test]
fn test_references_resolve_to_reflections() {
    let mut program = MemoryProgram::new();
    let index = program.add_module("index", ENTRY_FILE);
    let (target, _) = program.add_export(index, "Target", DeclarationKind::Class, |d| d);
    let (limit, _) = program.add_export(index, "limit", DeclarationKind::Variable, |d| d);
    program.add_export(index, "value", DeclarationKind::Variable, |d| {
        d.with_type(TypeNode::Union(vec![
            TypeNode::Reference {
                name: "Target".into(),
                symbol: Some(target),
                type_arguments: vec![TypeNode::keyword("string")],
            },
            TypeNode::Query {
                name: "limit".into(),
                symbol: Some(limit),
            },
            TypeNode::reference("Missing", None),
        ]))
    });

    let conversion = convert(&program);
    let project = &conversion.project;
    let Type::Union { types } = value_type(&conversion) else {
        panic!("Expected a union");
    };
    let Type::Reference(reference) = &types[0] else {
        panic!("Expected a reference, got {:?}", types[0]);
    };
    assert_eq!(reference.type_arguments, vec![string()]);
    assert_eq!(
        reference.reflection(project),
        Some(get_reflection(project, "index.Target").id())
    );
    let Type::Query { query_type } = &types[1] else {
        panic!("Expected a query, got {:?}", types[1]);
    };
    assert_eq!(
        query_type.reflection(project),
        Some(get_reflection(project, "index.limit").id())
    );
    let Type::Reference(missing) = &types[2] else {
        panic!("Expected a reference, got {:?}", types[2]);
    };
    assert_eq!(missing.reflection(project), None);
}

// =============================================================================
// RESOLVED TYPES
// =============================================================================

#[rstest]
#[case::intrinsic(ResolvedType::intrinsic("boolean"), Type::intrinsic("boolean"))]
#[case::literal(
    ResolvedType::Literal(LiteralValue::Number(3.0)),
    Type::literal(LiteralValue::Number(3.0))
)]
#[case::union(
    ResolvedType::Union(vec![ResolvedType::intrinsic("string"), ResolvedType::intrinsic("number")]),
    Type::union(vec![string(), number()])
)]
#[case::intersection(
    ResolvedType::Intersection(vec![ResolvedType::TypeParameter("T".into())]),
    Type::intersection(vec![Type::TypeParameter(TypeParameterType::new("T"))])
)]
#[case::array(
    ResolvedType::Array(Box::new(ResolvedType::intrinsic("string"))),
    Type::array(string())
)]
#[case::tuple(
    ResolvedType::Tuple(vec![ResolvedType::intrinsic("number")]),
    Type::Tuple { elements: vec![number()] }
)]
#[case::unbound_reference(
    ResolvedType::Reference {
        symbol: None,
        name: "Promise".into(),
        type_arguments: vec![ResolvedType::intrinsic("void")],
    },
    Type::Reference(
        ReferenceType::unresolved("Promise").with_type_arguments(vec![Type::intrinsic("void")])
    )
)]
fn test_resolved_type(#[case] ty: ResolvedType, #[case] expected: Type) {
    assert_eq!(inferred(ty), expected);
}

#[test]
fn test_missing_annotation_defaults_to_any() {
    let mut program = MemoryProgram::new();
    let index = program.add_module("index", ENTRY_FILE);
    program.add_export(index, "value", DeclarationKind::Variable, |d| d);
    assert_eq!(value_type(&convert(&program)), Type::intrinsic("any"));
}

#[test]
fn test_anonymous_object() {
    let ty = ResolvedType::Anonymous {
        properties: vec![("x".into(), ResolvedType::intrinsic("number"))],
        call_signatures: Vec::new(),
    };
    let Type::Object(ObjectType { properties, .. }) = inferred(ty) else {
        panic!("Expected an object type");
    };
    assert_eq!(properties[0].name, "x");
    assert_eq!(properties[0].ty, number());
}

#[test]
fn test_anonymous_single_call_signature_is_function_type() {
    let ty = ResolvedType::Anonymous {
        properties: Vec::new(),
        call_signatures: vec![ResolvedSignature {
            type_parameters: Vec::new(),
            parameters: vec![ResolvedParameter {
                name: "n".into(),
                declaration: None,
                ty: ResolvedType::intrinsic("number"),
                optional: true,
                rest: false,
            }],
            return_type: ResolvedType::intrinsic("string"),
        }],
    };
    let Type::Signature(signature) = inferred(ty) else {
        panic!("Expected a signature type");
    };
    assert!(!signature.is_constructor);
    assert!(signature.parameters[0].optional);
    assert_eq!(signature.parameters[0].ty, number());
    assert_eq!(*signature.return_type, string());
}

#[test]
fn test_opaque_type_falls_back_to_unknown() {
    let conversion = convert(&inferred_program(ResolvedType::Opaque("Weird<?>".into())));
    assert_eq!(value_type(&conversion), Type::unknown("Weird<?>"));
    let warnings = conversion.diagnostics.with_code(codes::UNKNOWN_TYPE);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("Weird<?>"));
}
