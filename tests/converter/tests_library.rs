//! Converting the fixture library with the built-in converters and plugins.

use docgraph::config::Options;
use docgraph::converter::codes;
use docgraph::models::{ReferenceType, ReflectionFlags, ReflectionKind, Type, TypeParameterType};
use docgraph::models::LiteralValue;

use crate::helpers::program_fixtures::*;
use crate::helpers::project_assertions::*;

// =============================================================================
// TREE SHAPE
// =============================================================================

#[test]
fn test_tree_invariants_hold() {
    let conversion = convert(&library_program());
    assert_tree_invariants(&conversion.project);
    assert_unique_ids(&conversion.project);
}

#[test]
fn test_module_children_sorted_by_kind_then_name() {
    let conversion = convert(&library_program());
    let project = &conversion.project;
    let index = get_reflection(project, "index");
    assert_kind(index, ReflectionKind::MODULE);
    assert_eq!(
        child_names(project, index.id()),
        vec!["util", "Size", "Animal", "Dog", "Named", "Maybe", "VERSION", "parse", "Puppy"]
    );
}

#[test]
fn test_module_groups() {
    let conversion = convert(&library_program());
    let index = get_reflection(&conversion.project, "index");
    let titles: Vec<&str> = index.groups.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Namespaces",
            "Enumerations",
            "Classes",
            "Interfaces",
            "Type aliases",
            "Variables",
            "Functions",
            "References",
        ]
    );
    let classes = &index.groups[2];
    assert_eq!(classes.children.len(), 2);
}

#[test]
fn test_project_takes_configured_name() {
    let conversion = convert_with(&library_program(), repo_options());
    let project = &conversion.project;
    assert_eq!(project.name(), "library");
    assert_kind(project.get(project.root()).unwrap(), ReflectionKind::PROJECT);
}

#[test]
fn test_hidden_export_is_removed_with_diagnostic() {
    let conversion = convert(&library_program());
    assert!(find_reflection(&conversion.project, "index.internal").is_none());
    let removed = conversion.diagnostics.with_code(codes::REMOVED_BY_PLUGIN);
    assert_eq!(removed.len(), 1);
    assert!(removed[0].message.contains("internal"));
}

// =============================================================================
// CLASSES
// =============================================================================

#[test]
fn test_class_members() {
    let conversion = convert(&library_program());
    let project = &conversion.project;
    let animal = get_reflection(project, "index.Animal");
    assert!(animal.flags.contains(ReflectionFlags::ABSTRACT | ReflectionFlags::EXPORTED));
    assert_eq!(
        animal.comment.as_ref().map(|c| c.short_text.as_str()),
        Some("Base class for animals.")
    );
    assert_eq!(
        child_names(project, animal.id()),
        vec!["constructor", "name", "secret", "age", "speak"]
    );

    let name = get_reflection(project, "index.Animal.name");
    assert!(name.flags.contains(ReflectionFlags::READONLY | ReflectionFlags::PUBLIC));
    assert!(!name.flags.contains(ReflectionFlags::EXPORTED));
    let secret = get_reflection(project, "index.Animal.secret");
    assert!(secret.flags.contains(ReflectionFlags::PRIVATE));
}

#[test]
fn test_constructor_signature_returns_class() {
    let conversion = convert(&library_program());
    let project = &conversion.project;
    let animal = get_reflection(project, "index.Animal");
    let ctor = get_reflection(project, "index.Animal.constructor");
    assert_kind(ctor, ReflectionKind::CONSTRUCTOR);

    let signature = &ctor.signatures()[0];
    assert_eq!(signature.parameters[0].name, "name");
    let Some(Type::Reference(reference)) = &signature.return_type else {
        panic!("Expected a reference return type, got {:?}", signature.return_type);
    };
    assert_eq!(reference.reflection(project), Some(animal.id()));
}

#[test]
fn test_method_comment_lives_on_signature() {
    let conversion = convert(&library_program());
    let speak = get_reflection(&conversion.project, "index.Animal.speak");
    assert_kind(speak, ReflectionKind::METHOD);
    assert!(speak.comment.is_none());
    assert!(speak.has_comment());
    assert_eq!(
        speak.signatures()[0].comment.as_ref().map(|c| c.short_text.as_str()),
        Some("Make a sound.")
    );
    assert_eq!(speak.signatures()[0].return_type, Some(Type::intrinsic("string")));
}

#[test]
fn test_accessor_pair() {
    let conversion = convert(&library_program());
    let age = get_reflection(&conversion.project, "index.Animal.age");
    assert_kind(age, ReflectionKind::ACCESSOR);
    let data = age.declaration_data().unwrap();
    assert!(data.has_getter && data.has_setter);
    assert_eq!(data.ty, Some(Type::intrinsic("number")));
    let setter = data.set_signature.as_ref().unwrap();
    assert_eq!(setter.parameters[0].name, "value");
    assert_eq!(setter.parameters[0].ty, Some(Type::intrinsic("number")));
}

#[test]
fn test_heritage_links_both_ways() {
    let conversion = convert(&library_program());
    let project = &conversion.project;
    let named = get_reflection(project, "index.Named");
    let animal = get_reflection(project, "index.Animal");
    let dog = get_reflection(project, "index.Dog");

    let dog_data = dog.declaration_data().unwrap();
    let Type::Reference(base) = &dog_data.extended_types[0] else {
        panic!("Expected a reference, got {:?}", dog_data.extended_types[0]);
    };
    assert_eq!(base.reflection(project), Some(animal.id()));

    let animal_data = animal.declaration_data().unwrap();
    assert_eq!(
        animal_data.extended_by,
        vec![Type::Reference(ReferenceType::to_reflection("Dog", dog.id()))]
    );
    assert_eq!(
        named.declaration_data().unwrap().implemented_by,
        vec![Type::Reference(ReferenceType::to_reflection("Animal", animal.id()))]
    );
}

// =============================================================================
// OTHER DECLARATIONS
// =============================================================================

#[test]
fn test_overloaded_function() {
    let conversion = convert(&library_program());
    let parse = get_reflection(&conversion.project, "index.parse");
    assert_kind(parse, ReflectionKind::FUNCTION);

    let signatures = parse.signatures();
    assert_eq!(signatures.len(), 2);
    assert_eq!(signatures[0].parameters[0].ty, Some(Type::intrinsic("string")));
    assert_eq!(signatures[1].parameters[0].ty, Some(Type::intrinsic("number")));
    assert_eq!(
        signatures[0].parameters[0].comment.as_ref().map(|c| c.short_text.as_str()),
        Some("The raw input.")
    );
    assert_eq!(signatures[0].sources[0].line, 60);
    assert_eq!(parse.sources.len(), 3);
}

#[test]
fn test_enum_members_sorted() {
    let conversion = convert(&library_program());
    let project = &conversion.project;
    let size = get_reflection(project, "index.Size");
    assert_eq!(child_names(project, size.id()), vec!["Large", "Small"]);
    let large = get_reflection(project, "index.Size.Large");
    assert_eq!(
        large.declaration_data().and_then(|d| d.ty.clone()),
        Some(Type::literal(LiteralValue::Number(1.0)))
    );
}

#[test]
fn test_generic_type_alias() {
    let conversion = convert(&library_program());
    let maybe = get_reflection(&conversion.project, "index.Maybe");
    let data = maybe.declaration_data().unwrap();
    assert_eq!(data.type_parameters[0].name, "T");
    assert_eq!(
        data.ty,
        Some(Type::union(vec![
            Type::TypeParameter(TypeParameterType::new("T")),
            Type::literal(LiteralValue::Null),
        ]))
    );
}

#[test]
fn test_namespace_and_variable() {
    let conversion = convert(&library_program());
    let project = &conversion.project;
    assert_kind(get_reflection(project, "index.util"), ReflectionKind::NAMESPACE);
    assert_kind(get_reflection(project, "index.util.helper"), ReflectionKind::FUNCTION);

    let version = get_reflection(project, "index.VERSION");
    assert!(version.flags.contains(ReflectionFlags::CONST));
    assert_eq!(
        version.declaration_data().and_then(|d| d.default_value.as_deref()),
        Some("\"1.0.0\"")
    );
}

#[test]
fn test_reexport_references_class() {
    let conversion = convert(&library_program());
    let project = &conversion.project;
    let dog = get_reflection(project, "index.Dog");
    let puppy = get_reflection(project, "index.Puppy");
    assert_kind(puppy, ReflectionKind::REFERENCE);
    assert_eq!(
        puppy.reference_link().and_then(|l| l.resolve(project)),
        Some(dog.id())
    );
}

#[test]
fn test_sources_relative_to_base_path() {
    let conversion = convert_with(&library_program(), repo_options());
    let project = &conversion.project;
    let index = get_reflection(project, "index");
    assert_eq!(index.sources[0].file_name, "src/index.ts");
    let animal = get_reflection(project, "index.Animal");
    assert_eq!(animal.sources[0].file_name, "src/index.ts");
    assert_eq!(animal.sources[0].line, 10);
}

// =============================================================================
// OPTIONS AND DETERMINISM
// =============================================================================

#[test]
fn test_exclude_private() {
    let options = Options {
        exclude_private: true,
        ..Options::default()
    };
    let conversion = convert_with(&library_program(), options);
    assert!(find_reflection(&conversion.project, "index.Animal.secret").is_none());
    assert!(find_reflection(&conversion.project, "index.Animal.name").is_some());
}

#[test]
fn test_exclude_not_documented() {
    let options = Options {
        exclude_not_documented: true,
        ..Options::default()
    };
    let conversion = convert_with(&library_program(), options);
    let project = &conversion.project;
    assert!(find_reflection(project, "index.VERSION").is_none());
    assert!(find_reflection(project, "index.Size.Small").is_none());
    assert!(find_reflection(project, "index.Animal.speak").is_some());
    assert!(find_reflection(project, "index.parse").is_some());
    assert!(find_reflection(project, "index.Size").is_some());
    assert_tree_invariants(project);
}

#[test]
fn test_conversion_is_deterministic() {
    let program = library_program();
    let first = convert(&program);
    let second = convert(&program);
    let shape = |project: &docgraph::models::ProjectReflection| -> Vec<(u32, String, u32)> {
        project
            .iter()
            .map(|r| (r.id().index(), project.full_name(r.id()), r.kind().bits()))
            .collect()
    };
    assert_eq!(shape(&first.project), shape(&second.project));
}
