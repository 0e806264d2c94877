//! Program fixtures: small libraries built with the in-memory program.

use docgraph::base::{SourceLocation, SymbolId};
use docgraph::config::Options;
use docgraph::converter::{Conversion, Converter};
use docgraph::models::{Comment, CommentTag, LiteralValue};
use docgraph::program::{DeclarationKind, MemoryProgram, ModifierFlags, SymbolFlags, TypeNode};

pub const ENTRY_FILE: &str = "/repo/src/index.ts";

fn at(line: u32) -> SourceLocation {
    SourceLocation::new(ENTRY_FILE, line, 0)
}

fn keyword(name: &str) -> Option<TypeNode> {
    Some(TypeNode::keyword(name))
}

/// A library exercising every built-in declaration converter.
///
/// ```text
/// index
/// ├── interface Named { readonly name: string }
/// ├── abstract class Animal implements Named
/// │     constructor(name), name, speak(), get/set age, private secret
/// ├── class Dog extends Animal { fetch() }
/// ├── enum Size { Small = 0, Large = 1 }
/// ├── function parse(input: string): number   (two overloads)
/// ├── type Maybe<T> = T | null
/// ├── const VERSION = "1.0.0"
/// ├── namespace util { function helper() }
/// ├── export { Dog as Puppy }
/// └── internal            (@hidden)
/// ```
pub fn library_program() -> MemoryProgram {
    let mut program = MemoryProgram::new();
    let index = program.add_module("index", ENTRY_FILE);

    let (named, _) = program.add_export(index, "Named", DeclarationKind::Interface, |d| {
        d.with_source(at(1))
    });
    program.add_member_declaration(named, "name", DeclarationKind::PropertySignature, |d| {
        d.with_type(TypeNode::keyword("string"))
            .with_modifiers(ModifierFlags::READONLY)
    });

    let animal = add_animal(&mut program, index, named);

    let (dog, _) = program.add_export(index, "Dog", DeclarationKind::Class, |d| {
        d.with_extends(TypeNode::reference("Animal", Some(animal)))
            .with_source(at(40))
    });
    program.add_member_declaration(dog, "fetch", DeclarationKind::Method, |d| {
        d.with_body().with_type(TypeNode::keyword("void"))
    });

    let (size, _) = program.add_export(index, "Size", DeclarationKind::Enum, |d| d);
    for (name, value) in [("Small", 0.0), ("Large", 1.0)] {
        let (_, member) = program.add_member_declaration(size, name, DeclarationKind::EnumMember, |d| d);
        program.set_constant(member, LiteralValue::Number(value));
    }

    add_parse(&mut program, index);

    let t = program.add_symbol("T", SymbolFlags::TYPE_PARAMETER);
    let (_, maybe) = program.add_export(index, "Maybe", DeclarationKind::TypeAlias, |d| {
        d.with_type(TypeNode::Union(vec![
            TypeNode::reference("T", Some(t)),
            TypeNode::Literal(LiteralValue::Null),
        ]))
    });
    program.add_type_parameter(maybe, "T", None);

    program.add_export(index, "VERSION", DeclarationKind::Variable, |d| {
        d.with_modifiers(ModifierFlags::CONST)
            .with_initializer("\"1.0.0\"")
            .with_type(TypeNode::keyword("string"))
    });

    let (util, _) = program.add_export(index, "util", DeclarationKind::Module, |d| d);
    program.add_export(util, "helper", DeclarationKind::Function, |d| d.with_body());

    let puppy = program.add_symbol("Puppy", SymbolFlags::ALIAS);
    program.set_alias(puppy, dog);
    program.export(index, puppy);

    let (_, internal) = program.add_export(index, "internal", DeclarationKind::Variable, |d| d);
    program.add_comment(internal, Comment::new("").with_tag(CommentTag::new("hidden", "")));

    program
}

fn add_animal(program: &mut MemoryProgram, index: SymbolId, named: SymbolId) -> SymbolId {
    let (animal, decl) = program.add_export(index, "Animal", DeclarationKind::Class, |d| {
        d.with_implements(TypeNode::reference("Named", Some(named)))
            .with_modifiers(ModifierFlags::ABSTRACT)
            .with_source(at(10))
    });
    program.add_comment(decl, Comment::new("Base class for animals."));

    let (_, ctor) = program.add_member_declaration(animal, "constructor", DeclarationKind::Constructor, |d| {
        d.with_body().with_source(at(12))
    });
    program.add_parameter(ctor, "name", keyword("string"), ModifierFlags::empty());

    program.add_member_declaration(animal, "name", DeclarationKind::Property, |d| {
        d.with_type(TypeNode::keyword("string"))
            .with_modifiers(ModifierFlags::READONLY | ModifierFlags::PUBLIC)
    });

    let (_, speak) = program.add_member_declaration(animal, "speak", DeclarationKind::Method, |d| {
        d.with_body().with_type(TypeNode::keyword("string"))
    });
    program.add_comment(speak, Comment::new("Make a sound."));

    let (age, _) = program.add_member_declaration(animal, "age", DeclarationKind::GetAccessor, |d| {
        d.with_body().with_type(TypeNode::keyword("number"))
    });
    let set_age = program.declare_with(age, DeclarationKind::SetAccessor, |d| d.with_body());
    program.add_parameter(set_age, "value", keyword("number"), ModifierFlags::empty());

    program.add_member_declaration(animal, "secret", DeclarationKind::Property, |d| {
        d.with_modifiers(ModifierFlags::PRIVATE)
    });
    animal
}

fn add_parse(program: &mut MemoryProgram, index: SymbolId) {
    let (parse, first) = program.add_export(index, "parse", DeclarationKind::Function, |d| {
        d.with_type(TypeNode::keyword("number")).with_source(at(60))
    });
    program.add_parameter(first, "input", keyword("string"), ModifierFlags::empty());
    program.add_comment(
        first,
        Comment::new("Parse a value.")
            .with_tag(CommentTag::new("param", "The raw input.").with_param("input")),
    );

    let second = program.declare_with(parse, DeclarationKind::Function, |d| {
        d.with_type(TypeNode::keyword("number")).with_source(at(61))
    });
    program.add_parameter(second, "input", keyword("number"), ModifierFlags::empty());

    let implementation = program.declare_with(parse, DeclarationKind::Function, |d| {
        d.with_body().with_source(at(62))
    });
    program.add_parameter(implementation, "input", None, ModifierFlags::empty());
}

/// Convert with default options.
pub fn convert(program: &MemoryProgram) -> Conversion {
    convert_with(program, Options::default())
}

/// Convert, panicking with the error on failure.
pub fn convert_with(program: &MemoryProgram, options: Options) -> Conversion {
    Converter::new(options)
        .convert(program, program, program.entry_points())
        .unwrap_or_else(|e| panic!("conversion failed: {}", e))
}

/// Options rooted at the fixture repository.
pub fn repo_options() -> Options {
    Options {
        name: "library".to_string(),
        base_path: Some("/repo".to_string()),
        ..Options::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_program_has_one_entry_point() {
        let program = library_program();
        assert_eq!(program.entry_points().len(), 1);
        assert_eq!(program.entry_points()[0].name, "index");
    }
}
