//! Extension points used from outside the crate: custom converters and
//! listeners attached to a run.

use std::cell::RefCell;
use std::rc::Rc;

use docgraph::base::{ReflectionId, SourceLocation};
use docgraph::config::Options;
use docgraph::converter::{
    Context, ConvertError, Converter, ConverterEvent, DeclarationConverter, EventKind, Listener,
    Phase, ResolvedTypeConverter, SymbolTarget, TypeNodeConverter, codes,
};
use docgraph::models::{Comment, CommentTag, ReflectionKind, Type};
use docgraph::program::{
    DeclarationKind, MemoryProgram, ResolvedType, SymbolFlags, TypeNode, TypeNodeKind,
};

use crate::helpers::program_fixtures::*;
use crate::helpers::project_assertions::*;

// =============================================================================
// CUSTOM CONVERTERS
// =============================================================================

/// Converts variables without looking at their type.
struct UntypedVariables;

impl DeclarationConverter for UntypedVariables {
    fn kinds(&self) -> &[DeclarationKind] {
        &[DeclarationKind::Variable]
    }

    fn priority(&self) -> i32 {
        10
    }

    fn convert(
        &self,
        cx: &mut Context<'_>,
        target: &SymbolTarget,
    ) -> Result<Option<ReflectionId>, ConvertError> {
        let Some(id) = cx.create_declaration(ReflectionKind::VARIABLE, target)? else {
            return Ok(None);
        };
        if let Some(data) = cx
            .project_mut()
            .get_mut(id)
            .and_then(|r| r.declaration_data_mut())
        {
            data.default_value = Some("<untyped>".to_string());
        }
        Ok(Some(id))
    }
}

#[test]
fn test_higher_priority_declaration_converter_wins() {
    let program = library_program();
    let mut converter = Converter::default();
    converter.add_declaration_converter(Box::new(UntypedVariables));

    let conversion = converter
        .convert(&program, &program, program.entry_points())
        .unwrap();
    let version = get_reflection(&conversion.project, "index.VERSION");
    let data = version.declaration_data().unwrap();
    assert_eq!(data.default_value.as_deref(), Some("<untyped>"));
    assert!(data.ty.is_none());

    // Other kinds still go through the built-ins.
    let parse = get_reflection(&conversion.project, "index.parse");
    assert_eq!(parse.signatures().len(), 2);
}

/// Spells checker-only types as intrinsics.
struct OpaqueAsIntrinsic;

impl ResolvedTypeConverter for OpaqueAsIntrinsic {
    fn priority(&self) -> i32 {
        10
    }

    fn supports(&self, ty: &ResolvedType) -> bool {
        matches!(ty, ResolvedType::Opaque(_))
    }

    fn convert_type(&self, _: &mut Context<'_>, ty: &ResolvedType) -> Type {
        Type::intrinsic(ty.display())
    }
}

#[test]
fn test_custom_resolved_type_converter() {
    let mut program = MemoryProgram::new();
    let index = program.add_module("index", ENTRY_FILE);
    let (_, value) = program.add_export(index, "value", DeclarationKind::Variable, |d| d);
    program.set_type(value, ResolvedType::Opaque("symbol".into()));

    let mut converter = Converter::default();
    converter.add_resolved_type_converter(Box::new(OpaqueAsIntrinsic));
    let conversion = converter
        .convert(&program, &program, program.entry_points())
        .unwrap();

    let value = get_reflection(&conversion.project, "index.value");
    assert_eq!(
        value.declaration_data().and_then(|d| d.ty.clone()),
        Some(Type::intrinsic("symbol"))
    );
    assert!(conversion.diagnostics.with_code(codes::UNKNOWN_TYPE).is_empty());
}

struct ShoutingKeywords;

impl TypeNodeConverter for ShoutingKeywords {
    fn kind(&self) -> TypeNodeKind {
        TypeNodeKind::Keyword
    }

    fn convert_node(&self, _: &mut Context<'_>, node: &TypeNode) -> Type {
        match node {
            TypeNode::Keyword(name) => Type::intrinsic(name.to_uppercase()),
            _ => Type::unknown("?"),
        }
    }
}

#[test]
fn test_type_node_converters_are_unique_per_kind() {
    let mut converter = Converter::default();
    assert_eq!(
        converter.add_type_node_converter(Box::new(ShoutingKeywords)),
        Err(ConvertError::DuplicateTypeNodeConverter(TypeNodeKind::Keyword))
    );

    let mut empty = Converter::empty(Options::default());
    assert!(empty.add_type_node_converter(Box::new(ShoutingKeywords)).is_ok());
    assert_eq!(empty.type_node_converters().len(), 1);
    assert!(empty.type_node_converters().get(TypeNodeKind::Keyword).is_some());
}

// =============================================================================
// LISTENERS
// =============================================================================

/// Records the name of every declaration as it is created.
struct NameRecorder {
    names: Rc<RefCell<Vec<String>>>,
}

impl Listener for NameRecorder {
    fn handle(&mut self, cx: &mut Context<'_>, event: &ConverterEvent) -> Result<(), ConvertError> {
        if let ConverterEvent::CreateDeclaration { reflection, .. } = event {
            if let Some(r) = cx.project().get(*reflection) {
                self.names.borrow_mut().push(r.name().to_string());
            }
        }
        Ok(())
    }
}

#[test]
fn test_listener_sees_every_created_declaration() {
    let program = library_program();
    let converter = Converter::default();
    let names = Rc::new(RefCell::new(Vec::new()));

    let mut cx = converter.context(&program, &program);
    cx.events_mut().subscribe(
        0,
        Box::new(NameRecorder {
            names: Rc::clone(&names),
        }),
    );
    cx.convert(program.entry_points()).unwrap();

    let names = names.borrow();
    for expected in ["Animal", "speak", "helper", "Puppy", "internal"] {
        assert!(
            names.iter().any(|n| n == expected),
            "Expected '{}' in {:?}",
            expected,
            names
        );
    }
    assert!(!names.iter().any(|n| n == "index"));
    // Members are announced after their container.
    let position = |name: &str| names.iter().position(|n| n == name).unwrap();
    assert!(position("Animal") < position("speak"));
}

#[test]
fn test_rename_while_finalizing_names() {
    let program = library_program();
    let converter = Converter::default();
    let mut cx = converter.context(&program, &program);
    cx.events_mut().on(EventKind::FinalizeNames, 0, |cx, _| {
        let functions: Vec<ReflectionId> = cx
            .project()
            .iter()
            .filter(|r| r.kind() == ReflectionKind::FUNCTION)
            .map(|r| r.id())
            .collect();
        for id in functions {
            let name = format!("fn_{}", cx.project().get(id).map(|r| r.name()).unwrap_or_default());
            cx.rename(id, name)?;
        }
        Ok(())
    });
    let conversion = cx.convert(program.entry_points()).unwrap();
    let project = &conversion.project;

    let parse = get_reflection(project, "index.fn_parse");
    assert_eq!(parse.original_name(), Some("parse"));
    assert!(find_reflection(project, "index.parse").is_none());
    assert!(find_reflection(project, "index.util.fn_helper").is_some());
}

#[test]
fn test_rename_while_resolving_fails() {
    let program = library_program();
    let converter = Converter::default();
    let mut cx = converter.context(&program, &program);
    cx.events_mut().on(EventKind::Resolve, 0, |cx, event| {
        if let ConverterEvent::Resolve { reflection } = event {
            cx.rename(*reflection, "renamed")?;
        }
        Ok(())
    });
    let err = cx.convert(program.entry_points()).err();
    assert_eq!(err, Some(ConvertError::RenameOutsidePhase(Phase::Resolving)));
}

#[test]
fn test_removing_class_removes_references_to_it() {
    let program = library_program();
    let converter = Converter::default();
    let mut cx = converter.context(&program, &program);
    cx.events_mut().on(EventKind::ResolveBegin, 0, |cx, _| {
        let dog = cx.project().iter().find(|r| r.name() == "Dog").map(|r| r.id());
        if let Some(dog) = dog {
            cx.remove(dog)?;
        }
        Ok(())
    });
    let conversion = cx.convert(program.entry_points()).unwrap();
    let project = &conversion.project;

    assert!(find_reflection(project, "index.Dog").is_none());
    assert!(find_reflection(project, "index.Puppy").is_none());
    let animal = get_reflection(project, "index.Animal");
    assert!(animal.declaration_data().unwrap().extended_by.is_empty());
    assert_tree_invariants(project);
}

#[test]
fn test_listener_error_aborts_conversion() {
    let program = library_program();
    let converter = Converter::default();
    let mut cx = converter.context(&program, &program);
    cx.events_mut().on(EventKind::End, 0, |_, _| {
        Err(ConvertError::plugin("audit", "refusing to continue"))
    });
    let err = cx.convert(program.entry_points()).err();
    assert!(matches!(err, Some(ConvertError::Plugin { plugin: "audit", .. })));
}

// =============================================================================
// NESTED CONVERSION
// =============================================================================

#[test]
fn test_symbols_converted_by_a_listener_reach_every_listener() {
    let mut program = MemoryProgram::new();
    let module = program.add_module("index", "src/index.ts");
    program.add_export(module, "shown", DeclarationKind::Variable, |d| {
        d.with_type(TypeNode::keyword("string"))
    });
    let mut extras = Vec::new();
    for (name, line) in [("extra", 10), ("kept", 20)] {
        let symbol = program.add_symbol(name, SymbolFlags::VALUE);
        let declaration = program.declare_with(symbol, DeclarationKind::Variable, |d| {
            d.with_type(TypeNode::keyword("number"))
                .with_source(SourceLocation::new("src/index.ts", line, 0))
        });
        extras.push((symbol, declaration));
    }
    program.add_comment(
        extras[0].1,
        Comment::new("").with_tag(CommentTag::new("hidden", "")),
    );

    let converter = Converter::default();
    let mut cx = converter.context(&program, &program);
    let symbols: Vec<_> = extras.iter().map(|(symbol, _)| *symbol).collect();
    cx.events_mut().on(EventKind::CreateModule, 0, move |cx, event| {
        if let ConverterEvent::CreateModule { reflection, .. } = event {
            for symbol in &symbols {
                cx.with_scope(*reflection, |cx| cx.convert_symbol(*symbol, None))?;
            }
        }
        Ok(())
    });
    let seen = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&seen);
    cx.events_mut().on(EventKind::CreateDeclaration, -10, move |cx, event| {
        if let ConverterEvent::CreateDeclaration { reflection, .. } = event {
            let name = cx.project().get(*reflection).map(|r| r.name().to_string());
            recorder.borrow_mut().extend(name);
        }
        Ok(())
    });
    let conversion = cx.convert(program.entry_points()).unwrap();
    let project = &conversion.project;

    assert_eq!(*seen.borrow(), vec!["extra", "kept", "shown"]);
    assert!(find_reflection(project, "index.extra").is_none());
    assert_eq!(conversion.diagnostics.with_code(codes::REMOVED_BY_PLUGIN).len(), 1);
    let kept = get_reflection(project, "index.kept");
    assert_eq!(kept.sources.len(), 1);
    assert_eq!(kept.sources[0].line, 20);
    assert_tree_invariants(project);
}
