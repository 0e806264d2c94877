//! Reflection kinds.
//!
//! Every reflection carries exactly one kind tag. Tags are powers of two so
//! that a kind can be tested against a group with a single bitwise check,
//! e.g. `kind.intersects(ReflectionKind::SOME_MODULE)`.

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ReflectionKind: u32 {
        const PROJECT = 0x1;
        const MODULE = 0x2;
        const NAMESPACE = 0x4;
        const ENUM = 0x8;
        const ENUM_MEMBER = 0x10;
        const VARIABLE = 0x20;
        const FUNCTION = 0x40;
        const CLASS = 0x80;
        const INTERFACE = 0x100;
        const CONSTRUCTOR = 0x200;
        const PROPERTY = 0x400;
        const METHOD = 0x800;
        const CALL_SIGNATURE = 0x1000;
        const INDEX_SIGNATURE = 0x2000;
        const CONSTRUCTOR_SIGNATURE = 0x4000;
        const PARAMETER = 0x8000;
        const TYPE_LITERAL = 0x10000;
        const TYPE_PARAMETER = 0x20000;
        const ACCESSOR = 0x40000;
        const GET_SIGNATURE = 0x80000;
        const SET_SIGNATURE = 0x100000;
        const OBJECT_LITERAL = 0x200000;
        const TYPE_ALIAS = 0x400000;
        const EVENT = 0x800000;
        const REFERENCE = 0x1000000;

        // Groups
        const CLASS_OR_INTERFACE = Self::CLASS.bits() | Self::INTERFACE.bits();
        const VARIABLE_OR_PROPERTY = Self::VARIABLE.bits() | Self::PROPERTY.bits();
        const FUNCTION_OR_METHOD = Self::FUNCTION.bits() | Self::METHOD.bits();
        const CLASS_MEMBER = Self::ACCESSOR.bits()
            | Self::CONSTRUCTOR.bits()
            | Self::METHOD.bits()
            | Self::PROPERTY.bits()
            | Self::EVENT.bits();
        const SOME_SIGNATURE = Self::CALL_SIGNATURE.bits()
            | Self::INDEX_SIGNATURE.bits()
            | Self::CONSTRUCTOR_SIGNATURE.bits()
            | Self::GET_SIGNATURE.bits()
            | Self::SET_SIGNATURE.bits();
        const SOME_MODULE = Self::MODULE.bits() | Self::NAMESPACE.bits();
        const SOME_TYPE = Self::INTERFACE.bits()
            | Self::TYPE_LITERAL.bits()
            | Self::TYPE_PARAMETER.bits()
            | Self::TYPE_ALIAS.bits();
        const SOME_VALUE = Self::VARIABLE.bits()
            | Self::FUNCTION.bits()
            | Self::OBJECT_LITERAL.bits();
        const TOP_LEVEL = Self::SOME_MODULE.bits()
            | Self::ENUM.bits()
            | Self::VARIABLE.bits()
            | Self::FUNCTION.bits()
            | Self::CLASS.bits()
            | Self::INTERFACE.bits()
            | Self::TYPE_ALIAS.bits()
            | Self::OBJECT_LITERAL.bits()
            | Self::REFERENCE.bits();
    }
}

/// (kind, kindString, plural title) in group-sort order.
const KIND_TABLE: &[(ReflectionKind, &str, &str)] = &[
    (ReflectionKind::PROJECT, "project", "Projects"),
    (ReflectionKind::MODULE, "module", "Modules"),
    (ReflectionKind::NAMESPACE, "namespace", "Namespaces"),
    (ReflectionKind::ENUM, "enum", "Enumerations"),
    (ReflectionKind::ENUM_MEMBER, "enumMember", "Enumeration members"),
    (ReflectionKind::CLASS, "class", "Classes"),
    (ReflectionKind::INTERFACE, "interface", "Interfaces"),
    (ReflectionKind::TYPE_ALIAS, "typeAlias", "Type aliases"),
    (ReflectionKind::CONSTRUCTOR, "constructor", "Constructors"),
    (ReflectionKind::EVENT, "event", "Events"),
    (ReflectionKind::PROPERTY, "property", "Properties"),
    (ReflectionKind::VARIABLE, "variable", "Variables"),
    (ReflectionKind::FUNCTION, "function", "Functions"),
    (ReflectionKind::ACCESSOR, "accessor", "Accessors"),
    (ReflectionKind::METHOD, "method", "Methods"),
    (ReflectionKind::OBJECT_LITERAL, "objectLiteral", "Object literals"),
    (ReflectionKind::PARAMETER, "parameter", "Parameters"),
    (ReflectionKind::TYPE_PARAMETER, "typeParameter", "Type parameters"),
    (ReflectionKind::TYPE_LITERAL, "typeLiteral", "Type literals"),
    (ReflectionKind::CALL_SIGNATURE, "callSignature", "Call signatures"),
    (
        ReflectionKind::CONSTRUCTOR_SIGNATURE,
        "constructorSignature",
        "Constructor signatures",
    ),
    (ReflectionKind::INDEX_SIGNATURE, "indexSignature", "Index signatures"),
    (ReflectionKind::GET_SIGNATURE, "getSignature", "Get signatures"),
    (ReflectionKind::SET_SIGNATURE, "setSignature", "Set signatures"),
    (ReflectionKind::REFERENCE, "reference", "References"),
];

impl ReflectionKind {
    fn entry(self) -> Option<(usize, &'static str, &'static str)> {
        KIND_TABLE
            .iter()
            .enumerate()
            .find(|(_, (kind, _, _))| *kind == self)
            .map(|(weight, (_, name, plural))| (weight, *name, *plural))
    }

    /// camelCase name used as `kindString` in serialized output.
    pub fn kind_string(self) -> &'static str {
        self.entry().map(|(_, name, _)| name).unwrap_or("unknown")
    }

    /// Plural title used for reflection groups.
    pub fn plural(self) -> &'static str {
        self.entry().map(|(_, _, plural)| plural).unwrap_or("Unknown")
    }

    /// Sort weight: lower kinds are listed first.
    pub fn weight(self) -> usize {
        self.entry()
            .map(|(weight, _, _)| weight)
            .unwrap_or(KIND_TABLE.len())
    }

    /// Kinds a container of this kind may hold as children.
    pub fn allowed_children(self) -> ReflectionKind {
        if self.intersects(Self::PROJECT | Self::SOME_MODULE) {
            Self::TOP_LEVEL
        } else if self.intersects(Self::CLASS_OR_INTERFACE) {
            Self::CLASS_MEMBER
        } else if self == Self::ENUM {
            Self::ENUM_MEMBER
        } else if self.intersects(Self::OBJECT_LITERAL | Self::TYPE_LITERAL) {
            Self::PROPERTY | Self::METHOD | Self::ACCESSOR
        } else {
            Self::empty()
        }
    }

    pub fn is_container(self) -> bool {
        !self.allowed_children().is_empty()
    }

    /// Whether a child of kind `child` may live in a container of this kind.
    pub fn accepts_child(self, child: ReflectionKind) -> bool {
        !child.is_empty() && self.allowed_children().contains(child)
    }

    /// Kinds that own signatures (and, through them, parameters).
    pub fn has_signatures(self) -> bool {
        self.intersects(Self::FUNCTION_OR_METHOD | Self::CONSTRUCTOR)
    }
}
