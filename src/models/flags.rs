//! Reflection modifier flags.

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ReflectionFlags: u32 {
        const PRIVATE = 1 << 0;
        const PROTECTED = 1 << 1;
        const PUBLIC = 1 << 2;
        const STATIC = 1 << 3;
        const EXPORTED = 1 << 4;
        const EXTERNAL = 1 << 5;
        const OPTIONAL = 1 << 6;
        const REST = 1 << 7;
        const ABSTRACT = 1 << 8;
        const CONST = 1 << 9;
        const LET = 1 << 10;
        const READONLY = 1 << 11;
    }
}

/// Serialized names, in output order.
const FLAG_NAMES: &[(ReflectionFlags, &str)] = &[
    (ReflectionFlags::PRIVATE, "isPrivate"),
    (ReflectionFlags::PROTECTED, "isProtected"),
    (ReflectionFlags::PUBLIC, "isPublic"),
    (ReflectionFlags::STATIC, "isStatic"),
    (ReflectionFlags::EXPORTED, "isExported"),
    (ReflectionFlags::EXTERNAL, "isExternal"),
    (ReflectionFlags::OPTIONAL, "isOptional"),
    (ReflectionFlags::REST, "isRest"),
    (ReflectionFlags::ABSTRACT, "isAbstract"),
    (ReflectionFlags::CONST, "isConst"),
    (ReflectionFlags::LET, "isLet"),
    (ReflectionFlags::READONLY, "isReadonly"),
];

impl ReflectionFlags {
    const VISIBILITY: Self = Self::PRIVATE.union(Self::PROTECTED).union(Self::PUBLIC);
    const BINDING: Self = Self::CONST.union(Self::LET);

    /// Set or clear a flag, keeping mutually exclusive groups consistent.
    ///
    /// Setting one visibility clears the other two; `CONST` and `LET`
    /// exclude each other.
    pub fn set_flag(&mut self, flag: ReflectionFlags, value: bool) {
        if value {
            if Self::VISIBILITY.contains(flag) {
                self.remove(Self::VISIBILITY);
            }
            if Self::BINDING.contains(flag) {
                self.remove(Self::BINDING);
            }
            self.insert(flag);
        } else {
            self.remove(flag);
        }
    }

    /// Names of the set flags, e.g. `["isPrivate", "isStatic"]`.
    pub fn names(self) -> Vec<&'static str> {
        FLAG_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}
