//! Declaration categories and their canonical section order.

use std::fmt;

/// Kinds of top-level declarations, declared in canonical output order.
///
/// The discriminant order *is* the rank: sorting by `rank()` yields the
/// section layout of an organized script. `ClassDocstring` is only used
/// for free comment text that belongs to no declaration; the leading class
/// docstring itself is never placed by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclarationKind {
    ToolDirective,
    ClassName,
    Extends,
    Signal,
    Enum,
    Const,
    Export,
    PublicVar,
    PrivateVar,
    OnReady,
    Init,
    Ready,
    BuiltinCallback,
    PublicFunc,
    PrivateFunc,
    ClassDocstring,
}

impl DeclarationKind {
    pub const ALL: [DeclarationKind; 16] = [
        DeclarationKind::ToolDirective,
        DeclarationKind::ClassName,
        DeclarationKind::Extends,
        DeclarationKind::Signal,
        DeclarationKind::Enum,
        DeclarationKind::Const,
        DeclarationKind::Export,
        DeclarationKind::PublicVar,
        DeclarationKind::PrivateVar,
        DeclarationKind::OnReady,
        DeclarationKind::Init,
        DeclarationKind::Ready,
        DeclarationKind::BuiltinCallback,
        DeclarationKind::PublicFunc,
        DeclarationKind::PrivateFunc,
        DeclarationKind::ClassDocstring,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::ToolDirective => "tool",
            DeclarationKind::ClassName => "class_name",
            DeclarationKind::Extends => "extends",
            DeclarationKind::Signal => "signal",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Const => "const",
            DeclarationKind::Export => "export",
            DeclarationKind::PublicVar => "public_var",
            DeclarationKind::PrivateVar => "private_var",
            DeclarationKind::OnReady => "onready",
            DeclarationKind::Init => "init",
            DeclarationKind::Ready => "ready",
            DeclarationKind::BuiltinCallback => "builtin_callback",
            DeclarationKind::PublicFunc => "public_func",
            DeclarationKind::PrivateFunc => "private_func",
            DeclarationKind::ClassDocstring => "class_docstring",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
