//! Entity records: the typed collections produced by the extraction front-end.

use serde::{Deserialize, Serialize};

// =============================================================================
// ENTITY KIND
// =============================================================================

/// Closed set of entity kinds the graph understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    File,
    Namespace,
    Class,
    Function,
    Enum,
    Interface,
    Variable,
    Type,
    Method,
    Constructor,
    Field,
    Getter,
    Setter,
    FunctionVariable,
    ClassStaticBlock,
    FunctionProperty,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [EntityKind; 16] = [
        EntityKind::File,
        EntityKind::Namespace,
        EntityKind::Class,
        EntityKind::Function,
        EntityKind::Enum,
        EntityKind::Interface,
        EntityKind::Variable,
        EntityKind::Type,
        EntityKind::Method,
        EntityKind::Constructor,
        EntityKind::Field,
        EntityKind::Getter,
        EntityKind::Setter,
        EntityKind::FunctionVariable,
        EntityKind::ClassStaticBlock,
        EntityKind::FunctionProperty,
    ];

    /// Position of this kind inside [`EntityKind::ALL`].
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Behaviour entities: anything that can be invoked.
    ///
    /// Class static blocks are not callable in the language sense but run code
    /// on behalf of the class, so they count as behaviour.
    pub fn is_collable(self) -> bool {
        matches!(
            self,
            EntityKind::Constructor
                | EntityKind::FunctionProperty
                | EntityKind::Method
                | EntityKind::Getter
                | EntityKind::Setter
                | EntityKind::Function
                | EntityKind::FunctionVariable
                | EntityKind::ClassStaticBlock
        )
    }

    /// Data entities: state a behaviour can read or write.
    pub fn is_data(self) -> bool {
        matches!(
            self,
            EntityKind::Enum | EntityKind::Field | EntityKind::Variable
        )
    }

    /// Modules group other entities: files and namespaces.
    pub fn is_module(self) -> bool {
        matches!(self, EntityKind::File | EntityKind::Namespace)
    }

    /// Human-readable singular name.
    pub fn display_name(self) -> &'static str {
        match self {
            EntityKind::File => "File",
            EntityKind::Namespace => "Namespace",
            EntityKind::Class => "Class",
            EntityKind::Function => "Function",
            EntityKind::Enum => "Enum",
            EntityKind::Interface => "Interface",
            EntityKind::Variable => "Variable",
            EntityKind::Type => "Type",
            EntityKind::Method => "Method",
            EntityKind::Constructor => "Constructor",
            EntityKind::Field => "Field",
            EntityKind::Getter => "Getter",
            EntityKind::Setter => "Setter",
            EntityKind::FunctionVariable => "Function Variable",
            EntityKind::ClassStaticBlock => "Class Static Block",
            EntityKind::FunctionProperty => "Function Property",
        }
    }

    /// Plural heading used when reporting a whole group of this kind.
    pub fn group_name(self) -> &'static str {
        match self {
            EntityKind::File => "Files",
            EntityKind::Namespace => "Namespaces",
            EntityKind::Class => "Classes",
            EntityKind::Function => "Functions",
            EntityKind::Enum => "Enums",
            EntityKind::Interface => "Interfaces",
            EntityKind::Variable => "Variables",
            EntityKind::Type => "Types",
            EntityKind::Method => "Methods",
            EntityKind::Constructor => "Constructors",
            EntityKind::Field => "Class Fields",
            EntityKind::Getter => "Getters",
            EntityKind::Setter => "Setters",
            EntityKind::FunctionVariable => "Function Variables",
            EntityKind::ClassStaticBlock => "Class Static Blocks",
            EntityKind::FunctionProperty => "Class Function Properties",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

fn internal_by_default() -> bool {
    true
}

// =============================================================================
// FILE ENTITY
// =============================================================================

/// A source file. Files are the roots of the containment chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntity {
    /// Globally unique identifier
    pub id: String,

    /// File name
    pub name: String,

    /// Path of the file inside the analyzed project
    pub path: String,

    /// Whether the file belongs to the analyzed codebase
    #[serde(default = "internal_by_default")]
    pub is_internal: bool,
}

impl FileEntity {
    /// Create an internal file entity; the name is the last path segment.
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(path.as_str())
            .to_string();

        Self {
            id: id.into(),
            name,
            path,
            is_internal: true,
        }
    }
}

// =============================================================================
// CODE ENTITY
// =============================================================================

/// Any entity declared inside a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeEntity {
    /// Globally unique identifier
    pub id: String,

    /// Declared name
    pub name: String,

    /// Id of the file that declares this entity
    pub parent_file: String,

    /// Whether the entity belongs to the analyzed codebase
    #[serde(default = "internal_by_default")]
    pub is_internal: bool,
}

impl CodeEntity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        parent_file: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_file: parent_file.into(),
            is_internal: true,
        }
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntity {
    #[serde(flatten)]
    pub base: CodeEntity,

    /// Declared `abstract`
    #[serde(default)]
    pub is_abstract: bool,
}

impl ClassEntity {
    pub fn new(base: CodeEntity) -> Self {
        Self {
            base,
            is_abstract: false,
        }
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ordinals_match_all() {
        for (i, kind) in EntityKind::ALL.iter().enumerate() {
            assert_eq!(kind.ordinal(), i);
        }
    }

    #[test]
    fn test_behaviour_and_data_are_disjoint() {
        for kind in EntityKind::ALL {
            assert!(!(kind.is_collable() && kind.is_data()), "{kind:?}");
        }
        assert!(EntityKind::ClassStaticBlock.is_collable());
        assert!(!EntityKind::Class.is_collable());
        assert!(!EntityKind::Class.is_data());
    }

    #[test]
    fn test_file_name_from_path() {
        assert_eq!(FileEntity::new("f", "src/app/main.ts").name, "main.ts");
        assert_eq!(FileEntity::new("f", "main.ts").name, "main.ts");
    }

    #[test]
    fn test_class_entity_flattens_base() {
        let json = r#"{"id":"c","name":"C","parentFile":"f","isAbstract":true}"#;
        let class: ClassEntity = serde_json::from_str(json).unwrap();
        assert_eq!(class.base.parent_file, "f");
        assert!(class.base.is_internal);
        assert!(class.is_abstract);
    }
}
