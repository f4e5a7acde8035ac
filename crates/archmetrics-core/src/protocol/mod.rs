//! Entity/relation protocol: the data contract between the extraction
//! front-end and the graph builder.
//!
//! A [`Protocol`] carries one typed collection per [`EntityKind`] plus a flat
//! list of [`Relation`]s. Entities reference each other by id only; the graph
//! builder resolves and validates those references.
//!
//! ## Containment
//!
//! Extractors emit a CHILDREN_OF relation from an entity to *every* enclosing
//! container (method → class → namespace → file), not only to the immediate
//! parent. The protocol keeps these relations as they are.

mod entity;
mod error;
mod relation;

pub use entity::{ClassEntity, CodeEntity, EntityKind, FileEntity};
pub use error::ProtocolError;
pub use relation::{Relation, RelationKind};

use serde::{Deserialize, Serialize};

/// Extracted entities and the relations between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Protocol {
    pub files: Vec<FileEntity>,
    pub namespaces: Vec<CodeEntity>,
    pub classes: Vec<ClassEntity>,
    pub functions: Vec<CodeEntity>,
    pub enums: Vec<CodeEntity>,
    pub interfaces: Vec<CodeEntity>,
    pub variables: Vec<CodeEntity>,
    pub types: Vec<CodeEntity>,
    pub methods: Vec<CodeEntity>,
    pub constructors: Vec<CodeEntity>,
    pub fields: Vec<CodeEntity>,
    pub getters: Vec<CodeEntity>,
    pub setters: Vec<CodeEntity>,
    pub function_variables: Vec<CodeEntity>,
    pub class_static_blocks: Vec<CodeEntity>,
    pub function_properties: Vec<CodeEntity>,
    pub relations: Vec<Relation>,
}

impl Protocol {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a protocol from JSON.
    pub fn from_json_str(content: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Decode a protocol from YAML.
    pub fn from_yaml_str(content: &str) -> Result<Self, ProtocolError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Entities of a plain code kind.
    ///
    /// Returns `None` for [`EntityKind::File`] and [`EntityKind::Class`], which
    /// carry extra fields and live in their own typed collections.
    pub fn code_entities(&self, kind: EntityKind) -> Option<&[CodeEntity]> {
        let entities = match kind {
            EntityKind::File | EntityKind::Class => return None,
            EntityKind::Namespace => &self.namespaces,
            EntityKind::Function => &self.functions,
            EntityKind::Enum => &self.enums,
            EntityKind::Interface => &self.interfaces,
            EntityKind::Variable => &self.variables,
            EntityKind::Type => &self.types,
            EntityKind::Method => &self.methods,
            EntityKind::Constructor => &self.constructors,
            EntityKind::Field => &self.fields,
            EntityKind::Getter => &self.getters,
            EntityKind::Setter => &self.setters,
            EntityKind::FunctionVariable => &self.function_variables,
            EntityKind::ClassStaticBlock => &self.class_static_blocks,
            EntityKind::FunctionProperty => &self.function_properties,
        };
        Some(entities)
    }

    fn code_entities_mut(&mut self, kind: EntityKind) -> Option<&mut Vec<CodeEntity>> {
        let entities = match kind {
            EntityKind::File | EntityKind::Class => return None,
            EntityKind::Namespace => &mut self.namespaces,
            EntityKind::Function => &mut self.functions,
            EntityKind::Enum => &mut self.enums,
            EntityKind::Interface => &mut self.interfaces,
            EntityKind::Variable => &mut self.variables,
            EntityKind::Type => &mut self.types,
            EntityKind::Method => &mut self.methods,
            EntityKind::Constructor => &mut self.constructors,
            EntityKind::Field => &mut self.fields,
            EntityKind::Getter => &mut self.getters,
            EntityKind::Setter => &mut self.setters,
            EntityKind::FunctionVariable => &mut self.function_variables,
            EntityKind::ClassStaticBlock => &mut self.class_static_blocks,
            EntityKind::FunctionProperty => &mut self.function_properties,
        };
        Some(entities)
    }

    /// Number of entities of the given kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::File => self.files.len(),
            EntityKind::Class => self.classes.len(),
            other => self.code_entities(other).map_or(0, <[CodeEntity]>::len),
        }
    }

    /// Total number of entities across all collections.
    pub fn entity_count(&self) -> usize {
        EntityKind::ALL.iter().map(|kind| self.count(*kind)).sum()
    }

    pub fn push_file(&mut self, file: FileEntity) -> &mut Self {
        self.files.push(file);
        self
    }

    pub fn push_class(&mut self, class: ClassEntity) -> &mut Self {
        self.classes.push(class);
        self
    }

    /// Append an entity to the collection of `kind`.
    ///
    /// Files use the entity name as their path and ignore `parent_file`;
    /// classes are pushed as non-abstract.
    pub fn push_entity(&mut self, kind: EntityKind, entity: CodeEntity) -> &mut Self {
        match kind {
            EntityKind::File => {
                self.files.push(FileEntity {
                    id: entity.id,
                    path: entity.name.clone(),
                    name: entity.name,
                    is_internal: entity.is_internal,
                });
            }
            EntityKind::Class => self.classes.push(ClassEntity::new(entity)),
            other => {
                if let Some(entities) = self.code_entities_mut(other) {
                    entities.push(entity);
                }
            }
        }
        self
    }

    /// Append a relation with a derived id.
    pub fn push_relation(
        &mut self,
        from: impl Into<String>,
        kind: RelationKind,
        to: impl Into<String>,
    ) -> &mut Self {
        self.relations.push(Relation::new(from, kind, to));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_entity_routes_by_kind() {
        let mut protocol = Protocol::new();
        protocol
            .push_file(FileEntity::new("f", "src/a.ts"))
            .push_entity(EntityKind::Class, CodeEntity::new("c", "C", "f"))
            .push_entity(EntityKind::Method, CodeEntity::new("m", "run", "f"))
            .push_entity(EntityKind::FunctionVariable, CodeEntity::new("v", "cb", "f"));

        assert_eq!(protocol.count(EntityKind::File), 1);
        assert_eq!(protocol.count(EntityKind::Class), 1);
        assert_eq!(protocol.methods.len(), 1);
        assert_eq!(protocol.function_variables.len(), 1);
        assert_eq!(protocol.entity_count(), 4);
    }

    #[test]
    fn test_decode_camel_case_json() {
        let json = r#"{
            "files": [{"id": "f", "name": "a.ts", "path": "src/a.ts"}],
            "functionVariables": [{"id": "v", "name": "cb", "parentFile": "f", "isInternal": false}],
            "relations": [{"id": "r", "from": "v", "kind": "ChildrenOf", "to": "f"}]
        }"#;
        let protocol = Protocol::from_json_str(json).unwrap();
        assert_eq!(protocol.files[0].path, "src/a.ts");
        assert!(!protocol.function_variables[0].is_internal);
        assert_eq!(protocol.relations[0].kind, RelationKind::ChildrenOf);
        assert!(protocol.classes.is_empty());
    }

    #[test]
    fn test_decode_yaml() {
        let yaml = r#"
files:
  - id: f
    name: a.ts
    path: src/a.ts
classes:
  - id: c
    name: C
    parentFile: f
    isAbstract: true
relations:
  - id: c => ChildrenOf => f
    from: c
    kind: ChildrenOf
    to: f
"#;
        let protocol = Protocol::from_yaml_str(yaml).unwrap();
        assert!(protocol.classes[0].is_abstract);
        assert_eq!(protocol.relations.len(), 1);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Protocol::from_json_str("{"),
            Err(ProtocolError::Json(_))
        ));
    }
}
