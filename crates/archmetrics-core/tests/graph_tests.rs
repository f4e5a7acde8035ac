use archmetrics_core::graph::{GraphError, NodeKind};
use archmetrics_core::protocol::{ClassEntity, CodeEntity, FileEntity};
use archmetrics_core::{EntityKind, Graph, Protocol, RelationKind};

fn sample_protocol() -> Protocol {
    let mut protocol = Protocol::new();
    protocol
        .push_file(FileEntity::new("f", "src/shapes.ts"))
        .push_class(ClassEntity::new(CodeEntity::new("a", "Shape", "f")).with_abstract(true))
        .push_class(ClassEntity::new(CodeEntity::new("b", "Circle", "f")))
        .push_entity(EntityKind::Method, CodeEntity::new("m", "area", "f"))
        .push_relation("a", RelationKind::ChildrenOf, "f")
        .push_relation("b", RelationKind::ChildrenOf, "f")
        .push_relation("m", RelationKind::ChildrenOf, "b")
        .push_relation("m", RelationKind::ChildrenOf, "f")
        .push_relation("b", RelationKind::Extends, "a");
    protocol
}

#[test]
fn test_build_nodes_and_kinds() {
    let graph = Graph::build(&sample_protocol()).unwrap();

    assert_eq!(graph.len(), 4);
    assert_eq!(graph.nodes_of_kind(EntityKind::File).len(), 1);
    assert_eq!(graph.nodes_of_kind(EntityKind::Class).len(), 2);
    assert_eq!(graph.nodes_of_kind(EntityKind::Method).len(), 1);
    assert!(graph.nodes_of_kind(EntityKind::Field).is_empty());

    let a = graph.find("a").unwrap();
    assert_eq!(graph[a].name, "Shape");
    assert_eq!(graph[a].kind(), EntityKind::Class);
    assert_eq!(graph[a].is_abstract(), Some(true));
    assert!(matches!(graph[a].detail, NodeKind::Class { is_abstract: true }));

    let f = graph.find("f").unwrap();
    assert_eq!(graph[f].path(), Some("src/shapes.ts"));
    assert!(graph.parent_file(f).is_none());
    assert_eq!(graph.parent_file(a).map(|n| n.id.as_str()), Some("f"));
}

#[test]
fn test_nodes_iterate_files_first() {
    let graph = Graph::build(&sample_protocol()).unwrap();
    let kinds: Vec<_> = graph.nodes().map(|(_, node)| node.kind()).collect();
    assert_eq!(
        kinds,
        [
            EntityKind::File,
            EntityKind::Class,
            EntityKind::Class,
            EntityKind::Method
        ]
    );
}

#[test]
fn test_relations_attached_to_both_endpoints() {
    let graph = Graph::build(&sample_protocol()).unwrap();
    let a = graph.find("a").unwrap();
    let b = graph.find("b").unwrap();
    let f = graph.find("f").unwrap();

    let ids: Vec<_> = graph.relations_of(b).map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "b => ChildrenOf => f",
            "m => ChildrenOf => b",
            "b => Extends => a"
        ]
    );
    assert_eq!(graph.relations_of(a).count(), 2);
    assert_eq!(graph.relations_of(f).count(), 3);

    for (index, node) in graph.nodes() {
        for relation in graph.relations_of(index) {
            assert!(relation.touches(index), "{} on {}", relation.id, node.id);
        }
    }
}

#[test]
fn test_relation_counts() {
    let graph = Graph::build(&sample_protocol()).unwrap();
    assert_eq!(graph.relations().len(), 5);
    assert_eq!(graph.relation_count(RelationKind::ChildrenOf), 4);
    assert_eq!(graph.relation_count(RelationKind::Extends), 1);
    assert_eq!(graph.relation_count(RelationKind::UsedBy), 0);
}

#[test]
fn test_parent_container() {
    let graph = Graph::build(&sample_protocol()).unwrap();
    let m = graph.find("m").unwrap();
    let b = graph.find("b").unwrap();
    let f = graph.find("f").unwrap();

    assert_eq!(graph.parent_container(m), Some(b));
    assert_eq!(graph.parent_container(b), Some(f));
    assert_eq!(graph.parent_container(f), None);
}

#[test]
fn test_build_is_idempotent() {
    let protocol = sample_protocol();
    let first = Graph::build(&protocol).unwrap();
    let second = Graph::build(&protocol).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_relation_endpoint_is_fatal() {
    let mut protocol = sample_protocol();
    protocol.push_relation("b", RelationKind::UsedBy, "ghost");

    let err = Graph::build(&protocol).unwrap_err();
    assert_eq!(
        err,
        GraphError::UnknownRelationEndpoint {
            relation_id: "b => UsedBy => ghost".to_string(),
            entity_id: "ghost".to_string(),
        }
    );
}

#[test]
fn test_missing_parent_file_is_fatal() {
    let mut protocol = sample_protocol();
    protocol.push_entity(EntityKind::Field, CodeEntity::new("x", "radius", "nowhere"));

    let err = Graph::build(&protocol).unwrap_err();
    assert!(matches!(
        err,
        GraphError::UnknownParentFile { ref entity_id, ref file_id }
            if entity_id == "x" && file_id == "nowhere"
    ));
}

#[test]
fn test_build_from_json() {
    let json = r#"{
        "files": [{"id": "f", "name": "a.ts", "path": "src/a.ts"}],
        "classes": [{"id": "c", "name": "C", "parentFile": "f"}],
        "methods": [{"id": "m", "name": "run", "parentFile": "f", "isInternal": true}],
        "relations": [
            {"id": "r1", "from": "c", "kind": "ChildrenOf", "to": "f"},
            {"id": "r2", "from": "m", "kind": "ChildrenOf", "to": "c"}
        ]
    }"#;
    let protocol = Protocol::from_json_str(json).unwrap();
    assert_eq!(protocol.entity_count(), 3);

    let graph = Graph::build(&protocol).unwrap();
    let c = graph.find("c").unwrap();
    assert_eq!(graph[c].is_abstract(), Some(false));
    assert_eq!(graph.relations_of(c).count(), 2);
}
