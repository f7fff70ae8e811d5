use super::*;
use crate::foundation::core::Rgba8;

fn def(id: &str, tier: Tier, rank: u32) -> NodeDef {
    NodeDef {
        id: id.to_string(),
        tier,
        display_name: id.to_string(),
        position: Point::new(rank as f64, 0.0),
        radius: 0.1,
        label: LabelSpec {
            side: Side::Right,
            buff: 0.2,
            size: 10.0,
        },
        rank,
        visual: VisualState::node(Rgba8::WHITE, Rgba8::WHITE),
    }
}

fn edge_state() -> VisualState {
    VisualState::edge(Rgba8::rgb(0x55, 0x55, 0x55), 3.5)
}

fn small() -> ModelBuilder {
    ModelBuilder::new(Variant::Primary)
        .node(def("C5", Tier::Root, 0))
        .node(def("C6", Tier::Root, 1))
        .node(def("ST", Tier::Trunk, 2))
        .edge("C5", "ST", edge_state())
        .edge("C6", "ST", edge_state())
}

#[test]
fn builds_and_looks_up() {
    let m = small().build().unwrap();
    assert_eq!(m.get_node("ST").unwrap().tier(), Tier::Trunk);
    assert_eq!(m.get_edge("C5", "ST").unwrap().target(), "ST");
    assert!(matches!(m.get_node("C9"), Err(PlexusError::Lookup(_))));
    assert!(matches!(m.get_edge("ST", "C5"), Err(PlexusError::Lookup(_))));
}

#[test]
fn duplicate_node_id_is_a_configuration_error() {
    let err = small().node(def("C5", Tier::Root, 9)).build().unwrap_err();
    assert!(matches!(err, PlexusError::Configuration(_)));
}

#[test]
fn dangling_edge_is_a_configuration_error() {
    let err = small().edge("C7", "ST", edge_state()).build().unwrap_err();
    assert!(matches!(err, PlexusError::Configuration(ref m) if m.contains("C7")));
}

#[test]
fn duplicate_edge_is_a_configuration_error() {
    let err = small().edge("C5", "ST", edge_state()).build().unwrap_err();
    assert!(matches!(err, PlexusError::Configuration(_)));
}

#[test]
fn upstream_order_is_enforced() {
    let err = small().edge("ST", "C5", edge_state()).build().unwrap_err();
    assert!(matches!(err, PlexusError::Configuration(ref m) if m.contains("not downstream")));

    let same_tier = small().edge("C5", "C6", edge_state()).build();
    assert!(same_tier.is_err());
}

#[test]
fn groupings_are_validated() {
    let bad = small()
        .grouping("g", vec![ElementKey::node("C5"), ElementKey::node("nope")])
        .build();
    assert!(matches!(bad, Err(PlexusError::Configuration(_))));

    let twice = small()
        .grouping("g", vec![ElementKey::node("C5"), ElementKey::node("C5")])
        .build();
    assert!(twice.is_err());

    let dup = small()
        .grouping("g", vec![ElementKey::node("C5")])
        .grouping("g", vec![ElementKey::node("C6")])
        .build();
    assert!(dup.is_err());
}

#[test]
fn unknown_grouping_lookup() {
    let m = small().build().unwrap();
    assert!(matches!(
        m.grouping("roots"),
        Err(PlexusError::UnknownGrouping(ref n)) if n == "roots"
    ));
}

#[test]
fn nodes_in_tier_uses_rank_not_insertion() {
    let m = ModelBuilder::new(Variant::Primary)
        .node(def("B", Tier::Cord, 2))
        .node(def("A", Tier::Cord, 1))
        .node(def("C", Tier::Cord, 3))
        .build()
        .unwrap();
    let ids: Vec<&str> = m.nodes_in_tier(Tier::Cord).iter().map(|n| n.id()).collect();
    assert_eq!(ids, ["A", "B", "C"]);
}

#[test]
fn complement_excludes_listed_groupings() {
    let mut m = small()
        .grouping("hit", vec![ElementKey::node("C5"), ElementKey::edge("C5", "ST")])
        .build()
        .unwrap();
    m.define_complement("spared", &["hit"]).unwrap();
    let spared = m.grouping("spared").unwrap().members().to_vec();
    assert_eq!(
        spared,
        vec![
            ElementKey::node("C6"),
            ElementKey::node("ST"),
            ElementKey::edge("C6", "ST"),
        ]
    );
    assert!(m.define_complement("x", &["missing"]).is_err());
}

#[test]
fn apply_mutates_only_visual_state() {
    let mut m = small().build().unwrap();
    let key = ElementKey::node("C5");
    let pos = m.get_node("C5").unwrap().position();
    let (before, after) = m
        .apply(&key, &[Mutation::ScaleBy(1.2), Mutation::SetOpacity(0.5)])
        .unwrap();
    assert_eq!(before.scale, 1.0);
    assert!((after.scale - 1.2).abs() < 1e-12);
    assert_eq!(m.visual(&key).unwrap().opacity, 0.5);
    assert_eq!(m.get_node("C5").unwrap().position(), pos);

    let missing = m.apply(&ElementKey::edge("C6", "C5"), &[Mutation::HideLabel]);
    assert!(matches!(missing, Err(PlexusError::Lookup(_))));
}

#[test]
fn element_keys_display() {
    assert_eq!(ElementKey::node("LC").to_string(), "LC");
    assert_eq!(ElementKey::edge("D_ST_A", "LC").to_string(), "D_ST_A->LC");
}
