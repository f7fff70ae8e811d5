use super::*;
use crate::anatomy::model::ElementKey;

fn primary() -> Model {
    build_model(Variant::Primary, &Placement::overview(), &StyleConfig::default()).unwrap()
}

fn extended() -> Model {
    build_model(Variant::Extended, &Placement::overview(), &StyleConfig::default()).unwrap()
}

fn ids<'a>(nodes: impl IntoIterator<Item = &'a crate::anatomy::model::Node>) -> Vec<&'a str> {
    nodes.into_iter().map(|n| n.id()).collect()
}

#[test]
fn primary_counts() {
    let m = primary();
    assert_eq!(m.nodes_in_tier(Tier::Root).len(), 5);
    assert_eq!(m.nodes_in_tier(Tier::Trunk).len(), 3);
    assert_eq!(m.nodes_in_tier(Tier::Division).len(), 6);
    assert_eq!(m.nodes_in_tier(Tier::Cord).len(), 3);
    assert_eq!(m.nodes_in_tier(Tier::Branch).len(), 5);
    assert!(m.nodes_in_tier(Tier::NonTerminalBranch).is_empty());
    assert_eq!(m.edges().len(), 23);
}

#[test]
fn roots_in_reveal_order() {
    let m = primary();
    assert_eq!(ids(m.nodes_in_tier(Tier::Root)), ["C5", "C6", "C7", "C8", "T1"]);
}

#[test]
fn rank_column_numbers_each_tier_from_one() {
    for table in [PRIMARY_NODES, EXTENDED_NODES] {
        let mut seen: std::collections::BTreeMap<Tier, Vec<u32>> = Default::default();
        for r in table {
            seen.entry(r.tier).or_default().push(r.rank);
        }
        for (tier, mut ranks) in seen {
            ranks.sort_unstable();
            let expected: Vec<u32> = (1..=ranks.len() as u32).collect();
            assert_eq!(ranks, expected, "{tier}");
        }
    }
    let m = extended();
    assert_eq!(ids(m.nodes_in_tier(Tier::Cord)), ["LC", "PC", "MC"]);
    let branches = ids(m.nodes_in_tier(Tier::NonTerminalBranch));
    assert_eq!(branches[..2], ["DSc", "LTh"]);
}

#[test]
fn roots_feed_trunks() {
    let m = primary();
    let pairs: Vec<(&str, &str)> = m
        .edges_between(Tier::Root, Tier::Trunk)
        .iter()
        .map(|e| (e.source(), e.target()))
        .collect();
    assert_eq!(
        pairs,
        [("C5", "ST"), ("C6", "ST"), ("C7", "MT"), ("C8", "IT"), ("T1", "IT")]
    );
}

#[test]
fn every_trunk_splits_in_two() {
    let m = primary();
    for trunk in ["ST", "MT", "IT"] {
        let n = m
            .edges_between(Tier::Trunk, Tier::Division)
            .iter()
            .filter(|e| e.source() == trunk)
            .count();
        assert_eq!(n, 2, "{trunk}");
    }
}

#[test]
fn cord_formation() {
    let m = primary();
    let edges = m.edges_between(Tier::Division, Tier::Cord);
    assert_eq!(edges.len(), 6);
    let into = |cord: &str| -> Vec<&str> {
        edges
            .iter()
            .filter(|e| e.target() == cord)
            .map(|e| e.source())
            .collect()
    };
    assert_eq!(into("LC"), ["D_ST_A", "D_MT_A"]);
    assert_eq!(into("PC"), ["D_ST_P", "D_MT_P", "D_IT_P"]);
    assert_eq!(into("MC"), ["D_IT_A"]);
}

#[test]
fn terminal_branches() {
    let m = primary();
    let pairs: Vec<(&str, &str)> = m
        .edges_between(Tier::Cord, Tier::Branch)
        .iter()
        .map(|e| (e.source(), e.target()))
        .collect();
    assert_eq!(
        pairs,
        [
            ("LC", "Musc"),
            ("LC", "Med"),
            ("MC", "Med"),
            ("MC", "Uln"),
            ("PC", "Ax"),
            ("PC", "Rad"),
        ]
    );
}

#[test]
fn no_dangling_references() {
    for m in [primary(), extended()] {
        for e in m.edges() {
            assert!(m.get_node(e.source()).is_ok());
            assert!(m.get_node(e.target()).is_ok());
        }
    }
}

#[test]
fn extended_adds_eleven_non_terminal_branches() {
    let m = extended();
    let ntb = m.nodes_in_tier(Tier::NonTerminalBranch);
    assert_eq!(ntb.len(), 11);
    assert_eq!(m.grouping(groups::NON_TERMINAL).unwrap().members().len(), 11);

    let parents = |id: &str| -> Vec<&str> {
        m.edges()
            .iter()
            .filter(|e| e.target() == id)
            .map(|e| e.source())
            .collect()
    };
    assert_eq!(parents("DSc"), ["C5"]);
    assert_eq!(parents("LTh"), ["C5", "C6", "C7"]);
    assert_eq!(parents("SSc"), ["ST"]);
    assert_eq!(parents("NSc"), ["ST"]);
    assert_eq!(parents("LPec"), ["LC"]);
    for id in ["MPec", "MCA", "MCF"] {
        assert_eq!(parents(id), ["MC"]);
    }
    for id in ["USs", "Thd", "LSs"] {
        assert_eq!(parents(id), ["PC"]);
    }
}

#[test]
fn primary_positions_match_across_variants() {
    let p = primary();
    let x = extended();
    for n in p.nodes() {
        assert_eq!(n.position(), x.get_node(n.id()).unwrap().position(), "{}", n.id());
    }
}

#[test]
fn placement_is_applied() {
    let m = primary();
    // Raw bounds are x in [-6, 2.8], y in [-1.6, 3.5]; center (-1.6, 0.95).
    let c5 = m.get_node("C5").unwrap().position();
    assert!((c5.x - ((-6.0 + 1.6) * 0.8 + 0.8)).abs() < 1e-9);
    assert!((c5.y - ((3.5 - 0.95) * 0.8 - 0.1)).abs() < 1e-9);
    let radius = m.get_node("D_ST_A").unwrap().radius();
    assert!((radius - 0.07 * 0.8).abs() < 1e-12);
}

#[test]
fn plexus_grouping_covers_the_primary_topology() {
    let m = extended();
    let members = m.grouping(groups::PLEXUS).unwrap().members();
    assert_eq!(members.len(), 22 + 23);
    assert!(!members.contains(&ElementKey::node("DSc")));
}

#[test]
fn extended_groupings_absent_from_primary() {
    let m = primary();
    assert!(matches!(
        m.grouping(groups::NTB_ROOTS),
        Err(crate::foundation::error::PlexusError::UnknownGrouping(_))
    ));
}

#[test]
fn edges_start_neutral() {
    let m = primary();
    let style = StyleConfig::default();
    for e in m.edges() {
        assert_eq!(e.visual().color, style.palette.neutral_edge);
        assert_eq!(e.visual().stroke_width, 3.5);
    }
    assert!(m.nodes().iter().all(|n| !n.visual().label_visible));
}
