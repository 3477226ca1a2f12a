//! Partitioned engine behavior: chunk ordering, merge strategies, and the
//! loss of instantiations that straddle a chunk boundary.

use std::collections::BTreeSet;

use netscan_conformance::{inverter_chain, EntitySets, Fixture};
use netscan_extract::partition::chunk_ranges;
use netscan_extract::MergeStrategy;

const STRATEGIES: [MergeStrategy; 2] = [MergeStrategy::Batched, MergeStrategy::Locked];

#[test]
fn one_two_and_four_chunks_agree_as_sets() {
    let fixture = Fixture::new(&inverter_chain(37));
    let reference = EntitySets::of(&fixture.sequential().unwrap());
    for merge in STRATEGIES {
        for threads in [1, 2, 4] {
            let netlist = fixture.partitioned(threads, merge).unwrap();
            assert_eq!(EntitySets::of(&netlist), reference, "{threads} threads, {merge:?}");
        }
    }
}

#[test]
fn chunk_order_follows_source_order() {
    let fixture = Fixture::new(&inverter_chain(20));
    let sequential = fixture.sequential().unwrap();
    for merge in STRATEGIES {
        for threads in [2, 3, 4, 7] {
            let netlist = fixture.partitioned(threads, merge).unwrap();
            assert_eq!(netlist.ports(), sequential.ports());
            assert_eq!(netlist.nets(), sequential.nets());
            assert_eq!(netlist.cells(), sequential.cells());
        }
    }
}

#[test]
fn merge_strategies_agree_on_map_contents() {
    // Every cell is instantiated twice so several chunks bind pins on the same cell.
    let mut src = inverter_chain(24);
    for i in 0..24 {
        src.push_str(&format!("INV g{i} (.A(n{i}), .Z(x{i}));\n"));
    }
    let fixture = Fixture::new(&src);
    let sequential = fixture.sequential().unwrap();

    let batched = fixture.partitioned(4, MergeStrategy::Batched).unwrap();
    assert_eq!(batched, sequential);

    let locked = fixture.partitioned(4, MergeStrategy::Locked).unwrap();
    assert_eq!(locked.net_by_pin(), sequential.net_by_pin());
    for cell in sequential.cells() {
        let pins: BTreeSet<String> = locked.pins(&cell).into_iter().collect();
        let expected: BTreeSet<String> = sequential.pins(&cell).into_iter().collect();
        assert_eq!(pins, expected, "{cell}");
        assert_eq!(locked.pins(&cell).len(), sequential.pins(&cell).len());
    }
}

#[test]
fn instantiation_straddling_chunks_is_lost() {
    // 8 lines, 2 workers: chunk 0 is lines 1-4 and ends on the opening line of `r0`.
    let src = "\
module top (d, q);
wire n1;
INV u0 (.A(d), .Y(n1));
DFF r0 (
  .D(n1),
  .Q(q)
);
endmodule
";
    assert_eq!(chunk_ranges(8, 2), vec![0..4, 4..8]);
    let fixture = Fixture::new(src);

    let sequential = fixture.sequential().unwrap();
    assert_eq!(sequential.cells(), vec!["u0", "r0"]);
    assert_eq!(sequential.net_for_pin("r0", "Q"), "q");

    for merge in STRATEGIES {
        let netlist = fixture.partitioned(2, merge).unwrap();
        assert_eq!(netlist.ports(), vec!["d", "q"]);
        assert_eq!(netlist.cells(), vec!["u0"], "{merge:?}");
        assert!(netlist.pins("r0").is_empty());
        assert_eq!(netlist.net_for_pin("r0", "Q"), "");
        assert_eq!(netlist.net_for_pin("u0", "Y"), "n1");
    }

    // Four workers split it differently, but `r0` still straddles a boundary.
    let netlist = fixture.partitioned(4, MergeStrategy::Batched).unwrap();
    assert!(!netlist.cell_slice().contains(&"r0".to_string()));
}

#[test]
fn instantiation_inside_one_chunk_survives() {
    let src = "DFF r0 (\n.D(d),\n.Q(q)\n);\nwire a;\nwire b;\nwire c;\nwire e;\n";
    let netlist = Fixture::new(src).partitioned(2, MergeStrategy::Batched).unwrap();
    assert_eq!(netlist.cells(), vec!["r0"]);
    assert_eq!(netlist.nets(), vec!["a", "b", "c", "e"]);
}

#[test]
fn remainder_goes_to_last_chunk() {
    assert_eq!(chunk_ranges(11, 4), vec![0..2, 2..4, 4..6, 6..11]);
    let fixture = Fixture::new(&inverter_chain(4));
    // 10 lines over 4 workers: the last worker scans 4 of them.
    let netlist = fixture.partitioned(4, MergeStrategy::Locked).unwrap();
    assert_eq!(netlist.cells(), vec!["g0", "g1", "g2", "g3"]);
}

#[test]
fn more_workers_than_lines() {
    let netlist = Fixture::new("wire only;\n")
        .partitioned(16, MergeStrategy::Batched)
        .unwrap();
    assert_eq!(netlist.nets(), vec!["only"]);
}
