//! 权限编解码器单元测试
//!
//! 覆盖规范编码的往返一致性与全部历史格式的容错解码

use seguridad_service::models::operaciones::{Operation, OperationSet};

/// {C,R,U,D} 的全部 16 个子集
fn all_subsets() -> Vec<Vec<Operation>> {
    let mut subsets = Vec::new();
    for mask in 0u8..16 {
        let ops: Vec<Operation> = Operation::ALL
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, op)| op)
            .collect();
        subsets.push(ops);
    }
    subsets
}

#[test]
fn test_decode_of_encode_is_identity_for_every_subset() {
    for ops in all_subsets() {
        let set = OperationSet::new(&ops);
        let encoded = set.encode();
        assert_eq!(
            OperationSet::decode(&encoded),
            set,
            "round trip failed for {:?} (encoded {:?})",
            ops,
            encoded
        );
    }
}

#[test]
fn test_canonical_encoding_is_order_independent() {
    let a = OperationSet::new(&[Operation::Delete, Operation::Create]);
    let b = OperationSet::new(&[Operation::Create, Operation::Delete]);
    assert_eq!(a.encode(), b.encode());
    assert_eq!(a.encode(), "CD");
}

#[test]
fn test_legacy_raw_letter_runs() {
    assert_eq!(
        OperationSet::decode("CRUD"),
        OperationSet::new(&Operation::ALL)
    );
    assert_eq!(
        OperationSet::decode("rc"),
        OperationSet::new(&[Operation::Create, Operation::Read])
    );
}

#[test]
fn test_legacy_json_array() {
    assert_eq!(
        OperationSet::decode(r#"["C","U"]"#),
        OperationSet::new(&[Operation::Create, Operation::Update])
    );
    assert_eq!(
        OperationSet::decode(r#"["Read","Delete"]"#),
        OperationSet::new(&[Operation::Read, Operation::Delete])
    );
    assert_eq!(OperationSet::decode("[]"), OperationSet::EMPTY);
}

#[test]
fn test_legacy_sql_array_literal() {
    assert_eq!(
        OperationSet::decode("{C,R,U,D}"),
        OperationSet::new(&Operation::ALL)
    );
}

#[test]
fn test_legacy_comma_and_space_joined() {
    assert_eq!(
        OperationSet::decode("C, R"),
        OperationSet::new(&[Operation::Create, Operation::Read])
    );
    assert_eq!(
        OperationSet::decode("U D"),
        OperationSet::new(&[Operation::Update, Operation::Delete])
    );
}

#[test]
fn test_unparseable_input_is_powerless_not_an_error() {
    for texto in ["", "   ", "ninguno", "123", "[broken", "{{{{"] {
        let set = OperationSet::decode(texto);
        assert!(set.is_empty(), "expected empty set for {:?}", texto);
        for op in Operation::ALL {
            assert!(!OperationSet::authorizes(texto, op));
        }
    }
}

#[test]
fn test_authorizes_matches_membership() {
    for ops in all_subsets() {
        let set = OperationSet::new(&ops);
        let encoded = set.encode();
        for op in Operation::ALL {
            assert_eq!(OperationSet::authorizes(&encoded, op), ops.contains(&op));
        }
    }
}

#[test]
fn test_union_is_commutative_and_covers_both_sides() {
    let read = OperationSet::new(&[Operation::Read]);
    let update = OperationSet::new(&[Operation::Update]);

    assert_eq!(read.union(update), update.union(read));

    let merged = read.union(update);
    assert!(merged.contains(Operation::Read));
    assert!(merged.contains(Operation::Update));
    assert!(!merged.contains(Operation::Create));
    assert!(!merged.contains(Operation::Delete));
}
