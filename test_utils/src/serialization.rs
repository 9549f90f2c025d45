/// Checks that `$obj` survives serialization of its byte tree, parsing, and reading back with
/// `$read`, and that the byte tree survives a JSON round trip.
#[macro_export]
macro_rules! test_serialization {
    ($obj: expr, $read: expr) => {
        let tree = $obj.to_byte_tree();
        let bytes = tree.to_bytes();
        assert_eq!(bytes.len(), tree.size());
        println!("Serialized byte size: {}", bytes.len());
        let parsed = $crate::ByteTree::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, tree);
        let deserz = $read(&parsed).unwrap();
        assert_eq!(deserz, $obj);

        // Test JSON serialization
        let ser = $crate::serde_json::to_string(&tree).unwrap();
        let deser = $crate::serde_json::from_str::<$crate::ByteTree>(&ser).unwrap();
        assert_eq!(deser, tree);
    };
}
