use geolith::codec::{serialize, BlobSignature, SIGNATURE_LEN};
use geolith_int_test::test_util::{create_test_context, line_xy, run_test};

#[test]
fn test_signature_prefix_is_blob_start() {
    run_test(create_test_context, |_ctx| {
        let blob = serialize(&line_xy(&[(0.0, 0.0), (5.0, 1.0), (10.0, 10.0)]))?;
        let signature = BlobSignature::of(&blob);
        assert_eq!(&signature.prefix()[..], &blob[..SIGNATURE_LEN]);
        assert_eq!(signature.size(), blob.len());
        assert!(signature.matches(&blob));
        Ok(())
    });
}

#[test]
fn test_same_prefix_and_size_still_differ() {
    run_test(create_test_context, |_ctx| {
        // same MBR, class and vertex count: only the middle vertex differs
        let a = serialize(&line_xy(&[(0.0, 0.0), (5.0, 1.0), (10.0, 10.0)]))?;
        let b = serialize(&line_xy(&[(0.0, 0.0), (5.0, 9.0), (10.0, 10.0)]))?;
        assert_eq!(a.len(), b.len());
        assert_eq!(a[..SIGNATURE_LEN], b[..SIGNATURE_LEN]);

        let signature = BlobSignature::of(&a);
        assert!(!signature.matches(&b));
        assert_ne!(signature.crc32(), BlobSignature::of(&b).crc32());
        Ok(())
    });
}
