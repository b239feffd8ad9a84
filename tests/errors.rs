//! Rejection paths: every malformed input is a hard error with no image.

use enough::{Stop, StopReason, Unstoppable};
use zenbmp::*;

fn bgr_file(width: i32, height: i32) -> Vec<u8> {
    encode_bmp(&Bitmap::new(width, height, false).unwrap(), Unstoppable).unwrap()
}

fn bgra_file(width: i32, height: i32) -> Vec<u8> {
    encode_bmp(&Bitmap::new(width, height, true).unwrap(), Unstoppable).unwrap()
}

#[test]
fn wrong_magic_is_format_error() {
    for magic in [*b"MB", *b"PN", [0, 0], *b"BA"] {
        let mut data = bgr_file(2, 2);
        data[0..2].copy_from_slice(&magic);
        let err = decode_bmp(&data, Unstoppable).unwrap_err();
        assert!(
            matches!(err, BmpError::Format(FormatError::BadMagic { .. })),
            "{err}"
        );
        assert!(probe_bmp(&data).is_err());
    }
}

#[test]
fn unsupported_bit_depths() {
    for depth in [0u16, 1, 4, 8, 16, 48, 64] {
        let mut data = bgr_file(2, 2);
        data[28..30].copy_from_slice(&depth.to_le_bytes());
        let err = decode_bmp(&data, Unstoppable).unwrap_err();
        assert!(matches!(err, BmpError::UnsupportedFormat(_)), "depth {depth}: {err}");
    }
}

#[test]
fn compressed_variants_are_unsupported() {
    for compression in [1u32, 2, 4, 5, 6] {
        let mut data = bgr_file(2, 2);
        data[30..34].copy_from_slice(&compression.to_le_bytes());
        let err = decode_bmp(&data, Unstoppable).unwrap_err();
        assert!(matches!(err, BmpError::UnsupportedFormat(_)));
    }
}

#[test]
fn rgba_masks_are_rejected() {
    let mut data = bgra_file(2, 2);
    // swap red and blue masks
    data[54..58].copy_from_slice(&0x0000_00FFu32.to_le_bytes());
    data[62..66].copy_from_slice(&0x00FF_0000u32.to_le_bytes());
    let err = decode_bmp(&data, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BmpError::Format(FormatError::ColorMaskMismatch {
            red: 0x0000_00FF,
            blue: 0x00FF_0000,
            ..
        })
    ));
    assert!(err.to_string().contains("mask"));
}

#[test]
fn missing_alpha_mask_is_rejected() {
    let mut data = bgra_file(1, 1);
    data[66..70].copy_from_slice(&0u32.to_le_bytes());
    let err = decode_bmp(&data, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BmpError::Format(FormatError::ColorMaskMismatch { alpha: 0, .. })
    ));
}

#[test]
fn non_srgb_color_space_is_rejected() {
    let mut data = bgra_file(2, 2);
    // LCS_WINDOWS_COLOR_SPACE
    data[70..74].copy_from_slice(&0x5769_6E20u32.to_le_bytes());
    let err = decode_bmp(&data, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BmpError::Format(FormatError::ColorSpaceMismatch { found: 0x5769_6E20 })
    ));
}

#[test]
fn bitmask_info_missing_for_32_bit() {
    for info_size in [40u32, 56, 108] {
        let mut data = bgra_file(2, 2);
        data[14..18].copy_from_slice(&info_size.to_le_bytes());
        let err = decode_bmp(&data, Unstoppable).unwrap_err();
        assert!(matches!(
            err,
            BmpError::Format(FormatError::MissingBitMasks { info_size: s }) if s == info_size
        ));
    }
}

#[test]
fn bad_planes_and_dimensions() {
    let mut data = bgr_file(2, 2);
    data[26..28].copy_from_slice(&2u16.to_le_bytes());
    assert!(matches!(
        decode_bmp(&data, Unstoppable).unwrap_err(),
        BmpError::Format(FormatError::BadPlanes(2))
    ));

    let mut data = bgr_file(2, 2);
    data[18..22].copy_from_slice(&(-2i32).to_le_bytes());
    assert!(matches!(
        decode_bmp(&data, Unstoppable).unwrap_err(),
        BmpError::Format(FormatError::BadDimensions { width: -2, .. })
    ));

    let mut data = bgr_file(2, 2);
    data[22..26].copy_from_slice(&0i32.to_le_bytes());
    assert!(matches!(
        decode_bmp(&data, Unstoppable).unwrap_err(),
        BmpError::Format(FormatError::BadDimensions { height: 0, .. })
    ));
}

#[test]
fn truncated_input_is_io_error() {
    let data = bgr_file(3, 3);
    for len in [0, 1, 13, 30, 54, data.len() - 1] {
        match decode_bmp(&data[..len], Unstoppable) {
            Err(BmpError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("len {len}: expected Io error, got {other:?}"),
        }
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Bitmap::open(dir.path().join("nope.bmp")).unwrap_err();
    assert!(matches!(err, BmpError::Io(_)));
}

#[test]
fn unwritable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let bmp = Bitmap::new(1, 1, false).unwrap();
    let err = bmp.save(dir.path().join("missing").join("out.bmp")).unwrap_err();
    assert!(matches!(err, BmpError::Io(_)));
}

#[test]
fn new_rejects_non_positive_dimensions() {
    for (w, h) in [(0, 10), (10, -1), (0, 0), (-5, 5), (10, 0)] {
        let err = Bitmap::new(w, h, true).unwrap_err();
        assert!(matches!(err, BmpError::InvalidArgument(_)), "{w}x{h}");
    }
}

#[test]
fn new_rejects_images_too_large_for_bmp() {
    for alpha in [false, true] {
        let err = Bitmap::new(i32::MAX, i32::MAX, alpha).unwrap_err();
        assert!(matches!(err, BmpError::DimensionsTooLarge { .. }), "{err}");
    }
    // 65536 rows of 65536 bytes leave no room for the headers
    let err = Bitmap::new(1 << 14, 1 << 16, true).unwrap_err();
    assert!(matches!(err, BmpError::DimensionsTooLarge { .. }));
}

#[test]
fn oversized_header_dimensions_are_rejected() {
    for (w, h) in [(i32::MAX, i32::MAX), (i32::MAX, -i32::MAX), (1, i32::MAX)] {
        let mut data = bgr_file(1, 1);
        data[18..22].copy_from_slice(&w.to_le_bytes());
        data[22..26].copy_from_slice(&h.to_le_bytes());
        let err = decode_bmp(&data, Unstoppable).unwrap_err();
        assert!(
            matches!(err, BmpError::DimensionsTooLarge { .. }),
            "{w}x{h}: {err}"
        );
    }

    let mut data = bgra_file(1, 1);
    data[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
    let err = decode_bmp(&data, Unstoppable).unwrap_err();
    assert!(matches!(err, BmpError::DimensionsTooLarge { .. }));
}

#[test]
fn short_stream_fails_before_allocating() {
    // 30000x30000 BGR fits a BMP (about 2.7 GB) but the stream holds 4 bytes.
    let mut data = bgr_file(1, 1);
    data[18..22].copy_from_slice(&30_000i32.to_le_bytes());
    data[22..26].copy_from_slice(&30_000i32.to_le_bytes());
    match decode_bmp(&data, Unstoppable) {
        Err(BmpError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn fill_out_of_bounds_leaves_buffer_untouched() {
    for alpha in [false, true] {
        let mut bmp = Bitmap::new(10, 8, alpha).unwrap();
        bmp.fill_region(Region::new(1, 1, 3, 3), Bgra::new(5, 6, 7, 8))
            .unwrap();
        let before = bmp.clone();

        for region in [
            Region::new(8, 0, 3, 1),
            Region::new(0, 6, 1, 3),
            Region::new(0, 0, 11, 8),
            Region::new(0, 0, 10, 9),
            Region::new(0, u32::MAX, 1, 1),
        ] {
            let err = bmp
                .fill_region(region, Bgra::opaque(255, 255, 255))
                .unwrap_err();
            assert!(matches!(err, BmpError::Bounds { .. }), "{region:?}");
            assert_eq!(bmp, before);
        }
    }
}

#[test]
fn fill_at_exact_edge_is_allowed() {
    let mut bmp = Bitmap::new(10, 8, false).unwrap();
    bmp.fill_region(Region::new(7, 5, 3, 3), Bgra::opaque(1, 2, 3))
        .unwrap();
    assert_eq!(bmp.pixel(9, 7), Some(&[1, 2, 3][..]));
}

#[test]
fn limits_reject_before_decoding() {
    let data = bgr_file(16, 16);

    let limits = Limits::none().with_max_pixels(255);
    let err = DecodeRequest::new()
        .with_limits(&limits)
        .decode_bytes(&data, Unstoppable)
        .unwrap_err();
    assert!(matches!(err, BmpError::LimitExceeded(_)));

    let limits = Limits::none().with_max_memory(16 * 16 * 3 - 1);
    let err = DecodeRequest::new()
        .with_limits(&limits)
        .decode_bytes(&data, Unstoppable)
        .unwrap_err();
    assert!(matches!(err, BmpError::LimitExceeded(_)));

    let limits = Limits {
        max_width: Some(16),
        max_height: Some(16),
        ..Limits::default()
    };
    assert!(DecodeRequest::new()
        .with_limits(&limits)
        .decode_bytes(&data, Unstoppable)
        .is_ok());
}

struct AlwaysStop;

impl Stop for AlwaysStop {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

#[test]
fn stop_token_cancels() {
    let data = bgr_file(5, 5);
    let err = decode_bmp(&data, AlwaysStop).unwrap_err();
    assert!(matches!(err, BmpError::Cancelled(_)));

    let bmp = Bitmap::new(5, 5, false).unwrap();
    let err = encode_bmp(&bmp, AlwaysStop).unwrap_err();
    assert!(matches!(err, BmpError::Cancelled(_)));
}
