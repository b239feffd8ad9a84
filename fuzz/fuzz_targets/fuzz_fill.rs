#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    let [w, h, alpha, rest @ ..] = data else {
        return;
    };
    let Ok(mut bmp) = Bitmap::new(i32::from(*w), i32::from(*h), alpha & 1 == 1) else {
        return;
    };

    // Each 8-byte chunk is one fill: x, y, width, height, then BGRA.
    for op in rest.chunks_exact(8) {
        let region = Region::new(
            u32::from(op[0]),
            u32::from(op[1]),
            u32::from(op[2]),
            u32::from(op[3]),
        );
        let color = Bgra::new(op[4], op[5], op[6], op[7]);
        let before = bmp.clone();
        match bmp.fill_region(region, color) {
            Ok(()) => {}
            Err(BmpError::Bounds { .. }) => assert_eq!(bmp, before, "failed fill wrote pixels"),
            Err(e) => panic!("unexpected fill error: {e}"),
        }
    }

    let encoded = encode_bmp(&bmp, enough::Unstoppable).expect("encode of filled image");
    let decoded = decode_bmp(&encoded, enough::Unstoppable).expect("decode of filled image");
    assert_eq!(decoded, bmp, "fill did not survive a roundtrip");
});
