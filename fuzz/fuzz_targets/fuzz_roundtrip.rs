#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode to a canonical file that decodes
    // to the same image and encodes to the same bytes.
    let Ok(decoded) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    let reencoded = encode_bmp(&decoded, enough::Unstoppable).expect("encode of decoded image");
    let Ok(decoded2) = decode_bmp(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded, decoded2, "roundtrip mismatch");

    let rows = decoded.rows() as usize;
    let top_down = if decoded.has_alpha() {
        decoded.to_imgvec::<rgb::alt::BGRA8>().map(|img| img.height())
    } else {
        decoded.to_imgvec::<rgb::alt::BGR8>().map(|img| img.height())
    };
    assert_eq!(top_down.ok(), Some(rows), "typed view disagrees with layout");
    assert_eq!(
        encode_bmp(&decoded2, enough::Unstoppable).unwrap(),
        reencoded,
        "encoding is not stable"
    );
});
