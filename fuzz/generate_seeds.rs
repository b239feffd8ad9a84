#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: i32, height: i32, bpp: u16, compression: u32, pixel_bytes: usize) -> Vec<u8> {
    let info_size: u32 = if bpp == 32 { 124 } else { 40 };
    let offset = 14 + info_size;
    let mut out = vec![0u8; offset as usize];
    out[0] = b'B';
    out[1] = b'M';
    out[2..6].copy_from_slice(&(offset + pixel_bytes as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&info_size.to_le_bytes());
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bpp.to_le_bytes());
    out[30..34].copy_from_slice(&compression.to_le_bytes());
    if bpp == 32 {
        out[54..58].copy_from_slice(&0x00FF_0000u32.to_le_bytes());
        out[58..62].copy_from_slice(&0x0000_FF00u32.to_le_bytes());
        out[62..66].copy_from_slice(&0x0000_00FFu32.to_le_bytes());
        out[66..70].copy_from_slice(&0xFF00_0000u32.to_le_bytes());
        out[70..74].copy_from_slice(&0x7352_4742u32.to_le_bytes());
    }
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 24-bit: 3 pixel bytes + 1 padding
    let mut bmp = header(1, 1, 24, 0, 4);
    bmp.extend_from_slice(&[0xff, 0x00, 0x00, 0x00]);
    fs::write(format!("{dir}/bgr_1x1.bmp"), bmp).unwrap();

    // 3x2 24-bit top-down
    let mut bmp = header(3, -2, 24, 0, 24);
    bmp.extend((0..24u8).map(|i| i * 10));
    fs::write(format!("{dir}/bgr_3x2_topdown.bmp"), bmp).unwrap();

    // 2x2 32-bit bitfields
    let mut bmp = header(2, 2, 32, 3, 16);
    bmp.extend_from_slice(&[0, 0, 255, 255, 0, 255, 0, 128, 255, 0, 0, 64, 9, 9, 9, 0]);
    fs::write(format!("{dir}/bgra_2x2.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/magic_only.bmp"), b"BM").unwrap();
    let mut bmp = header(4, 4, 16, 0, 32);
    bmp.extend_from_slice(&[0u8; 32]);
    fs::write(format!("{dir}/bgr555_4x4.bmp"), bmp).unwrap();

    println!("Seeds written to {dir}");
}
