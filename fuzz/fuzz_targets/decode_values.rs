#![no_main]

use libfuzzer_sys::fuzz_target;
use cursorbuf::{ByteOrder, CursorBuffer};

fuzz_target!(|data: Vec<u8>| {
    for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
        let mut buf = CursorBuffer::from_vec(data.clone());
        buf.set_byte_order(order);

        // Drive every decoder with the input bytes as a selector stream
        let mut step = 0usize;
        while buf.available() > 0 {
            let before = buf.position();
            let ok = match step % 9 {
                0 => buf.read_u8().is_ok(),
                1 => buf.read_i16().is_ok(),
                2 => buf.read_u32().is_ok(),
                3 => buf.read_f64().is_ok(),
                4 => buf.read_bool().is_ok(),
                5 => buf.read_varint_u64().is_ok(),
                6 => buf.read_varint_i32().is_ok(),
                7 => buf.read_string().is_ok(),
                _ => buf.read_blob().is_ok(),
            };
            step += 1;

            // Verify: failures never move the cursor, successes always do
            if ok {
                assert!(buf.position() > before);
            } else {
                assert_eq!(buf.position(), before);
                // Skip one byte so the loop makes progress
                let _ = buf.skip(1);
            }
            assert!(buf.position() <= buf.len());
        }
    }

    // Verify: compaction keeps the unread tail intact
    let mut buf = CursorBuffer::from_vec(data.clone());
    let cut = data.len() / 2;
    buf.delete_before(cut);
    assert_eq!(buf.as_bytes(), &data[cut..]);
});
