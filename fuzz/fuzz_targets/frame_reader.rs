#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use cursorbuf::{ByteOrder, FrameConfig, FrameDecoder, FrameReader, HEAD_LEN};

fuzz_target!(|data: Vec<u8>| {
    let configs = vec![
        // Tiny frames
        FrameConfig::new(ByteOrder::BigEndian, 16).unwrap(),
        // Little-endian heads
        FrameConfig::new(ByteOrder::LittleEndian, 4096).unwrap(),
        // Default config
        FrameConfig::default(),
    ];

    for config in configs {
        // Verify: no frame exceeds the configured limit, and bytes add up
        let mut consumed = 0usize;
        for frame in FrameReader::new(Cursor::new(data.clone()), config) {
            match frame {
                Ok(frame) => {
                    assert!(frame.len() <= config.max_frame_len());
                    consumed += HEAD_LEN + frame.len();
                }
                Err(_) => break,
            }
        }
        assert!(consumed <= data.len());

        // Verify: byte-at-a-time feeding yields the same frames
        let mut whole = FrameDecoder::new(config);
        whole.extend(&data);
        let mut split = FrameDecoder::new(config);
        let mut split_frames = Vec::new();
        for byte in &data {
            split.extend(std::slice::from_ref(byte));
            while let Ok(Some(frame)) = split.decode() {
                split_frames.push(frame.into_vec());
            }
        }
        let mut whole_frames = Vec::new();
        while let Ok(Some(frame)) = whole.decode() {
            whole_frames.push(frame.into_vec());
        }
        assert_eq!(whole_frames, split_frames);
    }
});
