//! Length-prefixed framing example.
//!
//! Encodes a few head-framed messages into one byte stream, then splits
//! them back apart with a `FrameReader` over a blocking reader.
//!
//! Run with:
//!     cargo run --example framed_stream

use std::io::Cursor;

use cursorbuf::{CursorBuffer, FrameConfig, FrameReader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut wire = CursorBuffer::new();
    let mut frame = CursorBuffer::with_head();

    for (id, name) in ["alpha", "beta", "gamma"].iter().enumerate() {
        frame.reset_with_head();
        frame.write_varint_u32(id as u32).write_string(name);
        frame.update_head()?;
        println!("encoded frame {}: head={} bytes", id, frame.head()?);
        wire.write_bytes(frame.as_bytes());
    }

    println!("\nwire: {} bytes\n", wire.len());

    let reader = FrameReader::new(Cursor::new(wire.into_vec()), FrameConfig::default());
    for frame in reader {
        let mut frame = frame?;
        let id = frame.read_varint_u32()?;
        let name = frame.read_string()?;
        println!("decoded frame {}: {}", id, name);
    }

    Ok(())
}
