//! Async framing example.
//!
//! Reads head-framed messages from any `futures-io` reader as a stream.
//!
//! Run with:
//!     cargo run --example async_frames --features async-io

use futures_util::StreamExt;

use cursorbuf::{CursorBuffer, FrameConfig, frames_async};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut wire = CursorBuffer::new();
    for i in 0..5u64 {
        let mut frame = CursorBuffer::with_head();
        frame.write_u64(i * i).write_blob(&vec![i as u8; i as usize]);
        frame.update_head()?;
        wire.write_bytes(frame.as_bytes());
    }
    let wire = wire.into_vec();

    println!("Async framing {} bytes...\n", wire.len());

    let mut stream = frames_async(&wire[..], FrameConfig::default());
    let mut total = 0;
    while let Some(frame) = stream.next().await {
        let mut frame = frame?;
        let square = frame.read_u64()?;
        let blob = frame.read_blob()?;
        println!("frame {}: square={} blob={} bytes", total, square, blob.len());
        total += 1;
    }

    println!("\nTotal: {} frames", total);
    Ok(())
}
