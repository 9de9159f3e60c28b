//! Typed encode/decode example.
//!
//! Writes a small record in both byte orders and reads it back.
//!
//! Run with:
//!     cargo run --example roundtrip

use cursorbuf::{BufferPool, ByteOrder, CursorBuffer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
        let mut buf = CursorBuffer::new();
        buf.set_byte_order(order)
            .write_u32(0xCAFE_F00D)
            .write_varint_i64(-42)
            .write_bool(true)
            .write_f64(std::f64::consts::PI)
            .write_string("hello, cursor");

        println!("{:?}: {} bytes", order, buf.len());
        println!("  wire: {:02x?}", &buf.as_bytes()[..4]);

        buf.set_position(0);
        println!("  u32    = {:#x}", buf.read_u32()?);
        println!("  varint = {}", buf.read_varint_i64()?);
        println!("  bool   = {}", buf.read_bool()?);
        println!("  f64    = {}", buf.read_f64()?);
        println!("  string = {:?}", buf.read_str()?);
    }

    // Pooled buffers keep their capacity between uses
    let pool = BufferPool::new();
    for round in 0..3 {
        let mut buf = pool.lease();
        buf.write_bytes(&[round; 1024]);
        println!("round {}: len={} capacity={}", round, buf.len(), buf.capacity());
    }

    let stats = pool.stats();
    println!(
        "\npool: created={} reused={} idle={}",
        stats.created, stats.reused, stats.idle
    );

    Ok(())
}
