//! Minimal round trip — snapshot a machine, push it into a replica world.
//!
//! Run with:
//!   cargo run --example machine-status

use tilesync::push::{decode_update, dispatch, encode_update};
use tilesync::wire::CodecRegistry;
use tilesync::world::{
    BlockEntity, BlockPos, DimensionId, MemoryWorld, SyncSink, SyncSource, Value, World,
};

/// A machine that reports energy level, a label, and a running flag.
#[derive(Default)]
struct Machine {
    energy: i32,
    label: String,
    running: bool,
}

impl SyncSource for Machine {
    fn produce_sync_values(&self) -> Vec<Value> {
        vec![
            Value::Int(self.energy),
            Value::Str(self.label.clone()),
            Value::Bool(self.running),
        ]
    }
}

impl SyncSink for Machine {
    fn apply_sync_values(&mut self, values: Vec<Value>) {
        let mut values = values.into_iter();
        if let Some(Value::Int(energy)) = values.next() {
            self.energy = energy;
        }
        if let Some(Value::Str(label)) = values.next() {
            self.label = label;
        }
        if let Some(Value::Bool(running)) = values.next() {
            self.running = running;
        }
    }
}

impl BlockEntity for Machine {
    fn as_sync_source(&self) -> Option<&dyn SyncSource> {
        Some(self)
    }

    fn as_sync_sink(&mut self) -> Option<&mut dyn SyncSink> {
        Some(self)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::level_filters::LevelFilter::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .try_init();

    let registry = CodecRegistry::standard();
    let pos = BlockPos::new(12, 64, -7);

    // Authoritative side.
    let mut server = MemoryWorld::new(DimensionId(0));
    server.insert(
        pos,
        Machine {
            energy: 5000,
            label: "smelter".into(),
            running: true,
        },
    );

    let bytes = encode_update(&server, pos, registry)?;
    eprintln!("Encoded update: {} bytes", bytes.len());

    // Replica side (bytes would normally cross a transport here).
    let mut client = MemoryWorld::new(DimensionId(0));
    client.insert(pos, Machine::default());

    let envelope = decode_update(bytes, registry)?;
    let outcome = dispatch(&mut client, envelope);
    eprintln!("Dispatch outcome: {outcome:?}");

    let replica = client
        .block_entity(pos)
        .and_then(|e| e.as_sync_source())
        .expect("replica machine should exist");
    eprintln!("Replica now reports: {:?}", replica.produce_sync_values());

    Ok(())
}
