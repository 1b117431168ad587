//! Dispatch queue across threads — decode anywhere, mutate in one place.
//!
//! A network thread decodes incoming packets and submits the envelopes;
//! the main thread owns the world and drains the queue on its own "tick",
//! the only place entities are touched.
//!
//! Run with:
//!   cargo run --example cross-thread

use std::sync::mpsc;
use std::thread;

use bytes::Bytes;
use tilesync::push::{decode_update, encode_update, DispatchQueue};
use tilesync::wire::CodecRegistry;
use tilesync::world::{
    BlockEntity, BlockPos, DimensionId, MemoryWorld, SyncSink, SyncSource, Value, World,
};

struct Sensor {
    reading: i64,
}

impl SyncSource for Sensor {
    fn produce_sync_values(&self) -> Vec<Value> {
        vec![Value::Long(self.reading)]
    }
}

impl SyncSink for Sensor {
    fn apply_sync_values(&mut self, values: Vec<Value>) {
        if let Some(Value::Long(reading)) = values.first() {
            self.reading = *reading;
        }
    }
}

impl BlockEntity for Sensor {
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
    let pos = BlockPos::new(3, 70, 3);

    // Stand-in for a transport: the producer sends raw packets.
    let (packet_tx, packet_rx) = mpsc::channel::<Bytes>();

    let producer = thread::spawn(move || -> Result<(), tilesync::push::PushError> {
        let mut world = MemoryWorld::new(DimensionId(0));
        world.insert(pos, Sensor { reading: 0 });

        for reading in [100, 250, 400] {
            world.insert(pos, Sensor { reading });
            let bytes = encode_update(&world, pos, registry)?;
            if packet_tx.send(bytes).is_err() {
                break;
            }
        }
        Ok(())
    });

    // Consumer side: the world and its queue live on the main thread.
    let mut world = MemoryWorld::new(DimensionId(0));
    world.insert(pos, Sensor { reading: -1 });
    let mut queue = DispatchQueue::new();
    let handle = queue.handle();

    // Network thread: decode off the owning thread, submit envelopes.
    let network = thread::spawn(move || {
        for bytes in packet_rx {
            match decode_update(bytes, registry) {
                Ok(envelope) => {
                    if handle.submit(envelope).is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!("Dropping undecodable packet: {e}"),
            }
        }
    });

    producer.join().expect("producer thread should finish")?;
    network.join().expect("network thread should finish");

    // The owner's tick: apply everything that queued up.
    let report = queue.drain(&mut world);
    eprintln!(
        "Tick drained {} updates ({} delivered, {} dropped)",
        report.total(),
        report.delivered,
        report.dropped
    );

    let sensor = world
        .block_entity(pos)
        .and_then(|e| e.as_sync_source())
        .expect("sensor should exist");
    eprintln!("Final replica state: {:?}", sensor.produce_sync_values());

    Ok(())
}
