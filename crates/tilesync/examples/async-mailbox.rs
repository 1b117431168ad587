//! Async dispatch mailbox — the tokio flavor of the cross-thread demo.
//!
//! A producer task decodes updates and submits them; the owning task runs
//! the mailbox until every handle is dropped.
//!
//! Run with:
//!   cargo run --example async-mailbox --features async

use tilesync::push::{decode_update, encode_update, AsyncDispatchQueue};
use tilesync::wire::CodecRegistry;
use tilesync::world::{
    BlockEntity, BlockPos, DimensionId, MemoryWorld, SyncSink, SyncSource, Value, World,
};

struct Tank {
    volume: i32,
}

impl SyncSource for Tank {
    fn produce_sync_values(&self) -> Vec<Value> {
        vec![Value::Int(self.volume)]
    }
}

impl SyncSink for Tank {
    fn apply_sync_values(&mut self, values: Vec<Value>) {
        if let Some(Value::Int(volume)) = values.first() {
            self.volume = *volume;
        }
    }
}

impl BlockEntity for Tank {
    fn as_sync_source(&self) -> Option<&dyn SyncSource> {
        Some(self)
    }

    fn as_sync_sink(&mut self) -> Option<&mut dyn SyncSink> {
        Some(self)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::level_filters::LevelFilter::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .try_init();

    let registry = CodecRegistry::standard();
    let pos = BlockPos::new(0, 80, 0);

    let (handle, queue) = AsyncDispatchQueue::new();

    let producer = tokio::spawn(async move {
        let mut server = MemoryWorld::new(DimensionId(0));
        for volume in [10, 20, 30] {
            server.insert(pos, Tank { volume });
            let bytes = encode_update(&server, pos, registry).expect("encode should succeed");
            let envelope = decode_update(bytes, registry).expect("decode should succeed");
            handle.submit(envelope).expect("mailbox should be open");
        }
        // Handle drops here; the mailbox closes once drained.
    });

    let mut world = MemoryWorld::new(DimensionId(0));
    world.insert(pos, Tank { volume: 0 });

    let report = queue.run(&mut world).await;
    producer.await?;

    eprintln!(
        "Mailbox closed after {} updates ({} delivered, {} dropped)",
        report.total(),
        report.delivered,
        report.dropped
    );
    let tank = world
        .block_entity(pos)
        .and_then(|e| e.as_sync_source())
        .expect("tank should exist");
    eprintln!("Final replica state: {:?}", tank.produce_sync_values());

    Ok(())
}
