//! End-to-end coverage: capture, encode, cross a thread, decode, queue,
//! drain, and verify the replica.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;

use bytes::Bytes;
use tilesync::push::{
    capture, decode_update, dispatch, encode_update, DispatchOutcome, DispatchQueue, DropReason,
    PushError,
};
use tilesync::wire::{CodecRegistry, DecodeError, SyncEnvelope};
use tilesync::world::{
    BlockEntity, BlockPos, DimensionId, Location, MemoryWorld, SyncSink, SyncSource, Value,
    ValueKind,
};

#[derive(Debug, Default, PartialEq, Clone)]
struct PanelState {
    progress: i32,
    item: String,
    lit: bool,
    applied: usize,
}

/// Block entity with externally observable state.
#[derive(Default)]
struct Panel {
    state: Rc<RefCell<PanelState>>,
}

impl Panel {
    fn new(progress: i32, item: &str, lit: bool) -> (Self, Rc<RefCell<PanelState>>) {
        let panel = Panel::default();
        {
            let mut state = panel.state.borrow_mut();
            state.progress = progress;
            state.item = item.to_owned();
            state.lit = lit;
        }
        let probe = Rc::clone(&panel.state);
        (panel, probe)
    }
}

impl SyncSource for Panel {
    fn produce_sync_values(&self) -> Vec<Value> {
        let state = self.state.borrow();
        vec![
            Value::Int(state.progress),
            Value::Str(state.item.clone()),
            Value::Bool(state.lit),
        ]
    }
}

impl SyncSink for Panel {
    fn apply_sync_values(&mut self, values: Vec<Value>) {
        let mut state = self.state.borrow_mut();
        let mut values = values.into_iter();
        if let Some(Value::Int(progress)) = values.next() {
            state.progress = progress;
        }
        if let Some(Value::Str(item)) = values.next() {
            state.item = item;
        }
        if let Some(Value::Bool(lit)) = values.next() {
            state.lit = lit;
        }
        state.applied += 1;
    }
}

impl BlockEntity for Panel {
    fn as_sync_source(&self) -> Option<&dyn SyncSource> {
        Some(self)
    }

    fn as_sync_sink(&mut self) -> Option<&mut dyn SyncSink> {
        Some(self)
    }
}

#[test]
fn full_push_pipeline_across_threads() {
    let registry = CodecRegistry::standard();
    let pos = BlockPos::new(18, 65, -44);

    // Authoritative world, producing three successive states.
    let (packet_tx, packet_rx) = mpsc::channel::<Bytes>();
    let producer = thread::spawn(move || {
        let mut server = MemoryWorld::new(DimensionId(0));
        for (progress, item, lit) in [(10, "ore", false), (55, "ore", true), (100, "ingot", false)]
        {
            let (panel, _) = Panel::new(progress, item, lit);
            server.insert(pos, panel);
            let bytes = encode_update(&server, pos, registry).expect("encode should succeed");
            packet_tx.send(bytes).expect("packet channel should be open");
        }
    });

    // Receiving world plus its queue, owned by this thread.
    let mut client = MemoryWorld::new(DimensionId(0));
    let (replica, probe) = Panel::new(0, "", false);
    client.insert(pos, replica);
    let mut queue = DispatchQueue::new();
    let handle = queue.handle();

    // Network thread: decode and submit, never touching the world.
    let network = thread::spawn(move || {
        for bytes in packet_rx {
            let envelope = decode_update(bytes, registry).expect("decode should succeed");
            handle.submit(envelope).expect("queue should be open");
        }
    });

    producer.join().expect("producer thread should finish");
    network.join().expect("network thread should finish");

    let report = queue.drain(&mut client);
    assert_eq!(report.delivered, 3);
    assert_eq!(report.dropped, 0);

    let state = probe.borrow();
    assert_eq!(state.applied, 3);
    assert_eq!(
        (state.progress, state.item.as_str(), state.lit),
        (100, "ingot", false)
    );
}

#[test]
fn snapshot_survives_source_mutation() {
    let pos = BlockPos::ORIGIN;
    let mut world = MemoryWorld::new(DimensionId(0));
    let (panel, probe) = Panel::new(42, "before", true);
    world.insert(pos, panel);

    let envelope = capture(&world, pos);
    probe.borrow_mut().progress = 9000;

    assert_eq!(
        envelope.values(),
        &[
            Value::Int(42),
            Value::Str("before".into()),
            Value::Bool(true),
        ]
    );
}

#[test]
fn wrong_dimension_update_is_dropped_end_to_end() {
    let registry = CodecRegistry::standard();
    let pos = BlockPos::new(1, 1, 1);

    let mut nether = MemoryWorld::new(DimensionId(-1));
    let (panel, _) = Panel::new(7, "x", true);
    nether.insert(pos, panel);
    let bytes = encode_update(&nether, pos, registry).expect("encode should succeed");

    let mut overworld = MemoryWorld::new(DimensionId(0));
    let (replica, probe) = Panel::new(0, "", false);
    overworld.insert(pos, replica);

    let envelope = decode_update(bytes, registry).expect("decode should succeed");
    let outcome = dispatch(&mut overworld, envelope);
    assert_eq!(outcome, DispatchOutcome::Dropped(DropReason::DimensionMismatch));
    assert_eq!(probe.borrow().applied, 0);
}

#[test]
fn older_peer_rejects_newer_tags() {
    // Sender registry knows all seven kinds; receiver was built against a
    // three-kind prefix and must treat unknown tags as version skew.
    let sender = CodecRegistry::standard();
    let receiver = CodecRegistry::from_kinds([ValueKind::Int, ValueKind::Str, ValueKind::Float])
        .expect("prefix registry should build");

    let pos = BlockPos::ORIGIN;
    let mut world = MemoryWorld::new(DimensionId(0));
    let (panel, _) = Panel::new(1, "v2-field", true);
    world.insert(pos, panel);

    let bytes = encode_update(&world, pos, sender).expect("encode should succeed");
    let err = decode_update(bytes, &receiver).unwrap_err();
    assert!(matches!(
        err,
        PushError::Decode(DecodeError::UnknownTag {
            tag: 3,
            registry_size: 3
        })
    ));
}

#[test]
fn envelope_location_binds_dimension_and_position() {
    let mut world = MemoryWorld::new(DimensionId(4));
    let pos = BlockPos::new(-8, 12, 99);
    let (panel, _) = Panel::new(0, "", false);
    world.insert(pos, panel);

    let envelope = capture(&world, pos);
    assert_eq!(envelope.location(), Location::new(DimensionId(4), pos));
}

#[test]
fn capture_of_empty_position_round_trips_as_empty() {
    let registry = CodecRegistry::standard();
    let world = MemoryWorld::new(DimensionId(0));
    let pos = BlockPos::new(2, 2, 2);

    let bytes = encode_update(&world, pos, registry).expect("encode should succeed");
    let envelope = decode_update(bytes, registry).expect("decode should succeed");
    assert!(envelope.is_empty());

    // Delivering an empty envelope to an empty position is a drop, not an error.
    let mut receiver = MemoryWorld::new(DimensionId(0));
    assert_eq!(
        dispatch(&mut receiver, envelope),
        DispatchOutcome::Dropped(DropReason::NoEntity)
    );
}

#[test]
fn mixed_value_kinds_survive_the_full_pipeline() {
    let registry = CodecRegistry::standard();
    let location = Location::new(DimensionId(0), BlockPos::new(5, 5, 5));
    let values = vec![
        Value::Long(1_i64 << 40),
        Value::Pos(BlockPos::new(-3, 0, 3)),
        Value::Byte(0x80),
        Value::Float(-0.125),
    ];

    let envelope = SyncEnvelope::new(location, values.clone());
    let mut buf = bytes::BytesMut::new();
    tilesync::wire::encode_envelope(&envelope, registry, &mut buf).expect("encode should succeed");

    let decoded = decode_update(buf.freeze(), registry).expect("decode should succeed");
    assert_eq!(decoded.location(), location);
    assert_eq!(decoded.values(), values.as_slice());
}
