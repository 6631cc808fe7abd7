use smm_core::{
    decrypt, double_hash, encrypt, BlockHeader, CipherError, CipherKey, Engine, EngineProfile,
    ManualClock, MerkleMode, MiningReport, Status, SystemClock,
};

const GENESIS_HEADER: &str = concat!(
    "01000000",
    "0000000000000000000000000000000000000000000000000000000000000000",
    "3ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a",
    "29ab5f49",
    "ffff001d",
    "1dac2b7c"
);
const GENESIS_NONCE: u32 = 2_083_236_893;

fn genesis_header() -> BlockHeader {
    BlockHeader::from_bytes(&hex::decode(GENESIS_HEADER).unwrap()).unwrap()
}

#[test]
fn mines_genesis_block_in_chunks() {
    let profile = EngineProfile::default().with_merkle_mode(MerkleMode::Supplied);
    let mut engine = Engine::new(profile, ManualClock::stepping(5));

    let mut header = genesis_header();
    header.nonce = GENESIS_NONCE - 25;

    assert_eq!(engine.begin(b"The Times 03/Jan/2009"), Ok(Status::Ready));
    assert_eq!(engine.init(0, header, &[]), Ok(Status::Mining));

    let mut calls = 0;
    while engine.mine(10) == Status::Mining {
        calls += 1;
        assert!(calls < 5, "search overran the winning nonce");
    }

    assert_eq!(engine.status(), Status::Done);
    assert_eq!(calls, 2);
    assert_eq!(engine.header().nonce, GENESIS_NONCE);

    let report = engine.report();
    assert_eq!(report.nonce, GENESIS_NONCE);
    assert_eq!(
        hex::encode(report.best_hash),
        "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"
    );
    assert_eq!(report.hash_time, 15);
    assert!(report.hash_rate > 0.0);

    // The report survives the wire format
    let decoded = MiningReport::from_bytes(&report.to_bytes()).unwrap();
    assert_eq!(decoded, report);

    engine.end();
    assert_eq!(engine.status(), Status::Idle);
}

#[test]
fn best_hash_never_increases() {
    let mut engine = Engine::new(EngineProfile::default(), ManualClock::new());
    engine.begin(&[0x42; 32]).unwrap();

    let mut header = genesis_header();
    header.bits = 0x04000001;
    header.nonce = 0;
    engine.init(840_000, header, &[[0x77; 32], [0x99; 32]]).unwrap();

    let mut previous = engine.report().best_hash;
    for _ in 0..20 {
        assert_eq!(engine.mine(25), Status::Mining);
        let best = engine.report().best_hash;
        assert!(best <= previous);
        previous = best;
    }
    assert_eq!(engine.header().nonce, 500);
}

#[test]
fn exhaustion_reaches_fail_within_two_hashes() {
    let mut engine = Engine::new(EngineProfile::default(), ManualClock::new());
    engine.begin(b"tail").unwrap();

    let mut header = genesis_header();
    header.bits = 0x04000000;
    header.nonce = 0xFFFF_FFFE;
    engine.init(1, header, &[]).unwrap();

    assert_eq!(engine.mine(1), Status::Mining);
    assert_eq!(engine.mine(1), Status::Fail);
    assert_eq!(engine.mine(1), Status::Fail);
}

#[test]
fn new_begin_overwrites_previous_session() {
    let mut engine = Engine::default();
    engine.begin(b"first").unwrap();
    let mut header = genesis_header();
    header.bits = 0x04000001;
    engine.init(10, header, &[]).unwrap();
    engine.mine(64);
    assert_ne!(engine.report().best_hash, [0xFF; 32]);

    engine.begin(b"second").unwrap();
    let report = engine.report();
    assert_eq!(report.status, Status::Ready);
    assert_eq!(report.best_hash, [0xFF; 32]);
    assert_eq!(report.height, 0);
    assert_eq!(report.hash_time, 0);
    assert!(engine.target().is_none());
}

#[test]
fn system_clock_engine_reports_sane_rate() {
    let mut engine: Engine<SystemClock> = Engine::default();
    engine.begin(b"clock").unwrap();
    let mut header = genesis_header();
    header.bits = 0x04000001;
    header.nonce = 0;
    engine.init(1, header, &[]).unwrap();

    engine.mine(2_000);
    let report = engine.report();
    assert!(report.hash_rate >= 0.0);
    assert!(report.hash_rate.is_finite());
}

#[test]
fn merkle_root_from_empty_path_is_coinbase_hash() {
    let mut engine = Engine::new(EngineProfile::default(), ManualClock::new());
    engine.begin(b"fragment").unwrap();
    engine.init(0x0A0B0C, genesis_header(), &[]).unwrap();

    let mut coinbase = vec![0x03u8, 0x0C, 0x0B, 0x0A];
    coinbase.extend_from_slice(b"fragment");
    assert_eq!(engine.session().coinbase(), &coinbase[..]);
    assert_eq!(engine.header().merkle_root, double_hash(&coinbase));
}

#[test]
fn cipher_protects_a_report_payload() {
    let key = CipherKey::from_le_bytes(*b"solarbit-smm-key");
    let report = MiningReport {
        mode: smm_core::Mode::Emulated,
        status: Status::Mining,
        height: 1,
        nonce: 2,
        nonce2: 0,
        best_hash: [0x10; 32],
        hash_time: 1000,
        hash_rate: 1024.0,
    };

    let payload = report.to_bytes();
    let mut packet = [0u8; 64];
    packet[..payload.len()].copy_from_slice(&payload);

    let sealed = encrypt(&mut packet, payload.len(), &key).unwrap();
    assert_eq!(sealed, 64);

    let opened = decrypt(&mut packet[..sealed], &key).unwrap();
    assert_eq!(opened, payload.len());
    assert_eq!(MiningReport::from_bytes(&packet[..opened]).unwrap(), report);
}

#[test]
fn cipher_capacity_failure_is_distinguishable() {
    let key = CipherKey::new([1, 2, 3, 4]);
    let mut packet = [0x33u8; 60];
    let before = packet;

    let err = encrypt(&mut packet, 60, &key).unwrap_err();
    assert_eq!(err, CipherError::CapacityExceeded { needed: 64, capacity: 60 });
    assert_eq!(packet, before);
}
