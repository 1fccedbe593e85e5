mod common;

use zstream::params::{CParameter, CompressParams, DParameter, DecompressParams};
use zstream::{oneshot, Decompressor, Error};

use proptest::prelude::*;

fn compress(data: &[u8]) -> Vec<u8> {
    oneshot::compress(data, &CompressParams::new(), None).expect("compress")
}

#[test]
fn should_drain_capped_output_with_empty_input() {
    let data = vec![b'a'; 100 + 32768];
    let compressed = compress(&data);
    let mut decompressor = Decompressor::new().expect("create decompressor");

    let mut output = decompressor.decompress(&compressed, Some(100)).expect("first call");
    assert_eq!(output.len(), 100);
    assert!(!decompressor.at_frame_edge());
    assert!(!decompressor.needs_input());

    let mut calls = 0;
    while !decompressor.needs_input() {
        let chunk = decompressor.decompress(&[], Some(100)).expect("drain");
        assert!(chunk.len() <= 100);
        output.extend(chunk);
        calls += 1;
        assert!(calls < 1000, "session does not make progress");
    }

    assert!(decompressor.at_frame_edge());
    assert!(decompressor.needs_input());
    assert_eq!(output, data);
}

#[test]
fn should_decode_concatenated_frames_in_pieces() {
    let first = common::text(10, 20 * 1024);
    let second = common::text(11, 3 * 1024);
    let mut compressed = compress(&first);
    compressed.extend(compress(&second));

    let mut decompressor = Decompressor::new().expect("create decompressor");
    let mut output = Vec::new();
    for chunk in compressed.chunks(13) {
        output.extend(decompressor.decompress(chunk, None).expect("decompress"));
        assert!(decompressor.needs_input());
    }

    assert!(decompressor.at_frame_edge());
    assert_eq!(output.len(), first.len() + second.len());
    assert_eq!(&output[..first.len()], first);
    assert_eq!(&output[first.len()..], second);
}

#[test]
fn should_leave_frame_edge_once_frame_starts() {
    let data = common::text(12, 4096);
    let compressed = compress(&data);
    let (head, tail) = compressed.split_at(compressed.len() / 2);

    let mut decompressor = Decompressor::new().expect("create decompressor");
    let mut output = decompressor.decompress(head, None).expect("first half");
    assert!(!decompressor.at_frame_edge());
    assert!(decompressor.needs_input());

    //Truncated stream is not an error for session, caller decides whether to wait
    let empty = decompressor.decompress(&[], None).expect("no more input");
    assert!(empty.is_empty());
    assert!(!decompressor.at_frame_edge());

    output.extend(decompressor.decompress(tail, None).expect("second half"));
    assert!(decompressor.at_frame_edge());
    assert!(decompressor.needs_input());
    assert_eq!(output, data);
}

#[test]
fn should_keep_capped_input_for_next_frame() {
    let first = common::text(13, 1000);
    let second = common::text(14, 1000);
    let mut compressed = compress(&first);
    compressed.extend(compress(&second));

    let mut decompressor = Decompressor::new().expect("create decompressor");
    let mut output = decompressor.decompress(&compressed, Some(1500)).expect("capped");
    assert_eq!(output.len(), 1500);
    assert!(!decompressor.needs_input());
    while !decompressor.needs_input() {
        output.extend(decompressor.decompress(&[], Some(1500)).expect("drain"));
    }
    assert!(decompressor.at_frame_edge());
    assert_eq!(output.len(), 2000);
    assert_eq!(&output[1000..], second);
}

#[test]
fn should_refuse_frame_above_window_limit() {
    let data = common::text(15, 64 * 1024);
    let compressed = compress(&data);
    let params = DecompressParams::new().with(DParameter::WindowLogMax, 10).expect("window limit");
    let mut decompressor = Decompressor::with_dict(None, &params).expect("create decompressor");
    let error = decompressor.decompress(&compressed, None).unwrap_err();
    println!("error={error}");
    assert!(matches!(error, Error::CorruptInput(_)));
    assert_eq!(decompressor.decompress(&[], None), Err(error));
}

#[test]
fn should_detect_checksum_mismatch_in_stream() {
    let params = CompressParams::new().with(CParameter::ChecksumFlag, 1).expect("checksum");
    let mut compressed = oneshot::compress(b"streamed with checksum", &params, None).expect("compress");
    let last = compressed.len() - 1;
    compressed[last] ^= 0x55;

    let mut decompressor = Decompressor::new().expect("create decompressor");
    let result = decompressor.decompress(&compressed, None);
    assert!(matches!(result, Err(Error::CorruptInput(_))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_empty_input_at_frame_edge_is_noop(data in proptest::collection::vec(any::<u8>(), 0..2048), repeat in 1usize..8) {
        let compressed = compress(&data);
        let mut decompressor = Decompressor::new().expect("create decompressor");
        let output = decompressor.decompress(&compressed, None).expect("decompress");
        prop_assert_eq!(output, data);
        prop_assert!(decompressor.at_frame_edge());
        prop_assert!(decompressor.needs_input());

        for _ in 0..repeat {
            let output = decompressor.decompress(&[], None).expect("empty input");
            prop_assert!(output.is_empty());
            prop_assert!(decompressor.at_frame_edge());
            prop_assert!(decompressor.needs_input());
        }
    }

    #[test]
    fn prop_any_split_decodes_same(seed in any::<u64>(), cut in 1usize..64) {
        let data = common::text(seed, 8 * 1024);
        let compressed = compress(&data);
        let mut decompressor = Decompressor::new().expect("create decompressor");
        let mut output = Vec::new();
        for chunk in compressed.chunks(cut) {
            output.extend(decompressor.decompress(chunk, None).expect("decompress"));
        }
        prop_assert!(decompressor.at_frame_edge());
        prop_assert_eq!(output, data);
    }
}
