mod common;

use zstream::params::{CParameter, CompressParams, DecompressParams};
use zstream::{oneshot, Compressor, DictTrainer, Decompressor, Dictionary, Directive, Error, FrameInfo};

use std::sync::OnceLock;
use std::thread;

fn trained() -> &'static Dictionary {
    static DICT: OnceLock<Dictionary> = OnceLock::new();
    DICT.get_or_init(|| {
        let samples = common::json_samples(1000);
        Dictionary::train(&samples, 4096).expect("train dictionary")
    })
}

#[test]
fn should_train_dictionary() {
    let dict = trained();
    println!("{dict:?}");
    assert!(dict.len() <= 4096);
    assert!(!dict.is_empty());
    assert_ne!(dict.dict_id(), 0);
}

#[test]
fn should_train_via_corpus() {
    let mut trainer = DictTrainer::new();
    for sample in common::json_samples(500) {
        trainer.push(&sample);
    }
    assert_eq!(trainer.len(), 500);
    let dict = trainer.train(2048).expect("train dictionary");
    assert!(dict.len() <= 2048);
}

#[test]
fn should_fail_training_on_too_few_samples() {
    let error = Dictionary::train([b"a".as_slice(), b"b", b"c"], 4096).unwrap_err();
    println!("error={error}");
    assert!(matches!(error, Error::TrainingFailed(_)));
}

#[test]
fn should_compress_with_trained_dictionary() {
    let dict = trained();
    let sample = common::json_samples(1001).pop().expect("sample");
    let params = CompressParams::with_level(3).expect("level");

    let with_dict = oneshot::compress(&sample, &params, Some(dict)).expect("compress with dictionary");
    let without_dict = oneshot::compress(&sample, &params, None).expect("compress without dictionary");
    println!("SAMPLE.len()={} || DICT={} || NO_DICT={}", sample.len(), with_dict.len(), without_dict.len());
    assert!(with_dict.len() < without_dict.len());

    let info = FrameInfo::inspect(&with_dict).expect("inspect");
    assert_eq!(info.dict_id, Some(dict.dict_id()));

    let output = oneshot::decompress(&with_dict, Some(dict), &DecompressParams::new()).expect("decompress");
    assert_eq!(output, sample);

    let error = oneshot::decompress(&with_dict, None, &DecompressParams::new()).unwrap_err();
    assert!(matches!(error, Error::CorruptInput(_)));
}

#[test]
fn should_omit_dict_id_when_disabled() {
    let dict = trained();
    let params = CompressParams::new().with(CParameter::DictIdFlag, 0).expect("flag");
    let compressed = oneshot::compress(b"{\"id\":1,\"name\":\"alpha\"}", &params, Some(dict)).expect("compress");
    assert_eq!(FrameInfo::inspect(&compressed).expect("inspect").dict_id, None);
    let output = oneshot::decompress(&compressed, Some(dict), &DecompressParams::new()).expect("decompress");
    assert_eq!(output, b"{\"id\":1,\"name\":\"alpha\"}");
}

#[test]
fn should_use_raw_content_as_prefix() {
    let dict = Dictionary::from_raw_bytes(common::text(30, 2048));
    assert_eq!(dict.dict_id(), 0);
    let data = common::text(30, 3000);

    let mut compressor = Compressor::with_dict(&CompressParams::new(), Some(&dict)).expect("create compressor");
    let compressed = compressor.compress(&data, Directive::End).expect("compress");
    assert_eq!(FrameInfo::inspect(&compressed).expect("inspect").dict_id, None);

    let mut decompressor = Decompressor::with_dict(Some(&dict), &DecompressParams::new()).expect("create decompressor");
    assert_eq!(decompressor.decompress(&compressed, None).expect("decompress"), data);
    assert_eq!(decompressor.dict().map(Dictionary::dict_id), Some(0));
}

#[test]
fn should_share_dictionary_across_threads() {
    let dict = trained().clone();
    let samples = common::json_samples(64);

    let workers: Vec<_> = (0..8).map(|idx| {
        let dict = dict.clone();
        let samples = samples.clone();
        thread::spawn(move || {
            let params = CompressParams::with_level(1 + (idx % 2)).expect("level");
            for sample in samples.iter() {
                let mut compressor = Compressor::with_dict(&params, Some(&dict)).expect("create compressor");
                let compressed = compressor.compress(sample, Directive::End).expect("compress");
                let mut decompressor = Decompressor::with_dict(Some(&dict), &DecompressParams::new()).expect("create decompressor");
                let output = decompressor.decompress(&compressed, None).expect("decompress");
                assert_eq!(&output, sample);
            }
        })
    }).collect();

    for worker in workers {
        worker.join().expect("worker to finish");
    }
}

#[test]
fn should_outlive_handle_in_session() {
    let dict = Dictionary::from_raw_bytes(common::text(31, 1024));
    let mut compressor = Compressor::with_dict(&CompressParams::new(), Some(&dict)).expect("create compressor");
    let mut decompressor = Decompressor::with_dict(Some(&dict), &DecompressParams::new()).expect("create decompressor");
    drop(dict);

    let data = common::text(31, 4096);
    let compressed = compressor.compress(&data, Directive::End).expect("compress");
    assert_eq!(decompressor.decompress(&compressed, None).expect("decompress"), data);
}

#[test]
fn should_keep_dictionary_and_params_across_frames() {
    let dict = trained();
    let samples = common::json_samples(1003);
    let (first, second) = (&samples[1001], &samples[1002]);
    let params = CompressParams::new().with(CParameter::ChecksumFlag, 1).expect("checksum");

    let mut compressor = Compressor::with_dict(&params, Some(dict)).expect("create compressor");
    let mut compressed = compressor.compress(first, Directive::End).expect("first frame");
    let first_len = compressed.len();
    compressed.extend(compressor.compress(second, Directive::End).expect("second frame"));

    for frame in [&compressed[..first_len], &compressed[first_len..]] {
        let info = FrameInfo::inspect(frame).expect("inspect");
        assert_eq!(info.dict_id, Some(dict.dict_id()));
        assert!(info.has_checksum);
    }

    let mut decompressor = Decompressor::with_dict(Some(dict), &DecompressParams::new()).expect("create decompressor");
    let output = decompressor.decompress(&compressed, None).expect("decompress");
    assert!(decompressor.at_frame_edge());
    assert!(decompressor.needs_input());
    let mut expected = first.clone();
    expected.extend_from_slice(second);
    assert_eq!(output, expected);
}
