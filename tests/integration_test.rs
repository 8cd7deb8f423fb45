//! Integration tests for huffpack

use huffpack::code_table::CodeTable;
use huffpack::frequency::FrequencyTable;
use huffpack::tree::HuffmanTree;
use huffpack::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn roundtrip(data: &[u8]) {
    let artifact = encode(data).unwrap();
    let decoded = decode_with_status(&artifact).unwrap();
    assert!(decoded.is_complete(), "status {:?}", decoded.status);
    assert_eq!(decoded.data, data);
}

#[test]
fn test_roundtrip_fixed_inputs() {
    roundtrip(b"");
    roundtrip(b"a");
    roundtrip(b"aaab");
    roundtrip(&[0x41; 1000]);
    roundtrip(&(0..=255u8).collect::<Vec<_>>());
    roundtrip(&b"the quick brown fox jumps over the lazy dog".repeat(50));
    roundtrip(&(0..=255u8).cycle().take(2000).collect::<Vec<_>>());
}

#[test]
fn test_roundtrip_random_inputs() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let len = rng.gen_range(0..2048);
        let alphabet = rng.gen_range(1..=256u32);
        let data: Vec<u8> = (0..len)
            .map(|_| {
                // skew towards low values so code lengths vary
                let r: u32 = rng.gen_range(0..alphabet);
                (r * r / alphabet) as u8
            })
            .collect();
        roundtrip(&data);
    }
}

#[test]
fn test_artifact_is_reproducible() {
    let data = b"abracadabra, abracadabra, all the way down".repeat(20);
    let first = encode(&data).unwrap();
    for _ in 0..5 {
        assert_eq!(encode(&data).unwrap(), first);
    }
}

#[test]
fn test_codes_are_prefix_free_and_non_empty() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let data: Vec<u8> = (0..rng.gen_range(1..4096)).map(|_| rng.gen()).collect();
        let frequencies = FrequencyTable::from_bytes(&data);
        let tree = HuffmanTree::build(&frequencies).unwrap();
        let codes = CodeTable::from_tree(&tree);
        assert_eq!(codes.len(), frequencies.len());
        assert!(codes.iter().all(|(_, code)| !code.is_empty()));
        assert!(codes.is_prefix_free());
    }
}

#[test]
fn test_degenerate_input() {
    let data = vec![0x41u8; 1000];
    let tree = HuffmanTree::build(&FrequencyTable::from_bytes(&data)).unwrap();
    let codes = CodeTable::from_tree(&tree);
    assert_eq!(codes.len(), 1);
    assert!(codes.get(0x41).unwrap().len() >= 1);

    let artifact = encode(&data).unwrap();
    assert_eq!(decode(&artifact).unwrap(), data);
}

#[test]
fn test_aaab_scenario() {
    let frequencies = FrequencyTable::from_bytes(b"aaab");
    assert_eq!(frequencies.iter().collect::<Vec<_>>(), vec![(0x61, 3), (0x62, 1)]);

    let codes = CodeTable::from_tree(&HuffmanTree::build(&frequencies).unwrap());
    assert_eq!(codes.get(0x61).unwrap().len(), 1);
    assert_eq!(codes.get(0x62).unwrap().len(), 1);

    let artifact = encode(b"aaab").unwrap();
    assert_eq!(read_header(&artifact).unwrap().payload_bits, 4);
    assert_eq!(decode(&artifact).unwrap(), b"aaab");
}

#[test]
fn test_truncation_never_panics() {
    let data = b"Truncation must stop cleanly at every byte boundary.".repeat(8);
    let artifact = encode(&data).unwrap();
    for cut in 0..artifact.len() {
        match decode_with_status(&artifact[..cut]) {
            Ok(decoded) => {
                assert!(data.starts_with(&decoded.data), "cut at {cut}");
                if cut > 0 {
                    assert!(!decoded.is_complete(), "cut at {cut} reported complete");
                }
            }
            Err(_) => {}
        }
    }
}

#[test]
fn test_random_garbage_terminates() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..500 {
        let len = rng.gen_range(0..64);
        let mut garbage: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        if garbage.len() >= 4 {
            // keep the tree length plausible so the tree parser gets exercised
            garbage[0] = 0;
            garbage[1] = 0;
            garbage[2] = 0;
        }
        let _ = decode_with_status(&garbage);
    }
}

#[test]
fn test_codec_config_roundtrip() {
    let config = CodecConfig::from_json_str(r#"{ "max_input_size": 4096, "strict": true }"#).unwrap();
    let codec = Codec::new(config);
    let data = b"config test data with custom limits";
    let artifact = codec.encode(data).unwrap();
    assert_eq!(codec.decode(&artifact).unwrap(), data);
    assert!(codec.encode(&vec![0u8; 4097]).is_err());
}

#[test]
fn test_empty_decode_is_distinct_from_corrupt() {
    assert_eq!(decode(b"").unwrap(), Vec::<u8>::new());
    assert!(decode(&[0, 0, 0]).is_err());
}
