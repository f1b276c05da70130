use crclink_rs::channel::{flip_bit, flip_k_distinct_bits};
use crclink_rs::error::DecodeError;
use crclink_rs::phy::bit::bits_to_payload;
use crclink_rs::phy::{
    Bit, BitSequence, build_frame, crc16, manchester_decode,
    manchester_encode, verify_frame,
};
use crclink_rs::transmission::{Detection, Verdict, decode_and_verify};
use proptest::prelude::*;
use proptest::sample::Index;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bits(
    len: impl Into<proptest::collection::SizeRange>,
) -> impl Strategy<Value = BitSequence> {
    proptest::collection::vec(any::<bool>(), len)
        .prop_map(|v| v.into_iter().map(Bit::from).collect())
}

proptest! {
    #[test]
    fn frame_round_trip(data in bits(1..256)) {
        let frame = build_frame(&data).unwrap();
        prop_assert_eq!(frame.len(), data.len() + 16);

        let check = verify_frame(&frame).unwrap();
        prop_assert_eq!(check.calculated_crc, crc16(&data));
        prop_assert!(check.is_match());
        prop_assert_eq!(&check.data, &data);

        let encoded = manchester_encode(&frame);
        prop_assert_eq!(encoded.len(), 2 * frame.len());
        prop_assert_eq!(manchester_decode(&encoded).unwrap(), frame);
    }

    #[test]
    fn manchester_inverse(x in bits(0..300)) {
        prop_assert_eq!(manchester_decode(&manchester_encode(&x)).unwrap(), x);
    }

    #[test]
    fn crc_is_a_function_of_its_input(x in bits(0..300)) {
        prop_assert_eq!(crc16(&x), crc16(&x.clone()));
    }

    #[test]
    fn odd_length_always_rejected(x in bits(0..300), extra in any::<bool>()) {
        let mut encoded = manchester_encode(&x);
        encoded.push(Bit::from(extra));
        prop_assert_eq!(
            manchester_decode(&encoded),
            Err(DecodeError::OddLength { len: encoded.len() })
        );
    }

    #[test]
    fn first_invalid_pair_is_reported(
        x in bits(1..200),
        at in any::<Index>(),
        level in any::<bool>(),
        tail in any::<Index>(),
    ) {
        let mut encoded = manchester_encode(&x);
        let pairs = x.len();
        let i = at.index(pairs);
        let bad = Bit::from(level);
        encoded[2 * i] = bad;
        encoded[2 * i + 1] = bad;

        // a second invalid pair later on must not change the answer
        let j = i + tail.index(pairs - i);
        if j > i {
            encoded[2 * j] = bad.flip();
            encoded[2 * j + 1] = bad.flip();
        }

        prop_assert_eq!(
            manchester_decode(&encoded),
            Err(DecodeError::InvalidPair { position: 2 * i, observed: (bad, bad) })
        );
    }

    #[test]
    fn single_bit_errors_are_always_detected(
        data in bits(1..256),
        at in any::<Index>(),
    ) {
        let frame = build_frame(&data).unwrap();
        let corrupted = flip_bit(&frame, at.index(frame.len()));
        let payload = bits_to_payload(&manchester_encode(&corrupted));

        let reception = decode_and_verify(&payload).unwrap();
        prop_assert!(matches!(
            reception.verdict,
            Verdict::ErrorDetected(Detection::CrcMismatch(_))
        ));
    }

    #[test]
    fn odd_weight_errors_are_always_detected(
        data in bits(1..128),
        half in 0usize..8,
        seed in any::<u64>(),
    ) {
        // x + 1 divides the generator, so every odd-weight error shows up
        let frame = build_frame(&data).unwrap();
        let count = 2 * half + 1;
        let mut rng = StdRng::seed_from_u64(seed);
        let corrupted = flip_k_distinct_bits(&frame, count, &mut rng).unwrap();

        prop_assert!(!verify_frame(&corrupted).unwrap().is_match());
    }
}
