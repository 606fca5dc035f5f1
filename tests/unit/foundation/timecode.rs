use super::*;
use crate::foundation::core::FrameRate;

#[test]
fn encodes_frame_after_sample() {
    assert_eq!(timecode_string(0, 24).unwrap(), "00:00:00:01");
    assert_eq!(timecode_string(23, 24).unwrap(), "00:00:01:00");
    assert_eq!(timecode_string(48, 24).unwrap(), "00:00:02:01");
    assert_eq!(timecode_string(59, 60).unwrap(), "00:00:01:00");
}

#[test]
fn carries_into_minutes_and_hours() {
    let rate = 25;
    let one_hour = 3600 * 25;
    assert_eq!(timecode_string(one_hour - 1, rate).unwrap(), "01:00:00:00");
    assert_eq!(timecode_string(61 * 25 - 1, rate).unwrap(), "00:01:01:00");
}

#[test]
fn decode_inverts_encode_for_every_rate() {
    for r in FrameRate::ALL {
        let rate = r.nominal();
        for n in [0u64, 1, 23, 24, 59, 1_000, 86_399, 359_999 * u64::from(rate)] {
            let tc = timecode_string(n, rate).unwrap();
            let back: Timecode = tc.parse().unwrap();
            assert_eq!(back.to_frames(rate), n + 1, "rate {rate} n {n}");
        }
    }
}

#[test]
fn fails_exactly_past_hour_99() {
    for r in FrameRate::ALL {
        let rate = u64::from(r.nominal());
        let first_overflow = 100 * 3600 * rate;
        // index + 1 is encoded, so `first_overflow - 1` is the first index that fails.
        assert!(Timecode::from_sample_index(first_overflow - 2, r.nominal()).is_ok());
        let err = Timecode::from_sample_index(first_overflow - 1, r.nominal()).unwrap_err();
        assert!(matches!(err, BdnError::TimecodeOverflow { hours: 100, .. }));
    }
}

#[test]
fn parse_rejects_malformed_strings() {
    assert!("00:00:00".parse::<Timecode>().is_err());
    assert!("00:60:00:00".parse::<Timecode>().is_err());
    assert!("0:00:00:00".parse::<Timecode>().is_err());
    assert!("00:00:00:00:00".parse::<Timecode>().is_err());
    assert!("aa:00:00:00".parse::<Timecode>().is_err());
}
