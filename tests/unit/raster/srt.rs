use super::*;

#[test]
fn parses_basic_cues() {
    let src = "1\n00:00:01,000 --> 00:00:02,000\nHello\nworld\n\n2\n00:01:00,500 --> 00:01:02,250\nBye\n";
    let track = parse_srt(src).unwrap();
    assert_eq!(track.cues.len(), 2);
    assert_eq!(track.cues[0].start_ms, 1000);
    assert_eq!(track.cues[0].end_ms, 2000);
    assert_eq!(track.cues[0].lines, vec!["Hello", "world"]);
    assert_eq!(track.cues[1].start_ms, 60_500);
    assert_eq!(track.cues[1].end_ms, 62_250);
}

#[test]
fn tolerates_bom_crlf_dots_and_missing_counters() {
    let src = "\u{feff}00:00:00.5 --> 00:00:01.25 X1:10 X2:20\r\n<i>Hi</i> {\\an8}there\r\n\r\n";
    let track = parse_srt(src).unwrap();
    assert_eq!(track.cues.len(), 1);
    assert_eq!(track.cues[0].start_ms, 500);
    assert_eq!(track.cues[0].end_ms, 1250);
    assert_eq!(track.cues[0].lines, vec!["Hi there"]);
}

#[test]
fn drops_zero_length_and_blank_cues() {
    let src = "1\n00:00:01,000 --> 00:00:01,000\nGone\n\n2\n00:00:02,000 --> 00:00:03,000\n<b></b>\n";
    assert!(parse_srt(src).unwrap().is_empty());
}

#[test]
fn empty_input_is_an_empty_track() {
    assert!(parse_srt("").unwrap().is_empty());
    assert!(parse_srt("\n\n").unwrap().is_empty());
}

#[test]
fn malformed_timing_is_a_load_error() {
    let err = parse_srt("1\n00:00:01 --> 00:00:02,000\nx\n").unwrap_err();
    assert!(matches!(err, BdnError::Load(_)));
    assert!(err.to_string().contains("line 2"));

    let err = parse_srt("1\n00:00:03,000 --> 00:00:02,000\nx\n").unwrap_err();
    assert!(err.to_string().contains("ends before"));

    assert!(parse_srt("hello\n").is_err());
}

#[test]
fn oversized_hours_are_a_load_error() {
    let src = "1\n9999999999999999:00:00,000 --> 9999999999999999:00:01,000\nhi\n";
    let err = parse_srt(src).unwrap_err();
    assert!(matches!(err, BdnError::Load(_)));
    assert!(err.to_string().contains("line 2"));

    let huge = "99999999999999999999999:00:00,000 --> 99999999999999999999999:00:01,000\nhi\n";
    assert!(matches!(parse_srt(huge).unwrap_err(), BdnError::Load(_)));
}

#[test]
fn signed_fields_are_rejected() {
    for src in [
        "1\n-1:00:00,000 --> 00:00:01,000\nhi\n",
        "1\n00:-1:00,000 --> 00:00:01,000\nhi\n",
        "1\n00:00:00,000 --> +1:00:01,000\nhi\n",
        "1\n00:00:00,-10 --> 00:00:01,000\nhi\n",
    ] {
        let err = parse_srt(src).unwrap_err();
        assert!(matches!(err, BdnError::Load(_)), "{src:?}");
    }
}

#[test]
fn clock_parts_are_combined() {
    assert_eq!(parse_clock("0:00:01.00"), Some(1000));
    assert_eq!(parse_clock("1:02:03,4"), Some(3_723_400));
    assert_eq!(parse_clock("100:00:00,000"), Some(360_000_000));
    assert_eq!(parse_clock("00:60:00,000"), None);
    assert_eq!(parse_clock("00:00:00,1234"), None);
}
