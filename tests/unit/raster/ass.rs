use super::*;

const HEADER: &str = "[Script Info]\nScriptType: v4.00+\nPlayResX: 1920\n\n[V4+ Styles]\nFormat: Name, Fontname, Fontsize\nStyle: Default,Arial,48\n\n";

#[test]
fn reads_dialogue_in_format_order() {
    let src = format!(
        "{HEADER}[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
         Comment: 0,0:00:00.00,0:00:05.00,Default,,0,0,0,,ignored\n\
         Dialogue: 0,0:00:01.00,0:00:02.50,Default,,0,0,0,,Hello, world\n\
         Dialogue: 0,1:00:00.10,1:00:01.00,Default,,0,0,0,,Late\n"
    );
    let track = parse_ass(&src).unwrap();
    assert_eq!(track.cues.len(), 2);
    assert_eq!(track.cues[0].start_ms, 1000);
    assert_eq!(track.cues[0].end_ms, 2500);
    assert_eq!(track.cues[0].lines, vec!["Hello, world"]);
    assert_eq!(track.cues[1].start_ms, 3_600_100);
}

#[test]
fn custom_column_order_is_honored() {
    let src = "[Events]\r\nFormat: Marked, End, Start, Style, Text\r\nDialogue: Marked=0,0:00:04.00,0:00:03.00,Default,SSA line\r\n";
    let track = parse_ass(src).unwrap();
    assert_eq!(track.cues[0].start_ms, 3000);
    assert_eq!(track.cues[0].end_ms, 4000);
    assert_eq!(track.cues[0].lines, vec!["SSA line"]);
}

#[test]
fn missing_format_uses_ass_default() {
    let src = "[Events]\nDialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Plain\n";
    assert_eq!(parse_ass(src).unwrap().cues[0].lines, vec!["Plain"]);
}

#[test]
fn text_breaks_and_overrides() {
    let src = format!(
        "{HEADER}[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
         Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,{{\\an8\\b1}}Top\\Nline{{\\b0}}\\ntwo\\hthree\n"
    );
    let track = parse_ass(&src).unwrap();
    assert_eq!(track.cues[0].lines, vec!["Top", "line", "two three"]);
}

#[test]
fn empty_and_zero_length_events_are_dropped() {
    let src = "[Events]\nFormat: Start, End, Text\n\
               Dialogue: 0:00:01.00,0:00:01.00,gone\n\
               Dialogue: 0:00:01.00,0:00:02.00,{\\pos(10,10)}\n";
    assert!(parse_ass(src).unwrap().is_empty());
}

#[test]
fn lines_outside_events_are_ignored() {
    let src = format!("{HEADER}Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,not an event\n");
    assert!(parse_ass(&src).unwrap().is_empty());
}

#[test]
fn malformed_events_are_load_errors() {
    let bad_time = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:xx.00,0:00:02.00,hi\n";
    let err = parse_ass(bad_time).unwrap_err();
    assert!(matches!(err, BdnError::Load(_)));
    assert!(err.to_string().contains("line 3"));

    let short = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:01.00\n";
    assert!(matches!(parse_ass(short).unwrap_err(), BdnError::Load(_)));

    let backwards = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:03.00,0:00:02.00,hi\n";
    assert!(parse_ass(backwards).unwrap_err().to_string().contains("ends before"));

    let no_text = "[Events]\nFormat: Start, End, Style\n";
    assert!(matches!(parse_ass(no_text).unwrap_err(), BdnError::Load(_)));

    let huge = "[Events]\nFormat: Start, End, Text\nDialogue: 99999999999999999:00:00.00,0:00:02.00,hi\n";
    assert!(matches!(parse_ass(huge).unwrap_err(), BdnError::Load(_)));
}
