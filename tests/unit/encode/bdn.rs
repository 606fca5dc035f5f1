use super::*;
use crate::encode::manifest::ManifestMeta;
use crate::foundation::core::CropRect;
use crate::session::timeline::SubtitleEvent;

fn render(m: &Manifest) -> String {
    let mut buf = Vec::new();
    write_bdn_xml(m, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn document_layout() {
    let events = [SubtitleEvent {
        index: 0,
        crop: CropRect {
            x1: 800,
            y1: 960,
            x2: 1119,
            y2: 1019,
        },
        start_ms: 1000,
        end_ms: 2008,
    }];
    let meta = ManifestMeta {
        track_name: "Main".to_owned(),
        language: "eng".to_owned(),
        ..ManifestMeta::default()
    };
    let xml = render(&Manifest::build(&events, meta).unwrap());

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<BDN Version=\"0.93\""));
    assert!(xml.contains("<Name Title=\"Main\" Content=\"\"/>"));
    assert!(xml.contains("<Language Code=\"eng\"/>"));
    assert!(xml.contains(
        "<Format VideoFormat=\"1080p\" FrameRate=\"23.976\" DropFrame=\"False\"/>"
    ));
    assert!(xml.contains(
        "<Events LastEventOutTC=\"00:00:02:01\" FirstEventInTC=\"00:00:01:00\" \
         ContentInTC=\"00:00:00:01\" ContentOutTC=\"00:00:02:01\" NumberofEvents=\"1\" Type=\"Graphic\"/>"
    ));
    assert!(xml.contains("<Event Forced=\"False\" InTC=\"00:00:01:00\" OutTC=\"00:00:02:01\">"));
    assert!(xml.contains(
        "<Graphic Width=\"320\" Height=\"60\" X=\"800\" Y=\"960\">00000000.png</Graphic>"
    ));
    assert!(xml.ends_with("  </Events>\n</BDN>\n"));
}

#[test]
fn empty_manifest_has_no_events() {
    let xml = render(&Manifest::build(&[], ManifestMeta::default()).unwrap());
    assert!(xml.contains("NumberofEvents=\"0\""));
    assert!(xml.contains("FirstEventInTC=\"00:00:00:01\""));
    assert!(!xml.contains("<Event "));
}

#[test]
fn metadata_is_escaped() {
    let meta = ManifestMeta {
        track_name: "Tom & \"Jerry\" <dub>".to_owned(),
        ..ManifestMeta::default()
    };
    let xml = render(&Manifest::build(&[], meta).unwrap());
    assert!(xml.contains("Title=\"Tom &amp; &quot;Jerry&quot; &lt;dub&gt;\""));
}

#[test]
fn unwritable_path_is_output_open() {
    let m = Manifest::build(&[], ManifestMeta::default()).unwrap();
    let path = std::path::Path::new("/nonexistent-bdnsub-dir/sub/bdn.xml");
    let err = write_bdn_xml_file(&m, path).unwrap_err();
    assert!(matches!(err, BdnError::OutputOpen(_)));
}
