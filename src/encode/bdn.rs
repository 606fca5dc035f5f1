use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context as _;

use crate::encode::manifest::Manifest;
use crate::foundation::error::{BdnError, BdnResult};
use crate::foundation::xml::escape_xml;

/// Conventional manifest file name.
pub const BDN_FILE_NAME: &str = "bdn.xml";

const BDN_HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<BDN Version=\"0.93\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" ",
    "xsi:noNamespaceSchemaLocation=\"BD-03-006-0093b BDN File Format.xsd\">\n",
);

/// Serialize `manifest` as a BDN 0.93 document.
pub fn write_bdn_xml<W: Write>(manifest: &Manifest, out: &mut W) -> BdnResult<()> {
    write_document(manifest, out)
        .context("write bdn xml")
        .map_err(BdnError::from)
}

/// Create `path` and write the BDN document into it.
///
/// Failure to create the file is [`BdnError::OutputOpen`].
pub fn write_bdn_xml_file(manifest: &Manifest, path: &Path) -> BdnResult<()> {
    let file = File::create(path)
        .with_context(|| format!("create '{}'", path.display()))
        .map_err(|e| BdnError::output_open(format!("{e:#}")))?;
    let mut out = BufWriter::new(file);
    write_bdn_xml(manifest, &mut out)?;
    out.flush()
        .with_context(|| format!("flush '{}'", path.display()))
        .map_err(BdnError::from)
}

fn write_document<W: Write>(m: &Manifest, out: &mut W) -> std::io::Result<()> {
    out.write_all(BDN_HEADER.as_bytes())?;
    writeln!(out, "  <Description>")?;
    writeln!(
        out,
        "    <Name Title=\"{}\" Content=\"\"/>",
        escape_xml(&m.track_name)
    )?;
    writeln!(out, "    <Language Code=\"{}\"/>", escape_xml(&m.language))?;
    writeln!(
        out,
        "    <Format VideoFormat=\"{}\" FrameRate=\"{}\" DropFrame=\"False\"/>",
        m.video_format, m.frame_rate
    )?;
    writeln!(
        out,
        "    <Events LastEventOutTC=\"{}\" FirstEventInTC=\"{}\" ContentInTC=\"{}\" ContentOutTC=\"{}\" NumberofEvents=\"{}\" Type=\"Graphic\"/>",
        m.last_out_tc,
        m.first_in_tc,
        m.content_in_tc,
        m.last_out_tc,
        m.event_count()
    )?;
    writeln!(out, "  </Description>")?;
    writeln!(out, "  <Events>")?;
    for ev in &m.events {
        writeln!(
            out,
            "    <Event Forced=\"False\" InTC=\"{}\" OutTC=\"{}\">",
            ev.in_tc, ev.out_tc
        )?;
        writeln!(
            out,
            "      <Graphic Width=\"{}\" Height=\"{}\" X=\"{}\" Y=\"{}\">{}</Graphic>",
            ev.width,
            ev.height,
            ev.x,
            ev.y,
            escape_xml(&ev.file_name)
        )?;
        writeln!(out, "    </Event>")?;
    }
    writeln!(out, "  </Events>")?;
    writeln!(out, "</BDN>")?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/bdn.rs"]
mod tests;
