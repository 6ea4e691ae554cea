use crate::error::Result;
use crate::segment::TimedSegment;

use std::io::{BufWriter, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Vtt,
    Srt,
    Json,
}

pub fn serialise<W: Write>(segs: &[TimedSegment], format: Format, output: W) -> Result<()> {
    let mut writer = BufWriter::new(output);
    match format {
        Format::Vtt => write_vtt(&mut writer, segs)?,
        Format::Srt => write_srt(&mut writer, segs)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, segs)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_vtt<W: Write>(buf: &mut W, segs: &[TimedSegment]) -> Result<()> {
    writeln!(buf, "WEBVTT")?;
    writeln!(buf)?;
    for seg in segs {
        write_ts(buf, seg.start_time, '.')?;
        write!(buf, " --> ")?;
        write_ts(buf, seg.end_time, '.')?;
        writeln!(buf)?;
        writeln!(buf, "{}", seg.text)?;
        writeln!(buf)?;
    }
    Ok(())
}

fn write_srt<W: Write>(buf: &mut W, segs: &[TimedSegment]) -> Result<()> {
    for (i, seg) in segs.iter().enumerate() {
        writeln!(buf, "{}", i + 1)?;
        write_ts(buf, seg.start_time, ',')?;
        write!(buf, " --> ")?;
        write_ts(buf, seg.end_time, ',')?;
        writeln!(buf)?;
        writeln!(buf, "{}", seg.text)?;
        writeln!(buf)?;
    }
    Ok(())
}

fn write_ts<W: Write>(buf: &mut W, seconds: f64, separator: char) -> Result<()> {
    // Negative and NaN offsets saturate to zero.
    let total_millis = (seconds * 1000.0).round() as u64;
    let total_secs = total_millis / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    let millis = total_millis % 1000;
    write!(
        buf,
        "{:02}:{:02}:{:02}{}{:03}",
        hours, minutes, secs, separator, millis
    )?;
    Ok(())
}
