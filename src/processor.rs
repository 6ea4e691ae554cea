use crate::error::Result;
use crate::segment::TimedSegment;

use regex::Regex;

#[derive(Debug, Default, Clone)]
pub struct ProcessOpts {
    pub strip_annotations: bool,
    pub drop_empty: bool,
}

/// Prepares parsed segments for export as cues. Timing is left untouched.
pub fn process(segs: Vec<TimedSegment>, opts: &ProcessOpts) -> Result<Vec<TimedSegment>> {
    let segs = if opts.strip_annotations {
        strip_annotations(segs)?
    } else {
        segs
    };
    if opts.drop_empty {
        Ok(drop_empty(segs))
    } else {
        Ok(segs)
    }
}

fn strip_annotations(segs: Vec<TimedSegment>) -> Result<Vec<TimedSegment>> {
    let annotation = Regex::new(r"\[[^\]]*\]")?;
    let spaces = Regex::new(r"\s{2,}")?;

    let stripped = segs
        .into_iter()
        .map(|mut seg| {
            if annotation.is_match(&seg.text) {
                let text = {
                    let stripped = annotation.replace_all(&seg.text, "");
                    spaces.replace_all(&stripped, " ").trim().to_string()
                };
                log::debug!("Stripped annotations: '{}' -> '{}'", seg.text, text);
                seg.text = text;
            }
            seg
        })
        .collect();
    Ok(stripped)
}

fn drop_empty(segs: Vec<TimedSegment>) -> Vec<TimedSegment> {
    let before = segs.len();
    let kept: Vec<TimedSegment> = segs.into_iter().filter(|s| !s.text.is_empty()).collect();
    if kept.len() < before {
        log::info!("Dropped {} segments without text", before - kept.len());
    }
    kept
}
