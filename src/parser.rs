use crate::error::{Result, TranscueError};
use crate::segment::TimedSegment;

use std::iter;

use nom::bytes::complete::{tag, take_while_m_n};
use nom::combinator::{map_res, opt};
use nom::IResult;

const HMS_WIDTH: usize = 2;
const MILLIS_WIDTH: usize = 3;

/// Parses a transcript document into timed segments.
///
/// Only lines starting with a `(HH:MM:SS.mmm)` timestamp produce a segment;
/// everything else is ignored. The end of each segment is the start of the
/// next one, and the last segment ends at `total_duration`. The duration is
/// not checked here, see [`validate_duration`].
pub fn parse(input: &str, total_duration: f64) -> Vec<TimedSegment> {
    let input = optional_bom(input).map_or(input, |(rest, _)| rest);
    let starts: Vec<(f64, &str)> = input.lines().filter_map(segment_line).collect();

    let ends = starts
        .iter()
        .skip(1)
        .map(|(start, _)| *start)
        .chain(iter::once(total_duration));

    let segments: Vec<TimedSegment> = starts
        .iter()
        .zip(ends)
        .map(|(&(start_time, text), end_time)| TimedSegment {
            start_time,
            end_time,
            text: text.to_string(),
        })
        .collect();

    log::debug!(
        "Parsed {} segments from {} lines",
        segments.len(),
        input.lines().count()
    );
    segments
}

pub fn parse_optional(input: Option<&str>, total_duration: f64) -> Vec<TimedSegment> {
    input.map_or_else(Vec::new, |text| parse(text, total_duration))
}

/// Rejects durations the parser cannot use as the end of the last segment.
pub fn validate_duration(seconds: f64) -> Result<f64> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(TranscueError::InvalidDuration(seconds))
    }
}

fn optional_bom(input: &str) -> IResult<&str, Option<&str>> {
    opt(tag("\u{FEFF}"))(input)
}

fn segment_line(line: &str) -> Option<(f64, &str)> {
    match timestamp(line) {
        Ok((text, start)) => Some((start, text.trim())),
        Err(_) => {
            if line.starts_with('(') {
                log::debug!("Dropping line with malformed timestamp: '{}'", line);
            }
            None
        }
    }
}

fn timestamp(input: &str) -> IResult<&str, f64> {
    let (input, _) = tag("(")(input)?;
    let (input, hours) = fixed_digits(HMS_WIDTH)(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = fixed_digits(HMS_WIDTH)(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = fixed_digits(HMS_WIDTH)(input)?;
    let (input, _) = tag(".")(input)?;
    let (input, millis) = fixed_digits(MILLIS_WIDTH)(input)?;
    let (input, _) = tag(")")(input)?;

    let whole = hours * 3600 + minutes * 60 + seconds;
    Ok((input, whole as f64 + millis as f64 / 1000.0))
}

fn fixed_digits<'a>(width: usize) -> impl FnMut(&'a str) -> IResult<&'a str, u64> {
    map_res(
        take_while_m_n(width, width, |c: char| c.is_ascii_digit()),
        |s: &str| s.parse::<u64>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    macro_rules! test_timestamp {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected) = $value;

                let (_, seconds) = timestamp(input).unwrap();

                assert_relative_eq!(seconds, expected, epsilon = 1e-9);
            }
        )*
        }
    }

    test_timestamp! {
        test_timestamp_0: ("(00:00:00.000)", 0.0),
        test_timestamp_1: ("(00:00:01.000)", 1.0),
        test_timestamp_2: ("(00:00:03.500)", 3.5),
        test_timestamp_3: ("(00:00:01.002)", 1.002),
        test_timestamp_4: ("(00:01:00.000)", 60.0),
        test_timestamp_5: ("(01:01:01.200)", 3661.2),
        test_timestamp_6: ("(99:59:59.999)", 359_999.999),
    }

    macro_rules! test_bad_timestamp {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                assert!(timestamp($value).is_err());
            }
        )*
        }
    }

    test_bad_timestamp! {
        test_bad_timestamp_0: "(0:00:01.000)",
        test_bad_timestamp_1: "(00:00:01.00)",
        test_bad_timestamp_2: "(00:00:01.0000)",
        test_bad_timestamp_3: "(000:00:01.000)",
        test_bad_timestamp_4: "(00:00:01,000)",
        test_bad_timestamp_5: "00:00:01.000",
        test_bad_timestamp_6: "[00:00:01.000]",
        test_bad_timestamp_7: "(00:0a:01.000)",
        test_bad_timestamp_8: "",
    }

    #[test]
    fn test_two_segments() {
        let segs = parse("(00:00:01.000) Hello\n(00:00:03.500) world\n", 10.0);

        assert_eq!(
            segs,
            vec![
                TimedSegment {
                    start_time: 1.0,
                    end_time: 3.5,
                    text: "Hello".to_string(),
                },
                TimedSegment {
                    start_time: 3.5,
                    end_time: 10.0,
                    text: "world".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_leading_bom_is_skipped() {
        let segs = parse("\u{FEFF}(00:00:01.000) Hello\n(00:00:03.500) world\n", 10.0);

        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].start_time, 1.0);
        assert_eq!(segs[0].text, "Hello");
        assert_eq!(segs[0].end_time, 3.5);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("", 10.0).is_empty());
        assert!(parse_optional(None, 10.0).is_empty());
        assert!(parse("# Transcript\n\nNo timestamps here.\n", 10.0).is_empty());
    }

    #[test]
    fn test_noise_is_ignored() {
        let input = "Note: intro\n(00:00:02.000) Only line\n";

        let segs = parse(input, 5.0);

        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].text, "Only line");
        assert_eq!(segs[0].start_time, 2.0);
        assert_eq!(segs[0].end_time, 5.0);
    }

    #[test]
    fn test_malformed_timestamp_is_dropped() {
        let input = "\
## Transcript
(00:00:01.000) First
(0:00:02.000) Short hours
(00:00:03.00) Short millis
 (00:00:04.000) Indented
(00:00:05.000) Second
";

        let segs = parse(input, 8.0);

        let texts: Vec<&str> = segs.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second"]);
        assert_eq!(segs[0].end_time, 5.0);
    }

    #[test]
    fn test_empty_text_is_kept() {
        let segs = parse("(00:00:01.000)\n(00:00:02.000)   \n", 3.0);

        assert_eq!(segs.len(), 2);
        assert!(segs.iter().all(|s| s.text.is_empty()));
    }

    #[test]
    fn test_text_is_verbatim() {
        let segs = parse(
            "(00:00:01.000)   [laughs] well, f*** that  \r\n(00:00:02.000)\t[BEEP] ok\n(00:00:03.000)Hello\n",
            4.0,
        );

        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].text, "[laughs] well, f*** that");
        assert_eq!(segs[1].text, "[BEEP] ok");
        assert_eq!(segs[2].text, "Hello");
        assert_eq!(segs[2].start_time, 3.0);
    }

    #[test]
    fn test_no_sorting() {
        let segs = parse("(00:00:05.000) late\n(00:00:01.000) early\n", 9.0);

        assert_eq!(segs[0].start_time, 5.0);
        assert_eq!(segs[0].end_time, 1.0);
        assert_eq!(segs[1].end_time, 9.0);
    }

    #[test]
    fn test_end_time_chain() {
        let input: String = (0..20)
            .map(|i| format!("(00:00:{:02}.250) line {}\n", i * 2, i))
            .collect();

        let segs = parse(&input, 60.0);

        assert_eq!(segs.len(), 20);
        for pair in segs.windows(2) {
            assert_eq!(pair[0].end_time, pair[1].start_time);
        }
        assert_eq!(segs.last().unwrap().end_time, 60.0);
        assert_eq!(segs, parse(&input, 60.0));
    }

    #[test]
    fn test_validate_duration() {
        assert_eq!(validate_duration(12.5).unwrap(), 12.5);
        assert!(validate_duration(0.0).is_err());
        assert!(validate_duration(-1.0).is_err());
        assert!(validate_duration(f64::NAN).is_err());
        assert!(validate_duration(f64::INFINITY).is_err());
    }
}
