//! Text profile formats.
//!
//! Input profiles, one entry per line:
//!
//! ```text
//! # label : (r, g, b) : value
//! Hot     : (210, 60, 80)    : 31
//! Ocean   : (107, 165, 210)  : X
//! Default : X
//! ```
//!
//! `X` adds the color to the ignore set. A `Default` line sets the fallback
//! for unmapped colors: `X` ignores them, a number decodes them to that value.
//!
//! Output profiles map a class key to a color, `key : (r, g, b)`. Keys
//! `Ocean`/`Ignored` and `Unknown` set the reserved colors.
//!
//! Blank lines and lines starting with `#` are skipped everywhere.

use crate::classify::Mode;
use crate::color::Color;
use crate::error::{Error, Result};

use super::{DefaultPolicy, InputColorProfile, OutputColorProfile};

const DEFAULT_LABEL: &str = "Default";

/// Value markers that put a color in the ignore set. `O` is the legacy ocean marker.
const IGNORE_MARKERS: [&str; 2] = ["X", "O"];

/// Numbered lines that carry an entry.
fn entries(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Parse `(r, g, b)`. `None` when the text is not shaped like a triple.
fn parse_color(s: &str) -> Option<Result<Color>> {
    let inner = s.trim().strip_prefix('(')?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim().parse::<i64>());
    let (r, g, b) = match (parts.next()?, parts.next()?, parts.next()?, parts.next()) {
        (Ok(r), Ok(g), Ok(b), None) => (r, g, b),
        _ => return None,
    };
    Some(Color::from_channels(r, g, b))
}

enum InputValue {
    Ignore,
    Value(f64),
}

fn parse_value(s: &str, line_no: usize) -> Result<InputValue> {
    let s = s.trim();
    if IGNORE_MARKERS.contains(&s) {
        return Ok(InputValue::Ignore);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(InputValue::Value(v)),
        _ => Err(Error::InvalidProfileValue { line_no, value: s.to_string() }),
    }
}

pub fn parse_input_profile(text: &str) -> Result<InputColorProfile> {
    let mut b = InputColorProfile::builder();
    for (line_no, line) in entries(text) {
        let invalid = || Error::InvalidProfileLine { line_no, line: line.to_string() };
        let fields: Vec<&str> = line.splitn(3, ':').collect();
        let label = fields[0].trim();

        if label == DEFAULT_LABEL && fields.len() >= 2 {
            let raw = fields[fields.len() - 1];
            let policy = match parse_value(raw, line_no)? {
                InputValue::Ignore => DefaultPolicy::IgnoreUnmapped,
                InputValue::Value(v) => DefaultPolicy::Value(v),
            };
            b.set_default(policy);
            continue;
        }

        if fields.len() != 3 {
            return Err(invalid());
        }
        let color = parse_color(fields[1]).ok_or_else(invalid)??;
        match parse_value(fields[2], line_no)? {
            InputValue::Ignore => b.insert_ignored(color),
            InputValue::Value(v) => b.insert_value(color, v),
        };
    }
    Ok(b.build())
}

/// Parse an output profile and validate every key against `mode`'s taxonomy.
pub fn parse_output_profile(text: &str, mode: Mode) -> Result<OutputColorProfile> {
    let mut b = OutputColorProfile::builder(mode);
    for (line_no, line) in entries(text) {
        let invalid = || Error::InvalidProfileLine { line_no, line: line.to_string() };
        let (key, color) = line.split_once(':').ok_or_else(invalid)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(invalid());
        }
        let color = parse_color(color).ok_or_else(invalid)??;
        b.insert(key, color)?;
    }
    Ok(b.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileWarning;

    const INPUT: &str = "\
# Temperature legend
Hot     : (210, 60, 80)   : 31
Mild    : (255,225,140)   : 14.5
Cold    : ( 95, 80, 160 ) : -40

Ocean   : (107, 165, 210) : X
";

    #[test]
    fn parses_values_and_ignored_colors() {
        let p = parse_input_profile(INPUT).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.value_of(Color::new(255, 225, 140)).unwrap(), Some(14.5));
        assert_eq!(p.value_of(Color::new(95, 80, 160)).unwrap(), Some(-40.0));
        assert!(p.is_ignored(Color::new(107, 165, 210)));
        assert_eq!(p.default_policy(), DefaultPolicy::None);
    }

    #[test]
    fn default_line_sets_policy() {
        let p = parse_input_profile(&format!("{INPUT}Default : X\n")).unwrap();
        assert_eq!(p.default_policy(), DefaultPolicy::IgnoreUnmapped);
        let p = parse_input_profile(&format!("{INPUT}Default : (0, 0, 0) : 7.5\n")).unwrap();
        assert_eq!(p.default_policy(), DefaultPolicy::Value(7.5));
    }

    #[test]
    fn legacy_ocean_marker_is_ignore() {
        let p = parse_input_profile("Sea : (1, 2, 3) : O").unwrap();
        assert!(p.is_ignored(Color::new(1, 2, 3)));
    }

    #[test]
    fn out_of_range_channel_is_fatal() {
        let err = parse_input_profile("Bad : (256, 0, 0) : 3").unwrap_err();
        assert_eq!(err, Error::InvalidChannelValue { value: 256 });
    }

    #[test]
    fn malformed_lines_report_line_number() {
        let err = parse_input_profile("# c\nHot : 210, 60, 80 : 31").unwrap_err();
        assert!(matches!(err, Error::InvalidProfileLine { line_no: 2, .. }));
        let err = parse_input_profile("Hot : (1, 2) : 31").unwrap_err();
        assert!(matches!(err, Error::InvalidProfileLine { line_no: 1, .. }));
        let err = parse_input_profile("Hot : (1, 2, 3) : warm").unwrap_err();
        assert_eq!(err, Error::InvalidProfileValue { line_no: 1, value: "warm".into() });
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for raw in ["nan", "NaN", "inf", "-inf", "infinity"] {
            let err = parse_input_profile(&format!("Hot : (1, 2, 3) : 31\nOdd : (4, 5, 6) : {raw}"))
                .unwrap_err();
            assert_eq!(
                err,
                Error::InvalidProfileValue { line_no: 2, value: raw.into() },
                "{raw} should not decode"
            );
        }
        let err = parse_input_profile("Default : nan").unwrap_err();
        assert_eq!(err, Error::InvalidProfileValue { line_no: 1, value: "nan".into() });
    }

    #[test]
    fn duplicate_input_color_warns() {
        let p = parse_input_profile("A : (1, 2, 3) : 4\nB : (1, 2, 3) : 5").unwrap();
        assert_eq!(p.value_of(Color::new(1, 2, 3)).unwrap(), Some(5.0));
        assert_eq!(p.warnings(), &[ProfileWarning::DuplicateColor(Color::new(1, 2, 3))]);
    }

    #[test]
    fn parses_output_profile_with_reserved_keys() {
        let text = "\
Af      : (11, 36, 250)
Ocean   : (0, 0, 255)
Unknown : (255, 0, 255)
";
        let p = parse_output_profile(text, Mode::Koppen).unwrap();
        assert_eq!(p.color_of("Af"), Some(Color::new(11, 36, 250)));
        assert_eq!(p.ignored_color(), Color::new(0, 0, 255));
        assert_eq!(p.unknown_color(), Color::new(255, 0, 255));
        assert_eq!(p.codes().count(), 1);
    }

    #[test]
    fn output_keys_may_contain_spaces() {
        let p = parse_output_profile("Tropical moist forest : (1, 2, 3)", Mode::Holdridge).unwrap();
        assert_eq!(p.color_of("Tropical moist forest"), Some(Color::new(1, 2, 3)));
    }

    #[test]
    fn output_profile_rejects_foreign_taxonomy() {
        let err = parse_output_profile("Boreal desert : (1, 2, 3)", Mode::Koppen).unwrap_err();
        assert!(matches!(err, Error::InvalidClassKey { mode: Mode::Koppen, .. }));
        let err = parse_output_profile("Af (1, 2, 3)", Mode::Koppen).unwrap_err();
        assert!(matches!(err, Error::InvalidProfileLine { line_no: 1, .. }));
    }
}
