//! Declarative line layouts.
//!
//! A layout is a left-to-right list of segments. Anchors are matched but not
//! captured; fields are captured under their name. Layouts compile to a single
//! regular expression anchored at the start of the line, so a boundary fix
//! (lazy vs greedy, width, charset) only touches one segment.

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment {
    Anchor(&'static str),
    Field {
        name: &'static str,
        pattern: &'static str,
    },
}

pub(crate) const fn anchor(pattern: &'static str) -> Segment {
    Segment::Anchor(pattern)
}

pub(crate) const fn field(name: &'static str, pattern: &'static str) -> Segment {
    Segment::Field { name, pattern }
}

/// Regex source for a layout.
pub(crate) fn source(segments: &[Segment]) -> String {
    let mut out = String::from("^");
    for segment in segments {
        match segment {
            Segment::Anchor(p) => {
                out.push_str("(?:");
                out.push_str(p);
                out.push(')');
            }
            Segment::Field { name, pattern } => {
                out.push_str("(?P<");
                out.push_str(name);
                out.push('>');
                out.push_str(pattern);
                out.push(')');
            }
        }
    }
    out
}

pub(crate) fn compile(segments: &[Segment]) -> Result<Regex, regex::Error> {
    Regex::new(&source(segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &[Segment] = &[
        field("id", "[0-9]{3}"),
        anchor(r"\s+"),
        field("name", "[A-Z]+?"),
        anchor("$"),
    ];

    #[test]
    fn source_wraps_segments() {
        assert_eq!(source(LAYOUT), r"^(?P<id>[0-9]{3})(?:\s+)(?P<name>[A-Z]+?)(?:$)");
    }

    #[test]
    fn compiled_layout_captures_by_name() {
        let re = compile(LAYOUT).unwrap();
        let caps = re.captures("123   ABC").unwrap();
        assert_eq!(&caps["id"], "123");
        assert_eq!(&caps["name"], "ABC");
        assert!(re.captures("12 ABC").is_none());
    }

    #[test]
    fn layout_is_anchored_at_line_start() {
        let re = compile(LAYOUT).unwrap();
        assert!(re.captures("x123 ABC").is_none());
    }
}
