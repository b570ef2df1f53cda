//! Parses the text form of a pattern.
//!
//! The text form is what `Pattern` renders through `Display`:
//! `name=value, name=value`. Whitespace around names and values is ignored,
//! names stop at `=`, `,` or whitespace, and values run until the next `,`.
use crate::pattern::Pattern;
use crate::PatternError;
use nom::types::CompleteStr;

#[inline]
fn is_name_char(c: char) -> bool {
    c != '=' && c != ',' && !c.is_whitespace()
}

#[inline]
fn is_value_char(c: char) -> bool {
    c != ','
}

#[inline]
fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

named!(
    constraint<CompleteStr, (CompleteStr, CompleteStr)>,
    do_parse!(
        take_while!(is_space) >>
        name: take_while1!(is_name_char) >>
        take_while!(is_space) >>
        char!('=') >>
        value: take_while!(is_value_char) >>
        (name, value)
    )
);

named!(
    constraint_list<CompleteStr, Vec<(CompleteStr, CompleteStr)>>,
    separated_list!(char!(','), constraint)
);

/// Parse `name=value, name=value` into a pattern.
/// Later constraints on the same name win.
pub(crate) fn parse_pattern(text: &str) -> Result<Pattern, PatternError> {
    let (rest, constraints) = match constraint_list(CompleteStr(text)) {
        Ok(parsed) => parsed,
        Err(e) => return Err(PatternError::Syntax(format!("{:?}", e))),
    };

    if !rest.0.trim().is_empty() {
        return Err(PatternError::TrailingInput(rest.0.to_string()));
    }

    let mut pattern = Pattern::new();
    for (name, value) in constraints {
        pattern.insert(name.0, value.0.trim());
    }
    debug!("Parsed {:?} as {:?}", text, pattern);

    Ok(pattern)
}
