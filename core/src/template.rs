//! Positional URL templates.
//!
//! A template is a string where each `%s` (or `%v`, which formats a string
//! the same way) takes the next argument in order and `%%` stands for a
//! literal `%`. Any other `%` sequence is rejected when the template is
//! parsed, and rendering checks that the argument count matches the slot
//! count exactly.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unsupported verb %{verb} at byte {position}")]
    UnsupportedVerb { verb: char, position: usize },

    #[error("dangling % at end of template")]
    DanglingPercent,

    #[error("template has {found} %s slots, expected {expected}")]
    SlotCount { expected: usize, found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    segments: Vec<Segment>,
}

impl UrlTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices();

        while let Some((_, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            match chars.next() {
                Some((_, '%')) => literal.push('%'),
                Some((_, 's' | 'v')) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot);
                }
                Some((position, verb)) => {
                    return Err(TemplateError::UnsupportedVerb { verb, position });
                }
                None => return Err(TemplateError::DanglingPercent),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    pub fn slots(&self) -> usize {
        self.segments.iter().filter(|s| matches!(s, Segment::Slot)).count()
    }

    /// Fill every slot in order. `args` must have exactly one entry per slot.
    pub fn render(&self, args: &[&str]) -> Result<String, TemplateError> {
        let found = self.slots();
        if found != args.len() {
            return Err(TemplateError::SlotCount {
                expected: args.len(),
                found,
            });
        }
        let mut out = String::new();
        let mut args = args.iter();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                // Slot count was checked above.
                Segment::Slot => out.push_str(args.next().copied().unwrap_or_default()),
            }
        }
        Ok(out)
    }
}
