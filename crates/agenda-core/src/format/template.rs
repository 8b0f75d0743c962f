//! Placeholder templates for event lines.
//!
//! A template is plain text with `{field}` placeholders. `{{` and `}}`
//! produce literal braces. Templates are parsed once; rendering looks each
//! placeholder up in a [`TemplateContext`].

use std::collections::BTreeMap;

use super::FormatError;

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// Named values available to a template.
pub type TemplateContext = BTreeMap<&'static str, String>;

impl Template {
    /// Parses a template string.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::TemplateParse`] on an unclosed `{`, a stray
    /// `}`, or a placeholder whose name is not an identifier.
    pub fn parse(source: &str) -> Result<Self, FormatError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if chars.peek().map(|&(_, n)| n) == Some('{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek().map(|&(_, n)| n) == Some('}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, n) in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(FormatError::template_parse(format!(
                            "unclosed placeholder starting at byte {}",
                            pos
                        )));
                    }
                    if !is_identifier(&name) {
                        return Err(FormatError::template_parse(format!(
                            "invalid placeholder name {:?} at byte {}",
                            name, pos
                        )));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(name));
                }
                '}' => {
                    return Err(FormatError::template_parse(format!(
                        "unmatched '}}' at byte {}",
                        pos
                    )));
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Returns the original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the placeholder names in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Renders the template against a context.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::TemplateRender`] if a placeholder has no value
    /// in `context`.
    pub fn render(&self, context: &TemplateContext) -> Result<String, FormatError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(name) => {
                    let value = context.get(name.as_str()).ok_or_else(|| {
                        FormatError::template_render(format!("undefined field '{}'", name))
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
