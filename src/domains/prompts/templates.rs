//! Prompt templates and their renderer.
//!
//! Templates use a small mustache-like syntax:
//! - `{{name}}` is replaced by the argument value, or nothing when absent
//! - `{{#if name}}...{{/if}}` keeps its body only when `name` is set and non-empty
//! - `{{#if name}}...{{else}}...{{/if}}` picks one of two bodies
//!
//! Conditionals may nest. Argument values are inserted verbatim and never
//! re-interpreted as template syntax.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The template source.
    pub template: String,
}

#[derive(Debug)]
enum Segment<'a> {
    Text(&'a str),
    Var(&'a str),
    If {
        var: &'a str,
        then: Vec<Segment<'a>>,
        otherwise: Vec<Segment<'a>>,
    },
}

/// How a parsed block ended.
#[derive(Debug, PartialEq, Eq)]
enum Terminator {
    Eof,
    Else,
    EndIf,
}

impl PromptTemplate {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            arguments,
            template: template.into(),
        }
    }

    /// Render the template with the given arguments.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let mut rest = self.template.as_str();
        let (segments, terminator) = parse_block(&mut rest)?;

        match terminator {
            Terminator::Eof => {}
            Terminator::Else => return Err(PromptError::template("Unexpected {{else}} tag")),
            Terminator::EndIf => return Err(PromptError::template("Unexpected {{/if}} tag")),
        }

        let mut out = String::with_capacity(self.template.len());
        render_segments(&segments, arguments, &mut out);
        Ok(out)
    }
}

fn parse_block<'a>(rest: &mut &'a str) -> Result<(Vec<Segment<'a>>, Terminator), PromptError> {
    let mut segments = Vec::new();

    loop {
        let src: &'a str = rest;
        let Some(open) = src.find("{{") else {
            if !src.is_empty() {
                segments.push(Segment::Text(src));
            }
            *rest = "";
            return Ok((segments, Terminator::Eof));
        };

        if open > 0 {
            segments.push(Segment::Text(&src[..open]));
        }

        let after = &src[open + 2..];
        let close = after
            .find("}}")
            .ok_or_else(|| PromptError::template("Unclosed '{{' tag"))?;
        let tag = after[..close].trim();
        *rest = &after[close + 2..];

        if tag == "else" {
            return Ok((segments, Terminator::Else));
        }
        if tag == "/if" {
            return Ok((segments, Terminator::EndIf));
        }

        match tag.strip_prefix("#if ") {
            Some(var) => {
                let (then, terminator) = parse_block(rest)?;
                let otherwise = match terminator {
                    Terminator::EndIf => Vec::new(),
                    Terminator::Else => {
                        let (otherwise, terminator) = parse_block(rest)?;
                        if terminator != Terminator::EndIf {
                            return Err(PromptError::template("Missing {{/if}} tag"));
                        }
                        otherwise
                    }
                    Terminator::Eof => {
                        return Err(PromptError::template("Missing {{/if}} tag"));
                    }
                };
                segments.push(Segment::If {
                    var: var.trim(),
                    then,
                    otherwise,
                });
            }
            None => segments.push(Segment::Var(tag)),
        }
    }
}

fn render_segments(segments: &[Segment<'_>], arguments: &HashMap<String, String>, out: &mut String) {
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Var(name) => {
                if let Some(value) = arguments.get(*name) {
                    out.push_str(value);
                }
            }
            Segment::If {
                var,
                then,
                otherwise,
            } => {
                let is_set = arguments.get(*var).is_some_and(|v| !v.is_empty());
                let branch = if is_set { then } else { otherwise };
                render_segments(branch, arguments, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: &str, args: &[(&str, &str)]) -> Result<String, PromptError> {
        let args = args
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PromptTemplate::new("test", None, vec![], template).render(&args)
    }

    #[test]
    fn test_substitution() {
        assert_eq!(render("Deal {{deal_id}}.", &[("deal_id", "D-1")]).unwrap(), "Deal D-1.");
        assert_eq!(render("Deal {{deal_id}}.", &[]).unwrap(), "Deal .");
    }

    #[test]
    fn test_conditional() {
        let template = "Review{{#if focus}} with focus on {{focus}}{{/if}}.";
        assert_eq!(
            render(template, &[("focus", "pricing")]).unwrap(),
            "Review with focus on pricing."
        );
        assert_eq!(render(template, &[]).unwrap(), "Review.");
        assert_eq!(render(template, &[("focus", "")]).unwrap(), "Review.");
    }

    #[test]
    fn test_conditional_with_else() {
        let template = "For {{#if audience}}{{audience}}{{else}}the sales team{{/if}}.";
        assert_eq!(render(template, &[]).unwrap(), "For the sales team.");
        assert_eq!(
            render(template, &[("audience", "the CFO")]).unwrap(),
            "For the CFO."
        );
    }

    #[test]
    fn test_nested_conditionals() {
        let template = "{{#if a}}A{{#if b}}B{{else}}-{{/if}}{{else}}none{{/if}}";
        assert_eq!(render(template, &[("a", "1"), ("b", "1")]).unwrap(), "AB");
        assert_eq!(render(template, &[("a", "1")]).unwrap(), "A-");
        assert_eq!(render(template, &[("b", "1")]).unwrap(), "none");
    }

    #[test]
    fn test_values_are_not_reinterpreted() {
        assert_eq!(
            render("{{note}}", &[("note", "{{#if x}}")]).unwrap(),
            "{{#if x}}"
        );
    }

    #[test]
    fn test_malformed_templates() {
        assert!(render("{{#if a}}open", &[]).is_err());
        assert!(render("stray {{/if}}", &[]).is_err());
        assert!(render("stray {{else}}", &[]).is_err());
        assert!(render("unclosed {{tag", &[]).is_err());
    }
}
