//! Parser for the layout format.

use super::ast::*;
use crate::circuit::TerminalId;
use crate::error::{CircuitError, Result};

/// Line-oriented parser for layout descriptions.
pub struct Parser<'a> {
    input: &'a str,
    layout: Layout,
    grid_line: Option<usize>,
}

impl<'a> Parser<'a> {
    /// Create a parser over the given text.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            layout: Layout::new(),
            grid_line: None,
        }
    }

    /// Parse the entire layout description.
    pub fn parse(mut self) -> Result<Layout> {
        for (idx, raw) in self.input.lines().enumerate() {
            let line = idx + 1;
            let tokens: Vec<&str> = strip_comment(raw).split_whitespace().collect();
            let Some((&head, args)) = tokens.split_first() else {
                continue;
            };

            if head.starts_with('.') {
                self.parse_directive(head, args, line)?;
            } else {
                let component = parse_component(head, args, line)?;
                self.layout.components.push(component);
            }
        }

        Ok(self.layout)
    }

    fn parse_directive(&mut self, directive: &str, args: &[&str], line: usize) -> Result<()> {
        match directive.to_ascii_lowercase().as_str() {
            ".grid" => {
                if let Some(previous) = self.grid_line {
                    return Err(CircuitError::parse(
                        line,
                        format!("grid already set on line {previous}"),
                    ));
                }
                if !self.layout.components.is_empty() {
                    return Err(CircuitError::parse(
                        line,
                        ".grid must come before any component",
                    ));
                }
                let [rows, cols] = args else {
                    return Err(CircuitError::parse(line, "expected: .grid <rows> <cols>"));
                };
                let rows = parse_count(rows, line)?;
                let cols = parse_count(cols, line)?;
                self.layout.rows = rows;
                self.layout.cols = cols;
                self.grid_line = Some(line);
                Ok(())
            }
            other => Err(CircuitError::parse(line, format!("unknown directive '{other}'"))),
        }
    }
}

/// Drop everything from the first `#` or `;`.
fn strip_comment(raw: &str) -> &str {
    match raw.find(['#', ';']) {
        Some(pos) => &raw[..pos],
        None => raw,
    }
}

fn parse_count(text: &str, line: usize) -> Result<usize> {
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CircuitError::parse(
            line,
            format!("grid size must be a positive integer, got '{text}'"),
        )),
    }
}

fn parse_component(head: &str, args: &[&str], line: usize) -> Result<ComponentDef> {
    let component_type = ComponentType::from_keyword(head)
        .ok_or_else(|| CircuitError::parse(line, format!("unknown component type '{head}'")))?;

    let (ends, rest) = match args {
        [a, b, rest @ ..] => ([parse_terminal(a, line)?, parse_terminal(b, line)?], rest),
        _ => {
            return Err(CircuitError::parse(
                line,
                "component needs two terminals written as row,col",
            ))
        }
    };

    let mut def = ComponentDef {
        component_type,
        ends,
        value: None,
        positive_end: None,
        line,
    };

    match (component_type, rest) {
        (ComponentType::Wire, []) => {}
        (ComponentType::Resistor, [value]) => {
            def.value = Some(parse_number(value, line)?);
        }
        (ComponentType::Battery, [value]) => {
            def.value = Some(parse_number(value, line)?);
        }
        (ComponentType::Battery, [value, positive]) => {
            def.value = Some(parse_number(value, line)?);
            let Some(pos) = positive.strip_prefix('+') else {
                return Err(CircuitError::parse(
                    line,
                    format!("positive end must be written +row,col, got '{positive}'"),
                ));
            };
            def.positive_end = Some(parse_terminal(pos, line)?);
        }
        (ComponentType::Wire, _) => {
            return Err(CircuitError::parse(line, "a wire takes no value"));
        }
        (ComponentType::Resistor, _) => {
            return Err(CircuitError::parse(line, "expected: R <r,c> <r,c> <ohms>"));
        }
        (ComponentType::Battery, _) => {
            return Err(CircuitError::parse(
                line,
                "expected: B <r,c> <r,c> <volts> [+<r,c>]",
            ));
        }
    }

    Ok(def)
}

/// Parse a terminal written as `row,col`.
fn parse_terminal(text: &str, line: usize) -> Result<TerminalId> {
    let bad = || CircuitError::parse(line, format!("expected terminal row,col, got '{text}'"));
    let (row, col) = text.split_once(',').ok_or_else(bad)?;
    let row = row.trim().parse::<usize>().map_err(|_| bad())?;
    let col = col.trim().parse::<usize>().map_err(|_| bad())?;
    Ok(TerminalId::new(row, col))
}

fn parse_number(text: &str, line: usize) -> Result<f64> {
    parse_value(text)
        .ok_or_else(|| CircuitError::parse(line, format!("invalid number '{text}'")))
}

/// Parse a number string with optional unit suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(last) = text.chars().last() {
        let mult = match last {
            'p' => 1e-12,
            'n' => 1e-9,
            'u' | 'µ' => 1e-6,
            'm' => 1e-3,
            'k' | 'K' => 1e3,
            'M' => 1e6,
            'G' => 1e9,
            _ => 1.0,
        };
        if mult != 1.0 {
            (&text[..text.len() - last.len_utf8()], mult)
        } else {
            (text, 1.0)
        }
    } else {
        (text, 1.0)
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}
