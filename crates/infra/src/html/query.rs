//! XPath-like path expressions
//!
//! Supported subset:
//! - `/a/b`, `//a`, `./a`, `.//a` and bare relative `a/b`
//! - name tests (case-insensitive) and `*`
//! - predicates: `[2]`, `[@id]`, `[@id='x']`, `[contains(@class,'x')]`,
//!   `[td]` (has a `td` child)
//!
//! Positions count among the matching children of the same parent, as in
//! XPath, so `//tr/td[1]` is the first cell of every row.

use super::tree::{HtmlDocument, NodeId};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, map, map_res, opt, value},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use venue_core::domain::document::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTest {
    Any,
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Position(usize),
    HasAttr(String),
    AttrEquals(String, String),
    AttrContains(String, String),
    HasChild(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub axis: Axis,
    pub test: NameTest,
    pub predicates: Vec<Predicate>,
}

/// A parsed path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub absolute: bool,
    pub steps: Vec<Step>,
}

// =============================================================================
// PARSER
// =============================================================================

fn ws<'a, O>(
    inner: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(multispace0, inner, multispace0)
}

fn name(input: &str) -> IResult<&str, String> {
    map(
        take_while1(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':')),
        |s: &str| s.to_ascii_lowercase(),
    )(input)
}

/// 'text' or "text"
fn quoted(input: &str) -> IResult<&str, String> {
    map(
        alt((
            delimited(char('\''), take_until("'"), char('\'')),
            delimited(char('"'), take_until("\""), char('"')),
        )),
        str::to_string,
    )(input)
}

fn position(input: &str) -> IResult<&str, Predicate> {
    map(map_res(digit1, str::parse::<usize>), Predicate::Position)(input)
}

fn attribute(input: &str) -> IResult<&str, Predicate> {
    map(
        pair(preceded(char('@'), name), opt(preceded(ws(char('=')), quoted))),
        |(key, value)| match value {
            Some(value) => Predicate::AttrEquals(key, value),
            None => Predicate::HasAttr(key),
        },
    )(input)
}

fn contains(input: &str) -> IResult<&str, Predicate> {
    map(
        tuple((
            tag("contains"),
            ws(char('(')),
            preceded(char('@'), name),
            ws(char(',')),
            quoted,
            ws(char(')')),
        )),
        |(_, _, key, _, needle, _)| Predicate::AttrContains(key, needle),
    )(input)
}

fn predicate(input: &str) -> IResult<&str, Predicate> {
    delimited(
        char('['),
        ws(alt((position, attribute, contains, map(name, Predicate::HasChild)))),
        char(']'),
    )(input)
}

fn name_test(input: &str) -> IResult<&str, NameTest> {
    alt((value(NameTest::Any, char('*')), map(name, NameTest::Name)))(input)
}

fn step(axis: Axis) -> impl FnMut(&str) -> IResult<&str, Step> {
    move |input| {
        map(pair(name_test, many0(predicate)), |(test, predicates)| Step {
            axis,
            test,
            predicates,
        })(input)
    }
}

fn separator(input: &str) -> IResult<&str, Axis> {
    alt((
        value(Axis::Descendant, tag("//")),
        value(Axis::Child, tag("/")),
    ))(input)
}

/// Leading `//`, `/`, `.//`, `./` or nothing
fn anchor(input: &str) -> IResult<&str, (bool, Axis)> {
    map(
        opt(alt((
            value((true, Axis::Descendant), tag("//")),
            value((true, Axis::Child), tag("/")),
            value((false, Axis::Descendant), tag(".//")),
            value((false, Axis::Child), tag("./")),
        ))),
        |anchor| anchor.unwrap_or((false, Axis::Child)),
    )(input)
}

fn path(input: &str) -> IResult<&str, Path> {
    let (input, (absolute, first_axis)) = anchor(input)?;
    let (input, first) = step(first_axis)(input)?;
    let (input, rest) = many0(|i| {
        let (i, axis) = separator(i)?;
        step(axis)(i)
    })(input)?;

    let mut steps = Vec::with_capacity(rest.len() + 1);
    steps.push(first);
    steps.extend(rest);
    Ok((input, Path { absolute, steps }))
}

impl Path {
    pub fn parse(expression: &str) -> Result<Self, QueryError> {
        all_consuming(path)(expression.trim())
            .map(|(_, path)| path)
            .map_err(|e| QueryError::new(expression, e.to_string()))
    }

    /// Matching nodes in document order, without duplicates
    pub fn evaluate(&self, doc: &HtmlDocument, context: NodeId) -> Vec<NodeId> {
        use venue_core::domain::document::Document;

        let mut current = vec![if self.absolute { doc.root() } else { context }];
        for step in &self.steps {
            let mut next = Vec::new();
            for &node in &current {
                next.extend(step.apply(doc, node));
            }
            next.sort_unstable();
            next.dedup();
            current = next;
        }
        current
    }
}

// =============================================================================
// EVALUATION
// =============================================================================

impl NameTest {
    fn matches(&self, doc: &HtmlDocument, node: NodeId) -> bool {
        match (self, doc.name(node)) {
            (NameTest::Any, Some(_)) => true,
            (NameTest::Name(want), Some(name)) => want == name,
            _ => false,
        }
    }
}

impl Predicate {
    fn matches(&self, doc: &HtmlDocument, node: NodeId) -> bool {
        match self {
            Predicate::Position(_) => true,
            Predicate::HasAttr(key) => doc.attr(node, key).is_some(),
            Predicate::AttrEquals(key, want) => doc.attr(node, key) == Some(want.as_str()),
            Predicate::AttrContains(key, needle) => doc
                .attr(node, key)
                .is_some_and(|value| value.contains(needle.as_str())),
            Predicate::HasChild(child) => doc
                .child_elements(node)
                .any(|c| doc.name(c) == Some(child.as_str())),
        }
    }
}

impl Step {
    /// Filter one parent's matching children through the predicates
    fn filter_children(&self, doc: &HtmlDocument, parent: NodeId) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = doc
            .child_elements(parent)
            .filter(|&c| self.test.matches(doc, c))
            .collect();
        for predicate in &self.predicates {
            nodes = match predicate {
                Predicate::Position(n) => nodes
                    .get(n.wrapping_sub(1))
                    .copied()
                    .into_iter()
                    .collect(),
                other => nodes.into_iter().filter(|&c| other.matches(doc, c)).collect(),
            };
        }
        nodes
    }

    fn apply(&self, doc: &HtmlDocument, node: NodeId) -> Vec<NodeId> {
        match self.axis {
            Axis::Child => self.filter_children(doc, node),
            Axis::Descendant => doc
                .self_and_descendants(node)
                .into_iter()
                .flat_map(|parent| self.filter_children(doc, parent))
                .collect(),
        }
    }
}
