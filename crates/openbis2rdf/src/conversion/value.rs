//! Typed-literal inference for free-form property values.
//!
//! openBIS stores every property value as a string. [`classify`] decides
//! what the string actually holds so that measured quantities and free-form
//! commentary end up in different wrapper shapes ([`describe_value`]).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde_json::Value;

use crate::model::graph::{Graph, Literal, Node, Triple};
use crate::model::ontology::{oa, qudt, standard};

/// Semantic kind of a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Blank,
    Int,
    Float,
    Bool,
    Date,
    Text,
}

impl ValueKind {
    /// XSD datatype literals of this kind carry. `Blank` has none.
    pub fn datatype(self) -> Option<&'static str> {
        match self {
            ValueKind::Blank => None,
            ValueKind::Int => Some(standard::XSD_INTEGER),
            ValueKind::Float => Some(standard::XSD_DOUBLE),
            ValueKind::Bool => Some(standard::XSD_BOOLEAN),
            ValueKind::Date => Some(standard::XSD_DATE_TIME),
            ValueKind::Text => Some(standard::XSD_STRING),
        }
    }

    /// Whether values of this kind are wrapped as `qudt:QuantityValue`.
    pub fn is_quantity(self) -> bool {
        matches!(
            self,
            ValueKind::Int | ValueKind::Float | ValueKind::Bool | ValueKind::Date
        )
    }
}

/// A classified value with its normalized lexical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedValue {
    pub kind: ValueKind,
    pub lexical: String,
}

impl TypedValue {
    fn new(kind: ValueKind, lexical: impl Into<String>) -> Self {
        Self {
            kind,
            lexical: lexical.into(),
        }
    }

    /// The typed literal for this value; `None` for blanks.
    pub fn literal(&self) -> Option<Literal> {
        self.kind
            .datatype()
            .map(|dt| Literal::typed(self.lexical.clone(), dt))
    }
}

/// Outcome of reading a string as a literal.
enum LiteralParse {
    Bool(bool),
    Int(String),
    Float(f64),
    /// Literal-shaped, but not a number or boolean (quoted text, a bare word,
    /// a collection).
    Disallowed,
    /// Not literal-shaped at all.
    NotLiteral,
}

/// Classify a raw string. Total: every input yields exactly one kind.
pub fn classify(raw: &str) -> TypedValue {
    let trimmed = raw.trim();
    let normalized = trimmed.replace(',', ".");
    if normalized.is_empty() {
        return TypedValue::new(ValueKind::Blank, "");
    }
    match parse_literal(&normalized) {
        LiteralParse::Bool(b) => TypedValue::new(ValueKind::Bool, b.to_string()),
        LiteralParse::Int(digits) => TypedValue::new(ValueKind::Int, digits),
        LiteralParse::Float(f) => TypedValue::new(ValueKind::Float, f.to_string()),
        LiteralParse::Disallowed => TypedValue::new(ValueKind::Text, trimmed),
        LiteralParse::NotLiteral => match parse_date(trimmed) {
            Some(iso) => TypedValue::new(ValueKind::Date, iso),
            None => TypedValue::new(ValueKind::Text, trimmed),
        },
    }
}

/// Classify a JSON property value.
pub fn classify_json(value: &Value) -> TypedValue {
    match value {
        Value::Null => TypedValue::new(ValueKind::Blank, ""),
        Value::Bool(b) => TypedValue::new(ValueKind::Bool, b.to_string()),
        Value::Number(n) => classify(&n.to_string()),
        Value::String(s) => classify(s),
        Value::Array(_) | Value::Object(_) => TypedValue::new(ValueKind::Text, value.to_string()),
    }
}

/// Attach `value` to `subject` through `relation` via a wrapper node.
///
/// Quantities become `qudt:QuantityValue` nodes holding `qudt:value`; text
/// becomes an `oa:Annotation` holding `oa:hasLiteralBody`. Blank values add
/// nothing. Returns the wrapper node.
pub fn describe_value(
    graph: &mut Graph,
    subject: &Node,
    relation: &Node,
    value: &Value,
) -> Option<Node> {
    let typed = classify_json(value);
    let literal = typed.literal()?;
    let body = graph.fresh_blank();
    graph.insert(Triple::new(subject.clone(), relation.clone(), body.clone()));
    if typed.kind.is_quantity() {
        graph.add(body.clone(), standard::RDF_TYPE, Node::iri(qudt::QUANTITY_VALUE));
        graph.add(body.clone(), qudt::VALUE, literal);
    } else {
        graph.add(body.clone(), standard::RDF_TYPE, Node::iri(oa::ANNOTATION));
        graph.add(body.clone(), oa::HAS_LITERAL_BODY, literal);
    }
    Some(body)
}

fn parse_literal(s: &str) -> LiteralParse {
    if s.eq_ignore_ascii_case("true") {
        return LiteralParse::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return LiteralParse::Bool(false);
    }
    if let Some(int) = parse_int(s) {
        return LiteralParse::Int(int);
    }
    if let Some(float) = parse_float(s) {
        return LiteralParse::Float(float);
    }
    if is_quoted(s) || is_word(s) || is_collection(s) {
        return LiteralParse::Disallowed;
    }
    LiteralParse::NotLiteral
}

/// Integer literal: optional sign, decimal digits or a `0x`/`0o`/`0b`
/// prefixed body, `_` allowed between digits.
fn parse_int(s: &str) -> Option<String> {
    let (negative, body) = match *s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match body.get(..2) {
        Some("0x" | "0X") => (16, &body[2..]),
        Some("0o" | "0O") => (8, &body[2..]),
        Some("0b" | "0B") => (2, &body[2..]),
        _ => (10, body),
    };
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || !digits.chars().all(|c| c == '_' || c.is_digit(radix))
    {
        return None;
    }
    let clean: String = digits.chars().filter(|c| *c != '_').collect();
    match i128::from_str_radix(&clean, radix) {
        Ok(v) => Some((if negative { -v } else { v }).to_string()),
        // Too wide for i128 but well-formed: keep the decimal digits verbatim.
        Err(_) if radix == 10 => {
            let trimmed = clean.trim_start_matches('0');
            Some(format!("{}{}", if negative { "-" } else { "" }, trimmed))
        }
        Err(_) => None,
    }
}

fn parse_float(s: &str) -> Option<f64> {
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    let first = body.chars().next()?;
    if !(first.is_ascii_digit() || first == '.') || !body.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '_' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    let clean: String = s.chars().filter(|c| *c != '_').collect();
    clean.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn is_quoted(s: &str) -> bool {
    s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
}

fn is_word(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn is_collection(s: &str) -> bool {
    s.len() >= 2
        && ((s.starts_with('[') && s.ends_with(']'))
            || (s.starts_with('{') && s.ends_with('}'))
            || (s.starts_with('(') && s.ends_with(')')))
}

const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Permissive date parsing. Returns the ISO-8601 rendering on success.
pub fn parse_date(s: &str) -> Option<String> {
    // Every accepted layout carries a four-digit year.
    if !has_year(s) {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(iso_zoned(&dt));
    }
    for fmt in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(iso_zoned(&dt));
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(iso_naive(&ndt));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|ndt| iso_naive(&ndt));
        }
    }
    None
}

fn has_year(s: &str) -> bool {
    s.as_bytes()
        .split(|b| !b.is_ascii_digit())
        .any(|run| run.len() == 4)
}

/// `YYYY-MM-DDTHH:MM:SS`, with microseconds only when non-zero.
pub(crate) fn iso_naive(ndt: &NaiveDateTime) -> String {
    if ndt.nanosecond() == 0 {
        ndt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        ndt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn iso_zoned(dt: &DateTime<FixedOffset>) -> String {
    format!("{}{}", iso_naive(&dt.naive_local()), dt.format("%:z"))
}
