//! Reading `label,x,y` point lists into millimeter [`Point`]s.

use std::collections::HashMap;

use miette::{NamedSource, SourceSpan};
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::errors::IngestError;
use crate::log::debug;
use crate::types::{Point, Unit};

#[derive(Parser)]
#[grammar = "points.pest"]
struct PointsParser;

fn span_of(pair: &Pair<'_, Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

/// Parse a point list declared in `unit`, converting positions to mm.
///
/// `name` only labels the source in diagnostics. Rejects syntax errors,
/// non-finite numbers, repeated labels and lists without any point.
pub fn parse_points(name: &str, text: &str, unit: Unit) -> Result<Vec<Point>, IngestError> {
    let source = || NamedSource::new(name, text.to_string());

    let mut pairs = PointsParser::parse(Rule::points, text).map_err(|e| {
        debug!(name, error = %e, "point list syntax error");
        let span: SourceSpan = match e.location {
            InputLocation::Pos(p) => (p, 0).into(),
            InputLocation::Span((s, end)) => (s, end - s).into(),
        };
        IngestError::Syntax {
            message: e.variant.message().into_owned(),
            src: source(),
            span,
        }
    })?;

    let scale = unit.to_mm();
    let mut seen: HashMap<&str, SourceSpan> = HashMap::new();
    let mut points = Vec::new();

    let rows = pairs
        .next()
        .into_iter()
        .flat_map(Pair::into_inner)
        .filter(|p| p.as_rule() == Rule::row);
    for row in rows {
        let mut inner = row.into_inner();
        let (Some(label), Some(x), Some(y)) = (inner.next(), inner.next(), inner.next()) else {
            continue;
        };

        let label_span = span_of(&label);
        if let Some(&first) = seen.get(label.as_str()) {
            debug!(name, label = label.as_str(), "duplicate label");
            return Err(IngestError::DuplicateLabel {
                label: label.as_str().to_string(),
                src: source(),
                first,
                second: label_span,
            });
        }
        seen.insert(label.as_str(), label_span);

        let number = |pair: &Pair<'_, Rule>| -> Result<f64, IngestError> {
            pair.as_str()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| IngestError::InvalidNumber {
                    text: pair.as_str().to_string(),
                    src: source(),
                    span: span_of(pair),
                })
        };
        let (x, y) = (number(&x)?, number(&y)?);
        points.push(Point::new(label.as_str(), x * scale, y * scale));
    }

    if points.is_empty() {
        return Err(IngestError::Empty);
    }
    Ok(points)
}
