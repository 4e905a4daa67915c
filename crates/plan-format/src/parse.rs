//! Parser for the plan surface syntax.
//!
//! Line-oriented: `#` starts a comment, blank lines are skipped.
//!
//! ```text
//! (leg1:2x4 =400)                                # piece
//! leg1 -[left@max:0 front/left@min:0 top>top]- leg2   # joint
//! ```
//!
//! Anchors are `face@offset` or `face/other@offset` (a point on the edge
//! where the two faces meet); offsets are `min:N`, `max:N`, `center` or a
//! bare signed number; the pose rule `a>b` points target face `a` along
//! base direction `b`.

use tenon_engine::Model;
use tenon_types::{Anchor, Category, Connection, Face, Offset, Piece, PoseRule};

use crate::errors::ParseError;

/// Parse a plan into a fully-populated, not-yet-validated model.
pub fn parse_plan(text: &str) -> Result<Model, ParseError> {
    let mut model = Model::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let stmt = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();
        if stmt.is_empty() {
            continue;
        }

        if stmt.starts_with('(') {
            let piece = parse_piece(stmt).map_err(|message| ParseError::Syntax { line, message })?;
            model
                .add_piece(piece)
                .map_err(|source| ParseError::Model { line, source })?;
        } else {
            let conn =
                parse_connection(stmt).map_err(|message| ParseError::Syntax { line, message })?;
            model
                .add_connection(conn)
                .map_err(|source| ParseError::Model { line, source })?;
        }
    }
    Ok(model)
}

/// `(id:category =length)`
fn parse_piece(stmt: &str) -> Result<Piece, String> {
    let inner = stmt
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| "piece must be wrapped in parentheses".to_string())?;

    let mut parts = inner.split_whitespace();
    let head = parts.next().ok_or("missing piece identity")?;
    let len_part = parts.next().ok_or("missing piece length (=N)")?;
    if let Some(extra) = parts.next() {
        return Err(format!("unexpected token '{extra}' in piece"));
    }

    let (id, cat_name) = head
        .split_once(':')
        .ok_or("piece must be written as id:category")?;
    if id.is_empty() {
        return Err("piece identity is empty".to_string());
    }
    let category = Category::parse(cat_name)
        .ok_or_else(|| format!("unknown category '{cat_name}'"))?;

    let length_str = len_part
        .strip_prefix('=')
        .ok_or("piece length must be written as =N")?;
    let length: f64 = length_str
        .parse()
        .map_err(|_| format!("invalid length '{length_str}'"))?;

    Ok(Piece::new(id, category, length))
}

/// `base -[base_anchor target_anchor pose]- target`
fn parse_connection(stmt: &str) -> Result<Connection, String> {
    let open = stmt
        .find("-[")
        .ok_or("joint must be written as base -[...]- target")?;
    let close = stmt
        .find("]-")
        .ok_or("joint must be written as base -[...]- target")?;
    if close < open {
        return Err("joint brackets are reversed".to_string());
    }

    let base = stmt[..open].trim();
    let target = stmt[close + 2..].trim();
    if base.is_empty() || target.is_empty() {
        return Err("joint must name a base and a target piece".to_string());
    }

    let mut spec = stmt[open + 2..close].split_whitespace();
    let base_anchor = parse_anchor(spec.next().ok_or("missing base anchor")?)?;
    let target_anchor = parse_anchor(spec.next().ok_or("missing target anchor")?)?;
    let pose = parse_pose(spec.next().ok_or("missing pose rule (face>face)")?)?;
    if let Some(extra) = spec.next() {
        return Err(format!("unexpected token '{extra}' in joint"));
    }

    Ok(Connection {
        base: base.to_string(),
        target: target.to_string(),
        base_anchor,
        target_anchor,
        pose,
    })
}

/// `face@offset` or `face/other@offset`
fn parse_anchor(token: &str) -> Result<Anchor, String> {
    let (faces, offset_str) = token
        .split_once('@')
        .ok_or_else(|| format!("anchor '{token}' must be written as face@offset"))?;
    let offset = parse_offset(offset_str)?;

    match faces.split_once('/') {
        Some((a, b)) => {
            let face = parse_face(a)?;
            let other = parse_face(b)?;
            if !face.is_adjacent_to(&other) {
                return Err(format!("faces {a} and {b} do not meet at an edge"));
            }
            Ok(Anchor::on_edge(face, other, offset))
        }
        None => Ok(Anchor::on_face(parse_face(faces)?, offset)),
    }
}

fn parse_face(name: &str) -> Result<Face, String> {
    Face::parse(name).ok_or_else(|| format!("unknown face '{name}'"))
}

/// `min:N`, `max:N`, `center`, or a bare signed number.
fn parse_offset(s: &str) -> Result<Offset, String> {
    if s == "center" {
        return Ok(Offset::Center);
    }
    if let Some(v) = s.strip_prefix("min:") {
        let value = parse_number(v)?;
        if value < 0.0 {
            return Err(format!("min offset must be non-negative, got {value}"));
        }
        return Ok(Offset::FromMin { value });
    }
    if let Some(v) = s.strip_prefix("max:") {
        let value = parse_number(v)?;
        if value < 0.0 {
            return Err(format!("max offset must be non-negative, got {value}"));
        }
        return Ok(Offset::FromMax { value });
    }
    Ok(Offset::Value {
        value: parse_number(s)?,
    })
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.parse().map_err(|_| format!("invalid number '{s}'"))
}

/// `targetface>basedirection`
fn parse_pose(token: &str) -> Result<PoseRule, String> {
    let (t, b) = token
        .split_once('>')
        .ok_or_else(|| format!("pose rule '{token}' must be written as face>face"))?;
    Ok(PoseRule {
        target_face: parse_face(t)?,
        base_direction: parse_face(b)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenon_types::AnchorKind;

    #[test]
    fn test_parse_piece_line() {
        let m = parse_plan("(leg1:2x4 =400)").unwrap();
        let piece = m.piece_by_id("leg1").unwrap();
        assert_eq!(piece.category, Category::TwoByFour);
        assert_eq!(piece.length, 400.0);
    }

    #[test]
    fn test_parse_full_plan() {
        let text = "\
# a corner of two studs
(a:2x4 =400)
(b:2x4 =400)   # second stud
a -[left@max:0 front/left@min:0 top>top]- b
";
        let m = parse_plan(text).unwrap();
        assert_eq!(m.piece_count(), 2);
        assert_eq!(m.connections().len(), 1);
        let conn = &m.connections()[0];
        assert_eq!(conn.base, "a");
        assert_eq!(conn.target, "b");
        assert_eq!(conn.base_anchor.face, Face::Left);
        assert!(matches!(
            conn.base_anchor.kind,
            AnchorKind::Face {
                offset: Offset::FromMax { value }
            } if value == 0.0
        ));
        assert!(matches!(conn.target_anchor.kind, AnchorKind::Edge { .. }));
        assert_eq!(conn.pose.target_face, Face::Top);
    }

    #[test]
    fn test_parse_offsets() {
        assert_eq!(parse_offset("center").unwrap(), Offset::Center);
        assert_eq!(
            parse_offset("min:12.5").unwrap(),
            Offset::FromMin { value: 12.5 }
        );
        assert_eq!(
            parse_offset("max:0").unwrap(),
            Offset::FromMax { value: 0.0 }
        );
        assert_eq!(parse_offset("37").unwrap(), Offset::Value { value: 37.0 });
        assert!(parse_offset("min:-3").is_err());
        assert!(parse_offset("mid:3").is_err());
    }

    #[test]
    fn test_syntax_error_carries_line_number() {
        let text = "(a:2x4 =400)\n(b:oak =100)";
        match parse_plan(text) {
            Err(ParseError::Syntax { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("oak"), "message: {message}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_model_error_carries_line_number() {
        let text = "(a:2x4 =400)\n(a:2x4 =300)";
        match parse_plan(text) {
            Err(ParseError::Model { line, source }) => {
                assert_eq!(line, 2);
                assert!(matches!(
                    source,
                    tenon_engine::EngineError::DuplicatePiece { .. }
                ));
            }
            other => panic!("expected model error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_reference_in_joint() {
        let text = "(a:2x4 =400)\na -[left@max:0 front/left@min:0 top>top]- ghost";
        match parse_plan(text) {
            Err(ParseError::Model { line, source }) => {
                assert_eq!(line, 2);
                assert!(matches!(
                    source,
                    tenon_engine::EngineError::UnknownPiece { id } if id == "ghost"
                ));
            }
            other => panic!("expected model error, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_anchor_rejects_opposite_faces() {
        let err = parse_anchor("top/bottom@min:0").unwrap_err();
        assert!(err.contains("do not meet"));
    }

    #[test]
    fn test_negative_value_offset_parses() {
        // The bare form is signed; range checking happens at resolution.
        assert_eq!(
            parse_offset("-5").unwrap(),
            Offset::Value { value: -5.0 }
        );
    }
}
