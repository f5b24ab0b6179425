//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::{Rgba, Vertex};
use crate::sim::Aabb;

/// Two triangles covering an axis-aligned rectangle
pub fn quad(min: Vec2, size: Vec2, color: Rgba) -> [Vertex; 6] {
    let max = min + size;
    let (tr, bl) = (Vec2::new(max.x, min.y), Vec2::new(min.x, max.y));
    [min, tr, bl, bl, tr, max].map(|p| Vertex::at(p, color))
}

/// Append a filled box shifted by `offset`
pub fn push_rect(out: &mut Vec<Vertex>, rect: &Aabb, offset: Vec2, color: Rgba) {
    out.extend(quad(rect.origin() + offset, rect.size(), color));
}
