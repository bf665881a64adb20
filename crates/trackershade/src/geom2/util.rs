use geo::{coord, Coord, LineString, MultiPolygon, Polygon, Rect};

/// Axis-aligned rectangle spanning `(x0, y0)`–`(x1, y1)`.
pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
    Rect::new(coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 }).to_polygon()
}

/// Regular polygon with `segments` vertices on the circle of radius `r`
/// around `(cx, cy)`; the first vertex sits on the positive x axis.
///
/// With `segments` a multiple of four the bounding box is exactly the
/// bounding box of the circle.
pub fn regular_polygon(cx: f64, cy: f64, r: f64, segments: usize) -> Polygon<f64> {
    let n = segments.max(3);
    let step = std::f64::consts::TAU / n as f64;
    let ring: Vec<Coord<f64>> = (0..n)
        .map(|k| {
            let (s, c) = (k as f64 * step).sin_cos();
            coord! { x: cx + r * c, y: cy + r * s }
        })
        .collect();
    Polygon::new(LineString::from(ring), vec![])
}

/// Wrap polygons into a multi-polygon (one part per polygon).
pub fn multi<I: IntoIterator<Item = Polygon<f64>>>(parts: I) -> MultiPolygon<f64> {
    MultiPolygon::new(parts.into_iter().collect())
}

/// Largest distance from the origin to any point of `poly`.
///
/// The farthest point of a polygon from a fixed point is always a vertex, so
/// scanning the rings is exact.
pub fn farthest_vertex_distance(poly: &Polygon<f64>) -> f64 {
    std::iter::once(poly.exterior())
        .chain(poly.interiors())
        .flat_map(|ring| ring.coords())
        .map(|c| c.x.hypot(c.y))
        .fold(0.0, f64::max)
}
