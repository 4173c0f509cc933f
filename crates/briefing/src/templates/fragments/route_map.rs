use maud::{html, Markup};

use crate::{RoutePoint, StopKind};

const MAP_WIDTH: f64 = 600.0;
const MAP_HEIGHT: f64 = 320.0;
const MAP_PADDING: f64 = 40.0;
/// Smallest span drawn, in degrees, so a single stop does not fill the map
const MIN_SPAN_DEG: f64 = 1.0;

/// Mercator projection for latitude: ln(tan(π/4 + lat*π/360))
fn mercator_lat(lat: f64) -> f64 {
    (std::f64::consts::PI / 4.0 + lat * std::f64::consts::PI / 360.0)
        .tan()
        .ln()
}

/// Bounding box of the route in projected units, padded to `MIN_SPAN_DEG`
struct Bounds {
    west: f64,
    east: f64,
    top: f64,
    bottom: f64,
}

impl Bounds {
    fn around(points: &[RoutePoint]) -> Option<Bounds> {
        let first = points.first()?;
        let (mut south, mut north) = (first.latitude, first.latitude);
        let (mut west, mut east) = (first.longitude, first.longitude);
        for point in points {
            south = south.min(point.latitude);
            north = north.max(point.latitude);
            west = west.min(point.longitude);
            east = east.max(point.longitude);
        }

        let lat_pad = ((MIN_SPAN_DEG - (north - south)) / 2.0).max(0.0);
        let lon_pad = ((MIN_SPAN_DEG - (east - west)) / 2.0).max(0.0);
        Some(Bounds {
            west: west - lon_pad,
            east: east + lon_pad,
            top: mercator_lat((north + lat_pad).min(85.0)),
            bottom: mercator_lat((south - lat_pad).max(-85.0)),
        })
    }

    /// lat/lon to SVG pixel coordinates inside the padded drawing area
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        let inner_width = MAP_WIDTH - 2.0 * MAP_PADDING;
        let inner_height = MAP_HEIGHT - 2.0 * MAP_PADDING;

        let lon_normalized = (lon - self.west) / (self.east - self.west);
        let lat_normalized = (self.top - mercator_lat(lat)) / (self.top - self.bottom);

        (
            MAP_PADDING + lon_normalized * inner_width,
            MAP_PADDING + lat_normalized * inner_height,
        )
    }
}

/// Route overview: stops joined in flight order, labelled like the briefing sections
pub fn route_map(points: &[RoutePoint]) -> Markup {
    let Some(bounds) = Bounds::around(points) else {
        return html! {
            p class="has-text-grey route-map-empty" { "No stations could be located for the route map." }
        };
    };

    let projected: Vec<(f64, f64, &RoutePoint)> = points
        .iter()
        .map(|p| {
            let (x, y) = bounds.project(p.latitude, p.longitude);
            (x, y, p)
        })
        .collect();
    let line = projected
        .iter()
        .map(|(x, y, _)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ");

    html! {
        div class="route-map-container" {
            svg class="route-map" viewBox=(format!("0 0 {} {}", MAP_WIDTH, MAP_HEIGHT))
                preserveAspectRatio="xMidYMid meet" role="img" aria-label="Route map" {
                polyline class="route-line" points=(line) {}
                @for (x, y, point) in &projected {
                    @let role = match point.kind {
                        StopKind::Departure => "is-departure",
                        StopKind::Destination(_) => "is-destination",
                    };
                    g class={"route-stop " (role)}
                      data-lat=(point.latitude) data-lon=(point.longitude) {
                        circle cx=(format!("{:.1}", x)) cy=(format!("{:.1}", y)) r="5" {}
                        text x=(format!("{:.1}", x + 8.0)) y=(format!("{:.1}", y - 8.0)) {
                            (point.label)
                        }
                    }
                }
            }
        }
    }
}
