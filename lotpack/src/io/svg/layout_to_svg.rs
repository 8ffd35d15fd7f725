use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Group, Path, Text, Title};

use crate::entities::Layout;
use crate::estimate::density_per_100m2;
use crate::geometry::geo_enums::Facing;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Point, Rect, SPolygon};
use crate::io::svg::svg_util::{self, SvgDrawOptions};

fn ring_data(points: impl IntoIterator<Item = Point>) -> Data {
    let mut points = points.into_iter();
    let data = match points.next() {
        Some(first) => Data::new().move_to((first.0, first.1)),
        None => return Data::new(),
    };
    points
        .fold(data, |data, p| data.line_to((p.0, p.1)))
        .close()
}

fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    params
        .iter()
        .fold(Path::new(), |path, (k, v)| path.set(*k, *v))
        .set("d", data)
}

/// Draws a layout packed in local meters. The y-axis is flipped so north is up.
pub fn layout_to_svg(layout: &Layout, boundary: &SPolygon, options: SvgDrawOptions) -> Document {
    let theme = options.theme.get_theme();
    let vbox = boundary.bbox().scale(1.10);
    let stroke_width = f64::min(vbox.width(), vbox.height()) * 0.001 * theme.stroke_width_multiplier;

    let lot_group = {
        let bbox = boundary.bbox();
        Group::new()
            .set("id", "lot")
            .add(data_to_path(
                ring_data(boundary.vertices.iter().copied()),
                &[
                    ("fill", theme.lot_fill),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                ],
            ))
            .add(Title::new(format!(
                "lot, area: {:.1}m², bbox: [x_min: {:.3}, y_min: {:.3}, x_max: {:.3}, y_max: {:.3}]",
                boundary.area(),
                bbox.x_min,
                bbox.y_min,
                bbox.x_max,
                bbox.y_max
            )))
    };

    let islands_group = match layout.show_islands || options.exclusion_zones {
        false => None,
        true => {
            let (fill, dash) = match layout.show_islands {
                true => (theme.island_fill, "none".to_string()),
                false => ("none", format!("{}", 5.0 * stroke_width)),
            };
            let stroke = svg_util::change_brightness(theme.island_fill, 0.6);
            Some(layout.islands.iter().fold(
                Group::new().set("id", "islands"),
                |group, zone: &Rect| {
                    group.add(data_to_path(
                        ring_data(zone.corners()),
                        &[
                            ("fill", fill),
                            ("stroke", &*stroke),
                            ("stroke-width", &*format!("{}", stroke_width)),
                            ("stroke-dasharray", &*dash),
                        ],
                    ))
                },
            ))
        }
    };

    let stalls_group = layout.stalls.iter().enumerate().fold(
        Group::new().set("id", "stalls"),
        |group, (i, stall)| {
            let fill = match stall.facing {
                Facing::Up | Facing::Right => theme.stall_fill,
                Facing::Down | Facing::Left => theme.stall_fill_alt,
            };
            group.add(
                data_to_path(
                    ring_data(stall.corners),
                    &[
                        ("fill", fill),
                        ("stroke", "white"),
                        ("stroke-width", &*format!("{}", stroke_width)),
                    ],
                )
                .add(Title::new(format!("stall {i}, facing {:?}", stall.facing))),
            )
        },
    );

    let flipped = [Some(lot_group), islands_group, Some(stalls_group)]
        .into_iter()
        .flatten()
        .fold(
            Group::new().set("transform", "scale(1,-1)"),
            |g, child| g.add(child),
        );

    //the flipped content occupies [-y_max, -y_min] in svg space
    let vbox_svg = (vbox.x_min, -vbox.y_max, vbox.width(), vbox.height());
    let mut document = Document::new().set("viewBox", vbox_svg).add(flipped);

    if options.label {
        let density = density_per_100m2(layout.n_stalls() as u64, boundary.area());
        let font_size = f64::min(vbox.width(), vbox.height()) * 0.04;
        let label = Text::new(format!(
            "{} stalls, {:.2} per 100m²",
            layout.n_stalls(),
            density
        ))
        .set("x", vbox.x_min + font_size * 0.5)
        .set("y", -vbox.y_max + font_size * 1.2)
        .set("font-size", font_size)
        .set("font-family", "monospace")
        .set("fill", theme.label_color);
        document = document.add(label);
    }

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Stall;

    #[test]
    fn draws_every_stall() {
        let boundary = SPolygon::from(Rect::try_new(0.0, 0.0, 10.0, 10.0).unwrap());
        let layout = Layout {
            stalls: vec![
                Stall::from_rect(Rect::try_new(0.0, 0.0, 2.5, 5.0).unwrap(), Facing::Up),
                Stall::from_rect(Rect::try_new(2.5, 0.0, 5.0, 5.0).unwrap(), Facing::Down),
            ],
            ..Layout::default()
        };
        let svg = layout_to_svg(&layout, &boundary, SvgDrawOptions::default()).to_string();
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains("2 stalls"));
        assert!(svg.contains("scale(1,-1)"));
    }
}
