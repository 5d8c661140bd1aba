use crate::config::SceneConfig;
use crate::math::Mat3;
use crate::state::Params;
use crate::surface::{Affine, Fill, SavedState, Surface};

/// Draws one frame: axes, the transformed unit rectangle and the pivot marker.
///
/// The rectangle is filled as a unit square through the surface transform
/// rather than by transforming its corners here.
pub fn render_scene<S: Surface + ?Sized>(
    surface: &mut S,
    transform: &Mat3,
    params: &Params,
    config: &SceneConfig,
) {
    let (width, height) = surface.size();
    let half_width = width / 2.0;
    let half_height = height / 2.0;

    surface.clear();
    draw_axes(surface, width, height, config.tick_spacing);

    let mut scoped = SavedState::new(surface);
    draw_rect(&mut *scoped, transform, half_width, half_height);
    draw_pivot(&mut *scoped, params, half_width, half_height, config.marker_radius);
}

/// Axis lines through the center plus tick labels on both axes
fn draw_axes<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64, spacing: usize) {
    let half_width = width / 2.0;
    let half_height = height / 2.0;

    surface.stroke_line((half_width, 0.0), (half_width, height));
    surface.stroke_line((0.0, half_height), (width, half_height));

    let extent = half_width as i64;
    for offset in (-extent..=extent).step_by(spacing.max(1)) {
        if offset == 0 {
            continue;
        }
        let offset_f = offset as f64;
        surface.fill_text(
            &offset.to_string(),
            half_width + offset_f,
            half_height - 5.0,
        );
        // y grows downward, so the vertical axis is labelled with the negated offset
        surface.fill_text(
            &(-offset).to_string(),
            half_width + 5.0,
            half_height + offset_f,
        );
    }
}

fn draw_rect<S: Surface + ?Sized>(
    surface: &mut S,
    transform: &Mat3,
    half_width: f64,
    half_height: f64,
) {
    surface.set_transform(Affine::from_matrix(transform).then_translate(half_width, half_height));
    surface.fill_rect(0.0, 0.0, 1.0, 1.0, Fill::Neutral);
}

/// The marker sits at the translated pivot, without rotation or scale
fn draw_pivot<S: Surface + ?Sized>(
    surface: &mut S,
    params: &Params,
    half_width: f64,
    half_height: f64,
    radius: f64,
) {
    surface.set_transform(Affine::translate(
        params.pivot_x + params.translate_x + half_width,
        params.pivot_y + params.translate_y + half_height,
    ));
    surface.fill_circle(0.0, 0.0, radius, Fill::Marker);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::{Call, RecordingSurface};
    use crate::transform::build_rect_transform;

    #[test]
    fn frame_starts_with_clear_and_axes() {
        let mut surface = RecordingSurface::new(400.0, 400.0);
        let params = Params::default();
        let transform = build_rect_transform(&params, 100.0);
        render_scene(&mut surface, &transform, &params, &SceneConfig::default());

        assert_eq!(surface.calls[0], Call::Clear);
        assert_eq!(surface.calls[1], Call::Line((200.0, 0.0), (200.0, 400.0)));
        assert_eq!(surface.calls[2], Call::Line((0.0, 200.0), (400.0, 200.0)));
    }

    #[test]
    fn ticks_skip_zero_and_mirror_vertically() {
        let mut surface = RecordingSurface::new(400.0, 400.0);
        let params = Params::default();
        let transform = build_rect_transform(&params, 100.0);
        render_scene(&mut surface, &transform, &params, &SceneConfig::default());

        let texts: Vec<&Call> = surface
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Text(..)))
            .collect();
        assert_eq!(texts.len(), 16);
        assert!(!surface
            .calls
            .iter()
            .any(|call| matches!(call, Call::Text(text, ..) if text == "0")));
        assert!(surface
            .calls
            .contains(&Call::Text("-200".to_string(), 0.0, 195.0)));
        assert!(surface
            .calls
            .contains(&Call::Text("200".to_string(), 205.0, 0.0)));
        assert!(surface
            .calls
            .contains(&Call::Text("-50".to_string(), 205.0, 250.0)));
    }

    #[test]
    fn rectangle_and_pivot_are_drawn_inside_saved_state() {
        let mut surface = RecordingSurface::new(400.0, 400.0);
        let params = Params {
            translate_x: 30.0,
            translate_y: -10.0,
            pivot_x: 5.0,
            pivot_y: 7.0,
            degree: 45.0,
        };
        let transform = build_rect_transform(&params, 100.0);
        render_scene(&mut surface, &transform, &params, &SceneConfig::default());

        let tail = &surface.calls[surface.calls.len() - 6..];
        assert_eq!(
            tail,
            &[
                Call::Save,
                Call::SetTransform(Affine::from_matrix(&transform).then_translate(200.0, 200.0)),
                Call::Rect(0.0, 0.0, 1.0, 1.0, Fill::Neutral),
                Call::SetTransform(Affine::translate(235.0, 197.0)),
                Call::Circle(0.0, 0.0, 5.0, Fill::Marker),
                Call::Restore,
            ]
        );
    }
}
