use crate::math::{multiply_matrices, rotation_degrees, translation, Mat3};
use crate::state::Params;

/// Builds the rectangle transform: move the pivot to the origin, rotate,
/// move back plus the translation, then fold in the display scale and the
/// vertical flip.
///
/// Scale and flip touch only the linear part; the translation column stays
/// in surface units.
pub fn build_rect_transform(params: &Params, scale: f64) -> Mat3 {
    let to_origin = translation(-params.pivot_x, -params.pivot_y);
    let rotate = rotation_degrees(params.degree);
    let back = translation(
        params.pivot_x + params.translate_x,
        params.pivot_y + params.translate_y,
    );

    let mut transform = multiply_matrices(&back, &multiply_matrices(&rotate, &to_origin));

    transform[0][0] *= scale;
    transform[0][1] *= -scale;
    transform[1][0] *= scale;
    transform[1][1] *= -scale;

    transform
}
