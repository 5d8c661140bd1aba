use std::f64::consts::PI;

/// Row-major 3x3 matrix acting on homogeneous 2D coordinates
pub type Mat3 = [[f64; 3]; 3];

/// Homogeneous 2D point `[x, y, 1]`
pub type Vec3 = [f64; 3];

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &Mat3, vector: &Vec3) -> Vec3 {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Translation by `(tx, ty)`
pub fn translation(tx: f64, ty: f64) -> Mat3 {
    [[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]]
}

/// Rotation by `degree` degrees.
///
/// The sine terms sit as `[[cos, sin], [-sin, cos]]`. Together with the
/// vertical flip applied by the transform builder this reads as a
/// counter-clockwise turn on a downward-y surface.
pub fn rotation_degrees(degree: f64) -> Mat3 {
    let radian = degree * PI / 180.0;
    let (sin, cos) = radian.sin_cos();
    [[cos, sin, 0.0], [-sin, cos, 0.0], [0.0, 0.0, 1.0]]
}

/// Truncates toward zero at the hundredths place
pub fn truncate_two_decimals(value: f64) -> f64 {
    (value * 100.0).trunc() / 100.0
}

/// Shortest decimal form without a trailing `.0`; negative zero prints as `0`
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Formats a surface-space point as `"X / Y"`, flipping y back to upward-positive
pub fn format_point(point: &Vec3) -> String {
    let x = truncate_two_decimals(point[0]);
    let y = truncate_two_decimals(-point[1]);
    format!("{} / {}", format_number(x), format_number(y))
}
