use crate::input::{parse_field, FieldId, InputFields};

/// Parameter set driving one frame, in surface space (y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Params {
    /// Horizontal translation
    pub translate_x: f64,
    /// Vertical translation
    pub translate_y: f64,
    /// Pivot x coordinate
    pub pivot_x: f64,
    /// Pivot y coordinate
    pub pivot_y: f64,
    /// Rotation in degrees, fractional while animating
    pub degree: f64,
}

impl Params {
    /// Reads all five fields. The y fields are typed upward-positive,
    /// so they are negated into surface space.
    pub fn from_fields<I: InputFields + ?Sized>(inputs: &I) -> Self {
        Self {
            translate_x: parse_field(inputs.text(FieldId::TranslateX)),
            translate_y: -parse_field(inputs.text(FieldId::TranslateY)),
            pivot_x: parse_field(inputs.text(FieldId::PivotX)),
            pivot_y: -parse_field(inputs.text(FieldId::PivotY)),
            degree: parse_field(inputs.text(FieldId::Rotate)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Form;

    #[test]
    fn reads_fields_with_y_negated() {
        let form = Form::with_values([
            "100".to_string(),
            "50".to_string(),
            "45".to_string(),
            "-20".to_string(),
            "oops".to_string(),
        ]);
        let params = Params::from_fields(&form);
        assert_eq!(
            params,
            Params {
                translate_x: 100.0,
                translate_y: -50.0,
                pivot_x: -20.0,
                pivot_y: 0.0,
                degree: 45.0,
            }
        );
    }
}
