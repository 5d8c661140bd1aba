//! Position reporting for the rectangle's corners and center

use crate::math::{format_point, multiply_matrix_vector, Mat3, Vec3};
use std::cell::RefCell;
use std::rc::Rc;

/// A reported point of the unit square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    LeftBottom,
    LeftTop,
    RightBottom,
    RightTop,
    Center,
}

impl Corner {
    pub const ALL: [Corner; 5] = [
        Corner::LeftBottom,
        Corner::LeftTop,
        Corner::RightBottom,
        Corner::RightTop,
        Corner::Center,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Corner::LeftBottom => "Left Bottom",
            Corner::LeftTop => "Left Top",
            Corner::RightBottom => "Right Bottom",
            Corner::RightTop => "Right Top",
            Corner::Center => "Center",
        }
    }

    /// Homogeneous position on the unscaled unit square
    pub fn point(self) -> Vec3 {
        match self {
            Corner::LeftBottom => [0.0, 0.0, 1.0],
            Corner::LeftTop => [0.0, 1.0, 1.0],
            Corner::RightBottom => [1.0, 0.0, 1.0],
            Corner::RightTop => [1.0, 1.0, 1.0],
            Corner::Center => [0.5, 0.5, 1.0],
        }
    }
}

/// A label-like output that displays one line of text
pub trait TextSink {
    fn set_text(&mut self, text: String);
}

/// Shared handle to a text label; clones observe the same text
#[derive(Debug, Clone, Default)]
pub struct SharedLabel(Rc<RefCell<String>>);

impl SharedLabel {
    pub fn text(&self) -> String {
        self.0.borrow().clone()
    }
}

impl TextSink for SharedLabel {
    fn set_text(&mut self, text: String) {
        *self.0.borrow_mut() = text;
    }
}

/// One sink per reported corner
pub struct Outputs {
    sinks: [Box<dyn TextSink>; 5],
}

impl Outputs {
    pub fn new(
        left_bottom: Box<dyn TextSink>,
        left_top: Box<dyn TextSink>,
        right_bottom: Box<dyn TextSink>,
        right_top: Box<dyn TextSink>,
        center: Box<dyn TextSink>,
    ) -> Self {
        Self {
            sinks: [left_bottom, left_top, right_bottom, right_top, center],
        }
    }

    /// Outputs backed by [`SharedLabel`]s, returned alongside for reading
    pub fn shared() -> (Self, [SharedLabel; 5]) {
        let labels: [SharedLabel; 5] = Default::default();
        let [lb, lt, rb, rt, c] = labels.clone();
        let outputs = Self::new(
            Box::new(lb),
            Box::new(lt),
            Box::new(rb),
            Box::new(rt),
            Box::new(c),
        );
        (outputs, labels)
    }

    fn sink_mut(&mut self, corner: Corner) -> &mut dyn TextSink {
        let index = match corner {
            Corner::LeftBottom => 0,
            Corner::LeftTop => 1,
            Corner::RightBottom => 2,
            Corner::RightTop => 3,
            Corner::Center => 4,
        };
        self.sinks[index].as_mut()
    }
}

/// `"<Label>: X / Y"` for one corner under `transform`
pub fn describe(transform: &Mat3, corner: Corner) -> String {
    let position = multiply_matrix_vector(transform, &corner.point());
    format!("{}: {}", corner.label(), format_point(&position))
}

/// Pushes every corner's description to its sink
pub fn report_positions(transform: &Mat3, outputs: &mut Outputs) {
    for corner in Corner::ALL {
        outputs.sink_mut(corner).set_text(describe(transform, corner));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Params;
    use crate::transform::build_rect_transform;

    fn joined(labels: &[SharedLabel; 5]) -> String {
        labels
            .iter()
            .map(SharedLabel::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn reports_identity_rectangle() {
        let (mut outputs, labels) = Outputs::shared();
        let transform = build_rect_transform(&Params::default(), 100.0);
        report_positions(&transform, &mut outputs);
        insta::assert_snapshot!(joined(&labels), @r"
        Left Bottom: 0 / 0
        Left Top: 0 / 100
        Right Bottom: 100 / 0
        Right Top: 100 / 100
        Center: 50 / 50
        ");
    }

    #[test]
    fn reports_quarter_turn_with_translation() {
        let (mut outputs, labels) = Outputs::shared();
        let params = Params {
            translate_x: 100.0,
            degree: 90.0,
            ..Params::default()
        };
        report_positions(&build_rect_transform(&params, 100.0), &mut outputs);
        insta::assert_snapshot!(joined(&labels), @r"
        Left Bottom: 100 / 0
        Left Top: 0 / 0
        Right Bottom: 100 / 100
        Right Top: 0 / 100
        Center: 50 / 50
        ");
    }

    #[test]
    fn each_sink_receives_its_own_corner() {
        let (mut outputs, labels) = Outputs::shared();
        let transform = build_rect_transform(&Params::default(), 100.0);
        report_positions(&transform, &mut outputs);
        for (corner, label) in Corner::ALL.iter().zip(labels.iter()) {
            assert!(label.text().starts_with(corner.label()));
        }
        assert_eq!(labels[4].text(), "Center: 50 / 50");
    }
}
