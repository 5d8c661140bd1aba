//! The drawing-surface capability the scene renderer draws through

use crate::math::Mat3;
use std::ops::{Deref, DerefMut};

/// 2D affine map in canvas order: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Pure translation
    pub fn translate(e: f64, f: f64) -> Self {
        Self {
            e,
            f,
            ..Self::IDENTITY
        }
    }

    /// Takes the linear part and translation column of a homogeneous matrix
    pub fn from_matrix(m: &Mat3) -> Self {
        Self {
            a: m[0][0],
            b: m[1][0],
            c: m[0][1],
            d: m[1][1],
            e: m[0][2],
            f: m[1][2],
        }
    }

    /// Same map followed by a shift of `(dx, dy)`
    pub fn then_translate(self, dx: f64, dy: f64) -> Self {
        Self {
            e: self.e + dx,
            f: self.f + dy,
            ..self
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }
}

/// Paint used for a fill or stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Axes and labels
    Ink,
    /// The rectangle body
    Neutral,
    /// The pivot marker
    Marker,
}

/// A drawing surface whose primitives pass through a settable transform
pub trait Surface {
    /// Logical width and height
    fn size(&self) -> (f64, f64);
    /// Erases everything
    fn clear(&mut self);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64));
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Fill);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: Fill);
    /// Replaces the current transform
    fn set_transform(&mut self, transform: Affine);
    /// Pushes the current transform state
    fn save(&mut self);
    /// Pops the last saved transform state
    fn restore(&mut self);
}

/// Saves the surface state on creation and restores it on drop
pub struct SavedState<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> SavedState<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for SavedState<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for SavedState<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.surface
    }
}

impl<S: Surface + ?Sized> Drop for SavedState<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
