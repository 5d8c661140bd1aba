use crate::surface::{Affine, Fill, Surface};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, SetForegroundColor},
};
use std::io::{self, Write};

const BLOCK: char = '█';
const MARKER: char = '●';
const VERTICAL: char = '│';
const HORIZONTAL: char = '─';
const CROSSING: char = '┼';
const DIAGONAL: char = '·';

/// One character cell of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fill: Fill,
}

const BLANK: Glyph = Glyph {
    ch: ' ',
    fill: Fill::Ink,
};

/// Terminal color for a fill
pub fn fill_color(fill: Fill) -> Color {
    match fill {
        Fill::Ink => Color::Reset,
        Fill::Neutral => Color::Grey,
        Fill::Marker => Color::Red,
    }
}

/// Character-cell drawing surface.
///
/// Drawing happens in logical surface units (`width` x `height`), which are
/// sampled onto a `cols` x `rows` grid at cell centers.
pub struct Canvas {
    width: f64,
    height: f64,
    cols: usize,
    rows: usize,
    glyphs: Vec<Glyph>,
    transform: Affine,
    saved: Vec<Affine>,
}

impl Canvas {
    pub fn new(width: f64, height: f64, cols: usize, rows: usize) -> Self {
        Canvas {
            width,
            height,
            cols,
            rows,
            glyphs: vec![BLANK; cols * rows],
            transform: Affine::IDENTITY,
            saved: Vec::new(),
        }
    }

    /// Changes the cell grid; the contents are erased
    pub fn resize_grid(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.glyphs = vec![BLANK; cols * rows];
    }

    pub fn grid_size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn glyph(&self, col: usize, row: usize) -> Glyph {
        self.glyphs[row * self.cols + col]
    }

    /// Writes the grid to the terminal with its top-left cell at `(0, 0)`
    pub fn present<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in 0..self.rows {
            queue!(out, MoveTo(0, row as u16))?;
            let mut current = None;
            for col in 0..self.cols {
                let glyph = self.glyph(col, row);
                if current != Some(glyph.fill) {
                    queue!(out, SetForegroundColor(fill_color(glyph.fill)))?;
                    current = Some(glyph.fill);
                }
                queue!(out, Print(glyph.ch))?;
            }
        }
        queue!(out, SetForegroundColor(Color::Reset))?;
        Ok(())
    }

    fn cell_width(&self) -> f64 {
        self.width / self.cols as f64
    }

    fn cell_height(&self) -> f64 {
        self.height / self.rows as f64
    }

    /// Cell containing a point in surface units, possibly off-grid
    fn cell_of(&self, x: f64, y: f64) -> (isize, isize) {
        (
            (x / self.cell_width()).floor() as isize,
            (y / self.cell_height()).floor() as isize,
        )
    }

    /// Center of a cell in surface units
    fn cell_center(&self, col: usize, row: usize) -> [f64; 2] {
        [
            (col as f64 + 0.5) * self.cell_width(),
            (row as f64 + 0.5) * self.cell_height(),
        ]
    }

    fn put(&mut self, col: isize, row: isize, glyph: Glyph) {
        if col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows {
            let index = row as usize * self.cols + col as usize;
            self.glyphs[index] = glyph;
        }
    }

    fn get(&self, col: isize, row: isize) -> Option<Glyph> {
        if col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows {
            Some(self.glyph(col as usize, row as usize))
        } else {
            None
        }
    }

    /// Range of cell indices whose centers may fall in `[min, max]`
    fn cell_span(min: f64, max: f64, cell: f64, count: usize) -> Option<(usize, usize)> {
        if count == 0 || !(min.is_finite() && max.is_finite()) {
            return None;
        }
        let first = (min / cell - 0.5).ceil().max(0.0);
        let last = (max / cell - 0.5).floor().min(count as f64 - 1.0);
        if last < first {
            return None;
        }
        Some((first as usize, last as usize))
    }

    /// Fills the cells whose centers lie inside a triangle given in surface units
    fn fill_triangle(&mut self, v0: [f64; 2], v1: [f64; 2], v2: [f64; 2], fill: Fill) {
        let area = edge_function(&v0, &v1, &v2);
        if area == 0.0 {
            return;
        }

        let Some((min_col, max_col)) = Self::cell_span(
            v0[0].min(v1[0]).min(v2[0]),
            v0[0].max(v1[0]).max(v2[0]),
            self.cell_width(),
            self.cols,
        ) else {
            return;
        };
        let Some((min_row, max_row)) = Self::cell_span(
            v0[1].min(v1[1]).min(v2[1]),
            v0[1].max(v1[1]).max(v2[1]),
            self.cell_height(),
            self.rows,
        ) else {
            return;
        };

        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let p = self.cell_center(col, row);

                let w0 = edge_function(&v1, &v2, &p);
                let w1 = edge_function(&v2, &v0, &p);
                let w2 = edge_function(&v0, &v1, &p);

                // Mirrored transforms flip the winding, so accept either sign
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    self.put(col as isize, row as isize, Glyph { ch: BLOCK, fill });
                }
            }
        }
    }

    /// Draws a line between two cells using Bresenham's algorithm
    fn draw_line(&mut self, from: (isize, isize), to: (isize, isize)) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let ch = if x0 == x1 {
            VERTICAL
        } else if y0 == y1 {
            HORIZONTAL
        } else {
            DIAGONAL
        };

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        loop {
            let ch = match (self.get(x0, y0).map(|glyph| glyph.ch), ch) {
                (Some(VERTICAL), HORIZONTAL) | (Some(HORIZONTAL), VERTICAL) => CROSSING,
                _ => ch,
            };
            self.put(x0, y0, Glyph { ch, fill: Fill::Ink });

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

impl Surface for Canvas {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.glyphs.fill(BLANK);
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        let (x0, y0) = self.transform.apply(from.0, from.1);
        let (x1, y1) = self.transform.apply(to.0, to.1);
        // The far edge of the surface belongs to the last cell
        let clamp = |x: f64, limit: f64| if x >= limit { limit - f64::EPSILON * limit } else { x };
        let start = self.cell_of(clamp(x0, self.width), clamp(y0, self.height));
        let end = self.cell_of(clamp(x1, self.width), clamp(y1, self.height));
        self.draw_line(start, end);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let (x, y) = self.transform.apply(x, y);
        let (col, row) = self.cell_of(x, y);
        for (offset, ch) in text.chars().enumerate() {
            self.put(col + offset as isize, row, Glyph { ch, fill: Fill::Ink });
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Fill) {
        let corner = |px: f64, py: f64| {
            let (tx, ty) = self.transform.apply(px, py);
            [tx, ty]
        };
        let p0 = corner(x, y);
        let p1 = corner(x + width, y);
        let p2 = corner(x + width, y + height);
        let p3 = corner(x, y + height);

        self.fill_triangle(p0, p1, p2, fill);
        self.fill_triangle(p0, p2, p3, fill);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: Fill) {
        let (cx, cy) = self.transform.apply(x, y);
        let radius = radius * self.transform.determinant().abs().sqrt();
        let glyph = Glyph { ch: MARKER, fill };

        // The containing cell is always marked, even when the circle is smaller than a cell
        let (col, row) = self.cell_of(cx, cy);
        self.put(col, row, glyph);

        let spans = (
            Self::cell_span(cx - radius, cx + radius, self.cell_width(), self.cols),
            Self::cell_span(cy - radius, cy + radius, self.cell_height(), self.rows),
        );
        if let (Some((min_col, max_col)), Some((min_row, max_row))) = spans {
            for row in min_row..=max_row {
                for col in min_col..=max_col {
                    let [px, py] = self.cell_center(col, row);
                    if (px - cx).powi(2) + (py - cy).powi(2) <= radius * radius {
                        self.put(col as isize, row as isize, glyph);
                    }
                }
            }
        }
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.saved.pop() {
            self.transform = transform;
        }
    }
}
