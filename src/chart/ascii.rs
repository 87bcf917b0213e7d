//! ASCII plotting for terminal output.
//!
//! Fixed-size grid, deterministic output.
//!
//! Plot elements:
//! - fitted curve: `-` line
//! - tabulated points: `o`
//! - operating point: `X`
//! - requested duty point: `R`

use crate::chart::{Chart, ChartError, ChartRenderer, ChartSpec};
use crate::domain::CurvePoint;

#[derive(Debug, Clone, Copy)]
pub struct AsciiChart {
    pub width: usize,
    pub height: usize,
}

impl AsciiChart {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl Default for AsciiChart {
    fn default() -> Self {
        Self::new(72, 18)
    }
}

impl ChartRenderer for AsciiChart {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn render(&self, spec: &ChartSpec) -> Result<Chart, ChartError> {
        if spec.dense_curve.is_empty() && spec.base_points.is_empty() {
            return Err(ChartError::Empty);
        }
        Ok(Chart::Text {
            body: render_plot(spec, self.width, self.height),
        })
    }
}

/// Render a selection chart as text.
pub fn render_plot(spec: &ChartSpec, width: usize, height: usize) -> String {
    let markers = [spec.operating_point, spec.requested_point];
    let frame = Frame::around(spec.dense_curve.iter().chain(&spec.base_points).chain(&markers));
    let mut canvas = Canvas::new(width.max(10), height.max(5), frame);

    for pair in spec.dense_curve.windows(2) {
        canvas.stroke(pair[0], pair[1]);
    }
    for p in &spec.base_points {
        canvas.mark(*p, 'o');
    }
    canvas.mark(spec.requested_point, 'R');
    canvas.mark(spec.operating_point, 'X');

    let Frame { x, y } = frame;
    let mut out = format!(
        "{}: {}=[{:.0}, {:.0}] | {}=[{:.0}, {:.0}]\n",
        spec.title, spec.x_label, x.0, x.1, spec.y_label, y.0, y.1
    );
    for row in canvas.cells.chunks(canvas.width) {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// Data ranges mapped onto the canvas. Pressure gets 5% headroom on both sides.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: (f64, f64),
    y: (f64, f64),
}

impl Frame {
    fn around<'a>(points: impl Iterator<Item = &'a CurvePoint>) -> Self {
        let (x, y) = points.fold(
            ((f64::INFINITY, f64::NEG_INFINITY), (f64::INFINITY, f64::NEG_INFINITY)),
            |(x, y), p| ((x.0.min(p.x), x.1.max(p.x)), (y.0.min(p.y), y.1.max(p.y))),
        );
        let usable = |r: (f64, f64)| r.0.is_finite() && r.1 > r.0;
        let x = if usable(x) { x } else { (0.0, 1.0) };
        let y = if usable(y) { y } else { (0.0, 1.0) };
        let pad = ((y.1 - y.0) * 0.05).max(1e-12);
        Self {
            x,
            y: (y.0 - pad, y.1 + pad),
        }
    }
}

/// Row-major character grid; row 0 is the top.
struct Canvas {
    cells: Vec<char>,
    width: usize,
    height: usize,
    frame: Frame,
}

fn scale(v: f64, (lo, hi): (f64, f64), cells: usize) -> usize {
    let u = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
    (u * (cells - 1) as f64).round() as usize
}

impl Canvas {
    fn new(width: usize, height: usize, frame: Frame) -> Self {
        Self {
            cells: vec![' '; width * height],
            width,
            height,
            frame,
        }
    }

    fn cell(&self, p: CurvePoint) -> (usize, usize) {
        let col = scale(p.x, self.frame.x, self.width);
        let row = self.height - 1 - scale(p.y, self.frame.y, self.height);
        (col, row)
    }

    /// Overwrite whatever is at `p`.
    fn mark(&mut self, p: CurvePoint, ch: char) {
        let (col, row) = self.cell(p);
        self.cells[row * self.width + col] = ch;
    }

    /// Draw `-` between two points, leaving occupied cells alone.
    fn stroke(&mut self, a: CurvePoint, b: CurvePoint) {
        let (c0, r0) = self.cell(a);
        let (c1, r1) = self.cell(b);
        let dc = c1 as f64 - c0 as f64;
        let dr = r1 as f64 - r0 as f64;
        let steps = dc.abs().max(dr.abs()) as usize;
        for i in 0..=steps {
            let t = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
            let col = (c0 as f64 + t * dc).round() as usize;
            let row = (r0 as f64 + t * dr).round() as usize;
            let cell = &mut self.cells[row * self.width + col];
            if *cell == ' ' {
                *cell = '-';
            }
        }
    }
}
