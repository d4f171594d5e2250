/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3};
use polydie_core::{Camera, Lighting, Mesh, Rgb, Triangle};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// One character cell of the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        color: Color::Reset,
    };
}

/// A projected point: screen column, screen row, view depth
pub type ScreenPoint = (f32, f32, f32);

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![Cell::BLANK; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(Cell::BLANK);
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Projects a model-space point with this renderer's viewport size
    pub fn project(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) -> Option<ScreenPoint> {
        camera.project_point(point, model_matrix, self.width as u32, self.height as u32)
    }

    /// Shades and rasterizes every triangle. `albedo` gives the surface
    /// colour of each polyhedron face.
    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        lighting: &Lighting,
        cull_back_faces: bool,
        albedo: impl Fn(usize) -> Rgb,
    ) {
        for triangle in &mesh.triangles {
            self.render_triangle(
                triangle,
                model_matrix,
                camera,
                lighting,
                cull_back_faces,
                albedo(triangle.face),
            );
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        lighting: &Lighting,
        cull_back_faces: bool,
        albedo: Rgb,
    ) {
        let normal = triangle.calculate_normal();
        let anchor = triangle.vertices[0].position;
        if cull_back_faces && !camera.is_facing(&anchor, &normal, model_matrix) {
            return;
        }

        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (out, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match self.project(&vertex.position, model_matrix, camera) {
                Some(p) => *out = p,
                None => return, // Triangle crosses the near or far plane
            }
        }

        // Shade in world space
        let world_point = model_matrix.transform_point(&anchor);
        let world_normal = model_matrix.transform_vector(&normal);
        let rgb = lighting.shade(&world_point, &world_normal, albedo);
        let brightness = rgb.into_iter().fold(0.0, f32::max);

        let cell = Cell {
            ch: ramp_char(brightness),
            color: to_color(rgb),
        };

        // Rasterize triangle using scanline algorithm
        self.rasterize_triangle(&screen_coords, cell);
    }

    fn rasterize_triangle(&mut self, coords: &[ScreenPoint; 3], cell: Cell) {
        let [v0, v1, v2] = *coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x, y, depth, cell);
                    }
                }
            }
        }
    }

    /// Draws a line between two screen points. With `depth_test` off the
    /// line is drawn over everything and leaves the depth buffer alone.
    pub fn draw_line(&mut self, a: ScreenPoint, b: ScreenPoint, cell: Cell, depth_test: bool) {
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (a.0 + (b.0 - a.0) * t).floor() as i32;
            let y = (a.1 + (b.1 - a.1) * t).floor() as i32;
            if depth_test {
                self.plot(x, y, a.2 + (b.2 - a.2) * t, cell);
            } else if let Some(idx) = self.index(x, y) {
                self.cells[idx] = cell;
            }
        }
    }

    /// Draws a shaded ball of `radius_rows` rows centred on `center`.
    ///
    /// Terminal cells are about twice as tall as they are wide, so the disc
    /// spans twice as many columns as rows. Shading treats the disc as a
    /// sphere lit by `lighting` in view space.
    pub fn draw_ball(&mut self, center: ScreenPoint, radius_rows: f32, lighting: &Lighting, albedo: Rgb) {
        let (cx, cy, depth) = center;
        let r = radius_rows.max(1.0);
        let min_y = (cy - r).floor() as i32;
        let max_y = (cy + r).ceil() as i32;
        let min_x = (cx - 2.0 * r).floor() as i32;
        let max_x = (cx + 2.0 * r).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = (x as f32 + 0.5 - cx) / (2.0 * r);
                let dy = (y as f32 + 0.5 - cy) / r;
                let d2 = dx * dx + dy * dy;
                if d2 > 1.0 {
                    continue;
                }
                let normal = nalgebra::Vector3::new(dx, -dy, (1.0 - d2).sqrt());
                let rgb = lighting.shade(&Point3::origin(), &normal, albedo);
                let brightness = rgb.into_iter().fold(0.0, f32::max);
                // Keep the unlit side visible against the background
                let ch = match ramp_char(brightness) {
                    ' ' => '.',
                    c => c,
                };
                let cell = Cell {
                    ch,
                    color: to_color(rgb),
                };
                self.plot(x, y, depth - r * normal.z * 1e-3, cell);
            }
        }
    }

    /// Writes `text` centred on a screen point if its depth passes the test
    /// (with `bias` subtracted, so text on a surface wins against it)
    pub fn stamp_text(&mut self, at: ScreenPoint, text: &str, color: Color, bias: f32) {
        let len = text.chars().count() as f32;
        let x0 = (at.0 - len / 2.0).round() as i32;
        let y = at.1.floor() as i32;
        for (i, ch) in text.chars().enumerate() {
            let cell = Cell { ch, color };
            self.plot(x0 + i as i32, y, at.2 - bias, cell);
        }
    }

    /// Writes `text` at a fixed position on top of everything
    pub fn overlay_text(&mut self, x: usize, y: usize, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(idx) = self.index((x + i) as i32, y as i32) {
                self.cells[idx] = Cell { ch, color };
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let inside = x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height;
        inside.then(|| y as usize * self.width + x as usize)
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            if depth < self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.cells[idx] = cell;
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.ch))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Ramp character for a brightness in `0.0..=1.0`
pub fn ramp_char(brightness: f32) -> char {
    let char_index = (brightness.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
    LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Terminal colour for a linear RGB triple
pub fn to_color(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color::Rgb { r, g, b }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(ch: char) -> Cell {
        Cell {
            ch,
            color: Color::White,
        }
    }

    #[test]
    fn test_clear_blanks_every_cell() {
        let mut renderer = AsciiRenderer::new(4, 3);
        renderer.overlay_text(0, 0, "abcd", Color::White);
        renderer.clear();
        assert!((0..4).all(|x| renderer.cell(x, 0).unwrap().ch == ' '));
    }

    #[test]
    fn test_nearer_triangle_wins() {
        let mut renderer = AsciiRenderer::new(10, 10);
        let far = [(0.0, 0.0, 5.0), (10.0, 0.0, 5.0), (0.0, 10.0, 5.0)];
        let near = [(0.0, 0.0, 1.0), (10.0, 0.0, 1.0), (0.0, 10.0, 1.0)];
        renderer.rasterize_triangle(&near, white('#'));
        renderer.rasterize_triangle(&far, white('.'));
        assert_eq!(renderer.cell(1, 1).unwrap().ch, '#');
        // Outside the triangle
        assert_eq!(renderer.cell(9, 9).unwrap().ch, ' ');
    }

    #[test]
    fn test_line_without_depth_test_overwrites() {
        let mut renderer = AsciiRenderer::new(10, 1);
        let tri = [(0.0, -5.0, 0.5), (20.0, -5.0, 0.5), (0.0, 5.0, 0.5)];
        renderer.rasterize_triangle(&tri, white('#'));
        renderer.draw_line((0.0, 0.5, 9.0), (9.0, 0.5, 9.0), white('-'), false);
        assert!((0..10).all(|x| renderer.cell(x, 0).unwrap().ch == '-'));
    }

    #[test]
    fn test_stamp_text_is_centred_and_biased() {
        let mut renderer = AsciiRenderer::new(10, 3);
        let tri = [(-10.0, -10.0, 2.0), (30.0, -10.0, 2.0), (-10.0, 30.0, 2.0)];
        renderer.rasterize_triangle(&tri, white('+'));
        renderer.stamp_text((5.0, 1.5, 2.0), "12", Color::Black, 0.01);
        assert_eq!(renderer.cell(4, 1).unwrap().ch, '1');
        assert_eq!(renderer.cell(5, 1).unwrap().ch, '2');
        assert_eq!(renderer.cell(6, 1).unwrap().ch, '+');
    }

    #[test]
    fn test_ball_is_twice_as_wide_as_tall() {
        let mut renderer = AsciiRenderer::new(40, 20);
        renderer.draw_ball((20.0, 10.0, 5.0), 4.0, &Lighting::headlight(), [1.0; 3]);
        assert_ne!(renderer.cell(20, 10).unwrap().ch, ' ');
        assert_ne!(renderer.cell(13, 10).unwrap().ch, ' ');
        assert_eq!(renderer.cell(20, 15).unwrap().ch, ' ');
    }

    #[test]
    fn test_ramp_char_bounds() {
        assert_eq!(ramp_char(0.0), ' ');
        assert_eq!(ramp_char(1.0), '@');
        assert_eq!(ramp_char(7.0), '@');
    }

    #[test]
    fn test_draw_emits_rows() {
        let mut renderer = AsciiRenderer::new(3, 2);
        renderer.overlay_text(0, 1, "xyz", Color::White);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("xyz"));
        assert_eq!(text.matches("\r\n").count(), 2);
    }
}
