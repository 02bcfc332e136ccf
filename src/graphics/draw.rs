use super::{PixelBuffer, P2};

impl PixelBuffer {
    pub fn set_pixel_xy(&mut self, p: P2) {
        if let Some(i) = self.index(p) {
            self.blend_at(i, self.current_color());
        }
    }

    /// Filled rectangle, both corners inclusive, clipped to the canvas.
    pub fn draw_rect_xy(&mut self, ps: P2, pe: P2) {
        let (w, h) = (self.width() as i32, self.height() as i32);

        let xs = ps.0.min(pe.0).max(0);
        let xe = ps.0.max(pe.0).min(w - 1);
        let ys = ps.1.min(pe.1).max(0);
        let ye = ps.1.max(pe.1).min(h - 1);

        if xs > xe || ys > ye {
            return;
        }

        let c = self.current_color();
        for y in ys..=ye {
            let base = y as usize * self.width();
            for x in xs..=xe {
                self.blend_at(base + x as usize, c);
            }
        }
    }

    pub fn draw_rect_wh(&mut self, p: P2, w: usize, h: usize) {
        if w == 0 || h == 0 {
            return;
        }
        let pe = P2(
            p.0.wrapping_add(w as i32 - 1),
            p.1.wrapping_add(h as i32 - 1),
        );
        self.draw_rect_xy(p, pe);
    }

    // Using Bresenham's line algorithm.
    pub fn draw_line(&mut self, ps: P2, pe: P2) {
        let dx = (pe.0 - ps.0).abs();
        let sx = if ps.0 < pe.0 { 1 } else { -1 };
        let dy = -(pe.1 - ps.1).abs();
        let sy = if ps.1 < pe.1 { 1 } else { -1 };
        let mut error = dx + dy;

        let mut p = ps;

        loop {
            self.set_pixel_xy(p);

            if p == pe {
                return;
            }
            let e2 = error * 2;

            if e2 >= dy {
                error += dy;
                p.0 += sx;
            }

            if e2 <= dx {
                error += dx;
                p.1 += sy;
            }
        }
    }

    /// Midpoint circle. Filled circles are drawn as horizontal spans.
    pub fn draw_circle(&mut self, center: P2, radius: i32, filled: bool) {
        let mut t1 = radius / 16;
        let mut x = radius;
        let mut y = 0;

        while x >= y {
            for (a, b) in [(x, y), (y, x)] {
                if filled {
                    self.draw_rect_xy(P2(center.0 - a, center.1 + b), P2(center.0 + a, center.1 + b));
                    self.draw_rect_xy(P2(center.0 - a, center.1 - b), P2(center.0 + a, center.1 - b));
                } else {
                    for (sa, sb) in [(a, b), (-a, b), (a, -b), (-a, -b)] {
                        self.set_pixel_xy(P2(center.0 + sa, center.1 + sb));
                    }
                }
            }

            y += 1;
            t1 += y;
            let t2 = t1 - x;

            if t2 >= 0 {
                t1 = t2;
                x -= 1;
            }
        }
    }

    /// Outline of the rectangle spanned by two corners.
    pub fn draw_frame(&mut self, ps: P2, pe: P2) {
        self.draw_line(ps, P2(pe.0, ps.1));
        self.draw_line(P2(pe.0, ps.1), pe);
        self.draw_line(pe, P2(ps.0, pe.1));
        self.draw_line(P2(ps.0, pe.1), ps);
    }
}
