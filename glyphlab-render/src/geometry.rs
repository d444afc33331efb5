//! Rectangles, points and the layout-to-surface coordinate flip.
//!
//! Layout space: origin at the bottom-left of the surface, y up.
//! Surface space: origin at the top-left, y down.

/// Axis-aligned rectangle. `x`/`y` is the corner with the smallest
/// coordinates in whichever space the rect lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub w: T,
    pub h: T,
}

impl<T> Rect<T> {
    pub const fn new(x: T, y: T, w: T, h: T) -> Self {
        Self { x, y, w, h }
    }
}

impl<T: Copy + PartialEq + Default> Rect<T> {
    /// True when either side has zero length.
    pub fn is_empty(&self) -> bool {
        self.w == T::default() || self.h == T::default()
    }
}

impl Rect<i32> {
    pub fn to_f32(self) -> Rect<f32> {
        Rect::new(self.x as f32, self.y as f32, self.w as f32, self.h as f32)
    }
}

impl Rect<f32> {
    /// Same area with non-negative width and height.
    pub fn normalized(self) -> Self {
        let (x, w) = if self.w < 0.0 {
            (self.x + self.w, -self.w)
        } else {
            (self.x, self.w)
        };
        let (y, h) = if self.h < 0.0 {
            (self.y + self.h, -self.h)
        } else {
            (self.y, self.h)
        };
        Self { x, y, w, h }
    }

    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size of a render target in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn w(&self) -> f32 {
        self.width as f32
    }

    pub fn h(&self) -> f32 {
        self.height as f32
    }
}

/// Convert a layout-space rect to surface space.
///
/// `surface_y = surface_height - y - h`: the rect's bottom edge in layout
/// space becomes its bottom edge in surface space.
pub fn flip_rect(rect: Rect<f32>, surface_height: f32) -> Rect<f32> {
    let rect = rect.normalized();
    Rect {
        y: surface_height - rect.y - rect.h,
        ..rect
    }
}

/// Convert a layout-space point to surface space.
pub fn flip_point(point: Point, surface_height: f32) -> Point {
    Point {
        x: point.x,
        y: surface_height - point.y,
    }
}
