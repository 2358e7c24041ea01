//! Axis aligned rectangles

/// Rectangle
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rectangle<T: std::cmp::PartialOrd + Copy> {
    /// Minimum x value
    pub x1: T,
    /// Minimum y value
    pub y1: T,
    /// Maximum x value
    pub x2: T,
    /// Maximum y value
    pub y2: T,
}

impl<T> Rectangle<T> where T: std::cmp::PartialOrd + Copy {
    /// Create a new Rectangle
    ///
    /// Values are sorted before storing
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        let (x1, x2) = if x1 > x2 { (x2,x1) } else { (x1,x2) };
        let (y1, y2) = if y1 > y2 { (y2,y1) } else { (y1,y2) };
        Self { x1,y1,x2,y2 }
    }
    /// Create a Rectangle from left, top, right and bottom edges
    pub fn from_ltrb(left: T, top: T, right: T, bottom: T) -> Self {
        Self::new(left, top, right, bottom)
    }
    /// Left edge
    pub fn left(&self) -> T { self.x1 }
    /// Top edge, smallest y
    pub fn top(&self) -> T { self.y1 }
    /// Right edge
    pub fn right(&self) -> T { self.x2 }
    /// Bottom edge, largest y
    pub fn bottom(&self) -> T { self.y2 }
    /// Is (x,y) inside or on the edge of the rectangle
    pub fn contains(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
    /// Expand if the point (x,y) is outside
    pub fn expand(&mut self, x: T, y: T) {
        if x < self.x1 { self.x1 = x; }
        if x > self.x2 { self.x2 = x; }
        if y < self.y1 { self.y1 = y; }
        if y > self.y2 { self.y2 = y; }
    }
    /// Expand if the rectangle is outside
    pub fn expand_rect(&mut self, r: &Rectangle<T>) {
        self.expand(r.x1, r.y1);
        self.expand(r.x2, r.y2);
    }
}

impl<T> Rectangle<T> where T: std::cmp::PartialOrd + Copy + std::ops::Sub<Output=T> {
    /// Width
    pub fn width(&self) -> T {
        self.x2 - self.x1
    }
    /// Height
    pub fn height(&self) -> T {
        self.y2 - self.y1
    }
}

impl Rectangle<f32> {
    /// Smallest integer rectangle covering every pixel the rectangle touches
    ///
    /// Minimum corner is floored, maximum corner is ceiled
    pub fn to_pixel_bounds(&self) -> Rectangle<i32> {
        Rectangle {
            x1: self.x1.floor() as i32,
            y1: self.y1.floor() as i32,
            x2: self.x2.ceil() as i32,
            y2: self.y2.ceil() as i32,
        }
    }
}
