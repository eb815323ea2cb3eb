//! Canvas size and orientation transform.
//!
//! Strokes are always stored in portrait device coordinates. A landscape
//! page keeps those coordinates and rotates the whole content group:
//!
//! ```text
//! viewBox  = 0 0 V H
//! transform = rotate(90 H/2 V/2) translate(d d),  d = -|V - H| / 2
//! ```
//!
//! For the 1404×1872 device this is `rotate(90 702 936) translate(-234 -234)`.
//! Downstream rasterizers depend on this exact form.

use crate::model::{Orientation, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub horizontal_width: u32,
    pub vertical_width: u32,
    pub orientation: Orientation,
}

impl PageGeometry {
    pub const fn new(horizontal_width: u32, vertical_width: u32, orientation: Orientation) -> Self {
        Self {
            horizontal_width,
            vertical_width,
            orientation,
        }
    }

    pub const fn for_page(page: &Page, orientation: Orientation) -> Self {
        Self::new(page.horizontal_width, page.vertical_width, orientation)
    }

    /// Declared canvas `(width, height)`; axes swap for landscape.
    pub const fn canvas(&self) -> (u32, u32) {
        match self.orientation {
            Orientation::Portrait => (self.horizontal_width, self.vertical_width),
            Orientation::Landscape => (self.vertical_width, self.horizontal_width),
        }
    }

    /// `viewBox` attribute value.
    pub fn view_box(&self) -> String {
        let (w, h) = self.canvas();
        format!("0 0 {w} {h}")
    }

    /// Translation applied after the landscape rotation.
    pub const fn delta(&self) -> i64 {
        let diff = (self.vertical_width as i64 - self.horizontal_width as i64) / 2;
        -diff.abs()
    }

    /// Rotation pivot, the center of the portrait canvas.
    pub const fn pivot(&self) -> (u32, u32) {
        (self.horizontal_width / 2, self.vertical_width / 2)
    }

    /// Content group `transform` attribute, `None` for portrait.
    pub fn transform(&self) -> Option<String> {
        if !self.orientation.is_landscape() {
            return None;
        }
        let (cx, cy) = self.pivot();
        let d = self.delta();
        Some(format!("rotate(90 {cx} {cy}) translate({d} {d})"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICE: (u32, u32) = (1404, 1872);

    #[test]
    fn test_portrait() {
        let geo = PageGeometry::new(DEVICE.0, DEVICE.1, Orientation::Portrait);
        assert_eq!(geo.canvas(), (1404, 1872));
        assert_eq!(geo.view_box(), "0 0 1404 1872");
        assert_eq!(geo.transform(), None);
    }

    #[test]
    fn test_landscape_device() {
        let geo = PageGeometry::new(DEVICE.0, DEVICE.1, Orientation::Landscape);
        assert_eq!(geo.canvas(), (1872, 1404));
        assert_eq!(geo.view_box(), "0 0 1872 1404");
        assert_eq!(geo.delta(), -234);

        let transform = geo.transform().unwrap();
        assert!(transform.contains("rotate(90 702 936)"));
        assert!(transform.contains("translate(-234 -234)"));
        assert_eq!(transform, "rotate(90 702 936) translate(-234 -234)");
    }

    #[test]
    fn test_delta_is_never_positive() {
        // Wider than tall still translates towards negative
        let geo = PageGeometry::new(1872, 1404, Orientation::Landscape);
        assert_eq!(geo.delta(), -234);

        let square = PageGeometry::new(1000, 1000, Orientation::Landscape);
        assert_eq!(square.delta(), 0);
        assert_eq!(square.transform().unwrap(), "rotate(90 500 500) translate(0 0)");
    }

    #[test]
    fn test_for_page() {
        let page = Page::new(0, 5, Vec::new());
        let geo = PageGeometry::for_page(&page, Orientation::Landscape);
        assert_eq!(geo.pivot(), (702, 936));
    }
}
