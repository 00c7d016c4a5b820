//! Synthetic bounding boxes.
//!
//! There is no renderer behind these numbers. Boxes come from fixed tag and
//! class tables so that the same input always yields the same box, and the
//! tree builder later grows parents to enclose their children.

use crate::dom::DomNode;
use serde::Serialize;

/// Width assumed for an element with no parent box.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1200.0;
/// Gap between vertically stacked siblings.
pub const SIBLING_GAP: f32 = 10.0;
/// Horizontal inset of a child inside its parent (per side).
pub const CHILD_INSET: f32 = 20.0;

const DEFAULT_HEIGHT: f32 = 100.0;
const CONTAINER_MAX_WIDTH: f32 = 1280.0;

/// Axis-aligned box in synthetic pixels.
///
/// `top`/`left`/`right`/`bottom` are derived and kept in sync by every
/// mutator, so `right == x + width` and `bottom == y + height` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    top: f32,
    left: f32,
    right: f32,
    bottom: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            top: y,
            left: x,
            right: x + width,
            bottom: y + height,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
        self.bottom = self.y + height;
    }

    /// Grow downward so that `bottom >= target_bottom`. Never shrinks.
    pub fn grow_to_bottom(&mut self, target_bottom: f32) {
        if target_bottom > self.bottom {
            self.set_height(target_bottom - self.y);
        }
    }

    /// Same box moved to a new `y` with a new height.
    pub fn with_y_and_height(&self, y: f32, height: f32) -> Self {
        Self::new(self.x, y, self.width, height)
    }
}

/// Estimates boxes for a fixed viewport width.
#[derive(Debug, Clone, Copy)]
pub struct BoxEstimator {
    pub viewport_width: f32,
}

impl Default for BoxEstimator {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }
}

impl BoxEstimator {
    pub fn new(viewport_width: f32) -> Self {
        Self { viewport_width }
    }

    /// Box for `element`, the `sibling_index`-th included child of a parent
    /// whose (tentative) box is `parent`.
    ///
    /// Siblings always stack vertically, whatever the parent's layout mode.
    pub fn estimate(
        &self,
        element: &DomNode,
        depth: usize,
        sibling_index: usize,
        parent: Option<&BoundingBox>,
    ) -> BoundingBox {
        let tag = element.tag.as_str();
        let class = element.class_attr();

        // A zero parent width falls back like a missing parent.
        let parent_width = |fallback: f32| {
            parent
                .map(|p| p.width)
                .filter(|w| *w != 0.0)
                .unwrap_or(fallback)
        };
        let parent_x = parent.map_or(0.0, |p| p.x);
        let inset_width = parent.map_or(self.viewport_width, |p| p.width - 2.0 * CHILD_INSET);

        let mut width = inset_width;
        let mut height = DEFAULT_HEIGHT;
        let mut x = parent.map_or(0.0, |p| p.x + CHILD_INSET);
        let mut y = parent.map_or(0.0, |p| p.y + p.height + SIBLING_GAP);

        match tag {
            "header" | "nav" => {
                height = 80.0;
                width = parent_width(self.viewport_width);
                x = parent_x;
            }
            "footer" => {
                height = 200.0;
                width = parent_width(self.viewport_width);
                x = parent_x;
            }
            "main" => {
                height = 600.0;
                width = parent_width(self.viewport_width);
            }
            "section" => height = 400.0,
            "article" => height = 300.0,
            "aside" => {
                width = 300.0;
                height = 400.0;
            }
            "div" => {
                if class.contains("container") || class.contains("max-w-") {
                    width = CONTAINER_MAX_WIDTH.min(parent_width(self.viewport_width));
                }
                if class.contains("hero") || class.contains("banner") {
                    height = 500.0;
                }
                if class.contains("card") {
                    width = 350.0;
                    height = 280.0;
                }
                if class.contains("grid") {
                    height = 400.0;
                }
            }
            "h1" => height = 60.0,
            "h2" => height = 48.0,
            "h3" | "h4" | "h5" | "h6" => height = 36.0,
            "p" => height = 60.0,
            "button" | "a" => {
                height = 44.0;
                width = 150.0;
            }
            "img" => {
                height = 200.0;
                width = 300.0;
            }
            "form" => height = 300.0,
            "input" | "textarea" => {
                height = 44.0;
                width = parent.map_or(400.0, |p| p.width - 2.0 * CHILD_INSET);
            }
            "ul" | "ol" => height = 150.0,
            "li" => {
                height = 40.0;
                width = parent_width(200.0);
            }
            _ => {}
        }

        if sibling_index > 0 {
            if let Some(p) = parent {
                y = p.y + sibling_index as f32 * (height + SIBLING_GAP);
            }
        }

        tracing::trace!(tag, depth, sibling_index, x, y, width, height, "estimated box");

        BoundingBox::new(x, y, width, height)
    }
}

/// [`BoxEstimator::estimate`] at the default 1200px viewport.
pub fn estimate_box(
    element: &DomNode,
    depth: usize,
    sibling_index: usize,
    parent: Option<&BoundingBox>,
) -> BoundingBox {
    BoxEstimator::default().estimate(element, depth, sibling_index, parent)
}
