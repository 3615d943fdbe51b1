//! Core types for the compositor.
//!
//! Style schema consumed by the compositor and the layout bridge, plus the
//! geometry rectangle every stage agrees on.

// =============================================================================
// Geometry
// =============================================================================

/// Computed geometry of a node: position relative to its parent, size in cells.
///
/// Positions are signed (a node can be offset above or left of its parent).
/// Sizes are never negative; [`Rect::from_f32`] clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Build from raw provider output.
    ///
    /// Non-finite positions become 0, negative or NaN sizes become 0.
    pub fn from_f32(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x: finite_or_zero(x).round() as i32,
            y: finite_or_zero(y).round() as i32,
            width: clamp_size(width),
            height: clamp_size(height),
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    /// Same size, different origin.
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> Self {
        Self { x, y, ..*self }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

fn clamp_size(v: f32) -> u16 {
    if v.is_nan() || v <= 0.0 {
        0
    } else {
        v.round().min(u16::MAX as f32) as u16
    }
}

// =============================================================================
// Positioning
// =============================================================================

/// Positioning mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Normal flow: placed by the layout provider.
    #[default]
    Relative,
    /// Resolved against the containing block and painted above flow content.
    Absolute,
}

/// Overflow behavior for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Content can overflow container bounds (default).
    #[default]
    Visible,
    /// Content is clipped at container bounds.
    Hidden,
    /// Content is clipped and offset by a persistent scroll position.
    Scroll,
}

impl Overflow {
    /// Whether this value clips descendants.
    #[inline]
    pub fn clips(self) -> bool {
        !matches!(self, Self::Visible)
    }
}

// =============================================================================
// Layout hints
// =============================================================================

/// A dimension value that can be absolute (cells) or percentage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    Cells(u16),
    Percent(f32),
}

impl From<u16> for Dimension {
    fn from(value: u16) -> Self {
        Self::Cells(value)
    }
}

/// Flex direction for container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FlexDirection {
    #[default]
    Column = 0,
    Row = 1,
    ColumnReverse = 2,
    RowReverse = 3,
}

/// Flex wrap mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FlexWrap {
    #[default]
    NoWrap = 0,
    Wrap = 1,
    WrapReverse = 2,
}

/// Per-side spacing in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub const ZERO: Self = Self::all(0);

    pub const fn all(n: u16) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }
}

// =============================================================================
// Borders
// =============================================================================

bitflags::bitflags! {
    /// Which sides carry a border. Each side is one cell thick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Borders: u8 {
        const NONE = 0;
        const TOP = 1 << 0;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT = 1 << 3;
        const ALL = Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

impl Borders {
    /// Thickness per side as `(top, right, bottom, left)`.
    #[inline]
    pub fn thickness(self) -> (i32, i32, i32, i32) {
        (
            self.contains(Self::TOP) as i32,
            self.contains(Self::RIGHT) as i32,
            self.contains(Self::BOTTOM) as i32,
            self.contains(Self::LEFT) as i32,
        )
    }
}

/// Border drawing style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BorderStyle {
    /// ─ │ ┌ ┐ └ ┘
    #[default]
    Single = 0,
    /// ═ ║ ╔ ╗ ╚ ╝
    Double = 1,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded = 2,
    /// ━ ┃ ┏ ┓ ┗ ┛
    Bold = 3,
    /// - | + + + +
    Ascii = 4,
}

impl BorderStyle {
    /// Border characters: (horizontal, vertical, top_left, top_right, bottom_right, bottom_left)
    pub const fn chars(&self) -> (char, char, char, char, char, char) {
        match self {
            Self::Single => ('─', '│', '┌', '┐', '┘', '└'),
            Self::Double => ('═', '║', '╔', '╗', '╝', '╚'),
            Self::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
            Self::Bold => ('━', '┃', '┏', '┓', '┛', '┗'),
            Self::Ascii => ('-', '|', '+', '+', '+', '+'),
        }
    }
}

// =============================================================================
// Style
// =============================================================================

/// Style of one node.
///
/// `position`, the offsets, `z_index` and the overflow fields drive the
/// compositor. The remaining fields are layout hints forwarded to the layout
/// provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub position: Position,
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,
    pub z_index: Option<i32>,

    /// Shorthand for both axes; the per-axis fields win when set.
    pub overflow: Option<Overflow>,
    pub overflow_x: Option<Overflow>,
    pub overflow_y: Option<Overflow>,

    pub width: Dimension,
    pub height: Dimension,
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub flex_grow: f32,
    pub flex_shrink: Option<f32>,
    pub padding: Edges,
    pub gap: u16,

    pub borders: Borders,
    pub border_style: BorderStyle,

    /// Paint the whole box with this character before any content.
    pub fill: Option<char>,
}

impl Style {
    /// Effective horizontal overflow.
    #[inline]
    pub fn overflow_x(&self) -> Overflow {
        self.overflow_x.or(self.overflow).unwrap_or_default()
    }

    /// Effective vertical overflow.
    #[inline]
    pub fn overflow_y(&self) -> Overflow {
        self.overflow_y.or(self.overflow).unwrap_or_default()
    }

    /// Any axis set to [`Overflow::Scroll`].
    #[inline]
    pub fn is_scroll_container(&self) -> bool {
        self.overflow_x() == Overflow::Scroll || self.overflow_y() == Overflow::Scroll
    }

    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.position == Position::Absolute
    }

    /// Stacking order among absolute nodes, 0 when unset.
    #[inline]
    pub fn z_index(&self) -> i32 {
        self.z_index.unwrap_or(0)
    }

    // Builder-style setters for terse tree construction.

    pub fn absolute() -> Self {
        Self {
            position: Position::Absolute,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = Dimension::Cells(width);
        self.height = Dimension::Cells(height);
        self
    }

    pub fn with_width(mut self, width: Dimension) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: Dimension) -> Self {
        self.height = height;
        self
    }

    pub fn with_top(mut self, v: i32) -> Self {
        self.top = Some(v);
        self
    }

    pub fn with_right(mut self, v: i32) -> Self {
        self.right = Some(v);
        self
    }

    pub fn with_bottom(mut self, v: i32) -> Self {
        self.bottom = Some(v);
        self
    }

    pub fn with_left(mut self, v: i32) -> Self {
        self.left = Some(v);
        self
    }

    pub fn with_z_index(mut self, z: i32) -> Self {
        self.z_index = Some(z);
        self
    }

    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = Some(overflow);
        self
    }

    pub fn with_overflow_x(mut self, overflow: Overflow) -> Self {
        self.overflow_x = Some(overflow);
        self
    }

    pub fn with_overflow_y(mut self, overflow: Overflow) -> Self {
        self.overflow_y = Some(overflow);
        self
    }

    pub fn with_direction(mut self, direction: FlexDirection) -> Self {
        self.flex_direction = direction;
        self
    }

    pub fn with_flex_grow(mut self, grow: f32) -> Self {
        self.flex_grow = grow;
        self
    }

    pub fn with_padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_border(mut self, style: BorderStyle) -> Self {
        self.borders = Borders::ALL;
        self.border_style = style;
        self
    }

    pub fn with_fill(mut self, ch: char) -> Self {
        self.fill = Some(ch);
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_f32_clamps() {
        let r = Rect::from_f32(1.4, -2.6, -3.0, f32::NAN);
        assert_eq!(r, Rect::new(1, -3, 0, 0));

        let r = Rect::from_f32(f32::INFINITY, f32::NAN, 4.6, 2.0);
        assert_eq!(r, Rect::new(0, 0, 5, 2));
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(-2, 3, 5, 4);
        assert_eq!(r.right(), 3);
        assert_eq!(r.bottom(), 7);
        assert!(!r.is_empty());
        assert!(Rect::new(0, 0, 0, 4).is_empty());
    }

    #[test]
    fn test_overflow_axis_fallback() {
        let style = Style::default().with_overflow(Overflow::Hidden);
        assert_eq!(style.overflow_x(), Overflow::Hidden);
        assert_eq!(style.overflow_y(), Overflow::Hidden);

        let style = style.with_overflow_y(Overflow::Visible);
        assert_eq!(style.overflow_x(), Overflow::Hidden);
        assert_eq!(style.overflow_y(), Overflow::Visible);

        assert_eq!(Style::default().overflow_x(), Overflow::Visible);
    }

    #[test]
    fn test_scroll_container_any_axis() {
        assert!(Style::default().with_overflow_y(Overflow::Scroll).is_scroll_container());
        assert!(Style::default().with_overflow(Overflow::Scroll).is_scroll_container());
        assert!(!Style::default().with_overflow(Overflow::Hidden).is_scroll_container());
    }

    #[test]
    fn test_z_index_default() {
        assert_eq!(Style::default().z_index(), 0);
        assert_eq!(Style::absolute().with_z_index(-3).z_index(), -3);
    }

    #[test]
    fn test_border_thickness() {
        assert_eq!(Borders::ALL.thickness(), (1, 1, 1, 1));
        assert_eq!((Borders::TOP | Borders::LEFT).thickness(), (1, 0, 0, 1));
        assert_eq!(Borders::NONE.thickness(), (0, 0, 0, 0));
    }
}
