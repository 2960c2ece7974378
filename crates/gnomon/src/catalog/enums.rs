//! Fixed string vocabularies used by the built-in catalog.

/// Unit spaces for coordinate attributes: data-space or screen-space.
pub const COORDINATE_UNITS: &[&str] = &["data", "screen"];

/// Span direction: `width` runs along x, `height` along y.
pub const DIMENSIONS: &[&str] = &["width", "height"];

/// Which edges of an editable box may be dragged.
pub const BOX_RESIZABLE: &[&str] = &[
    "none", "left", "right", "top", "bottom", "x", "y", "all",
];

/// In which directions an editable box may be moved.
pub const BOX_MOVABLE: &[&str] = &["none", "x", "y", "both"];

/// Line endpoint rendering, following SVG `stroke-linecap`.
pub const LINE_CAPS: &[&str] = &["butt", "round", "square"];

/// Line corner rendering, following SVG `stroke-linejoin`.
pub const LINE_JOINS: &[&str] = &["miter", "round", "bevel"];

/// Named dash patterns.
pub const LINE_DASHES: &[&str] = &["solid", "dashed", "dotted", "dotdash", "dashdot"];

/// Named hatch fill patterns.
pub const HATCH_PATTERNS: &[&str] = &[
    "blank",
    "dot",
    "ring",
    "horizontal_line",
    "vertical_line",
    "cross",
    "horizontal_dash",
    "vertical_dash",
    "spiral",
    "right_diagonal_line",
    "left_diagonal_line",
    "diagonal_cross",
    "right_diagonal_dash",
    "left_diagonal_dash",
    "horizontal_wave",
    "vertical_wave",
    "criss_cross",
];
