//! # Label Layout
//!
//! Coordinates, the description wrap estimator, and the vertical cursor.
//!
//! ## Static vs Dynamic Regions
//! ```text
//! ┌──────────────────────────── 576 dots (72 mm @ 203 dpi) ───────────────┐
//! │  logo ............................................ y = 10             │
//! │  company header .................................. y = 60 .. 234      │  STATIC
//! │  info block (CAI, number, customer, seller) ..... y = 246 .. 618      │  (constants)
//! │  table header .................................... y = 628 .. 656      │
//! ├────────────────────────────────────────────────────────────────────────┤
//! │  items ........................................... y = 666 ..         │  DYNAMIC
//! │  totals, grand total, amount in words ...........  cursor             │  (cursor)
//! │  footer ..........................................  cursor             │
//! │  closing margin ..................................  = ^LL height       │
//! └────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the item region has caller-controlled cardinality, so only it and
//! what follows it move. Everything above `ITEMS_START_Y` is a template.

use crate::config::LabelConfig;
use crate::zpl::Font;

// =============================================================================
// Page
// =============================================================================

/// Printable width in dots.
pub const LABEL_WIDTH: u32 = 576;
pub const MARGIN_X: u32 = 20;
pub const CONTENT_WIDTH: u32 = LABEL_WIDTH - 2 * MARGIN_X;

pub const FONT_HEADING: Font = Font::new(30, 30);
pub const FONT_BODY: Font = Font::new(22, 22);
pub const FONT_ITEM: Font = Font::new(20, 20);
pub const FONT_CODE: Font = Font::new(18, 18);
pub const FONT_GRAND_TOTAL: Font = Font::new(34, 34);

/// Line pitch of multi-line header/info/footer blocks.
pub const BLOCK_LINE_HEIGHT: u32 = 24;
pub const DIVIDER_THICKNESS: u32 = 2;

// =============================================================================
// Static Region
// =============================================================================

/// Logo is 128 dots wide, centered.
pub const LOGO_X: u32 = (LABEL_WIDTH - 128) / 2;
pub const LOGO_Y: u32 = 10;

pub const HEADER_NAME_Y: u32 = 60;
pub const HEADER_ADDRESS_Y: u32 = 100;
pub const HEADER_ADDRESS_LINES: u32 = 2;
pub const HEADER_TAX_ID_Y: u32 = 152;
pub const HEADER_PHONE_Y: u32 = 178;
pub const HEADER_EMAIL_Y: u32 = 204;
pub const HEADER_DIVIDER_Y: u32 = 234;

pub const INFO_DOC_TYPE_Y: u32 = 246;
pub const INFO_CAI_Y: u32 = 282;
pub const INFO_CAI_LINES: u32 = 2;
pub const INFO_NUMBER_Y: u32 = 332;
pub const INFO_DATE_Y: u32 = 358;
pub const INFO_SALE_TYPE_Y: u32 = 384;
pub const INFO_CUSTOMER_Y: u32 = 410;
pub const INFO_CUSTOMER_LINES: u32 = 2;
pub const INFO_CUSTOMER_TAX_ID_Y: u32 = 460;
pub const INFO_CUSTOMER_CODE_Y: u32 = 486;
pub const INFO_ADDRESS_Y: u32 = 512;
pub const INFO_ADDRESS_LINES: u32 = 2;
pub const INFO_SELLER_Y: u32 = 562;
pub const INFO_BRANCH_Y: u32 = 588;
pub const INFO_DIVIDER_Y: u32 = 618;

/// Time field shares the date row, right half.
pub const INFO_TIME_X: u32 = 320;

pub const TABLE_HEADER_Y: u32 = 628;
pub const TABLE_DIVIDER_Y: u32 = 656;

// =============================================================================
// Item Columns
// =============================================================================

pub const COL_DESCRIPTION_X: u32 = MARGIN_X;
pub const COL_DESCRIPTION_WIDTH: u32 = 270;
pub const COL_QUANTITY_X: u32 = 295;
pub const COL_QUANTITY_WIDTH: u32 = 60;
pub const COL_PRICE_X: u32 = 360;
pub const COL_PRICE_WIDTH: u32 = 96;
pub const COL_TOTAL_X: u32 = 460;
pub const COL_TOTAL_WIDTH: u32 = 96;

// =============================================================================
// Dynamic Region
// =============================================================================

/// First item row. The cursor starts here.
pub const ITEMS_START_Y: u32 = 666;

/// Row pitch of item text (font 20 + leading).
pub const LINE_HEIGHT: u32 = 22;
/// Extra space after a code line.
pub const CODE_GAP: u32 = 4;
/// Space between items.
pub const ITEM_GAP: u32 = 8;

/// Tuned to `COL_DESCRIPTION_WIDTH` at `FONT_ITEM`.
pub const DEFAULT_CHARS_PER_LINE: u32 = 18;
pub const MIN_WRAPPED_LINES: u32 = 1;
/// Longer descriptions are cut off on paper; the data is untouched.
pub const MAX_WRAPPED_LINES: u32 = 5;

pub const TOTALS_SPACER: u32 = 10;
pub const TOTAL_ROW_HEIGHT: u32 = 26;
/// Divider line plus breathing room below it.
pub const DIVIDER_ADVANCE: u32 = 12;
pub const GRAND_TOTAL_HEIGHT: u32 = 44;
pub const WORDS_LINES: u32 = 3;
pub const WORDS_GAP: u32 = 12;

pub const FOOTER_RANGE_LINES: u32 = 2;
pub const FOOTER_COPIES_LINES: u32 = 2;
pub const FOOTER_LEGAL_LINES: u32 = 2;
pub const FOOTER_ROW_GAP: u32 = 4;
pub const FOOTER_PROMO_HEIGHT: u32 = 36;

/// Blank feed after the last footer row.
pub const CLOSING_MARGIN: u32 = 40;

// =============================================================================
// Line Estimator
// =============================================================================

/// Rows a description wraps to at the default width, clamped to `[1, 5]`.
///
/// `ceil(chars / 18)`. Characters are Unicode scalar values, so accented
/// descriptions count the way the printer renders them.
///
/// ## Example
/// ```rust
/// use sidcop_core::layout::estimate_lines;
///
/// assert_eq!(estimate_lines(""), 1);
/// assert_eq!(estimate_lines("Coca Cola 600ml"), 1);
/// assert_eq!(estimate_lines("Galleta de Vainilla Familiar"), 2);
/// assert_eq!(estimate_lines(&"x".repeat(500)), 5);
/// ```
pub fn estimate_lines(description: &str) -> u32 {
    estimate_lines_with(description, DEFAULT_CHARS_PER_LINE)
}

/// [`estimate_lines`] with an explicit column width. Zero is treated as one.
pub fn estimate_lines_with(description: &str, chars_per_line: u32) -> u32 {
    let per_line = chars_per_line.max(1) as usize;
    let chars = description.chars().count();
    let lines = chars.div_ceil(per_line);
    (lines.min(MAX_WRAPPED_LINES as usize) as u32).max(MIN_WRAPPED_LINES)
}

/// Whether an item prints its secondary code on its own row.
pub fn has_code_line(code: Option<&str>) -> bool {
    code.map(|c| !c.trim().is_empty()).unwrap_or(false)
}

impl LabelConfig {
    /// [`estimate_lines`] at this configuration's `chars_per_line`.
    pub fn estimate_lines(&self, description: &str) -> u32 {
        estimate_lines_with(description, self.chars_per_line)
    }
}

/// Vertical advance an item contributes, including the trailing gap.
pub fn item_advance(description_lines: u32, has_code: bool) -> u32 {
    let code = if has_code { LINE_HEIGHT + CODE_GAP } else { 0 };
    description_lines * LINE_HEIGHT + code + ITEM_GAP
}

// =============================================================================
// Layout Cursor
// =============================================================================

/// Running Y offset while the body is composed.
///
/// Only moves forward: the API has no way to go back up the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCursor {
    y: u32,
}

impl LayoutCursor {
    pub const fn new(start: u32) -> Self {
        LayoutCursor { y: start }
    }

    /// Current Y in dots.
    #[inline]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Moves down by `dy` dots and returns the new Y.
    #[inline]
    pub fn advance(&mut self, dy: u32) -> u32 {
        self.y = self.y.saturating_add(dy);
        self.y
    }

    /// Moves down by `lines` rows of `line_height`.
    #[inline]
    pub fn advance_lines(&mut self, lines: u32, line_height: u32) -> u32 {
        self.advance(lines.saturating_mul(line_height))
    }
}

impl Default for LayoutCursor {
    fn default() -> Self {
        LayoutCursor::new(ITEMS_START_Y)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
