//! Minimal ZPL command builder for thermal label printers.
//!
//! Produces line-oriented text: one command group per line, with the whole
//! document framed by `^XA` / `^XZ`. Only the handful of commands the invoice
//! label needs are supported.
//!
//! ```rust
//! use sidcop_core::zpl::{Font, Justify, ZplBuilder};
//!
//! let mut zpl = ZplBuilder::new();
//! zpl.field(20, 60, Font::new(30, 30), "SIDCOP")
//!     .block(20, 100, Font::new(22, 22), 536, 2, Justify::Center, "Col. Kennedy")
//!     .graphic_box(20, 234, 536, 2, 2);
//! let body = zpl.build();
//! assert!(body.starts_with("^FO20,60^A0N,30,30^FDSIDCOP^FS"));
//! ```

use std::fmt::Write as _;

/// Start of label format.
pub const START: &str = "^XA";
/// End of label format.
pub const END: &str = "^XZ";

/// Scalable font `0` at a given size in dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub height: u32,
    pub width: u32,
}

impl Font {
    pub const fn new(height: u32, width: u32) -> Self {
        Font { height, width }
    }
}

/// `^FB` text justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Left,
    Center,
    Right,
}

impl Justify {
    fn code(self) -> char {
        match self {
            Justify::Left => 'L',
            Justify::Center => 'C',
            Justify::Right => 'R',
        }
    }
}

/// Builder for a ZPL command buffer.
#[derive(Debug, Default)]
pub struct ZplBuilder {
    buffer: String,
}

impl ZplBuilder {
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(4096),
        }
    }

    // -----------------------------------------------------------------------
    // Document framing
    // -----------------------------------------------------------------------

    /// `^LL` - label length in dots.
    pub fn label_length(&mut self, dots: u32) -> &mut Self {
        self.line(format_args!("^LL{}", dots))
    }

    /// `^PW` - print width in dots.
    pub fn print_width(&mut self, dots: u32) -> &mut Self {
        self.line(format_args!("^PW{}", dots))
    }

    /// `^CI28` - field data is UTF-8.
    pub fn utf8(&mut self) -> &mut Self {
        self.line(format_args!("^CI28"))
    }

    // -----------------------------------------------------------------------
    // Fields
    // -----------------------------------------------------------------------

    /// Single-line field at `(x, y)`.
    pub fn field(&mut self, x: u32, y: u32, font: Font, data: &str) -> &mut Self {
        let (hex, data) = escape_field_data(data);
        self.line(format_args!(
            "^FO{},{}^A0N,{},{}{}^FD{}^FS",
            x,
            y,
            font.height,
            font.width,
            if hex { "^FH" } else { "" },
            data
        ))
    }

    /// `^FB` text block: wraps inside `width` for at most `lines` rows.
    ///
    /// Text that needs more rows than `lines` is cut off by the printer.
    #[allow(clippy::too_many_arguments)]
    pub fn block(
        &mut self,
        x: u32,
        y: u32,
        font: Font,
        width: u32,
        lines: u32,
        justify: Justify,
        data: &str,
    ) -> &mut Self {
        let (hex, data) = escape_field_data(data);
        self.line(format_args!(
            "^FO{},{}^A0N,{},{}^FB{},{},0,{},0{}^FD{}^FS",
            x,
            y,
            font.height,
            font.width,
            width,
            lines.max(1),
            justify.code(),
            if hex { "^FH" } else { "" },
            data
        ))
    }

    /// `^GB` - box; a height equal to the thickness draws a horizontal rule.
    pub fn graphic_box(&mut self, x: u32, y: u32, width: u32, height: u32, thickness: u32) -> &mut Self {
        self.line(format_args!("^FO{},{}^GB{},{},{}^FS", x, y, width, height, thickness))
    }

    /// Pre-encoded graphic (`^GF...`) placed at `(x, y)`. Not escaped.
    pub fn graphic_field(&mut self, x: u32, y: u32, graphic: &str) -> &mut Self {
        self.line(format_args!("^FO{},{}{}^FS", x, y, graphic))
    }

    /// Pre-encoded command text, appended as-is.
    pub fn raw(&mut self, commands: &str) -> &mut Self {
        self.buffer.push_str(commands.trim_end_matches('\n'));
        self.buffer.push('\n');
        self
    }

    /// Returns the accumulated commands.
    pub fn build(&self) -> String {
        self.buffer.clone()
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> &mut Self {
        // Writing into a String cannot fail.
        let _ = self.buffer.write_fmt(args);
        self.buffer.push('\n');
        self
    }
}

/// Escapes characters that would otherwise be read as commands.
///
/// Returns whether `^FH` is needed. With `^FH`, `_` introduces a hex byte,
/// so `_` itself must be escaped too. Line breaks become spaces: a field is
/// one logical line.
pub fn escape_field_data(data: &str) -> (bool, String) {
    let needs_hex = data.contains(['^', '~', '_']);
    let mut out = String::with_capacity(data.len());
    for ch in data.chars() {
        match ch {
            '^' if needs_hex => out.push_str("_5E"),
            '~' if needs_hex => out.push_str("_7E"),
            '_' if needs_hex => out.push_str("_5F"),
            '\r' | '\n' | '\t' => out.push(' '),
            other => out.push(other),
        }
    }
    (needs_hex, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_command_layout() {
        let mut zpl = ZplBuilder::new();
        zpl.field(20, 330, Font::new(22, 22), "No. Factura: 000-001");
        assert_eq!(zpl.build(), "^FO20,330^A0N,22,22^FDNo. Factura: 000-001^FS\n");
    }

    #[test]
    fn block_command_layout() {
        let mut zpl = ZplBuilder::new();
        zpl.block(20, 666, Font::new(20, 20), 270, 2, Justify::Left, "Galleta de Vainilla Familiar");
        assert_eq!(
            zpl.build(),
            "^FO20,666^A0N,20,20^FB270,2,0,L,0^FDGalleta de Vainilla Familiar^FS\n"
        );
    }

    #[test]
    fn block_never_declares_zero_lines() {
        let mut zpl = ZplBuilder::new();
        zpl.block(0, 0, Font::new(20, 20), 100, 0, Justify::Right, "x");
        assert!(zpl.build().contains("^FB100,1,0,R,0"));
    }

    #[test]
    fn escapes_command_characters() {
        let mut zpl = ZplBuilder::new();
        zpl.field(0, 0, Font::new(20, 20), "A^XZ~B_C");
        assert_eq!(zpl.build(), "^FO0,0^A0N,20,20^FH^FDA_5EXZ_7EB_5FC^FS\n");
    }

    #[test]
    fn plain_data_is_untouched() {
        let (hex, data) = escape_field_data("Pulpería Lupita #3");
        assert!(!hex);
        assert_eq!(data, "Pulpería Lupita #3");

        let (_, flattened) = escape_field_data("line1\nline2");
        assert_eq!(flattened, "line1 line2");
    }

    #[test]
    fn graphic_field_is_positioned_not_escaped() {
        let mut zpl = ZplBuilder::new();
        zpl.graphic_field(224, 10, "^GFA,4,4,1,F0F0");
        assert_eq!(zpl.build(), "^FO224,10^GFA,4,4,1,F0F0^FS\n");
    }

    #[test]
    fn framing_commands() {
        let mut zpl = ZplBuilder::new();
        zpl.label_length(1200).print_width(576).utf8().graphic_box(20, 234, 536, 2, 2);
        assert_eq!(
            zpl.into_string(),
            "^LL1200\n^PW576\n^CI28\n^FO20,234^GB536,2,2^FS\n"
        );
    }
}
