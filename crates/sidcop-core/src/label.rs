//! # Invoice Label Builder
//!
//! Turns an [`InvoiceDocument`] into a complete ZPL label.
//!
//! ## Build Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  audit_invoice ──► findings logged, never fatal                         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  header ──► info block ──► table header        (constant Y offsets)     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  cursor = ITEMS_START_Y                                                 │
//! │  for item: estimate_lines ──► block + columns ──► cursor += rows        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  totals (8 rows) ──► Total ──► "Son: ... Lempiras" ──► footer           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  height = cursor + CLOSING_MARGIN                                       │
//! │  ^XA, ^LL{height}, ^PW, ^CI28, body, logo, ^XZ                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The height is only known once the body is laid out, so the body is built
//! into its own buffer and the preamble is written around it afterwards.

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::config::LabelConfig;
use crate::format::{
    format_currency, format_date, format_date_or, format_quantity, format_time, local_now, text_or,
};
use crate::layout::{
    has_code_line, LayoutCursor, BLOCK_LINE_HEIGHT, CLOSING_MARGIN, CODE_GAP, COL_DESCRIPTION_WIDTH,
    COL_DESCRIPTION_X, COL_PRICE_WIDTH, COL_PRICE_X, COL_QUANTITY_WIDTH, COL_QUANTITY_X,
    COL_TOTAL_WIDTH, COL_TOTAL_X, CONTENT_WIDTH, DIVIDER_ADVANCE, DIVIDER_THICKNESS, FONT_BODY,
    FONT_CODE, FONT_GRAND_TOTAL, FONT_HEADING, FONT_ITEM, FOOTER_COPIES_LINES, FOOTER_LEGAL_LINES,
    FOOTER_PROMO_HEIGHT, FOOTER_RANGE_LINES, FOOTER_ROW_GAP, GRAND_TOTAL_HEIGHT, HEADER_ADDRESS_LINES,
    HEADER_ADDRESS_Y, HEADER_DIVIDER_Y, HEADER_EMAIL_Y, HEADER_NAME_Y, HEADER_PHONE_Y,
    HEADER_TAX_ID_Y, INFO_ADDRESS_LINES, INFO_ADDRESS_Y, INFO_BRANCH_Y, INFO_CAI_LINES, INFO_CAI_Y,
    INFO_CUSTOMER_CODE_Y, INFO_CUSTOMER_LINES, INFO_CUSTOMER_TAX_ID_Y, INFO_CUSTOMER_Y, INFO_DATE_Y,
    INFO_DIVIDER_Y, INFO_DOC_TYPE_Y, INFO_NUMBER_Y, INFO_SALE_TYPE_Y, INFO_SELLER_Y, INFO_TIME_X,
    ITEMS_START_Y, ITEM_GAP, LABEL_WIDTH, LINE_HEIGHT, LOGO_X, LOGO_Y, MARGIN_X, TABLE_DIVIDER_Y,
    TABLE_HEADER_Y, TOTALS_SPACER, TOTAL_ROW_HEIGHT, WORDS_GAP, WORDS_LINES,
};
use crate::money::Money;
use crate::types::{InvoiceDocument, InvoiceLine, InvoiceTotals};
use crate::validation::audit_invoice;
use crate::words::to_words;
use crate::zpl::{self, Justify, ZplBuilder};

/// Placeholder for identifiers the invoice does not carry.
pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_DOCUMENT_TYPE: &str = "FACTURA";
pub const DEFAULT_SALE_TYPE: &str = "CONTADO";
pub const DEFAULT_CUSTOMER: &str = "CONSUMIDOR FINAL";
pub const DEFAULT_DESCRIPTION: &str = "Producto";

pub const COPY_DISTRIBUTION: &str = "ORIGINAL: CLIENTE / COPIA: EMISOR";
pub const LEGAL_NOTICE: &str = "La factura es beneficio de todos. ¡Exíjala!";

/// Company logo, 128×40 dots, ZPL ASCII-compressed. Printed verbatim.
pub const LOGO_BITMAP: &str =
    "^GFA,640,640,16,!8gP01::::::::8I0gJFI01:::::::8gP01::8I0gJFI01:::::::8gP01:::::::::!";

// =============================================================================
// Output
// =============================================================================

/// A generated label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMarkup {
    /// Complete ZPL document, `^XA` through `^XZ`.
    pub markup: String,
    /// Declared label length (`^LL`) in dots.
    pub height: u32,
    pub item_count: usize,
}

// =============================================================================
// Entry Point
// =============================================================================

/// Generates the label for `invoice` with default settings and the current
/// Honduras time as the date fallback.
///
/// Never fails: missing data prints as placeholders or zeros.
///
/// ## Example
/// ```rust
/// use sidcop_core::{generate_label_markup, InvoiceDocument};
///
/// let zpl = generate_label_markup(&InvoiceDocument::default());
/// assert!(zpl.starts_with("^XA\n^LL"));
/// assert!(zpl.trim_end().ends_with("^XZ"));
/// ```
pub fn generate_label_markup(invoice: &InvoiceDocument) -> String {
    let config = LabelConfig::default();
    let now = local_now(config.utc_offset_minutes);
    LabelBuilder::new(config).build(invoice, now).markup
}

// =============================================================================
// Builder
// =============================================================================

/// Lays out invoice labels for one configuration.
///
/// Holds no per-label state: `build` can be called any number of times,
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct LabelBuilder {
    config: LabelConfig,
}

impl LabelBuilder {
    pub fn new(config: LabelConfig) -> Self {
        LabelBuilder { config }
    }

    /// Builds the label. `now` is used wherever the invoice has no usable date.
    pub fn build(&self, invoice: &InvoiceDocument, now: NaiveDateTime) -> LabelMarkup {
        let number = text_or(invoice.number.as_deref(), NOT_AVAILABLE);

        let findings = audit_invoice(invoice, self.config.utc_offset_minutes);
        if !findings.is_empty() {
            warn!(
                invoice = number,
                findings = findings.len(),
                "Invoice has missing or inconsistent fields, printing with fallbacks"
            );
            for finding in &findings {
                debug!(invoice = number, %finding, "Audit finding");
            }
        }

        let mut body = ZplBuilder::new();
        self.emit_header(&mut body, invoice);
        self.emit_info(&mut body, invoice, now);
        self.emit_table_header(&mut body);

        let mut cursor = LayoutCursor::new(ITEMS_START_Y);
        for item in &invoice.items {
            self.emit_item(&mut body, &mut cursor, item);
        }
        debug!(section = "items", count = invoice.items.len(), y = cursor.y(), "Items laid out");

        self.emit_totals(&mut body, &mut cursor, &invoice.totals);
        self.emit_footer(&mut body, &mut cursor, invoice);

        let height = cursor.y() + CLOSING_MARGIN;

        let mut document = ZplBuilder::new();
        document
            .raw(zpl::START)
            .label_length(height)
            .print_width(LABEL_WIDTH)
            .utf8()
            .raw(&body.into_string())
            .graphic_field(LOGO_X, LOGO_Y, LOGO_BITMAP)
            .raw(zpl::END);
        let markup = document.into_string();

        info!(
            invoice = number,
            items = invoice.items.len(),
            height,
            bytes = markup.len(),
            "Label generated"
        );

        LabelMarkup {
            markup,
            height,
            item_count: invoice.items.len(),
        }
    }

    // -------------------------------------------------------------------------
    // Static region
    // -------------------------------------------------------------------------

    fn emit_header(&self, zpl: &mut ZplBuilder, invoice: &InvoiceDocument) {
        let company = &invoice.company;
        let name = text_or(company.name.as_deref(), &self.config.company_fallback);
        let phones = company
            .phones
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" / ");

        zpl.block(MARGIN_X, HEADER_NAME_Y, FONT_HEADING, CONTENT_WIDTH, 1, Justify::Center, name)
            .block(
                MARGIN_X,
                HEADER_ADDRESS_Y,
                FONT_BODY,
                CONTENT_WIDTH,
                HEADER_ADDRESS_LINES,
                Justify::Center,
                text_or(company.address.as_deref(), ""),
            )
            .block(
                MARGIN_X,
                HEADER_TAX_ID_Y,
                FONT_BODY,
                CONTENT_WIDTH,
                1,
                Justify::Center,
                &format!("RTN: {}", text_or(company.tax_id.as_deref(), NOT_AVAILABLE)),
            )
            .block(
                MARGIN_X,
                HEADER_PHONE_Y,
                FONT_BODY,
                CONTENT_WIDTH,
                1,
                Justify::Center,
                &format!("Tel: {}", text_or(Some(phones.as_str()), NOT_AVAILABLE)),
            )
            .block(
                MARGIN_X,
                HEADER_EMAIL_Y,
                FONT_BODY,
                CONTENT_WIDTH,
                1,
                Justify::Center,
                &format!("Correo: {}", text_or(company.email.as_deref(), NOT_AVAILABLE)),
            );
        divider(zpl, HEADER_DIVIDER_Y);

        debug!(section = "header", "Header emitted");
    }

    fn emit_info(&self, zpl: &mut ZplBuilder, invoice: &InvoiceDocument, now: NaiveDateTime) {
        let offset = self.config.utc_offset_minutes;
        let customer = &invoice.customer;
        let issued = invoice.issue_date.as_deref();

        zpl.block(
            MARGIN_X,
            INFO_DOC_TYPE_Y,
            FONT_HEADING,
            CONTENT_WIDTH,
            1,
            Justify::Center,
            text_or(invoice.document_type.as_deref(), DEFAULT_DOCUMENT_TYPE),
        )
        .block(
            MARGIN_X,
            INFO_CAI_Y,
            FONT_BODY,
            CONTENT_WIDTH,
            INFO_CAI_LINES,
            Justify::Left,
            &format!("CAI: {}", text_or(invoice.authorization.cai.as_deref(), NOT_AVAILABLE)),
        )
        .field(
            MARGIN_X,
            INFO_NUMBER_Y,
            FONT_BODY,
            &format!("No. Factura: {}", text_or(invoice.number.as_deref(), NOT_AVAILABLE)),
        )
        .field(
            MARGIN_X,
            INFO_DATE_Y,
            FONT_BODY,
            &format!("Fecha: {}", format_date(issued, now, offset)),
        )
        .field(
            INFO_TIME_X,
            INFO_DATE_Y,
            FONT_BODY,
            &format!("Hora: {}", format_time(issued, now, offset)),
        )
        .field(
            MARGIN_X,
            INFO_SALE_TYPE_Y,
            FONT_BODY,
            &format!("Tipo de venta: {}", text_or(invoice.sale_type.as_deref(), DEFAULT_SALE_TYPE)),
        )
        .block(
            MARGIN_X,
            INFO_CUSTOMER_Y,
            FONT_BODY,
            CONTENT_WIDTH,
            INFO_CUSTOMER_LINES,
            Justify::Left,
            &format!("Cliente: {}", text_or(customer.name.as_deref(), DEFAULT_CUSTOMER)),
        )
        .field(
            MARGIN_X,
            INFO_CUSTOMER_TAX_ID_Y,
            FONT_BODY,
            &format!("RTN Cliente: {}", text_or(customer.tax_id.as_deref(), NOT_AVAILABLE)),
        )
        .field(
            MARGIN_X,
            INFO_CUSTOMER_CODE_Y,
            FONT_BODY,
            &format!("Código: {}", text_or(customer.id.as_deref(), NOT_AVAILABLE)),
        )
        .field(
            INFO_TIME_X,
            INFO_CUSTOMER_CODE_Y,
            FONT_BODY,
            &format!("Tel: {}", text_or(customer.phone.as_deref(), NOT_AVAILABLE)),
        )
        .block(
            MARGIN_X,
            INFO_ADDRESS_Y,
            FONT_BODY,
            CONTENT_WIDTH,
            INFO_ADDRESS_LINES,
            Justify::Left,
            &format!("Dirección: {}", text_or(customer.address.as_deref(), NOT_AVAILABLE)),
        )
        .field(
            MARGIN_X,
            INFO_SELLER_Y,
            FONT_BODY,
            &format!("Vendedor: {}", text_or(invoice.seller.as_deref(), NOT_AVAILABLE)),
        )
        .field(
            MARGIN_X,
            INFO_BRANCH_Y,
            FONT_BODY,
            &format!("Sucursal: {}", text_or(invoice.branch.as_deref(), NOT_AVAILABLE)),
        );
        divider(zpl, INFO_DIVIDER_Y);

        debug!(section = "info", "Info block emitted");
    }

    fn emit_table_header(&self, zpl: &mut ZplBuilder) {
        zpl.field(COL_DESCRIPTION_X, TABLE_HEADER_Y, FONT_ITEM, "Descripción")
            .block(COL_QUANTITY_X, TABLE_HEADER_Y, FONT_ITEM, COL_QUANTITY_WIDTH, 1, Justify::Center, "Cant")
            .block(COL_PRICE_X, TABLE_HEADER_Y, FONT_ITEM, COL_PRICE_WIDTH, 1, Justify::Right, "Precio")
            .block(COL_TOTAL_X, TABLE_HEADER_Y, FONT_ITEM, COL_TOTAL_WIDTH, 1, Justify::Right, "Total");
        divider(zpl, TABLE_DIVIDER_Y);
    }

    // -------------------------------------------------------------------------
    // Dynamic region
    // -------------------------------------------------------------------------

    fn emit_item(&self, zpl: &mut ZplBuilder, cursor: &mut LayoutCursor, item: &InvoiceLine) {
        let symbol = &self.config.currency_symbol;
        let description = text_or(item.description.as_deref(), DEFAULT_DESCRIPTION);
        let lines = self.config.estimate_lines(description);
        let row = cursor.y();

        zpl.block(
            COL_DESCRIPTION_X,
            row,
            FONT_ITEM,
            COL_DESCRIPTION_WIDTH,
            lines,
            Justify::Left,
            description,
        )
        .block(
            COL_QUANTITY_X,
            row,
            FONT_ITEM,
            COL_QUANTITY_WIDTH,
            1,
            Justify::Center,
            &format_quantity(item.quantity),
        )
        .block(
            COL_PRICE_X,
            row,
            FONT_ITEM,
            COL_PRICE_WIDTH,
            1,
            Justify::Right,
            &format_currency(item.unit_price.unwrap_or_default(), symbol),
        )
        .block(
            COL_TOTAL_X,
            row,
            FONT_ITEM,
            COL_TOTAL_WIDTH,
            1,
            Justify::Right,
            &format_currency(item.line_total(), symbol),
        );
        cursor.advance_lines(lines, LINE_HEIGHT);

        if has_code_line(item.code.as_deref()) {
            let code = text_or(item.code.as_deref(), "");
            zpl.field(COL_DESCRIPTION_X, cursor.y(), FONT_CODE, code);
            cursor.advance(LINE_HEIGHT + CODE_GAP);
        }

        cursor.advance(ITEM_GAP);
    }

    fn emit_totals(&self, zpl: &mut ZplBuilder, cursor: &mut LayoutCursor, totals: &InvoiceTotals) {
        let symbol = &self.config.currency_symbol;

        cursor.advance(TOTALS_SPACER);
        divider(zpl, cursor.y());
        cursor.advance(DIVIDER_ADVANCE);

        let rows: [(&str, Option<Money>); 8] = [
            ("Subtotal", totals.subtotal),
            ("Descuento", totals.discount),
            ("Importe Exento", totals.exempt),
            ("Importe Exonerado", totals.exonerated),
            ("Importe Gravado 15%", totals.taxed_15),
            ("Importe Gravado 18%", totals.taxed_18),
            ("ISV 15%", totals.tax_15),
            ("ISV 18%", totals.tax_18),
        ];
        for (label, amount) in rows {
            let text = format!("{}: {}", label, format_currency(amount.unwrap_or_default(), symbol));
            zpl.block(MARGIN_X, cursor.y(), FONT_BODY, CONTENT_WIDTH, 1, Justify::Right, &text);
            cursor.advance(TOTAL_ROW_HEIGHT);
        }

        divider(zpl, cursor.y());
        cursor.advance(DIVIDER_ADVANCE);

        let total = totals.total.unwrap_or_default();
        zpl.block(
            MARGIN_X,
            cursor.y(),
            FONT_GRAND_TOTAL,
            CONTENT_WIDTH,
            1,
            Justify::Right,
            &format!("Total: {}", format_currency(total, symbol)),
        );
        cursor.advance(GRAND_TOTAL_HEIGHT);

        let words = format!(
            "{} {} {}",
            self.config.legal_phrase,
            to_words(total),
            self.config.currency_name
        );
        zpl.block(
            MARGIN_X,
            cursor.y(),
            FONT_BODY,
            CONTENT_WIDTH,
            WORDS_LINES,
            Justify::Center,
            words.trim(),
        );
        cursor.advance_lines(WORDS_LINES, BLOCK_LINE_HEIGHT);
        cursor.advance(WORDS_GAP);

        debug!(section = "totals", y = cursor.y(), total = %total, "Totals emitted");
    }

    fn emit_footer(&self, zpl: &mut ZplBuilder, cursor: &mut LayoutCursor, invoice: &InvoiceDocument) {
        let auth = &invoice.authorization;
        let offset = self.config.utc_offset_minutes;

        let range = format!(
            "Rango autorizado: Del {} al {}",
            text_or(auth.range_start.as_deref(), NOT_AVAILABLE),
            text_or(auth.range_end.as_deref(), NOT_AVAILABLE)
        );
        self.footer_block(zpl, cursor, FOOTER_RANGE_LINES, Justify::Left, &range);

        let deadline = format!(
            "Fecha límite de emisión: {}",
            format_date_or(auth.deadline.as_deref(), NOT_AVAILABLE, offset)
        );
        self.footer_block(zpl, cursor, 1, Justify::Left, &deadline);

        let authorized_by = format!(
            "Autorizado por: {}",
            text_or(auth.authorized_by.as_deref(), NOT_AVAILABLE)
        );
        self.footer_block(zpl, cursor, 1, Justify::Left, &authorized_by);

        self.footer_block(zpl, cursor, FOOTER_COPIES_LINES, Justify::Center, COPY_DISTRIBUTION);
        self.footer_block(zpl, cursor, FOOTER_LEGAL_LINES, Justify::Center, LEGAL_NOTICE);

        zpl.block(
            MARGIN_X,
            cursor.y(),
            FONT_HEADING,
            CONTENT_WIDTH,
            1,
            Justify::Center,
            text_or(Some(self.config.promo_message.as_str()), ""),
        );
        cursor.advance(FOOTER_PROMO_HEIGHT);

        debug!(section = "footer", y = cursor.y(), "Footer emitted");
    }

    /// Footer rows have fixed line counts: their text is short and known.
    fn footer_block(
        &self,
        zpl: &mut ZplBuilder,
        cursor: &mut LayoutCursor,
        lines: u32,
        justify: Justify,
        text: &str,
    ) {
        zpl.block(MARGIN_X, cursor.y(), FONT_BODY, CONTENT_WIDTH, lines, justify, text);
        cursor.advance_lines(lines, BLOCK_LINE_HEIGHT);
        cursor.advance(FOOTER_ROW_GAP);
    }
}

fn divider(zpl: &mut ZplBuilder, y: u32) {
    zpl.graphic_box(MARGIN_X, y, CONTENT_WIDTH, DIVIDER_THICKNESS, DIVIDER_THICKNESS);
}

// =============================================================================
// Unit Tests
// =============================================================================
