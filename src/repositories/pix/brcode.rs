//! Static Pix BR Code generation (EMV Merchant Presented Mode payload).
//!
//! The payload is a flat string of `ID + LEN + VALUE` fields closed by a
//! CRC-16/CCITT-FALSE checksum. Scanning apps reject any payload whose
//! checksum does not match, so the string must be passed around verbatim.

use unicode_normalization::UnicodeNormalization;

pub const DEFAULT_TX_ID: &str = "***";

const PIX_GUI: &str = "br.gov.bcb.pix";
const CRC_POLYNOMIAL: u16 = 0x1021;

/// Merchant data is fixed per deployment; only amount and transaction id
/// vary between charges.
pub struct BrCodeEncoder {
    key: String,
    merchant_name: String,
    merchant_city: String,
}

impl BrCodeEncoder {
    pub fn new(key: String, merchant_name: String, merchant_city: String) -> Self {
        BrCodeEncoder {
            key,
            merchant_name,
            merchant_city,
        }
    }

    pub fn charge(&self, amount_in_cents: i64, tx_id: &str) -> String {
        encode(
            &self.key,
            &self.merchant_name,
            &self.merchant_city,
            amount_in_cents,
            tx_id,
        )
    }
}

/// Renders a complete charge payload. Inputs are sanitized rather than
/// rejected; a non-positive amount produces an amountless charge, where the
/// payer's app prompts for the value.
pub fn encode(
    key: &str,
    merchant_name: &str,
    merchant_city: &str,
    amount_in_cents: i64,
    tx_id: &str,
) -> String {
    let key = sanitize_key(key);
    let name = sanitize_display(merchant_name, 25);
    let city = sanitize_display(merchant_city, 15);

    let mut payload = String::new();
    payload.push_str(&field("00", "01"));
    payload.push_str(&field(
        "26",
        &format!("{}{}", field("00", PIX_GUI), field("01", &key)),
    ));
    payload.push_str(&field("52", "0000"));
    payload.push_str(&field("53", "986"));
    if amount_in_cents > 0 {
        payload.push_str(&field("54", &format_amount(amount_in_cents)));
    }
    payload.push_str(&field("58", "BR"));
    payload.push_str(&field("59", &name));
    payload.push_str(&field("60", &city));
    payload.push_str(&field("62", &field("05", tx_id)));

    append_crc(payload)
}

fn field(id: &str, value: &str) -> String {
    format!("{id}{:02}{value}", value.chars().count())
}

fn sanitize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '.'))
        .collect()
}

// Truncate first, then decompose and drop combining marks, in that order.
fn sanitize_display(text: &str, max_len: usize) -> String {
    text.chars()
        .take(max_len)
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

fn format_amount(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

// The checksum covers the payload including its own "6304" tag prefix; the
// four hex digits themselves are appended after computation.
fn append_crc(mut payload: String) -> String {
    payload.push_str("6304");
    let crc = crc16(&payload);
    payload.push_str(&format!("{crc:04X}"));
    payload
}

/// CRC-16/CCITT-FALSE over the string's code unit values: polynomial 0x1021,
/// initial register 0xFFFF, no final XOR.
fn crc16(payload: &str) -> u16 {
    let mut crc: u16 = 0xFFFF;

    for c in payload.chars() {
        crc ^= (c as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ CRC_POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}
