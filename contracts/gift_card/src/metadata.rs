//! Token metadata rendering.
//!
//! `token_uri` returns a self-contained `data:` URI: a base64 JSON document
//! whose `image` field is itself a base64 SVG of the card. The layout is the
//! one legacy GiftCard documents use, byte for byte, so wallets and indexers
//! render old and new cards alike.
//!
//! Everything is rendered into fixed stack buffers; no allocator is needed.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use soroban_sdk::{Env, String};

use crate::errors::GiftCardError;

/// Longest card text accepted at mint, in bytes.
pub const MAX_TEXT_LEN: u32 = 64;

const SVG_CAP: usize = 4096;
const JSON_CAP: usize = 6144;
const URI_CAP: usize = 8448;

const URI_PREFIX: &str = "data:application/json;base64,";
const IMAGE_PREFIX: &str = "data:image/svg+xml;base64,";

const SVG_HEAD: &str = concat!(
    "<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink' id='evKbyYkUTOd1' viewBox='0 0 1200 719' shape-rendering='geometricPrecision' text-rendering='geometricPrecision' style='background-color:#111'>",
    "<rect width='1200.878676' height='264.338235' rx='0' ry='0' transform='matrix(1.18412-.158493 0.230223 1.720027-202.277452 504.012004)' fill='#151515' stroke-width='0'/>",
    "<rect width='1200.878676' height='264.338235' rx='0' ry='0' transform='matrix(1.188377-.122561 0.178029 1.72621-157.078064 507.438426)' fill='#222' stroke-width='0'/>",
    "<rect width='1200.878676' height='264.338235' rx='0' ry='0' transform='matrix(1.191742-.083735 0.121631 1.731098-121.64459 513.479528)' fill='#252525' stroke-width='0'/>",
    "<rect width='199.134804' height='146.267157' rx='73.13' ry='73.13' transform='matrix(.774232 0 0 1 923.344329 80)' fill='#333' stroke-width='0' stroke-linecap='round' stroke-linejoin='round'/>",
    "<g transform='matrix(1 0 0-1 626.932613 512.469013)'>",
    "<path d='M250.666,118.605C166.63,137.862,78.851,210.722,78.833,339.25C78.8065,528.227,227.362,641,373.5,641c161.141,0,296.096-126.56,296.125-301.75C669.659,132.127,483.711,76.4209,435.5,76.4209c-24.162,0-43.75,19.5879-43.75,43.7501c0,22.613,17.323,41.424,39.729,43.307c66.789,7.473,149.379,61.737,149.396,175.772C580.895,477.086,472.596,551,373.5,551c-81.2,0-202.976-59.138-203-211.75C170.485,243.715",
    ",251.171,205,311,205h100c69.977,2.475,125.487,54.465,125.5,134.25.018,113.979-89.818,166.75-163,166.75-63.193,0-157.962-45.373-157.982-166.75-.008-48.784,28.406-64.674,47.343-64.674c25.33,0,41.502,24.564,41.502,46.894c0,16.052-.445,21.656-.197,27.096C306.025,386.372,336.209,416,373.5,416c42.863,0,71.687-35.591,71.687-70.5c0-11.79-1.748-22.745-6.275-33.046M435.5,120.171c84.252,8.943,189.729,77.722,",
    "189.75,219.079C625.275,505.57,493.263,596,373.5,596c-138.204,0-248.81-109.425-248.834-256.75-.018-112.362,82.547-161.619,137.044-174.713c21.57-4.096,37.623-23.346,37.623-45.932c0-26.8784-21.789-48.6655-48.666-48.6655C207.376,69.9395,33,143.502,33,339.25C33,552.178,201,686,373.5,686C563.323,686,713.968,534.805,714,339.25c.038-234.833-210.446-306.5791-278.5-306.5791-48.324,0-87.5,39.1748-87.5,87.500",
    "1v225.329c0,14.083,11.417,25.5,25.5,25.5s25.5-11.417,25.5-25.5c0-4.972-.755-9.221-2.17-13.432-2.341-5.621-3.591-11.854-3.591-18.182c0-28.452,17.359-50.955,42.939-50.955c17.706,0,54.668,14.536,54.676,76.319C490.865,427.51,422.704,461,373.5,461c-58.867,0-113.8-47.24-113.8-117.583c0-5.384.801-12.432,1.322-20.142' transform='matrix(.183655 0 0 0.183655 304.904858 293.341673)' fill='none' stroke='#fff'",
    " stroke-width='21.6703' stroke-linecap='round' stroke-linejoin='round'/>",
    "</g>",
    "<text dx='0' dy='0' font-family='Tahoma' font-size='40' font-weight='400' transform='translate(118.854167 132.203159)' fill='#fffefe' stroke-width='0'>",
    "<tspan y='0' font-weight='400' stroke-width='0'>",
    "<![CDATA[Unity Crypto Gift Card]]>",
    "</tspan>",
    "</text>",
    "<text dx='0' dy='0' font-family='Tahoma' font-size='60' font-weight='400' transform='translate(109.427697 610.128262)' fill='#fff' stroke-width='0'>",
    "<tspan y='0' font-weight='400' stroke-width='0'>",
);

const SVG_MIDDLE: &str = "</tspan></text><text dx='0' dy='0' font-family='Tahoma' font-size='47.975' font-weight='400' transform='translate(116.189951 199.51879)' fill='#fff' stroke-width='0'><tspan y='0' font-weight='400' stroke-width='0'>";

const SVG_TAIL: &str = " USD</tspan></text></svg>";

/// Render the metadata URI for a card carrying `text` worth `usd` dollars.
pub fn token_uri(env: &Env, text: &String, usd: i128) -> Result<String, GiftCardError> {
    let mut raw = [0u8; MAX_TEXT_LEN as usize];
    let text = text_bytes(text, &mut raw)?;
    let usd = u128::try_from(usd).map_err(|_| GiftCardError::MathOverflow)?;

    let mut svg = Buffer::<SVG_CAP>::new();
    svg.push_str(SVG_HEAD)?;
    svg.push_xml_escaped(text)?;
    svg.push_str(SVG_MIDDLE)?;
    svg.push_decimal(usd)?;
    svg.push_str(SVG_TAIL)?;

    let mut json = Buffer::<JSON_CAP>::new();
    json.push_str("{\"name\": \"")?;
    json.push_json_escaped(text)?;
    json.push_str("\", \"description\": \"Unity ")?;
    json.push_decimal(usd)?;
    json.push_str(" USD Gift Card\", \"image\": \"")?;
    json.push_str(IMAGE_PREFIX)?;
    json.push_base64(svg.as_slice())?;
    json.push_str("\"}")?;

    let mut uri = Buffer::<URI_CAP>::new();
    uri.push_str(URI_PREFIX)?;
    uri.push_base64(json.as_slice())?;

    Ok(String::from_bytes(env, uri.as_slice()))
}

/// Check card text before it is stored: 1 to 64 bytes of UTF-8 without
/// control characters, which have no representation in the SVG.
pub fn validate_text(text: &String) -> Result<(), GiftCardError> {
    if text.is_empty() {
        return Err(GiftCardError::EmptyText);
    }
    let mut raw = [0u8; MAX_TEXT_LEN as usize];
    let bytes = text_bytes(text, &mut raw)?;
    if core::str::from_utf8(bytes).is_err() || bytes.iter().any(u8::is_ascii_control) {
        return Err(GiftCardError::InvalidText);
    }
    Ok(())
}

fn text_bytes<'a>(text: &String, raw: &'a mut [u8; MAX_TEXT_LEN as usize]) -> Result<&'a [u8], GiftCardError> {
    let len = text.len();
    if len > MAX_TEXT_LEN {
        return Err(GiftCardError::TextTooLong);
    }
    let slice = &mut raw[..len as usize];
    text.copy_into_slice(slice);
    Ok(slice)
}

/// Append-only byte buffer with a fixed capacity.
struct Buffer<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> Buffer<N> {
    fn new() -> Self {
        Self { bytes: [0u8; N], len: 0 }
    }

    fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    fn push(&mut self, data: &[u8]) -> Result<(), GiftCardError> {
        let end = self
            .len
            .checked_add(data.len())
            .filter(|end| *end <= N)
            .ok_or(GiftCardError::MetadataOverflow)?;
        self.bytes[self.len..end].copy_from_slice(data);
        self.len = end;
        Ok(())
    }

    fn push_str(&mut self, s: &str) -> Result<(), GiftCardError> {
        self.push(s.as_bytes())
    }

    fn push_decimal(&mut self, mut n: u128) -> Result<(), GiftCardError> {
        // u128::MAX has 39 digits
        let mut digits = [0u8; 39];
        let mut start = digits.len();
        loop {
            start -= 1;
            digits[start] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        self.push(&digits[start..])
    }

    fn push_base64(&mut self, data: &[u8]) -> Result<(), GiftCardError> {
        let written = STANDARD
            .encode_slice(data, &mut self.bytes[self.len..])
            .map_err(|_| GiftCardError::MetadataOverflow)?;
        self.len += written;
        Ok(())
    }

    fn push_json_escaped(&mut self, data: &[u8]) -> Result<(), GiftCardError> {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        for &b in data {
            match b {
                b'"' => self.push(b"\\\"")?,
                b'\\' => self.push(b"\\\\")?,
                0x00..=0x1f => self.push(&[
                    b'\\',
                    b'u',
                    b'0',
                    b'0',
                    HEX[(b >> 4) as usize],
                    HEX[(b & 0x0f) as usize],
                ])?,
                _ => self.push(&[b])?,
            }
        }
        Ok(())
    }

    fn push_xml_escaped(&mut self, data: &[u8]) -> Result<(), GiftCardError> {
        for &b in data {
            match b {
                b'&' => self.push(b"&amp;")?,
                b'<' => self.push(b"&lt;")?,
                b'>' => self.push(b"&gt;")?,
                b'\'' => self.push(b"&apos;")?,
                b'"' => self.push(b"&quot;")?,
                _ => self.push(&[b])?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_rendering() {
        let mut buf = Buffer::<64>::new();
        buf.push_decimal(0).unwrap();
        buf.push_str(",").unwrap();
        buf.push_decimal(40).unwrap();
        buf.push_str(",").unwrap();
        buf.push_decimal(1_000_007).unwrap();
        assert_eq!(buf.as_slice(), b"0,40,1000007");
    }

    #[test]
    fn escaping() {
        let mut json = Buffer::<64>::new();
        json.push_json_escaped(b"say \"hi\"\\\n").unwrap();
        assert_eq!(json.as_slice(), b"say \\\"hi\\\"\\\\\\u000a");

        let mut xml = Buffer::<64>::new();
        xml.push_xml_escaped(b"<b>Tom & 'Jo'</b>").unwrap();
        assert_eq!(xml.as_slice(), b"&lt;b&gt;Tom &amp; &apos;Jo&apos;&lt;/b&gt;");
    }

    #[test]
    fn overflow_is_reported() {
        let mut buf = Buffer::<4>::new();
        buf.push_str("abcd").unwrap();
        assert_eq!(buf.push_str("e"), Err(GiftCardError::MetadataOverflow));
        assert_eq!(buf.push_base64(b"x"), Err(GiftCardError::MetadataOverflow));
        assert_eq!(buf.as_slice(), b"abcd");
    }

    #[test]
    fn text_validation() {
        let env = Env::default();
        let check = |bytes: &[u8]| validate_text(&String::from_bytes(&env, bytes));

        assert_eq!(check(b"Good Job"), Ok(()));
        assert_eq!(check("Joyeux anniversaire \u{e9}\u{1f381}".as_bytes()), Ok(()));
        assert_eq!(check(b""), Err(GiftCardError::EmptyText));
        assert_eq!(check(&[b'a'; 65]), Err(GiftCardError::TextTooLong));
        assert_eq!(check(b"tab\there"), Err(GiftCardError::InvalidText));
        assert_eq!(check(b"nul\0"), Err(GiftCardError::InvalidText));
        assert_eq!(check(b"del\x7f"), Err(GiftCardError::InvalidText));
        assert_eq!(check(&[b'G', 0xff, b'J']), Err(GiftCardError::InvalidText));
        // truncated multi-byte sequence
        assert_eq!(check(&[b'a', 0xc3]), Err(GiftCardError::InvalidText));
    }

    #[test]
    fn worst_case_text_fits() {
        let env = Env::default();
        let text = String::from_str(&env, "<&<&<&<&<&<&<&<&<&<&<&<&<&<&<&<&\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"\"");
        assert_eq!(text.len(), MAX_TEXT_LEN);
        assert!(token_uri(&env, &text, i128::MAX).is_ok());
    }
}
