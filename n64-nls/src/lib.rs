use std::borrow::Cow;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use encoding_rs::{Encoding as RsEncoding, SHIFT_JIS, UTF_8};

pub trait TextDecoder {
    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str>;

    /// Decode C-style string: stop at the first NUL (0x00).
    fn decode_cstr<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        self.decode(&bytes[..end])
    }
}

/// Encoding used for the text fields of a ROM header.
///
/// Retail titles are ASCII, with Japanese releases using half-width katakana,
/// so Shift-JIS covers both and is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    ShiftJis,
    Utf8,
}

impl Encoding {
    #[inline]
    pub fn as_encoding_rs(self) -> &'static RsEncoding {
        match self {
            Encoding::ShiftJis => SHIFT_JIS,
            Encoding::Utf8 => UTF_8,
        }
    }
}

impl FromStr for Encoding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sjis" | "shift_jis" | "shift-jis" => Ok(Encoding::ShiftJis),
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            _ => Err(anyhow!("unknown text encoding: {}", s)),
        }
    }
}

/// A simple decoder bound to one encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    enc: Encoding,
}

impl Decoder {
    #[inline]
    pub fn new(enc: Encoding) -> Self {
        Self { enc }
    }
}

impl TextDecoder for Decoder {
    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self.enc {
            Encoding::Utf8 => String::from_utf8_lossy(bytes),
            Encoding::ShiftJis => {
                let (cow, _had_errors) = self
                    .enc
                    .as_encoding_rs()
                    .decode_without_bom_handling(bytes);
                cow
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_decode_cstr() {
        let d = Decoder::new(Encoding::Utf8);
        let bytes = b"hello\0world";
        assert_eq!(d.decode_cstr(bytes), "hello");
    }

    #[test]
    fn shiftjis_ascii_title() {
        let d = Decoder::default();
        assert_eq!(d.decode(b"SUPER MARIO 64      "), "SUPER MARIO 64      ");
    }

    #[test]
    fn shiftjis_halfwidth_katakana() {
        // ﾎﾟｹﾓﾝ as stored in JIS X 0201
        let d = Decoder::new(Encoding::ShiftJis);
        assert_eq!(d.decode(&[0xCE, 0xDF, 0xB9, 0xD3, 0xDD]), "ﾎﾟｹﾓﾝ");
    }

    #[test]
    fn parse_encoding_names() {
        assert_eq!("SJIS".parse::<Encoding>().unwrap(), Encoding::ShiftJis);
        assert_eq!("utf8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert!("gbk".parse::<Encoding>().is_err());
    }
}
