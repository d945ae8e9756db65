use bytes::{BufMut, BytesMut};
use clap::ValueEnum;
use std::io::{self, Error, ErrorKind};

const HIGH_SURROGATES: std::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;

/// Wire encoding of protocol text
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum TextEncoding {
    /// UTF-16 little endian, two bytes per code unit
    #[default]
    Utf16Le,
    /// UTF-8
    Utf8,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf16Le => "UTF-16 LE",
            TextEncoding::Utf8 => "UTF-8",
        }
    }

    /// Moves every complete character from `src` to the end of `dst`.
    ///
    /// Bytes of a character that has not fully arrived yet stay in `src`.
    pub fn decode(&self, src: &mut BytesMut, dst: &mut String) -> io::Result<()> {
        match self {
            TextEncoding::Utf16Le => decode_utf16_le(src, dst),
            TextEncoding::Utf8 => decode_utf8(src, dst),
        }
    }

    pub fn encode(&self, text: &str, dst: &mut BytesMut) {
        match self {
            TextEncoding::Utf16Le => {
                dst.reserve(text.len() * 2);
                for unit in text.encode_utf16() {
                    dst.put_u16_le(unit);
                }
            }
            TextEncoding::Utf8 => dst.put_slice(text.as_bytes()),
        }
    }

    /// Length of `text` in code units of this encoding
    pub fn len(&self, text: &str) -> usize {
        match self {
            TextEncoding::Utf16Le => text.encode_utf16().count(),
            TextEncoding::Utf8 => text.len(),
        }
    }
}

fn invalid_data(msg: &str) -> Error {
    Error::new(ErrorKind::InvalidData, msg.to_string())
}

fn decode_utf16_le(src: &mut BytesMut, dst: &mut String) -> io::Result<()> {
    let mut complete_units = src.len() / 2;
    if complete_units == 0 {
        return Ok(());
    }

    // a trailing high surrogate waits for its low half
    let last = (complete_units - 1) * 2;
    let last_unit = u16::from_le_bytes([src[last], src[last + 1]]);
    if HIGH_SURROGATES.contains(&last_unit) {
        complete_units -= 1;
    }

    let bytes = src.split_to(complete_units * 2);
    let units = bytes
        .chunks_exact(2)
        .map(|unit| u16::from_le_bytes([unit[0], unit[1]]));
    for decoded in char::decode_utf16(units) {
        match decoded {
            Ok(ch) => dst.push(ch),
            Err(_err) => return Err(invalid_data("Unpaired surrogate in UTF-16 text")),
        }
    }
    Ok(())
}

fn decode_utf8(src: &mut BytesMut, dst: &mut String) -> io::Result<()> {
    let valid_up_to = match std::str::from_utf8(&src[..]) {
        Ok(_text) => src.len(),
        Err(err) => {
            if err.error_len().is_some() {
                return Err(invalid_data("Invalid UTF-8 sequence"));
            }
            err.valid_up_to()
        }
    };
    let bytes = src.split_to(valid_up_to);
    let text = std::str::from_utf8(&bytes).map_err(|_err| invalid_data("Invalid UTF-8 sequence"))?;
    dst.push_str(text);
    Ok(())
}
