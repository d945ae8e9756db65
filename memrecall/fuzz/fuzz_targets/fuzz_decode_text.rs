#![no_main]
use libfuzzer_sys::fuzz_target;
extern crate memrecall;
use bytes::{BufMut, BytesMut};
use memrecall::protocol::text::{decoder::MemcacheTextDecoder, encoding::TextEncoding};
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    for encoding in [TextEncoding::Utf16Le, TextEncoding::Utf8] {
        let mut codec = MemcacheTextDecoder::new(encoding);
        let mut src = BytesMut::with_capacity(data.len());
        src.put(data);
        while let Ok(Some(request)) = codec.decode(&mut src) {
            let _ = request.response_text(encoding);
        }
    }
});
